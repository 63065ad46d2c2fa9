// struct attrlist and struct fssearchblock decoders

use crate::debug::Memory;
use crate::syscalls::args::FieldValue;
use crate::syscalls::mem;
use crate::syscalls::params::{BoxedParam, Direction};
use crate::syscalls::symbols::FlagMap;

use super::StructParam;

/// Common attributes (ATTR_CMN_*).
const ATTR_CMN_FLAGS: FlagMap = &[
    (0x00000001, "ATTR_CMN_NAME"),
    (0x00000002, "ATTR_CMN_DEVID"),
    (0x00000004, "ATTR_CMN_FSID"),
    (0x00000008, "ATTR_CMN_OBJTYPE"),
    (0x00000010, "ATTR_CMN_OBJTAG"),
    (0x00000020, "ATTR_CMN_OBJID"),
    (0x00000040, "ATTR_CMN_OBJPERMANENTID"),
    (0x00000080, "ATTR_CMN_PAROBJID"),
    (0x00000100, "ATTR_CMN_SCRIPT"),
    (0x00000200, "ATTR_CMN_CRTIME"),
    (0x00000400, "ATTR_CMN_MODTIME"),
    (0x00000800, "ATTR_CMN_CHGTIME"),
    (0x00001000, "ATTR_CMN_ACCTIME"),
    (0x00002000, "ATTR_CMN_BKUPTIME"),
    (0x00004000, "ATTR_CMN_FNDRINFO"),
    (0x00008000, "ATTR_CMN_OWNERID"),
    (0x00010000, "ATTR_CMN_GRPID"),
    (0x00020000, "ATTR_CMN_ACCESSMASK"),
    (0x00040000, "ATTR_CMN_FLAGS"),
    (0x00080000, "ATTR_CMN_GEN_COUNT"),
    (0x00100000, "ATTR_CMN_DOCUMENT_ID"),
    (0x00200000, "ATTR_CMN_USERACCESS"),
    (0x00400000, "ATTR_CMN_EXTENDED_SECURITY"),
    (0x00800000, "ATTR_CMN_UUID"),
    (0x01000000, "ATTR_CMN_GRPUUID"),
    (0x02000000, "ATTR_CMN_FILEID"),
    (0x04000000, "ATTR_CMN_PARENTID"),
    (0x08000000, "ATTR_CMN_FULLPATH"),
    (0x10000000, "ATTR_CMN_ADDEDTIME"),
    (0x20000000, "ATTR_CMN_ERROR"),
    (0x40000000, "ATTR_CMN_DATA_PROTECT_FLAGS"),
    (0x80000000, "ATTR_CMN_RETURNED_ATTRS"),
];

/// Volume attributes (ATTR_VOL_*).
const ATTR_VOL_FLAGS: FlagMap = &[
    (0x00000001, "ATTR_VOL_FSTYPE"),
    (0x00000002, "ATTR_VOL_SIGNATURE"),
    (0x00000004, "ATTR_VOL_SIZE"),
    (0x00000008, "ATTR_VOL_SPACEFREE"),
    (0x00000010, "ATTR_VOL_SPACEAVAIL"),
    (0x00000020, "ATTR_VOL_MINALLOCATION"),
    (0x00000040, "ATTR_VOL_ALLOCATIONCLUMP"),
    (0x00000080, "ATTR_VOL_IOBLOCKSIZE"),
    (0x00000100, "ATTR_VOL_OBJCOUNT"),
    (0x00000200, "ATTR_VOL_FILECOUNT"),
    (0x00000400, "ATTR_VOL_DIRCOUNT"),
    (0x00000800, "ATTR_VOL_MAXOBJCOUNT"),
    (0x00001000, "ATTR_VOL_MOUNTPOINT"),
    (0x00002000, "ATTR_VOL_NAME"),
    (0x00004000, "ATTR_VOL_MOUNTFLAGS"),
];

/// Directory attributes (ATTR_DIR_*).
const ATTR_DIR_FLAGS: FlagMap = &[
    (0x00000001, "ATTR_DIR_LINKCOUNT"),
    (0x00000002, "ATTR_DIR_ENTRYCOUNT"),
    (0x00000004, "ATTR_DIR_MOUNTSTATUS"),
];

/// File attributes (ATTR_FILE_*).
const ATTR_FILE_FLAGS: FlagMap = &[
    (0x00000001, "ATTR_FILE_LINKCOUNT"),
    (0x00000002, "ATTR_FILE_TOTALSIZE"),
    (0x00000004, "ATTR_FILE_ALLOCSIZE"),
    (0x00000008, "ATTR_FILE_IOBLOCKSIZE"),
    (0x00000010, "ATTR_FILE_DEVTYPE"),
    (0x00000020, "ATTR_FILE_FORKCOUNT"),
    (0x00000040, "ATTR_FILE_FORKLIST"),
    (0x00000080, "ATTR_FILE_DATALENGTH"),
    (0x00000100, "ATTR_FILE_DATAALLOCSIZE"),
    (0x00000200, "ATTR_FILE_RSRCLENGTH"),
    (0x00000400, "ATTR_FILE_RSRCALLOCSIZE"),
];

fn attr_group(value: u32, map: FlagMap) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let names: Vec<&str> = map
        .iter()
        .filter(|(bits, _)| value as u64 & bits != 0)
        .map(|(_, name)| *name)
        .collect();
    if names.is_empty() {
        format!("0x{:x}", value)
    } else {
        names.join("|")
    }
}

/// struct attrlist, 24 bytes.
fn attrlist_fields(
    data: &[u8],
    _mem: &dyn Memory,
    _no_abbrev: bool,
) -> Option<Vec<(String, FieldValue)>> {
    let forkattr = mem::u32_at(data, 20);
    Some(vec![
        ("bitmapcount".into(), FieldValue::Uint(mem::u16_at(data, 0) as u64)),
        (
            "commonattr".into(),
            FieldValue::Str(attr_group(mem::u32_at(data, 4), ATTR_CMN_FLAGS)),
        ),
        (
            "volattr".into(),
            FieldValue::Str(attr_group(mem::u32_at(data, 8), ATTR_VOL_FLAGS)),
        ),
        (
            "dirattr".into(),
            FieldValue::Str(attr_group(mem::u32_at(data, 12), ATTR_DIR_FLAGS)),
        ),
        (
            "fileattr".into(),
            FieldValue::Str(attr_group(mem::u32_at(data, 16), ATTR_FILE_FLAGS)),
        ),
        (
            "forkattr".into(),
            FieldValue::Str(if forkattr == 0 {
                "0".to_string()
            } else {
                format!("0x{:x}", forkattr)
            }),
        ),
    ])
}

pub fn attrlist(direction: Direction) -> BoxedParam {
    StructParam::boxed(24, direction, attrlist_fields)
}

/// struct fssearchblock, 104 bytes. The embedded pointers and attrlists are
/// not reliably reachable and stay hidden.
fn fssearchblock_fields(
    data: &[u8],
    _mem: &dyn Memory,
    _no_abbrev: bool,
) -> Option<Vec<(String, FieldValue)>> {
    Some(vec![
        ("returnbuffersize".into(), FieldValue::Uint(mem::u64_at(data, 16))),
        ("maxmatches".into(), FieldValue::Uint(mem::u64_at(data, 24))),
        (
            "sizeofsearchparams1".into(),
            FieldValue::Uint(mem::u64_at(data, 56)),
        ),
        (
            "sizeofsearchparams2".into(),
            FieldValue::Uint(mem::u64_at(data, 72)),
        ),
    ])
}

pub fn fssearchblock(direction: Direction) -> BoxedParam {
    StructParam::boxed(104, direction, fssearchblock_fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::script::FakeMemory;
    use crate::syscalls::args::ArgValue;
    use crate::syscalls::params::{ParamDecoder, Scratch};
    use crate::syscalls::structs::testutil::entry_ctx;

    #[test]
    fn attrlist_group_decode() {
        let mut fake = FakeMemory::new();
        let mut data = vec![0u8; 24];
        data[0..2].copy_from_slice(&5u16.to_le_bytes());
        data[4..8].copy_from_slice(&0x3u32.to_le_bytes()); // NAME|DEVID
        fake.put(0x1000, &data);
        let mut scratch = Scratch::default();
        let args = [0u64, 0x1000];

        let decoded = attrlist(Direction::In)
            .decode(&mut entry_ctx(&fake, 0x1000, &args, &mut scratch))
            .unwrap();
        let ArgValue::Struct(fields) = decoded else {
            panic!("expected struct")
        };
        assert!(fields.iter().any(|(n, v)| n == "commonattr"
            && *v == FieldValue::Str("ATTR_CMN_NAME|ATTR_CMN_DEVID".into())));
        assert!(fields
            .iter()
            .any(|(n, v)| n == "volattr" && *v == FieldValue::Str("0".into())));
    }
}
