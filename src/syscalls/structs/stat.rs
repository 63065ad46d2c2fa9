// struct stat and struct statfs decoders (Darwin layout)

use crate::debug::Memory;
use crate::syscalls::args::FieldValue;
use crate::syscalls::mem::{i32_at, i64_at, u16_at, u32_at, u64_at};
use crate::syscalls::params::{BoxedParam, Direction};
use crate::syscalls::symbols::file::decode_file_type_mode;

use super::{trimmed_str, StructParam};

/// struct stat / stat64, 144 bytes.
pub const STAT_SIZE: usize = 144;

fn stat_fields(
    data: &[u8],
    _mem: &dyn Memory,
    no_abbrev: bool,
) -> Option<Vec<(String, FieldValue)>> {
    let mode = u16_at(data, 4) as i64;
    let mode_str = if no_abbrev {
        format!("0{:o}", mode)
    } else {
        decode_file_type_mode(mode)
    };

    // Reserved fields and the nanosecond halves of the timestamps are
    // dropped; everything else appears in declaration order.
    Some(vec![
        ("st_dev".into(), FieldValue::Int(i32_at(data, 0) as i64)),
        ("st_mode".into(), FieldValue::Str(mode_str)),
        ("st_nlink".into(), FieldValue::Uint(u16_at(data, 6) as u64)),
        ("st_ino".into(), FieldValue::Uint(u64_at(data, 8))),
        ("st_uid".into(), FieldValue::Uint(u32_at(data, 16) as u64)),
        ("st_gid".into(), FieldValue::Uint(u32_at(data, 20) as u64)),
        ("st_rdev".into(), FieldValue::Int(i32_at(data, 24) as i64)),
        ("st_atimespec_sec".into(), FieldValue::Int(i64_at(data, 32))),
        ("st_mtimespec_sec".into(), FieldValue::Int(i64_at(data, 48))),
        ("st_ctimespec_sec".into(), FieldValue::Int(i64_at(data, 64))),
        ("st_birthtimespec_sec".into(), FieldValue::Int(i64_at(data, 80))),
        ("st_size".into(), FieldValue::Int(i64_at(data, 96))),
        ("st_blocks".into(), FieldValue::Int(i64_at(data, 104))),
        ("st_blksize".into(), FieldValue::Int(i32_at(data, 112) as i64)),
        ("st_flags".into(), FieldValue::Uint(u32_at(data, 116) as u64)),
        ("st_gen".into(), FieldValue::Uint(u32_at(data, 120) as u64)),
    ])
}

pub fn stat(direction: Direction) -> BoxedParam {
    StructParam::boxed(STAT_SIZE, direction, stat_fields)
}

/// struct statfs / statfs64, 2168 bytes.
pub const STATFS_SIZE: usize = 2168;

fn statfs_fields(
    data: &[u8],
    _mem: &dyn Memory,
    _no_abbrev: bool,
) -> Option<Vec<(String, FieldValue)>> {
    Some(vec![
        ("f_bsize".into(), FieldValue::Uint(u32_at(data, 0) as u64)),
        ("f_iosize".into(), FieldValue::Int(i32_at(data, 4) as i64)),
        ("f_blocks".into(), FieldValue::Uint(u64_at(data, 8))),
        ("f_bfree".into(), FieldValue::Uint(u64_at(data, 16))),
        ("f_bavail".into(), FieldValue::Uint(u64_at(data, 24))),
        ("f_files".into(), FieldValue::Uint(u64_at(data, 32))),
        ("f_ffree".into(), FieldValue::Uint(u64_at(data, 40))),
        ("f_owner".into(), FieldValue::Uint(u32_at(data, 56) as u64)),
        ("f_type".into(), FieldValue::Uint(u32_at(data, 60) as u64)),
        ("f_flags".into(), FieldValue::Uint(u32_at(data, 64) as u64)),
        ("f_fssubtype".into(), FieldValue::Uint(u32_at(data, 68) as u64)),
        ("f_fstypename".into(), FieldValue::Str(trimmed_str(&data[72..88]))),
        ("f_mntonname".into(), FieldValue::Str(trimmed_str(&data[88..1112]))),
        ("f_mntfromname".into(), FieldValue::Str(trimmed_str(&data[1112..2136]))),
    ])
}

pub fn statfs(direction: Direction) -> BoxedParam {
    StructParam::boxed(STATFS_SIZE, direction, statfs_fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::script::FakeMemory;
    use crate::syscalls::args::ArgValue;
    use crate::syscalls::params::{ParamDecoder, Scratch};
    use crate::syscalls::structs::testutil::{entry_ctx, exit_ctx};

    fn stat_image() -> Vec<u8> {
        let mut data = vec![0u8; STAT_SIZE];
        data[0..4].copy_from_slice(&16777232i32.to_le_bytes()); // st_dev
        data[4..6].copy_from_slice(&0o100644u16.to_le_bytes()); // st_mode
        data[6..8].copy_from_slice(&1u16.to_le_bytes()); // st_nlink
        data[8..16].copy_from_slice(&1234u64.to_le_bytes()); // st_ino
        data[16..20].copy_from_slice(&501u32.to_le_bytes()); // st_uid
        data[20..24].copy_from_slice(&20u32.to_le_bytes()); // st_gid
        data[96..104].copy_from_slice(&11i64.to_le_bytes()); // st_size
        data
    }

    #[test]
    fn stat_decodes_mode_and_size() {
        let mut fake = FakeMemory::new();
        fake.put(0x1000, &stat_image());
        let mut scratch = Scratch::default();
        let args = [0x500u64, 0x1000];
        let mut ctx = exit_ctx(&fake, 0x1000, &args, &mut scratch);

        let decoded = stat(Direction::Out).decode(&mut ctx).unwrap();
        let ArgValue::Struct(fields) = decoded else {
            panic!("expected struct");
        };
        let get = |name: &str| {
            fields
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(get("st_mode"), FieldValue::Str("S_IFREG|0644".into()));
        assert_eq!(get("st_size"), FieldValue::Int(11));
        assert_eq!(get("st_ino"), FieldValue::Uint(1234));
        // Reserved fields stay hidden
        assert!(fields.iter().all(|(n, _)| n != "st_lspare"));
    }

    #[test]
    fn stat_is_pointer_at_entry() {
        let fake = FakeMemory::new();
        let mut scratch = Scratch::default();
        let args = [0x500u64, 0x1000];
        let mut ctx = entry_ctx(&fake, 0x1000, &args, &mut scratch);
        assert_eq!(
            stat(Direction::Out).decode(&mut ctx).unwrap(),
            ArgValue::Pointer(0x1000)
        );
    }

    #[test]
    fn statfs_strings_trimmed() {
        let mut data = vec![0u8; STATFS_SIZE];
        data[72..76].copy_from_slice(b"apfs");
        data[88..89].copy_from_slice(b"/");
        let mut fake = FakeMemory::new();
        fake.put(0x2000, &data);
        let mut scratch = Scratch::default();
        let args = [0x500u64, 0x2000];
        let mut ctx = exit_ctx(&fake, 0x2000, &args, &mut scratch);

        let decoded = statfs(Direction::Out).decode(&mut ctx).unwrap();
        let ArgValue::Struct(fields) = decoded else {
            panic!("expected struct");
        };
        assert!(fields
            .iter()
            .any(|(n, v)| n == "f_fstypename" && *v == FieldValue::Str("apfs".into())));
        assert!(fields
            .iter()
            .any(|(n, v)| n == "f_mntonname" && *v == FieldValue::Str("/".into())));
    }
}
