// struct termios decoder (Darwin layout: 64-bit flag fields)

use crate::debug::Memory;
use crate::syscalls::args::FieldValue;
use crate::syscalls::mem;
use crate::syscalls::params::{BoxedParam, Direction};
use crate::syscalls::symbols::FlagMap;

use super::StructParam;

/// struct termios: four u64 flag words, cc[20], two u64 speeds; 72 bytes.
const TERMIOS_SIZE: usize = 72;

/// Input flags (c_iflag).
const TERMIOS_IFLAG: FlagMap = &[
    (0x00000001, "IGNBRK"),
    (0x00000002, "BRKINT"),
    (0x00000004, "IGNPAR"),
    (0x00000008, "PARMRK"),
    (0x00000010, "INPCK"),
    (0x00000020, "ISTRIP"),
    (0x00000040, "INLCR"),
    (0x00000080, "IGNCR"),
    (0x00000100, "ICRNL"),
    (0x00000200, "IXON"),
    (0x00000400, "IXOFF"),
    (0x00000800, "IXANY"),
    (0x00002000, "IMAXBEL"),
    (0x00004000, "IUTF8"),
];

/// Output flags (c_oflag).
const TERMIOS_OFLAG: FlagMap = &[
    (0x00000001, "OPOST"),
    (0x00000002, "ONLCR"),
    (0x00000004, "OXTABS"),
    (0x00000008, "ONOEOT"),
];

/// Control flags (c_cflag), main bits only.
const TERMIOS_CFLAG: FlagMap = &[
    (0x00004000, "CREAD"),
    (0x00008000, "PARENB"),
    (0x00010000, "PARODD"),
    (0x00020000, "HUPCL"),
    (0x00040000, "CLOCAL"),
];

/// Local flags (c_lflag).
const TERMIOS_LFLAG: FlagMap = &[
    (0x00000001, "ECHOKE"),
    (0x00000002, "ECHOE"),
    (0x00000004, "ECHOK"),
    (0x00000008, "ECHO"),
    (0x00000010, "ECHONL"),
    (0x00000020, "ECHOPRT"),
    (0x00000040, "ECHOCTL"),
    (0x00000080, "ISIG"),
    (0x00000100, "ICANON"),
    (0x00000400, "IEXTEN"),
    (0x00000800, "EXTPROC"),
    (0x00001000, "TOSTOP"),
    (0x00002000, "FLUSHO"),
    (0x00008000, "PENDIN"),
    (0x00010000, "NOFLSH"),
];

fn match_bits(map: FlagMap, value: u64) -> Option<String> {
    let names: Vec<&str> = map
        .iter()
        .filter(|(bits, _)| value & bits != 0)
        .map(|(_, name)| *name)
        .collect();
    (!names.is_empty()).then(|| names.join("|"))
}

fn termios_fields(
    data: &[u8],
    _mem: &dyn Memory,
    no_abbrev: bool,
) -> Option<Vec<(String, FieldValue)>> {
    let iflag = mem::u64_at(data, 0);
    let oflag = mem::u64_at(data, 8);
    let cflag = mem::u64_at(data, 16);
    let lflag = mem::u64_at(data, 24);

    if no_abbrev {
        return Some(vec![
            ("c_iflag".into(), FieldValue::Str(format!("0x{:x}", iflag))),
            ("c_oflag".into(), FieldValue::Str(format!("0x{:x}", oflag))),
            ("c_cflag".into(), FieldValue::Str(format!("0x{:x}", cflag))),
            ("c_lflag".into(), FieldValue::Str(format!("0x{:x}", lflag))),
        ]);
    }

    let mut fields = Vec::new();
    if let Some(s) = match_bits(TERMIOS_IFLAG, iflag) {
        fields.push(("c_iflag".into(), FieldValue::Str(s)));
    }
    if let Some(s) = match_bits(TERMIOS_OFLAG, oflag) {
        fields.push(("c_oflag".into(), FieldValue::Str(s)));
    }
    // The control word carries baud/char-size bits nobody wants spelled out
    if let Some(s) = match_bits(TERMIOS_CFLAG, cflag) {
        fields.push(("c_cflag".into(), FieldValue::Str(format!("{}|...", s))));
    }
    if let Some(s) = match_bits(TERMIOS_LFLAG, lflag) {
        fields.push(("c_lflag".into(), FieldValue::Str(s)));
    }

    if fields.is_empty() {
        fields.push(("c_iflag".into(), FieldValue::Str("0".into())));
    }
    Some(fields)
}

pub fn termios(direction: Direction) -> BoxedParam {
    StructParam::boxed(TERMIOS_SIZE, direction, termios_fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::script::FakeMemory;
    use crate::syscalls::args::ArgValue;
    use crate::syscalls::params::{ParamDecoder, Scratch};
    use crate::syscalls::structs::testutil::exit_ctx;

    #[test]
    fn decodes_common_terminal_flags() {
        let mut fake = FakeMemory::new();
        let mut data = vec![0u8; TERMIOS_SIZE];
        data[0..8].copy_from_slice(&0x0102u64.to_le_bytes()); // BRKINT|ICRNL
        data[16..24].copy_from_slice(&0x00004000u64.to_le_bytes()); // CREAD
        data[24..32].copy_from_slice(&0x0088u64.to_le_bytes()); // ECHO|ISIG
        fake.put(0x1000, &data);
        let mut scratch = Scratch::default();
        let args = [0u64, 0, 0x1000];

        let decoded = termios(Direction::Out)
            .decode(&mut exit_ctx(&fake, 0x1000, &args, &mut scratch))
            .unwrap();
        assert_eq!(
            decoded,
            ArgValue::Struct(vec![
                ("c_iflag".into(), FieldValue::Str("BRKINT|ICRNL".into())),
                ("c_cflag".into(), FieldValue::Str("CREAD|...".into())),
                ("c_lflag".into(), FieldValue::Str("ECHO|ISIG".into())),
            ])
        );
    }
}
