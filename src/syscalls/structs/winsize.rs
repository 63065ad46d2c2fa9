// struct winsize decoder (TIOCGWINSZ/TIOCSWINSZ payload)

use crate::debug::Memory;
use crate::syscalls::args::FieldValue;
use crate::syscalls::mem;
use crate::syscalls::params::{BoxedParam, Direction};

use super::StructParam;

fn winsize_fields(
    data: &[u8],
    _mem: &dyn Memory,
    _no_abbrev: bool,
) -> Option<Vec<(String, FieldValue)>> {
    Some(vec![
        ("ws_row".into(), FieldValue::Uint(mem::u16_at(data, 0) as u64)),
        ("ws_col".into(), FieldValue::Uint(mem::u16_at(data, 2) as u64)),
        ("ws_xpixel".into(), FieldValue::Uint(mem::u16_at(data, 4) as u64)),
        ("ws_ypixel".into(), FieldValue::Uint(mem::u16_at(data, 6) as u64)),
    ])
}

pub fn winsize(direction: Direction) -> BoxedParam {
    StructParam::boxed(8, direction, winsize_fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::script::FakeMemory;
    use crate::syscalls::args::ArgValue;
    use crate::syscalls::params::{ParamDecoder, Scratch};
    use crate::syscalls::structs::testutil::exit_ctx;

    #[test]
    fn decodes_rows_and_columns() {
        let mut fake = FakeMemory::new();
        let mut data = vec![0u8; 8];
        data[0..2].copy_from_slice(&50u16.to_le_bytes());
        data[2..4].copy_from_slice(&120u16.to_le_bytes());
        fake.put(0x1000, &data);
        let mut scratch = Scratch::default();
        let args = [0u64, 0x40087468, 0x1000];

        let decoded = winsize(Direction::Out)
            .decode(&mut exit_ctx(&fake, 0x1000, &args, &mut scratch))
            .unwrap();
        assert_eq!(
            decoded,
            ArgValue::Struct(vec![
                ("ws_row".into(), FieldValue::Uint(50)),
                ("ws_col".into(), FieldValue::Uint(120)),
                ("ws_xpixel".into(), FieldValue::Uint(0)),
                ("ws_ypixel".into(), FieldValue::Uint(0)),
            ])
        );
    }
}
