// Signal structure decoders: sigaction, stack_t, sigset_t

use crate::debug::Memory;
use crate::syscalls::args::{ArgValue, FieldValue};
use crate::syscalls::mem;
use crate::syscalls::params::{BoxedParam, DecodeCtx, Direction, ParamDecoder};
use crate::syscalls::symbols::{self, signal};

use super::StructParam;

/// struct sigaction: handler pointer, 32-bit mask, int flags.
const SIGACTION_SIZE: usize = 16;

fn decode_handler(value: u64) -> String {
    match value {
        0 => "SIG_DFL".to_string(),
        1 => "SIG_IGN".to_string(),
        v => format!("0x{:x}", v),
    }
}

fn sigaction_fields(
    data: &[u8],
    _mem: &dyn Memory,
    _no_abbrev: bool,
) -> Option<Vec<(String, FieldValue)>> {
    let handler = mem::u64_at(data, 0);
    let mask = mem::u32_at(data, 8);
    let flags = mem::i32_at(data, 12);

    let flags_str = if flags == 0 {
        "0".to_string()
    } else {
        symbols::decode_flags(signal::SA_FLAGS, flags as u32 as u64)
            .unwrap_or_else(|| format!("0x{:x}", flags))
    };

    Some(vec![
        ("sa_handler".into(), FieldValue::Str(decode_handler(handler))),
        ("sa_mask".into(), FieldValue::Str(signal::decode_sigset(mask))),
        ("sa_flags".into(), FieldValue::Str(flags_str)),
    ])
}

pub fn sigaction(direction: Direction) -> BoxedParam {
    StructParam::boxed(SIGACTION_SIZE, direction, sigaction_fields)
}

/// stack_t: base pointer, size, flags.
const STACK_SIZE: usize = 24;

/// SIGSTKSZ on macOS.
const SIGSTKSZ: u64 = 131072;

fn stack_fields(
    data: &[u8],
    _mem: &dyn Memory,
    _no_abbrev: bool,
) -> Option<Vec<(String, FieldValue)>> {
    let sp = mem::u64_at(data, 0);
    let size = mem::u64_at(data, 8);
    let flags = mem::i32_at(data, 16);

    let size_str = if size == SIGSTKSZ {
        "SIGSTKSZ".to_string()
    } else {
        size.to_string()
    };
    let flags_str = if flags == 0 {
        "0".to_string()
    } else {
        symbols::decode_flags(signal::SS_FLAGS, flags as u32 as u64)
            .unwrap_or_else(|| format!("0x{:x}", flags))
    };

    Some(vec![
        ("ss_sp".into(), FieldValue::Str(super::format_ptr(sp))),
        ("ss_size".into(), FieldValue::Str(size_str)),
        ("ss_flags".into(), FieldValue::Str(flags_str)),
    ])
}

pub fn sigaltstack(direction: Direction) -> BoxedParam {
    StructParam::boxed(STACK_SIZE, direction, stack_fields)
}

/// sigset_t is a bare 32-bit bitmap behind the pointer.
struct SigsetParam {
    direction: Direction,
}

pub fn sigset(direction: Direction) -> BoxedParam {
    Box::new(SigsetParam { direction })
}

impl ParamDecoder for SigsetParam {
    fn decode(&self, ctx: &mut DecodeCtx<'_>) -> Option<ArgValue> {
        if ctx.at_entry && self.direction != Direction::In {
            return Some(ArgValue::Pointer(ctx.raw));
        }
        if !ctx.at_entry && self.direction != Direction::Out {
            return None;
        }
        if ctx.raw == 0 {
            return Some(ArgValue::Pointer(0));
        }
        match mem::read_u32(ctx.mem, ctx.raw) {
            Some(mask) => Some(ArgValue::Str(signal::decode_sigset(mask))),
            None => Some(ArgValue::Pointer(ctx.raw)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::script::FakeMemory;
    use crate::syscalls::params::Scratch;
    use crate::syscalls::structs::testutil::{entry_ctx, exit_ctx};

    #[test]
    fn sigaction_handler_and_flags() {
        let mut fake = FakeMemory::new();
        let mut data = vec![0u8; SIGACTION_SIZE];
        data[0..8].copy_from_slice(&1u64.to_le_bytes()); // SIG_IGN
        data[8..12].copy_from_slice(&(1u32 << 1).to_le_bytes()); // SIGINT in mask
        data[12..16].copy_from_slice(&0x0002i32.to_le_bytes()); // SA_RESTART
        fake.put(0x1000, &data);
        let mut scratch = Scratch::default();
        let args = [2u64, 0x1000, 0];

        let decoded = sigaction(Direction::In)
            .decode(&mut entry_ctx(&fake, 0x1000, &args, &mut scratch))
            .unwrap();
        assert_eq!(
            decoded,
            ArgValue::Struct(vec![
                ("sa_handler".into(), FieldValue::Str("SIG_IGN".into())),
                ("sa_mask".into(), FieldValue::Str("[SIGINT]".into())),
                ("sa_flags".into(), FieldValue::Str("SA_RESTART".into())),
            ])
        );
    }

    #[test]
    fn stack_size_constant() {
        let mut fake = FakeMemory::new();
        let mut data = vec![0u8; STACK_SIZE];
        data[0..8].copy_from_slice(&0xbeef0000u64.to_le_bytes());
        data[8..16].copy_from_slice(&131072u64.to_le_bytes());
        data[16..20].copy_from_slice(&0x0001i32.to_le_bytes()); // SS_ONSTACK
        fake.put(0x2000, &data);
        let mut scratch = Scratch::default();
        let args = [0x2000u64, 0];

        let decoded = sigaltstack(Direction::In)
            .decode(&mut entry_ctx(&fake, 0x2000, &args, &mut scratch))
            .unwrap();
        assert_eq!(
            decoded,
            ArgValue::Struct(vec![
                ("ss_sp".into(), FieldValue::Str("0xbeef0000".into())),
                ("ss_size".into(), FieldValue::Str("SIGSTKSZ".into())),
                ("ss_flags".into(), FieldValue::Str("SS_ONSTACK".into())),
            ])
        );
    }

    #[test]
    fn sigset_out_decodes_at_exit() {
        let mut fake = FakeMemory::new();
        fake.put(0x3000, &((1u32 << 1) | (1 << 14)).to_le_bytes());
        let mut scratch = Scratch::default();
        let args = [1u64, 0, 0x3000];
        let decoder = sigset(Direction::Out);

        assert_eq!(
            decoder
                .decode(&mut entry_ctx(&fake, 0x3000, &args, &mut scratch))
                .unwrap(),
            ArgValue::Pointer(0x3000)
        );
        assert_eq!(
            decoder
                .decode(&mut exit_ctx(&fake, 0x3000, &args, &mut scratch))
                .unwrap(),
            ArgValue::Str("[SIGINT|SIGTERM]".into())
        );
    }
}
