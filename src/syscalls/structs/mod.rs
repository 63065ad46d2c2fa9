// Struct decoders
// Fixed-layout structs share one skeleton: read the exact byte image, run a
// per-struct field function, fall back to the raw pointer on failure.
// Variable-shape structures (sockaddr, msghdr, event arrays) implement
// ParamDecoder directly.

pub mod attrlist;
pub mod event;
pub mod ipc;
pub mod msghdr;
pub mod process;
pub mod sigs;
pub mod sockaddr;
pub mod stat;
pub mod termios;
pub mod winsize;

use crate::debug::Memory;
use crate::syscalls::args::{ArgValue, FieldValue};
use crate::syscalls::mem;
use crate::syscalls::params::{BoxedParam, DecodeCtx, Direction, ParamDecoder};

/// Per-struct field extraction: byte image in, ordered field map out.
/// The memory handle is available for pointee reads (msghdr-style decoders
/// use their own ParamDecoder impls instead when the shape varies).
pub type FieldsFn = fn(&[u8], &dyn Memory, bool) -> Option<Vec<(String, FieldValue)>>;

/// Shared skeleton for fixed-layout struct parameters.
pub struct StructParam {
    size: usize,
    direction: Direction,
    fields: FieldsFn,
}

impl StructParam {
    pub fn boxed(size: usize, direction: Direction, fields: FieldsFn) -> BoxedParam {
        Box::new(Self {
            size,
            direction,
            fields,
        })
    }
}

impl ParamDecoder for StructParam {
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

        let decoded = mem::read_exact(ctx.mem, ctx.raw, self.size)
            .and_then(|data| (self.fields)(&data, ctx.mem, ctx.no_abbrev));
        match decoded {
            Some(fields) => Some(ArgValue::Struct(fields)),
            None => Some(ArgValue::Pointer(ctx.raw)),
        }
    }
}

/// Format a pointer field value the way struct output renders them.
pub(crate) fn format_ptr(value: u64) -> String {
    if value == 0 {
        "NULL".to_string()
    } else {
        format!("0x{:x}", value)
    }
}

/// Strip trailing NULs from a fixed-size byte-array field and decode it.
pub(crate) fn trimmed_str(data: &[u8]) -> String {
    let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
    crate::quote::decode_lossy(&data[..end])
}

#[cfg(test)]
pub(crate) mod testutil {
    use crate::debug::script::FakeMemory;
    use crate::syscalls::params::{DecodeCtx, Scratch};

    pub(crate) fn entry_ctx<'a>(
        mem: &'a FakeMemory,
        raw: u64,
        args: &'a [u64],
        scratch: &'a mut Scratch,
    ) -> DecodeCtx<'a> {
        DecodeCtx {
            mem,
            raw,
            args,
            ret: None,
            at_entry: true,
            no_abbrev: false,
            scratch,
        }
    }

    pub(crate) fn exit_ctx<'a>(
        mem: &'a FakeMemory,
        raw: u64,
        args: &'a [u64],
        scratch: &'a mut Scratch,
    ) -> DecodeCtx<'a> {
        DecodeCtx {
            mem,
            raw,
            args,
            ret: Some(0),
            at_entry: false,
            no_abbrev: false,
            scratch,
        }
    }
}
