// struct msghdr decoder (sendmsg/recvmsg)

use crate::debug::Memory;
use crate::quote::quote_bytes;
use crate::syscalls::args::{ArgValue, FieldValue};
use crate::syscalls::mem;
use crate::syscalls::params::{BoxedParam, DecodeCtx, Direction, ParamDecoder};

use super::format_ptr;

/// Preview cap for each iovec base inside a msghdr.
const IOVEC_PREVIEW: usize = 32;

/// struct msghdr, 48 bytes.
const MSGHDR_SIZE: usize = 48;

struct MsghdrParam {
    direction: Direction,
}

pub fn msghdr(direction: Direction) -> BoxedParam {
    Box::new(MsghdrParam { direction })
}

fn decode_iovec_array(
    memory: &dyn Memory,
    address: u64,
    count: i32,
) -> Option<Vec<Vec<(String, FieldValue)>>> {
    if count <= 0 || count > 1024 {
        return None;
    }
    let data = mem::read_exact(memory, address, count as usize * 16)?;

    let mut entries = Vec::with_capacity(count as usize);
    for chunk in data.chunks_exact(16) {
        let base = mem::u64_at(chunk, 0);
        let len = mem::u64_at(chunk, 8);
        let preview = if base == 0 || len == 0 {
            "?".to_string()
        } else {
            match mem::read_exact(memory, base, (len as usize).min(IOVEC_PREVIEW)) {
                Some(buf) => quote_bytes(&buf, IOVEC_PREVIEW),
                None => "?".to_string(),
            }
        };
        entries.push(vec![
            ("iov_base".into(), FieldValue::Str(preview)),
            ("iov_len".into(), FieldValue::Uint(len)),
        ]);
    }
    Some(entries)
}

impl ParamDecoder for MsghdrParam {
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

        let Some(data) = mem::read_exact(ctx.mem, ctx.raw, MSGHDR_SIZE) else {
            return Some(ArgValue::Pointer(ctx.raw));
        };

        let msg_name = mem::u64_at(&data, 0);
        let msg_namelen = mem::u32_at(&data, 8);
        let msg_iov = mem::u64_at(&data, 16);
        let msg_iovlen = mem::i32_at(&data, 24);
        let msg_control = mem::u64_at(&data, 32);
        let msg_controllen = mem::u32_at(&data, 40);
        let msg_flags = mem::i32_at(&data, 44);

        let mut fields = vec![
            ("msg_name".into(), FieldValue::Str(format_ptr(msg_name))),
            (
                "msg_namelen".into(),
                FieldValue::Uint(if msg_name != 0 { msg_namelen as u64 } else { 0 }),
            ),
        ];

        match decode_iovec_array(ctx.mem, msg_iov, msg_iovlen) {
            Some(entries) => {
                fields.push(("msg_iov".into(), FieldValue::List(entries)));
                fields.push(("msg_iovlen".into(), FieldValue::Int(msg_iovlen as i64)));
            }
            None => {
                fields.push(("msg_iov".into(), FieldValue::Str(format_ptr(msg_iov))));
                fields.push(("msg_iovlen".into(), FieldValue::Int(msg_iovlen as i64)));
            }
        }

        fields.push(("msg_control".into(), FieldValue::Str(format_ptr(msg_control))));
        fields.push((
            "msg_controllen".into(),
            FieldValue::Uint(if msg_control != 0 {
                msg_controllen as u64
            } else {
                0
            }),
        ));
        if msg_flags != 0 {
            fields.push(("msg_flags".into(), FieldValue::Int(msg_flags as i64)));
        }

        Some(ArgValue::Struct(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::script::FakeMemory;
    use crate::syscalls::params::Scratch;
    use crate::syscalls::structs::testutil::entry_ctx;

    #[test]
    fn decodes_iovecs_behind_msghdr() {
        let mut fake = FakeMemory::new();
        fake.put(0x5000, b"ping");
        // one iovec at 0x4000
        fake.put_u64(0x4000, 0x5000);
        fake.put_u64(0x4008, 4);
        // msghdr at 0x3000
        let mut hdr = vec![0u8; MSGHDR_SIZE];
        hdr[16..24].copy_from_slice(&0x4000u64.to_le_bytes()); // msg_iov
        hdr[24..28].copy_from_slice(&1i32.to_le_bytes()); // msg_iovlen
        fake.put(0x3000, &hdr);

        let mut scratch = Scratch::default();
        let args = [3u64, 0x3000, 0];
        let decoded = msghdr(Direction::In)
            .decode(&mut entry_ctx(&fake, 0x3000, &args, &mut scratch))
            .unwrap();

        let ArgValue::Struct(fields) = decoded else {
            panic!("expected struct")
        };
        let iov = fields
            .iter()
            .find(|(n, _)| n == "msg_iov")
            .map(|(_, v)| v.clone())
            .unwrap();
        assert_eq!(
            iov,
            FieldValue::List(vec![vec![
                ("iov_base".into(), FieldValue::Str("ping".into())),
                ("iov_len".into(), FieldValue::Uint(4)),
            ]])
        );
        assert!(fields
            .iter()
            .any(|(n, v)| n == "msg_name" && *v == FieldValue::Str("NULL".into())));
    }
}
