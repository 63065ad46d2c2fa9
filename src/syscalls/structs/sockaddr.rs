// struct sockaddr decoder (Darwin layout)
// Dispatches on sa_family and decodes the matching variant.

use crate::syscalls::args::{ArgValue, FieldValue};
use crate::syscalls::mem;
use crate::syscalls::params::{BoxedParam, DecodeCtx, Direction, ParamDecoder};
use crate::syscalls::symbols::{self, network};

struct SockaddrParam {
    direction: Direction,
}

pub fn sockaddr(direction: Direction) -> BoxedParam {
    Box::new(SockaddrParam { direction })
}

/// Render a 16-byte IPv6 address with RFC 5952 zero compression.
fn format_ipv6(addr: &[u8]) -> String {
    let groups: Vec<u16> = addr
        .chunks_exact(2)
        .map(|c| u16::from_be_bytes([c[0], c[1]]))
        .collect();

    // Longest run of zero groups, two or more long, leftmost wins ties.
    let mut best = (0usize, 0usize); // (start, len)
    let mut cur = (0usize, 0usize);
    for (i, &g) in groups.iter().enumerate() {
        if g == 0 {
            if cur.1 == 0 {
                cur.0 = i;
            }
            cur.1 += 1;
            if cur.1 > best.1 {
                best = cur;
            }
        } else {
            cur = (0, 0);
        }
    }

    if best.1 < 2 {
        return groups
            .iter()
            .map(|g| format!("{:x}", g))
            .collect::<Vec<_>>()
            .join(":");
    }

    let head: Vec<String> = groups[..best.0].iter().map(|g| format!("{:x}", g)).collect();
    let tail: Vec<String> = groups[best.0 + best.1..]
        .iter()
        .map(|g| format!("{:x}", g))
        .collect();
    format!("{}::{}", head.join(":"), tail.join(":"))
}

fn decode_unix(ctx: &DecodeCtx<'_>) -> Vec<(String, FieldValue)> {
    let mut fields = vec![("sa_family".into(), FieldValue::Str("AF_UNIX".into()))];
    // sockaddr_un: len, family, then sun_path[104]
    if let Some(data) = mem::read_exact(ctx.mem, ctx.raw, 106) {
        let path = super::trimmed_str(&data[2..]);
        if !path.is_empty() {
            fields.push(("sun_path".into(), FieldValue::Str(format!("\"{}\"", path))));
        }
    }
    fields
}

fn decode_inet(ctx: &DecodeCtx<'_>) -> Vec<(String, FieldValue)> {
    let mut fields = vec![("sa_family".into(), FieldValue::Str("AF_INET".into()))];
    let Some(data) = mem::read_exact(ctx.mem, ctx.raw, 16) else {
        return fields;
    };
    let port = u16::from_be_bytes([data[2], data[3]]);
    fields.push(("sin_port".into(), FieldValue::Str(format!("htons({})", port))));
    let quad = format!("{}.{}.{}.{}", data[4], data[5], data[6], data[7]);
    fields.push((
        "sin_addr".into(),
        FieldValue::Str(format!("inet_addr(\"{}\")", quad)),
    ));
    fields
}

fn decode_inet6(ctx: &DecodeCtx<'_>) -> Vec<(String, FieldValue)> {
    let mut fields = vec![("sa_family".into(), FieldValue::Str("AF_INET6".into()))];
    let Some(data) = mem::read_exact(ctx.mem, ctx.raw, 28) else {
        return fields;
    };
    let port = u16::from_be_bytes([data[2], data[3]]);
    fields.push(("sin6_port".into(), FieldValue::Str(format!("htons({})", port))));
    fields.push((
        "sin6_addr".into(),
        FieldValue::Str(format!(
            "inet_pton(AF_INET6, \"{}\")",
            format_ipv6(&data[8..24])
        )),
    ));
    let scope = mem::u32_at(&data, 24);
    if scope != 0 {
        fields.push(("sin6_scope_id".into(), FieldValue::Uint(scope as u64)));
    }
    fields
}

impl ParamDecoder for SockaddrParam {
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

        // First two bytes are sa_len and sa_family
        let Some(head) = mem::read_exact(ctx.mem, ctx.raw, 2) else {
            return Some(ArgValue::Pointer(ctx.raw));
        };
        let family = head[1];

        let fields = match family {
            network::AF_UNIX => decode_unix(ctx),
            network::AF_INET => decode_inet(ctx),
            network::AF_INET6 => decode_inet6(ctx),
            other => {
                let name = symbols::lookup(network::AF_CONSTANTS, other as i64)
                    .map(str::to_string)
                    .unwrap_or_else(|| other.to_string());
                vec![("sa_family".into(), FieldValue::Str(name))]
            }
        };
        Some(ArgValue::Struct(fields))
    }
}
