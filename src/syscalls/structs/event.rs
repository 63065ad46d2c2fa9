// kqueue/select/poll structure decoders

use crate::syscalls::args::{ArgValue, FieldValue, StructItem};
use crate::syscalls::mem;
use crate::syscalls::params::{BoxedParam, DecodeCtx, Direction, ParamDecoder};
use crate::syscalls::symbols::{self, kqueue};

/// struct kevent, 32 bytes.
const KEVENT_SIZE: usize = 32;

/// struct kevent64_s, 48 bytes.
const KEVENT64_SIZE: usize = 48;

/// struct pollfd, 8 bytes.
const POLLFD_SIZE: usize = 8;

/// Event array cap; kqueue changelists never approach this.
const EVENT_MAX: u64 = 1000;

fn decode_filter(value: i16) -> String {
    symbols::lookup(kqueue::EVFILT_CONSTANTS, value as i64)
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string())
}

fn decode_ev_flags(value: u16) -> String {
    if value == 0 {
        return "0".to_string();
    }
    symbols::decode_flags(kqueue::EV_FLAGS, value as u64)
        .unwrap_or_else(|| format!("0x{:x}", value))
}

/// fflags are filter-specific; unknown filters (and unknown bits) render raw.
fn decode_fflags(value: u32, filter: i16) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let map = match filter {
        kqueue::EVFILT_VNODE => kqueue::NOTE_VNODE_FLAGS,
        kqueue::EVFILT_PROC => kqueue::NOTE_PROC_FLAGS,
        kqueue::EVFILT_TIMER => kqueue::NOTE_TIMER_FLAGS,
        kqueue::EVFILT_USER => kqueue::NOTE_USER_FLAGS,
        _ => return value.to_string(),
    };
    symbols::decode_flags(map, value as u64).unwrap_or_else(|| value.to_string())
}

fn kevent_entry(
    ident: u64,
    filter: i16,
    flags: u16,
    fflags: u32,
    data: i64,
    direction: Direction,
) -> Vec<(String, FieldValue)> {
    let mut entry = vec![
        ("ident".into(), FieldValue::Uint(ident)),
        ("filter".into(), FieldValue::Str(decode_filter(filter))),
        ("flags".into(), FieldValue::Str(decode_ev_flags(flags))),
    ];
    if fflags != 0 {
        entry.push(("fflags".into(), FieldValue::Str(decode_fflags(fflags, filter))));
    }
    // Eventlists report filter data; changelists keep it quiet
    if direction == Direction::Out && data != 0 {
        entry.push(("data".into(), FieldValue::Int(data)));
    }
    entry
}

/// Shared shape of the kevent/kevent64 array decoders.
struct EventArrayParam {
    count_idx: usize,
    direction: Direction,
    entry_size: usize,
}

pub fn kevent_array(count_idx: usize, direction: Direction) -> BoxedParam {
    Box::new(EventArrayParam {
        count_idx,
        direction,
        entry_size: KEVENT_SIZE,
    })
}

pub fn kevent64_array(count_idx: usize, direction: Direction) -> BoxedParam {
    Box::new(EventArrayParam {
        count_idx,
        direction,
        entry_size: KEVENT64_SIZE,
    })
}

impl ParamDecoder for EventArrayParam {
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

        let Some(&count_raw) = ctx.args.get(self.count_idx) else {
            return Some(ArgValue::Pointer(ctx.raw));
        };
        let mut count = count_raw;
        // The return value is the number of events actually delivered
        if !ctx.at_entry && self.direction == Direction::Out {
            if let Some(ret) = ctx.ret {
                if ret > 0 && (ret as u64) < count {
                    count = ret as u64;
                }
            }
        }
        if count == 0 || count > EVENT_MAX {
            return Some(ArgValue::Pointer(ctx.raw));
        }

        let Some(data) = mem::read_exact(ctx.mem, ctx.raw, count as usize * self.entry_size)
        else {
            return Some(ArgValue::Pointer(ctx.raw));
        };

        let items: Vec<StructItem> = data
            .chunks_exact(self.entry_size)
            .map(|chunk| {
                StructItem::Map(kevent_entry(
                    mem::u64_at(chunk, 0),
                    mem::i16_at(chunk, 8),
                    mem::u16_at(chunk, 10),
                    mem::u32_at(chunk, 12),
                    mem::i64_at(chunk, 16),
                    self.direction,
                ))
            })
            .collect();
        Some(ArgValue::StructArray(items))
    }
}

struct PollfdArrayParam {
    count_idx: usize,
}

pub fn pollfd_array(count_idx: usize) -> BoxedParam {
    Box::new(PollfdArrayParam { count_idx })
}

impl ParamDecoder for PollfdArrayParam {
    fn decode(&self, ctx: &mut DecodeCtx<'_>) -> Option<ArgValue> {
        // Requested events are an input; decode once at entry
        if !ctx.at_entry {
            return None;
        }
        if ctx.raw == 0 {
            return Some(ArgValue::Pointer(0));
        }
        let Some(&count) = ctx.args.get(self.count_idx) else {
            return Some(ArgValue::Pointer(ctx.raw));
        };
        if count == 0 || count > EVENT_MAX {
            return Some(ArgValue::Pointer(ctx.raw));
        }
        let Some(data) = mem::read_exact(ctx.mem, ctx.raw, count as usize * POLLFD_SIZE) else {
            return Some(ArgValue::Pointer(ctx.raw));
        };

        let items: Vec<StructItem> = data
            .chunks_exact(POLLFD_SIZE)
            .map(|chunk| {
                let events = mem::i16_at(chunk, 4);
                let events_str = if events == 0 {
                    "0".to_string()
                } else {
                    symbols::decode_flags(symbols::file::POLL_FLAGS, events as u16 as u64)
                        .unwrap_or_else(|| format!("0x{:x}", events))
                };
                StructItem::Map(vec![
                    ("fd".into(), FieldValue::Int(mem::i32_at(chunk, 0) as i64)),
                    ("events".into(), FieldValue::Str(events_str)),
                ])
            })
            .collect();
        Some(ArgValue::StructArray(items))
    }
}

/// fd_set bitmap: 1024 bits as 32 little-endian 32-bit words.
const FD_SET_WORDS: usize = 32;

struct FdSetParam;

pub fn fd_set() -> BoxedParam {
    Box::new(FdSetParam)
}

impl ParamDecoder for FdSetParam {
    fn decode(&self, ctx: &mut DecodeCtx<'_>) -> Option<ArgValue> {
        if !ctx.at_entry {
            return None;
        }
        if ctx.raw == 0 {
            return Some(ArgValue::Pointer(0));
        }
        let Some(data) = mem::read_exact(ctx.mem, ctx.raw, FD_SET_WORDS * 4) else {
            return Some(ArgValue::Pointer(ctx.raw));
        };

        let mut fds: Vec<String> = Vec::new();
        for (word_idx, chunk) in data.chunks_exact(4).enumerate() {
            let word = mem::u32_at(chunk, 0);
            for bit in 0..32 {
                if word & (1 << bit) != 0 {
                    fds.push((word_idx * 32 + bit).to_string());
                }
            }
        }
        Some(ArgValue::Str(format!("[{}]", fds.join(" "))))
    }
}

/// struct timeval: 64-bit seconds, 32-bit microseconds.
struct TimevalParam;

pub fn timeval() -> BoxedParam {
    Box::new(TimevalParam)
}

impl ParamDecoder for TimevalParam {
    fn decode(&self, ctx: &mut DecodeCtx<'_>) -> Option<ArgValue> {
        if ctx.raw == 0 {
            return Some(ArgValue::Pointer(0));
        }
        let Some(data) = mem::read_exact(ctx.mem, ctx.raw, 16) else {
            return Some(ArgValue::Pointer(ctx.raw));
        };
        Some(ArgValue::Struct(vec![
            ("tv_sec".into(), FieldValue::Int(mem::i64_at(&data, 0))),
            ("tv_usec".into(), FieldValue::Int(mem::i32_at(&data, 8) as i64)),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::script::FakeMemory;
    use crate::syscalls::params::Scratch;
    use crate::syscalls::structs::testutil::{entry_ctx, exit_ctx};

    fn kevent_image(ident: u64, filter: i16, flags: u16, fflags: u32, data: i64) -> Vec<u8> {
        let mut buf = vec![0u8; KEVENT_SIZE];
        buf[0..8].copy_from_slice(&ident.to_le_bytes());
        buf[8..10].copy_from_slice(&filter.to_le_bytes());
        buf[10..12].copy_from_slice(&flags.to_le_bytes());
        buf[12..16].copy_from_slice(&fflags.to_le_bytes());
        buf[16..24].copy_from_slice(&data.to_le_bytes());
        buf
    }

    #[test]
    fn kevent_changelist_decodes_at_entry() {
        let mut fake = FakeMemory::new();
        // EVFILT_VNODE watch with EV_ADD|EV_CLEAR and NOTE_WRITE
        fake.put(0x1000, &kevent_image(5, -4, 0x0021, 0x2, 0));
        let mut scratch = Scratch::default();
        let args = [3u64, 0x1000, 1, 0, 0, 0];

        let decoded = kevent_array(2, Direction::In)
            .decode(&mut entry_ctx(&fake, 0x1000, &args, &mut scratch))
            .unwrap();
        let ArgValue::StructArray(items) = decoded else {
            panic!("expected array")
        };
        let StructItem::Map(entry) = &items[0] else {
            panic!("expected map")
        };
        assert_eq!(entry[0], ("ident".into(), FieldValue::Uint(5)));
        assert_eq!(entry[1], ("filter".into(), FieldValue::Str("EVFILT_VNODE".into())));
        assert_eq!(entry[2], ("flags".into(), FieldValue::Str("EV_ADD|EV_CLEAR".into())));
        assert_eq!(entry[3], ("fflags".into(), FieldValue::Str("NOTE_WRITE".into())));
    }

    #[test]
    fn kevent_eventlist_clamped_by_return() {
        let mut fake = FakeMemory::new();
        fake.put(0x2000, &kevent_image(7, -1, 0x0001, 0, 42));
        fake.put(
            0x2000 + KEVENT_SIZE as u64,
            &kevent_image(8, -1, 0x0001, 0, 0),
        );
        let mut scratch = Scratch::default();
        let args = [3u64, 0, 0, 0x2000, 8, 0];

        let mut ctx = exit_ctx(&fake, 0x2000, &args, &mut scratch);
        ctx.ret = Some(1);
        let decoded = kevent_array(4, Direction::Out).decode(&mut ctx).unwrap();
        let ArgValue::StructArray(items) = decoded else {
            panic!("expected array")
        };
        assert_eq!(items.len(), 1);
        let StructItem::Map(entry) = &items[0] else {
            panic!("expected map")
        };
        assert!(entry.iter().any(|(n, v)| n == "data" && *v == FieldValue::Int(42)));
    }

    #[test]
    fn pollfd_events_decode() {
        let mut fake = FakeMemory::new();
        let mut buf = vec![0u8; POLLFD_SIZE];
        buf[0..4].copy_from_slice(&4i32.to_le_bytes());
        buf[4..6].copy_from_slice(&0x0001i16.to_le_bytes()); // POLLIN
        fake.put(0x3000, &buf);
        let mut scratch = Scratch::default();
        let args = [0x3000u64, 1, 0];

        let decoded = pollfd_array(1)
            .decode(&mut entry_ctx(&fake, 0x3000, &args, &mut scratch))
            .unwrap();
        let ArgValue::StructArray(items) = decoded else {
            panic!("expected array")
        };
        assert_eq!(
            items[0],
            StructItem::Map(vec![
                ("fd".into(), FieldValue::Int(4)),
                ("events".into(), FieldValue::Str("POLLIN".into())),
            ])
        );
    }

    #[test]
    fn fd_set_bitmap() {
        let mut fake = FakeMemory::new();
        let mut bits = vec![0u8; FD_SET_WORDS * 4];
        bits[0] = 0b0001_1000; // fds 3 and 4
        bits[4] = 0b0000_0001; // fd 32
        fake.put(0x4000, &bits);
        let mut scratch = Scratch::default();
        let args = [33u64, 0x4000];

        let decoded = fd_set()
            .decode(&mut entry_ctx(&fake, 0x4000, &args, &mut scratch))
            .unwrap();
        assert_eq!(decoded, ArgValue::Str("[3 4 32]".into()));
    }
}
