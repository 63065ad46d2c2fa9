// System V IPC and async-I/O structure decoders

use crate::debug::Memory;
use crate::syscalls::args::{ArgValue, FieldValue, StructItem};
use crate::syscalls::mem;
use crate::syscalls::params::{BoxedParam, DecodeCtx, Direction, ParamDecoder};
use crate::syscalls::symbols::{self, ipc};

use super::StructParam;

// The *_ds structs lead with a 24-byte ipc_perm that stays hidden at this
// level; field offsets below start past it.

/// struct msqid_ds, 128 bytes.
fn msqid_ds_fields(
    data: &[u8],
    _mem: &dyn Memory,
    _no_abbrev: bool,
) -> Option<Vec<(String, FieldValue)>> {
    Some(vec![
        ("msg_cbytes".into(), FieldValue::Uint(mem::u64_at(data, 32))),
        ("msg_qnum".into(), FieldValue::Uint(mem::u64_at(data, 40))),
        ("msg_qbytes".into(), FieldValue::Uint(mem::u64_at(data, 48))),
        ("msg_lspid".into(), FieldValue::Int(mem::i32_at(data, 56) as i64)),
        ("msg_lrpid".into(), FieldValue::Int(mem::i32_at(data, 60) as i64)),
        ("msg_stime".into(), FieldValue::Int(mem::i64_at(data, 64))),
        ("msg_rtime".into(), FieldValue::Int(mem::i64_at(data, 80))),
        ("msg_ctime".into(), FieldValue::Int(mem::i64_at(data, 96))),
    ])
}

pub fn msqid_ds(direction: Direction) -> BoxedParam {
    StructParam::boxed(128, direction, msqid_ds_fields)
}

/// struct semid_ds, 80 bytes.
fn semid_ds_fields(
    data: &[u8],
    _mem: &dyn Memory,
    _no_abbrev: bool,
) -> Option<Vec<(String, FieldValue)>> {
    Some(vec![
        ("sem_nsems".into(), FieldValue::Uint(mem::u16_at(data, 28) as u64)),
        ("sem_otime".into(), FieldValue::Int(mem::i64_at(data, 32))),
        ("sem_ctime".into(), FieldValue::Int(mem::i64_at(data, 48))),
    ])
}

pub fn semid_ds(direction: Direction) -> BoxedParam {
    StructParam::boxed(80, direction, semid_ds_fields)
}

/// struct shmid_ds, 80 bytes.
fn shmid_ds_fields(
    data: &[u8],
    _mem: &dyn Memory,
    _no_abbrev: bool,
) -> Option<Vec<(String, FieldValue)>> {
    Some(vec![
        ("shm_segsz".into(), FieldValue::Uint(mem::u64_at(data, 24))),
        ("shm_lpid".into(), FieldValue::Int(mem::i32_at(data, 32) as i64)),
        ("shm_cpid".into(), FieldValue::Int(mem::i32_at(data, 36) as i64)),
        ("shm_nattch".into(), FieldValue::Uint(mem::u16_at(data, 40) as u64)),
        ("shm_atime".into(), FieldValue::Int(mem::i64_at(data, 48))),
        ("shm_dtime".into(), FieldValue::Int(mem::i64_at(data, 56))),
        ("shm_ctime".into(), FieldValue::Int(mem::i64_at(data, 64))),
    ])
}

pub fn shmid_ds(direction: Direction) -> BoxedParam {
    StructParam::boxed(80, direction, shmid_ds_fields)
}

/// struct sembuf, 6 bytes.
fn sembuf_fields(
    data: &[u8],
    _mem: &dyn Memory,
    no_abbrev: bool,
) -> Option<Vec<(String, FieldValue)>> {
    let flg = mem::i16_at(data, 4);
    let flg_str = if no_abbrev || flg == 0 {
        flg.to_string()
    } else {
        symbols::decode_flags(ipc::SEMOP_FLAGS, flg as u16 as u64)
            .unwrap_or_else(|| format!("0x{:x}", flg))
    };
    Some(vec![
        ("sem_num".into(), FieldValue::Uint(mem::u16_at(data, 0) as u64)),
        ("sem_op".into(), FieldValue::Int(mem::i16_at(data, 2) as i64)),
        ("sem_flg".into(), FieldValue::Str(flg_str)),
    ])
}

pub fn sembuf(direction: Direction) -> BoxedParam {
    StructParam::boxed(6, direction, sembuf_fields)
}

/// struct aiocb, 104 bytes (sigevent body skipped).
const AIOCB_SIZE: usize = 104;

fn lio_opcode(value: i32) -> String {
    symbols::lookup(ipc::LIO_OPCODES, value as i64)
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string())
}

fn aiocb_fields(
    data: &[u8],
    _mem: &dyn Memory,
    no_abbrev: bool,
) -> Option<Vec<(String, FieldValue)>> {
    let opcode = mem::i32_at(data, 100);
    let opcode_str = if no_abbrev {
        opcode.to_string()
    } else {
        lio_opcode(opcode)
    };
    Some(vec![
        ("aio_fildes".into(), FieldValue::Int(mem::i32_at(data, 0) as i64)),
        ("aio_offset".into(), FieldValue::Int(mem::i64_at(data, 8))),
        (
            "aio_buf".into(),
            FieldValue::Str(super::format_ptr(mem::u64_at(data, 16))),
        ),
        ("aio_nbytes".into(), FieldValue::Uint(mem::u64_at(data, 24))),
        ("aio_lio_opcode".into(), FieldValue::Str(opcode_str)),
    ])
}

pub fn aiocb(direction: Direction) -> BoxedParam {
    StructParam::boxed(AIOCB_SIZE, direction, aiocb_fields)
}

/// Array of `struct aiocb *` (aio_suspend, lio_listio): each element is a
/// pointer; the pointees are summarised one line each.
struct AiocbArrayParam {
    count_idx: usize,
    direction: Direction,
}

pub fn aiocb_array(count_idx: usize, direction: Direction) -> BoxedParam {
    Box::new(AiocbArrayParam {
        count_idx,
        direction,
    })
}

fn summarize_aiocb(memory: &dyn Memory, address: u64) -> Option<String> {
    let data = mem::read_exact(memory, address, AIOCB_SIZE)?;
    let mut parts = vec![format!("fd={}", mem::i32_at(&data, 0))];
    let nbytes = mem::u64_at(&data, 24);
    if nbytes > 0 {
        parts.push(format!("nbytes={}", nbytes));
    }
    let offset = mem::i64_at(&data, 8);
    if offset != 0 {
        parts.push(format!("offset={}", offset));
    }
    let opcode = mem::i32_at(&data, 100);
    if opcode != 0 {
        parts.push(format!("op={}", lio_opcode(opcode)));
    }
    Some(format!("{{{}}}", parts.join(", ")))
}

impl ParamDecoder for AiocbArrayParam {
    fn decode(&self, ctx: &mut DecodeCtx<'_>) -> Option<ArgValue> {
        if ctx.at_entry && self.direction != Direction::In {
            return None;
        }
        if !ctx.at_entry && self.direction != Direction::Out {
            return None;
        }
        if ctx.raw == 0 {
            return None;
        }
        let Some(&count) = ctx.args.get(self.count_idx) else {
            return None;
        };
        // AIO_LISTIO_MAX is 16; allow headroom
        if count == 0 || count > 64 {
            return None;
        }

        let data = mem::read_exact(ctx.mem, ctx.raw, count as usize * 8)?;
        let items: Vec<StructItem> = data
            .chunks_exact(8)
            .map(|chunk| {
                let ptr = mem::u64_at(chunk, 0);
                let summary = if ptr == 0 {
                    "NULL".to_string()
                } else {
                    summarize_aiocb(ctx.mem, ptr).unwrap_or_else(|| "?".to_string())
                };
                StructItem::Pre(summary)
            })
            .collect();
        Some(ArgValue::StructArray(items))
    }
}

/// Signal event notification kinds.
const SIGEV_NOTIFY: symbols::ConstMap = &[
    (0, "SIGEV_NONE"),
    (1, "SIGEV_SIGNAL"),
    (3, "SIGEV_THREAD"),
];

/// struct sigevent, 40 bytes.
fn sigevent_fields(
    data: &[u8],
    _mem: &dyn Memory,
    no_abbrev: bool,
) -> Option<Vec<(String, FieldValue)>> {
    let notify = mem::i32_at(data, 0);
    let notify_str = if no_abbrev {
        notify.to_string()
    } else {
        symbols::lookup(SIGEV_NOTIFY, notify as i64)
            .map(str::to_string)
            .unwrap_or_else(|| notify.to_string())
    };
    Some(vec![
        ("sigev_notify".into(), FieldValue::Str(notify_str)),
        ("sigev_signo".into(), FieldValue::Int(mem::i32_at(data, 4) as i64)),
        (
            "sigev_value_ptr".into(),
            FieldValue::Str(super::format_ptr(mem::u64_at(data, 16))),
        ),
    ])
}

pub fn sigevent(direction: Direction) -> BoxedParam {
    StructParam::boxed(40, direction, sigevent_fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::script::FakeMemory;
    use crate::syscalls::params::Scratch;
    use crate::syscalls::structs::testutil::entry_ctx;

    #[test]
    fn aiocb_array_summaries() {
        let mut fake = FakeMemory::new();
        let mut cb = vec![0u8; AIOCB_SIZE];
        cb[0..4].copy_from_slice(&5i32.to_le_bytes()); // fd
        cb[24..32].copy_from_slice(&512u64.to_le_bytes()); // nbytes
        cb[100..104].copy_from_slice(&1i32.to_le_bytes()); // LIO_READ
        fake.put(0x2000, &cb);
        fake.put_u64(0x1000, 0x2000);
        fake.put_u64(0x1008, 0);
        let mut scratch = Scratch::default();
        let args = [0x1000u64, 2, 0];

        let decoded = aiocb_array(1, Direction::In)
            .decode(&mut entry_ctx(&fake, 0x1000, &args, &mut scratch))
            .unwrap();
        assert_eq!(
            decoded,
            ArgValue::StructArray(vec![
                StructItem::Pre("{fd=5, nbytes=512, op=LIO_READ}".into()),
                StructItem::Pre("NULL".into()),
            ])
        );
    }

    #[test]
    fn sembuf_flags() {
        let mut fake = FakeMemory::new();
        let mut data = vec![0u8; 6];
        data[0..2].copy_from_slice(&0u16.to_le_bytes());
        data[2..4].copy_from_slice(&(-1i16).to_le_bytes());
        data[4..6].copy_from_slice(&0o10000i16.to_le_bytes()); // SEM_UNDO
        fake.put(0x3000, &data);
        let mut scratch = Scratch::default();
        let args = [1u64, 0x3000, 1];

        let decoded = sembuf(Direction::In)
            .decode(&mut entry_ctx(&fake, 0x3000, &args, &mut scratch))
            .unwrap();
        assert_eq!(
            decoded,
            ArgValue::Struct(vec![
                ("sem_num".into(), FieldValue::Uint(0)),
                ("sem_op".into(), FieldValue::Int(-1)),
                ("sem_flg".into(), FieldValue::Str("SEM_UNDO".into())),
            ])
        );
    }
}
