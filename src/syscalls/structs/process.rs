// Process resource structures: rlimit, rusage

use crate::debug::Memory;
use crate::syscalls::args::FieldValue;
use crate::syscalls::mem;
use crate::syscalls::params::{BoxedParam, Direction};

use super::StructParam;

/// RLIM_INFINITY: (1 << 63) - 1.
const RLIM_INFINITY: u64 = 0x7fff_ffff_ffff_ffff;

fn rlim(value: u64) -> String {
    if value == RLIM_INFINITY {
        "RLIM_INFINITY".to_string()
    } else {
        value.to_string()
    }
}

fn rlimit_fields(
    data: &[u8],
    _mem: &dyn Memory,
    _no_abbrev: bool,
) -> Option<Vec<(String, FieldValue)>> {
    Some(vec![
        ("rlim_cur".into(), FieldValue::Str(rlim(mem::u64_at(data, 0)))),
        ("rlim_max".into(), FieldValue::Str(rlim(mem::u64_at(data, 8)))),
    ])
}

pub fn rlimit(direction: Direction) -> BoxedParam {
    StructParam::boxed(16, direction, rlimit_fields)
}

/// struct rusage: two timevals then 14 long counters, 144 bytes.
const RUSAGE_SIZE: usize = 144;

fn rusage_fields(
    data: &[u8],
    _mem: &dyn Memory,
    _no_abbrev: bool,
) -> Option<Vec<(String, FieldValue)>> {
    let counters = [
        "ru_maxrss",
        "ru_ixrss",
        "ru_idrss",
        "ru_isrss",
        "ru_minflt",
        "ru_majflt",
        "ru_nswap",
        "ru_inblock",
        "ru_oublock",
        "ru_msgsnd",
        "ru_msgrcv",
        "ru_nsignals",
        "ru_nvcsw",
        "ru_nivcsw",
    ];

    let mut fields = vec![
        (
            "ru_utime_sec".into(),
            FieldValue::Str(format!("{}s", mem::i64_at(data, 0))),
        ),
        (
            "ru_utime_usec".into(),
            FieldValue::Str(format!("{}µs", mem::i32_at(data, 8))),
        ),
        (
            "ru_stime_sec".into(),
            FieldValue::Str(format!("{}s", mem::i64_at(data, 16))),
        ),
        (
            "ru_stime_usec".into(),
            FieldValue::Str(format!("{}µs", mem::i32_at(data, 24))),
        ),
    ];
    for (i, name) in counters.iter().enumerate() {
        fields.push(((*name).into(), FieldValue::Int(mem::i64_at(data, 32 + i * 8))));
    }
    Some(fields)
}

pub fn rusage(direction: Direction) -> BoxedParam {
    StructParam::boxed(RUSAGE_SIZE, direction, rusage_fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::script::FakeMemory;
    use crate::syscalls::args::ArgValue;
    use crate::syscalls::params::{ParamDecoder, Scratch};
    use crate::syscalls::structs::testutil::exit_ctx;

    #[test]
    fn rlimit_infinity() {
        let mut fake = FakeMemory::new();
        let mut data = vec![0u8; 16];
        data[0..8].copy_from_slice(&256u64.to_le_bytes());
        data[8..16].copy_from_slice(&RLIM_INFINITY.to_le_bytes());
        fake.put(0x1000, &data);
        let mut scratch = Scratch::default();
        let args = [8u64, 0x1000];

        let decoded = rlimit(Direction::Out)
            .decode(&mut exit_ctx(&fake, 0x1000, &args, &mut scratch))
            .unwrap();
        assert_eq!(
            decoded,
            ArgValue::Struct(vec![
                ("rlim_cur".into(), FieldValue::Str("256".into())),
                ("rlim_max".into(), FieldValue::Str("RLIM_INFINITY".into())),
            ])
        );
    }

    #[test]
    fn rusage_times_formatted() {
        let mut fake = FakeMemory::new();
        let mut data = vec![0u8; RUSAGE_SIZE];
        data[0..8].copy_from_slice(&2i64.to_le_bytes()); // utime sec
        data[8..12].copy_from_slice(&500i32.to_le_bytes()); // utime usec
        data[32..40].copy_from_slice(&4096i64.to_le_bytes()); // maxrss
        fake.put(0x2000, &data);
        let mut scratch = Scratch::default();
        let args = [0u64, 0x2000];

        let decoded = rusage(Direction::Out)
            .decode(&mut exit_ctx(&fake, 0x2000, &args, &mut scratch))
            .unwrap();
        let ArgValue::Struct(fields) = decoded else {
            panic!("expected struct")
        };
        assert!(fields
            .iter()
            .any(|(n, v)| n == "ru_utime_sec" && *v == FieldValue::Str("2s".into())));
        assert!(fields
            .iter()
            .any(|(n, v)| n == "ru_utime_usec" && *v == FieldValue::Str("500µs".into())));
        assert!(fields
            .iter()
            .any(|(n, v)| n == "ru_maxrss" && *v == FieldValue::Int(4096)));
    }
}
