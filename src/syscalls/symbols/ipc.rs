// IPC constants for macOS/Darwin

use super::{ConstMap, FlagMap};

/// IPC flags for semget/msgget/shmget.
pub const IPC_FLAGS: FlagMap = &[
    (0x200, "IPC_CREAT"),
    (0x400, "IPC_EXCL"),
    (0x800, "IPC_NOWAIT"),
    (0x100, "IPC_R"),
    (0x80, "IPC_W"),
    (0x1000, "IPC_M"),
];

/// IPC commands for semctl/msgctl/shmctl.
pub const IPC_COMMANDS: ConstMap = &[(0, "IPC_RMID"), (1, "IPC_SET"), (2, "IPC_STAT")];

/// semctl-specific commands (the IPC_* set plus the GETALL/SETALL family).
pub const SEMCTL_COMMANDS: ConstMap = &[
    (0, "IPC_RMID"),
    (1, "IPC_SET"),
    (2, "IPC_STAT"),
    (3, "GETNCNT"),
    (4, "GETPID"),
    (5, "GETVAL"),
    (6, "GETALL"),
    (7, "GETZCNT"),
    (8, "SETVAL"),
    (9, "SETALL"),
];

/// semop flags.
pub const SEMOP_FLAGS: FlagMap = &[(0o10000, "SEM_UNDO"), (0x800, "IPC_NOWAIT")];

/// msgrcv/msgsnd flags.
pub const MSGRCV_FLAGS: FlagMap = &[(0x800, "IPC_NOWAIT"), (0x1000, "MSG_NOERROR")];

/// shmat flags.
pub const SHM_FLAGS: FlagMap = &[(0x1000, "SHM_RDONLY"), (0x2000, "SHM_RND")];

/// lio_listio modes.
pub const LIO_MODES: ConstMap = &[(1, "LIO_NOWAIT"), (2, "LIO_WAIT")];

/// aiocb lio opcodes.
pub const LIO_OPCODES: ConstMap = &[(0, "LIO_NOP"), (1, "LIO_READ"), (2, "LIO_WRITE")];

/// Decode the flags argument of the System V get-calls: IPC_* bits plus the
/// low permission bits shown as octal.
pub fn decode_ipc_flags(value: i64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let value = value as u64;
    let mut flags: Vec<String> = Vec::new();
    let mut remaining = value;
    for &(bits, name) in IPC_FLAGS {
        if value & bits != 0 {
            flags.push(name.to_string());
            remaining &= !bits;
        }
    }
    if remaining & 0o777 != 0 {
        flags.push(format!("0{:o}", remaining & 0o777));
    }
    if flags.is_empty() {
        format!("0x{:x}", value)
    } else {
        flags.join("|")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipc_flags_with_mode() {
        assert_eq!(decode_ipc_flags(0), "0");
        assert_eq!(decode_ipc_flags(0o1000 | 0o644), "IPC_CREAT|0644");
        assert_eq!(decode_ipc_flags(0x200 | 0x400), "IPC_CREAT|IPC_EXCL");
    }
}
