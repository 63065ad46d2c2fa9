// Process management constants for macOS/Darwin

use super::{ConstMap, FlagMap};

/// wait4/waitpid options.
pub const WAIT_OPTIONS: FlagMap = &[
    (0x00000001, "WNOHANG"),
    (0x00000002, "WUNTRACED"),
    (0x00000010, "WCONTINUED"),
];

/// waitid idtype values.
pub const IDTYPE_CONSTANTS: ConstMap = &[(0, "P_ALL"), (1, "P_PID"), (2, "P_PGID")];

/// waitid options.
pub const WAITID_OPTIONS: FlagMap = &[
    (0x00000004, "WEXITED"),
    (0x00000008, "WSTOPPED"),
    (0x00000010, "WCONTINUED"),
    (0x00000020, "WNOWAIT"),
];

/// getpriority/setpriority which values.
pub const PRIO_WHICH: ConstMap = &[
    (0, "PRIO_PROCESS"),
    (1, "PRIO_PGRP"),
    (2, "PRIO_USER"),
    (3, "PRIO_DARWIN_THREAD"),
    (4, "PRIO_DARWIN_PROCESS"),
    (0x1000, "PRIO_DARWIN_BG"),
    (0x1001, "PRIO_DARWIN_NONUI"),
];

/// getrusage who values.
pub const RUSAGE_WHO: ConstMap = &[(-1, "RUSAGE_CHILDREN"), (0, "RUSAGE_SELF")];

/// getrlimit/setrlimit resources.
pub const RLIMIT_RESOURCES: ConstMap = &[
    (0, "RLIMIT_CPU"),
    (1, "RLIMIT_FSIZE"),
    (2, "RLIMIT_DATA"),
    (3, "RLIMIT_STACK"),
    (4, "RLIMIT_CORE"),
    (5, "RLIMIT_AS"),
    (6, "RLIMIT_MEMLOCK"),
    (7, "RLIMIT_NPROC"),
    (8, "RLIMIT_NOFILE"),
];

/// sigprocmask how values.
pub const SIG_HOW: ConstMap = &[(1, "SIG_BLOCK"), (2, "SIG_UNBLOCK"), (3, "SIG_SETMASK")];
