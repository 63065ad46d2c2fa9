// ptrace constants for macOS/Darwin

use super::ConstMap;

/// Ptrace requests (PT_*).
pub const PTRACE_REQUESTS: ConstMap = &[
    (0, "PT_TRACE_ME"),
    (1, "PT_READ_I"),
    (2, "PT_READ_D"),
    (3, "PT_READ_U"),
    (4, "PT_WRITE_I"),
    (5, "PT_WRITE_D"),
    (6, "PT_WRITE_U"),
    (7, "PT_CONTINUE"),
    (8, "PT_KILL"),
    (9, "PT_STEP"),
    (10, "PT_ATTACH"),
    (11, "PT_DETACH"),
    (12, "PT_SIGEXC"),
    (13, "PT_THUPDATE"),
    (14, "PT_ATTACHEXC"),
    (30, "PT_FORCEQUOTA"),
    (31, "PT_DENY_ATTACH"),
    (32, "PT_FIRSTMACH"),
];
