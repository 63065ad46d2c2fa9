// Memory management constants for macOS/Darwin

use super::{ConstMap, FlagMap};

/// mmap/mprotect protection flags. PROT_NONE is the zero entry.
pub const PROT_FLAGS: FlagMap = &[
    (0, "PROT_NONE"),
    (1, "PROT_READ"),
    (2, "PROT_WRITE"),
    (4, "PROT_EXEC"),
];

/// mmap flags.
pub const MAP_FLAGS: FlagMap = &[
    (0x0001, "MAP_SHARED"),
    (0x0002, "MAP_PRIVATE"),
    (0x0010, "MAP_FIXED"),
    (0x1000, "MAP_ANON"),
    (0x0020, "MAP_RENAME"),
    (0x0040, "MAP_NORESERVE"),
    (0x0100, "MAP_NOEXTEND"),
    (0x0200, "MAP_HASSEMAPHORE"),
    (0x0400, "MAP_NOCACHE"),
    (0x0800, "MAP_JIT"),
    (0x2000, "MAP_RESILIENT_CODESIGN"),
    (0x4000, "MAP_RESILIENT_MEDIA"),
    (0x8000, "MAP_32BIT"),
];

/// madvise advice values.
pub const MADV_CONSTANTS: ConstMap = &[
    (0, "MADV_NORMAL"),
    (1, "MADV_RANDOM"),
    (2, "MADV_SEQUENTIAL"),
    (3, "MADV_WILLNEED"),
    (4, "MADV_DONTNEED"),
    (5, "MADV_FREE"),
    (6, "MADV_ZERO_WIRED_PAGES"),
    (7, "MADV_FREE_REUSABLE"),
    (8, "MADV_FREE_REUSE"),
    (9, "MADV_CAN_REUSE"),
    (10, "MADV_PAGEOUT"),
    (11, "MADV_ZERO"),
];

/// minherit inheritance values.
pub const VM_INHERIT_CONSTANTS: ConstMap = &[
    (0, "VM_INHERIT_SHARE"),
    (1, "VM_INHERIT_COPY"),
    (2, "VM_INHERIT_NONE"),
    (3, "VM_INHERIT_DONATE_COPY"),
];

/// mlockall flags.
pub const MCL_FLAGS: FlagMap = &[(0x0001, "MCL_CURRENT"), (0x0002, "MCL_FUTURE")];
