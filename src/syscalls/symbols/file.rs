// File-related constants for macOS/Darwin

use super::{lookup, ConstMap, FlagMap};

/// Poll event flags.
pub const POLL_FLAGS: FlagMap = &[
    (0x0001, "POLLIN"),
    (0x0002, "POLLPRI"),
    (0x0004, "POLLOUT"),
    (0x0008, "POLLERR"),
    (0x0010, "POLLHUP"),
    (0x0020, "POLLNVAL"),
    (0x0040, "POLLRDNORM"),
    (0x0080, "POLLRDBAND"),
    (0x0100, "POLLWRBAND"),
    (0x0200, "POLLEXTEND"),
    (0x0400, "POLLATTRIB"),
    (0x0800, "POLLNLINK"),
    (0x1000, "POLLWRITE"),
];

/// File open flags (O_*). The low two bits are the access mode and are
/// decoded separately by `decode_open_flags`.
pub const O_FLAGS: FlagMap = &[
    (0x0000, "O_RDONLY"),
    (0x0001, "O_WRONLY"),
    (0x0002, "O_RDWR"),
    (0x0008, "O_APPEND"),
    (0x0200, "O_CREAT"),
    (0x0400, "O_TRUNC"),
    (0x0800, "O_EXCL"),
    (0x0004, "O_NONBLOCK"),
    (0x0040, "O_ASYNC"),
    (0x0080, "O_SYNC"),
    (0x0100, "O_NOFOLLOW"),
    (0x0010, "O_SHLOCK"),
    (0x0020, "O_EXLOCK"),
    (0x00008000, "O_EVTONLY"),
    (0x00020000, "O_NOCTTY"),
    (0x00100000, "O_DIRECTORY"),
    (0x00200000, "O_SYMLINK"),
    (0x00400000, "O_DSYNC"),
    (0x01000000, "O_CLOEXEC"),
    (0x20000000, "O_NOFOLLOW_ANY"),
    (0x40000000, "O_EXEC"),
];

pub const O_CREAT: u64 = 0x0200;

/// File type mask of `st_mode`.
pub const S_IFMT: u64 = 0o170000;

pub const S_FILE_TYPES: ConstMap = &[
    (0o010000, "S_IFIFO"),
    (0o020000, "S_IFCHR"),
    (0o060000, "S_IFBLK"),
    (0o040000, "S_IFDIR"),
    (0o100000, "S_IFREG"),
    (0o120000, "S_IFLNK"),
    (0o140000, "S_IFSOCK"),
];

pub const SEEK_CONSTANTS: ConstMap = &[
    (0, "SEEK_SET"),
    (1, "SEEK_CUR"),
    (2, "SEEK_END"),
    (3, "SEEK_HOLE"),
    (4, "SEEK_DATA"),
];

/// Sentinel dirfd meaning "relative to the current working directory".
pub const AT_FDCWD: i64 = -2;

pub const AT_FLAGS: FlagMap = &[
    (0x0010, "AT_EACCESS"),
    (0x0020, "AT_SYMLINK_NOFOLLOW"),
    (0x0040, "AT_SYMLINK_FOLLOW"),
    (0x0080, "AT_REMOVEDIR"),
];

pub const ACCESS_MODES: FlagMap = &[(1, "X_OK"), (2, "W_OK"), (4, "R_OK")];

pub const FCNTL_COMMANDS: ConstMap = &[
    (0, "F_DUPFD"),
    (67, "F_DUPFD_CLOEXEC"),
    (1, "F_GETFD"),
    (2, "F_SETFD"),
    (3, "F_GETFL"),
    (4, "F_SETFL"),
    (7, "F_GETLK"),
    (8, "F_SETLK"),
    (9, "F_SETLKW"),
    (42, "F_PREALLOCATE"),
    (44, "F_RDADVISE"),
    (45, "F_RDAHEAD"),
    (48, "F_NOCACHE"),
    (49, "F_LOG2PHYS"),
    (50, "F_GETPATH"),
    (51, "F_FULLFSYNC"),
    (53, "F_FREEZE_FS"),
    (54, "F_THAW_FS"),
    (55, "F_GLOBAL_NOCACHE"),
    (62, "F_NODIRECT"),
    (65, "F_LOG2PHYS_EXT"),
    (85, "F_BARRIERFSYNC"),
    (90, "F_OFD_SETLK"),
    (91, "F_OFD_SETLKW"),
    (92, "F_OFD_GETLK"),
    (99, "F_PUNCHHOLE"),
    (100, "F_TRIM_ACTIVE_FILE"),
    (101, "F_SPECULATIVE_READ"),
    (102, "F_GETPATH_NOFIRMLINK"),
    (110, "F_TRANSFEREXTENTS"),
];

// fcntl commands the engine needs by value
pub const F_DUPFD: i64 = 0;
pub const F_GETFD: i64 = 1;
pub const F_SETFD: i64 = 2;
pub const F_GETFL: i64 = 3;
pub const F_SETFL: i64 = 4;
pub const F_GETPATH: i64 = 50;
pub const F_FULLFSYNC: i64 = 51;
pub const F_DUPFD_CLOEXEC: i64 = 67;

pub const FD_FLAGS: FlagMap = &[(1, "FD_CLOEXEC")];

pub const FLOCK_OPS: ConstMap = &[
    (1, "LOCK_SH"),
    (2, "LOCK_EX"),
    (4, "LOCK_NB"),
    (8, "LOCK_UN"),
];

pub const MSYNC_FLAGS: FlagMap = &[
    (0x0001, "MS_ASYNC"),
    (0x0002, "MS_INVALIDATE"),
    (0x0010, "MS_SYNC"),
    (0x0004, "MS_KILLPAGES"),
    (0x0008, "MS_DEACTIVATE"),
];

pub const MOUNT_FLAGS: FlagMap = &[
    (0x00000010, "MNT_NODEV"),
    (0x00000020, "MNT_UNION"),
    (0x00000080, "MNT_CPROTECT"),
    (0x00000400, "MNT_QUARANTINE"),
    (0x00001000, "MNT_LOCAL"),
    (0x00002000, "MNT_QUOTA"),
    (0x00004000, "MNT_ROOTFS"),
    (0x00008000, "MNT_DOVOLFS"),
    (0x00100000, "MNT_DONTBROWSE"),
    (0x00200000, "MNT_IGNORE_OWNERSHIP"),
    (0x00400000, "MNT_AUTOMOUNTED"),
    (0x00800000, "MNT_JOURNALED"),
    (0x01000000, "MNT_NOUSERXATTR"),
    (0x02000000, "MNT_DEFWRITE"),
    (0x04000000, "MNT_MULTILABEL"),
    (0x10000000, "MNT_NOATIME"),
    (0x40000000, "MNT_SNAPSHOT"),
    (0x00020000, "MNT_NOBLOCK"),
];

pub const UNMOUNT_FLAGS: ConstMap = &[(1, "MNT_WAIT"), (2, "MNT_NOWAIT")];

pub const CHFLAGS_FLAGS: FlagMap = &[
    (0x00000001, "UF_NODUMP"),
    (0x00000002, "UF_IMMUTABLE"),
    (0x00000004, "UF_APPEND"),
    (0x00000008, "UF_OPAQUE"),
    (0x00000020, "UF_COMPRESSED"),
    (0x00000040, "UF_TRACKED"),
    (0x00008000, "UF_HIDDEN"),
    (0x00010000, "SF_ARCHIVED"),
    (0x00020000, "SF_IMMUTABLE"),
    (0x00040000, "SF_APPEND"),
];

pub const PATHCONF_NAMES: ConstMap = &[
    (1, "_PC_LINK_MAX"),
    (2, "_PC_MAX_CANON"),
    (3, "_PC_MAX_INPUT"),
    (4, "_PC_NAME_MAX"),
    (5, "_PC_PATH_MAX"),
    (6, "_PC_PIPE_BUF"),
    (7, "_PC_CHOWN_RESTRICTED"),
    (8, "_PC_NO_TRUNC"),
    (9, "_PC_VDISABLE"),
    (10, "_PC_NAME_CHARS_MAX"),
    (11, "_PC_CASE_SENSITIVE"),
    (12, "_PC_CASE_PRESERVING"),
    (13, "_PC_EXTENDED_SECURITY_NP"),
    (14, "_PC_AUTH_OPAQUE_NP"),
    (15, "_PC_2_SYMLINKS"),
    (16, "_PC_ALLOC_SIZE_MIN"),
    (17, "_PC_ASYNC_IO"),
    (18, "_PC_FILESIZEBITS"),
    (19, "_PC_PRIO_IO"),
    (20, "_PC_REC_INCR_XFER_SIZE"),
    (21, "_PC_REC_MAX_XFER_SIZE"),
    (22, "_PC_REC_MIN_XFER_SIZE"),
    (23, "_PC_REC_XFER_ALIGN"),
    (24, "_PC_SYMLINK_MAX"),
    (25, "_PC_SYNC_IO"),
    (26, "_PC_XATTR_SIZE_BITS"),
    (27, "_PC_MIN_HOLE_SIZE"),
];

pub const XATTR_FLAGS: FlagMap = &[
    (0x0001, "XATTR_NOFOLLOW"),
    (0x0002, "XATTR_CREATE"),
    (0x0004, "XATTR_REPLACE"),
    (0x0008, "XATTR_NOSECURITY"),
    (0x0010, "XATTR_NODEFAULT"),
    (0x0020, "XATTR_SHOWCOMPRESSION"),
];

pub const COPYFILE_FLAGS: FlagMap = &[
    (1 << 0, "COPYFILE_ACL"),
    (1 << 1, "COPYFILE_STAT"),
    (1 << 2, "COPYFILE_XATTR"),
    (1 << 3, "COPYFILE_DATA"),
    (1 << 15, "COPYFILE_RECURSIVE"),
    (1 << 16, "COPYFILE_CHECK"),
    (1 << 17, "COPYFILE_EXCL"),
    (1 << 18, "COPYFILE_NOFOLLOW_SRC"),
    (1 << 19, "COPYFILE_NOFOLLOW_DST"),
    (1 << 20, "COPYFILE_MOVE"),
    (1 << 21, "COPYFILE_UNLINK"),
    (1 << 22, "COPYFILE_PACK"),
    (1 << 23, "COPYFILE_UNPACK"),
    (1 << 24, "COPYFILE_CLONE"),
    (1 << 25, "COPYFILE_CLONE_FORCE"),
    (1 << 26, "COPYFILE_RUN_IN_PLACE"),
    (1 << 27, "COPYFILE_DATA_SPARSE"),
    (1 << 28, "COPYFILE_PRESERVE_DST_TRACKED"),
    (1 << 30, "COPYFILE_VERBOSE"),
];

pub const FSOPT_FLAGS: FlagMap = &[
    (0x1, "FSOPT_NOFOLLOW"),
    (0x4, "FSOPT_REPORT_FULLSIZE"),
    (0x8, "FSOPT_PACK_INVAL_ATTRS"),
    (0x20, "FSOPT_ATTR_CMN_EXTENDED"),
    (0x200, "FSOPT_RETURN_REALDEV"),
    (0x800, "FSOPT_NOFOLLOW_ANY"),
];

/// ioctl request values, by request family.
pub const IOCTL_COMMANDS: ConstMap = &[
    // Terminal I/O control (TIOC*)
    (0x40487413, "TIOCGETA"),
    (0x80487414, "TIOCSETA"),
    (0x80487415, "TIOCSETAW"),
    (0x80487416, "TIOCSETAF"),
    (0x40087468, "TIOCGWINSZ"),
    (0x80087467, "TIOCSWINSZ"),
    (0x40047477, "TIOCGPGRP"),
    (0x80047476, "TIOCSPGRP"),
    (0x20007471, "TIOCNOTTY"),
    (0x2000746f, "TIOCSTOP"),
    (0x2000746e, "TIOCSTART"),
    (0x2000745e, "TIOCDRAIN"),
    (0x80047410, "TIOCFLUSH"),
    (0x4004746a, "TIOCMGET"),
    (0x8004746d, "TIOCMSET"),
    (0x8004746c, "TIOCMBIS"),
    (0x8004746b, "TIOCMBIC"),
    (0x20007461, "TIOCSCTTY"),
    (0x2000740d, "TIOCEXCL"),
    (0x2000740e, "TIOCNXCL"),
    (0x40047473, "TIOCOUTQ"),
    (0x80017472, "TIOCSTI"),
    (0x80047470, "TIOCPKT"),
    (0x4004741a, "TIOCGETD"),
    (0x8004741b, "TIOCSETD"),
    (0x20007465, "TIOCSTAT"),
    (0x20007463, "TIOCSCONS"),
    (0x80047462, "TIOCCONS"),
    (0x2000745f, "TIOCSIG"),
    (0x20007479, "TIOCSDTR"),
    (0x20007478, "TIOCCDTR"),
    (0x20007481, "TIOCIXON"),
    (0x20007480, "TIOCIXOFF"),
    (0x80047469, "TIOCREMOTE"),
    (0x20007454, "TIOCPTYGRANT"),
    (0x40807453, "TIOCPTYGNAME"),
    (0x20007452, "TIOCPTYUNLK"),
    (0x40047403, "TIOCMODG"),
    (0x80047404, "TIOCMODS"),
    (0x80047466, "TIOCUCNTL"),
    (0x80047460, "TIOCEXT"),
    (0x8004745b, "TIOCMSDTRWAIT"),
    (0x4004745a, "TIOCMGDTRWAIT"),
    (0x80047457, "TIOCSDRAINWAIT"),
    (0x40047456, "TIOCGDRAINWAIT"),
    (0x20007455, "TIOCDSIMICROCODE"),
    // File I/O control (FIO*)
    (0x20006601, "FIOCLEX"),
    (0x20006602, "FIONCLEX"),
    (0x4004667f, "FIONREAD"),
    (0x8004667e, "FIONBIO"),
    (0x8004667d, "FIOASYNC"),
    (0x8004667c, "FIOSETOWN"),
    (0x4004667b, "FIOGETOWN"),
    (0x4004667a, "FIODTYPE"),
    // Socket I/O control (SIOC*)
    (0x80047300, "SIOCSHIWAT"),
    (0x40047301, "SIOCGHIWAT"),
    (0x80047302, "SIOCSLOWAT"),
    (0x40047303, "SIOCGLOWAT"),
    (0x40047307, "SIOCATMARK"),
    (0x80047308, "SIOCSPGRP"),
    (0x40047309, "SIOCGPGRP"),
    (0x8020690c, "SIOCSIFADDR"),
    (0xc020690c, "SIOCAIFADDR"),
    (0xc0206921, "SIOCGIFADDR"),
    (0xc00c6924, "SIOCGIFCONF"),
    (0x80206910, "SIOCSIFFLAGS"),
    (0xc0206911, "SIOCGIFFLAGS"),
    (0xc0206933, "SIOCGIFMTU"),
    (0x80206934, "SIOCSIFMTU"),
    (0x80206931, "SIOCADDMULTI"),
    (0x80206932, "SIOCDELMULTI"),
    (0xc0206922, "SIOCGIFDSTADDR"),
    (0x80206923, "SIOCGIFBRDADDR"),
    (0xc0206925, "SIOCGIFNETMASK"),
    (0x8020691a, "SIOCSIFDSTADDR"),
    (0x80206916, "SIOCSIFNETMASK"),
    (0x80206919, "SIOCDIFADDR"),
    // BPF device control (BIOC*)
    (0x40044272, "BIOCGRSIG"),
    (0x80044273, "BIOCSRSIG"),
    (0x80044278, "BIOCSDLT"),
    (0x40044276, "BIOCGSEESENT"),
    (0x80044277, "BIOCSSEESENT"),
    (0xc00c4279, "BIOCGDLTLIST"),
    // System kernel control (CTL*)
    (0xc0644e03, "CTLIOCGINFO"),
];

// ioctl requests the catalog dispatches the third argument on
pub const FIONREAD: i64 = 0x4004667f;
pub const FIONBIO: i64 = 0x8004667e;
pub const FIOASYNC: i64 = 0x8004667d;
pub const TIOCGWINSZ: i64 = 0x40087468;
pub const TIOCSWINSZ: i64 = 0x80087467;
pub const TIOCGETA: i64 = 0x40487413;
pub const TIOCSETA: i64 = 0x80487414;
pub const TIOCSETAW: i64 = 0x80487415;
pub const TIOCSETAF: i64 = 0x80487416;
pub const TIOCGPGRP: i64 = 0x40047477;
pub const TIOCSPGRP: i64 = 0x80047476;
pub const TIOCOUTQ: i64 = 0x40047473;

/// Decode open(2)-style flags: access mode bits first, then the OR of the
/// remaining single-bit flags.
pub fn decode_open_flags(value: i64) -> String {
    if value == 0 {
        return "O_RDONLY".to_string();
    }
    let value = value as u64;
    let mut flags: Vec<&str> = Vec::new();

    let access = value & 0x3;
    if let Some((_, name)) = O_FLAGS.iter().find(|(v, _)| *v == access) {
        flags.push(name);
    }

    let remaining = value & !0x3;
    for &(bits, name) in O_FLAGS {
        if bits <= 0x3 {
            continue;
        }
        if remaining & bits != 0 {
            flags.push(name);
        }
    }

    if flags.is_empty() {
        format!("0x{:x}", value)
    } else {
        flags.join("|")
    }
}

/// Decode a permission-only mode as octal with a leading zero.
pub fn decode_file_mode(value: i64) -> String {
    format!("0{:o}", value)
}

/// Decode a full `st_mode`: file type constant plus octal permissions.
pub fn decode_file_type_mode(value: i64) -> String {
    let file_type = value as u64 & S_IFMT;
    let type_str = lookup(S_FILE_TYPES, file_type as i64)
        .map(str::to_string)
        .unwrap_or_else(|| format!("0{:o}", file_type));
    let perms = value as u64 & 0o7777;
    format!("{}|0{:o}", type_str, perms)
}

/// Decode access(2) mode: `F_OK` for zero, else OR of R/W/X_OK.
pub fn decode_access_mode(value: i64) -> String {
    if value == 0 {
        return "F_OK".to_string();
    }
    let mut modes: Vec<&str> = Vec::new();
    for &(bits, name) in ACCESS_MODES {
        if value as u64 & bits != 0 {
            modes.push(name);
        }
    }
    if modes.is_empty() {
        value.to_string()
    } else {
        modes.join("|")
    }
}

/// Decode flock(2) operation: base op plus optional LOCK_NB.
pub fn decode_flock_op(value: i64) -> String {
    let mut flags: Vec<&str> = Vec::new();
    let base = value & !4;
    if let Some(name) = lookup(FLOCK_OPS, base) {
        flags.push(name);
    }
    if value & 4 != 0 {
        flags.push("LOCK_NB");
    }
    if flags.is_empty() {
        value.to_string()
    } else {
        flags.join("|")
    }
}

/// Decode an ioctl request value; unknown requests render as hex.
pub fn decode_ioctl_cmd(value: i64) -> String {
    let unsigned = value as u64 & 0xffff_ffff;
    lookup(IOCTL_COMMANDS, unsigned as i64)
        .map(str::to_string)
        .unwrap_or_else(|| format!("0x{:x}", unsigned))
}

/// Decode a dirfd, showing the AT_FDCWD sentinel symbolically.
pub fn decode_dirfd(value: i64) -> String {
    if value == AT_FDCWD {
        "AT_FDCWD".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_flags_access_mode_first() {
        assert_eq!(decode_open_flags(0), "O_RDONLY");
        assert_eq!(decode_open_flags(0x1), "O_WRONLY");
        assert_eq!(decode_open_flags(0x2), "O_RDWR");
        assert_eq!(decode_open_flags(0x601), "O_WRONLY|O_CREAT|O_TRUNC");
        assert_eq!(decode_open_flags(0x1000601), "O_WRONLY|O_CREAT|O_TRUNC|O_CLOEXEC");
    }

    #[test]
    fn mode_decoding() {
        assert_eq!(decode_file_mode(0o644), "0644");
        assert_eq!(decode_file_type_mode(0o100644), "S_IFREG|0644");
        assert_eq!(decode_file_type_mode(0o040755), "S_IFDIR|0755");
    }

    #[test]
    fn access_and_flock() {
        assert_eq!(decode_access_mode(0), "F_OK");
        assert_eq!(decode_access_mode(6), "W_OK|R_OK");
        assert_eq!(decode_flock_op(2), "LOCK_EX");
        assert_eq!(decode_flock_op(6), "LOCK_EX|LOCK_NB");
        assert_eq!(decode_flock_op(8), "LOCK_UN");
    }

    #[test]
    fn ioctl_lookup() {
        assert_eq!(decode_ioctl_cmd(0x4004667f), "FIONREAD");
        assert_eq!(decode_ioctl_cmd(0x40087468), "TIOCGWINSZ");
        assert_eq!(decode_ioctl_cmd(0x12345678), "0x12345678");
    }

    #[test]
    fn dirfd_sentinel() {
        assert_eq!(decode_dirfd(-2), "AT_FDCWD");
        assert_eq!(decode_dirfd(5), "5");
    }
}
