// Symbolic constant tables and decoders
// Pure data: flag maps OR-combine, constant maps are exact lookups.

pub mod file;
pub mod ipc;
pub mod kqueue;
pub mod memory;
pub mod network;
pub mod process;
pub mod ptrace;
pub mod signal;
pub mod sysctl;
pub mod time;

/// Bitmask table: each entry is one flag bit (or bit pattern).
pub type FlagMap = &'static [(u64, &'static str)];

/// Value table: exact value-to-name lookup.
pub type ConstMap = &'static [(i64, &'static str)];

/// Decompose `value` into `|`-joined names from a flag map.
///
/// Returns the zero entry (or `"0"`) for zero input. Returns None when any
/// set bit has no name in the map, so callers fall back to hex instead of
/// silently dropping bits.
pub fn decode_flags(map: FlagMap, value: u64) -> Option<String> {
    if value == 0 {
        let zero = map
            .iter()
            .find(|(v, _)| *v == 0)
            .map(|(_, name)| (*name).to_string());
        return Some(zero.unwrap_or_else(|| "0".to_string()));
    }

    let mut names: Vec<&str> = Vec::new();
    let mut covered = 0u64;
    for &(bits, name) in map {
        if bits != 0 && value & bits == bits {
            names.push(name);
            covered |= bits;
        }
    }

    if covered == value && !names.is_empty() {
        Some(names.join("|"))
    } else {
        None
    }
}

/// Exact lookup in a constant map.
pub fn lookup(map: ConstMap, value: i64) -> Option<&'static str> {
    map.iter().find(|(v, _)| *v == value).map(|(_, name)| *name)
}

/// macOS errno values with their descriptions.
pub const ERRNO: &[(i64, &str, &str)] = &[
    (1, "EPERM", "Operation not permitted"),
    (2, "ENOENT", "No such file or directory"),
    (3, "ESRCH", "No such process"),
    (4, "EINTR", "Interrupted system call"),
    (5, "EIO", "Input/output error"),
    (6, "ENXIO", "Device not configured"),
    (7, "E2BIG", "Argument list too long"),
    (8, "ENOEXEC", "Exec format error"),
    (9, "EBADF", "Bad file descriptor"),
    (10, "ECHILD", "No child processes"),
    (11, "EDEADLK", "Resource deadlock avoided"),
    (12, "ENOMEM", "Cannot allocate memory"),
    (13, "EACCES", "Permission denied"),
    (14, "EFAULT", "Bad address"),
    (15, "ENOTBLK", "Block device required"),
    (16, "EBUSY", "Resource busy"),
    (17, "EEXIST", "File exists"),
    (18, "EXDEV", "Cross-device link"),
    (19, "ENODEV", "Operation not supported by device"),
    (20, "ENOTDIR", "Not a directory"),
    (21, "EISDIR", "Is a directory"),
    (22, "EINVAL", "Invalid argument"),
    (23, "ENFILE", "Too many open files in system"),
    (24, "EMFILE", "Too many open files"),
    (25, "ENOTTY", "Inappropriate ioctl for device"),
    (26, "ETXTBSY", "Text file busy"),
    (27, "EFBIG", "File too large"),
    (28, "ENOSPC", "No space left on device"),
    (29, "ESPIPE", "Illegal seek"),
    (30, "EROFS", "Read-only file system"),
    (31, "EMLINK", "Too many links"),
    (32, "EPIPE", "Broken pipe"),
    (33, "EDOM", "Numerical argument out of domain"),
    (34, "ERANGE", "Result too large"),
    (35, "EAGAIN", "Resource temporarily unavailable"),
    (36, "EINPROGRESS", "Operation now in progress"),
    (37, "EALREADY", "Operation already in progress"),
    (38, "ENOTSOCK", "Socket operation on non-socket"),
    (39, "EDESTADDRREQ", "Destination address required"),
    (40, "EMSGSIZE", "Message too long"),
    (41, "EPROTOTYPE", "Protocol wrong type for socket"),
    (42, "ENOPROTOOPT", "Protocol not available"),
    (43, "EPROTONOSUPPORT", "Protocol not supported"),
    (44, "ESOCKTNOSUPPORT", "Socket type not supported"),
    (45, "ENOTSUP", "Operation not supported"),
    (46, "EPFNOSUPPORT", "Protocol family not supported"),
    (47, "EAFNOSUPPORT", "Address family not supported by protocol family"),
    (48, "EADDRINUSE", "Address already in use"),
    (49, "EADDRNOTAVAIL", "Can't assign requested address"),
    (50, "ENETDOWN", "Network is down"),
    (51, "ENETUNREACH", "Network is unreachable"),
    (52, "ENETRESET", "Network dropped connection on reset"),
    (53, "ECONNABORTED", "Software caused connection abort"),
    (54, "ECONNRESET", "Connection reset by peer"),
    (55, "ENOBUFS", "No buffer space available"),
    (56, "EISCONN", "Socket is already connected"),
    (57, "ENOTCONN", "Socket is not connected"),
    (58, "ESHUTDOWN", "Can't send after socket shutdown"),
    (59, "ETOOMANYREFS", "Too many references: can't splice"),
    (60, "ETIMEDOUT", "Operation timed out"),
    (61, "ECONNREFUSED", "Connection refused"),
    (62, "ELOOP", "Too many levels of symbolic links"),
    (63, "ENAMETOOLONG", "File name too long"),
    (64, "EHOSTDOWN", "Host is down"),
    (65, "EHOSTUNREACH", "No route to host"),
    (66, "ENOTEMPTY", "Directory not empty"),
    (67, "EPROCLIM", "Too many processes"),
    (68, "EUSERS", "Too many users"),
    (69, "EDQUOT", "Disc quota exceeded"),
    (70, "ESTALE", "Stale NFS file handle"),
    (71, "EREMOTE", "Too many levels of remote in path"),
    (72, "EBADRPC", "RPC struct is bad"),
    (73, "ERPCMISMATCH", "RPC version wrong"),
    (74, "EPROGUNAVAIL", "RPC prog. not avail"),
    (75, "EPROGMISMATCH", "Program version wrong"),
    (76, "EPROCUNAVAIL", "Bad procedure for program"),
    (77, "ENOLCK", "No locks available"),
    (78, "ENOSYS", "Function not implemented"),
    (79, "EFTYPE", "Inappropriate file type or format"),
    (80, "EAUTH", "Authentication error"),
    (81, "ENEEDAUTH", "Need authenticator"),
    (82, "EPWROFF", "Device power is off"),
    (83, "EDEVERR", "Device error"),
    (84, "EOVERFLOW", "Value too large to be stored in data type"),
    (85, "EBADEXEC", "Bad executable (or shared library)"),
    (86, "EBADARCH", "Bad CPU type in executable"),
    (87, "ESHLIBVERS", "Shared library version mismatch"),
    (88, "EBADMACHO", "Malformed Mach-o file"),
    (89, "ECANCELED", "Operation canceled"),
    (90, "EIDRM", "Identifier removed"),
    (91, "ENOMSG", "No message of desired type"),
    (92, "EILSEQ", "Illegal byte sequence"),
    (93, "ENOATTR", "Attribute not found"),
    (94, "EBADMSG", "Bad message"),
    (95, "EMULTIHOP", "Reserved"),
    (96, "ENODATA", "No message available on STREAM"),
    (97, "ENOLINK", "Reserved"),
    (98, "ENOSR", "No STREAM resources"),
    (99, "ENOSTR", "Not a STREAM"),
    (100, "EPROTO", "Protocol error"),
    (101, "ETIME", "STREAM ioctl timeout"),
    (102, "EOPNOTSUPP", "Operation not supported on socket"),
    (103, "ENOPOLICY", "Policy not found"),
    (104, "ENOTRECOVERABLE", "State not recoverable"),
    (105, "EOWNERDEAD", "Previous owner died"),
    (106, "EQFULL", "Interface output queue is full"),
];

/// Render a negative syscall return as strace does: `-1 ENOENT (No such
/// file or directory)`. Unknown errno values stay numeric.
pub fn decode_errno(ret: i64) -> String {
    let errno = -ret;
    match ERRNO.iter().find(|(v, _, _)| *v == errno) {
        Some((_, name, desc)) => format!("-1 {} ({})", name, desc),
        None => ret.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_FLAGS: FlagMap = &[(0x1, "A"), (0x2, "B"), (0x8, "D")];

    #[test]
    fn flags_or_combine() {
        assert_eq!(decode_flags(TEST_FLAGS, 0x3).as_deref(), Some("A|B"));
        assert_eq!(decode_flags(TEST_FLAGS, 0x8).as_deref(), Some("D"));
    }

    #[test]
    fn flags_zero_policy() {
        assert_eq!(decode_flags(TEST_FLAGS, 0).as_deref(), Some("0"));
        const WITH_ZERO: FlagMap = &[(0, "NONE"), (0x1, "A")];
        assert_eq!(decode_flags(WITH_ZERO, 0).as_deref(), Some("NONE"));
    }

    #[test]
    fn flags_reject_unknown_bits() {
        // 0x4 has no name: the whole value must fall back to hex
        assert_eq!(decode_flags(TEST_FLAGS, 0x5), None);
        assert_eq!(decode_flags(TEST_FLAGS, 0x100), None);
    }

    #[test]
    fn errno_round_trip() {
        assert_eq!(decode_errno(-2), "-1 ENOENT (No such file or directory)");
        assert_eq!(decode_errno(-35), "-1 EAGAIN (Resource temporarily unavailable)");
        // Unknown errno stays numeric
        assert_eq!(decode_errno(-9999), "-9999");
    }
}
