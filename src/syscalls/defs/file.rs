// File I/O syscall definitions

use crate::syscalls::category::Category;
use crate::syscalls::params::{self as p, Direction::In, Direction::Out};
use crate::syscalls::structs::{attrlist, stat, termios, winsize};
use crate::syscalls::symbols::file::{
    decode_access_mode, decode_flock_op, decode_ioctl_cmd, decode_open_flags, AT_FLAGS,
    CHFLAGS_FLAGS, COPYFILE_FLAGS, FCNTL_COMMANDS, FD_FLAGS, FIOASYNC, FIONBIO, FIONREAD,
    FSOPT_FLAGS, F_DUPFD, F_DUPFD_CLOEXEC, F_FULLFSYNC, F_GETFD, F_GETFL, F_GETPATH, F_SETFD,
    F_SETFL, MOUNT_FLAGS, O_CREAT, PATHCONF_NAMES, SEEK_CONSTANTS, TIOCGETA, TIOCGPGRP, TIOCGWINSZ,
    TIOCOUTQ, TIOCSETA, TIOCSETAF, TIOCSETAW, TIOCSPGRP, TIOCSWINSZ, UNMOUNT_FLAGS, XATTR_FLAGS,
};

use super::SyscallDef;

fn def(number: i32, name: &'static str, params: Vec<p::BoxedParam>) -> SyscallDef {
    SyscallDef::new(number, name, params, Category::File)
}

/// Third argument of fcntl, selected by the command.
fn fcntl_arg() -> p::BoxedParam {
    p::variant(1)
        .case(F_SETFD, p::flags(FD_FLAGS))
        .case(F_SETFL, p::custom(decode_open_flags))
        .case(F_DUPFD, p::int())
        .case(F_DUPFD_CLOEXEC, p::int())
        .case(F_GETPATH, p::pointer())
        .skip_for(&[F_GETFD, F_GETFL, F_FULLFSYNC])
        .default(p::int())
        .build()
}

/// Third argument of ioctl, selected by the request.
fn ioctl_arg() -> p::BoxedParam {
    p::variant(1)
        .case(FIONREAD, p::int_ptr(Out))
        .case(FIONBIO, p::int_ptr(In))
        .case(FIOASYNC, p::int_ptr(In))
        .case(TIOCGWINSZ, winsize::winsize(Out))
        .case(TIOCSWINSZ, winsize::winsize(In))
        .case(TIOCGETA, termios::termios(Out))
        .case(TIOCSETA, termios::termios(In))
        .case(TIOCSETAW, termios::termios(In))
        .case(TIOCSETAF, termios::termios(In))
        .case(TIOCGPGRP, p::int_ptr(Out))
        .case(TIOCSPGRP, p::int_ptr(In))
        .case(TIOCOUTQ, p::int_ptr(Out))
        .default(p::pointer())
        .build()
}

/// open(2)-family mode argument: present only with O_CREAT.
fn open_mode(flags_idx: usize) -> p::BoxedParam {
    p::variant(flags_idx)
        .skip_when_not_set(O_CREAT)
        .default(p::octal())
        .build()
}

pub fn syscalls() -> Vec<SyscallDef> {
    vec![
        def(3, "read", vec![p::fd(), p::buffer(2, Out), p::unsigned()]),
        def(4, "write", vec![p::fd(), p::buffer(2, In), p::unsigned()]),
        def(
            5,
            "open",
            vec![p::string(), p::custom(decode_open_flags), open_mode(1)],
        )
        .variadic(2),
        def(6, "close", vec![p::fd()]),
        def(9, "link", vec![p::string(), p::string()]),
        def(10, "unlink", vec![p::string()]),
        def(12, "chdir", vec![p::string()]),
        def(13, "fchdir", vec![p::fd()]),
        def(14, "mknod", vec![p::string(), p::octal(), p::int()]),
        def(15, "chmod", vec![p::string(), p::octal()]),
        def(16, "chown", vec![p::string(), p::int(), p::int()]),
        def(18, "getfsstat", vec![p::pointer(), p::int(), p::constant(UNMOUNT_FLAGS)]),
        def(33, "access", vec![p::string(), p::custom(decode_access_mode)]),
        def(34, "chflags", vec![p::string(), p::flags(CHFLAGS_FLAGS)]),
        def(35, "fchflags", vec![p::fd(), p::flags(CHFLAGS_FLAGS)]),
        def(36, "sync", vec![]),
        def(41, "dup", vec![p::fd()]),
        def(42, "pipe", vec![]),
        def(
            54,
            "ioctl",
            vec![p::fd(), p::custom(decode_ioctl_cmd), ioctl_arg()],
        )
        .variadic(2),
        def(56, "revoke", vec![p::string()]),
        def(57, "symlink", vec![p::string(), p::string()]),
        def(58, "readlink", vec![p::string(), p::pointer(), p::unsigned()]),
        def(60, "umask", vec![p::octal()]).returns(super::ret_octal),
        def(61, "chroot", vec![p::string()]),
        def(90, "dup2", vec![p::fd(), p::fd()]),
        def(
            92,
            "fcntl",
            vec![p::fd(), p::constant(FCNTL_COMMANDS), fcntl_arg()],
        )
        .variadic(2),
        def(95, "fsync", vec![p::fd()]),
        def(120, "readv", vec![p::fd(), p::iovec(2, Out), p::int()]),
        def(121, "writev", vec![p::fd(), p::iovec(2, In), p::int()]),
        def(123, "fchown", vec![p::fd(), p::int(), p::int()]),
        def(124, "fchmod", vec![p::fd(), p::octal()]),
        def(128, "rename", vec![p::string(), p::string()]),
        def(131, "flock", vec![p::fd(), p::custom(decode_flock_op)]),
        def(132, "mkfifo", vec![p::string(), p::octal()]),
        def(136, "mkdir", vec![p::string(), p::octal()]),
        def(137, "rmdir", vec![p::string()]),
        def(153, "pread", vec![p::fd(), p::buffer(2, Out), p::unsigned(), p::int()]),
        def(154, "pwrite", vec![p::fd(), p::buffer(2, In), p::unsigned(), p::int()]),
        def(155, "nfssvc", vec![p::int(), p::pointer()]),
        def(157, "statfs", vec![p::string(), stat::statfs(Out)]),
        def(158, "fstatfs", vec![p::fd(), stat::statfs(Out)]),
        def(159, "unmount", vec![p::string(), p::constant(UNMOUNT_FLAGS)]),
        def(161, "getfh", vec![p::string(), p::pointer()]),
        def(165, "quotactl", vec![p::string(), p::int(), p::int(), p::pointer()]),
        def(
            167,
            "mount",
            vec![p::string(), p::string(), p::flags(MOUNT_FLAGS), p::pointer()],
        ),
        def(187, "fdatasync", vec![p::fd()]),
        def(188, "stat", vec![p::string(), stat::stat(Out)]),
        def(189, "fstat", vec![p::fd(), stat::stat(Out)]),
        def(190, "lstat", vec![p::string(), stat::stat(Out)]),
        def(191, "pathconf", vec![p::string(), p::constant(PATHCONF_NAMES)]),
        def(192, "fpathconf", vec![p::fd(), p::constant(PATHCONF_NAMES)]),
        def(
            196,
            "getdirentries",
            vec![p::fd(), p::pointer(), p::unsigned(), p::pointer()],
        ),
        def(199, "lseek", vec![p::fd(), p::int(), p::constant(SEEK_CONSTANTS)]),
        def(200, "truncate", vec![p::string(), p::int()]),
        def(201, "ftruncate", vec![p::fd(), p::int()]),
        def(205, "undelete", vec![p::string()]),
        def(
            216,
            "open_dprotected_np",
            vec![p::string(), p::custom(decode_open_flags), p::int(), p::int(), p::int()],
        ),
        def(
            217,
            "fsgetpath_ext",
            vec![p::pointer(), p::unsigned(), p::pointer(), p::unsigned()],
        ),
        def(
            218,
            "openat_dprotected_np",
            vec![p::dirfd(), p::string(), p::custom(decode_open_flags), p::int(), p::int(), p::int()],
        ),
        def(
            220,
            "getattrlist",
            vec![p::string(), attrlist::attrlist(In), p::pointer(), p::unsigned(), p::flags(FSOPT_FLAGS)],
        ),
        def(
            221,
            "setattrlist",
            vec![p::string(), attrlist::attrlist(In), p::pointer(), p::unsigned(), p::flags(FSOPT_FLAGS)],
        ),
        def(
            222,
            "getdirentriesattr",
            vec![
                p::fd(),
                attrlist::attrlist(In),
                p::pointer(),
                p::unsigned(),
                p::pointer(),
                p::pointer(),
                p::pointer(),
                p::unsigned(),
            ],
        ),
        def(223, "exchangedata", vec![p::string(), p::string(), p::unsigned()]),
        def(
            225,
            "searchfs",
            vec![
                p::string(),
                attrlist::fssearchblock(In),
                p::pointer(),
                p::unsigned(),
                p::unsigned(),
                p::pointer(),
            ],
        ),
        def(226, "delete", vec![p::string()]),
        def(
            227,
            "copyfile",
            vec![p::string(), p::string(), p::int(), p::flags(COPYFILE_FLAGS)],
        ),
        def(
            228,
            "fgetattrlist",
            vec![p::fd(), attrlist::attrlist(In), p::pointer(), p::unsigned(), p::flags(FSOPT_FLAGS)],
        ),
        def(
            229,
            "fsetattrlist",
            vec![p::fd(), attrlist::attrlist(In), p::pointer(), p::unsigned(), p::flags(FSOPT_FLAGS)],
        ),
        def(
            234,
            "getxattr",
            vec![p::string(), p::string(), p::pointer(), p::unsigned(), p::unsigned(), p::flags(XATTR_FLAGS)],
        ),
        def(
            235,
            "fgetxattr",
            vec![p::fd(), p::string(), p::pointer(), p::unsigned(), p::unsigned(), p::flags(XATTR_FLAGS)],
        ),
        def(
            236,
            "setxattr",
            vec![p::string(), p::string(), p::pointer(), p::unsigned(), p::unsigned(), p::flags(XATTR_FLAGS)],
        ),
        def(
            237,
            "fsetxattr",
            vec![p::fd(), p::string(), p::pointer(), p::unsigned(), p::unsigned(), p::flags(XATTR_FLAGS)],
        ),
        def(238, "removexattr", vec![p::string(), p::string(), p::flags(XATTR_FLAGS)]),
        def(239, "fremovexattr", vec![p::fd(), p::string(), p::flags(XATTR_FLAGS)]),
        def(
            240,
            "listxattr",
            vec![p::string(), p::pointer(), p::unsigned(), p::flags(XATTR_FLAGS)],
        ),
        def(
            241,
            "flistxattr",
            vec![p::fd(), p::pointer(), p::unsigned(), p::flags(XATTR_FLAGS)],
        ),
        def(242, "fsctl", vec![p::string(), p::unsigned(), p::pointer(), p::unsigned()]),
        def(245, "ffsctl", vec![p::fd(), p::unsigned(), p::pointer(), p::unsigned()]),
        def(248, "fhopen", vec![p::pointer(), p::int()]),
        def(266, "shm_open", vec![p::string(), p::custom(decode_open_flags), p::octal()]),
        def(267, "shm_unlink", vec![p::string()]),
        def(
            268,
            "sem_open",
            vec![p::string(), p::custom(decode_open_flags), p::octal(), p::unsigned()],
        ),
        def(269, "sem_close", vec![p::pointer()]),
        def(270, "sem_unlink", vec![p::string()]),
        def(
            277,
            "open_extended",
            vec![p::string(), p::custom(decode_open_flags), p::int(), p::int(), p::octal(), p::pointer()],
        ),
        def(278, "umask_extended", vec![p::octal(), p::pointer()]),
        def(
            279,
            "stat_extended",
            vec![p::string(), stat::stat(Out), p::pointer(), p::pointer()],
        ),
        def(
            280,
            "lstat_extended",
            vec![p::string(), stat::stat(Out), p::pointer(), p::pointer()],
        ),
        def(
            281,
            "fstat_extended",
            vec![p::fd(), stat::stat(Out), p::pointer(), p::pointer()],
        ),
        def(
            282,
            "chmod_extended",
            vec![p::string(), p::int(), p::int(), p::octal(), p::pointer()],
        ),
        def(
            283,
            "fchmod_extended",
            vec![p::fd(), p::int(), p::int(), p::octal(), p::pointer()],
        ),
        def(
            284,
            "access_extended",
            vec![p::string(), p::custom(decode_access_mode), p::pointer(), p::int()],
        ),
        def(
            291,
            "mkfifo_extended",
            vec![p::string(), p::int(), p::int(), p::octal(), p::pointer()],
        ),
        def(
            292,
            "mkdir_extended",
            vec![p::string(), p::int(), p::int(), p::octal(), p::pointer()],
        ),
        def(
            297,
            "psynch_rw_longrdlock",
            vec![p::pointer(), p::unsigned(), p::unsigned(), p::unsigned(), p::int()],
        ),
        def(
            298,
            "psynch_rw_yieldwrlock",
            vec![p::pointer(), p::unsigned(), p::unsigned(), p::unsigned(), p::int()],
        ),
        def(
            299,
            "psynch_rw_downgrade",
            vec![p::pointer(), p::unsigned(), p::unsigned(), p::unsigned(), p::int()],
        ),
        def(
            300,
            "psynch_rw_upgrade",
            vec![p::pointer(), p::unsigned(), p::unsigned(), p::unsigned(), p::int()],
        ),
        def(338, "stat64", vec![p::string(), stat::stat(Out)]),
        def(339, "fstat64", vec![p::fd(), stat::stat(Out)]),
        def(340, "lstat64", vec![p::string(), stat::stat(Out)]),
        def(
            341,
            "stat64_extended",
            vec![p::string(), stat::stat(Out), p::pointer(), p::pointer()],
        ),
        def(
            342,
            "lstat64_extended",
            vec![p::string(), stat::stat(Out), p::pointer(), p::pointer()],
        ),
        def(
            343,
            "fstat64_extended",
            vec![p::fd(), stat::stat(Out), p::pointer(), p::pointer()],
        ),
        def(
            344,
            "getdirentries64",
            vec![p::fd(), p::pointer(), p::unsigned(), p::pointer()],
        ),
        def(345, "statfs64", vec![p::string(), stat::statfs(Out)]),
        def(346, "fstatfs64", vec![p::fd(), stat::statfs(Out)]),
        def(347, "getfsstat64", vec![p::pointer(), p::int(), p::constant(UNMOUNT_FLAGS)]),
        def(350, "audit", vec![p::pointer(), p::int()]),
        def(351, "auditon", vec![p::int(), p::pointer(), p::int()]),
        def(353, "getauid", vec![p::pointer()]),
        def(354, "setauid", vec![p::pointer()]),
        def(357, "getaudit_addr", vec![p::pointer(), p::int()]),
        def(358, "setaudit_addr", vec![p::pointer(), p::int()]),
        def(359, "auditctl", vec![p::string()]),
        def(427, "fsgetpath", vec![p::pointer(), p::unsigned(), p::pointer(), p::unsigned()]),
        def(436, "fmount", vec![p::string(), p::int(), p::int(), p::pointer()]),
        def(
            442,
            "guarded_open_np",
            vec![p::string(), p::pointer(), p::unsigned(), p::custom(decode_open_flags)],
        ),
        def(444, "guarded_close_np", vec![p::fd(), p::pointer()]),
        def(
            446,
            "guarded_open_dprotected_np",
            vec![p::string(), p::pointer(), p::unsigned(), p::custom(decode_open_flags), p::int(), p::int()],
        ),
        def(
            451,
            "change_fdguard_np",
            vec![p::fd(), p::pointer(), p::unsigned(), p::pointer(), p::unsigned(), p::pointer()],
        ),
        def(
            461,
            "clonefileat",
            vec![p::dirfd(), p::string(), p::dirfd(), p::string(), p::unsigned()],
        ),
        def(
            462,
            "fclonefileat",
            vec![p::fd(), p::dirfd(), p::string(), p::unsigned()],
        ),
        def(
            463,
            "openat",
            vec![p::dirfd(), p::string(), p::custom(decode_open_flags), open_mode(2)],
        )
        .variadic(3),
        def(
            464,
            "__openat_nocancel",
            vec![p::dirfd(), p::string(), p::custom(decode_open_flags), open_mode(2)],
        )
        .variadic(3),
        def(465, "renameat", vec![p::dirfd(), p::string(), p::dirfd(), p::string()]),
        def(
            466,
            "faccessat",
            vec![p::dirfd(), p::string(), p::custom(decode_access_mode), p::flags(AT_FLAGS)],
        ),
        def(
            467,
            "fchmodat",
            vec![p::dirfd(), p::string(), p::octal(), p::flags(AT_FLAGS)],
        ),
        def(
            468,
            "fchownat",
            vec![p::dirfd(), p::string(), p::int(), p::int(), p::flags(AT_FLAGS)],
        ),
        def(
            470,
            "fstatat",
            vec![p::dirfd(), p::string(), stat::stat(Out), p::flags(AT_FLAGS)],
        ),
        def(
            470,
            "fstatat64",
            vec![p::dirfd(), p::string(), stat::stat(Out), p::flags(AT_FLAGS)],
        ),
        def(
            471,
            "linkat",
            vec![p::dirfd(), p::string(), p::dirfd(), p::string(), p::flags(AT_FLAGS)],
        ),
        def(472, "unlinkat", vec![p::dirfd(), p::string(), p::flags(AT_FLAGS)]),
        def(
            473,
            "readlinkat",
            vec![p::dirfd(), p::string(), p::pointer(), p::unsigned()],
        ),
        def(474, "symlinkat", vec![p::string(), p::dirfd(), p::string()]),
        def(475, "mkdirat", vec![p::dirfd(), p::string(), p::octal()]),
        def(
            476,
            "getattrlistat",
            vec![p::dirfd(), p::string(), attrlist::attrlist(In), p::pointer(), p::unsigned(), p::flags(FSOPT_FLAGS)],
        ),
        def(
            456,
            "mkfifoat",
            vec![p::dirfd(), p::string(), p::octal()],
        ),
        def(
            457,
            "mknodat",
            vec![p::dirfd(), p::string(), p::octal(), p::int()],
        ),
        def(
            488,
            "renameatx_np",
            vec![p::dirfd(), p::string(), p::dirfd(), p::string(), p::unsigned()],
        ),
        def(
            432,
            "getattrlistbulk",
            vec![p::fd(), attrlist::attrlist(In), p::pointer(), p::unsigned(), p::unsigned()],
        ),
        def(
            448,
            "fs_snapshot",
            vec![p::unsigned(), p::int(), p::string(), p::string(), p::pointer(), p::unsigned()],
        ),
        def(
            554,
            "guarded_writev_np",
            vec![p::fd(), p::pointer(), p::iovec(3, In), p::int()],
        ),
        def(407, "openbyid_np", vec![p::pointer(), p::unsigned(), p::custom(decode_open_flags)]),
        def(526, "preadv", vec![p::fd(), p::iovec(2, Out), p::int(), p::int()]),
        def(527, "pwritev", vec![p::fd(), p::iovec(2, In), p::int(), p::int()]),
        def(528, "__preadv_nocancel", vec![p::fd(), p::iovec(2, Out), p::int(), p::int()]),
        def(529, "__pwritev_nocancel", vec![p::fd(), p::iovec(2, In), p::int(), p::int()]),
        // non-cancelable wrappers
        def(396, "__read_nocancel", vec![p::fd(), p::buffer(2, Out), p::unsigned()]),
        def(397, "__write_nocancel", vec![p::fd(), p::buffer(2, In), p::unsigned()]),
        def(
            398,
            "__open_nocancel",
            vec![p::string(), p::custom(decode_open_flags), open_mode(1)],
        )
        .variadic(2),
        def(399, "__close_nocancel", vec![p::fd()]),
        def(
            406,
            "__fcntl_nocancel",
            vec![p::fd(), p::constant(FCNTL_COMMANDS), fcntl_arg()],
        )
        .variadic(2),
        def(408, "__fsync_nocancel", vec![p::fd()]),
        def(411, "__readv_nocancel", vec![p::fd(), p::iovec(2, Out), p::int()]),
        def(412, "__writev_nocancel", vec![p::fd(), p::iovec(2, In), p::int()]),
        def(
            414,
            "__pread_nocancel",
            vec![p::fd(), p::buffer(2, Out), p::unsigned(), p::int()],
        ),
        def(
            415,
            "__pwrite_nocancel",
            vec![p::fd(), p::buffer(2, In), p::unsigned(), p::int()],
        ),
    ]
}
