// Process management syscall definitions

use crate::syscalls::category::Category;
use crate::syscalls::params::{self as p, Direction::In, Direction::Out};
use crate::syscalls::structs::process::{rlimit, rusage};
use crate::syscalls::symbols::process::{
    IDTYPE_CONSTANTS, PRIO_WHICH, RLIMIT_RESOURCES, RUSAGE_WHO, WAITID_OPTIONS, WAIT_OPTIONS,
};

use super::SyscallDef;

fn def(number: i32, name: &'static str, params: Vec<p::BoxedParam>) -> SyscallDef {
    SyscallDef::new(number, name, params, Category::Process)
}

pub fn syscalls() -> Vec<SyscallDef> {
    vec![
        def(1, "exit", vec![p::int()]),
        def(2, "fork", vec![]),
        def(
            7,
            "wait4",
            vec![
                p::int(),
                p::int_ptr(Out),
                p::flags(WAIT_OPTIONS),
                rusage(Out),
            ],
        ),
        def(20, "getpid", vec![]),
        def(23, "setuid", vec![p::int()]),
        def(24, "getuid", vec![]),
        def(25, "geteuid", vec![]),
        def(39, "getppid", vec![]),
        def(43, "getegid", vec![]),
        def(47, "getgid", vec![]),
        def(49, "getlogin", vec![p::buffer(1, Out), p::unsigned()]),
        def(50, "setlogin", vec![p::string()]),
        def(
            59,
            "execve",
            vec![p::string(), p::string_array(), p::string_array()],
        ),
        def(66, "vfork", vec![]),
        def(67, "oslog_coproc_reg", vec![p::pointer(), p::unsigned()]),
        def(68, "oslog_coproc", vec![p::pointer(), p::unsigned(), p::unsigned()]),
        def(79, "getgroups", vec![p::unsigned(), p::int_array(0, Out)]),
        def(80, "setgroups", vec![p::unsigned(), p::int_array(0, In)]),
        def(81, "getpgrp", vec![]),
        def(82, "setpgid", vec![p::int(), p::int()]),
        def(96, "setpriority", vec![p::constant(PRIO_WHICH), p::int(), p::int()]),
        def(100, "getpriority", vec![p::constant(PRIO_WHICH), p::int()]),
        def(117, "getrusage", vec![p::constant(RUSAGE_WHO), rusage(Out)]),
        def(126, "setreuid", vec![p::int(), p::int()]),
        def(127, "setregid", vec![p::int(), p::int()]),
        def(147, "setsid", vec![]),
        def(151, "getpgid", vec![p::int()]),
        def(152, "setprivexec", vec![p::int()]),
        def(
            173,
            "waitid",
            vec![
                p::constant(IDTYPE_CONSTANTS),
                p::unsigned(),
                p::pointer(),
                p::flags(WAITID_OPTIONS),
            ],
        ),
        def(181, "setgid", vec![p::int()]),
        def(182, "setegid", vec![p::int()]),
        def(183, "seteuid", vec![p::int()]),
        def(194, "getrlimit", vec![p::constant(RLIMIT_RESOURCES), rlimit(Out)]),
        def(195, "setrlimit", vec![p::constant(RLIMIT_RESOURCES), rlimit(In)]),
        def(
            243,
            "initgroups",
            vec![p::string(), p::int(), p::pointer(), p::unsigned()],
        ),
        def(
            244,
            "posix_spawn",
            vec![
                p::int_ptr(Out),
                p::string(),
                p::pointer(),
                p::pointer(),
                p::string_array(),
                p::string_array(),
            ],
        ),
        def(310, "getsid", vec![p::int()]),
        def(327, "issetugid", vec![]),
        def(
            334,
            "__semwait_signal",
            vec![p::int(), p::int(), p::int(), p::int(), p::int(), p::int()],
        ),
        def(
            368,
            "workq_kernreturn",
            vec![p::int(), p::pointer(), p::int(), p::int()],
        ),
        def(
            380,
            "__mac_execve",
            vec![p::string(), p::string_array(), p::string_array(), p::pointer()],
        ),
        def(386, "__mac_get_proc", vec![p::pointer()]),
        def(387, "__mac_set_proc", vec![p::pointer()]),
        def(390, "__mac_get_pid", vec![p::int(), p::pointer()]),
        def(457, "sfi_pidctl", vec![p::unsigned(), p::int(), p::unsigned()]),
        def(458, "coalition", vec![p::unsigned(), p::pointer(), p::unsigned()]),
        def(
            459,
            "coalition_info",
            vec![p::unsigned(), p::pointer(), p::pointer(), p::unsigned()],
        ),
        def(
            494,
            "persona",
            vec![
                p::unsigned(),
                p::unsigned(),
                p::pointer(),
                p::pointer(),
                p::unsigned(),
                p::pointer(),
            ],
        ),
        def(
            515,
            "ulock_wait",
            vec![p::unsigned(), p::pointer(), p::unsigned(), p::unsigned()],
        ),
        def(
            532,
            "coalition_ledger",
            vec![p::unsigned(), p::unsigned(), p::pointer(), p::unsigned()],
        ),
        def(
            538,
            "task_inspect_for_pid",
            vec![p::int(), p::int(), p::unsigned()],
        ),
        def(
            544,
            "ulock_wait2",
            vec![
                p::unsigned(),
                p::pointer(),
                p::unsigned(),
                p::unsigned(),
                p::unsigned(),
            ],
        ),
        def(
            556,
            "coalition_policy_set",
            vec![p::unsigned(), p::unsigned(), p::pointer(), p::unsigned()],
        ),
        def(
            557,
            "coalition_policy_get",
            vec![p::unsigned(), p::unsigned(), p::pointer(), p::unsigned()],
        ),
    ]
}
