// Debugging and tracing syscall definitions

use crate::syscalls::category::Category;
use crate::syscalls::params::{self as p};
use crate::syscalls::symbols::ptrace::PTRACE_REQUESTS;

use super::SyscallDef;

fn def(number: i32, name: &'static str, params: Vec<p::BoxedParam>) -> SyscallDef {
    SyscallDef::new(number, name, params, Category::Debug)
}

pub fn syscalls() -> Vec<SyscallDef> {
    vec![
        def(
            26,
            "ptrace",
            vec![p::constant(PTRACE_REQUESTS), p::int(), p::pointer(), p::int()],
        ),
        def(177, "kdebug_typefilter", vec![p::pointer(), p::pointer()]),
        def(
            178,
            "kdebug_trace_string",
            vec![p::unsigned(), p::unsigned(), p::string()],
        ),
        def(
            179,
            "kdebug_trace64",
            vec![p::unsigned(), p::unsigned(), p::unsigned(), p::unsigned(), p::unsigned()],
        ),
        def(
            180,
            "kdebug_trace",
            vec![p::unsigned(), p::unsigned(), p::unsigned(), p::unsigned(), p::unsigned()],
        ),
        def(
            185,
            "panic_with_data",
            vec![p::pointer(), p::pointer(), p::unsigned(), p::unsigned()],
        ),
        def(287, "microstackshot", vec![p::pointer(), p::unsigned(), p::unsigned()]),
        def(
            482,
            "stack_snapshot_with_config",
            vec![p::int(), p::pointer(), p::unsigned()],
        ),
        def(
            485,
            "terminate_with_payload",
            vec![
                p::int(),
                p::unsigned(),
                p::pointer(),
                p::unsigned(),
                p::pointer(),
                p::unsigned(),
                p::unsigned(),
            ],
        ),
        def(
            486,
            "abort_with_payload",
            vec![
                p::int(),
                p::unsigned(),
                p::pointer(),
                p::unsigned(),
                p::pointer(),
                p::unsigned(),
                p::unsigned(),
            ],
        ),
        def(
            513,
            "os_fault_with_payload",
            vec![p::unsigned(), p::pointer(), p::unsigned(), p::pointer(), p::unsigned()],
        ),
        def(
            519,
            "log_data",
            vec![p::unsigned(), p::unsigned(), p::pointer(), p::unsigned()],
        ),
        def(521, "objc_bp_assist_cfg_np", vec![p::pointer()]),
        def(542, "debug_syscall_reject", vec![p::pointer()]),
        def(
            543,
            "debug_syscall_reject_config",
            vec![p::pointer(), p::unsigned()],
        ),
    ]
}
