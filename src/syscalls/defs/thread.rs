// Thread management syscall definitions

use crate::syscalls::category::Category;
use crate::syscalls::params::{self as p};

use super::SyscallDef;

fn def(number: i32, name: &'static str, params: Vec<p::BoxedParam>) -> SyscallDef {
    SyscallDef::new(number, name, params, Category::Thread)
}

pub fn syscalls() -> Vec<SyscallDef> {
    vec![
        def(186, "thread_selfcounts", vec![p::int(), p::pointer(), p::unsigned()]),
        def(332, "__pthread_markcancel", vec![p::int()]),
        def(333, "__pthread_canceled", vec![p::int()]),
        def(348, "__pthread_chdir", vec![p::string()]),
        def(349, "__pthread_fchdir", vec![p::fd()]),
        def(
            360,
            "bsdthread_create",
            vec![p::pointer(), p::pointer(), p::pointer(), p::pointer(), p::unsigned()],
        ),
        def(
            361,
            "bsdthread_terminate",
            vec![p::pointer(), p::unsigned(), p::unsigned(), p::unsigned()],
        ),
        def(
            366,
            "bsdthread_register",
            vec![p::pointer(), p::pointer(), p::int()],
        ),
        def(
            449,
            "bsdthread_ctl",
            vec![p::pointer(), p::unsigned(), p::pointer(), p::pointer()],
        ),
        def(475, "thread_selfusage", vec![]),
        def(539, "thread_selfid", vec![]),
    ]
}
