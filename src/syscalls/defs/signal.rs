// Signal handling syscall definitions

use crate::syscalls::category::Category;
use crate::syscalls::params::{self as p, Direction::In, Direction::Out};
use crate::syscalls::structs::sigs::{sigaction, sigaltstack, sigset};
use crate::syscalls::symbols::process::SIG_HOW;
use crate::syscalls::symbols::signal::SIGNAL_NUMBERS;

use super::SyscallDef;

fn def(number: i32, name: &'static str, params: Vec<p::BoxedParam>) -> SyscallDef {
    SyscallDef::new(number, name, params, Category::Signal)
}

pub fn syscalls() -> Vec<SyscallDef> {
    vec![
        def(37, "kill", vec![p::int(), p::constant(SIGNAL_NUMBERS)]),
        def(
            46,
            "sigaction",
            vec![p::constant(SIGNAL_NUMBERS), sigaction(In), sigaction(Out)],
        ),
        def(
            48,
            "sigprocmask",
            vec![p::constant(SIG_HOW), sigset(In), sigset(Out)],
        ),
        def(52, "sigpending", vec![sigset(Out)]),
        def(53, "sigaltstack", vec![sigaltstack(In), sigaltstack(Out)]),
        def(111, "sigsuspend", vec![sigset(In)]),
        def(184, "sigreturn", vec![p::pointer(), p::int()]),
        def(328, "__pthread_kill", vec![p::pointer(), p::constant(SIGNAL_NUMBERS)]),
        def(
            329,
            "__pthread_sigmask",
            vec![p::constant(SIG_HOW), sigset(In), sigset(Out)],
        ),
        def(330, "__sigwait", vec![sigset(In), p::int_ptr(Out)]),
        def(331, "__disable_threadsignal", vec![p::constant(SIGNAL_NUMBERS)]),
        def(410, "__sigsuspend_nocancel", vec![sigset(In)]),
        def(422, "__sigwait_nocancel", vec![sigset(In), p::int_ptr(Out)]),
    ]
}
