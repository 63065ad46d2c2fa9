// Time and timer syscall definitions

use crate::syscalls::category::Category;
use crate::syscalls::params::{self as p};
use crate::syscalls::structs::event::timeval;
use crate::syscalls::symbols::time::ITIMER_CONSTANTS;

use super::SyscallDef;

fn def(number: i32, name: &'static str, params: Vec<p::BoxedParam>) -> SyscallDef {
    SyscallDef::new(number, name, params, Category::Time)
}

pub fn syscalls() -> Vec<SyscallDef> {
    vec![
        def(
            83,
            "setitimer",
            vec![p::constant(ITIMER_CONSTANTS), p::pointer(), p::pointer()],
        ),
        def(86, "getitimer", vec![p::constant(ITIMER_CONSTANTS), p::pointer()]),
        def(116, "gettimeofday", vec![timeval(), p::pointer()]),
        def(122, "settimeofday", vec![timeval(), p::pointer()]),
        def(138, "utimes", vec![p::string(), p::pointer()]),
        def(139, "futimes", vec![p::fd(), p::pointer()]),
        def(140, "adjtime", vec![timeval(), p::pointer()]),
    ]
}
