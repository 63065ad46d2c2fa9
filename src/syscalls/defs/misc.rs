// Miscellaneous syscall definitions

use crate::syscalls::category::Category;
use crate::syscalls::params::{self as p};

use super::SyscallDef;

fn def(number: i32, name: &'static str, params: Vec<p::BoxedParam>) -> SyscallDef {
    SyscallDef::new(number, name, params, Category::Misc)
}

pub fn syscalls() -> Vec<SyscallDef> {
    vec![
        def(0, "syscall", vec![p::int(), p::pointer()]),
        def(38, "crossarch_trap", vec![
            p::unsigned(),
            p::unsigned(),
            p::unsigned(),
            p::unsigned(),
        ]),
        def(51, "acct", vec![p::string()]),
        def(55, "reboot", vec![p::int(), p::string()]),
        def(85, "swapon", vec![]),
        def(
            454,
            "proc_rlimit_control",
            vec![p::int(), p::int(), p::pointer()],
        ),
        def(
            469,
            "grab_pgo_data",
            vec![
                p::pointer(),
                p::int(),
                p::pointer(),
                p::unsigned(),
                p::pointer(),
                p::pointer(),
            ],
        ),
        def(
            470,
            "map_with_linking_np",
            vec![
                p::pointer(),
                p::unsigned(),
                p::int(),
                p::int(),
                p::int(),
                p::unsigned(),
                p::pointer(),
            ],
        ),
        def(473, "fileport_makeport", vec![p::fd(), p::pointer()]),
        def(474, "fileport_makefd", vec![p::pointer()]),
    ]
}
