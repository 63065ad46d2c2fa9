// Security and access control syscall definitions

use crate::syscalls::category::Category;
use crate::syscalls::params::{self as p};

use super::SyscallDef;

fn def(number: i32, name: &'static str, params: Vec<p::BoxedParam>) -> SyscallDef {
    SyscallDef::new(number, name, params, Category::Security)
}

pub fn syscalls() -> Vec<SyscallDef> {
    vec![
        def(169, "csops", vec![p::int(), p::unsigned(), p::pointer(), p::unsigned()]),
        def(
            170,
            "csops_audittoken",
            vec![p::int(), p::unsigned(), p::pointer(), p::unsigned(), p::pointer()],
        ),
        def(381, "__mac_syscall", vec![p::string(), p::int(), p::pointer()]),
        def(382, "__mac_get_file", vec![p::string(), p::pointer()]),
        def(383, "__mac_set_file", vec![p::string(), p::pointer()]),
        def(384, "__mac_get_link", vec![p::string(), p::pointer()]),
        def(385, "__mac_set_link", vec![p::string(), p::pointer()]),
        def(388, "__mac_get_fd", vec![p::fd(), p::pointer()]),
        def(389, "__mac_set_fd", vec![p::fd(), p::pointer()]),
        def(
            424,
            "__mac_mount",
            vec![p::string(), p::string(), p::int(), p::pointer(), p::pointer()],
        ),
        def(425, "__mac_getfsstat", vec![p::pointer(), p::int(), p::int()]),
        def(465, "csrctl", vec![p::unsigned(), p::pointer(), p::unsigned()]),
    ]
}
