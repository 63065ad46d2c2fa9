// System information syscall definitions

use crate::syscalls::category::Category;
use crate::syscalls::params::{self as p};

use super::SyscallDef;

fn def(number: i32, name: &'static str, params: Vec<p::BoxedParam>) -> SyscallDef {
    SyscallDef::new(number, name, params, Category::Sysinfo)
}

pub fn syscalls() -> Vec<SyscallDef> {
    vec![
        def(89, "getdtablesize", vec![]),
        def(142, "gethostuuid", vec![p::uuid(), p::timespec()]),
        def(
            202,
            "sysctl",
            vec![
                p::sysctl_mib(),
                p::unsigned(),
                p::sysctl_buffer(),
                p::sysctl_size_ptr(),
                p::pointer(),
                p::unsigned(),
            ],
        ),
        def(
            274,
            "sysctlbyname",
            vec![
                p::sysctl_byname_name(),
                p::sysctl_byname_buffer(),
                p::sysctl_size_ptr(),
                p::pointer(),
                p::unsigned(),
            ],
        ),
        def(452, "usrctl", vec![p::unsigned()]),
        def(500, "getentropy", vec![p::pointer(), p::unsigned()]),
    ]
}
