// Memory management syscall definitions

use crate::syscalls::category::Category;
use crate::syscalls::params::{self as p};
use crate::syscalls::symbols::file::MSYNC_FLAGS;
use crate::syscalls::symbols::memory::{
    MADV_CONSTANTS, MAP_FLAGS, MCL_FLAGS, PROT_FLAGS, VM_INHERIT_CONSTANTS,
};

use super::{ret_pointer, SyscallDef};

fn def(number: i32, name: &'static str, params: Vec<p::BoxedParam>) -> SyscallDef {
    SyscallDef::new(number, name, params, Category::Memory)
}

pub fn syscalls() -> Vec<SyscallDef> {
    vec![
        def(65, "msync", vec![p::pointer(), p::unsigned(), p::flags(MSYNC_FLAGS)]),
        def(73, "munmap", vec![p::pointer(), p::unsigned()]),
        def(
            74,
            "mprotect",
            vec![p::pointer(), p::unsigned(), p::flags(PROT_FLAGS)],
        ),
        def(
            75,
            "madvise",
            vec![p::pointer(), p::unsigned(), p::constant(MADV_CONSTANTS)],
        ),
        def(78, "mincore", vec![p::pointer(), p::unsigned(), p::pointer()]),
        def(
            197,
            "mmap",
            vec![
                p::pointer(),
                p::unsigned(),
                p::flags(PROT_FLAGS),
                p::flags(MAP_FLAGS),
                p::fd(),
                p::unsigned(),
            ],
        )
        .returns(ret_pointer),
        def(203, "mlock", vec![p::pointer(), p::unsigned()]),
        def(204, "munlock", vec![p::pointer(), p::unsigned()]),
        def(
            250,
            "minherit",
            vec![p::pointer(), p::unsigned(), p::constant(VM_INHERIT_CONSTANTS)],
        ),
        def(294, "shared_region_check_np", vec![p::pointer()]),
        def(
            296,
            "vm_pressure_monitor",
            vec![p::int(), p::int(), p::pointer()],
        ),
        def(324, "mlockall", vec![p::flags(MCL_FLAGS)]),
        def(325, "munlockall", vec![]),
        def(
            489,
            "mremap_encrypted",
            vec![p::pointer(), p::unsigned(), p::unsigned(), p::unsigned(), p::unsigned()],
        ),
        def(
            536,
            "shared_region_map_and_slide_2_np",
            vec![
                p::unsigned(),
                p::unsigned(),
                p::pointer(),
                p::unsigned(),
                p::pointer(),
                p::unsigned(),
            ],
        ),
    ]
}
