// Network syscall definitions

use crate::syscalls::category::Category;
use crate::syscalls::params::{self as p, Direction::In, Direction::Out};
use crate::syscalls::structs::{msghdr, sockaddr};
use crate::syscalls::symbols::network::{
    AF_CONSTANTS, IPPROTO_CONSTANTS, MSG_FLAGS, SHUT_CONSTANTS, SOCK_CONSTANTS, SOL_CONSTANTS,
    SO_OPTIONS,
};

use super::SyscallDef;

fn def(number: i32, name: &'static str, params: Vec<p::BoxedParam>) -> SyscallDef {
    SyscallDef::new(number, name, params, Category::Network)
}

pub fn syscalls() -> Vec<SyscallDef> {
    vec![
        def(
            27,
            "recvmsg",
            vec![p::fd(), msghdr::msghdr(In), p::flags(MSG_FLAGS)],
        ),
        def(
            28,
            "sendmsg",
            vec![p::fd(), msghdr::msghdr(In), p::flags(MSG_FLAGS)],
        ),
        def(
            29,
            "recvfrom",
            vec![
                p::fd(),
                p::buffer(2, Out),
                p::unsigned(),
                p::flags(MSG_FLAGS),
                p::pointer(),
                p::pointer(),
            ],
        ),
        def(
            30,
            "accept",
            vec![p::fd(), sockaddr::sockaddr(Out), p::pointer()],
        ),
        def(
            31,
            "getpeername",
            vec![p::fd(), sockaddr::sockaddr(Out), p::pointer()],
        ),
        def(
            32,
            "getsockname",
            vec![p::fd(), sockaddr::sockaddr(Out), p::pointer()],
        ),
        def(
            97,
            "socket",
            vec![
                p::constant(AF_CONSTANTS),
                p::constant(SOCK_CONSTANTS),
                p::constant(IPPROTO_CONSTANTS),
            ],
        ),
        def(
            98,
            "connect",
            vec![p::fd(), sockaddr::sockaddr(In), p::unsigned()],
        ),
        def(104, "bind", vec![p::fd(), sockaddr::sockaddr(In), p::unsigned()]),
        def(
            105,
            "setsockopt",
            vec![
                p::fd(),
                p::constant(SOL_CONSTANTS),
                p::constant(SO_OPTIONS),
                p::pointer(),
                p::unsigned(),
            ],
        ),
        def(106, "listen", vec![p::fd(), p::int()]),
        def(
            118,
            "getsockopt",
            vec![
                p::fd(),
                p::constant(SOL_CONSTANTS),
                p::constant(SO_OPTIONS),
                p::pointer(),
                p::pointer(),
            ],
        ),
        def(
            133,
            "sendto",
            vec![
                p::fd(),
                p::buffer(2, In),
                p::unsigned(),
                p::flags(MSG_FLAGS),
                sockaddr::sockaddr(In),
                p::unsigned(),
            ],
        ),
        def(134, "shutdown", vec![p::fd(), p::constant(SHUT_CONSTANTS)]),
        def(
            135,
            "socketpair",
            vec![
                p::constant(AF_CONSTANTS),
                p::constant(SOCK_CONSTANTS),
                p::constant(IPPROTO_CONSTANTS),
                p::fd_pair(),
            ],
        ),
        def(453, "pid_shutdown_sockets", vec![p::int(), p::int()]),
        def(
            447,
            "connectx",
            vec![
                p::fd(),
                p::pointer(),
                p::unsigned(),
                p::pointer(),
                p::unsigned(),
                p::unsigned(),
                p::pointer(),
                p::pointer(),
            ],
        ),
        def(448, "disconnectx", vec![p::fd(), p::unsigned(), p::unsigned()]),
        def(449, "peeloff", vec![p::fd(), p::unsigned()]),
        def(
            450,
            "socket_delegate",
            vec![
                p::constant(AF_CONSTANTS),
                p::constant(SOCK_CONSTANTS),
                p::constant(IPPROTO_CONSTANTS),
                p::int(),
            ],
        ),
        def(460, "necp_match_policy", vec![p::pointer(), p::unsigned(), p::pointer()]),
        def(
            480,
            "recvmsg_x",
            vec![p::fd(), p::pointer(), p::unsigned(), p::flags(MSG_FLAGS)],
        ),
        def(
            481,
            "sendmsg_x",
            vec![p::fd(), p::pointer(), p::unsigned(), p::flags(MSG_FLAGS)],
        ),
        def(490, "netagent_trigger", vec![p::pointer(), p::unsigned()]),
        def(
            502,
            "necp_client_action",
            vec![p::fd(), p::unsigned(), p::pointer(), p::unsigned(), p::pointer(), p::unsigned()],
        ),
        def(
            523,
            "necp_session_action",
            vec![p::fd(), p::unsigned(), p::pointer(), p::unsigned()],
        ),
        def(525, "net_qos_guideline", vec![p::pointer(), p::pointer()]),
        def(501, "necp_open", vec![p::int()]),
        // non-cancelable wrappers
        def(
            401,
            "__recvmsg_nocancel",
            vec![p::fd(), msghdr::msghdr(In), p::flags(MSG_FLAGS)],
        ),
        def(
            402,
            "__sendmsg_nocancel",
            vec![p::fd(), msghdr::msghdr(In), p::flags(MSG_FLAGS)],
        ),
        def(
            403,
            "__recvfrom_nocancel",
            vec![
                p::fd(),
                p::buffer(2, Out),
                p::unsigned(),
                p::flags(MSG_FLAGS),
                p::pointer(),
                p::pointer(),
            ],
        ),
        def(
            404,
            "__accept_nocancel",
            vec![p::fd(), sockaddr::sockaddr(Out), p::pointer()],
        ),
        def(
            409,
            "__connect_nocancel",
            vec![p::fd(), sockaddr::sockaddr(In), p::unsigned()],
        ),
        def(
            413,
            "__sendto_nocancel",
            vec![
                p::fd(),
                p::buffer(2, In),
                p::unsigned(),
                p::flags(MSG_FLAGS),
                sockaddr::sockaddr(In),
                p::unsigned(),
            ],
        ),
    ]
}
