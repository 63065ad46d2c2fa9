// IPC syscall definitions: multiplexing, System V IPC, POSIX semaphores,
// async I/O and kqueue

use crate::syscalls::category::Category;
use crate::syscalls::params::{self as p, Direction::In, Direction::Out};
use crate::syscalls::structs::event::{fd_set, kevent64_array, kevent_array, pollfd_array, timeval};
use crate::syscalls::structs::ipc::{
    aiocb, aiocb_array, msqid_ds, sembuf, semid_ds, shmid_ds, sigevent,
};
use crate::syscalls::symbols::ipc::{
    decode_ipc_flags, IPC_COMMANDS, LIO_MODES, MSGRCV_FLAGS, SEMCTL_COMMANDS, SHM_FLAGS,
};

use super::{ret_pointer, SyscallDef};

fn def(number: i32, name: &'static str, params: Vec<p::BoxedParam>) -> SyscallDef {
    SyscallDef::new(number, name, params, Category::Ipc)
}

pub fn syscalls() -> Vec<SyscallDef> {
    vec![
        // I/O multiplexing
        def(
            93,
            "select",
            vec![p::int(), fd_set(), fd_set(), fd_set(), timeval()],
        ),
        def(230, "poll", vec![pollfd_array(1), p::unsigned(), p::int()]),
        def(
            312,
            "pselect",
            vec![p::int(), fd_set(), fd_set(), fd_set(), p::timespec(), p::pointer()],
        ),
        def(
            407,
            "__select_nocancel",
            vec![p::int(), fd_set(), fd_set(), fd_set(), timeval()],
        ),
        def(
            417,
            "__pselect_nocancel",
            vec![p::int(), fd_set(), fd_set(), fd_set(), p::timespec(), p::pointer()],
        ),
        def(
            427,
            "__poll_nocancel",
            vec![pollfd_array(1), p::unsigned(), p::int()],
        ),
        // System V IPC
        def(
            251,
            "semsys",
            vec![p::int(), p::int(), p::int(), p::int(), p::int()],
        ),
        def(
            252,
            "msgsys",
            vec![p::int(), p::int(), p::int(), p::int(), p::int()],
        ),
        def(253, "shmsys", vec![p::int(), p::int(), p::int(), p::int()]),
        def(
            254,
            "semctl",
            vec![
                p::int(),
                p::int(),
                p::constant(SEMCTL_COMMANDS),
                semid_ds(Out),
            ],
        )
        .variadic(3),
        def(255, "semget", vec![p::int(), p::int(), p::custom(decode_ipc_flags)]),
        def(256, "semop", vec![p::int(), sembuf(In), p::unsigned()]),
        def(
            258,
            "msgctl",
            vec![p::int(), p::constant(IPC_COMMANDS), msqid_ds(Out)],
        ),
        def(259, "msgget", vec![p::int(), p::custom(decode_ipc_flags)]),
        def(
            260,
            "msgsnd",
            vec![p::int(), p::pointer(), p::unsigned(), p::flags(MSGRCV_FLAGS)],
        ),
        def(
            261,
            "msgrcv",
            vec![p::int(), p::pointer(), p::unsigned(), p::int(), p::flags(MSGRCV_FLAGS)],
        ),
        def(262, "shmat", vec![p::int(), p::pointer(), p::flags(SHM_FLAGS)])
            .returns(ret_pointer),
        def(
            263,
            "shmctl",
            vec![p::int(), p::constant(IPC_COMMANDS), shmid_ds(Out)],
        ),
        def(264, "shmdt", vec![p::pointer()]),
        def(265, "shmget", vec![p::int(), p::unsigned(), p::custom(decode_ipc_flags)]),
        // POSIX semaphores
        def(271, "sem_wait", vec![p::pointer()]),
        def(272, "sem_trywait", vec![p::pointer()]),
        def(273, "sem_post", vec![p::pointer()]),
        def(420, "__sem_wait_nocancel", vec![p::pointer()]),
        // Async I/O
        def(314, "aio_return", vec![aiocb(In)]),
        def(
            315,
            "aio_suspend",
            vec![aiocb_array(1, In), p::int(), p::timespec()],
        ),
        def(316, "aio_cancel", vec![p::fd(), aiocb(In)]),
        def(317, "aio_error", vec![aiocb(In)]),
        def(318, "aio_read", vec![aiocb(In)]),
        def(319, "aio_write", vec![aiocb(In)]),
        def(
            320,
            "lio_listio",
            vec![
                p::constant(LIO_MODES),
                aiocb_array(2, In),
                p::int(),
                sigevent(In),
            ],
        ),
        def(
            421,
            "__aio_suspend_nocancel",
            vec![aiocb_array(1, In), p::int(), p::timespec()],
        ),
        // kqueue
        def(362, "kqueue", vec![]),
        def(
            363,
            "kevent",
            vec![
                p::fd(),
                kevent_array(2, In),
                p::int(),
                kevent_array(4, Out),
                p::int(),
                p::timespec(),
            ],
        ),
        def(
            369,
            "kevent64",
            vec![
                p::fd(),
                kevent64_array(2, In),
                p::int(),
                kevent64_array(4, Out),
                p::int(),
                p::unsigned(),
                p::timespec(),
            ],
        ),
        def(
            374,
            "kevent_qos",
            vec![
                p::fd(),
                kevent64_array(2, In),
                p::int(),
                kevent64_array(4, Out),
                p::int(),
                p::pointer(),
                p::pointer(),
                p::unsigned(),
            ],
        ),
        def(
            375,
            "kevent_id",
            vec![
                p::unsigned(),
                kevent64_array(2, In),
                p::int(),
                kevent64_array(4, Out),
                p::int(),
                p::pointer(),
                p::pointer(),
                p::unsigned(),
            ],
        ),
        def(443, "guarded_kqueue_np", vec![p::pointer(), p::int()]),
        def(516, "ulock_wake", vec![p::unsigned(), p::pointer(), p::unsigned()]),
        def(
            530,
            "kqueue_workloop_ctl",
            vec![p::pointer(), p::unsigned(), p::pointer(), p::unsigned()],
        ),
        // pthread synchronization
        def(
            306,
            "psynch_rw_rdlock",
            vec![p::pointer(), p::unsigned(), p::unsigned(), p::unsigned(), p::int()],
        ),
        def(
            307,
            "psynch_rw_wrlock",
            vec![p::pointer(), p::unsigned(), p::unsigned(), p::unsigned(), p::int()],
        ),
        def(
            308,
            "psynch_rw_unlock",
            vec![p::pointer(), p::unsigned(), p::unsigned(), p::unsigned(), p::int()],
        ),
        def(
            305,
            "psynch_cvwait",
            vec![
                p::pointer(),
                p::unsigned(),
                p::unsigned(),
                p::pointer(),
                p::unsigned(),
                p::unsigned(),
                p::unsigned(),
                p::unsigned(),
            ],
        ),
        def(
            303,
            "psynch_cvbroad",
            vec![
                p::pointer(),
                p::unsigned(),
                p::unsigned(),
                p::pointer(),
                p::unsigned(),
                p::unsigned(),
                p::unsigned(),
                p::unsigned(),
            ],
        ),
        def(
            304,
            "psynch_cvsignal",
            vec![
                p::pointer(),
                p::unsigned(),
                p::unsigned(),
                p::pointer(),
                p::unsigned(),
                p::unsigned(),
                p::unsigned(),
                p::unsigned(),
            ],
        ),
        def(
            301,
            "psynch_mutexwait",
            vec![p::pointer(), p::unsigned(), p::unsigned(), p::unsigned(), p::unsigned()],
        ),
        def(
            302,
            "psynch_mutexdrop",
            vec![p::pointer(), p::unsigned(), p::unsigned(), p::unsigned(), p::unsigned()],
        ),
        // non-cancelable System V wrappers
        def(
            418,
            "__msgsnd_nocancel",
            vec![p::int(), p::pointer(), p::unsigned(), p::flags(MSGRCV_FLAGS)],
        ),
        def(
            419,
            "__msgrcv_nocancel",
            vec![p::int(), p::pointer(), p::unsigned(), p::int(), p::flags(MSGRCV_FLAGS)],
        ),
    ]
}
