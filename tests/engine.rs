// End-to-end engine tests against a scripted debugger session.
// Each test replays a recorded stop sequence (entry breakpoint, return
// breakpoint) over a fake target memory and checks the emitted lines.

use std::fs;
use std::path::PathBuf;

use strace_macos::debug::script::{ScriptedSession, ScriptedStop};
use strace_macos::tracer::{TraceOptions, Tracer};

const TRIPLE: &str = "arm64-apple-macosx14.0.0";
const RET_PC: u64 = 0x9000;

fn temp_out(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("strace_macos_test_{}_{}", std::process::id(), name))
}

fn run_trace(opts_name: &str, mut session: ScriptedSession, opts: TraceOptions) -> Vec<String> {
    let path = temp_out(opts_name);
    let opts = TraceOptions {
        output_file: Some(path.clone()),
        ..opts
    };
    let mut tracer = Tracer::new(opts).expect("tracer setup");
    let code = tracer
        .spawn(&mut session, &["test-prog".to_string()])
        .expect("trace run");
    assert_eq!(code, 0);
    assert_eq!(tracer.pending_count(), 0, "orphan pending events");

    let contents = fs::read_to_string(&path).expect("trace output");
    let _ = fs::remove_file(&path);
    contents.lines().map(str::to_string).collect()
}

/// Entry stop followed by its return stop on the same thread.
fn call(
    session: &mut ScriptedSession,
    thread: u64,
    name: &str,
    regs: &[(&str, u64)],
    ret: u64,
    ret_pc: u64,
) {
    let mut entry = ScriptedStop::new(thread, 0x100, Some(name)).with_register("lr", ret_pc);
    for (reg, value) in regs {
        entry = entry.with_register(reg, *value);
    }
    session.push_stop(entry);
    session.push_stop(ScriptedStop::new(thread, ret_pc, None).with_register("x0", ret));
}

#[test]
fn open_missing_file_decodes_errno() {
    let mut session = ScriptedSession::new(TRIPLE, 100);
    session.memory.put_cstr(0x1000, "/no/such/file");
    session.memory.put_u64(0x7000, 0); // variadic slot for the absent mode
    let entry = ScriptedStop::new(1, 0x100, Some("open"))
        .with_register("x0", 0x1000)
        .with_register("x1", 0) // O_RDONLY
        .with_register("sp", 0x7000)
        .with_register("lr", RET_PC);
    session.push_stop(entry);
    session.push_stop(ScriptedStop::new(1, RET_PC, None).with_register("x0", (-2i64) as u64));

    let lines = run_trace("open_enoent", session, TraceOptions::default());
    assert_eq!(
        lines,
        vec!["open(\"/no/such/file\", O_RDONLY) = -1 ENOENT (No such file or directory)"]
    );
}

#[test]
fn open_missing_file_no_abbrev() {
    let mut session = ScriptedSession::new(TRIPLE, 100);
    session.memory.put_cstr(0x1000, "/no/such/file");
    session.memory.put_u64(0x7000, 0);
    let entry = ScriptedStop::new(1, 0x100, Some("open"))
        .with_register("x0", 0x1000)
        .with_register("x1", 0)
        .with_register("sp", 0x7000)
        .with_register("lr", RET_PC);
    session.push_stop(entry);
    session.push_stop(ScriptedStop::new(1, RET_PC, None).with_register("x0", (-2i64) as u64));

    let opts = TraceOptions {
        no_abbrev: true,
        ..TraceOptions::default()
    };
    let lines = run_trace("open_no_abbrev", session, opts);
    assert_eq!(lines, vec!["open(\"/no/such/file\", 0x0) = -2"]);
}

#[test]
fn openat_with_creat_shows_mode() {
    let mut session = ScriptedSession::new(TRIPLE, 100);
    session.memory.put_cstr(0x1000, "/tmp/s1");
    session.memory.put_u64(0x7000, 0o644); // mode on the stack
    let entry = ScriptedStop::new(1, 0x100, Some("openat"))
        .with_register("x0", (-2i64) as u64) // AT_FDCWD
        .with_register("x1", 0x1000)
        .with_register("x2", 0x601) // O_WRONLY|O_CREAT|O_TRUNC
        .with_register("sp", 0x7000)
        .with_register("lr", RET_PC);
    session.push_stop(entry);
    session.push_stop(ScriptedStop::new(1, RET_PC, None).with_register("x0", 3));

    let lines = run_trace("openat_creat", session, TraceOptions::default());
    assert_eq!(
        lines,
        vec!["openat(AT_FDCWD, \"/tmp/s1\", O_WRONLY|O_CREAT|O_TRUNC, 0644) = 3"]
    );
}

#[test]
fn read_decodes_buffer_at_exit() {
    let mut session = ScriptedSession::new(TRIPLE, 100);
    session.memory.put(0x2000, b"hello\nworld");
    call(
        &mut session,
        1,
        "read",
        &[("x0", 3), ("x1", 0x2000), ("x2", 11)],
        11,
        RET_PC,
    );

    let lines = run_trace("read_buffer", session, TraceOptions::default());
    assert_eq!(lines, vec!["read(3, \"hello\\nworld\", 11) = 11"]);
}

#[test]
fn read_uses_raw_args_saved_at_entry() {
    let mut session = ScriptedSession::new(TRIPLE, 100);
    session.memory.put(0x2000, b"payload");
    let entry = ScriptedStop::new(1, 0x100, Some("read"))
        .with_register("x0", 3)
        .with_register("x1", 0x2000)
        .with_register("x2", 7)
        .with_register("lr", RET_PC);
    session.push_stop(entry);
    // Argument registers are clobbered by return time; x1 now points at
    // unmapped memory. The decode must use the pointer saved at entry.
    session.push_stop(
        ScriptedStop::new(1, RET_PC, None)
            .with_register("x0", 7)
            .with_register("x1", 0xdead0000)
            .with_register("x2", 0),
    );

    let lines = run_trace("raw_args_saved", session, TraceOptions::default());
    assert_eq!(lines, vec!["read(3, \"payload\", 7) = 7"]);
}

#[test]
fn writev_decodes_iovecs() {
    let mut session = ScriptedSession::new(TRIPLE, 100);
    session.memory.put(0x5000, b"First ");
    session.memory.put(0x5100, b"Second ");
    session.memory.put(0x5200, b"Third");
    session.memory.put_u64(0x4000, 0x5000);
    session.memory.put_u64(0x4008, 6);
    session.memory.put_u64(0x4010, 0x5100);
    session.memory.put_u64(0x4018, 7);
    session.memory.put_u64(0x4020, 0x5200);
    session.memory.put_u64(0x4028, 5);
    call(
        &mut session,
        1,
        "writev",
        &[("x0", 3), ("x1", 0x4000), ("x2", 3)],
        18,
        RET_PC,
    );

    let lines = run_trace("writev", session, TraceOptions::default());
    assert_eq!(
        lines,
        vec![
            "writev(3, [{iov_base=\"First \", iov_len=6}, {iov_base=\"Second \", iov_len=7}, \
             {iov_base=\"Third\", iov_len=5}], 3) = 18"
        ]
    );
}

#[test]
fn fcntl_arity_follows_command() {
    let mut session = ScriptedSession::new(TRIPLE, 100);
    session.memory.put_u64(0x7000, 0);
    // fcntl(3, F_GETFD): no third argument
    let getfd = ScriptedStop::new(1, 0x100, Some("fcntl"))
        .with_register("x0", 3)
        .with_register("x1", 1)
        .with_register("sp", 0x7000)
        .with_register("lr", RET_PC);
    session.push_stop(getfd);
    session.push_stop(ScriptedStop::new(1, RET_PC, None).with_register("x0", 0));
    // fcntl(3, F_SETFD, FD_CLOEXEC)
    session.memory.put_u64(0x7100, 1);
    let setfd = ScriptedStop::new(1, 0x100, Some("fcntl"))
        .with_register("x0", 3)
        .with_register("x1", 2)
        .with_register("sp", 0x7100)
        .with_register("lr", 0x9100);
    session.push_stop(setfd);
    session.push_stop(ScriptedStop::new(1, 0x9100, None).with_register("x0", 0));

    let lines = run_trace("fcntl", session, TraceOptions::default());
    assert_eq!(
        lines,
        vec![
            "fcntl(3, F_GETFD) = 0",
            "fcntl(3, F_SETFD, FD_CLOEXEC) = 0",
        ]
    );
}

#[test]
fn bind_decodes_sockaddr_in() {
    let mut session = ScriptedSession::new(TRIPLE, 100);
    let sockaddr = [16u8, 2, 0, 0, 127, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0];
    session.memory.put(0x3000, &sockaddr);
    call(
        &mut session,
        1,
        "bind",
        &[("x0", 4), ("x1", 0x3000), ("x2", 16)],
        0,
        RET_PC,
    );

    let lines = run_trace("bind", session, TraceOptions::default());
    assert_eq!(
        lines,
        vec![
            "bind(4, {sa_family=AF_INET, sin_port=htons(0), sin_addr=inet_addr(\"127.0.0.1\")}, 16) = 0"
        ]
    );
}

#[test]
fn sysctlbyname_decodes_buffer_and_size() {
    let mut session = ScriptedSession::new(TRIPLE, 100);
    session.memory.put_cstr(0x1000, "kern.ostype");
    session.memory.put_cstr(0x2000, "Darwin");
    session.memory.put_u64(0x3000, 7);
    call(
        &mut session,
        1,
        "sysctlbyname",
        &[
            ("x0", 0x1000),
            ("x1", 0x2000),
            ("x2", 0x3000),
            ("x3", 0),
            ("x4", 0),
        ],
        0,
        RET_PC,
    );

    let lines = run_trace("sysctlbyname", session, TraceOptions::default());
    assert_eq!(
        lines,
        vec!["sysctlbyname(\"kern.ostype\", \"Darwin\", [7], 0x0, 0) = 0"]
    );
}

#[test]
fn filter_by_name_suppresses_other_syscalls() {
    let mut session = ScriptedSession::new(TRIPLE, 100);
    session.memory.put_cstr(0x1000, "/tmp/f");
    session.memory.put_u64(0x7000, 0);
    let open = ScriptedStop::new(1, 0x100, Some("open"))
        .with_register("x0", 0x1000)
        .with_register("x1", 0)
        .with_register("sp", 0x7000)
        .with_register("lr", RET_PC);
    session.push_stop(open);
    session.push_stop(ScriptedStop::new(1, RET_PC, None).with_register("x0", 3));
    session.memory.put(0x2000, b"x");
    call(
        &mut session,
        1,
        "write",
        &[("x0", 3), ("x1", 0x2000), ("x2", 1)],
        1,
        0x9200,
    );
    call(&mut session, 1, "close", &[("x0", 3)], 0, 0x9300);

    let opts = TraceOptions {
        filter: Some("trace=open,close".to_string()),
        ..TraceOptions::default()
    };
    let lines = run_trace("filter_names", session, opts);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("open("));
    assert!(lines[1].starts_with("close("));
}

#[test]
fn filter_by_category() {
    let mut session = ScriptedSession::new(TRIPLE, 100);
    call(
        &mut session,
        1,
        "socket",
        &[("x0", 2), ("x1", 1), ("x2", 0)],
        4,
        RET_PC,
    );
    call(&mut session, 1, "close", &[("x0", 4)], 0, 0x9100);

    let opts = TraceOptions {
        filter: Some("trace=network".to_string()),
        ..TraceOptions::default()
    };
    let lines = run_trace("filter_category", session, opts);
    assert_eq!(lines, vec!["socket(AF_INET, SOCK_STREAM, IPPROTO_IP) = 4"]);
}

#[test]
fn invalid_filter_is_setup_error() {
    let opts = TraceOptions {
        filter: Some("open,close".to_string()),
        ..TraceOptions::default()
    };
    assert!(Tracer::new(opts).is_err());
}

#[test]
fn threads_pair_independently() {
    let mut session = ScriptedSession::new(TRIPLE, 100);
    session.memory.put(0x2000, b"abc");
    // Both threads enter before either returns
    let t1_entry = ScriptedStop::new(1, 0x100, Some("read"))
        .with_register("x0", 3)
        .with_register("x1", 0x2000)
        .with_register("x2", 3)
        .with_register("lr", 0x9100);
    let t2_entry = ScriptedStop::new(2, 0x100, Some("close"))
        .with_register("x0", 5)
        .with_register("lr", 0x9200);
    session.push_stop(t1_entry);
    session.push_stop(t2_entry);
    session.push_stop(ScriptedStop::new(2, 0x9200, None).with_register("x0", 0));
    session.push_stop(ScriptedStop::new(1, 0x9100, None).with_register("x0", 3));

    let lines = run_trace("threads", session, TraceOptions::default());
    // Emission follows stop delivery order: thread 2's close returns first
    assert_eq!(lines, vec!["close(5) = 0", "read(3, \"abc\", 3) = 3"]);
}

#[test]
fn unresolved_return_address_degrades_to_question_mark() {
    let mut session = ScriptedSession::new(TRIPLE, 100);
    // Entry stop with no lr register: return address unrecoverable
    let entry = ScriptedStop::new(1, 0x100, Some("close")).with_register("x0", 3);
    session.push_stop(entry);

    let lines = run_trace("no_return_addr", session, TraceOptions::default());
    assert_eq!(lines, vec!["close(3) = ?"]);
}

#[test]
fn unknown_functions_are_ignored() {
    let mut session = ScriptedSession::new(TRIPLE, 100);
    session.push_stop(ScriptedStop::new(1, 0x100, Some("objc_msgSend")));
    call(&mut session, 1, "close", &[("x0", 3)], 0, RET_PC);

    let lines = run_trace("unknown_fn", session, TraceOptions::default());
    assert_eq!(lines, vec!["close(3) = 0"]);
}

#[test]
fn json_output_one_object_per_line() {
    let mut session = ScriptedSession::new(TRIPLE, 100);
    session.memory.put(0x2000, b"hi");
    call(
        &mut session,
        1,
        "read",
        &[("x0", 3), ("x1", 0x2000), ("x2", 2)],
        2,
        RET_PC,
    );

    let opts = TraceOptions {
        json: true,
        ..TraceOptions::default()
    };
    let lines = run_trace("json", session, opts);
    assert_eq!(lines.len(), 1);
    let parsed: serde_json::Value = serde_json::from_str(&lines[0]).expect("valid json");
    assert_eq!(parsed["syscall"], "read");
    assert_eq!(parsed["args"][0], 3);
    assert_eq!(parsed["args"][1], "hi");
    assert_eq!(parsed["args"][2], 2);
    assert_eq!(parsed["return"], 2);
    assert_eq!(parsed["pid"], 100);
    assert!(parsed["timestamp"].is_f64());
}

#[test]
fn summary_mode_emits_table_only() {
    let mut session = ScriptedSession::new(TRIPLE, 100);
    call(&mut session, 1, "close", &[("x0", 3)], 0, RET_PC);
    call(&mut session, 1, "close", &[("x0", 4)], 0, 0x9100);
    session.memory.put_cstr(0x1000, "/nope");
    session.memory.put_u64(0x7000, 0);
    let open = ScriptedStop::new(1, 0x100, Some("open"))
        .with_register("x0", 0x1000)
        .with_register("x1", 0)
        .with_register("sp", 0x7000)
        .with_register("lr", 0x9200);
    session.push_stop(open);
    session.push_stop(ScriptedStop::new(1, 0x9200, None).with_register("x0", (-2i64) as u64));

    let opts = TraceOptions {
        summary_only: true,
        ..TraceOptions::default()
    };
    let lines = run_trace("summary", session, opts);
    assert_eq!(lines[0], "% time     calls      errors syscall");
    let close_row = lines.iter().find(|l| l.ends_with("close")).expect("close row");
    assert!(close_row.contains("66.67"));
    let open_row = lines.iter().find(|l| l.ends_with("open")).expect("open row");
    assert!(open_row.contains("33.33"));
    assert!(open_row.contains('1'));
    assert!(lines.iter().any(|l| l.contains("total")));
    // No per-event lines
    assert!(!lines.iter().any(|l| l.contains("close(")));
}

#[test]
fn breakpoints_installed_for_whole_catalog() {
    let mut session = ScriptedSession::new(TRIPLE, 100);
    call(&mut session, 1, "close", &[("x0", 3)], 0, RET_PC);

    let path = temp_out("breakpoints");
    let opts = TraceOptions {
        output_file: Some(path.clone()),
        ..TraceOptions::default()
    };
    let mut tracer = Tracer::new(opts).expect("tracer setup");
    tracer
        .spawn(&mut session, &["test-prog".to_string()])
        .expect("trace run");
    let _ = fs::remove_file(&path);

    assert!(session.named_breakpoints.len() > 300);
    assert!(session.named_breakpoints.iter().any(|n| n == "open"));
    assert!(session
        .named_breakpoints
        .iter()
        .any(|n| n == "__read_nocancel"));
    // One-shot return breakpoint was requested at the entry's lr
    assert_eq!(session.oneshot_breakpoints, vec![RET_PC]);
}

#[test]
fn x86_64_reads_return_address_from_stack() {
    let mut session = ScriptedSession::new("x86_64-apple-macosx14.0.0", 100);
    // Return address sits at [rsp]
    session.memory.put_u64(0x7000, RET_PC);
    let entry = ScriptedStop::new(1, 0x100, Some("close"))
        .with_register("rdi", 3)
        .with_register("rsp", 0x7000);
    session.push_stop(entry);
    session.push_stop(ScriptedStop::new(1, RET_PC, None).with_register("rax", 0));

    let lines = run_trace("x86_64", session, TraceOptions::default());
    assert_eq!(lines, vec!["close(3) = 0"]);
}
