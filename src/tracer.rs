// Syscall tracer engine
// A small state machine over the debugger: entry breakpoints capture raw
// arguments, one-shot return breakpoints complete the event.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::arch::{self, Arch};
use crate::core::error::TraceError;
use crate::debug::{DebugSession, ProcessState};
use crate::format::{
    ColorTextFormatter, Formatter, JsonFormatter, SummaryFormatter, SyscallEvent, TextFormatter,
};
use crate::interpose;
use crate::syscalls::args::{ArgValue, RetValue};
use crate::syscalls::category::Category;
use crate::syscalls::defs::SyscallDef;
use crate::syscalls::params::{DecodeCtx, Scratch};
use crate::syscalls::registry::{SyscallRegistry, REGISTRY};
use crate::syscalls::symbols::decode_errno;

/// Tracer configuration, straight from the CLI flags.
#[derive(Debug, Default, Clone)]
pub struct TraceOptions {
    pub output_file: Option<PathBuf>,
    pub json: bool,
    pub summary_only: bool,
    pub filter: Option<String>,
    pub no_abbrev: bool,
}

enum Filter {
    All,
    Names(Vec<String>),
    Category(Category),
}

/// A syscall seen at entry and waiting for its return breakpoint.
struct Pending {
    def: &'static SyscallDef,
    pid: i32,
    args: Vec<ArgValue>,
    raw_args: Vec<u64>,
    scratch: Scratch,
    timestamp: f64,
}

enum Sink {
    Stderr(io::Stderr),
    File(File),
}

impl Sink {
    fn is_file(&self) -> bool {
        matches!(self, Sink::File(_))
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        match self {
            Sink::Stderr(err) => writeln!(err, "{}", line),
            Sink::File(file) => writeln!(file, "{}", line),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Stderr(err) => err.flush(),
            Sink::File(file) => file.flush(),
        }
    }
}

// SIGINT during attach sets this; the trace loop notices and detaches.
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

extern "C" fn sigint_handler(_: nix::libc::c_int) {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

fn install_sigint_handler() -> Option<nix::sys::signal::SigAction> {
    use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};
    let action = SigAction::new(
        SigHandler::Handler(sigint_handler),
        SaFlags::empty(),
        SigSet::empty(),
    );
    unsafe { sigaction(Signal::SIGINT, &action).ok() }
}

fn restore_sigint_handler(old: nix::sys::signal::SigAction) {
    use nix::sys::signal::{sigaction, Signal};
    let _ = unsafe { sigaction(Signal::SIGINT, &old) };
}

pub struct Tracer {
    opts: TraceOptions,
    filter: Filter,
    pending: HashMap<(u64, u64), Pending>,
    summary: SummaryFormatter,
    formatter: Box<dyn Formatter>,
    sink: Sink,
    arch: Option<Box<dyn Arch>>,
}

impl Tracer {
    pub fn new(opts: TraceOptions) -> Result<Self, TraceError> {
        let filter = match &opts.filter {
            Some(expr) => parse_filter(expr)?,
            None => Filter::All,
        };

        let sink = match &opts.output_file {
            Some(path) => Sink::File(
                File::create(path)
                    .map_err(|e| TraceError::InvalidCommand(format!("{}: {}", path.display(), e)))?,
            ),
            None => Sink::Stderr(io::stderr()),
        };

        // Color only for a terminal, and never for JSON
        let use_color = !opts.json && !sink.is_file() && io::stderr().is_terminal();
        let formatter: Box<dyn Formatter> = if opts.json {
            Box::new(JsonFormatter)
        } else if use_color {
            Box::new(ColorTextFormatter)
        } else {
            Box::new(TextFormatter)
        };

        Ok(Self {
            opts,
            filter,
            pending: HashMap::new(),
            summary: SummaryFormatter::new(),
            formatter,
            sink,
            arch: None,
        })
    }

    /// Spawn `command` under the debugger and trace it to completion.
    /// Returns the traced process's exit code.
    pub fn spawn(&mut self, session: &mut dyn DebugSession, command: &[String]) -> Result<i32> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| TraceError::InvalidCommand("command cannot be empty".into()))?;

        self.detect_arch(session)?;
        self.install_breakpoints(session);

        let env = interpose::child_stop_env().unwrap_or_else(|e| {
            warn!("fork following disabled: {}", e);
            Vec::new()
        });
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        session
            .launch(args, &env, &cwd)
            .map_err(|e| TraceError::ProcessLaunch(format!("{}: {}", program, e)))?;

        let exit_code = self.trace_loop(session);
        self.finish()?;
        Ok(exit_code)
    }

    /// Attach to a running process and trace until Ctrl-C.
    pub fn attach(&mut self, session: &mut dyn DebugSession, pid: i32) -> Result<i32> {
        if pid <= 0 {
            return Err(TraceError::ProcessAttach(pid).into());
        }

        session
            .attach(pid)
            .map_err(|_| TraceError::ProcessAttach(pid))?;
        self.detect_arch(session)?;
        self.install_breakpoints(session);

        INTERRUPTED.store(false, Ordering::SeqCst);
        let old_handler = install_sigint_handler();

        let _ = session.resume();
        let exit_code = self.trace_loop(session);
        let _ = session.detach();

        if let Some(old) = old_handler {
            restore_sigint_handler(old);
        }

        self.finish()?;
        Ok(exit_code)
    }

    fn detect_arch(&mut self, session: &dyn DebugSession) -> Result<(), TraceError> {
        let triple = session.triple();
        self.arch =
            Some(arch::detect(&triple).ok_or(TraceError::UnsupportedArchitecture(triple))?);
        Ok(())
    }

    /// One breakpoint per registered syscall name. The debugger matches all
    /// symbols with that name, so the nocancel wrappers listed in the
    /// catalog come along for free.
    fn install_breakpoints(&self, session: &mut dyn DebugSession) {
        for def in REGISTRY.iter_all() {
            if let Err(e) = session.breakpoint_by_name(def.name) {
                debug!(syscall = def.name, "breakpoint installation failed: {}", e);
            }
        }
    }

    fn should_trace(&self, def: &SyscallDef) -> bool {
        match &self.filter {
            Filter::All => true,
            Filter::Names(names) => names.iter().any(|n| n == def.name),
            Filter::Category(category) => def.category == *category,
        }
    }

    fn trace_loop(&mut self, session: &mut dyn DebugSession) -> i32 {
        loop {
            if INTERRUPTED.load(Ordering::SeqCst) {
                return 0;
            }
            match session.state() {
                ProcessState::Exited => return session.exit_status(),
                ProcessState::Stopped => {
                    self.handle_stop(session);
                    if !INTERRUPTED.load(Ordering::SeqCst) {
                        let _ = session.resume();
                    }
                }
                ProcessState::Crashed | ProcessState::Detached | ProcessState::Unloaded => {
                    return 1;
                }
                ProcessState::Running => {
                    std::thread::sleep(Duration::from_millis(10));
                }
            }
        }
    }

    fn handle_stop(&mut self, session: &mut dyn DebugSession) {
        let Some(frame) = session.stop_frame() else {
            return;
        };

        let key = (frame.thread_id, frame.pc);
        if self.pending.contains_key(&key) {
            self.handle_return(session, key);
            return;
        }

        let Some(function) = frame.function else {
            return;
        };
        let Some(def) = resolve_syscall(&function) else {
            return;
        };
        if !self.should_trace(def) {
            return;
        }
        self.handle_entry(session, def, frame.thread_id);
    }

    /// Capture raw argument values, decode IN parameters, install the
    /// return breakpoint and remember the pending event.
    fn handle_entry(
        &mut self,
        session: &mut dyn DebugSession,
        def: &'static SyscallDef,
        thread_id: u64,
    ) {
        let Some(arch) = self.arch.as_ref() else {
            return;
        };
        let arg_registers = arch.arg_registers();

        // Raw values are captured once: argument registers are caller-saved
        // and worthless by the time the call returns.
        let mut raw_args: Vec<u64> = Vec::with_capacity(def.params.len());
        let mut missing: Vec<bool> = Vec::with_capacity(def.params.len());
        for i in 0..def.params.len() {
            let value = match def.variadic_start {
                Some(start) if i >= start => arch.read_variadic(session, i - start),
                _ => arg_registers
                    .get(i)
                    .and_then(|reg| session.read_register(reg)),
            };
            missing.push(value.is_none());
            raw_args.push(value.unwrap_or(0));
        }

        let mut scratch = Scratch::default();
        let args = decode_args(
            def,
            session,
            &raw_args,
            &missing,
            &mut scratch,
            self.opts.no_abbrev,
            true,
            None,
        );

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        let pid = session.pid();

        let Some(return_address) = arch.return_address(session) else {
            // No way to pair this entry with its exit
            self.emit(SyscallEvent {
                pid,
                name: def.name.to_string(),
                args,
                retval: RetValue::Sym("?".to_string()),
                timestamp,
            });
            return;
        };

        if let Err(e) = session.oneshot_breakpoint(return_address) {
            debug!(syscall = def.name, "return breakpoint failed: {}", e);
            self.emit(SyscallEvent {
                pid,
                name: def.name.to_string(),
                args,
                retval: RetValue::Sym("?".to_string()),
                timestamp,
            });
            return;
        }

        self.pending.insert(
            (thread_id, return_address),
            Pending {
                def,
                pid,
                args,
                raw_args,
                scratch,
                timestamp,
            },
        );
    }

    /// Complete a pending event: decode the return value and re-run the OUT
    /// parameter decoders against the raw values saved at entry.
    fn handle_return(&mut self, session: &mut dyn DebugSession, key: (u64, u64)) {
        let Some(mut pending) = self.pending.remove(&key) else {
            return;
        };
        let Some(arch) = self.arch.as_ref() else {
            return;
        };

        let retval = match session.read_register(arch.return_register()) {
            Some(raw) => {
                let ret = raw as i64;
                let decoded = match pending.def.return_decoder {
                    Some(decoder) => decoder(ret, &pending.raw_args, self.opts.no_abbrev),
                    None if ret < 0 && !self.opts.no_abbrev => RetValue::Sym(decode_errno(ret)),
                    None => RetValue::Int(ret),
                };

                if ret >= 0 {
                    let missing = vec![false; pending.raw_args.len()];
                    let exit_args = decode_args(
                        pending.def,
                        session,
                        &pending.raw_args,
                        &missing,
                        &mut pending.scratch,
                        self.opts.no_abbrev,
                        false,
                        Some(ret),
                    );
                    for (slot, decoded_arg) in pending.args.iter_mut().zip(exit_args) {
                        if !matches!(decoded_arg, ArgValue::Unknown) {
                            *slot = decoded_arg;
                        }
                    }
                }
                decoded
            }
            None => RetValue::Sym("?".to_string()),
        };

        self.emit(SyscallEvent {
            pid: pending.pid,
            name: pending.def.name.to_string(),
            args: pending.args,
            retval,
            timestamp: pending.timestamp,
        });
    }

    fn emit(&mut self, event: SyscallEvent) {
        self.summary.add_event(&event);
        if self.opts.summary_only {
            return;
        }
        let line = self.formatter.format(&event);
        if self.sink.write_line(&line).is_ok() && self.sink.is_file() {
            // Keep file output visible to concurrent readers
            let _ = self.sink.flush();
        }
    }

    /// Write the summary table (in `-c` mode) and flush the sink.
    fn finish(&mut self) -> Result<()> {
        if self.opts.summary_only {
            let table = self.summary.format();
            for line in table.lines() {
                self.sink.write_line(line).context("writing summary")?;
            }
        }
        self.sink.flush().context("flushing output")?;
        Ok(())
    }

    /// Number of entries still waiting for their return breakpoint.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Summary statistics collected so far.
    pub fn summary(&self) -> &SummaryFormatter {
        &self.summary
    }
}

/// Resolve a stopped function name against the catalog, tolerating the
/// assembler-level underscore prefix.
fn resolve_syscall(function: &str) -> Option<&'static SyscallDef> {
    let registry: &'static SyscallRegistry = &REGISTRY;
    if let Some(def) = registry.lookup_by_name(function) {
        return Some(def);
    }
    function
        .strip_prefix('_')
        .and_then(|stripped| registry.lookup_by_name(stripped))
}

fn parse_filter(expr: &str) -> Result<Filter, TraceError> {
    let value = expr
        .strip_prefix("trace=")
        .ok_or_else(|| TraceError::InvalidFilter(expr.to_string()))?;
    if value.is_empty() {
        return Err(TraceError::InvalidFilter(expr.to_string()));
    }
    if let Ok(category) = value.parse::<Category>() {
        return Ok(Filter::Category(category));
    }
    Ok(Filter::Names(
        value.split(',').map(str::to_string).collect(),
    ))
}

/// Run every decoder of `def` over the saved raw values. Slots whose
/// register read failed decode as Unknown; a decoder returning None yields
/// Unknown at entry and "leave the entry-time value" at exit.
#[allow(clippy::too_many_arguments)]
fn decode_args(
    def: &SyscallDef,
    session: &dyn DebugSession,
    raw_args: &[u64],
    missing: &[bool],
    scratch: &mut Scratch,
    no_abbrev: bool,
    at_entry: bool,
    ret: Option<i64>,
) -> Vec<ArgValue> {
    let memory = session.memory();
    let mut decoded = Vec::with_capacity(def.params.len());
    for (i, param) in def.params.iter().enumerate() {
        if missing.get(i).copied().unwrap_or(true) {
            decoded.push(ArgValue::Unknown);
            continue;
        }
        let mut ctx = DecodeCtx {
            mem: memory,
            raw: raw_args[i],
            args: raw_args,
            ret,
            at_entry,
            no_abbrev,
            scratch: &mut *scratch,
        };
        decoded.push(param.decode(&mut ctx).unwrap_or(ArgValue::Unknown));
    }
    decoded
}
