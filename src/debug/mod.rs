// Debugger contract
// The tracer drives a debugger through these traits; the LLDB-backed
// implementation lives behind the `lldb-backend` feature, the scripted
// in-memory implementation in `script` backs the test-suite.

use std::path::Path;

use thiserror::Error;

use crate::core::error::TraceError;

#[cfg(all(target_os = "macos", feature = "lldb-backend"))]
pub mod lldb;
pub mod script;

/// Errors surfaced by a debugger backend.
///
/// Memory-read failures are ordinary decoder events and never abort a trace;
/// the remaining variants only occur during setup.
#[derive(Debug, Error)]
pub enum DebugError {
    #[error("memory read of {len} bytes at 0x{address:x} failed")]
    MemoryRead { address: u64, len: usize },

    #[error("breakpoint installation failed for {0}")]
    Breakpoint(String),

    #[error("{0}")]
    Backend(String),
}

/// State of the traced process as reported by the debugger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    Running,
    Stopped,
    Exited,
    Crashed,
    Detached,
    Unloaded,
}

/// Cross-process memory reads.
///
/// Split out of [`DebugSession`] so decoders depend only on the capability
/// they use.
pub trait Memory {
    /// Read exactly `len` bytes at `address` from the target.
    fn read_memory(&self, address: u64, len: usize) -> Result<Vec<u8>, DebugError>;
}

/// The frame the target stopped in.
#[derive(Debug, Clone)]
pub struct StopFrame {
    pub thread_id: u64,
    pub pc: u64,
    pub function: Option<String>,
}

/// One debugging session: a debugger with a single target process.
///
/// The session is driven synchronously from the tracer's main loop; `state`
/// blocks only in the backend's own bookkeeping, never on the target.
pub trait DebugSession: Memory {
    /// Target triple (e.g. `arm64-apple-macosx14.0.0`); first component
    /// selects the architecture adapter.
    fn triple(&self) -> String;

    /// Process id of the target.
    fn pid(&self) -> i32;

    /// Launch the target executable with arguments and extra environment.
    fn launch(
        &mut self,
        args: &[String],
        env: &[(String, String)],
        cwd: &Path,
    ) -> Result<(), DebugError>;

    /// Attach to a running process by pid.
    fn attach(&mut self, pid: i32) -> Result<(), DebugError>;

    /// Install a breakpoint on every symbol with the given name.
    fn breakpoint_by_name(&mut self, symbol: &str) -> Result<(), DebugError>;

    /// Install a one-shot breakpoint at an address; removed after first hit.
    fn oneshot_breakpoint(&mut self, address: u64) -> Result<(), DebugError>;

    /// Current process state.
    fn state(&mut self) -> ProcessState;

    /// Exit status once `state` reports [`ProcessState::Exited`].
    fn exit_status(&self) -> i32;

    /// Resume the stopped target.
    fn resume(&mut self) -> Result<(), DebugError>;

    /// Detach from the target, leaving it running.
    fn detach(&mut self) -> Result<(), DebugError>;

    /// The thread and frame that caused the current stop, if any.
    fn stop_frame(&self) -> Option<StopFrame>;

    /// Read a register of the stopped frame by name (`x0`, `rdi`, ...).
    fn read_register(&self, name: &str) -> Option<u64>;

    /// View of the session as plain target memory, for decoders.
    fn memory(&self) -> &dyn Memory;
}

/// Create the platform debugger session.
///
/// Only the LLDB backend can produce a real session; builds without it get a
/// setup error telling the operator how to enable it.
#[cfg(all(target_os = "macos", feature = "lldb-backend"))]
pub fn platform_session(executable: Option<&Path>) -> Result<Box<dyn DebugSession>, TraceError> {
    lldb::LldbSession::create(executable).map(|s| Box::new(s) as Box<dyn DebugSession>)
}

#[cfg(not(all(target_os = "macos", feature = "lldb-backend")))]
pub fn platform_session(_executable: Option<&Path>) -> Result<Box<dyn DebugSession>, TraceError> {
    Err(TraceError::BackendUnavailable(
        "this build has no LLDB backend; rebuild on macOS with `--features lldb-backend`".into(),
    ))
}
