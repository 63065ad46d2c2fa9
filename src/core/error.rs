use thiserror::Error;

/// User-facing tracer errors
///
/// Every variant maps to a plain stderr message and exit code 1; stack
/// traces are reserved for bugs.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("Binary not found: {0}")]
    BinaryNotFound(String),

    #[error("{0}")]
    SipProtected(String),

    #[error("Failed to create target for: {0}")]
    TargetCreation(String),

    #[error("Unsupported architecture: {0}")]
    UnsupportedArchitecture(String),

    #[error("Failed to launch process: {0}")]
    ProcessLaunch(String),

    #[error("Failed to attach to process {0}")]
    ProcessAttach(i32),

    #[error("Invalid filter expression: {0}")]
    InvalidFilter(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("No debugger backend available: {0}")]
    BackendUnavailable(String),
}
