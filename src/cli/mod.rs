// strace-macos CLI module
// Argument surface and dispatch into the tracer

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::core::error::TraceError;
use crate::debug;
use crate::sip;
use crate::tracer::{TraceOptions, Tracer};

/// Trace system calls on macOS through a debugger backend.
#[derive(Debug, Parser)]
#[command(name = "strace-macos", version, about = "Trace system calls on macOS")]
pub struct Cli {
    /// Write output to FILE instead of stderr
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output in JSON Lines format (default: strace-compatible text)
    #[arg(long)]
    pub json: bool,

    /// Count calls and errors per syscall and report a summary
    #[arg(short = 'c', long = "summary-only")]
    pub summary_only: bool,

    /// Print raw values without symbolic decoding
    #[arg(long = "no-abbrev")]
    pub no_abbrev: bool,

    /// Filter expression (e.g. 'trace=open,close' or 'trace=file')
    #[arg(short = 'e', long = "expr", value_name = "EXPR")]
    pub filter: Option<String>,

    /// Attach to the process with the given PID
    #[arg(short = 'p', long = "attach", value_name = "PID")]
    pub pid: Option<i32>,

    /// Command and arguments to trace
    #[arg(trailing_var_arg = true)]
    pub command: Vec<String>,
}

/// Run the tracer per the parsed CLI. Returns the process exit code.
pub fn run(cli: Cli) -> Result<i32> {
    if cli.pid.is_none() && cli.command.is_empty() {
        return Err(TraceError::InvalidCommand(
            "must specify either -p PID or COMMAND".into(),
        )
        .into());
    }
    if cli.pid.is_some() && !cli.command.is_empty() {
        return Err(TraceError::InvalidCommand(
            "cannot specify both -p PID and COMMAND".into(),
        )
        .into());
    }

    let opts = TraceOptions {
        output_file: cli.output.clone(),
        json: cli.json,
        summary_only: cli.summary_only,
        filter: cli.filter.clone(),
        no_abbrev: cli.no_abbrev,
    };
    let mut tracer = Tracer::new(opts)?;

    if let Some(pid) = cli.pid {
        let mut session = debug::platform_session(None)?;
        return tracer.attach(session.as_mut(), pid);
    }

    let program = &cli.command[0];
    let binary = sip::resolve_binary_path(program)
        .ok_or_else(|| TraceError::BinaryNotFound(program.clone()))?;
    if sip::is_sip_protected(&binary) {
        return Err(TraceError::SipProtected(sip::sip_error_message(&binary)).into());
    }

    let mut session = debug::platform_session(Some(&binary))?;
    tracer.spawn(session.as_mut(), &cli.command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_spawn_invocation() {
        let cli = Cli::parse_from(["strace-macos", "--json", "-e", "trace=file", "ls", "-la"]);
        assert!(cli.json);
        assert_eq!(cli.filter.as_deref(), Some("trace=file"));
        assert_eq!(cli.command, vec!["ls", "-la"]);
        assert!(cli.pid.is_none());
    }

    #[test]
    fn parses_attach_invocation() {
        let cli = Cli::parse_from(["strace-macos", "-p", "1234", "-c"]);
        assert_eq!(cli.pid, Some(1234));
        assert!(cli.summary_only);
        assert!(cli.command.is_empty());
    }

    #[test]
    fn rejects_neither_pid_nor_command() {
        let cli = Cli::parse_from(["strace-macos"]);
        assert!(run(cli).is_err());
    }

    #[test]
    fn rejects_both_pid_and_command() {
        let cli = Cli::parse_from(["strace-macos", "-p", "1", "ls"]);
        assert!(run(cli).is_err());
    }
}
