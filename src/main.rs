// strace-macos - strace for macOS
// Main entry point

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use strace_macos::cli::{self, Cli};

fn main() {
    // Initialize tracing (diagnostics only; trace output has its own sink)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("STRACE_MACOS_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Cli::parse();
    match cli::run(args) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            // User-facing errors print without a backtrace
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
