// strace-macos core module
// Error taxonomy shared by the tracer and the CLI

pub mod error;
