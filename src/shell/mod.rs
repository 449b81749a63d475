// src/shell/mod.rs

//! The "virtual shell": one long-lived interpreter process fed an ordered
//! list of commands.
//!
//! - [`runner`] owns the subprocess and the single-use `execute()` lifecycle.
//! - [`relay`] forwards subprocess output lines to a sink in debug mode.
//! - [`sink`] defines where the echo trace and relayed lines go.
//! - [`error`] is the phase-tagged error type (spawn / write / wait).
//!
//! Commands are opaque strings. Nothing in here parses, quotes or validates
//! them, and individual command exit codes are never inspected.

pub mod error;
pub mod relay;
pub mod runner;
pub mod sink;

pub use error::ShellError;
pub use relay::OutputRelay;
pub use runner::{CommandRunner, ExecutionReport, RunnerOptions};
pub use sink::{OutputSink, StdoutSink, StreamKind};
