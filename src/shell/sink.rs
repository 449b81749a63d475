// src/shell/sink.rs

use std::fmt;
use std::io::Write;

/// Which subprocess output stream a relayed line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Stdout => f.write_str("stdout"),
            StreamKind::Stderr => f.write_str("stderr"),
        }
    }
}

/// Destination for the command echo trace and relayed subprocess output.
///
/// Both methods may be called concurrently from the runner and from the two
/// relay tasks, so implementations must be `Send + Sync`.
pub trait OutputSink: Send + Sync {
    /// Called right before a user command is written to the interpreter.
    fn echo(&self, command: &str);

    /// Called once per line read from a subprocess output stream.
    fn line(&self, stream: StreamKind, line: &str);
}

/// Default sink: everything goes to the process-wide stdout.
///
/// Logs go to stderr (see [`crate::logging`]), so stdout only ever carries
/// the echo trace and relayed output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn echo(&self, command: &str) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "> {command}");
        let _ = out.flush();
    }

    fn line(&self, _stream: StreamKind, line: &str) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{line}");
    }
}
