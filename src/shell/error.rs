// src/shell/error.rs

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failure of a [`CommandRunner`](super::CommandRunner), tagged by the phase
/// in which it happened.
#[derive(Error, Debug)]
pub enum ShellError {
    /// The interpreter process could not be started. No command was written.
    #[error("failed to spawn interpreter {interpreter:?}: {source}")]
    Spawn {
        interpreter: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A runner was constructed outside a Tokio runtime, which is needed to
    /// drive the interpreter's pipes.
    #[error("command runner must be created inside a Tokio runtime")]
    NoRuntime,

    /// Writing to the interpreter's stdin failed (e.g. broken pipe).
    /// Commands after `command` were never written.
    #[error("failed to write command {command:?} to interpreter: {source}")]
    Write {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting for the interpreter to exit failed.
    #[error("failed waiting for interpreter to exit: {0}")]
    Wait(#[source] std::io::Error),

    /// The interpreter did not exit within the configured timeout and was
    /// killed. Background jobs it started are not killed with it.
    #[error("interpreter did not exit within {0:?}; process killed")]
    Timeout(Duration),

    /// `execute()` already ran on this runner.
    #[error("command runner already executed; runners are single-use")]
    AlreadyExecuted,
}
