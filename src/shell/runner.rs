// src/shell/runner.rs

//! Single-use sequential command runner.
//!
//! A [`CommandRunner`] spawns one interpreter as soon as it is constructed,
//! collects commands with [`CommandRunner::add`], and then writes them all to
//! the interpreter's stdin in [`CommandRunner::execute`], followed by a
//! terminator command, and waits for the interpreter to exit.
//!
//! Because every command goes to the same interpreter, they share one shell
//! session: a `cd` in one command is visible to the next. A failing command
//! does not stop the sequence, and its exit code is never looked at.

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command};
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use super::error::ShellError;
use super::relay::OutputRelay;
use super::sink::{OutputSink, StdoutSink, StreamKind};

/// Interpreter used when none is configured.
pub const DEFAULT_INTERPRETER: &str = "/bin/sh";

/// Command written after all user commands to make the interpreter exit.
pub const DEFAULT_TERMINATOR: &str = "exit";

/// How long relays get to drain buffered output after the interpreter exits.
const RELAY_DRAIN_GRACE: Duration = Duration::from_secs(1);

/// Construction-time configuration of a [`CommandRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerOptions {
    /// Relay the interpreter's stdout/stderr to the sink.
    pub debug: bool,
    pub interpreter: PathBuf,
    /// Extra arguments passed to the interpreter.
    pub args: Vec<String>,
    pub terminator: String,
    /// Upper bound on waiting for the interpreter to exit. `None` waits
    /// forever.
    pub timeout: Option<Duration>,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            debug: false,
            interpreter: PathBuf::from(DEFAULT_INTERPRETER),
            args: Vec::new(),
            terminator: DEFAULT_TERMINATOR.to_string(),
            timeout: None,
        }
    }
}

impl RunnerOptions {
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_interpreter(mut self, interpreter: impl Into<PathBuf>) -> Self {
        self.interpreter = interpreter.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// What happened during [`CommandRunner::execute`].
///
/// `exit_status` is the interpreter's own exit status. It is diagnostic only:
/// it says nothing reliable about whether the individual commands succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionReport {
    pub commands_written: usize,
    pub exit_status: Option<ExitStatus>,
}

/// One interpreter process plus the ordered commands to feed it.
pub struct CommandRunner {
    options: RunnerOptions,
    pending: Vec<String>,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stdout_relay: Option<OutputRelay<ChildStdout>>,
    stderr_relay: Option<OutputRelay<ChildStderr>>,
    sink: Arc<dyn OutputSink>,
    pid: Option<u32>,
    executed: bool,
}

impl CommandRunner {
    /// Spawn the interpreter, echoing and relaying to stdout.
    ///
    /// Must be called from within a Tokio runtime; otherwise
    /// [`ShellError::NoRuntime`] is returned.
    pub fn new(options: RunnerOptions) -> Result<Self, ShellError> {
        Self::with_sink(options, Arc::new(StdoutSink))
    }

    /// Spawn the interpreter with a custom echo/relay sink.
    ///
    /// Must be called from within a Tokio runtime; otherwise
    /// [`ShellError::NoRuntime`] is returned.
    pub fn with_sink(options: RunnerOptions, sink: Arc<dyn OutputSink>) -> Result<Self, ShellError> {
        if Handle::try_current().is_err() {
            return Err(ShellError::NoRuntime);
        }

        let mut cmd = Command::new(&options.interpreter);
        cmd.args(&options.args)
            .stdin(Stdio::piped())
            .kill_on_drop(true);

        // Without relays nobody would read the pipes, and a chatty command
        // could fill them and stall the interpreter.
        if options.debug {
            cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        } else {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }

        let mut child = cmd.spawn().map_err(|source| ShellError::Spawn {
            interpreter: options.interpreter.clone(),
            source,
        })?;

        let pid = child.id();
        let stdin = child.stdin.take();

        let stdout_relay = child
            .stdout
            .take()
            .map(|out| OutputRelay::new(StreamKind::Stdout, out, Arc::clone(&sink)));
        let stderr_relay = child
            .stderr
            .take()
            .map(|err| OutputRelay::new(StreamKind::Stderr, err, Arc::clone(&sink)));

        info!(
            interpreter = %options.interpreter.display(),
            pid,
            debug = options.debug,
            "spawned interpreter"
        );

        Ok(Self {
            options,
            pending: Vec::new(),
            child: Some(child),
            stdin,
            stdout_relay,
            stderr_relay,
            sink,
            pid,
            executed: false,
        })
    }

    /// Queue a command. It is written verbatim, without quoting.
    pub fn add(&mut self, command: impl Into<String>) -> Result<&mut Self, ShellError> {
        if self.executed {
            return Err(ShellError::AlreadyExecuted);
        }
        self.pending.push(command.into());
        Ok(self)
    }

    /// Queue several commands, preserving their order.
    pub fn extend<I, S>(&mut self, commands: I) -> Result<&mut Self, ShellError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.executed {
            return Err(ShellError::AlreadyExecuted);
        }
        self.pending.extend(commands.into_iter().map(Into::into));
        Ok(self)
    }

    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    pub fn options(&self) -> &RunnerOptions {
        &self.options
    }

    /// OS process id of the interpreter, if it was available at spawn time.
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    pub fn is_executed(&self) -> bool {
        self.executed
    }

    /// Write every queued command plus the terminator, then wait for the
    /// interpreter to exit.
    ///
    /// Runs at most once; a second call returns
    /// [`ShellError::AlreadyExecuted`] without touching anything. Whatever
    /// the outcome, the interpreter is gone and all streams are closed when
    /// this returns.
    ///
    /// Only the interpreter itself is killed on timeout. Processes it started
    /// (a stuck `sleep`, a background job) are not reaped and keep running.
    pub async fn execute(&mut self) -> Result<ExecutionReport, ShellError> {
        if self.executed {
            return Err(ShellError::AlreadyExecuted);
        }
        self.executed = true;

        let commands = std::mem::take(&mut self.pending);

        // Relays must be listening before the first byte reaches the shell.
        if let Some(relay) = self.stdout_relay.as_mut() {
            relay.start();
        }
        if let Some(relay) = self.stderr_relay.as_mut() {
            relay.start();
        }

        let outcome = match self.write_commands(&commands).await {
            Ok(written) => self
                .wait_for_exit()
                .await
                .map(|exit_status| ExecutionReport {
                    commands_written: written,
                    exit_status,
                }),
            Err(err) => Err(err),
        };

        self.stop_relays().await;
        self.release().await;

        match &outcome {
            Ok(report) => info!(
                pid = self.pid,
                commands = report.commands_written,
                exit_code = report.exit_status.and_then(|s| s.code()),
                "command sequence finished"
            ),
            Err(err) => warn!(pid = self.pid, error = %err, "command sequence failed"),
        }

        outcome
    }

    async fn write_commands(&mut self, commands: &[String]) -> Result<usize, ShellError> {
        let Some(stdin) = self.stdin.as_mut() else {
            let command = commands
                .first()
                .cloned()
                .unwrap_or_else(|| self.options.terminator.clone());
            return Err(ShellError::Write {
                command,
                source: std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "interpreter stdin is not available",
                ),
            });
        };

        let mut written = 0;
        for (index, command) in commands.iter().enumerate() {
            self.sink.echo(command);
            debug!(index, cmd = %command, "writing command");

            write_line(stdin, command)
                .await
                .map_err(|source| ShellError::Write {
                    command: command.clone(),
                    source,
                })?;
            written += 1;
        }

        let terminator = &self.options.terminator;
        write_line(stdin, terminator)
            .await
            .map_err(|source| ShellError::Write {
                command: terminator.clone(),
                source,
            })?;
        debug!(terminator = %terminator, "terminator written");

        Ok(written)
    }

    async fn wait_for_exit(&mut self) -> Result<Option<ExitStatus>, ShellError> {
        let Some(child) = self.child.as_mut() else {
            return Ok(None);
        };

        let status = match self.options.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
                Ok(res) => res.map_err(ShellError::Wait)?,
                Err(_) => {
                    warn!(pid = self.pid, ?limit, "interpreter did not exit in time");
                    return Err(ShellError::Timeout(limit));
                }
            },
            None => child.wait().await.map_err(ShellError::Wait)?,
        };

        debug!(pid = self.pid, exit_code = status.code(), "interpreter exited");
        Ok(Some(status))
    }

    async fn stop_relays(&mut self) {
        if let Some(relay) = self.stdout_relay.as_mut() {
            relay.finish(RELAY_DRAIN_GRACE).await;
        }
        if let Some(relay) = self.stderr_relay.as_mut() {
            relay.finish(RELAY_DRAIN_GRACE).await;
        }
    }

    /// Close stdin and make sure the interpreter is dead and reaped.
    async fn release(&mut self) {
        drop(self.stdin.take());
        self.stdout_relay = None;
        self.stderr_relay = None;

        let Some(mut child) = self.child.take() else {
            return;
        };

        match child.try_wait() {
            Ok(Some(_)) => {}
            Ok(None) | Err(_) => {
                debug!(pid = self.pid, "killing interpreter");
                if let Err(err) = child.kill().await {
                    debug!(pid = self.pid, error = %err, "kill failed; interpreter already gone");
                }
            }
        }
    }
}

async fn write_line(stdin: &mut ChildStdin, line: &str) -> std::io::Result<()> {
    stdin.write_all(line.as_bytes()).await?;
    stdin.write_all(b"\n").await?;
    stdin.flush().await
}
