// src/shell/relay.rs

//! Debug-mode output relay.
//!
//! One relay is bound to exactly one subprocess output stream. Once started
//! it runs as its own Tokio task, reading line by line and forwarding each
//! line to an [`OutputSink`] until end of stream or until a shutdown is
//! requested.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::sink::{OutputSink, StreamKind};

/// Forwards lines from one output stream to a sink.
///
/// `R` is normally `ChildStdout` / `ChildStderr`, but any async reader works,
/// which keeps the relay testable without a process.
pub struct OutputRelay<R> {
    kind: StreamKind,
    reader: Option<R>,
    sink: Arc<dyn OutputSink>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl<R> OutputRelay<R>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    /// Bind a relay to `reader`. Nothing is read until [`start`](Self::start).
    pub fn new(kind: StreamKind, reader: R, sink: Arc<dyn OutputSink>) -> Self {
        Self {
            kind,
            reader: Some(reader),
            sink,
            stop: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    pub fn kind(&self) -> StreamKind {
        self.kind
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Spawn the background read loop.
    ///
    /// Returns `false` if the relay was already started (the reader is moved
    /// into the task on the first call).
    pub fn start(&mut self) -> bool {
        let Some(reader) = self.reader.take() else {
            return false;
        };

        let kind = self.kind;
        let sink = Arc::clone(&self.sink);
        let stop = Arc::clone(&self.stop);

        debug!(stream = %kind, "starting output relay");
        self.handle = Some(tokio::spawn(relay_lines(kind, reader, sink, stop)));
        true
    }

    /// Ask the read loop to stop at its next iteration boundary.
    ///
    /// This does not interrupt a read that is already blocked; such a relay
    /// only ends when the stream closes.
    pub fn shutdown(&self) {
        self.stop.store(true, Ordering::Release);
    }

    /// Wait for the read loop to finish.
    pub async fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(err) = handle.await {
                if !err.is_cancelled() {
                    warn!(stream = %self.kind, error = %err, "output relay task failed");
                }
            }
        }
    }

    /// Stop the relay after the subprocess has gone away.
    ///
    /// The relay first gets `grace` to drain what is still buffered in the
    /// pipe and reach end of stream on its own. If it is still running after
    /// that (a grandchild process holding the pipe open, for example), the
    /// shutdown flag is set and the task is aborted, since its pending read
    /// would never observe the flag.
    pub async fn finish(&mut self, grace: Duration) {
        let Some(mut handle) = self.handle.take() else {
            return;
        };

        if tokio::time::timeout(grace, &mut handle).await.is_ok() {
            debug!(stream = %self.kind, "output relay reached end of stream");
            return;
        }

        debug!(
            stream = %self.kind,
            ?grace,
            "output relay still running after grace period; shutting down"
        );
        self.shutdown();
        handle.abort();
        self.handle = Some(handle);
        self.join().await;
    }
}

async fn relay_lines<R>(
    kind: StreamKind,
    reader: R,
    sink: Arc<dyn OutputSink>,
    stop: Arc<AtomicBool>,
) where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();

    loop {
        if stop.load(Ordering::Acquire) {
            debug!(stream = %kind, "output relay stopped on request");
            break;
        }

        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => {
                debug!(stream = %kind, "output relay reached end of stream");
                break;
            }
            // Invalid UTF-8 is replaced, never fatal: closing the pipe early
            // would kill the interpreter with SIGPIPE on its next write.
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                sink.line(kind, line.trim_end_matches(['\n', '\r']));
            }
            Err(err) => {
                warn!(stream = %kind, error = %err, "error reading subprocess output");
                break;
            }
        }
    }
}
