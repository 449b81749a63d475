use std::sync::{Arc, Mutex};

use blogsh::shell::{OutputSink, StreamKind};

/// An `OutputSink` that remembers everything it was given.
///
/// Clones share the same buffers, so a test can hand one clone to the runner
/// and inspect another afterwards.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    echoes: Arc<Mutex<Vec<String>>>,
    lines: Arc<Mutex<Vec<(StreamKind, String)>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands echoed before being written, in order.
    pub fn echoes(&self) -> Vec<String> {
        self.echoes.lock().unwrap().clone()
    }

    /// All relayed lines with the stream they came from.
    pub fn lines(&self) -> Vec<(StreamKind, String)> {
        self.lines.lock().unwrap().clone()
    }

    /// Relayed lines from one stream only.
    pub fn lines_from(&self, stream: StreamKind) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|(kind, _)| *kind == stream)
            .map(|(_, line)| line.clone())
            .collect()
    }
}

impl OutputSink for RecordingSink {
    fn echo(&self, command: &str) {
        self.echoes.lock().unwrap().push(command.to_string());
    }

    fn line(&self, stream: StreamKind, line: &str) {
        self.lines.lock().unwrap().push((stream, line.to_string()));
    }
}
