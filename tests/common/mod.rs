#![allow(dead_code)]

use std::path::Path;

pub use blogsh_test_utils::builders::ConfigFileBuilder;
pub use blogsh_test_utils::{RecordingSink, init_tracing, with_timeout};

/// Whether a process with this pid still exists (zombies included).
pub fn process_exists(pid: u32) -> bool {
    Path::new(&format!("/proc/{pid}")).exists()
}

/// Read a file written by shell commands, one entry per line.
pub fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}
