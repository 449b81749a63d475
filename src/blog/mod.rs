// src/blog/mod.rs

//! Blog workflows expressed as command lists for the shell runner.
//!
//! - [`post`] scaffolds a new post file with front matter (no shell involved).
//! - [`image`] moves a screenshot into the image repository and commits it.
//! - [`deploy`] commits posts, rebuilds the site and commits the output.
//! - [`recipe`] looks up user-defined command lists from the config.
//!
//! This is the only place that quotes anything: paths and messages are
//! spliced into command strings with [`quote`] before they reach the runner,
//! which passes commands through verbatim.

pub mod deploy;
pub mod image;
pub mod post;
pub mod recipe;

use std::path::Path;

/// Quote `s` for a POSIX shell.
///
/// Strings made only of characters that are never special are returned
/// unchanged; everything else is wrapped in single quotes.
pub fn quote(s: &str) -> String {
    let is_plain = !s.is_empty()
        && s.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | ',' | ':' | '@' | '%' | '+' | '=')
        });
    if is_plain {
        return s.to_string();
    }
    format!("'{}'", s.replace('\'', r"'\''"))
}

pub fn quote_path(path: &Path) -> String {
    quote(&path.to_string_lossy())
}

/// `cd` into `dir`, stage `pathspec`, commit, and optionally push.
///
/// `git commit` with nothing staged exits non-zero; the runner does not
/// look at exit codes, so the remaining commands still run.
pub fn git_commit_commands(dir: &Path, pathspec: &str, message: &str, push: bool) -> Vec<String> {
    let mut commands = vec![
        format!("cd {}", quote_path(dir)),
        format!("git add {}", pathspec),
        format!("git commit -m {}", quote(message)),
    ];
    if push {
        commands.push("git push".to_string());
    }
    commands
}
