// src/blog/deploy.rs

//! Publishing: commit posts, rebuild the site, commit the generated output
//! and finally the root project.

use chrono::{DateTime, FixedOffset};

use crate::blog::{git_commit_commands, quote_path};
use crate::config::ConfigFile;

/// Commit message for a deploy; `custom` wins when given and non-blank.
pub fn commit_message(custom: Option<&str>, now: &DateTime<FixedOffset>) -> String {
    match custom.map(str::trim) {
        Some(msg) if !msg.is_empty() => msg.to_string(),
        _ => format!("Publish {}", now.format("%Y-%m-%d %H:%M")),
    }
}

/// Ordered commands for a full deploy.
///
/// 1. posts repository: stage everything, commit, push
/// 2. root project: run the build command
/// 3. generated site repository: stage everything, commit, push
/// 4. root project: stage everything, commit, push
///
/// Everything runs in one shell session, so each step starts with a `cd`.
pub fn deploy_commands(cfg: &ConfigFile, message: &str, push: bool) -> Vec<String> {
    let root = cfg.root_dir();

    let mut commands = git_commit_commands(&cfg.posts_dir(), "-A", message, push);
    commands.push(format!("cd {}", quote_path(&root)));
    commands.push(cfg.blog.build_command.clone());
    commands.extend(git_commit_commands(&cfg.public_dir(), "-A", message, push));
    commands.extend(git_commit_commands(&root, "-A", message, push));
    commands
}
