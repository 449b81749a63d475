// src/blog/post.rs

//! New post scaffolding.

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use tracing::info;

use crate::config::ConfigFile;
use crate::errors::{BlogshError, Result};
use crate::fs::FileSystem;

/// What the user asked for with `blogsh new`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub tags: Vec<String>,
    pub draft: bool,
}

impl NewPost {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tags: Vec::new(),
            draft: true,
        }
    }
}

/// Turn a title into a file-name friendly slug.
///
/// Letters and digits are lowercased and kept (including non-ASCII ones);
/// every run of anything else becomes a single `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        "post".to_string()
    } else {
        slug
    }
}

/// YAML front matter block for a new post, followed by a blank line.
pub fn front_matter(post: &NewPost, date: &DateTime<FixedOffset>) -> String {
    let tags = post
        .tags
        .iter()
        .map(|t| yaml_string(t))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "---\ntitle: {}\ndate: {}\ndraft: {}\ntags: [{}]\n---\n\n",
        yaml_string(&post.title),
        date.to_rfc3339(),
        post.draft,
        tags
    )
}

fn yaml_string(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// `<posts_dir>/<YYYY-MM-DD>-<slug>.<ext>`
pub fn post_path(cfg: &ConfigFile, post: &NewPost, date: &DateTime<FixedOffset>) -> PathBuf {
    let file_name = format!(
        "{}-{}.{}",
        date.format("%Y-%m-%d"),
        slugify(&post.title),
        cfg.blog.extension.trim_start_matches('.')
    );
    cfg.posts_dir().join(file_name)
}

/// Write the scaffolded post and return its path.
///
/// Never overwrites: an existing file yields [`BlogshError::PostExists`].
pub fn create_post(
    fs: &dyn FileSystem,
    cfg: &ConfigFile,
    post: &NewPost,
    now: &DateTime<FixedOffset>,
) -> Result<PathBuf> {
    let path = post_path(cfg, post, now);
    if fs.exists(&path) {
        return Err(BlogshError::PostExists(path));
    }

    fs.write(&path, front_matter(post, now).as_bytes())?;
    info!(path = %path.display(), title = %post.title, "created post");
    Ok(path)
}
