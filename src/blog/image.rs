// src/blog/image.rs

//! Screenshot publishing: move an image into the image repository, commit
//! it, and work out the URL to paste into a post.

use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};
use tracing::debug;

use crate::blog::{git_commit_commands, quote, quote_path};
use crate::config::ConfigFile;
use crate::errors::{BlogshError, Result};
use crate::fs::FileSystem;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// Everything needed to publish one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePlan {
    /// Final file name inside the image directory.
    pub name: String,
    /// Absolute destination path.
    pub target: PathBuf,
    pub commands: Vec<String>,
    /// Public URL (or repository-relative path if no `images_url` is set).
    pub url: String,
}

pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Newest screenshot in `dir`.
///
/// Screenshot tools name files by timestamp, so the lexicographically last
/// image file name is the most recent one.
pub fn latest_screenshot(fs: &dyn FileSystem, dir: &Path) -> Result<PathBuf> {
    let mut images: Vec<PathBuf> = fs
        .read_dir(dir)?
        .into_iter()
        .filter(|p| fs.is_file(p) && is_image(p))
        .collect();
    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let latest = images
        .pop()
        .ok_or_else(|| BlogshError::NoScreenshot(dir.to_path_buf()))?;
    debug!(path = %latest.display(), "picked latest screenshot");
    Ok(latest)
}

/// Name of the image inside the repository.
///
/// An explicit `name` without an extension inherits the source's extension;
/// without a `name` the file is named after `now`.
pub fn target_name(src: &Path, name: Option<&str>, now: &DateTime<FixedOffset>) -> String {
    let ext = src
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_else(|| "png".to_string());

    match name {
        Some(name) if Path::new(name).extension().is_some() => name.to_string(),
        Some(name) => format!("{name}.{ext}"),
        None => format!("{}.{ext}", now.format("%Y%m%d-%H%M%S")),
    }
}

/// URL (or relative path) under which the published image will be reachable.
pub fn image_url(cfg: &ConfigFile, name: &str) -> String {
    let relative = if cfg.blog.images_dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", cfg.blog.images_dir.trim_matches('/'), name)
    };

    match cfg.blog.images_url.as_deref() {
        Some(base) => format!("{}/{}", base.trim_end_matches('/'), relative),
        None => relative,
    }
}

/// Build the command list that moves `src` into the image repository and
/// commits it.
pub fn plan_image(
    cfg: &ConfigFile,
    src: &Path,
    name: Option<&str>,
    push: bool,
    now: &DateTime<FixedOffset>,
) -> ImagePlan {
    let name = target_name(src, name, now);
    let target_dir = cfg.images_target_dir();
    let target = target_dir.join(&name);

    let pathspec = if cfg.blog.images_dir.is_empty() {
        quote(&name)
    } else {
        quote(&format!("{}/{}", cfg.blog.images_dir.trim_matches('/'), name))
    };

    let mut commands = vec![
        format!("mkdir -p {}", quote_path(&target_dir)),
        format!("mv {} {}", quote_path(src), quote_path(&target)),
    ];
    commands.extend(git_commit_commands(
        &cfg.images_repo(),
        &format!("-- {pathspec}"),
        &format!("Add image {name}"),
        push,
    ));

    ImagePlan {
        url: image_url(cfg, &name),
        name,
        target,
        commands,
    }
}
