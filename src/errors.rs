// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

use crate::shell::ShellError;

#[derive(Error, Debug)]
pub enum BlogshError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Shell error: {0}")]
    Shell(#[from] ShellError),

    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),

    #[error("Post already exists: {}", .0.display())]
    PostExists(PathBuf),

    #[error("No screenshot found in {}", .0.display())]
    NoScreenshot(PathBuf),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, BlogshError>;
