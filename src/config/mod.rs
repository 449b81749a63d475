// src/config/mod.rs

//! Configuration loading and validation for blogsh.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate basic invariants like non-empty recipes (`validate.rs`).
//! - Parse duration strings such as `"10m"` (`duration.rs`).

pub mod duration;
pub mod loader;
pub mod model;
pub mod validate;

pub use duration::parse_duration;
pub use loader::{load_and_validate, load_from_path, load_or_default};
pub use model::{BlogSection, ConfigFile, RawConfigFile, RecipeConfig, ShellSection};
