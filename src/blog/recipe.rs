// src/blog/recipe.rs

//! User-defined command lists from `[recipe.<name>]`.

use crate::config::ConfigFile;
use crate::errors::{BlogshError, Result};

/// Commands of the named recipe, in the order they are written in the config.
pub fn recipe_commands<'a>(cfg: &'a ConfigFile, name: &str) -> Result<&'a [String]> {
    cfg.recipe
        .get(name)
        .map(|r| r.commands.as_slice())
        .ok_or_else(|| BlogshError::RecipeNotFound(name.to_string()))
}

/// `(name, description)` for every recipe, sorted by name.
pub fn list_recipes(cfg: &ConfigFile) -> Vec<(&str, Option<&str>)> {
    cfg.recipe
        .iter()
        .map(|(name, r)| (name.as_str(), r.description.as_deref()))
        .collect()
}
