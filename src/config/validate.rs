// src/config/validate.rs

use std::time::Duration;

use crate::config::duration::parse_duration;
use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{BlogshError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::BlogshError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let timeout = validate_shell(&raw)?;
        validate_blog(&raw)?;
        validate_recipes(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.shell, raw.blog, raw.recipe, timeout))
    }
}

fn validate_shell(cfg: &RawConfigFile) -> Result<Option<Duration>> {
    if cfg.shell.interpreter.trim().is_empty() {
        return Err(BlogshError::ConfigError(
            "[shell].interpreter must not be empty".to_string(),
        ));
    }

    if cfg.shell.terminator.trim().is_empty() {
        return Err(BlogshError::ConfigError(
            "[shell].terminator must not be empty; the shell would never exit".to_string(),
        ));
    }

    let Some(raw) = cfg.shell.timeout.as_deref() else {
        return Ok(None);
    };

    let timeout = parse_duration(raw)
        .map_err(|e| BlogshError::ConfigError(format!("[shell].timeout: {e}")))?;
    if timeout.is_zero() {
        return Err(BlogshError::ConfigError(
            "[shell].timeout must be greater than zero".to_string(),
        ));
    }
    Ok(Some(timeout))
}

fn validate_blog(cfg: &RawConfigFile) -> Result<()> {
    if cfg.blog.extension.trim().is_empty() {
        return Err(BlogshError::ConfigError(
            "[blog].extension must not be empty".to_string(),
        ));
    }
    if cfg.blog.build_command.trim().is_empty() {
        return Err(BlogshError::ConfigError(
            "[blog].build_command must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_recipes(cfg: &RawConfigFile) -> Result<()> {
    for (name, recipe) in cfg.recipe.iter() {
        if name.trim().is_empty() {
            return Err(BlogshError::ConfigError(
                "recipe names must not be empty".to_string(),
            ));
        }
        if recipe.commands.is_empty() {
            return Err(BlogshError::ConfigError(format!(
                "recipe '{}' has no commands",
                name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = ConfigFile::try_from(RawConfigFile::default()).unwrap();
        assert_eq!(cfg.timeout(), None);
        assert!(cfg.recipe.is_empty());
    }

    #[test]
    fn timeout_is_parsed() {
        let mut raw = RawConfigFile::default();
        raw.shell.timeout = Some("90s".to_string());
        let cfg = ConfigFile::try_from(raw).unwrap();
        assert_eq!(cfg.timeout(), Some(Duration::from_secs(90)));
        assert_eq!(cfg.runner_options().timeout, Some(Duration::from_secs(90)));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut raw = RawConfigFile::default();
        raw.shell.timeout = Some("0s".to_string());
        assert!(matches!(
            ConfigFile::try_from(raw),
            Err(BlogshError::ConfigError(msg)) if msg.contains("greater than zero")
        ));
    }

    #[test]
    fn empty_terminator_is_rejected() {
        let mut raw = RawConfigFile::default();
        raw.shell.terminator = "  ".to_string();
        assert!(matches!(
            ConfigFile::try_from(raw),
            Err(BlogshError::ConfigError(msg)) if msg.contains("terminator")
        ));
    }
}
