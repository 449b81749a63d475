#![allow(dead_code)]

use std::path::Path;

use blogsh::config::{ConfigFile, RawConfigFile, RecipeConfig};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn with_interpreter(mut self, interpreter: &str) -> Self {
        self.config.shell.interpreter = interpreter.to_string();
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.config.shell.debug = debug;
        self
    }

    pub fn with_timeout(mut self, timeout: &str) -> Self {
        self.config.shell.timeout = Some(timeout.to_string());
        self
    }

    pub fn with_recipe(mut self, name: &str, commands: &[&str]) -> Self {
        self.config.recipe.insert(
            name.to_string(),
            RecipeConfig {
                description: None,
                commands: commands.iter().map(|c| c.to_string()).collect(),
            },
        );
        self
    }

    pub fn with_images_dir(mut self, dir: &str) -> Self {
        self.config.blog.images_dir = dir.to_string();
        self
    }

    pub fn with_screenshot_dir(mut self, dir: &str) -> Self {
        self.config.blog.screenshot_dir = Some(dir.to_string());
        self
    }

    pub fn without_remote(mut self) -> Self {
        self.config.blog.remote = false;
        self
    }

    /// Build a validated config whose relative paths resolve under `base`.
    pub fn build_in(self, base: &Path) -> ConfigFile {
        ConfigFile::try_from(self.config)
            .expect("Failed to build valid config from builder")
            .with_base_dir(base)
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
