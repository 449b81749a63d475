// src/config/model.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::shell::RunnerOptions;
use crate::shell::runner::{DEFAULT_INTERPRETER, DEFAULT_TERMINATOR};

/// Configuration exactly as read from a TOML file, before validation.
///
/// ```toml
/// [shell]
/// interpreter = "/bin/zsh"
/// timeout = "10m"
///
/// [blog]
/// posts_dir = "content/posts"
/// images_repo = "../images"
///
/// [recipe.sync]
/// commands = ["git pull"]
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub shell: ShellSection,

    #[serde(default)]
    pub blog: BlogSection,

    /// Named command lists from `[recipe.<name>]`.
    #[serde(default)]
    pub recipe: BTreeMap<String, RecipeConfig>,
}

/// `[shell]` section: how the command runner spawns its interpreter.
#[derive(Debug, Clone, Deserialize)]
pub struct ShellSection {
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    #[serde(default)]
    pub args: Vec<String>,

    /// Relay interpreter stdout/stderr while commands run.
    #[serde(default)]
    pub debug: bool,

    #[serde(default = "default_terminator")]
    pub terminator: String,

    /// Duration string (e.g. `"10m"`). Absent means wait forever.
    #[serde(default)]
    pub timeout: Option<String>,
}

fn default_interpreter() -> String {
    DEFAULT_INTERPRETER.to_string()
}

fn default_terminator() -> String {
    DEFAULT_TERMINATOR.to_string()
}

impl Default for ShellSection {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            args: Vec::new(),
            debug: false,
            terminator: default_terminator(),
            timeout: None,
        }
    }
}

/// `[blog]` section: where the posts, images and generated site live.
#[derive(Debug, Clone, Deserialize)]
pub struct BlogSection {
    /// Root project (the static site source). Relative to the config file.
    #[serde(default = "default_root")]
    pub root: String,

    /// Posts directory, relative to `root`. Its own git repository.
    #[serde(default = "default_posts_dir")]
    pub posts_dir: String,

    /// File extension for new posts.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Image repository, relative to the config file.
    #[serde(default = "default_images_repo")]
    pub images_repo: String,

    /// Sub-directory inside `images_repo` where screenshots are placed.
    #[serde(default)]
    pub images_dir: String,

    /// Public base URL of the image repository, used to print links.
    #[serde(default)]
    pub images_url: Option<String>,

    /// Where new screenshots show up (e.g. `~/Desktop`).
    #[serde(default)]
    pub screenshot_dir: Option<String>,

    /// Generated site output, relative to `root`. Its own git repository.
    #[serde(default = "default_public_dir")]
    pub public_dir: String,

    /// Command that rebuilds the site, run from `root`.
    #[serde(default = "default_build_command")]
    pub build_command: String,

    /// Push after committing.
    #[serde(default = "default_remote")]
    pub remote: bool,
}

fn default_root() -> String {
    ".".to_string()
}

fn default_posts_dir() -> String {
    "content/posts".to_string()
}

fn default_extension() -> String {
    "md".to_string()
}

fn default_images_repo() -> String {
    "images".to_string()
}

fn default_public_dir() -> String {
    "public".to_string()
}

fn default_build_command() -> String {
    "hugo".to_string()
}

fn default_remote() -> bool {
    true
}

impl Default for BlogSection {
    fn default() -> Self {
        Self {
            root: default_root(),
            posts_dir: default_posts_dir(),
            extension: default_extension(),
            images_repo: default_images_repo(),
            images_dir: String::new(),
            images_url: None,
            screenshot_dir: None,
            public_dir: default_public_dir(),
            build_command: default_build_command(),
            remote: default_remote(),
        }
    }
}

/// `[recipe.<name>]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeConfig {
    #[serde(default)]
    pub description: Option<String>,

    /// Commands run in order in one shell session.
    #[serde(default)]
    pub commands: Vec<String>,
}

/// Validated configuration.
///
/// Obtain one through [`crate::config::load_and_validate`] or
/// `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub shell: ShellSection,
    pub blog: BlogSection,
    pub recipe: BTreeMap<String, RecipeConfig>,
    timeout: Option<Duration>,
    base_dir: PathBuf,
}

impl ConfigFile {
    /// Construct without running validation. `timeout` must already be the
    /// parsed form of `shell.timeout`.
    pub(crate) fn new_unchecked(
        shell: ShellSection,
        blog: BlogSection,
        recipe: BTreeMap<String, RecipeConfig>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            shell,
            blog,
            recipe,
            timeout,
            base_dir: PathBuf::from("."),
        }
    }

    /// Directory that relative paths are resolved against.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Options for a [`crate::shell::CommandRunner`] built from `[shell]`.
    pub fn runner_options(&self) -> RunnerOptions {
        RunnerOptions {
            debug: self.shell.debug,
            interpreter: PathBuf::from(&self.shell.interpreter),
            args: self.shell.args.clone(),
            terminator: self.shell.terminator.clone(),
            timeout: self.timeout,
        }
    }

    /// Resolve a path from the config file.
    ///
    /// A leading `~` expands to the home directory; absolute paths are kept;
    /// anything else is relative to the config file's directory.
    pub fn resolve(&self, path: &str) -> PathBuf {
        if path.is_empty() || path == "." {
            return self.base_dir.clone();
        }
        if let Some(expanded) = expand_home(path) {
            return expanded;
        }
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn root_dir(&self) -> PathBuf {
        self.resolve(&self.blog.root)
    }

    pub fn posts_dir(&self) -> PathBuf {
        self.root_dir().join(&self.blog.posts_dir)
    }

    pub fn public_dir(&self) -> PathBuf {
        self.root_dir().join(&self.blog.public_dir)
    }

    pub fn images_repo(&self) -> PathBuf {
        self.resolve(&self.blog.images_repo)
    }

    /// Directory inside the image repository where screenshots land.
    pub fn images_target_dir(&self) -> PathBuf {
        if self.blog.images_dir.is_empty() {
            self.images_repo()
        } else {
            self.images_repo().join(&self.blog.images_dir)
        }
    }

    pub fn screenshot_dir(&self) -> Option<PathBuf> {
        self.blog.screenshot_dir.as_deref().map(|dir| self.resolve(dir))
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        let base_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new_unchecked(
            ShellSection::default(),
            BlogSection::default(),
            BTreeMap::new(),
            None,
        )
        .with_base_dir(base_dir)
    }
}

fn expand_home(path: &str) -> Option<PathBuf> {
    let rest = if path == "~" {
        ""
    } else {
        path.strip_prefix("~/")?
    };
    dirs::home_dir().map(|home| home.join(rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_at(base: &str) -> ConfigFile {
        ConfigFile::new_unchecked(
            ShellSection::default(),
            BlogSection::default(),
            BTreeMap::new(),
            None,
        )
        .with_base_dir(base)
    }

    #[test]
    fn relative_paths_resolve_against_base_dir() {
        let cfg = config_at("/srv/blog");
        assert_eq!(cfg.resolve("images"), PathBuf::from("/srv/blog/images"));
        assert_eq!(cfg.resolve("/abs/path"), PathBuf::from("/abs/path"));
        assert_eq!(cfg.resolve("."), PathBuf::from("/srv/blog"));
    }

    #[test]
    fn posts_and_public_are_under_root() {
        let mut cfg = config_at("/srv/blog");
        cfg.blog.root = "site".to_string();
        assert_eq!(cfg.posts_dir(), PathBuf::from("/srv/blog/site/content/posts"));
        assert_eq!(cfg.public_dir(), PathBuf::from("/srv/blog/site/public"));
    }

    #[test]
    fn images_dir_is_optional() {
        let mut cfg = config_at("/srv/blog");
        assert_eq!(cfg.images_target_dir(), PathBuf::from("/srv/blog/images"));
        cfg.blog.images_dir = "shots".to_string();
        assert_eq!(cfg.images_target_dir(), PathBuf::from("/srv/blog/images/shots"));
    }

    #[test]
    fn tilde_expands_to_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let cfg = config_at("/srv/blog");
        assert_eq!(cfg.resolve("~/Desktop"), home.join("Desktop"));
        assert_eq!(cfg.resolve("~"), home.join(""));
        assert_eq!(cfg.resolve("~user/x"), PathBuf::from("/srv/blog/~user/x"));
    }

    #[test]
    fn runner_options_follow_shell_section() {
        let mut cfg = config_at(".");
        cfg.shell.interpreter = "/bin/zsh".to_string();
        cfg.shell.debug = true;
        let opts = cfg.runner_options();
        assert_eq!(opts.interpreter, PathBuf::from("/bin/zsh"));
        assert!(opts.debug);
        assert_eq!(opts.terminator, "exit");
    }
}
