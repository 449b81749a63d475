// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `blogsh`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "blogsh",
    version,
    about = "Scaffold posts, publish screenshots and deploy a static blog.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Blogsh.toml` in the current working directory.
    #[arg(long, global = true, value_name = "PATH", default_value = "Blogsh.toml")]
    pub config: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `BLOGSH_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Relay the shell's stdout/stderr while commands run.
    #[arg(long, global = true)]
    pub debug: bool,

    /// Interpreter to run commands with, overriding `[shell].interpreter`.
    #[arg(long, global = true, value_name = "PATH")]
    pub interpreter: Option<PathBuf>,

    /// Print the commands that would be run, but don't run them.
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Create a new post file with front matter.
    New {
        /// Post title; also used to derive the file name.
        title: String,

        /// Tag to put in the front matter (repeatable).
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Mark the post as published instead of draft.
        #[arg(long)]
        publish: bool,
    },

    /// Move a screenshot into the image repository and push it.
    Image {
        /// Image to publish. Defaults to the newest file in
        /// `[blog].screenshot_dir`.
        path: Option<PathBuf>,

        /// File name inside the image repository (extension is kept from
        /// the source when omitted).
        #[arg(long, value_name = "NAME")]
        name: Option<String>,

        /// Commit but don't push.
        #[arg(long)]
        no_push: bool,
    },

    /// Commit posts, rebuild the site and commit the generated output.
    Deploy {
        /// Commit message; a dated default is used when omitted.
        #[arg(long, short, value_name = "MSG")]
        message: Option<String>,

        /// Commit but don't push.
        #[arg(long)]
        no_push: bool,
    },

    /// Run a named recipe from the config file.
    Run {
        /// Recipe name (`[recipe.<name>]`).
        #[arg(required_unless_present = "list")]
        recipe: Option<String>,

        /// List available recipes instead of running one.
        #[arg(long)]
        list: bool,
    },

    /// Run ad-hoc commands, in order, in one shell session.
    Exec {
        /// Commands, each passed verbatim to the shell.
        #[arg(required = true, value_name = "CMD")]
        commands: Vec<String>,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
