// src/lib.rs

pub mod blog;
pub mod cli;
pub mod config;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod shell;

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use tracing::{debug, info};

use crate::blog::image::plan_image;
use crate::blog::post::{NewPost, create_post, front_matter, post_path};
use crate::blog::{deploy, image, recipe};
use crate::cli::{CliArgs, Commands};
use crate::config::{ConfigFile, load_or_default};
use crate::errors::BlogshError;
use crate::fs::RealFileSystem;
use crate::shell::{CommandRunner, ExecutionReport, RunnerOptions};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and CLI overrides
/// - building the command list for the chosen subcommand
/// - feeding it to one `CommandRunner` (or printing it for `--dry-run`)
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let mut cfg = load_or_default(&config_path)?;
    apply_overrides(&mut cfg, &args);

    let fs = RealFileSystem;
    let now = Local::now().fixed_offset();

    match args.command {
        Commands::New {
            title,
            tags,
            publish,
        } => {
            let post = NewPost {
                title,
                tags,
                draft: !publish,
            };
            if args.dry_run {
                println!("would create {}", post_path(&cfg, &post, &now).display());
                print!("{}", front_matter(&post, &now));
                return Ok(());
            }
            let path = create_post(&fs, &cfg, &post, &now)?;
            println!("{}", path.display());
            Ok(())
        }

        Commands::Image {
            path,
            name,
            no_push,
        } => {
            let src = match path {
                Some(path) => path,
                None => {
                    let dir = cfg.screenshot_dir().ok_or_else(|| {
                        BlogshError::ConfigError(
                            "no image given and [blog].screenshot_dir is not set".to_string(),
                        )
                    })?;
                    image::latest_screenshot(&fs, &dir)?
                }
            };
            let push = cfg.blog.remote && !no_push;
            let plan = plan_image(&cfg, &src, name.as_deref(), push, &now);

            if args.dry_run {
                print_dry_run(&cfg.runner_options(), &plan.commands);
            } else {
                run_commands(cfg.runner_options(), plan.commands).await?;
            }
            println!("{}", plan.url);
            Ok(())
        }

        Commands::Deploy { message, no_push } => {
            let push = cfg.blog.remote && !no_push;
            let message = deploy::commit_message(message.as_deref(), &now);
            let commands = deploy::deploy_commands(&cfg, &message, push);
            execute_or_print(&cfg, commands, args.dry_run).await
        }

        Commands::Run { recipe: name, list } => {
            if list {
                print_recipes(&cfg);
                return Ok(());
            }
            let name = name.ok_or_else(|| BlogshError::ConfigError("no recipe given".to_string()))?;
            let commands = recipe::recipe_commands(&cfg, &name)?.to_vec();
            info!(recipe = %name, commands = commands.len(), "running recipe");
            execute_or_print(&cfg, commands, args.dry_run).await
        }

        Commands::Exec { commands } => execute_or_print(&cfg, commands, args.dry_run).await,
    }
}

/// Spawn one interpreter, feed it `commands` in order and wait for it.
pub async fn run_commands(options: RunnerOptions, commands: Vec<String>) -> Result<ExecutionReport> {
    let mut runner = CommandRunner::new(options)?;
    runner.extend(commands)?;
    let report = runner.execute().await?;
    debug!(?report, "runner finished");
    Ok(report)
}

async fn execute_or_print(cfg: &ConfigFile, commands: Vec<String>, dry_run: bool) -> Result<()> {
    if dry_run {
        print_dry_run(&cfg.runner_options(), &commands);
        return Ok(());
    }
    run_commands(cfg.runner_options(), commands).await?;
    Ok(())
}

fn apply_overrides(cfg: &mut ConfigFile, args: &CliArgs) {
    if args.debug {
        cfg.shell.debug = true;
    }
    if let Some(interpreter) = &args.interpreter {
        cfg.shell.interpreter = interpreter.to_string_lossy().into_owned();
    }
}

/// Simple dry-run output: interpreter settings and the exact lines that
/// would be written to it.
fn print_dry_run(options: &RunnerOptions, commands: &[String]) {
    println!("blogsh dry-run");
    println!("  interpreter = {}", options.interpreter.display());
    if !options.args.is_empty() {
        println!("  args = {:?}", options.args);
    }
    println!("  debug = {}", options.debug);
    if let Some(timeout) = options.timeout {
        println!("  timeout = {timeout:?}");
    }
    println!();

    println!("commands ({}):", commands.len());
    for cmd in commands {
        println!("  > {cmd}");
    }
    println!("  > {}", options.terminator);

    debug!("dry-run complete (no execution)");
}

fn print_recipes(cfg: &ConfigFile) {
    let recipes = recipe::list_recipes(cfg);
    if recipes.is_empty() {
        println!("no recipes defined");
        return;
    }
    for (name, description) in recipes {
        match description {
            Some(desc) => println!("{name}\t{desc}"),
            None => println!("{name}"),
        }
    }
}
