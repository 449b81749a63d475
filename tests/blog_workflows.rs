// tests/blog_workflows.rs
mod common;
use crate::common::{ConfigFileBuilder, RecordingSink, init_tracing, read_lines, with_timeout};

use std::error::Error;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use clap::Parser;
use tempfile::tempdir;

use blogsh::blog::deploy::deploy_commands;
use blogsh::blog::image::{latest_screenshot, plan_image};
use blogsh::blog::post::{NewPost, create_post};
use blogsh::cli::CliArgs;
use blogsh::errors::BlogshError;
use blogsh::fs::RealFileSystem;
use blogsh::shell::CommandRunner;

type TestResult = Result<(), Box<dyn Error>>;

fn now() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2024-03-05T09:30:15+00:00").unwrap()
}

#[test]
fn new_post_is_written_once() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    let cfg = ConfigFileBuilder::new().build_in(dir.path());

    let post = NewPost::new("Hello Shell");
    let path = create_post(&RealFileSystem, &cfg, &post, &now())?;

    assert_eq!(path, dir.path().join("content/posts/2024-03-05-hello-shell.md"));
    let contents = std::fs::read_to_string(&path)?;
    assert!(contents.starts_with("---\ntitle: \"Hello Shell\"\n"));
    assert!(contents.contains("draft: true\n"));

    let again = create_post(&RealFileSystem, &cfg, &post, &now());
    assert!(matches!(again, Err(BlogshError::PostExists(p)) if p == path));
    Ok(())
}

/// The image plan moves the file even where git is unavailable or the
/// directory is not a repository: git failures are silent, the move is not.
#[tokio::test]
async fn image_plan_moves_screenshot_into_repo() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    let shots = dir.path().join("Desktop");
    std::fs::create_dir(&shots)?;
    std::fs::write(shots.join("Screen Shot 2024-01-01.png"), b"old")?;
    std::fs::write(shots.join("Screen Shot 2024-02-01.png"), b"new")?;

    let cfg = ConfigFileBuilder::new()
        .with_images_dir("shots")
        .with_screenshot_dir("Desktop")
        .without_remote()
        .build_in(dir.path());

    let src = latest_screenshot(&RealFileSystem, &cfg.screenshot_dir().unwrap())?;
    let plan = plan_image(&cfg, &src, Some("diagram"), false, &now());
    assert_eq!(plan.url, "shots/diagram.png");

    let mut runner = CommandRunner::with_sink(cfg.runner_options(), Arc::new(RecordingSink::new()))?;
    runner.extend(plan.commands.clone())?;
    with_timeout(runner.execute()).await?;

    assert_eq!(std::fs::read(&plan.target)?, b"new");
    assert!(!src.exists());
    assert!(shots.join("Screen Shot 2024-01-01.png").exists());
    Ok(())
}

/// Deploy runs the build command from the root project.
#[tokio::test]
async fn deploy_runs_build_in_root() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    std::fs::create_dir_all(dir.path().join("content/posts"))?;
    std::fs::create_dir_all(dir.path().join("public"))?;

    let mut cfg = ConfigFileBuilder::new().without_remote().build_in(dir.path());
    cfg.blog.build_command = "pwd > built.txt".to_string();

    let sink = RecordingSink::new();
    let mut runner = CommandRunner::with_sink(cfg.runner_options(), Arc::new(sink.clone()))?;
    runner.extend(deploy_commands(&cfg, "Publish", false))?;
    with_timeout(runner.execute()).await?;

    let built = read_lines(&dir.path().join("built.txt"));
    assert_eq!(built.len(), 1);
    assert!(built[0].ends_with(dir.path().file_name().unwrap().to_str().unwrap()));
    assert!(sink.echoes().contains(&"pwd > built.txt".to_string()));
    Ok(())
}

/// The top-level entry point runs `exec` commands through one shell session.
#[tokio::test]
async fn exec_subcommand_runs_commands() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    let out = dir.path().join("exec.txt");

    let args = CliArgs::try_parse_from([
        "blogsh".to_string(),
        "--config".to_string(),
        dir.path().join("missing.toml").display().to_string(),
        "exec".to_string(),
        format!("cd '{}'", dir.path().display()),
        "echo one > exec.txt".to_string(),
        "echo two >> exec.txt".to_string(),
    ])?;
    with_timeout(blogsh::run(args)).await?;

    assert_eq!(read_lines(&out), vec!["one", "two"]);
    Ok(())
}

/// `run <recipe>` executes the recipe's commands; `--dry-run` executes none.
#[tokio::test]
async fn recipe_runs_and_dry_run_does_not() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    let config = dir.path().join("Blogsh.toml");
    let marker_cmd = format!("touch '{}'", dir.path().join("marker").display());
    std::fs::write(
        &config,
        format!("[recipe.touch]\ncommands = [{:?}]\n", marker_cmd),
    )?;

    let dry = CliArgs::try_parse_from([
        "blogsh",
        "--config",
        config.to_str().unwrap(),
        "--dry-run",
        "run",
        "touch",
    ])?;
    with_timeout(blogsh::run(dry)).await?;
    assert!(!dir.path().join("marker").exists());

    let real = CliArgs::try_parse_from(["blogsh", "--config", config.to_str().unwrap(), "run", "touch"])?;
    with_timeout(blogsh::run(real)).await?;
    assert!(dir.path().join("marker").exists());

    let missing =
        CliArgs::try_parse_from(["blogsh", "--config", config.to_str().unwrap(), "run", "nope"])?;
    let err = with_timeout(blogsh::run(missing)).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<BlogshError>(),
        Some(BlogshError::RecipeNotFound(name)) if name == "nope"
    ));
    Ok(())
}
