// tests/runner_ordering.rs
mod common;
use crate::common::{RecordingSink, init_tracing, read_lines, with_timeout};

use std::error::Error;
use std::sync::Arc;

use blogsh::shell::{CommandRunner, RunnerOptions};
use tempfile::tempdir;

type TestResult = Result<(), Box<dyn Error>>;

/// Every command appends its index to a log file; the file must list them
/// in exactly the order they were added.
#[tokio::test]
async fn commands_run_in_insertion_order() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    let log = dir.path().join("order.log");

    let mut runner = CommandRunner::with_sink(RunnerOptions::default(), Arc::new(RecordingSink::new()))?;
    for i in 0..25 {
        runner.add(format!("echo {i} >> '{}'", log.display()))?;
    }

    let report = with_timeout(runner.execute()).await?;
    assert_eq!(report.commands_written, 25);

    let expected: Vec<String> = (0..25).map(|i| i.to_string()).collect();
    assert_eq!(read_lines(&log), expected);
    Ok(())
}

/// Each user command is echoed to the sink before it is written; the
/// terminator is not.
#[tokio::test]
async fn echo_trace_lists_user_commands_only() -> TestResult {
    init_tracing();
    let sink = RecordingSink::new();

    let mut runner = CommandRunner::with_sink(RunnerOptions::default(), Arc::new(sink.clone()))?;
    runner.add("true")?.add("echo hi")?;
    with_timeout(runner.execute()).await?;

    assert_eq!(sink.echoes(), vec!["true", "echo hi"]);
    Ok(())
}

/// Scenario C: no commands at all. Only the terminator is written and the
/// shell exits promptly.
#[tokio::test]
async fn zero_commands_still_terminate() -> TestResult {
    init_tracing();
    let sink = RecordingSink::new();

    let mut runner = CommandRunner::with_sink(RunnerOptions::default(), Arc::new(sink.clone()))?;
    let report = with_timeout(runner.execute()).await?;

    assert_eq!(report.commands_written, 0);
    assert!(report.exit_status.is_some());
    assert!(sink.echoes().is_empty());
    assert!(sink.lines().is_empty());
    Ok(())
}

/// Scenario D: a `cd` in one command is still in effect for the next one,
/// because all commands share one shell session.
#[tokio::test]
async fn commands_share_working_directory() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    let sub = dir.path().join("sub");
    std::fs::create_dir(&sub)?;

    let mut runner = CommandRunner::with_sink(RunnerOptions::default(), Arc::new(RecordingSink::new()))?;
    runner.add(format!("cd '{}' && pwd > first.txt", sub.display()))?;
    runner.add("pwd > second.txt")?;
    with_timeout(runner.execute()).await?;

    let first = std::fs::read_to_string(sub.join("first.txt"))?;
    let second = std::fs::read_to_string(sub.join("second.txt"))?;
    assert_eq!(first, second);
    Ok(())
}

/// Shell variables set by one command are visible to later ones.
#[tokio::test]
async fn commands_share_shell_variables() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    let out = dir.path().join("var.txt");

    let mut runner = CommandRunner::with_sink(RunnerOptions::default(), Arc::new(RecordingSink::new()))?;
    runner.add("GREETING=hello")?;
    runner.add(format!("echo \"$GREETING\" > '{}'", out.display()))?;
    with_timeout(runner.execute()).await?;

    assert_eq!(read_lines(&out), vec!["hello"]);
    Ok(())
}

/// A failing command does not stop the sequence and is not reported.
#[tokio::test]
async fn failing_command_does_not_halt_sequence() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    let log = dir.path().join("after.log");

    let mut runner = CommandRunner::with_sink(RunnerOptions::default(), Arc::new(RecordingSink::new()))?;
    runner.add("false")?;
    runner.add("this-command-does-not-exist-blogsh")?;
    runner.add(format!("echo reached >> '{}'", log.display()))?;

    let report = with_timeout(runner.execute()).await?;
    assert_eq!(report.commands_written, 3);
    assert_eq!(read_lines(&log), vec!["reached"]);
    Ok(())
}
