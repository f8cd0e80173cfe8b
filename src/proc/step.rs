// src/proc/step.rs

use std::path::PathBuf;
use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::process::Command;
use tracing::info;

/// A one-shot stage command: what to run, where, and under what name.
#[derive(Debug, Clone)]
pub struct StepSpec {
    /// Stable name used in logs (e.g. "deploy").
    pub name: String,
    /// Shell command line.
    pub cmd: String,
    /// Working directory.
    pub dir: PathBuf,
}

impl StepSpec {
    pub fn new(name: impl Into<String>, cmd: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            cmd: cmd.into(),
            dir: dir.into(),
        }
    }
}

/// Result of a one-shot stage process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Success,
    Failed(i32), // exit code
}

impl StepOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, StepOutcome::Success)
    }
}

/// Build a shell command appropriate for the platform.
pub(crate) fn shell_command(cmd_line: &str) -> Command {
    if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(cmd_line);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(cmd_line);
        c
    }
}

/// Run a one-shot stage command to completion.
///
/// The child inherits stdin/stdout/stderr; the pipeline only ever observes
/// the exit code, never the output. A spawn failure (e.g. missing shell or
/// unreadable working directory) is fatal and propagated with context.
pub async fn run_step(spec: &StepSpec) -> Result<StepOutcome> {
    info!(step = %spec.name, cmd = %spec.cmd, dir = %spec.dir.display(), "starting step process");

    let mut cmd = shell_command(&spec.cmd);
    cmd.current_dir(&spec.dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning process for step '{}'", spec.name))?;

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for process of step '{}'", spec.name))?;

    let code = status.code().unwrap_or(-1);
    let outcome = if status.success() {
        StepOutcome::Success
    } else {
        StepOutcome::Failed(code)
    };

    info!(
        step = %spec.name,
        exit_code = code,
        success = status.success(),
        "step process exited"
    );

    Ok(outcome)
}
