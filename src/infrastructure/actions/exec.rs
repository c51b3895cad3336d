//! # Process Execution
//!
//! Runs code snippets and shell commands with bounded timeouts. Exceeding
//! the timeout is a reported failure, not a hang.

use anyhow::{Context as AnyhowContext, Result};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

/// Captured outcome of a finished process.
#[derive(Debug)]
pub struct ExecOutcome {
    pub success: bool,
    /// stdout if non-empty, otherwise stderr.
    pub output: String,
    pub exit_code: i32,
}

/// Raised distinctly so callers can report a timeout-specific message.
#[derive(Debug)]
pub struct ExecTimeout {
    pub seconds: u64,
}

impl std::fmt::Display for ExecTimeout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "timed out after {}s", self.seconds)
    }
}

impl std::error::Error for ExecTimeout {}

/// Run a shell command in `cwd` with a timeout.
pub async fn run_shell(command: &str, cwd: &Path, timeout_secs: u64) -> Result<ExecOutcome> {
    let mut cmd = if cfg!(target_os = "windows") {
        let mut c = tokio::process::Command::new("cmd");
        c.args(["/C", command]);
        c
    } else {
        let mut c = tokio::process::Command::new("sh");
        c.args(["-c", command]);
        c
    };

    cmd.current_dir(cwd);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    cmd.kill_on_drop(true);

    let child = cmd.spawn().context("Failed to spawn command shell")?;

    let output = tokio::time::timeout(
        Duration::from_secs(timeout_secs),
        child.wait_with_output(),
    )
    .await
    .map_err(|_| ExecTimeout {
        seconds: timeout_secs,
    })?
    .context("Failed to collect command output")?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let text = if !stdout.is_empty() {
        stdout.to_string()
    } else {
        stderr.to_string()
    };

    Ok(ExecOutcome {
        success: output.status.success(),
        output: text,
        exit_code: output.status.code().unwrap_or(-1),
    })
}

/// Run a Python snippet: save it to a scratch file in `cwd` and execute the
/// interpreter on it with a timeout.
pub async fn run_python(code: &str, cwd: &Path, timeout_secs: u64) -> Result<ExecOutcome> {
    let scratch = cwd.join("_temp_exec.py");
    tokio::fs::write(&scratch, code)
        .await
        .context("Failed to write scratch file")?;

    let mut cmd = tokio::process::Command::new(python_interpreter());
    cmd.arg(&scratch);
    cmd.current_dir(cwd);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    cmd.kill_on_drop(true);

    let child = cmd.spawn().context("Failed to spawn python interpreter")?;

    let output = tokio::time::timeout(
        Duration::from_secs(timeout_secs),
        child.wait_with_output(),
    )
    .await
    .map_err(|_| ExecTimeout {
        seconds: timeout_secs,
    })?
    .context("Failed to collect interpreter output")?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let text = if !stdout.is_empty() {
        stdout.to_string()
    } else {
        stderr.to_string()
    };

    Ok(ExecOutcome {
        success: output.status.success(),
        output: text,
        exit_code: output.status.code().unwrap_or(-1),
    })
}

fn python_interpreter() -> &'static str {
    if cfg!(target_os = "windows") {
        "python"
    } else {
        "python3"
    }
}
