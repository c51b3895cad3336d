//! # Launchers
//!
//! Detached launching of editors, browsers and desktop applications.
//! These spawn and forget; the assistant never waits on a GUI process.

use anyhow::{Context as AnyhowContext, Result};
use std::path::Path;

/// Editors the assistant knows how to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Editor {
    Idle,
    Vscode,
}

impl Editor {
    pub fn label(&self) -> &'static str {
        match self {
            Editor::Idle => "IDLE",
            Editor::Vscode => "VS Code",
        }
    }
}

/// Spawn an editor, optionally on a file. The child is detached.
pub fn open_editor(editor: Editor, target: Option<&Path>) -> Result<()> {
    let mut cmd = match editor {
        Editor::Idle => {
            let mut c = tokio::process::Command::new(python_interpreter());
            c.args(["-m", "idlelib"]);
            c
        }
        Editor::Vscode => tokio::process::Command::new("code"),
    };
    if let Some(path) = target {
        cmd.arg(path);
    }
    spawn_detached(cmd).with_context(|| format!("Failed to launch {}", editor.label()))
}

/// Open a URL in the default browser.
pub fn open_url(url: &str) -> Result<()> {
    let cmd = if cfg!(target_os = "windows") {
        let mut c = tokio::process::Command::new("cmd");
        c.args(["/C", "start", "", url]);
        c
    } else if cfg!(target_os = "macos") {
        let mut c = tokio::process::Command::new("open");
        c.arg(url);
        c
    } else {
        let mut c = tokio::process::Command::new("xdg-open");
        c.arg(url);
        c
    };
    spawn_detached(cmd).context("Failed to open browser")
}

/// Build a YouTube search-results URL for a query.
pub fn youtube_url(search_query: &str) -> String {
    format!(
        "https://www.youtube.com/results?search_query={}",
        urlencoding::encode(search_query)
    )
}

/// Build a Google search URL for a query.
pub fn google_url(query: &str) -> String {
    format!("https://www.google.com/search?q={}", urlencoding::encode(query))
}

/// Map a friendly application name to the command that launches it.
/// Unrecognized names are spawned as-is.
pub fn application_command(app_name: &str) -> &str {
    match app_name.to_lowercase().as_str() {
        "calculator" => {
            if cfg!(target_os = "windows") {
                "calc"
            } else if cfg!(target_os = "macos") {
                "open -a Calculator"
            } else {
                "gnome-calculator"
            }
        }
        "notepad" => "notepad",
        "paint" => "mspaint",
        "cmd" => "cmd",
        "powershell" => "powershell",
        "explorer" => "explorer",
        "chrome" => {
            if cfg!(target_os = "windows") {
                "chrome"
            } else {
                "google-chrome"
            }
        }
        "edge" => "msedge",
        "firefox" => "firefox",
        _ => app_name,
    }
}

/// Spawn an application by friendly name through the shell.
pub fn open_application(app_name: &str) -> Result<()> {
    let command = application_command(app_name).to_string();
    let mut cmd = if cfg!(target_os = "windows") {
        let mut c = tokio::process::Command::new("cmd");
        c.args(["/C", "start", "", &command]);
        c
    } else {
        let mut c = tokio::process::Command::new("sh");
        c.args(["-c", &command]);
        c
    };
    cmd.stdout(std::process::Stdio::null());
    cmd.stderr(std::process::Stdio::null());
    cmd.spawn()
        .map(|_| ())
        .with_context(|| format!("Failed to launch {}", app_name))
}

fn python_interpreter() -> &'static str {
    if cfg!(target_os = "windows") {
        "python"
    } else {
        "python3"
    }
}

fn spawn_detached(mut cmd: tokio::process::Command) -> Result<()> {
    cmd.stdout(std::process::Stdio::null());
    cmd.stderr(std::process::Stdio::null());
    cmd.spawn().map(|_| ()).map_err(anyhow::Error::from)
}
