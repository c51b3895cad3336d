//! # Action Registry
//!
//! The fixed catalog of operations a plan may invoke. Each handler
//! validates its own minimal precondition, delegates to the operating
//! environment, and converts every local failure into a failed
//! `ActionResult`. Nothing here returns an error to the executor.

pub mod exec;
pub mod launch;
pub mod workspace;

use crate::domain::config::TimeoutConfig;
use crate::domain::types::{ActionResult, ActionStep};
use launch::Editor;
use workspace::Workspace;

const PYTHON_STUB: &str = "# New Python File\n";

/// Stateless dispatcher over the closed action set.
#[derive(Debug, Clone)]
pub struct ActionRegistry {
    workspace: Workspace,
    timeouts: TimeoutConfig,
}

impl ActionRegistry {
    pub fn new(workspace: Workspace, timeouts: TimeoutConfig) -> Self {
        Self {
            workspace,
            timeouts,
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Dispatch one step. Returns `None` for steps that are not operations
    /// (`just_respond`) or that we do not recognize (`Unknown`); the
    /// executor decides how to surface those.
    pub async fn dispatch(&self, step: &ActionStep) -> Option<ActionResult> {
        match step {
            ActionStep::CreateFile { filename, content } => {
                Some(self.create_file(filename, content).await)
            }
            ActionStep::OpenIdle { filename } => {
                Some(self.open_editor(Editor::Idle, filename.as_deref()).await)
            }
            ActionStep::OpenVscode { filename } => {
                Some(self.open_editor(Editor::Vscode, filename.as_deref()).await)
            }
            ActionStep::RunCode { code } => Some(self.run_code(code).await),
            ActionStep::ExecuteCommand { command } => Some(self.execute_command(command).await),
            ActionStep::OpenYoutube { search_query } => Some(self.open_youtube(search_query)),
            ActionStep::OpenBrowser { url } => Some(self.open_browser(url)),
            ActionStep::GoogleSearch { query } => Some(self.google_search(query)),
            ActionStep::OpenApplication { app_name } => Some(self.open_application(app_name)),
            ActionStep::ListFiles => Some(self.list_files().await),
            ActionStep::ReadFile { filename } => Some(self.read_file(filename).await),
            ActionStep::DeleteFile { filename } => Some(self.delete_file(filename).await),
            ActionStep::JustRespond | ActionStep::Unknown(_) => None,
        }
    }

    pub async fn create_file(&self, filename: &str, content: &str) -> ActionResult {
        match self.workspace.write_file(filename, content).await {
            Ok(path) => ActionResult::ok(format!("✅ File created: {}", path.display()))
                .with_path(path.display().to_string()),
            Err(e) => ActionResult::fail(format!("❌ Error creating file: {:#}", e)),
        }
    }

    async fn open_editor(&self, editor: Editor, filename: Option<&str>) -> ActionResult {
        let target = match filename {
            Some(name) => match self.workspace.ensure_file(name, PYTHON_STUB).await {
                Ok(path) => Some(path),
                Err(e) => {
                    return ActionResult::fail(format!(
                        "❌ Error opening {}: {:#}",
                        editor.label(),
                        e
                    ));
                }
            },
            None => None,
        };

        match launch::open_editor(editor, target.as_deref()) {
            Ok(()) => {
                let mut result = match filename {
                    Some(name) => ActionResult::ok(format!(
                        "✅ {} opened with {}",
                        editor.label(),
                        name
                    )),
                    None => ActionResult::ok(format!("✅ {} opened", editor.label())),
                };
                if let Some(path) = target {
                    result = result.with_path(path.display().to_string());
                }
                result
            }
            Err(e) => ActionResult::fail(format!("❌ Error opening {}: {:#}", editor.label(), e)),
        }
    }

    pub async fn run_code(&self, code: &str) -> ActionResult {
        if code.trim().is_empty() {
            return ActionResult::fail("❌ No code to run");
        }
        match exec::run_python(code, self.workspace.root(), self.timeouts.code).await {
            Ok(outcome) => {
                let message = if outcome.success {
                    "✅ Code executed successfully"
                } else {
                    "⚠️ Code executed with errors"
                };
                ActionResult {
                    success: outcome.success,
                    ..ActionResult::ok(message)
                }
                .with_output(outcome.output)
                .with_exit_code(outcome.exit_code)
            }
            Err(e) => match e.downcast_ref::<exec::ExecTimeout>() {
                Some(timeout) => ActionResult::fail(format!(
                    "❌ Code execution timed out ({}s limit)",
                    timeout.seconds
                )),
                None => ActionResult::fail(format!("❌ Error executing code: {:#}", e)),
            },
        }
    }

    pub async fn execute_command(&self, command: &str) -> ActionResult {
        if command.trim().is_empty() {
            return ActionResult::fail("❌ Empty command");
        }
        match exec::run_shell(command, self.workspace.root(), self.timeouts.command).await {
            Ok(outcome) => ActionResult {
                success: outcome.success,
                ..ActionResult::ok("✅ Command executed")
            }
            .with_output(outcome.output)
            .with_exit_code(outcome.exit_code),
            Err(e) => match e.downcast_ref::<exec::ExecTimeout>() {
                Some(timeout) => ActionResult::fail(format!(
                    "❌ Command timed out ({}s limit)",
                    timeout.seconds
                )),
                None => ActionResult::fail(format!("❌ Error executing command: {:#}", e)),
            },
        }
    }

    fn open_youtube(&self, search_query: &str) -> ActionResult {
        let url = launch::youtube_url(search_query);
        match launch::open_url(&url) {
            Ok(()) => ActionResult::ok(format!("✅ YouTube opened with search: {}", search_query))
                .with_path(url),
            Err(e) => ActionResult::fail(format!("❌ Error opening YouTube: {:#}", e)),
        }
    }

    fn open_browser(&self, url: &str) -> ActionResult {
        if url.is_empty() {
            return ActionResult::fail("❌ No URL given");
        }
        match launch::open_url(url) {
            Ok(()) => ActionResult::ok(format!("✅ Browser opened: {}", url)),
            Err(e) => ActionResult::fail(format!("❌ Error opening browser: {:#}", e)),
        }
    }

    fn google_search(&self, query: &str) -> ActionResult {
        let url = launch::google_url(query);
        match launch::open_url(&url) {
            Ok(()) => {
                ActionResult::ok(format!("✅ Google search opened: {}", query)).with_path(url)
            }
            Err(e) => ActionResult::fail(format!("❌ Error opening Google: {:#}", e)),
        }
    }

    fn open_application(&self, app_name: &str) -> ActionResult {
        if app_name.is_empty() {
            return ActionResult::fail("❌ No application named");
        }
        match launch::open_application(app_name) {
            Ok(()) => ActionResult::ok(format!("✅ {} opened", app_name)),
            Err(e) => ActionResult::fail(format!("❌ Error opening {}: {:#}", app_name, e)),
        }
    }

    pub async fn list_files(&self) -> ActionResult {
        match self.workspace.list_files().await {
            Ok(files) => {
                ActionResult::ok(format!("✅ Found {} files", files.len())).with_files(files)
            }
            Err(e) => ActionResult::fail(format!("❌ Error listing files: {:#}", e)),
        }
    }

    pub async fn read_file(&self, filename: &str) -> ActionResult {
        match self.workspace.read_file(filename).await {
            Ok(content) => {
                ActionResult::ok(format!("✅ File read: {}", filename)).with_content(content)
            }
            Err(e) => ActionResult::fail(format!("❌ Error reading file: {:#}", e)),
        }
    }

    pub async fn delete_file(&self, filename: &str) -> ActionResult {
        match self.workspace.delete_file(filename).await {
            Ok(()) => ActionResult::ok(format!("✅ File deleted: {}", filename)),
            Err(e) => ActionResult::fail(format!("❌ Error deleting file: {:#}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn registry() -> (TempDir, ActionRegistry) {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::open(dir.path().join("ws")).unwrap();
        (dir, ActionRegistry::new(ws, TimeoutConfig::default()))
    }

    #[tokio::test]
    async fn test_create_read_delete_cycle() {
        let (_dir, registry) = registry();

        let created = registry.create_file("hello.txt", "hi").await;
        assert!(created.success);
        assert!(created.path.is_some());

        let read = registry.read_file("hello.txt").await;
        assert!(read.success);
        assert_eq!(read.content.as_deref(), Some("hi"));

        let deleted = registry.delete_file("hello.txt").await;
        assert!(deleted.success);

        let read_again = registry.read_file("hello.txt").await;
        assert!(!read_again.success);
    }

    #[tokio::test]
    async fn test_create_file_outside_workspace_fails_cleanly() {
        let (_dir, registry) = registry();
        let result = registry.create_file("../escape.txt", "x").await;
        assert!(!result.success);
        assert!(result.message.contains("Error creating file"));
    }

    #[tokio::test]
    async fn test_command_timeout_is_reported_as_timeout() {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::open(dir.path().join("ws")).unwrap();
        let registry = ActionRegistry::new(
            ws,
            TimeoutConfig {
                code: 1,
                command: 1,
            },
        );

        let result = registry.execute_command("sleep 5").await;
        assert!(!result.success);
        assert!(result.message.contains("timed out"));
    }

    #[tokio::test]
    async fn test_execute_command_captures_output() {
        let (_dir, registry) = registry();
        let result = registry.execute_command("echo out").await;
        assert!(result.success);
        assert_eq!(result.output.as_deref().map(str::trim), Some("out"));
        assert_eq!(result.exit_code, Some(0));
    }

    #[tokio::test]
    async fn test_dispatch_skips_respond_and_unknown() {
        let (_dir, registry) = registry();
        assert!(registry.dispatch(&ActionStep::JustRespond).await.is_none());
        assert!(
            registry
                .dispatch(&ActionStep::Unknown("frobnicate".to_string()))
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_empty_command_is_rejected() {
        let (_dir, registry) = registry();
        let result = registry.execute_command("  ").await;
        assert!(!result.success);
    }
}
