//! # Domain Types
//!
//! The action plan model: the structured plan the LLM produces for one
//! command, the closed set of action steps, and per-step results.

use serde::Deserialize;

/// A single step in an action plan.
///
/// This is a closed set: the executor dispatches exhaustively over these
/// variants. Tags the model invents that we do not recognize land in
/// `Unknown` and are skipped rather than failing the whole plan.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionStep {
    CreateFile { filename: String, content: String },
    OpenIdle { filename: Option<String> },
    OpenVscode { filename: Option<String> },
    RunCode { code: String },
    ExecuteCommand { command: String },
    OpenYoutube { search_query: String },
    OpenBrowser { url: String },
    GoogleSearch { query: String },
    OpenApplication { app_name: String },
    ListFiles,
    ReadFile { filename: String },
    DeleteFile { filename: String },
    JustRespond,
    Unknown(String),
}

impl ActionStep {
    /// Convert a wire-format step (tag + loose params object) into a typed step.
    /// Missing parameters take documented defaults; unknown tags are preserved.
    pub fn from_wire(tag: &str, params: &serde_json::Value) -> Self {
        let text = |key: &str| -> String {
            params
                .get(key)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };
        let opt_text = |key: &str| -> Option<String> {
            params
                .get(key)
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
        };

        match tag {
            "create_file" => {
                let filename = params
                    .get("filename")
                    .and_then(|v| v.as_str())
                    .filter(|s| !s.is_empty())
                    .unwrap_or("script.py")
                    .to_string();
                ActionStep::CreateFile {
                    filename,
                    content: text("content"),
                }
            }
            "open_idle" => ActionStep::OpenIdle {
                filename: opt_text("filename"),
            },
            "open_vscode" => ActionStep::OpenVscode {
                filename: opt_text("filename"),
            },
            "run_code" => ActionStep::RunCode { code: text("code") },
            "execute_command" => ActionStep::ExecuteCommand {
                command: text("command"),
            },
            "open_youtube" => ActionStep::OpenYoutube {
                search_query: text("search_query"),
            },
            "open_browser" => ActionStep::OpenBrowser { url: text("url") },
            "google_search" => ActionStep::GoogleSearch {
                query: text("query"),
            },
            "open_application" => ActionStep::OpenApplication {
                app_name: text("app_name"),
            },
            "list_files" => ActionStep::ListFiles,
            "read_file" => ActionStep::ReadFile {
                filename: text("filename"),
            },
            "delete_file" => ActionStep::DeleteFile {
                filename: text("filename"),
            },
            "just_respond" => ActionStep::JustRespond,
            other => ActionStep::Unknown(other.to_string()),
        }
    }
}

/// Wire format of a plan step as the model emits it.
#[derive(Debug, Deserialize)]
pub struct WireStep {
    #[serde(rename = "type")]
    pub tag: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Wire format of the whole plan: `{"intent": ..., "actions": [...], "response": ...}`.
#[derive(Debug, Deserialize)]
pub struct WirePlan {
    #[serde(default)]
    pub intent: String,
    #[serde(default)]
    pub actions: Vec<WireStep>,
    #[serde(default)]
    pub response: String,
}

/// An ordered action plan for one command. Immutable after parse,
/// discarded after execution.
#[derive(Debug, Clone)]
pub struct ActionPlan {
    /// Model's one-line summary of what the user wants.
    pub intent: String,
    /// Steps to execute, in order.
    pub steps: Vec<ActionStep>,
    /// User-facing explanation of what will be done.
    pub explanation: String,
}

impl ActionPlan {
    /// Build a plan from the wire format.
    pub fn from_wire(wire: WirePlan) -> Self {
        let steps = wire
            .actions
            .iter()
            .map(|step| ActionStep::from_wire(&step.tag, &step.params))
            .collect();
        Self {
            intent: wire.intent,
            steps,
            explanation: wire.response,
        }
    }

    /// The designed degradation path: a single-step plan that just replies
    /// with `text`. Used when the model output has no parseable JSON, when
    /// the credential is missing, and for plain chat mode.
    pub fn respond(text: impl Into<String>) -> Self {
        Self {
            intent: "respond".to_string(),
            steps: vec![ActionStep::JustRespond],
            explanation: text.into(),
        }
    }
}

/// Outcome of executing one action step.
///
/// Every registry handler converts its local failures into one of these;
/// nothing propagates past the registry as an error.
#[derive(Debug, Clone)]
pub struct ActionResult {
    pub success: bool,
    pub message: String,
    pub path: Option<String>,
    pub output: Option<String>,
    pub exit_code: Option<i32>,
    pub files: Option<Vec<String>>,
    pub content: Option<String>,
}

impl ActionResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            path: None,
            output: None,
            exit_code: None,
            files: None,
            content: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            ..Self::ok(message)
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_exit_code(mut self, code: i32) -> Self {
        self.exit_code = Some(code);
        self
    }

    pub fn with_files(mut self, files: Vec<String>) -> Self {
        self.files = Some(files);
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// A fenced code block extracted from markdown-formatted model output.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    pub language: String,
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_step_from_wire_defaults() {
        let step = ActionStep::from_wire("create_file", &json!({}));
        assert_eq!(
            step,
            ActionStep::CreateFile {
                filename: "script.py".to_string(),
                content: String::new()
            }
        );
    }

    #[test]
    fn test_step_from_wire_unknown_tag() {
        let step = ActionStep::from_wire("launch_rocket", &json!({"target": "moon"}));
        assert_eq!(step, ActionStep::Unknown("launch_rocket".to_string()));
    }

    #[test]
    fn test_plan_from_wire_preserves_order() {
        let wire: WirePlan = serde_json::from_value(json!({
            "intent": "write and open",
            "actions": [
                {"type": "create_file", "params": {"filename": "a.py", "content": "x"}},
                {"type": "open_vscode", "params": {"filename": "a.py"}}
            ],
            "response": "Creating a.py and opening it."
        }))
        .unwrap();

        let plan = ActionPlan::from_wire(wire);
        assert_eq!(plan.steps.len(), 2);
        assert!(matches!(plan.steps[0], ActionStep::CreateFile { .. }));
        assert!(matches!(plan.steps[1], ActionStep::OpenVscode { .. }));
    }

    #[test]
    fn test_wire_step_without_params() {
        let step: WireStep = serde_json::from_value(json!({"type": "just_respond"})).unwrap();
        assert_eq!(
            ActionStep::from_wire(&step.tag, &step.params),
            ActionStep::JustRespond
        );
    }

    #[test]
    fn test_respond_plan_shape() {
        let plan = ActionPlan::respond("hello");
        assert_eq!(plan.steps, vec![ActionStep::JustRespond]);
        assert_eq!(plan.explanation, "hello");
    }
}
