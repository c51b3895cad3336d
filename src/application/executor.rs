//! # Plan Executor
//!
//! Drives an `ActionPlan` through the action registry, strictly in order.
//! Later steps may depend on artifacts created by earlier ones, so each
//! step (including any nested content-generation call) completes before the
//! next begins. No result is dropped; failures are surfaced, not hidden.

use crate::application::parsing;
use crate::domain::traits::LlmProvider;
use crate::domain::types::{ActionPlan, ActionResult, ActionStep};
use crate::infrastructure::actions::ActionRegistry;
use crate::strings::{messages, prompts};
use std::sync::Arc;

/// The executed plan: per-step results in execution order plus the folded
/// user-facing response text.
#[derive(Debug)]
pub struct ExecutionReport {
    pub results: Vec<ActionResult>,
    pub response: String,
}

pub struct PlanExecutor {
    registry: ActionRegistry,
    llm: Arc<dyn LlmProvider>,
}

impl PlanExecutor {
    pub fn new(registry: ActionRegistry, llm: Arc<dyn LlmProvider>) -> Self {
        Self { registry, llm }
    }

    pub async fn execute(&self, plan: &ActionPlan) -> ExecutionReport {
        let mut results = Vec::new();

        for step in &plan.steps {
            match step {
                ActionStep::CreateFile { filename, content } if content.is_empty() => {
                    let result = self.create_with_generated_content(filename, &plan.intent).await;
                    results.push(result);
                }
                ActionStep::Unknown(tag) => {
                    tracing::warn!("Ignoring unrecognized action tag from model: {}", tag);
                }
                step => {
                    if let Some(result) = self.registry.dispatch(step).await {
                        results.push(result);
                    }
                }
            }
        }

        let response = aggregate(&plan.explanation, &results);
        ExecutionReport { results, response }
    }

    /// `create_file` arrived with no body: ask the model to write one from
    /// the plan's intent. A fenced code block in the reply becomes the file
    /// body (fences stripped); otherwise the raw reply is used verbatim.
    async fn create_with_generated_content(&self, filename: &str, intent: &str) -> ActionResult {
        let prompt = prompts::content_prompt(intent);
        let content = match self.llm.completion(&prompt).await {
            Ok(reply) => {
                let blocks = parsing::extract_code_blocks(&reply);
                match blocks.into_iter().next() {
                    Some(block) => block.code,
                    None => reply,
                }
            }
            Err(e) => {
                return ActionResult::fail(messages::content_generation_failed(&e));
            }
        };

        self.registry.create_file(filename, &content).await
    }
}

/// Fold the plan explanation and per-step results into one response text:
/// one line per result, in execution order, with captured output inlined.
fn aggregate(explanation: &str, results: &[ActionResult]) -> String {
    let mut response = if explanation.is_empty() {
        "Done!".to_string()
    } else {
        explanation.to_string()
    };

    if !results.is_empty() {
        response.push_str(messages::ACTIONS_HEADER);
        for result in results {
            response.push_str(&format!("\n{}", result.message));
            if let Some(output) = &result.output {
                if !output.is_empty() {
                    response.push_str(&format!("\nOutput: {}", output));
                }
            }
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::TimeoutConfig;
    use crate::infrastructure::actions::workspace::Workspace;
    use async_trait::async_trait;
    use tempfile::TempDir;

    struct FakeLlm {
        reply: Result<String, String>,
    }

    #[async_trait]
    impl LlmProvider for FakeLlm {
        async fn completion(&self, _prompt: &str) -> Result<String, String> {
            self.reply.clone()
        }

        fn is_configured(&self) -> bool {
            true
        }
    }

    fn executor_with(dir: &TempDir, llm: FakeLlm) -> (PlanExecutor, Workspace) {
        let workspace = Workspace::open(dir.path().join("ws")).unwrap();
        let registry = ActionRegistry::new(workspace.clone(), TimeoutConfig::default());
        (PlanExecutor::new(registry, Arc::new(llm)), workspace)
    }

    fn plan(steps: Vec<ActionStep>) -> ActionPlan {
        ActionPlan {
            intent: "test intent".to_string(),
            steps,
            explanation: "On it.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_steps_run_in_order_once_each() {
        let dir = TempDir::new().unwrap();
        let (executor, _ws) = executor_with(
            &dir,
            FakeLlm {
                reply: Ok(String::new()),
            },
        );

        let report = executor
            .execute(&plan(vec![
                ActionStep::CreateFile {
                    filename: "a.txt".to_string(),
                    content: "first".to_string(),
                },
                ActionStep::ReadFile {
                    filename: "a.txt".to_string(),
                },
                ActionStep::DeleteFile {
                    filename: "a.txt".to_string(),
                },
            ]))
            .await;

        assert_eq!(report.results.len(), 3);
        assert!(report.results.iter().all(|r| r.success));
        assert!(report.results[0].message.contains("File created"));
        assert!(report.results[1].message.contains("File read"));
        assert!(report.results[2].message.contains("File deleted"));
    }

    #[tokio::test]
    async fn test_empty_content_triggers_generation_and_strips_fences() {
        let dir = TempDir::new().unwrap();
        let (executor, workspace) = executor_with(
            &dir,
            FakeLlm {
                reply: Ok("Sure:\n```python\nprint('generated')\n```\nEnjoy!".to_string()),
            },
        );

        let report = executor
            .execute(&plan(vec![ActionStep::CreateFile {
                filename: "gen.py".to_string(),
                content: String::new(),
            }]))
            .await;

        assert!(report.results[0].success);
        let body = workspace.read_file("gen.py").await.unwrap();
        assert_eq!(body, "print('generated')");
        assert!(!body.contains("```"));
    }

    #[tokio::test]
    async fn test_generation_without_fence_uses_raw_reply() {
        let dir = TempDir::new().unwrap();
        let (executor, workspace) = executor_with(
            &dir,
            FakeLlm {
                reply: Ok("plain reply body".to_string()),
            },
        );

        executor
            .execute(&plan(vec![ActionStep::CreateFile {
                filename: "raw.txt".to_string(),
                content: String::new(),
            }]))
            .await;

        assert_eq!(
            workspace.read_file("raw.txt").await.unwrap(),
            "plain reply body"
        );
    }

    #[tokio::test]
    async fn test_generation_failure_is_a_failed_result() {
        let dir = TempDir::new().unwrap();
        let (executor, workspace) = executor_with(
            &dir,
            FakeLlm {
                reply: Err("model down".to_string()),
            },
        );

        let report = executor
            .execute(&plan(vec![ActionStep::CreateFile {
                filename: "never.py".to_string(),
                content: String::new(),
            }]))
            .await;

        assert!(!report.results[0].success);
        assert!(report.results[0].message.contains("model down"));
        assert!(workspace.read_file("never.py").await.is_err());
    }

    #[tokio::test]
    async fn test_unknown_tags_are_skipped_not_fatal() {
        let dir = TempDir::new().unwrap();
        let (executor, _ws) = executor_with(
            &dir,
            FakeLlm {
                reply: Ok(String::new()),
            },
        );

        let report = executor
            .execute(&plan(vec![
                ActionStep::Unknown("frobnicate".to_string()),
                ActionStep::CreateFile {
                    filename: "after.txt".to_string(),
                    content: "x".to_string(),
                },
            ]))
            .await;

        // The unknown tag produced no result but did not stop the plan
        assert_eq!(report.results.len(), 1);
        assert!(report.results[0].success);
    }

    #[tokio::test]
    async fn test_aggregate_has_one_line_per_result_with_output() {
        let dir = TempDir::new().unwrap();
        let (executor, _ws) = executor_with(
            &dir,
            FakeLlm {
                reply: Ok(String::new()),
            },
        );

        let report = executor
            .execute(&plan(vec![
                ActionStep::ExecuteCommand {
                    command: "echo visible".to_string(),
                },
                ActionStep::ReadFile {
                    filename: "missing.txt".to_string(),
                },
            ]))
            .await;

        assert_eq!(report.results.len(), 2);
        assert!(report.response.starts_with("On it."));
        assert!(report.response.contains("**Actions Performed:**"));
        assert!(report.response.contains("Command executed"));
        assert!(report.response.contains("Output: visible"));
        // The failure is surfaced, not hidden
        assert!(report.response.contains("Error reading file"));
    }

    #[tokio::test]
    async fn test_respond_only_plan_has_no_action_lines() {
        let dir = TempDir::new().unwrap();
        let (executor, _ws) = executor_with(
            &dir,
            FakeLlm {
                reply: Ok(String::new()),
            },
        );

        let report = executor
            .execute(&ActionPlan::respond("Just an answer"))
            .await;

        assert!(report.results.is_empty());
        assert_eq!(report.response, "Just an answer");
    }
}
