//! # Intent Planner
//!
//! Turns a free-text command into an `ActionPlan` via one model call.
//! Every failure mode degrades to a single-step `just_respond` plan; this
//! module never returns an error to its caller.

use crate::application::parsing;
use crate::domain::config::PipelineMode;
use crate::domain::traits::LlmProvider;
use crate::domain::types::{ActionPlan, WirePlan};
use crate::strings::{messages, prompts};
use std::sync::Arc;

/// What the planner produced: the plan itself and, when a model call
/// happened, the raw reply (used downstream for code-block surfacing).
#[derive(Debug)]
pub struct PlanOutcome {
    pub plan: ActionPlan,
    pub raw_reply: Option<String>,
}

pub struct IntentPlanner {
    llm: Arc<dyn LlmProvider>,
    mode: PipelineMode,
}

impl IntentPlanner {
    pub fn new(llm: Arc<dyn LlmProvider>, mode: PipelineMode) -> Self {
        Self { llm, mode }
    }

    /// Produce a plan for `command`. `profile_context` is the store's
    /// rendered summary; `extra_context` is the caller-supplied request
    /// context, if any.
    pub async fn plan(
        &self,
        command: &str,
        profile_context: &str,
        extra_context: Option<&str>,
    ) -> PlanOutcome {
        if !self.llm.is_configured() {
            return PlanOutcome {
                plan: ActionPlan::respond(messages::NOT_CONFIGURED),
                raw_reply: None,
            };
        }

        let prompt = match self.mode {
            PipelineMode::Actions => prompts::analysis_prompt(profile_context, command),
            PipelineMode::Chat => prompts::chat_prompt(command, profile_context, extra_context),
        };

        let reply = match self.llm.completion(&prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                return PlanOutcome {
                    plan: ActionPlan::respond(classify_model_error(&e)),
                    raw_reply: None,
                };
            }
        };

        let plan = match self.mode {
            // Chat mode: the reply is the answer, nothing to execute.
            PipelineMode::Chat => ActionPlan::respond(reply.clone()),
            PipelineMode::Actions => parse_plan(&reply),
        };

        PlanOutcome {
            plan,
            raw_reply: Some(reply),
        }
    }
}

/// Parse the model reply into a plan. Missing or malformed JSON degrades to
/// a `just_respond` plan carrying the raw reply verbatim.
fn parse_plan(reply: &str) -> ActionPlan {
    let Some(json) = parsing::extract_json_object(reply) else {
        tracing::debug!("No JSON object in model reply, falling back to respond");
        return ActionPlan::respond(reply);
    };

    match serde_json::from_str::<WirePlan>(json) {
        Ok(wire) => ActionPlan::from_wire(wire),
        Err(e) => {
            tracing::warn!("Model reply JSON did not parse as a plan: {}", e);
            ActionPlan::respond(reply)
        }
    }
}

/// Classify a model error into a user-facing message. Quota and rate-limit
/// failures get a distinct wait-and-retry guidance message.
fn classify_model_error(err: &str) -> String {
    if is_quota_error(err) {
        messages::QUOTA_EXCEEDED.to_string()
    } else {
        messages::model_error(err)
    }
}

fn is_quota_error(err: &str) -> bool {
    let lower = err.to_lowercase();
    err.contains("429") || lower.contains("quota") || err.contains("RESOURCE_EXHAUSTED")
}
