//! # Engine
//!
//! One command, end to end: render the stored profile into context, plan,
//! execute, fold the response, then mine the exchange for profile facts.
//! The engine is infallible from the caller's point of view; every failure
//! upstream has already been folded into response text.

use crate::application::executor::PlanExecutor;
use crate::application::parsing;
use crate::application::planner::IntentPlanner;
use crate::infrastructure::memory::ProfileStore;
use std::sync::Arc;

/// The finished exchange handed back to the interface layer.
#[derive(Debug)]
pub struct CommandOutcome {
    pub response: String,
    /// First fenced code block from the raw model reply, if any. Lets a
    /// frontend render code separately from prose.
    pub code: Option<String>,
    pub language: Option<String>,
}

pub struct Engine {
    planner: IntentPlanner,
    executor: PlanExecutor,
    store: Arc<ProfileStore>,
}

impl Engine {
    pub fn new(planner: IntentPlanner, executor: PlanExecutor, store: Arc<ProfileStore>) -> Self {
        Self {
            planner,
            executor,
            store,
        }
    }

    pub async fn handle_command(&self, command: &str, context: Option<&str>) -> CommandOutcome {
        let profile_context = self.store.context_summary().await;
        let outcome = self.planner.plan(command, &profile_context, context).await;

        tracing::info!(
            intent = %outcome.plan.intent,
            steps = outcome.plan.steps.len(),
            "Executing plan"
        );
        let report = self.executor.execute(&outcome.plan).await;

        // Fact mining happens after execution so the stored context reflects
        // what the user actually saw.
        self.store.extract_and_store(command, &report.response).await;

        let (code, language) = match &outcome.raw_reply {
            Some(reply) => match parsing::extract_code_blocks(reply).into_iter().next() {
                Some(block) => (Some(block.code), Some(block.language)),
                None => (None, None),
            },
            None => (None, None),
        };

        CommandOutcome {
            response: report.response,
            code,
            language,
        }
    }
}
