//! # Domain Traits
//!
//! Abstract interfaces for core system components (LLM, fact extraction).
//! Allows for pluggable implementations in the Infrastructure layer.

use async_trait::async_trait;

/// Abstract interface for an LLM Provider
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion for a prompt. The error is the provider's
    /// message text; callers classify it (quota, transport) by inspection.
    async fn completion(&self, prompt: &str) -> Result<String, String>;

    /// Whether a credential is available. When false, callers degrade to
    /// static responses instead of attempting a model call.
    fn is_configured(&self) -> bool;
}

/// Strategy for mining profile information out of conversation text.
///
/// The default implementation is regex-based and heuristic; keeping it
/// behind a trait lets a structured-extraction strategy replace it without
/// touching the store's persistence contract.
pub trait FactExtractor: Send + Sync {
    /// Extract a declared name, e.g. from "my name is Riya".
    fn extract_name(&self, text: &str) -> Option<String>;

    /// Extract a declared occupation, e.g. from "i work as a teacher".
    fn extract_occupation(&self, text: &str) -> Option<String>;

    /// Extract declared interests, e.g. from "i like chess".
    fn extract_interests(&self, text: &str) -> Vec<String>;

    /// Whether the text contains any personal-information trigger phrase.
    fn is_personal_info(&self, text: &str) -> bool;
}
