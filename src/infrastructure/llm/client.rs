//! # LLM Client
//!
//! Provides the `Client` struct, the main entry point for LLM interactions.
//! It routes requests to the configured provider and implements the domain
//! `LlmProvider` trait for the rest of the pipeline.

use crate::domain::config::AgentConfig;
use crate::domain::traits::LlmProvider;
use crate::infrastructure::llm::providers;
use crate::infrastructure::llm::{Context, Error, Provider, Response};
use async_trait::async_trait;

/// LLM client bound to one agent configuration.
pub struct Client {
    agent: AgentConfig,
}

impl Client {
    /// Create a new client from agent configuration
    pub fn new(agent: AgentConfig) -> Self {
        Self { agent }
    }

    /// Whether a usable credential is available for the configured provider.
    /// Absence degrades the planner, it never fails startup.
    pub fn is_configured(&self) -> bool {
        Provider::from_str(&self.agent.provider).is_some()
            && providers::resolve_api_key(&self.agent).is_ok()
    }

    /// Send a simple prompt to the configured agent.
    pub async fn prompt(&self, prompt: &str) -> Result<Response, Error> {
        let provider = Provider::from_str(&self.agent.provider)
            .ok_or_else(|| Error::new(&self.agent.provider, "Unknown provider"))?;

        let provider_config = providers::ProviderConfig::from_agent_config(&self.agent)?;

        let context = Context::prompt(prompt);
        providers::chat(provider, provider_config, context).await
    }
}

#[async_trait]
impl LlmProvider for Client {
    async fn completion(&self, prompt: &str) -> Result<String, String> {
        self.prompt(prompt)
            .await
            .map(|r| r.content)
            .map_err(|e| e.to_string())
    }

    fn is_configured(&self) -> bool {
        Client::is_configured(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_without_key() {
        let agent = AgentConfig {
            api_key: None,
            api_key_env: Some("VALET_TEST_KEY_THAT_DOES_NOT_EXIST".to_string()),
            ..AgentConfig::default()
        };
        assert!(!Client::new(agent).is_configured());
    }

    #[test]
    fn test_configured_with_inline_key() {
        let agent = AgentConfig {
            api_key: Some("k".to_string()),
            ..AgentConfig::default()
        };
        assert!(Client::new(agent).is_configured());
    }

    #[test]
    fn test_unknown_provider_is_unconfigured() {
        let agent = AgentConfig {
            provider: "mystery".to_string(),
            api_key: Some("k".to_string()),
            ..AgentConfig::default()
        };
        assert!(!Client::new(agent).is_configured());
    }
}
