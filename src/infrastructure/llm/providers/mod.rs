//! # LLM Providers
//!
//! Contains implementations for specific LLM providers (Gemini, OpenAI-compatible).
//! Gemini is the default; Groq rides the OpenAI-compatible API with a fixed endpoint.

mod gemini;
mod openai;

use crate::domain::config::AgentConfig;
use crate::infrastructure::llm::{Context, Error, Provider, Response};

/// Configuration for a provider
#[derive(Clone)]
pub struct ProviderConfig {
    /// API key
    pub api_key: String,
    /// Base URL (for non-default endpoints)
    pub base_url: Option<String>,
    /// Default model
    pub default_model: String,
    /// Timeout in seconds
    pub timeout: Option<u64>,
}

impl ProviderConfig {
    pub fn from_agent_config(config: &AgentConfig) -> Result<Self, Error> {
        let api_key = resolve_api_key(config)?;
        Ok(Self {
            api_key,
            base_url: config.endpoint.clone(),
            default_model: config.model.clone(),
            timeout: config.timeout,
        })
    }
}

/// Resolve the API key: explicit value first, then the configured
/// environment variable.
pub fn resolve_api_key(config: &AgentConfig) -> Result<String, Error> {
    if let Some(key) = &config.api_key {
        if !key.is_empty() {
            return Ok(key.clone());
        }
    }
    if let Some(env_var) = &config.api_key_env {
        return std::env::var(env_var).map_err(|e| {
            Error::new(
                &config.provider,
                format!("API key env var {} not set: {}", env_var, e),
            )
        });
    }
    Err(Error::new(
        &config.provider,
        "No API key provided - set api_key or api_key_env",
    ))
}

/// Execute a chat request with the specified provider
pub async fn chat(
    provider: Provider,
    config: ProviderConfig,
    context: Context,
) -> Result<Response, Error> {
    match provider {
        Provider::Gemini => gemini::chat(config, context).await,
        Provider::OpenAI => openai::chat(config, context).await,
        Provider::Groq => {
            // Groq uses OpenAI-compatible API
            let config_with_url = ProviderConfig {
                base_url: Some("https://api.groq.com/openai/v1".to_string()),
                ..config
            };
            openai::chat(config_with_url, context).await
        }
    }
}
