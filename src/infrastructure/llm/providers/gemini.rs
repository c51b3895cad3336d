//! Gemini provider
//!
//! Talks to Google's `generateContent` endpoint. Gemini has no separate
//! system role, so system messages are folded into user turns.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::ProviderConfig;
use crate::infrastructure::llm::{Context, Error, MessageRole, Response, TokenUsage};

/// HTTP client reused across requests
fn http_client() -> &'static Client {
    use std::sync::OnceLock;
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client")
    })
}

/// Gemini API request format
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

/// Gemini content (message)
#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

/// Gemini content part
#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

/// Generation configuration
#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

/// Gemini API response format
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Vec<GeminiCandidate>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<GeminiUsage>,
}

/// Gemini response candidate
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct GeminiCandidate {
    content: GeminiContent,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

/// Gemini usage metadata
#[derive(Debug, Deserialize, Default)]
struct GeminiUsage {
    #[serde(rename = "promptTokenCount", default)]
    prompt_token_count: u32,
    #[serde(rename = "candidatesTokenCount", default)]
    candidates_token_count: u32,
    #[serde(rename = "totalTokenCount", default)]
    total_token_count: u32,
}

/// Execute a chat request using Gemini's API
pub async fn chat(config: ProviderConfig, context: Context) -> Result<Response, Error> {
    let base_url = config
        .base_url
        .unwrap_or_else(|| "https://generativelanguage.googleapis.com".to_string());

    let model = context.model.unwrap_or_else(|| {
        if config.default_model.is_empty() {
            "gemini-flash-latest".to_string()
        } else {
            config.default_model.clone()
        }
    });

    let url = format!(
        "{}/v1beta/models/{}:generateContent?key={}",
        base_url, model, config.api_key
    );

    // Convert messages to Gemini format
    // Note: Gemini doesn't have a separate system role - system messages become user messages
    let mut contents = Vec::new();
    for msg in &context.messages {
        let role = match msg.role {
            MessageRole::System => "user",
            MessageRole::User => "user",
            MessageRole::Assistant => "model",
        };
        let text = if msg.role == MessageRole::System {
            format!("System: {}", msg.content)
        } else {
            msg.content.clone()
        };
        contents.push(GeminiContent {
            role: role.to_string(),
            parts: vec![GeminiPart { text }],
        });
    }

    let generation_config = if context.temperature.is_some() || context.max_tokens.is_some() {
        Some(GenerationConfig {
            temperature: context.temperature,
            max_output_tokens: context.max_tokens,
        })
    } else {
        None
    };

    let request = GeminiRequest {
        contents,
        generation_config,
    };

    let mut request_builder = http_client()
        .post(&url)
        .header("Content-Type", "application/json")
        .json(&request);

    if let Some(timeout_secs) = config.timeout {
        request_builder = request_builder.timeout(std::time::Duration::from_secs(timeout_secs));
    }

    let response = request_builder
        .send()
        .await
        .map_err(|e| Error::new("gemini", format!("HTTP request failed: {}", e)))?;

    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error response".to_string());

        // Try to parse error message from response
        if let Ok(error_json) = serde_json::from_str::<serde_json::Value>(&error_text) {
            if let Some(error_msg) = error_json
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
            {
                return Err(Error::new(
                    "gemini",
                    format!("HTTP {}: {}", status, error_msg),
                ));
            }
        }

        return Err(Error::new(
            "gemini",
            format!("HTTP {}: {}", status, error_text),
        ));
    }

    let gemini_response: GeminiResponse = response
        .json()
        .await
        .map_err(|e| Error::new("gemini", format!("Failed to parse response: {}", e)))?;

    if gemini_response.candidates.is_empty() {
        return Err(Error::new("gemini", "No candidates in response"));
    }

    let candidate = &gemini_response.candidates[0];

    // Extract text from parts
    let content: String = candidate
        .content
        .parts
        .iter()
        .map(|part| part.text.clone())
        .collect::<Vec<_>>()
        .join("\n");

    let usage_metadata = gemini_response.usage_metadata.unwrap_or_default();

    Ok(Response {
        content,
        model,
        usage: TokenUsage {
            prompt_tokens: usage_metadata.prompt_token_count,
            completion_tokens: usage_metadata.candidates_token_count,
            total_tokens: usage_metadata.total_token_count,
        },
    })
}
