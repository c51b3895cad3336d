//! # Configuration
//!
//! Manages the loading and parsing of the application's configuration file (`config.yaml`).
//! Defines the structs for server settings, the LLM agent, workspace and timeouts.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`. Every section has sensible
/// defaults so the daemon starts with no config file at all.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file. A missing file is not an error
    /// (defaults apply); a malformed file is.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))
    }
}

/// HTTP server settings.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Origins allowed by the CORS layer (the desktop frontend, typically).
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:5173".to_string(),
    ]
}

/// How the planner drives the pipeline.
#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PipelineMode {
    /// Full plan-and-execute pipeline (the canonical mode).
    #[default]
    Actions,
    /// Plain conversational mode: the model answers, no actions run.
    Chat,
}

/// Configuration for the LLM agent.
#[derive(Debug, Deserialize, Clone)]
pub struct AgentConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable holding the API key, e.g. "GEMINI_API_KEY".
    #[serde(default = "default_api_key_env")]
    pub api_key_env: Option<String>,
    /// Per-request timeout override in seconds.
    #[serde(default)]
    pub timeout: Option<u64>,
    #[serde(default)]
    pub mode: PipelineMode,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            endpoint: None,
            api_key: None,
            api_key_env: default_api_key_env(),
            timeout: None,
            mode: PipelineMode::default(),
        }
    }
}

fn default_provider() -> String {
    "gemini".to_string()
}
fn default_model() -> String {
    "gemini-flash-latest".to_string()
}
fn default_api_key_env() -> Option<String> {
    Some("GEMINI_API_KEY".to_string())
}

/// Workspace settings. All file-creating/reading/deleting actions are
/// confined under this root.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct WorkspaceConfig {
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl WorkspaceConfig {
    /// Resolve the workspace root: configured dir, or `~/ValetWorkspace`.
    pub fn root(&self) -> PathBuf {
        if let Some(dir) = &self.dir {
            return dir.clone();
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ValetWorkspace")
    }
}

/// Execution timeouts, in seconds.
#[derive(Debug, Deserialize, Clone)]
pub struct TimeoutConfig {
    /// Timeout for `run_code` steps.
    #[serde(default = "default_code_timeout")]
    pub code: u64,
    /// Timeout for `execute_command` steps.
    #[serde(default = "default_command_timeout")]
    pub command: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            code: default_code_timeout(),
            command: default_command_timeout(),
        }
    }
}

fn default_code_timeout() -> u64 {
    10
}
fn default_command_timeout() -> u64 {
    30
}
