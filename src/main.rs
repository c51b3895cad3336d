//! # Main Entry Point
//!
//! Initializes the application layer by layer:
//! - Domain: Configuration and Types
//! - Infrastructure: Actions, LLM, Memory
//! - Application: Planner, Executor, Engine
//! - Interface: HTTP API

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::engine::Engine;
use crate::application::executor::PlanExecutor;
use crate::application::planner::IntentPlanner;
use crate::domain::config::AppConfig;
use crate::domain::traits::LlmProvider;
use crate::infrastructure::actions::workspace::Workspace;
use crate::infrastructure::actions::ActionRegistry;
use crate::infrastructure::llm::Client as LlmClient;
use crate::infrastructure::memory::extract::RegexFactExtractor;
use crate::infrastructure::memory::ProfileStore;
use crate::interface::http::{self, AppState};

#[derive(Parser, Debug)]
#[command(name = "valet", about = "Local AI assistant daemon")]
struct Args {
    /// Path to the YAML configuration file
    #[arg(long, default_value = "data/config.yaml")]
    config: PathBuf,

    /// Override the configured listen port
    #[arg(long)]
    port: Option<u16>,

    /// Override the configured listen host
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load Configuration
    let mut config = AppConfig::load(&args.config)?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }

    // 2. Logging Setup
    if !std::path::Path::new("data").exists() {
        fs::create_dir("data").context("Failed to create data directory")?;
    }

    let file_appender = tracing_appender::rolling::never("data", "valet.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,hyper=warn,reqwest=warn"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);
    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    tracing::info!("Starting Valet...");

    // 3. Initialize Infrastructure
    let workspace = Workspace::open(config.workspace.root())
        .context("Failed to prepare the workspace directory")?;
    tracing::info!("Workspace: {:?}", workspace.root());

    let store = Arc::new(ProfileStore::open(
        workspace.profile_path(),
        Box::new(RegexFactExtractor::new()),
    ));

    let llm = LlmClient::new(config.agent.clone());
    let ai_configured = llm.is_configured();
    if !ai_configured {
        tracing::warn!(
            "No usable API key for provider '{}'; commands will get a configuration notice",
            config.agent.provider
        );
    }
    let llm: Arc<dyn LlmProvider> = Arc::new(llm);

    // 4. Initialize Application
    let registry = ActionRegistry::new(workspace, config.timeouts.clone());
    let planner = IntentPlanner::new(llm.clone(), config.agent.mode);
    let executor = PlanExecutor::new(registry, llm);
    let engine = Arc::new(Engine::new(planner, executor, store.clone()));

    // 5. Serve
    let state = AppState {
        engine,
        store,
        ai_configured,
    };
    let router = http::router(state, &config.server);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, router)
        .await
        .context("HTTP server exited")?;

    Ok(())
}
