use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use mcqgen_core::config_file;
use mcqgen_core::engine::OpenAiEngine;
use mcqgen_core::{EngineConfig, QuestionEngine};

mod handlers;
mod routes;
mod state;
mod template;
mod upload;

use state::AppState;

const DEFAULT_ADDR: &str = "0.0.0.0:8501";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mcqgen=debug,tower_http=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let file_config = config_file::load_config();
    let engine_config = EngineConfig::from_env(&file_config);
    if engine_config.api_key.is_none() {
        tracing::warn!("no API key configured; generation requests will fail until OPENAI_API_KEY is set");
    }
    tracing::debug!(config = ?engine_config, "engine configuration");

    let engine: Arc<dyn QuestionEngine> = Arc::new(OpenAiEngine::new(engine_config));
    let state = Arc::new(AppState {
        engine,
        http: reqwest::Client::new(),
        default_num: file_config.default_num(),
        default_difficulty: file_config.default_difficulty(),
    });

    let addr_str = std::env::var("MCQGEN_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let addr: SocketAddr = addr_str
        .parse()
        .with_context(|| format!("invalid MCQGEN_ADDR '{addr_str}'"))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening on http://{addr}");
    axum::serve(listener, routes::router(state)).await?;

    Ok(())
}
