use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sprig_config::Config;
use sprig_docs::DocumentSet;
use sprig_llm::{GeminiClient, GeminiConfig};
use sprig_server::{run_server, AppState, RateLimiter};
use sprig_store::SqliteStore;

#[derive(Parser, Debug)]
#[command(name = "sprig-server")]
#[command(about = "Sprig support-chat HTTP server")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, env = "SPRIG_CONFIG", default_value = "sprig.json")]
    config: String,

    /// Server port (overrides config)
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Gemini API key (overrides config)
    #[arg(long, env = "GEMINI_API_KEY")]
    api_key: Option<String>,

    /// Model name (overrides config)
    #[arg(long, env = "GEMINI_MODEL")]
    model: Option<String>,

    /// Documentation file path (overrides config)
    #[arg(long, env = "SPRIG_DOCS")]
    docs: Option<String>,

    /// Database file path (overrides config)
    #[arg(long, env = "SPRIG_DB")]
    db: Option<String>,

    /// Log filter (overrides config)
    #[arg(long, env = "RUST_LOG")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_or_default(&cli.config)
        .await
        .with_context(|| format!("failed to load config from {}", cli.config))?;

    // CLI flags and env vars win over the config file.
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(api_key) = cli.api_key {
        config.llm.api_key = Some(api_key);
    }
    if let Some(model) = cli.model {
        config.llm.model = model;
    }
    if let Some(docs) = cli.docs {
        config.docs.path = docs;
    }
    if let Some(db) = cli.db {
        config.storage.path = db;
    }

    let filter = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let api_key = config
        .llm
        .api_key
        .clone()
        .context("missing Gemini API key (set GEMINI_API_KEY or llm.api_key)")?;

    let docs = DocumentSet::load(&config.docs.path)
        .await
        .with_context(|| format!("failed to load documentation from {}", config.docs.path))?;
    if docs.is_empty() {
        tracing::warn!("documentation set is empty; every question will get the fallback reply");
    }

    let store = SqliteStore::open(&config.storage.path)
        .with_context(|| format!("failed to open database at {}", config.storage.path))?;

    let generator = GeminiClient::new(
        GeminiConfig::new(api_key)
            .with_model(config.llm.model.clone())
            .with_base_url(config.llm.base_url.clone())
            .with_timeout(Duration::from_secs(config.llm.timeout_seconds)),
    )?;

    let limiter = RateLimiter::new(
        config.limits.max_requests,
        Duration::from_secs(config.limits.window_secs),
    );

    tracing::info!(
        model = %config.llm.model,
        docs = docs.len(),
        db = %config.storage.path,
        "starting sprig server"
    );

    let state = AppState::new(
        Arc::new(docs),
        Arc::new(store),
        Arc::new(generator),
        Arc::new(limiter),
        Arc::new(config),
    );

    run_server(state).await
}
