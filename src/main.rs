use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use visisec_backend::{create_router, AppState, Config, LlmClient, SessionRegistry};

#[derive(Debug, Parser)]
#[command(name = "visisec-backend", version, about = "Multimodal meeting assistant backend")]
struct Args {
    /// Config file (extension optional)
    #[arg(short, long, default_value = "config/visisec")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));
    info!(
        "Session limits: {} samples, {} keyframes",
        cfg.session.max_samples, cfg.session.max_keyframes
    );

    let registry = Arc::new(SessionRegistry::new(cfg.session.clone()));

    let mut state = AppState::new(Arc::clone(&registry));
    state.service_name = cfg.service.name.clone();
    state.upload_max_bytes = cfg.upload.max_bytes;

    match &cfg.llm {
        Some(llm_cfg) if !llm_cfg.api_key.trim().is_empty() => {
            state = state.with_llm(Arc::new(LlmClient::new(llm_cfg)?));
        }
        Some(_) => warn!("LLM api_key is empty, summaries will use placeholder text"),
        None => info!("No LLM configured, summaries will use placeholder text"),
    }

    let app = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    // Upgraded sockets may outlive the server future; close their sessions here
    let swept = registry.finalize_all().await;
    info!(
        "Shutting down: finalized {} live sessions, {} recordings total",
        swept.len(),
        registry.records().await.len()
    );

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
