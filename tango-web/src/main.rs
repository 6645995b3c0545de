use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tango::{AzureTranslator, TranslationGateway, TranslatorConfig, WordStore};
use tracing::info;

mod app;
mod error;
mod handlers;

use app::{AppState, router};

/// HTTP backend for the tango flashcard app
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "TANGO_BIND", default_value = "0.0.0.0:5000")]
    bind: SocketAddr,

    /// SQLite database file
    #[arg(long, env = "TANGO_DATABASE", default_value = "words.db")]
    database: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // Refuse to start without provider credentials
    let config = TranslatorConfig::from_env()
        .map_err(|e| format!("Failed to load translator configuration: {}", e))?;
    let translator = AzureTranslator::new(config)?;
    let gateway = TranslationGateway::new(Arc::new(translator));

    // Schema is created here, before any request is accepted
    let store = WordStore::open(&args.database)?;
    let state = AppState::new(gateway, Arc::new(store));

    info!("Starting tango web server");

    let app = router(state);
    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    info!("Server running at http://{}", args.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
