use anyhow::{Context, Result};
use articles_api::{api, articles::ArticleStore, config, logging};
use clap::Parser;
use std::net::IpAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Serve the in-memory article repository over HTTP.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Address to bind (overrides `ARTICLES_HOST`).
    #[arg(long)]
    host: Option<IpAddr>,
    /// Port to listen on (overrides `ARTICLES_PORT`).
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::init_config(cli.host, cli.port).context("failed to load configuration")?;
    logging::init_tracing(config.log_file.as_deref());
    tracing::debug!(
        host = %config.host,
        port = config.port,
        log_file = ?config.log_file,
        "Loaded configuration"
    );

    let app = api::create_router(Arc::new(ArticleStore::new()));

    let listener = TcpListener::bind((config.host, config.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;
    tracing::info!("Listening on http://{}:{}", config.host, config.port);
    axum::serve(listener, app)
        .await
        .context("HTTP server terminated unexpectedly")?;

    Ok(())
}
