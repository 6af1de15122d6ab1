//! CLI entry point for the nodegate REST server.

use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

use nodegate_api::config::AppConfig;
use nodegate_api::{router, AppState};
use nodegate_graph::GraphClient;

#[derive(Parser)]
#[command(name = "nodegate")]
#[command(about = "REST facade over a Neo4j property graph")]
struct Cli {
    /// Config file prefix (default: nodegate).
    #[arg(short, long, default_value = "nodegate")]
    config: String,

    /// Listen address, overriding server.bind.
    #[arg(short, long)]
    bind: Option<String>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if cli.json_logs {
        fmt().with_env_filter(filter).json().init();
    } else {
        fmt().with_env_filter(filter).init();
    }

    let mut app_config = AppConfig::load(&cli.config)?;
    if let Some(bind) = cli.bind {
        app_config.server.bind = bind;
    }

    // Connect to Neo4j.
    let graph = GraphClient::connect(&app_config.neo4j).await?;

    let state = AppState::new(Arc::new(graph.clone()), app_config.auth.token.as_str());
    let app = router(state);

    let listener = TcpListener::bind(&app_config.server.bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "nodegate listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router and its store clone were dropped when serve returned.
    graph.close();
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown requested"),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
