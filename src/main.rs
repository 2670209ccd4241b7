//! Server binary: CLI parsing, config assembly, startup, accept loop.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use http_server::config::{self, ServerConfig};
use http_server::files::FileStore;
use http_server::handlers;
use http_server::net::{self, Listener};

#[derive(Parser)]
#[command(name = "http-server")]
#[command(about = "Minimal HTTP/1.1 server with wildcard routing and file serving", long_about = None)]
struct Cli {
    /// Root directory served by the /files routes.
    #[arg(long)]
    directory: String,

    /// Address to listen on (overrides the config file).
    #[arg(long)]
    bind: Option<String>,

    /// Optional TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "http_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => ServerConfig::default(),
    };
    config.files.directory = cli.directory;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    let config = config::finalize(config)?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_connections = config.listener.max_connections,
        directory = %config.files.directory,
        "Configuration loaded"
    );

    let store = Arc::new(FileStore::new(&config.files.directory));
    store.ensure_root().await?;

    // Built once, immutable from here on; workers only ever read it.
    let router = Arc::new(handlers::build_router(store));

    let listener = Listener::bind(&config.listener).await?;

    net::serve(listener, router).await;
    Ok(())
}
