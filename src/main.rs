use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use resource_router::config::{load_config, validate_config, ConfigError, ServerConfig};
use resource_router::lifecycle::{build_server, spawn_signal_listener, Shutdown};
use resource_router::observability::logging;

#[derive(Parser)]
#[command(name = "resource-router")]
#[command(about = "Serve REST resources through a declarative resource router", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override observability.log_level.
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init(&config.observability)?;
    tracing::info!("resource-router v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        books = config.books.enabled,
        inspect = config.inspect.enabled,
        "Configuration loaded"
    );

    let bind_address = config.listener.bind_address.clone();
    let server = build_server(config)?;
    let listener = TcpListener::bind(&bind_address).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    spawn_signal_listener(shutdown);

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
