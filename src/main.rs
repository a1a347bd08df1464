//! HTTP server for the PPh 21 engine.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use pph21_engine::api::{AppState, create_router};
use pph21_engine::config::ConfigLoader;

/// Serves PPh 21 calculations over HTTP.
#[derive(Parser, Debug)]
#[command(name = "pph21-server", version, about)]
struct Args {
    /// Directory holding tax_year.yaml, ptkp.yaml, brackets.yaml and ter.yaml.
    #[arg(long, default_value = "./config/pph21_2025")]
    config_dir: PathBuf,

    /// Use the compiled-in 2025 tables instead of reading --config-dir.
    #[arg(long)]
    builtin: bool,

    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:3000")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = if args.builtin {
        tracing::info!("Using built-in rate tables");
        ConfigLoader::builtin()
    } else {
        ConfigLoader::load(&args.config_dir).map_err(|e| {
            tracing::error!("Failed to load rate tables: {e}");
            e
        })?
    };

    let app = create_router(AppState::new(config));

    tracing::info!("PPh 21 engine listening on {}", args.bind);
    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
