//! newsfront server binary.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use newsfront::config::ConfigSource;
use newsfront::{FrontConfig, FrontServer};
use newsfront_upstream::HttpNewsSource;

/// Company and news front end over a remote company/news API.
#[derive(Parser)]
#[command(name = "newsfront", version, about)]
struct Cli {
    /// Path to TOML configuration file (default: ~/.config/newsfront/config.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on, overriding config and environment.
    #[arg(short, long)]
    port: Option<u16>,

    /// Upstream API base URL, overriding config and environment.
    #[arg(short, long)]
    upstream: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // An explicit --config must exist; the default path is optional.
    let (mut config, source) = match cli.config {
        Some(path) => (FrontConfig::from_file(&path)?, ConfigSource::File(path)),
        None => FrontConfig::from_file_or_default(&FrontConfig::default_config_path())?,
    };
    config.apply_env_overrides()?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(upstream) = cli.upstream {
        config.upstream.base_url = upstream;
    }
    config.validate()?;

    newsfront::logging::init(&config.logging)?;
    tracing::info!(
        config = %source,
        upstream = %config.upstream.base_url,
        "newsfront starting"
    );

    let source = HttpNewsSource::new(&config.upstream)?;
    let server = FrontServer::start(Arc::new(source), &config.server).await?;

    tokio::select! {
        result = server.wait() => {
            result.map_err(|e| {
                tracing::error!(error = %e, "newsfront exited with error");
                anyhow::anyhow!("newsfront failed: {e}")
            })?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("newsfront shutting down");
        }
    }
    Ok(())
}
