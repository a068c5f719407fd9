//! quakemap - renders live earthquakes and plate boundaries on a web map
//!
//! Fetches the USGS earthquake feed and the tectonic plate boundary dataset,
//! encodes magnitudes as circle radius and color, and produces a standalone
//! Leaflet page. Either writes the page once or serves a fresh render per request.
//!
//! Module structure:
//! - `domain/` - GeoJSON, earthquake observations, magnitude encoding, legend
//! - `io/` - Feed fetching, HTML page, file output, HTTP server
//! - `services/` - Layer building, map assembly, renderer
//! - `infra/` - Configuration

use anyhow::Context;
use clap::Parser;
use quakemap::infra::Config;
use quakemap::io::{render_page, start_map_server, write_page, HttpFeedSource};
use quakemap::services::render;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// quakemap - earthquake and fault line web map
#[derive(Parser, Debug)]
#[command(name = "quakemap", version, about)]
struct Args {
    /// Path to TOML configuration file (falls back to CONFIG_FILE, then config/dev.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Where to write the rendered HTML page
    #[arg(short, long, default_value = "quakemap.html")]
    output: PathBuf,

    /// Serve the map over HTTP instead of writing a file
    #[arg(long)]
    serve: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with configurable level via RUST_LOG env var
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .init();

    info!(git_hash = env!("GIT_HASH"), "quakemap starting");

    let args = Args::parse();

    let config = Config::load(args.config.as_deref()).with_env_overrides();

    info!(
        config_file = %config.config_file(),
        earthquakes_url = %config.earthquakes_url(),
        fault_lines_url = %config.fault_lines_url(),
        container_id = %config.container_id(),
        feed_timeout_ms = config.feed_timeout_ms(),
        "config_loaded"
    );

    if config.access_token().is_empty() {
        warn!("mapbox_access_token_missing");
    }

    let source = HttpFeedSource::new(Duration::from_millis(config.feed_timeout_ms()))
        .context("Failed to build HTTP client")?;

    if args.serve {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        tokio::spawn(async move {
            tokio::signal::ctrl_c().await.ok();
            info!("shutdown_signal_received");
            let _ = shutdown_tx.send(true);
        });

        start_map_server(Arc::new(config), Arc::new(source), shutdown_rx)
            .await
            .map_err(|e| anyhow::anyhow!(e))
            .context("Map server failed")?;
    } else {
        let rendered = render(&config, &source).await;
        rendered.summary.log();

        let html = render_page(&rendered.view, config.leaflet_url())
            .context("Failed to serialize map view")?;
        write_page(&args.output, &html)?;
    }

    info!("quakemap shutdown complete");
    Ok(())
}
