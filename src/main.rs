use anyhow::{Context, Result};
use std::env;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};
use vpngate_scraper::{pipeline, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::default().add_directive(log_level.parse().unwrap_or(Level::INFO.into()))
    });
    fmt().with_env_filter(filter).with_target(false).init();
    info!("startup");

    // ─── 2) settings ─────────────────────────────────────────────────
    let settings = Settings::from_env().context("reading settings from environment")?;
    info!(
        url = %settings.source_url,
        format = ?settings.format,
        output = %settings.output_path.display(),
        "configured"
    );

    // ─── 3) fetch → parse → transform → write ────────────────────────
    let summary = pipeline::run(&settings)
        .await
        .with_context(|| format!("scraping {}", settings.source_url))?;

    info!(
        parsed = summary.parsed,
        malformed = summary.malformed,
        dropped = summary.dropped,
        written = summary.written,
        "all done"
    );
    println!(
        "✅ Saved {} VPN entries (with ports) to {}",
        summary.written,
        summary.output.display()
    );
    Ok(())
}
