// src/pipeline.rs

use rayon::prelude::*;
use reqwest::Client;
use std::{fmt, path::PathBuf, time::Instant};
use tracing::{debug, info, instrument};

use crate::config::Settings;
use crate::decode::extract_port;
use crate::error::Result;
use crate::fetch::{build_client, get_text_with_retry};
use crate::parse::parse_document;
use crate::types::{PortedEntry, ServerEntry};
use crate::write::write_entries;

/// Where a run currently is. Runs go straight through, only the fetch retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Fetching,
    Parsing,
    Transforming,
    Aggregated,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Idle => "idle",
            Stage::Fetching => "fetching",
            Stage::Parsing => "parsing",
            Stage::Transforming => "transforming",
            Stage::Aggregated => "aggregated",
            Stage::Done => "done",
        };
        f.write_str(s)
    }
}

/// Output of the transform step.
#[derive(Debug, Default)]
pub struct Transformed {
    pub entries: Vec<PortedEntry>,
    /// Entries whose config had no usable port or did not decode.
    pub dropped: usize,
}

/// What a finished run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub parsed: usize,
    pub malformed: usize,
    pub dropped: usize,
    pub written: usize,
    pub output: PathBuf,
}

/// Aggregated entries plus bookkeeping, before anything is written.
#[derive(Debug, Default)]
pub struct Scraped {
    pub entries: Vec<PortedEntry>,
    pub parsed: usize,
    pub malformed: usize,
    pub dropped: usize,
}

/// `Ok(None)` when the entry is dropped; only errors that are not
/// per-record escape.
fn port_entry(entry: ServerEntry) -> Result<Option<PortedEntry>> {
    match extract_port(&entry.config_base64) {
        Ok(port) => Ok(Some(PortedEntry::new(entry, port))),
        Err(e) if e.is_per_record() => {
            debug!(host = %entry.host_name, error = %e, "dropping entry");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Decode every entry's config independently and keep the ones with a port.
/// Each entry is owned by its own rayon task; results are collected, not
/// pushed into shared state.
pub fn transform(entries: Vec<ServerEntry>) -> Result<Transformed> {
    let total = entries.len();
    let ported: Vec<Option<PortedEntry>> = entries
        .into_par_iter()
        .map(port_entry)
        .collect::<Result<_>>()?;
    let ported: Vec<PortedEntry> = ported.into_iter().flatten().collect();
    Ok(Transformed {
        dropped: total - ported.len(),
        entries: ported,
    })
}

fn enter(stage: Stage) {
    info!(%stage, "stage");
}

/// Fetch → parse → transform → aggregate. Nothing is written.
#[instrument(level = "info", skip(client, settings), fields(url = %settings.source_url, format = ?settings.format))]
pub async fn scrape(client: &Client, settings: &Settings) -> Result<Scraped> {
    enter(Stage::Fetching);
    let body = get_text_with_retry(client, &settings.source_url, settings.retry).await?;
    info!(bytes = body.len(), "fetched relay list");

    enter(Stage::Parsing);
    let parsed = parse_document(&body, settings.format)?;
    drop(body);
    let (parsed_count, malformed) = (parsed.entries.len(), parsed.malformed);
    info!(entries = parsed_count, malformed, "parsed relay list");

    enter(Stage::Transforming);
    let start = Instant::now();
    // decoding is CPU work; keep it off the async workers
    let transformed = tokio::task::spawn_blocking(move || transform(parsed.entries)).await??;
    info!(
        kept = transformed.entries.len(),
        dropped = transformed.dropped,
        elapsed = ?start.elapsed(),
        "extracted ports"
    );

    enter(Stage::Aggregated);
    Ok(Scraped {
        entries: transformed.entries,
        parsed: parsed_count,
        malformed,
        dropped: transformed.dropped,
    })
}

/// A whole run: build the client, scrape, write the output file.
/// Nothing is written unless every earlier stage succeeded.
#[instrument(level = "info", skip(settings), fields(output = %settings.output_path.display()))]
pub async fn run(settings: &Settings) -> Result<RunSummary> {
    enter(Stage::Idle);
    let client = build_client(&settings.proxy, settings.timeout)?;
    let scraped = scrape(&client, settings).await?;

    let output = settings.output_path.clone();
    let entries = scraped.entries;
    let written = entries.len();
    let out = output.clone();
    tokio::task::spawn_blocking(move || write_entries(&out, &entries)).await??;

    enter(Stage::Done);
    Ok(RunSummary {
        parsed: scraped.parsed,
        malformed: scraped.malformed,
        dropped: scraped.dropped,
        written,
        output,
    })
}
