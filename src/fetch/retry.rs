// src/fetch/retry.rs

use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, instrument, warn};

use crate::error::{Result, ScrapeError};

/// Fixed-delay bounded retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::from_secs(1),
        }
    }
}

/// Why one attempt failed.
struct AttemptError {
    status: Option<u16>,
    cause: String,
}

async fn get_text_core(client: &Client, url: &str) -> Result<String, AttemptError> {
    debug!("Fetching text from {}", url);
    let resp = client.get(url).send().await.map_err(|e| AttemptError {
        status: None,
        cause: format!("GET {} failed: {}", url, e),
    })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(AttemptError {
            status: Some(status.as_u16()),
            cause: format!("HTTP {}", status),
        });
    }

    resp.text().await.map_err(|e| AttemptError {
        status: Some(status.as_u16()),
        cause: format!("reading body from {}: {}", url, e),
    })
}

/// GET `url` as text. Transport errors, non-2xx statuses and body read
/// errors all count as a failed attempt; after `policy.max_attempts` of
/// them this fails with `ScrapeError::Fetch`.
#[instrument(level = "info", skip(client, policy), fields(max_attempts = policy.max_attempts))]
pub async fn get_text_with_retry(client: &Client, url: &str, policy: RetryPolicy) -> Result<String> {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;
    loop {
        attempt += 1;
        match get_text_core(client, url).await {
            Ok(text) => {
                debug!(attempt, bytes = text.len(), "fetched");
                return Ok(text);
            }
            Err(e) if attempt < max_attempts => {
                warn!(
                    %url,
                    attempt,
                    delay_ms = policy.delay.as_millis() as u64,
                    error = %e.cause,
                    "Retrying"
                );
                sleep(policy.delay).await;
            }
            Err(e) => {
                error!(%url, attempts = attempt, error = %e.cause, "Exhausted retries");
                return Err(ScrapeError::Fetch {
                    url: url.to_string(),
                    attempts: attempt,
                    status: e.status,
                    cause: e.cause,
                });
            }
        }
    }
}
