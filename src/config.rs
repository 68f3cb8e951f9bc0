// src/config.rs

use std::{path::PathBuf, str::FromStr, time::Duration};
use url::Url;

use crate::error::{Result, ScrapeError};
use crate::fetch::{ProxySettings, RetryPolicy};
use crate::types::SourceFormat;

pub const DEFAULT_SOURCE_URL: &str = "http://www.vpngate.net/api/iphone/";
pub const DEFAULT_OUTPUT_PATH: &str = "list.json";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything a run needs to know, read from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub source_url: String,
    pub format: SourceFormat,
    pub proxy: ProxySettings,
    pub output_path: PathBuf,
    pub retry: RetryPolicy,
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            format: SourceFormat::default(),
            proxy: ProxySettings::Direct,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            retry: RetryPolicy::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Settings {
    /// Read `VPNGATE_URL`, `VPNGATE_FORMAT`, `HTTP_PROXY_URL`, `SOCKS5_PROXY`,
    /// `OUTPUT_PATH`, `FETCH_ATTEMPTS`, `FETCH_RETRY_DELAY_MS` and `FETCH_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // empty values count as unset
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Settings::default();

        let source_url = get("VPNGATE_URL").unwrap_or(defaults.source_url);
        Url::parse(&source_url).map_err(|e| {
            ScrapeError::Config(format!("VPNGATE_URL {:?} is not a URL: {}", source_url, e))
        })?;

        let format = match get("VPNGATE_FORMAT") {
            Some(v) => v.parse::<SourceFormat>().map_err(ScrapeError::Config)?,
            None => defaults.format,
        };

        let proxy = ProxySettings::from_parts(get("HTTP_PROXY_URL"), get("SOCKS5_PROXY"))?;

        let output_path = get("OUTPUT_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.output_path);

        let max_attempts = parse_var::<u32, _>(&get, "FETCH_ATTEMPTS")?.unwrap_or(defaults.retry.max_attempts);
        if max_attempts == 0 {
            return Err(ScrapeError::Config("FETCH_ATTEMPTS must be at least 1".into()));
        }
        let delay = parse_var::<u64, _>(&get, "FETCH_RETRY_DELAY_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.retry.delay);
        let timeout = parse_var::<u64, _>(&get, "FETCH_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        Ok(Self {
            source_url,
            format,
            proxy,
            output_path,
            retry: RetryPolicy {
                max_attempts,
                delay,
            },
            timeout,
        })
    }
}

fn parse_var<T, G>(get: &G, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    get(key)
        .map(|v| {
            v.trim()
                .parse::<T>()
                .map_err(|e| ScrapeError::Config(format!("{}={:?}: {}", key, v, e)))
        })
        .transpose()
}
