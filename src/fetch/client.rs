// src/fetch/client.rs

use reqwest::{Client, Proxy};
use std::time::Duration;
use tracing::info;

use crate::error::{Result, ScrapeError};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// How requests leave the machine. At most one proxy can be in effect.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProxySettings {
    #[default]
    Direct,
    Http(String),
    Socks5(String),
}

impl ProxySettings {
    /// Build from the two optional settings; both set is an error.
    pub fn from_parts(http: Option<String>, socks5: Option<String>) -> Result<Self> {
        match (http, socks5) {
            (Some(_), Some(_)) => Err(ScrapeError::Config(
                "HTTP and SOCKS5 proxies are mutually exclusive".into(),
            )),
            (Some(h), None) => Ok(ProxySettings::Http(h)),
            (None, Some(s)) => Ok(ProxySettings::Socks5(s)),
            (None, None) => Ok(ProxySettings::Direct),
        }
    }

    fn proxy_url(&self) -> Option<String> {
        match self {
            ProxySettings::Direct => None,
            ProxySettings::Http(url) => Some(url.clone()),
            ProxySettings::Socks5(addr) if addr.contains("://") => Some(addr.clone()),
            ProxySettings::Socks5(addr) => Some(format!("socks5://{}", addr)),
        }
    }
}

/// HTTP client with a per-request timeout and the requested proxy.
pub fn build_client(proxy: &ProxySettings, timeout: Duration) -> Result<Client> {
    let mut builder = Client::builder().timeout(timeout).user_agent(USER_AGENT);

    if let Some(url) = proxy.proxy_url() {
        let p = Proxy::all(&url)
            .map_err(|e| ScrapeError::Config(format!("invalid proxy {}: {}", url, e)))?;
        info!(proxy = %url, "routing requests through proxy");
        builder = builder.proxy(p);
    }

    builder
        .build()
        .map_err(|e| ScrapeError::Config(format!("building HTTP client: {}", e)))
}
