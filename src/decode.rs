// src/decode.rs

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::error::{Result, ScrapeError};

/// `remote <host> <port>` at the start of a line. The port token must be
/// ASCII digits up to whitespace or end of line. Commented-out directives
/// (`#remote …`, `;remote …`) never match.
static REMOTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*remote[ \t]+[\w.-]+[ \t]+([0-9]+)(?:[ \t\r]|$)")
        .expect("remote directive regex")
});

/// Decode the embedded OpenVPN config blob into text.
pub fn decode_config(b64: &str) -> Result<String> {
    let bytes = BASE64.decode(b64.trim())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// First `remote` directive with a usable port (1..=65535) wins.
pub fn find_port(config: &str) -> Result<String> {
    let port = REMOTE_RE
        .captures_iter(config)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .find(|p| p.parse::<u16>().is_ok_and(|n| n != 0))
        .map(str::to_owned)
        .ok_or(ScrapeError::PortNotFound)?;
    trace!(%port, "found remote directive");
    Ok(port)
}

/// base64 blob → port string.
pub fn extract_port(b64: &str) -> Result<String> {
    find_port(&decode_config(b64)?)
}
