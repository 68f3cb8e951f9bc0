// src/types.rs

use serde::{Deserialize, Serialize};

/// One relay as published upstream, before the config blob is looked at.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerEntry {
    #[serde(rename = "#HostName")]
    pub host_name: String,
    #[serde(rename = "IP")]
    pub ip: String,
    #[serde(rename = "Score")]
    pub score: String,
    #[serde(rename = "Ping")]
    pub ping: String,
    #[serde(rename = "Speed")]
    pub speed: String,
    #[serde(rename = "CountryLong")]
    pub country_long: String,
    #[serde(rename = "CountryShort", default)]
    pub country_short: String,
    #[serde(rename = "OpenVPN_ConfigData_Base64")]
    pub config_base64: String,
}

/// Output record. Only these fields are ever serialized; the config blob
/// stays behind on `ServerEntry`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortedEntry {
    pub host_name: String,
    pub ip: String,
    pub country: String,
    pub score: String,
    pub ping: String,
    pub speed: String,
    pub port: String,
}

impl PortedEntry {
    pub fn new(entry: ServerEntry, port: String) -> Self {
        Self {
            host_name: entry.host_name,
            ip: entry.ip,
            country: entry.country_long,
            score: entry.score,
            ping: entry.ping,
            speed: entry.speed,
            port,
        }
    }
}

/// Which shape the upstream document has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceFormat {
    /// Plain lines split on `,`, positional fields.
    #[default]
    Lines,
    /// CSV with a header row, wrapped in `*vpn_servers` / `*` sentinel rows.
    Table,
}

impl std::str::FromStr for SourceFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lines" | "line" => Ok(SourceFormat::Lines),
            "table" | "csv" => Ok(SourceFormat::Table),
            other => Err(format!("unknown source format {:?} (expected lines|table)", other)),
        }
    }
}

/// Result of running a parser over a whole document.
#[derive(Debug, Default)]
pub struct ParsedDocument {
    pub entries: Vec<ServerEntry>,
    /// Records dropped for having too few fields.
    pub malformed: usize,
}
