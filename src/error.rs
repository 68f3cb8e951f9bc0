// src/error.rs

use std::path::PathBuf;

/// Everything that can go wrong between fetching the relay list and writing `list.json`.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("fetching {url} failed after {attempts} attempt(s){}: {cause}", status_suffix(.status))]
    Fetch {
        url: String,
        attempts: u32,
        status: Option<u16>,
        cause: String,
    },

    #[error("malformed record: {detail}")]
    MalformedRecord { detail: String },

    #[error("invalid base64 config: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("no `remote <host> <port>` directive in config")]
    PortNotFound,

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serializing JSON: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ScrapeError {
    /// Errors that only cost us the current record; the pipeline keeps going.
    pub fn is_per_record(&self) -> bool {
        matches!(
            self,
            ScrapeError::MalformedRecord { .. } | ScrapeError::Decode(_) | ScrapeError::PortNotFound
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScrapeError::Io {
            path: path.into(),
            source,
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (last status {})", code),
        None => String::new(),
    }
}

pub type Result<T, E = ScrapeError> = std::result::Result<T, E>;
