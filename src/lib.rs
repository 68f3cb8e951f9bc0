//! Fetch the VPN Gate relay list, pull the connection port out of each
//! relay's embedded OpenVPN config, and write the usable relays as JSON.
//!
//! ```text
//! fetch (bounded retry) → parse (lines | table) → transform (rayon) → write
//! ```

pub mod config;
pub mod decode;
pub mod error;
pub mod fetch;
pub mod parse;
pub mod pipeline;
pub mod types;
pub mod write;

pub use config::Settings;
pub use error::ScrapeError;
pub use pipeline::{run, scrape, transform, RunSummary, Stage};
pub use types::{PortedEntry, ServerEntry, SourceFormat};
