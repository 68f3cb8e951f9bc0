// src/parse/lines.rs

use tracing::{debug, instrument};

use crate::error::{Result, ScrapeError};
use crate::types::{ParsedDocument, ServerEntry};

/// Minimum number of comma separated fields; the config blob sits at index 14.
pub const MIN_FIELDS: usize = 15;

const CONFIG_FIELD: usize = 14;

/// Comment rows (`*…`, `#…`), the header row, and blank lines carry no relay.
pub fn is_skippable(line: &str) -> bool {
    line.starts_with('*')
        || line.starts_with('#')
        || line.contains("HostName")
        || line.trim().is_empty()
}

/// Positional mapping of one data line.
pub fn parse_line(line: &str) -> Result<ServerEntry> {
    let fields: Vec<&str> = line.trim_end_matches(['\r', '\n']).split(',').collect();
    if fields.len() < MIN_FIELDS {
        return Err(ScrapeError::MalformedRecord {
            detail: format!(
                "expected at least {} fields, found {}",
                MIN_FIELDS,
                fields.len()
            ),
        });
    }

    Ok(ServerEntry {
        host_name: fields[0].to_string(),
        ip: fields[1].to_string(),
        score: fields[2].to_string(),
        ping: fields[3].to_string(),
        speed: fields[4].to_string(),
        country_long: fields[5].to_string(),
        country_short: fields[6].to_string(),
        config_base64: fields[CONFIG_FIELD].to_string(),
    })
}

/// Parse every data line of a plain-text document. Malformed lines are
/// counted and skipped, they never abort the batch.
#[instrument(level = "debug", skip(doc), fields(doc_len = doc.len()))]
pub fn parse_lines(doc: &str) -> ParsedDocument {
    let mut parsed = ParsedDocument::default();

    for (idx, line) in doc.lines().enumerate() {
        if is_skippable(line) {
            continue;
        }
        match parse_line(line) {
            Ok(entry) => parsed.entries.push(entry),
            Err(e) => {
                debug!(line = idx + 1, error = %e, "skipping line");
                parsed.malformed += 1;
            }
        }
    }

    debug!(
        entries = parsed.entries.len(),
        malformed = parsed.malformed,
        "parsed lines"
    );
    parsed
}
