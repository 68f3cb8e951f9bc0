// src/parse/table.rs

use csv::ReaderBuilder;
use tracing::{debug, instrument};

use crate::error::{Result, ScrapeError};
use crate::types::{ParsedDocument, ServerEntry};

const LEADING_SENTINEL: &str = "*vpn_servers";
const TRAILING_SENTINEL: &str = "*";

/// Drop the `*vpn_servers` / `*` wrapper rows and every `"` in the document.
///
/// Quotes are removed before the CSV reader sees the text: upstream quoting
/// is unreliable and a stray quote would shift every following column.
pub fn strip_sentinels(doc: &str) -> String {
    let mut lines: Vec<&str> = doc.lines().collect();

    if lines
        .first()
        .is_some_and(|l| l.trim_end() == LEADING_SENTINEL)
    {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    if lines
        .last()
        .is_some_and(|l| l.trim_end() == TRAILING_SENTINEL)
    {
        lines.pop();
    }

    let mut out = String::with_capacity(doc.len());
    for line in lines {
        out.extend(line.chars().filter(|&c| c != '"'));
        out.push('\n');
    }
    out
}

/// Parse a CSV document with a header row, binding columns by header name.
/// Any structural error fails the whole document.
#[instrument(level = "debug", skip(doc), fields(doc_len = doc.len()))]
pub fn parse_table(doc: &str) -> Result<ParsedDocument> {
    let cleaned = strip_sentinels(doc);
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(csv::Trim::All)
        .from_reader(cleaned.as_bytes());

    let mut entries = Vec::new();
    for (idx, result) in rdr.deserialize::<ServerEntry>().enumerate() {
        let entry = result.map_err(|e| ScrapeError::MalformedRecord {
            detail: format!("CSV parse error at record {}: {}", idx, e),
        })?;
        entries.push(entry);
    }

    debug!(entries = entries.len(), "parsed table");
    Ok(ParsedDocument {
        entries,
        malformed: 0,
    })
}
