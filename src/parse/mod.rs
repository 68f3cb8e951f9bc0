// src/parse/mod.rs

pub mod lines;
pub mod table;

pub use lines::{is_skippable, parse_line, parse_lines};
pub use table::{parse_table, strip_sentinels};

use crate::error::Result;
use crate::types::{ParsedDocument, SourceFormat};

/// Parse a fetched document according to its format.
///
/// Line mode never fails as a whole (bad lines are counted and skipped);
/// table mode fails on any structural CSV error.
pub fn parse_document(doc: &str, format: SourceFormat) -> Result<ParsedDocument> {
    match format {
        SourceFormat::Lines => Ok(parse_lines(doc)),
        SourceFormat::Table => parse_table(doc),
    }
}
