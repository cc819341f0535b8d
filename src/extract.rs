//! Narrative text and citation extraction from a persisted capture file.
//!
//! Each line of a capture is expected to hold one JSON record:
//! - `{"type":"text","msg":"..."}` contributes to the narrative.
//! - `{"type":"searchGuid","docs":[...]}` contributes one citation per document.
//!
//! Anything else (blank lines, non-JSON, unknown record types, records missing
//! their payload field) is skipped without failing the extraction.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument, trace};

use crate::error::PersistenceError;

/// Longest quote kept verbatim, in characters.
pub const QUOTE_LIMIT: usize = 200;
/// Appended to quotes cut at [`QUOTE_LIMIT`].
pub const ELLIPSIS: &str = "...";

/// One cited source document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CitationRecord {
    pub title: String,
    pub url: String,
    pub source: String,
    pub publish_time: String,
    pub quote: String,
}

impl CitationRecord {
    fn from_doc(doc: &serde_json::Map<String, Value>) -> Self {
        let field = |name: &str| field_text(doc.get(name));
        Self {
            title: field("title"),
            url: field("url"),
            source: field("webSiteSource"),
            publish_time: field("publish_time"),
            quote: truncate_quote(&field("quote")),
        }
    }
}

// Missing and null fields are blank; other non-string values keep their JSON text.
fn field_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Everything recovered from one capture file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extraction {
    pub narrative: String,
    pub citations: Vec<CitationRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum CaptureRecord {
    #[serde(rename = "text")]
    Text { msg: String },
    #[serde(rename = "searchGuid")]
    SearchGuid { docs: Vec<Value> },
    #[serde(other)]
    Other,
}

/// Keep the first [`QUOTE_LIMIT`] characters, marking the cut with [`ELLIPSIS`].
pub fn truncate_quote(quote: &str) -> String {
    match quote.char_indices().nth(QUOTE_LIMIT) {
        Some((idx, _)) => format!("{}{}", &quote[..idx], ELLIPSIS),
        None => quote.to_string(),
    }
}

/// Run the extraction over any line-oriented reader.
pub fn parse_lines<R: BufRead>(reader: R) -> std::io::Result<Extraction> {
    let mut extraction = Extraction::default();
    let mut skipped = 0usize;

    for (index, raw) in reader.split(b'\n').enumerate() {
        let raw = raw?;
        let Ok(line) = std::str::from_utf8(&raw) else {
            trace!(line = index + 1, "skipping line that is not UTF-8");
            skipped += 1;
            continue;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let value: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                trace!(line = index + 1, error = %e, "skipping non-JSON line");
                skipped += 1;
                continue;
            }
        };

        match CaptureRecord::deserialize(value) {
            Ok(CaptureRecord::Text { msg }) => extraction.narrative.push_str(&msg),
            Ok(CaptureRecord::SearchGuid { docs }) => {
                extraction
                    .citations
                    .extend(docs.iter().filter_map(Value::as_object).map(CitationRecord::from_doc));
            }
            Ok(CaptureRecord::Other) => {}
            Err(e) => {
                trace!(line = index + 1, error = %e, "skipping unrecognized record");
                skipped += 1;
            }
        }
    }

    debug!(skipped, "line scan finished");
    Ok(extraction)
}

/// Extract narrative text and citations from the capture at `path`.
///
/// Fails only when the file cannot be opened or read; malformed lines are skipped.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn extract(path: &Path) -> Result<Extraction, PersistenceError> {
    let file = File::open(path).map_err(|source| PersistenceError::Open { path: path.to_path_buf(), source })?;
    let extraction = parse_lines(BufReader::new(file))
        .map_err(|source| PersistenceError::Read { path: path.to_path_buf(), source })?;

    info!(
        narrative_chars = extraction.narrative.chars().count(),
        citations = extraction.citations.len(),
        "extraction finished"
    );
    Ok(extraction)
}
