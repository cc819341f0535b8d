use std::fmt::Write;
use std::path::Path;

use tracing::{info, instrument};

use crate::error::PersistenceError;
use crate::extract::CitationRecord;

const BANNER_WIDTH: usize = 50;
const SEPARATOR_WIDTH: usize = 30;

pub const CONTENT_HEADING: &str = "Content";
pub const LINKS_HEADING: &str = "Related Links";
pub const SOURCE_LABEL: &str = "Source";
pub const PUBLISHED_LABEL: &str = "Published";
pub const URL_LABEL: &str = "URL";
pub const SUMMARY_LABEL: &str = "Summary";

/// Render the report text: narrative section, then one numbered block per citation.
pub fn render_to_string(narrative: &str, citations: &[CitationRecord]) -> String {
    let banner = "=".repeat(BANNER_WIDTH);
    let separator = "-".repeat(SEPARATOR_WIDTH);
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{banner}\n{CONTENT_HEADING}\n{banner}");
    out.push_str(narrative);
    out.push_str("\n\n");

    let _ = writeln!(out, "{banner}\n{LINKS_HEADING}\n{banner}");
    for (i, citation) in citations.iter().enumerate() {
        let _ = writeln!(out, "\n{}. {}", i + 1, citation.title);
        let _ = writeln!(out, "   {SOURCE_LABEL}: {}", citation.source);
        let _ = writeln!(out, "   {PUBLISHED_LABEL}: {}", citation.publish_time);
        let _ = writeln!(out, "   {URL_LABEL}: {}", citation.url);
        let _ = writeln!(out, "   {SUMMARY_LABEL}: {}", citation.quote);
        let _ = writeln!(out, "{separator}");
    }
    out
}

/// Write the report to `destination`, replacing any previous contents.
#[instrument(skip(narrative, citations, destination), fields(destination = %destination.display(), citations = citations.len()))]
pub fn render(narrative: &str, citations: &[CitationRecord], destination: &Path) -> Result<(), PersistenceError> {
    let report = render_to_string(narrative, citations);
    std::fs::write(destination, report).map_err(|source| PersistenceError::Write {
        path: destination.to_path_buf(),
        source,
    })?;
    info!("report written");
    Ok(())
}
