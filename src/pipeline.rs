//! Two-phase capture pipeline.
//!
//! Phase one ([`Pipeline::persist`], or [`Pipeline::open`] followed by
//! [`PendingCapture::write`]) streams an answer into a fresh capture file.
//! Phase two ([`extract_report`]) turns any capture file into a report; it
//! does not depend on phase one having run in the same process.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::clients::models::SearchModel;
use crate::config::FileNamingConfig;
use crate::core::{ChatRequest, ChunkSource, ChunkStream};
use crate::error::PipelineError;
use crate::extract::{extract, Extraction};
use crate::naming::output_path;
use crate::report::render;
use crate::writer::write_stream;

/// Result of the persistence phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub path: PathBuf,
    /// Concatenation of every streamed chunk.
    pub text: String,
}

/// Result of the extraction phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionSummary {
    pub extraction: Extraction,
    pub narrative_chars: usize,
    pub citation_count: usize,
    pub report_path: PathBuf,
}

/// An accepted request whose answer has not been written yet.
///
/// The capture path is already decided, so callers can report it before the
/// answer starts streaming.
pub struct PendingCapture {
    pub path: PathBuf,
    chunks: ChunkStream,
}

impl fmt::Debug for PendingCapture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingCapture").field("path", &self.path).finish_non_exhaustive()
    }
}

impl PendingCapture {
    /// Stream the answer into the capture file, echoing chunks to `echo`.
    pub async fn write<W: Write>(self, echo: &mut W) -> Result<Capture, PipelineError> {
        let text = write_stream(&self.path, self.chunks, echo).await?;
        Ok(Capture { path: self.path, text })
    }
}

#[derive(Debug, Clone)]
pub struct Pipeline<S: ChunkSource> {
    source: S,
    naming: FileNamingConfig,
}

impl<S: ChunkSource> Pipeline<S> {
    pub fn new(source: S, naming: FileNamingConfig) -> Self {
        Self { source, naming }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Send the request and pick the capture path once the answer is accepted.
    ///
    /// A refused request returns [`PipelineError::Request`] and touches no file.
    #[instrument(skip(self, model, query), fields(model = %model, query_len = query.len()))]
    pub async fn open(&self, model: &SearchModel, query: &str) -> Result<PendingCapture, PipelineError> {
        let request = ChatRequest::new(model.clone(), query);
        let chunks = self.source.open_stream(&request).await?;

        let path = output_path(&self.naming, model.id(), query)?;
        info!(path = %path.display(), "capturing stream");
        Ok(PendingCapture { path, chunks })
    }

    /// Ask `model` the `query` and persist the streamed answer, echoing chunks to `echo`.
    pub async fn persist<W: Write>(
        &self,
        model: &SearchModel,
        query: &str,
        echo: &mut W,
    ) -> Result<Capture, PipelineError> {
        self.open(model, query).await?.write(echo).await
    }
}

/// Extract the capture at `capture_path` and write its report to `report_path`.
#[instrument(fields(capture = %capture_path.display(), report = %report_path.display()), skip(capture_path, report_path))]
pub fn extract_report(capture_path: &Path, report_path: &Path) -> Result<ExtractionSummary, PipelineError> {
    let extraction = extract(capture_path)?;
    render(&extraction.narrative, &extraction.citations, report_path)?;

    let summary = ExtractionSummary {
        narrative_chars: extraction.narrative.chars().count(),
        citation_count: extraction.citations.len(),
        report_path: report_path.to_path_buf(),
        extraction,
    };
    info!(
        narrative_chars = summary.narrative_chars,
        citations = summary.citation_count,
        "report ready"
    );
    Ok(summary)
}
