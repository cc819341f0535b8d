pub mod clients;
pub mod config;
pub mod core;
pub mod error;
pub mod extract;
pub mod naming;
pub mod pipeline;
pub mod report;
pub mod sse;
pub mod writer;

// Convenient re-exports
pub use extract::{extract, CitationRecord, Extraction};
pub use naming::generate_path;
pub use pipeline::{extract_report, Capture, ExtractionSummary, PendingCapture, Pipeline};
pub use report::render;
pub use writer::write_stream;
