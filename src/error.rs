use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// The gateway refused or never answered the request; nothing was written.
    #[error("Request failed: {0}")]
    Request(#[from] ChatError),
    #[error("Stream error: {0}")]
    Stream(#[from] StreamError),
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set in the environment or .env file")]
    Missing(&'static str),
    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Error, Debug, Clone)]
pub enum ChatError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("Rate limit exceeded")]
    RateLimit,
    #[error("Authentication failed")]
    Authentication,
    #[error("Malformed stream payload: {0}")]
    Decode(String),
}

/// Transport failure while consuming the response stream.
///
/// Everything received before the failure has already been flushed to `path`.
#[derive(Error, Debug)]
#[error("stream interrupted after {} bytes written to {}: {source}", partial.len(), path.display())]
pub struct StreamError {
    pub path: PathBuf,
    pub partial: String,
    #[source]
    pub source: ChatError,
}

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("cannot create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
