use std::io::Write;
use std::path::Path;

use futures_core::Stream;
use futures_util::StreamExt;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument, warn};

use crate::error::{ChatError, PersistenceError, PipelineError, StreamError};

/// Persist a chunk stream to `path`, one chunk per line, echoing each chunk to `echo`.
///
/// Every chunk is flushed before the next one is awaited, so a reader of
/// `path` sees a prefix of the stream at any time. Returns the concatenated
/// chunk text.
#[instrument(skip(path, chunks, echo), fields(path = %path.display()))]
pub async fn write_stream<S, W>(path: &Path, chunks: S, echo: &mut W) -> Result<String, PipelineError>
where
    S: Stream<Item = Result<Option<String>, ChatError>>,
    W: Write,
{
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(|source| PersistenceError::Open { path: path.to_path_buf(), source })?;

    futures_util::pin_mut!(chunks);
    let mut content = String::new();
    let mut count = 0usize;
    let mut echo_ok = true;

    while let Some(next) = chunks.next().await {
        let piece = match next {
            Ok(piece) => piece.unwrap_or_default(),
            Err(source) => {
                warn!(chunks = count, bytes = content.len(), error = %source, "stream interrupted");
                return Err(StreamError { path: path.to_path_buf(), partial: content, source }.into());
            }
        };

        if echo_ok {
            if let Err(e) = echo.write_all(piece.as_bytes()).and_then(|_| echo.flush()) {
                warn!(error = %e, "console echo failed, continuing without it");
                echo_ok = false;
            }
        }
        content.push_str(&piece);

        let write_err = |source| PersistenceError::Write { path: path.to_path_buf(), source };
        file.write_all(piece.as_bytes()).await.map_err(write_err)?;
        file.write_all(b"\n").await.map_err(write_err)?;
        file.flush().await.map_err(write_err)?;
        count += 1;
    }

    info!(chunks = count, bytes = content.len(), "stream persisted");
    Ok(content)
}
