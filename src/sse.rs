use crate::core::{ChunkStream, RawByteStream};
use crate::error::ChatError;
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use serde::Deserialize;
use std::io;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::io::StreamReader;
use tracing::{debug, trace};

#[derive(Debug, Deserialize)]
struct CompletionChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
}

#[derive(Debug, Default, Deserialize)]
struct ChunkDelta {
    content: Option<String>,
}

#[derive(Debug, PartialEq)]
enum Frame {
    Done,
    Content(Option<String>),
    Skip,
}

fn decode_frame(payload: &str) -> Result<Frame, ChatError> {
    let payload = payload.trim();
    if payload == "[DONE]" {
        return Ok(Frame::Done);
    }
    if payload.is_empty() {
        return Ok(Frame::Skip);
    }
    let chunk: CompletionChunk = serde_json::from_str(payload)
        .map_err(|e| ChatError::Decode(format!("{e}: {payload}")))?;
    match chunk.choices.into_iter().next() {
        Some(choice) => Ok(Frame::Content(choice.delta.content)),
        None => {
            trace!("chunk without choices");
            Ok(Frame::Skip)
        }
    }
}

/// Recover the transport error carried through the line reader.
fn into_chat_error(err: io::Error) -> ChatError {
    let kind = err.kind();
    let message = err.to_string();
    match err.into_inner().map(|inner| inner.downcast::<ChatError>()) {
        Some(Ok(chat)) => *chat,
        _ if kind == io::ErrorKind::InvalidData => ChatError::Decode(message),
        _ => ChatError::Http(message),
    }
}

/// Decode an OpenAI-style SSE body into content chunks.
///
/// Events are separated by blank lines and their `data:` lines are joined.
/// The stream ends on `[DONE]` or at end of body, whichever comes first.
pub fn decode_content_stream(byte_stream: RawByteStream) -> ChunkStream {
    Box::pin(content_stream(byte_stream))
}

fn content_stream(byte_stream: RawByteStream) -> impl Stream<Item = Result<Option<String>, ChatError>> {
    try_stream! {
        let io_stream = byte_stream.map(|res| res.map_err(|e| io::Error::new(io::ErrorKind::Other, e)));
        let mut lines = BufReader::new(StreamReader::new(io_stream)).lines();
        let mut data = String::new();
        let mut frames = 0usize;

        loop {
            let line = lines
                .next_line()
                .await
                .map_err(into_chat_error)?;

            let line = match line {
                Some(line) => line,
                None => {
                    // Body ended without a trailing blank line.
                    if !data.is_empty() {
                        if let Frame::Content(content) = decode_frame(&data)? {
                            yield content;
                        }
                    }
                    break;
                }
            };
            let line = line.trim_end_matches('\r');

            if line.is_empty() {
                if data.is_empty() {
                    continue;
                }
                let payload = std::mem::take(&mut data);
                frames += 1;
                match decode_frame(&payload)? {
                    Frame::Done => {
                        debug!(frames, "stream finished");
                        break;
                    }
                    Frame::Content(content) => {
                        yield content;
                    }
                    Frame::Skip => {}
                }
            } else if let Some(value) = line.strip_prefix("data:") {
                if !data.is_empty() {
                    data.push('\n');
                }
                data.push_str(value.strip_prefix(' ').unwrap_or(value));
            }
            // comments (":") and other fields (event:, id:, retry:) carry no content
        }
    }
}
