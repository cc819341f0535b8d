//! The seam between the capture pipeline and whatever produces content chunks.
//!
//! A live run uses [`crate::clients::ChatStreamClient`]; tests script chunks
//! through [`crate::clients::MockSource`].

use crate::clients::models::SearchModel;
use crate::error::ChatError;
use async_trait::async_trait;
use bytes::Bytes;
use futures_core::Stream;
use std::fmt::Debug;
use std::pin::Pin;

/// Type alias for raw byte streams from the chat endpoint
pub type RawByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, ChatError>> + Send>>;

/// Content fragments in delivery order. `None` marks a chunk without content.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<Option<String>, ChatError>> + Send>>;

/// One user question sent to one model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub model: SearchModel,
    pub query: String,
}

impl ChatRequest {
    pub fn new(model: SearchModel, query: impl Into<String>) -> Self {
        Self { model, query: query.into() }
    }
}

/// Anything that can answer a [`ChatRequest`] with a stream of content chunks.
///
/// `open_stream` resolves once the answer has been accepted, so a rejected
/// request fails here and never reaches the writer. The returned stream is
/// finite and not restartable; transport failures show up as an `Err` item,
/// after which the stream ends.
#[async_trait]
pub trait ChunkSource: Send + Sync + Debug {
    async fn open_stream(&self, request: &ChatRequest) -> Result<ChunkStream, ChatError>;
}
