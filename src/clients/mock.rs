use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::core::{ChatRequest, ChunkSource, ChunkStream};
use crate::error::ChatError;

/// One scripted step of a mock response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockChunk {
    Content(Option<String>),
    /// Simulated transport failure; the stream ends after it.
    Fail(String),
}

impl MockChunk {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Content(Some(s.into()))
    }
}

/// Mock source for testing that replays a fixed script for every request
#[derive(Debug, Clone, Default)]
pub struct MockSource {
    script: Vec<MockChunk>,
    rejection: Option<ChatError>,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl MockSource {
    pub fn new(script: Vec<MockChunk>) -> Self {
        Self { script, rejection: None, requests: Arc::default() }
    }

    /// A source whose requests are all refused with `error` before any chunk.
    pub fn rejecting(error: ChatError) -> Self {
        Self { rejection: Some(error), ..Self::default() }
    }

    /// Requests seen so far, in call order.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ChunkSource for MockSource {
    async fn open_stream(&self, request: &ChatRequest) -> Result<ChunkStream, ChatError> {
        if let Ok(mut seen) = self.requests.lock() {
            seen.push(request.clone());
        }
        if let Some(error) = &self.rejection {
            return Err(error.clone());
        }
        let mut items: Vec<Result<Option<String>, ChatError>> = Vec::new();
        for step in &self.script {
            match step {
                MockChunk::Content(content) => items.push(Ok(content.clone())),
                MockChunk::Fail(msg) => {
                    items.push(Err(ChatError::Http(msg.clone())));
                    break;
                }
            }
        }
        Ok(Box::pin(futures_util::stream::iter(items)))
    }
}
