use crate::config::{Identity, RunConfig};
use crate::core::{ChatRequest, ChunkSource, ChunkStream, RawByteStream};
use crate::error::ChatError;
use crate::sse::decode_content_stream;
use async_trait::async_trait;
use futures_util::StreamExt;
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<CompletionMessage<'a>>,
    stream: bool,
    hy_source: &'a str,
    hy_user: &'a str,
    agent_id: &'a str,
    chat_id: &'a str,
    should_remove_conversation: bool,
}

#[derive(Debug, Serialize)]
struct CompletionMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Streaming client for an OpenAI-compatible search-chat gateway.
#[derive(Clone, Debug)]
pub struct ChatStreamClient {
    base_url: String,
    identity: Identity,
    http: reqwest::Client,
}

impl ChatStreamClient {
    pub fn new(config: &RunConfig) -> Self {
        info!(base_url = %config.base_url, agent_id = %config.identity.agent_id, "Creating chat stream client");
        Self {
            base_url: config.base_url.clone(),
            identity: config.identity.clone(),
            http: reqwest::Client::new(),
        }
    }

    fn completion_request<'a>(&'a self, request: &'a ChatRequest) -> CompletionRequest<'a> {
        CompletionRequest {
            model: request.model.id(),
            messages: vec![CompletionMessage { role: "user", content: &request.query }],
            stream: true,
            hy_source: &self.identity.source,
            hy_user: &self.identity.user,
            agent_id: &self.identity.agent_id,
            chat_id: &self.identity.chat_id,
            should_remove_conversation: false,
        }
    }

    /// Raw SSE body of a streaming completion, available once the gateway accepted the request.
    #[instrument(skip(self, request), fields(model = %request.model.id(), query_len = request.query.len()))]
    pub async fn stream_raw(&self, request: &ChatRequest) -> Result<RawByteStream, ChatError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(url = %url, "Sending streaming request");
        let req = self
            .http
            .post(url)
            .bearer_auth(&self.identity.token)
            .header("Accept", "text/event-stream")
            .json(&self.completion_request(request));

        let resp = checked_response(req).await?;
        let bytes = resp
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| ChatError::Http(e.to_string())));
        Ok(Box::pin(bytes))
    }
}

async fn checked_response(req: reqwest::RequestBuilder) -> Result<reqwest::Response, ChatError> {
    let resp = req.send().await.map_err(|e| {
        error!(error = %e, "HTTP request failed");
        ChatError::Http(e.to_string())
    })?;
    let status = resp.status();
    debug!(status = %status, "Received response headers");
    if status == 401 {
        error!("Authentication rejected by gateway");
        return Err(ChatError::Authentication);
    }
    if status == 429 {
        warn!("Gateway rate limit exceeded");
        return Err(ChatError::RateLimit);
    }
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        error!(status = %status, error = %body, "Gateway API error");
        return Err(ChatError::Api { status: status.as_u16(), body });
    }
    Ok(resp)
}

#[async_trait]
impl ChunkSource for ChatStreamClient {
    async fn open_stream(&self, request: &ChatRequest) -> Result<ChunkStream, ChatError> {
        let raw = self.stream_raw(request).await?;
        Ok(decode_content_stream(raw))
    }
}
