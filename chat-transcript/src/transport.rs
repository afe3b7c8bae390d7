use async_trait::async_trait;
use common::types::chat::{ChatRequest, ChatResponse};
use tracing::debug;

use crate::error::TranscriptError;

/// Delivers one chat request and returns the assistant's reply.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TranscriptError>;
}

/// Posts to a running `chat-bubble` endpoint.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// `base_url` is the API root, e.g. `http://localhost:3000/api`.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/chat-bubble", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TranscriptError> {
        let response = self.client.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "chat endpoint returned an error status");
            return Err(TranscriptError::Status(status.as_u16()));
        }

        Ok(response.json::<ChatResponse>().await?)
    }
}
