use std::sync::Arc;

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, CreateChatCompletionRequest,
        CreateChatCompletionRequestArgs, ResponseFormat,
    },
    Client,
};
use async_trait::async_trait;
use common::{error::AppError, utils::config::AppConfig};
use serde_json::{json, Value};
use tracing::{debug, error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptRole {
    System,
    User,
}

/// One entry of the role-tagged list sent to the completion collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::User,
            content: content.into(),
        }
    }
}

impl From<&PromptMessage> for ChatCompletionRequestMessage {
    fn from(message: &PromptMessage) -> Self {
        match message.role {
            PromptRole::System => {
                ChatCompletionRequestSystemMessage::from(message.content.clone()).into()
            }
            PromptRole::User => {
                ChatCompletionRequestUserMessage::from(message.content.clone()).into()
            }
        }
    }
}

/// External collaborators of a chat turn. Neither call is retried.
#[async_trait]
pub trait ChatServices: Send + Sync {
    /// Runs a web search and returns the provider payload untouched.
    async fn search(&self, query: &str) -> Result<Value, AppError>;

    /// Returns the raw text of the first completion choice.
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, AppError>;
}

pub struct DefaultChatServices {
    openai_client: Arc<Client<OpenAIConfig>>,
    http_client: reqwest::Client,
    config: AppConfig,
}

impl DefaultChatServices {
    pub fn new(openai_client: Arc<Client<OpenAIConfig>>, config: AppConfig) -> Self {
        Self {
            openai_client,
            http_client: reqwest::Client::new(),
            config,
        }
    }

    fn search_endpoint(&self) -> String {
        format!("{}/search", self.config.search_base_url.trim_end_matches('/'))
    }

    fn prepare_completion_request(
        &self,
        messages: &[PromptMessage],
    ) -> Result<CreateChatCompletionRequest, AppError> {
        let messages: Vec<ChatCompletionRequestMessage> =
            messages.iter().map(ChatCompletionRequestMessage::from).collect();

        CreateChatCompletionRequestArgs::default()
            .model(&self.config.completion_model)
            .messages(messages)
            .response_format(ResponseFormat::JsonObject)
            .temperature(self.config.completion_temperature)
            .build()
            .map_err(|e| AppError::UpstreamCompletion(format!("invalid completion request: {e}")))
    }
}

#[async_trait]
impl ChatServices for DefaultChatServices {
    async fn search(&self, query: &str) -> Result<Value, AppError> {
        let body = json!({
            "api_key": self.config.search_api_key,
            "query": query,
            "max_results": self.config.search_max_results,
        });

        let response = self
            .http_client
            .post(self.search_endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "search request failed");
                AppError::UpstreamRetrieval(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamRetrieval(format!(
                "search API returned HTTP {status}"
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| AppError::UpstreamRetrieval(format!("unreadable search payload: {e}")))?;

        debug!(query, "search results received");
        Ok(payload.get("results").cloned().unwrap_or(payload))
    }

    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, AppError> {
        let request = self.prepare_completion_request(messages)?;

        let response = self
            .openai_client
            .chat()
            .create(request)
            .await
            .map_err(|e| {
                error!(error = %e, "completion request failed");
                AppError::UpstreamCompletion(e.to_string())
            })?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| AppError::UpstreamCompletion("no content in completion response".into()))
    }
}
