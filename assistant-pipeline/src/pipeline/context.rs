use common::{
    error::AppError,
    types::{
        chat::{ChatRequest, ChatResponse},
        knowledge_base::KnowledgeBase,
    },
};
use serde_json::Value;
use tracing::warn;

use crate::{completion_result::ValidatedCompletion, entity_matcher::RelatedEntities};

use super::{config::PipelineConfig, services::ChatServices};

/// Working state of one chat turn. Nothing in here outlives the request.
pub struct TurnContext<'a> {
    pub turn_id: String,
    pub endpoint: &'a str,
    pub request: &'a ChatRequest,
    pub knowledge_base: &'a KnowledgeBase,
    pub pipeline_config: &'a PipelineConfig,
    pub services: &'a dyn ChatServices,
    pub related: RelatedEntities,
    pub search_results: Option<Value>,
    pub raw_completion: Option<String>,
    pub completion: Option<ValidatedCompletion>,
}

impl<'a> TurnContext<'a> {
    pub fn new(
        turn_id: String,
        endpoint: &'a str,
        request: &'a ChatRequest,
        knowledge_base: &'a KnowledgeBase,
        pipeline_config: &'a PipelineConfig,
        services: &'a dyn ChatServices,
    ) -> Self {
        Self {
            turn_id,
            endpoint,
            request,
            knowledge_base,
            pipeline_config,
            services,
            related: RelatedEntities::default(),
            search_results: None,
            raw_completion: None,
            completion: None,
        }
    }

    pub fn search_results(&self) -> Result<&Value, AppError> {
        self.search_results.as_ref().ok_or_else(|| {
            AppError::InternalError("search results expected to be available".into())
        })
    }

    pub fn raw_completion(&self) -> Result<&str, AppError> {
        self.raw_completion.as_deref().ok_or_else(|| {
            AppError::InternalError("completion text expected to be available".into())
        })
    }

    pub fn abort(&self, err: AppError) -> AppError {
        warn!(
            turn_id = %self.turn_id,
            endpoint = self.endpoint,
            error = %err,
            "chat turn aborted"
        );
        err
    }

    /// Assembles the success payload. Entities always come from the matcher.
    pub fn into_response(self) -> Result<ChatResponse, AppError> {
        let completion = self.completion.ok_or_else(|| {
            AppError::InternalError("validated completion expected to be available".into())
        })?;

        let search_results = if self.pipeline_config.expose_search_results {
            self.search_results
        } else {
            None
        };

        Ok(ChatResponse {
            message: completion.message,
            has_enough_context: completion.has_enough_context,
            suggested_questions: completion.suggested_questions,
            confidence: completion.confidence,
            related_partners: self.related.partners,
            related_members: self.related.members,
            relevant_links: completion.relevant_links,
            events: completion.events,
            success: true,
            search_results,
        })
    }
}
