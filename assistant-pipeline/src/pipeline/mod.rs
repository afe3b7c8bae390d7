mod config;
mod context;
mod services;
mod stages;
mod state;

pub use config::PipelineConfig;
#[allow(clippy::module_name_repetitions)]
pub use services::{ChatServices, DefaultChatServices, PromptMessage, PromptRole};

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use async_openai::{config::OpenAIConfig, Client};
use common::{
    error::AppError,
    types::{
        chat::{ChatRequest, ChatResponse},
        knowledge_base::KnowledgeBase,
    },
    utils::config::AppConfig,
};
use tracing::info;
use uuid::Uuid;

use self::{
    context::TurnContext,
    stages::{complete, match_entities, retrieve, validate},
    state::ready,
};

/// Runs one chat turn: entity matching, retrieval, completion, validation.
///
/// Any stage failure aborts the whole turn; callers decide how to present the error.
#[allow(clippy::module_name_repetitions)]
pub struct ChatPipeline {
    knowledge_base: Arc<KnowledgeBase>,
    pipeline_config: PipelineConfig,
    services: Arc<dyn ChatServices>,
}

impl ChatPipeline {
    pub fn new(
        knowledge_base: Arc<KnowledgeBase>,
        openai_client: Arc<Client<OpenAIConfig>>,
        config: &AppConfig,
    ) -> Self {
        let services = DefaultChatServices::new(openai_client, config.clone());
        Self::with_services(
            knowledge_base,
            PipelineConfig::from(config),
            Arc::new(services),
        )
    }

    pub fn with_services(
        knowledge_base: Arc<KnowledgeBase>,
        pipeline_config: PipelineConfig,
        services: Arc<dyn ChatServices>,
    ) -> Self {
        Self {
            knowledge_base,
            pipeline_config,
            services,
        }
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }

    fn duration_millis(duration: Duration) -> u64 {
        u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
    }

    #[tracing::instrument(
        skip_all,
        fields(
            turn_id = tracing::field::Empty,
            endpoint = %endpoint,
            language = %request.language,
            opening = request.is_initial_message
        )
    )]
    pub async fn handle(
        &self,
        request: &ChatRequest,
        endpoint: &str,
    ) -> Result<ChatResponse, AppError> {
        let turn_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("turn_id", turn_id.as_str());

        let mut ctx = TurnContext::new(
            turn_id,
            endpoint,
            request,
            self.knowledge_base.as_ref(),
            &self.pipeline_config,
            self.services.as_ref(),
        );

        let started = Instant::now();
        let machine = ready();

        let machine = match_entities(machine, &mut ctx).map_err(|err| ctx.abort(err))?;

        let stage_start = Instant::now();
        let machine = retrieve(machine, &mut ctx)
            .await
            .map_err(|err| ctx.abort(err))?;
        let retrieve_ms = Self::duration_millis(stage_start.elapsed());

        let stage_start = Instant::now();
        let machine = complete(machine, &mut ctx)
            .await
            .map_err(|err| ctx.abort(err))?;
        let complete_ms = Self::duration_millis(stage_start.elapsed());

        let _machine = validate(machine, &mut ctx).map_err(|err| ctx.abort(err))?;

        info!(
            turn_id = %ctx.turn_id,
            total_ms = Self::duration_millis(started.elapsed()),
            retrieve_ms,
            complete_ms,
            "chat turn finished"
        );

        ctx.into_response()
    }
}
