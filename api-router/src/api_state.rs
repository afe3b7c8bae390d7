use std::sync::Arc;

use assistant_pipeline::ChatPipeline;
use common::{types::knowledge_base::KnowledgeBase, utils::config::AppConfig};

#[derive(Clone)]
pub struct ApiState {
    pub config: AppConfig,
    pub knowledge_base: Arc<KnowledgeBase>,
    pub pipeline: Arc<ChatPipeline>,
}

impl ApiState {
    pub fn new(
        config: &AppConfig,
        knowledge_base: Arc<KnowledgeBase>,
        pipeline: Arc<ChatPipeline>,
    ) -> Self {
        Self {
            config: config.clone(),
            knowledge_base,
            pipeline,
        }
    }
}
