pub mod completion_result;
pub mod entity_matcher;
pub mod knowledge_context;
pub mod pipeline;
pub mod prompt;

pub use pipeline::{ChatPipeline, ChatServices, DefaultChatServices, PipelineConfig};
