pub mod chat;
pub mod knowledge_base;
pub mod language;
pub mod news_post;
