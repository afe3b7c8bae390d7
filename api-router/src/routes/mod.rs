pub mod chat;
pub mod liveness;
pub mod news;
pub mod readiness;
