use api_state::ApiState;
use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use routes::{
    chat::{chat, chat_bubble},
    liveness::live,
    news::get_news,
    readiness::ready,
};
use tower_http::compression::CompressionLayer;

pub mod api_state;
pub mod error;
mod routes;

/// Router for the public API: chat endpoints, news feed and probes.
pub fn api_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    ApiState: FromRef<S>,
{
    // Probes for k8s/systemd
    let probes = Router::new()
        .route("/ready", get(ready))
        .route("/live", get(live));

    let content = Router::new()
        .route("/chat", post(chat))
        .route("/chat-bubble", post(chat_bubble))
        .route("/news", get(get_news))
        .layer(CompressionLayer::new());

    probes.merge(content)
}
