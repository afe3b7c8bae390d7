use std::sync::Arc;

use api_router::{api_routes, api_state::ApiState};
use assistant_pipeline::ChatPipeline;
use axum::{extract::FromRef, Router};
use common::{
    error::AppError,
    types::knowledge_base::KnowledgeBase,
    utils::config::{get_config, AppConfig},
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .try_init()
        .ok();

    // Missing credentials stop the process here
    let config = get_config()?;

    let knowledge_base = Arc::new(load_knowledge_base(&config).await?);
    info!(
        partners = knowledge_base.partners.len(),
        members = knowledge_base.members().count(),
        events = knowledge_base.association.events.len(),
        "Knowledge base loaded"
    );

    let app = build_app(&config, knowledge_base);

    info!("Starting server listening on 0.0.0.0:{}", config.http_port);
    let serve_address = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(serve_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn load_knowledge_base(config: &AppConfig) -> Result<KnowledgeBase, AppError> {
    match &config.knowledge_base_path {
        Some(path) => KnowledgeBase::from_path(path).await,
        None => KnowledgeBase::embedded(),
    }
}

fn build_app(config: &AppConfig, knowledge_base: Arc<KnowledgeBase>) -> Router {
    let openai_client = Arc::new(async_openai::Client::with_config(
        async_openai::config::OpenAIConfig::new()
            .with_api_key(&config.completion_api_key)
            .with_api_base(&config.completion_base_url),
    ));

    let pipeline = Arc::new(ChatPipeline::new(
        Arc::clone(&knowledge_base),
        openai_client,
        config,
    ));
    let api_state = ApiState::new(config, knowledge_base, pipeline);

    Router::new()
        .nest("/api", api_routes())
        .with_state(AppState { api_state })
}

#[derive(Clone, FromRef)]
struct AppState {
    api_state: ApiState,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    fn smoke_test_config() -> AppConfig {
        AppConfig {
            completion_api_key: "test-key".into(),
            completion_base_url: "https://example.com".into(),
            search_api_key: "test-key".into(),
            http_port: 0,
            ..Default::default()
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn smoke_startup_with_embedded_knowledge_base() {
        let config = smoke_test_config();
        let knowledge_base = Arc::new(
            load_knowledge_base(&config)
                .await
                .expect("embedded knowledge base"),
        );
        let app = build_app(&config, knowledge_base);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/live")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router response");
        assert_eq!(response.status(), StatusCode::OK);

        let ready_response = app
            .oneshot(
                Request::builder()
                    .uri("/api/ready")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("ready response");
        assert_eq!(ready_response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_knowledge_base_file_fails_startup() {
        let config = AppConfig {
            knowledge_base_path: Some("/nonexistent/knowledge_base.json".into()),
            ..smoke_test_config()
        };
        assert!(matches!(
            load_knowledge_base(&config).await,
            Err(AppError::KnowledgeBase(_))
        ));
    }
}
