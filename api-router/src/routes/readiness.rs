use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::api_state::ApiState;

fn check(passed: bool) -> &'static str {
    if passed {
        "ok"
    } else {
        "fail"
    }
}

/// Readiness probe: 200 once the knowledge base is loaded and both collaborators have
/// credentials, else 503.
pub async fn ready(State(state): State<ApiState>) -> impl IntoResponse {
    let knowledge_base = !state.knowledge_base.is_empty();
    let credentials = state.config.has_credentials();

    let checks = json!({
        "knowledge_base": check(knowledge_base),
        "credentials": check(credentials),
    });

    if knowledge_base && credentials {
        (
            StatusCode::OK,
            Json(json!({ "status": "ok", "checks": checks })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "error", "checks": checks })),
        )
    }
}
