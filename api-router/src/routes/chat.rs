use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::{
    error::AppError,
    types::{
        chat::{ChatRequest, ChatResponse},
        language::Language,
    },
};
use serde_json::Value;
use tracing::{error, warn};

use crate::api_state::ApiState;

pub async fn chat(
    State(state): State<ApiState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    respond(&state, "chat", body).await
}

pub async fn chat_bubble(
    State(state): State<ApiState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    respond(&state, "chat-bubble", body).await
}

/// Shared by every conversational entry point: one validation step, one pipeline, and a
/// fallback payload for every failure.
async fn respond(
    state: &ApiState,
    endpoint: &'static str,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            warn!(endpoint, error = %rejection, "unreadable chat request body");
            return fallback(Language::default(), StatusCode::BAD_REQUEST);
        }
    };

    // Reply in the requested language even when the rest of the body is invalid.
    let language = ChatRequest::language_hint(&body);

    let result = match ChatRequest::from_value(body) {
        Ok(request) => state.pipeline.handle(&request, endpoint).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => {
            let status = status_for(&err);
            if status.is_client_error() {
                warn!(endpoint, error = %err, "rejected chat request");
            } else {
                error!(endpoint, error = %err, "chat turn failed");
            }
            fallback(language, status)
        }
    }
}

fn status_for(err: &AppError) -> StatusCode {
    if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn fallback(language: Language, status: StatusCode) -> Response {
    (status, Json(ChatResponse::fallback(language))).into_response()
}
