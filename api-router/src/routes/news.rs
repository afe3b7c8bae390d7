use axum::{extract::State, response::IntoResponse, Json};
use common::types::news_post::NewsFeed;
use serde_json::json;

use crate::{api_state::ApiState, error::ApiError};

/// Serves the curated social-media feed. The file is re-read on every request.
pub async fn get_news(State(state): State<ApiState>) -> Result<impl IntoResponse, ApiError> {
    let posts = NewsFeed::load(&state.config.news_feed_path).await?;

    Ok(Json(json!({ "posts": posts })))
}
