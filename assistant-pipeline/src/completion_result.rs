use common::{
    error::AppError,
    types::{
        chat::{filler_question, LinkData, LinkType, SUGGESTION_COUNT},
        language::Language,
    },
};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

/// Fields the completion collaborator is instructed to return.
///
/// `relatedPartners` and `relatedMembers` are ignored: those come from the entity matcher,
/// never from the model. Only `message` and `suggestedQuestions` are typed; the other fields
/// are read leniently so a null or mistyped value falls back instead of failing the turn.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompletionPayload {
    message: String,
    suggested_questions: Vec<Value>,
    #[serde(default)]
    has_enough_context: Value,
    #[serde(default)]
    confidence: Value,
    #[serde(default)]
    relevant_links: Value,
    #[serde(default)]
    events: Value,
}

/// A completion that passed validation and normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedCompletion {
    pub message: String,
    pub has_enough_context: bool,
    pub suggested_questions: Vec<String>,
    pub confidence: f64,
    pub relevant_links: Vec<LinkData>,
    pub events: Option<Vec<Value>>,
}

/// Pads with the localized filler question or truncates, keeping order, to exactly three.
pub fn normalize_suggestions(mut questions: Vec<String>, language: Language) -> Vec<String> {
    questions.truncate(SUGGESTION_COUNT);
    while questions.len() < SUGGESTION_COUNT {
        questions.push(filler_question(language).to_string());
    }
    questions
}

fn link_from_value(value: &Value) -> Option<LinkData> {
    let raw_url = value.get("url")?.as_str()?.trim();
    let url = Url::parse(raw_url).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }

    let kind = match value.get("type").and_then(Value::as_str) {
        Some("website") => LinkType::Website,
        Some("linkedin") => LinkType::Linkedin,
        Some("twitter") => LinkType::Twitter,
        _ => LinkType::Other,
    };
    let title = value
        .get("title")
        .and_then(Value::as_str)
        .filter(|title| !title.trim().is_empty())
        .unwrap_or(raw_url);

    Some(LinkData::new(raw_url, kind, title))
}

/// Parses and validates raw completion text.
///
/// Text that is not JSON fails with `MalformedCompletion` and is never repaired. JSON that
/// lacks a non-empty `message` or a `suggestedQuestions` list fails with
/// `InvalidResponseShape`.
pub fn parse_completion(raw: &str, language: Language) -> Result<ValidatedCompletion, AppError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| AppError::MalformedCompletion(e.to_string()))?;

    let payload: CompletionPayload = serde_json::from_value(value)
        .map_err(|e| AppError::InvalidResponseShape(e.to_string()))?;

    if payload.message.trim().is_empty() {
        return Err(AppError::InvalidResponseShape(
            "message must not be empty".into(),
        ));
    }

    let questions = payload
        .suggested_questions
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|question| !question.is_empty())
        .map(str::to_owned)
        .collect();

    let confidence = payload
        .confidence
        .as_f64()
        .filter(|c| c.is_finite())
        .map_or(0.0, |c| c.clamp(0.0, 1.0));

    let relevant_links = payload
        .relevant_links
        .as_array()
        .map(|links| links.iter().filter_map(link_from_value).collect())
        .unwrap_or_default();

    Ok(ValidatedCompletion {
        message: payload.message,
        has_enough_context: payload.has_enough_context.as_bool().unwrap_or(false),
        suggested_questions: normalize_suggestions(questions, language),
        confidence,
        relevant_links,
        events: payload.events.as_array().cloned(),
    })
}
