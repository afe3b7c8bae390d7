use common::types::{
    chat::{default_greeting, default_suggestions, ChatResponse},
    language::Language,
};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    User,
    Assistant,
}

/// One transcript entry. Lives only as long as its transcript.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptMessage {
    pub id: String,
    pub origin: Origin,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_questions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_enough_context: Option<bool>,
    pub is_route_message: bool,
}

impl TranscriptMessage {
    fn new(origin: Origin, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            origin,
            text: text.into(),
            suggested_questions: None,
            confidence: None,
            has_enough_context: None,
            is_route_message: false,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Origin::User, text)
    }

    pub fn reply(response: &ChatResponse) -> Self {
        Self {
            suggested_questions: Some(response.suggested_questions.clone()),
            confidence: Some(response.confidence),
            has_enough_context: Some(response.has_enough_context),
            ..Self::new(Origin::Assistant, response.message.as_str())
        }
    }

    pub fn greeting(language: Language) -> Self {
        Self {
            suggested_questions: Some(default_suggestions(language)),
            ..Self::new(Origin::Assistant, default_greeting(language))
        }
    }

    pub fn route(language: Language) -> Self {
        let text = match language {
            Language::Fr => "Pour une assistance plus détaillée, vous pouvez:",
            Language::En => "For more detailed assistance, you can:",
        };
        Self {
            is_route_message: true,
            ..Self::new(Origin::Assistant, text)
        }
    }

    pub fn error(language: Language) -> Self {
        let text = match language {
            Language::Fr => "Une erreur s'est produite. Veuillez réessayer plus tard.",
            Language::En => "An error occurred. Please try again later.",
        };
        Self {
            suggested_questions: Some(default_suggestions(language)),
            ..Self::new(Origin::Assistant, text)
        }
    }
}
