use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

use super::{
    knowledge_base::Collaborations,
    language::{Language, LocalizedString},
};

/// Number of follow-up questions every response carries.
pub const SUGGESTION_COUNT: usize = 3;

/// Inbound body shared by every conversational endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    pub language: Language,
    #[serde(default)]
    pub is_initial_message: bool,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, language: Language, is_initial_message: bool) -> Self {
        Self {
            message: message.into(),
            language,
            is_initial_message,
        }
    }

    /// Structural validation of an untyped body. `isInitialMessage` may be absent but not null.
    pub fn from_value(body: Value) -> Result<Self, AppError> {
        if !body.is_object() {
            return Err(AppError::InvalidRequestShape(
                "request body must be a JSON object".into(),
            ));
        }
        serde_json::from_value(body).map_err(|e| AppError::InvalidRequestShape(e.to_string()))
    }

    /// Best-effort language of a body that may not validate, for localizing the error reply.
    pub fn language_hint(body: &Value) -> Language {
        body.get("language")
            .and_then(Value::as_str)
            .and_then(Language::from_tag)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Website,
    Linkedin,
    Twitter,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkData {
    pub url: String,
    #[serde(rename = "type")]
    pub kind: LinkType,
    pub title: String,
}

impl LinkData {
    pub fn new(url: impl Into<String>, kind: LinkType, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind,
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Partner,
    Member,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerEntity {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub name: LocalizedString,
    pub description: LocalizedString,
    pub links: Vec<LinkData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expertise: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collaborations: Option<Collaborations>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberEntity {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub name: LocalizedString,
    pub description: LocalizedString,
    pub role: LocalizedString,
    pub links: Vec<LinkData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

/// Outbound body of a chat turn, successful or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub message: String,
    pub has_enough_context: bool,
    pub suggested_questions: Vec<String>,
    pub confidence: f64,
    pub related_partners: Vec<PartnerEntity>,
    pub related_members: Vec<TeamMemberEntity>,
    pub relevant_links: Vec<LinkData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<Value>>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_results: Option<Value>,
}

impl ChatResponse {
    /// The uniform failure payload every error collapses into.
    pub fn fallback(language: Language) -> Self {
        let (message, suggestions) = match language {
            Language::Fr => (
                "Désolé, je n'ai pas pu traiter votre demande. Veuillez réessayer.",
                [
                    "Pouvez-vous reformuler votre question ?",
                    "Que souhaitez-vous savoir sur IAF ?",
                    "Puis-je vous aider autrement ?",
                ],
            ),
            Language::En => (
                "Sorry, I couldn't process your request. Please try again.",
                [
                    "Can you rephrase your question?",
                    "What would you like to know about IAF?",
                    "Can I help you with something else?",
                ],
            ),
        };

        Self {
            message: message.to_string(),
            has_enough_context: false,
            suggested_questions: suggestions.iter().map(ToString::to_string).collect(),
            confidence: 0.0,
            related_partners: Vec::new(),
            related_members: Vec::new(),
            relevant_links: Vec::new(),
            events: None,
            success: false,
            search_results: None,
        }
    }
}

/// Question appended when the assistant offers fewer than three follow-ups.
pub fn filler_question(language: Language) -> &'static str {
    match language {
        Language::Fr => "Avez-vous d'autres questions ?",
        Language::En => "Do you have any other questions?",
    }
}

/// Greeting shown when the opening turn cannot be fetched.
pub fn default_greeting(language: Language) -> &'static str {
    match language {
        Language::Fr => {
            "Bonjour! 👋 Je suis l'assistant virtuel d'IAF. Comment puis-je vous aider aujourd'hui?"
        }
        Language::En => "Hello! 👋 I'm the IAF virtual assistant. How can I help you today?",
    }
}

pub fn default_suggestions(language: Language) -> Vec<String> {
    let suggestions: [&str; SUGGESTION_COUNT] = match language {
        Language::Fr => [
            "Qu'est-ce que IAF ?",
            "Quels sont vos événements à venir ?",
            "Comment puis-je rejoindre IAF ?",
        ],
        Language::En => [
            "What is IAF?",
            "What are your upcoming events?",
            "How can I join IAF?",
        ],
    };
    suggestions.iter().map(ToString::to_string).collect()
}
