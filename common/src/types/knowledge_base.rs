use std::{collections::HashSet, path::Path};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AppError;

use super::language::LocalizedString;

static EMBEDDED_KNOWLEDGE_BASE: &str = include_str!("../../data/knowledge_base.json");

/// Read-only description of the association, its partners and its team.
///
/// Loaded once at startup and shared behind an `Arc`; nothing mutates it afterwards.
/// Partner and team-category order is significant: it is the order entities are
/// reported in by the matcher and the order they appear in the compiled context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeBase {
    pub association: AssociationInfo,
    pub partners: Vec<Partner>,
    pub team: Vec<TeamCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationInfo {
    /// Full legal name, e.g. including the school.
    pub name: LocalizedString,
    /// Name the assistant introduces itself with.
    pub short_name: LocalizedString,
    pub acronym: String,
    pub mission: LocalizedString,
    pub description: LocalizedString,
    #[serde(default)]
    pub events: Vec<EventRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Free-form, e.g. "15/02", "Avril" or "N/A".
    pub date: String,
    pub title: LocalizedString,
    pub description: LocalizedString,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: String,
    pub name: LocalizedString,
    pub description: LocalizedString,
    pub website: Option<String>,
    pub expertise: Option<Vec<String>>,
    pub industry: Option<Vec<String>>,
    pub collaborations: Option<Collaborations>,
    #[serde(default)]
    pub social_media: SocialMedia,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collaborations {
    #[serde(default)]
    pub events: Vec<LocalizedString>,
    #[serde(default)]
    pub initiatives: Vec<LocalizedString>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialMedia {
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamCategory {
    pub label: String,
    pub members: Vec<TeamMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: String,
    pub role: LocalizedString,
    pub year: String,
    pub linkedin: Option<String>,
    pub task: Option<String>,
}

impl KnowledgeBase {
    /// The knowledge base compiled into the binary.
    pub fn embedded() -> Result<Self, AppError> {
        Self::from_json(EMBEDDED_KNOWLEDGE_BASE)
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::KnowledgeBase(format!("failed to read {}: {e}", path.display()))
        })?;
        debug!(path = %path.display(), bytes = raw.len(), "loaded knowledge base file");
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let knowledge_base: Self = serde_json::from_str(raw)
            .map_err(|e| AppError::KnowledgeBase(format!("invalid knowledge base: {e}")))?;
        knowledge_base.validate()?;
        Ok(knowledge_base)
    }

    fn validate(&self) -> Result<(), AppError> {
        let mut seen = HashSet::new();
        for partner in &self.partners {
            if partner.id.trim().is_empty() {
                return Err(AppError::KnowledgeBase("partner with empty id".into()));
            }
            if !seen.insert(partner.id.as_str()) {
                return Err(AppError::KnowledgeBase(format!(
                    "duplicate partner id: {}",
                    partner.id
                )));
            }
        }
        Ok(())
    }

    /// All team members, flattened in category order.
    pub fn members(&self) -> impl Iterator<Item = &TeamMember> {
        self.team.iter().flat_map(|category| category.members.iter())
    }

    pub fn partner(&self, id: &str) -> Option<&Partner> {
        self.partners.iter().find(|partner| partner.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.partners.is_empty() && self.members().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::language::Language;

    #[test]
    fn test_embedded_knowledge_base_loads() {
        let kb = KnowledgeBase::embedded().expect("embedded knowledge base should parse");

        assert_eq!(kb.partners.len(), 7);
        assert_eq!(kb.team.len(), 4);
        assert_eq!(kb.members().count(), 20);
        assert_eq!(kb.association.events.len(), 10);
        assert!(!kb.is_empty());

        let sopra = kb.partner("sopra-001").expect("sopra steria is a partner");
        assert_eq!(sopra.name.get(Language::Fr), "Sopra Steria");
        assert!(sopra.social_media.linkedin.is_some());
    }

    #[test]
    fn test_team_category_order_is_preserved() {
        let kb = KnowledgeBase::embedded().expect("embedded knowledge base should parse");
        let labels: Vec<&str> = kb.team.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Bureau Restreint", "Bureau Élargi", "Membres Actifs", "Alumni"]
        );

        let first = kb.members().next().expect("at least one member");
        assert_eq!(first.role.get(Language::En), "President");
    }

    #[test]
    fn test_duplicate_partner_ids_are_rejected() {
        let raw = r#"{
            "association": {
                "name": {"fr": "A", "en": "A"},
                "shortName": {"fr": "A", "en": "A"},
                "acronym": "A",
                "mission": {"fr": "m", "en": "m"},
                "description": {"fr": "d", "en": "d"}
            },
            "partners": [
                {"id": "p", "name": {"fr": "P", "en": "P"}, "description": {"fr": "", "en": ""}},
                {"id": "p", "name": {"fr": "Q", "en": "Q"}, "description": {"fr": "", "en": ""}}
            ],
            "team": []
        }"#;

        let err = KnowledgeBase::from_json(raw).expect_err("duplicate ids must fail");
        assert!(matches!(err, AppError::KnowledgeBase(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn test_missing_language_key_is_rejected() {
        let raw = r#"{
            "association": {
                "name": {"fr": "A"},
                "shortName": {"fr": "A", "en": "A"},
                "acronym": "A",
                "mission": {"fr": "m", "en": "m"},
                "description": {"fr": "d", "en": "d"}
            },
            "partners": [],
            "team": []
        }"#;

        assert!(matches!(
            KnowledgeBase::from_json(raw),
            Err(AppError::KnowledgeBase(_))
        ));
    }

    #[tokio::test]
    async fn test_from_path_reads_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("kb.json");
        tokio::fs::write(&path, EMBEDDED_KNOWLEDGE_BASE)
            .await
            .expect("write fixture");

        let kb = KnowledgeBase::from_path(&path).await.expect("load from path");
        assert_eq!(kb, KnowledgeBase::embedded().expect("embedded"));

        let missing = KnowledgeBase::from_path(dir.path().join("nope.json")).await;
        assert!(matches!(missing, Err(AppError::KnowledgeBase(_))));
    }
}
