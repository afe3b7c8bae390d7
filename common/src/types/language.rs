use std::fmt;

use serde::{Deserialize, Serialize};

/// Languages the site and the assistant are published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Fr, Language::En];

    pub fn as_str(self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
        }
    }

    /// Parses a language tag the way the request validator accepts it: exact, lowercase.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "fr" => Some(Language::Fr),
            "en" => Some(Language::En),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A text value carried in every supported language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedString {
    pub fr: String,
    pub en: String,
}

impl LocalizedString {
    pub fn new(fr: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            fr: fr.into(),
            en: en.into(),
        }
    }

    /// Same text for both languages, used for proper names.
    pub fn uniform(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            fr: text.clone(),
            en: text,
        }
    }

    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::Fr => &self.fr,
            Language::En => &self.en,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_tags() {
        assert_eq!(Language::from_tag("fr"), Some(Language::Fr));
        assert_eq!(Language::from_tag("en"), Some(Language::En));
        assert_eq!(Language::from_tag("EN"), None);
        assert_eq!(Language::from_tag("de"), None);
        assert_eq!(Language::En.to_string(), "en");
    }

    #[test]
    fn test_language_serde_is_lowercase() {
        let encoded = serde_json::to_string(&Language::Fr).expect("serialize");
        assert_eq!(encoded, "\"fr\"");
        let decoded: Language = serde_json::from_str("\"en\"").expect("deserialize");
        assert_eq!(decoded, Language::En);
        assert!(serde_json::from_str::<Language>("\"es\"").is_err());
    }

    #[test]
    fn test_localized_string_lookup() {
        let text = LocalizedString::new("Bonjour", "Hello");
        assert_eq!(text.get(Language::Fr), "Bonjour");
        assert_eq!(text.get(Language::En), "Hello");

        let name = LocalizedString::uniform("FABRE Julie");
        assert_eq!(name.fr, name.en);
    }
}
