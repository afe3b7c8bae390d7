use common::types::{knowledge_base::KnowledgeBase, language::Language};
use serde_json::Value;

use crate::knowledge_context::compile_context;

pub static RESPONSE_FORMAT_EN: &str = r#"ALWAYS return a strict JSON response with:
{
  "message": string (the response message),
  "hasEnoughContext": boolean (indicates if you have enough information),
  "suggestedQuestions": array (3 relevant follow-up questions the user might ask next),
  "confidence": number (0 to 1),
  "relatedPartners": array (relevant partner entities),
  "relatedMembers": array (relevant member entities),
  "relevantLinks": array of {"url": string, "type": "website" | "linkedin" | "twitter" | "other", "title": string},
  "events": array (relevant events if applicable)
}"#;

pub static RESPONSE_FORMAT_FR: &str = r#"Renvoie TOUJOURS une réponse JSON stricte contenant :
{
  "message": chaîne (le message de réponse),
  "hasEnoughContext": booléen (indique si tu disposes de suffisamment d'informations),
  "suggestedQuestions": tableau (3 questions de suivi pertinentes que l'utilisateur pourrait poser),
  "confidence": nombre (de 0 à 1),
  "relatedPartners": tableau (partenaires pertinents),
  "relatedMembers": tableau (membres pertinents),
  "relevantLinks": tableau de {"url": chaîne, "type": "website" | "linkedin" | "twitter" | "other", "title": chaîne},
  "events": tableau (événements pertinents le cas échéant)
}"#;

/// Role, reply-language and format instructions for one language.
struct PromptText {
    opening: &'static str,
    follow_up: &'static str,
    tone: &'static str,
    unknown_answer: &'static str,
    response_format: &'static str,
    context_header: &'static str,
    closing: &'static str,
    search_header: &'static str,
}

fn prompt_text(language: Language) -> PromptText {
    match language {
        Language::Fr => PromptText {
            opening: "Commence par un accueil chaleureux et propose des sujets de conversation pertinents.",
            follow_up: "Analyse la question et fournis une réponse complète.",
            tone: "Réponds toujours en français, de manière professionnelle et amicale.",
            unknown_answer: "Si tu ne connais pas la réponse, dis-le poliment et suggère de contacter directement l'association.",
            response_format: RESPONSE_FORMAT_FR,
            context_header: "Contexte de l'organisation :",
            closing: "RENVOIE UNIQUEMENT LE JSON AU FORMAT DEMANDÉ, SANS AUTRE TEXTE.",
            search_header: "Contexte supplémentaire issu de la recherche :",
        },
        Language::En => PromptText {
            opening: "Start with a warm welcome and suggest relevant conversation starters.",
            follow_up: "Analyze the question and provide a comprehensive response.",
            tone: "Always respond in English in a professional and friendly manner.",
            unknown_answer: "If you don't know the answer, politely say so and suggest contacting the association directly.",
            response_format: RESPONSE_FORMAT_EN,
            context_header: "Organization context:",
            closing: "RETURN JSON OF DESIRED FORMAT, NO OTHER TEXT.",
            search_header: "Additional context from search:",
        },
    }
}

fn role_statement(knowledge_base: &KnowledgeBase, language: Language) -> String {
    let association = &knowledge_base.association;
    let name = association.short_name.get(language);
    match language {
        Language::Fr => format!(
            "Tu es l'assistant virtuel d'{name} ({}).",
            association.acronym
        ),
        Language::En => format!(
            "You are the virtual assistant for {name} ({}).",
            association.acronym
        ),
    }
}

/// Builds the system instruction for a turn. Opening turns ask for a greeting, later turns
/// for an answer; everything else is the same template.
pub fn build_system_prompt(
    knowledge_base: &KnowledgeBase,
    language: Language,
    is_opening_turn: bool,
) -> String {
    let text = prompt_text(language);
    let turn_instruction = if is_opening_turn {
        text.opening
    } else {
        text.follow_up
    };

    format!(
        "{}\n{}\n{}\n{}\n\n{}\n\n{}\n{}\n\n{}",
        role_statement(knowledge_base, language),
        turn_instruction,
        text.tone,
        text.unknown_answer,
        text.response_format,
        text.context_header,
        compile_context(knowledge_base, language),
        text.closing,
    )
}

/// Second system message: the retrieval payload, serialized wholesale.
pub fn search_context_message(search_results: &Value, language: Language) -> String {
    format!("{} {search_results}", prompt_text(language).search_header)
}

/// Query sent to the retrieval collaborator for a user message.
pub fn search_query(prefix: &str, message: &str) -> String {
    format!("{prefix} {message}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn kb() -> KnowledgeBase {
        KnowledgeBase::embedded().expect("embedded knowledge base")
    }

    #[test]
    fn test_prompt_embeds_name_and_mission_in_one_language_only() {
        let kb = kb();
        let association = &kb.association;

        for (language, other) in [(Language::Fr, Language::En), (Language::En, Language::Fr)] {
            let prompt = build_system_prompt(&kb, language, false);

            assert!(prompt.contains(association.name.get(language)));
            assert!(prompt.contains(association.mission.get(language)));
            assert!(prompt.contains(association.short_name.get(language)));

            assert!(!prompt.contains(association.name.get(other)));
            assert!(!prompt.contains(association.mission.get(other)));
            assert!(!prompt.contains(association.short_name.get(other)));
            assert!(!prompt.contains(association.description.get(other)));
        }
    }

    #[test]
    fn test_prompt_lists_every_response_field() {
        let kb = kb();
        for language in Language::ALL {
            let prompt = build_system_prompt(&kb, language, true);
            for field in [
                "\"message\"",
                "\"hasEnoughContext\"",
                "\"suggestedQuestions\"",
                "\"confidence\"",
                "\"relatedPartners\"",
                "\"relatedMembers\"",
                "\"relevantLinks\"",
                "\"events\"",
            ] {
                assert!(prompt.contains(field), "{language} prompt lacks {field}");
            }
        }
    }

    #[test]
    fn test_opening_turn_changes_only_the_turn_instruction() {
        let kb = kb();
        let opening = build_system_prompt(&kb, Language::En, true);
        let follow_up = build_system_prompt(&kb, Language::En, false);

        assert!(opening.contains("Start with a warm welcome"));
        assert!(!opening.contains("Analyze the question"));
        assert!(follow_up.contains("Analyze the question"));
        assert!(!follow_up.contains("Start with a warm welcome"));

        let strip = |prompt: &str| {
            prompt
                .lines()
                .filter(|line| {
                    !line.starts_with("Start with a warm welcome")
                        && !line.starts_with("Analyze the question")
                })
                .collect::<Vec<_>>()
                .join("\n")
        };
        assert_eq!(strip(&opening), strip(&follow_up));
    }

    #[test]
    fn test_french_role_statement() {
        let prompt = build_system_prompt(&kb(), Language::Fr, false);
        assert!(prompt.starts_with("Tu es l'assistant virtuel d'Ingénieur-e Au Féminin (IAF)."));
        assert!(prompt.ends_with("SANS AUTRE TEXTE."));
    }

    #[test]
    fn test_search_helpers() {
        assert_eq!(
            search_query("Ingénieur-e Au Féminin", "stages"),
            "Ingénieur-e Au Féminin stages"
        );

        let message = search_context_message(&json!([{"title": "t"}]), Language::En);
        assert_eq!(message, r#"Additional context from search: [{"title":"t"}]"#);
    }
}
