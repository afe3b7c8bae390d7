use common::types::{
    chat::{EntityKind, LinkData, LinkType, PartnerEntity, TeamMemberEntity},
    knowledge_base::{KnowledgeBase, Partner, TeamMember},
    language::{Language, LocalizedString},
};

/// Partners and members a user message refers to, in knowledge-base order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelatedEntities {
    pub partners: Vec<PartnerEntity>,
    pub members: Vec<TeamMemberEntity>,
}

impl RelatedEntities {
    pub fn is_empty(&self) -> bool {
        self.partners.is_empty() && self.members.is_empty()
    }
}

/// Lower-cased, whitespace-separated tokens. Blank input has no tokens.
pub fn tokenize(message: &str) -> Vec<String> {
    message
        .to_lowercase()
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

fn partner_haystack(partner: &Partner, language: Language) -> String {
    let mut fields: Vec<&str> = vec![
        partner.name.get(language),
        partner.description.get(language),
    ];
    fields.extend(partner.expertise.iter().flatten().map(String::as_str));
    fields.extend(partner.industry.iter().flatten().map(String::as_str));
    if let Some(collaborations) = &partner.collaborations {
        fields.extend(
            collaborations
                .events
                .iter()
                .chain(&collaborations.initiatives)
                .map(|text| text.get(language)),
        );
    }
    fields.join(" ").to_lowercase()
}

fn member_haystack(member: &TeamMember, language: Language) -> String {
    format!("{} {}", member.name, member.role.get(language)).to_lowercase()
}

/// Substring containment, not word matching: "art" matches "partner".
fn mentions_any(haystack: &str, tokens: &[String]) -> bool {
    tokens.iter().any(|token| haystack.contains(token.as_str()))
}

pub fn map_partner_to_entity(partner: &Partner) -> PartnerEntity {
    let links = [
        (partner.website.as_deref(), LinkType::Website, "Website"),
        (
            partner.social_media.linkedin.as_deref(),
            LinkType::Linkedin,
            "LinkedIn",
        ),
        (
            partner.social_media.twitter.as_deref(),
            LinkType::Twitter,
            "Twitter",
        ),
    ]
    .into_iter()
    .filter_map(|(url, kind, title)| {
        url.filter(|url| !url.is_empty())
            .map(|url| LinkData::new(url, kind, title))
    })
    .collect();

    PartnerEntity {
        kind: EntityKind::Partner,
        name: partner.name.clone(),
        description: partner.description.clone(),
        links,
        expertise: partner.expertise.clone(),
        industry: partner.industry.clone(),
        collaborations: partner.collaborations.clone(),
    }
}

pub fn map_member_to_entity(member: &TeamMember) -> TeamMemberEntity {
    let links = member
        .linkedin
        .iter()
        .filter(|url| !url.is_empty())
        .map(|url| LinkData::new(url.as_str(), LinkType::Linkedin, "LinkedIn"))
        .collect();

    TeamMemberEntity {
        kind: EntityKind::Member,
        name: LocalizedString::uniform(member.name.as_str()),
        description: LocalizedString::uniform(member.task.clone().unwrap_or_default()),
        role: member.role.clone(),
        links,
        task: member.task.clone(),
        year: Some(member.year.clone()),
    }
}

/// Links a free-text message back to knowledge-base records.
///
/// A record is related when any token of the message occurs inside its localized text.
/// A message with no tokens (empty or whitespace only) is related to nothing.
pub fn find_related_entities(
    knowledge_base: &KnowledgeBase,
    message: &str,
    language: Language,
) -> RelatedEntities {
    let tokens = tokenize(message);
    if tokens.is_empty() {
        return RelatedEntities::default();
    }

    let partners = knowledge_base
        .partners
        .iter()
        .filter(|partner| mentions_any(&partner_haystack(partner, language), &tokens))
        .map(map_partner_to_entity)
        .collect();

    let members = knowledge_base
        .members()
        .filter(|member| mentions_any(&member_haystack(member, language), &tokens))
        .map(map_member_to_entity)
        .collect();

    RelatedEntities { partners, members }
}
