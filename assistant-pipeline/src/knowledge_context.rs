use common::types::{
    knowledge_base::{KnowledgeBase, Partner, TeamMember},
    language::{Language, LocalizedString},
};

const NOT_AVAILABLE: &str = "N/A";

/// Section and field labels, so a compiled context never mixes languages.
struct Labels {
    organization: &'static str,
    mission: &'static str,
    description: &'static str,
    partners_section: &'static str,
    partner: &'static str,
    website: &'static str,
    expertise: &'static str,
    industry: &'static str,
    events: &'static str,
    initiatives: &'static str,
    team_section: &'static str,
    member: &'static str,
    role: &'static str,
    linkedin: &'static str,
    events_section: &'static str,
    event: &'static str,
    date: &'static str,
}

fn labels(language: Language) -> &'static Labels {
    match language {
        Language::Fr => &Labels {
            organization: "Organisation",
            mission: "Mission",
            description: "Description",
            partners_section: "Informations sur les partenaires",
            partner: "Partenaire",
            website: "Site web",
            expertise: "Expertise",
            industry: "Secteur",
            events: "Événements",
            initiatives: "Initiatives",
            team_section: "Informations sur l'équipe",
            member: "Membre",
            role: "Rôle",
            linkedin: "LinkedIn",
            events_section: "Informations sur les événements",
            event: "Événement",
            date: "Date",
        },
        Language::En => &Labels {
            organization: "Organization",
            mission: "Mission",
            description: "Description",
            partners_section: "Partners Information",
            partner: "Partner",
            website: "Website",
            expertise: "Expertise",
            industry: "Industry",
            events: "Events",
            initiatives: "Initiatives",
            team_section: "Team Information",
            member: "Member",
            role: "Role",
            linkedin: "LinkedIn",
            events_section: "Events Information",
            event: "Event",
            date: "Date",
        },
    }
}

fn join_tags(tags: Option<&Vec<String>>) -> String {
    match tags {
        Some(tags) if !tags.is_empty() => tags.join(", "),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn join_localized(values: &[LocalizedString], language: Language) -> String {
    values
        .iter()
        .map(|value| value.get(language))
        .collect::<Vec<_>>()
        .join(", ")
}

fn partner_block(partner: &Partner, language: Language, l: &Labels) -> String {
    let (events, initiatives) = partner
        .collaborations
        .as_ref()
        .map(|c| {
            (
                join_localized(&c.events, language),
                join_localized(&c.initiatives, language),
            )
        })
        .unwrap_or_default();

    format!(
        "{}: {}\n{}: {}\n{}: {}\n{}: {}\n{}: {}\n{}: {}\n{}: {}\n",
        l.partner,
        partner.name.get(language),
        l.description,
        partner.description.get(language),
        l.website,
        partner.website.as_deref().unwrap_or(NOT_AVAILABLE),
        l.expertise,
        join_tags(partner.expertise.as_ref()),
        l.industry,
        join_tags(partner.industry.as_ref()),
        l.events,
        events,
        l.initiatives,
        initiatives,
    )
}

fn member_block(member: &TeamMember, language: Language, l: &Labels) -> String {
    format!(
        "{}: {}\n{}: {}\n{}: {}\n",
        l.member,
        member.name,
        l.role,
        member.role.get(language),
        l.linkedin,
        member.linkedin.as_deref().unwrap_or(NOT_AVAILABLE),
    )
}

/// Flattens the whole knowledge base into one text block in `language`.
///
/// Nothing is truncated or paginated; every partner, member and event is included in
/// knowledge-base order.
pub fn compile_context(knowledge_base: &KnowledgeBase, language: Language) -> String {
    let l = labels(language);
    let association = &knowledge_base.association;

    let partners_context = knowledge_base
        .partners
        .iter()
        .map(|partner| partner_block(partner, language, l))
        .collect::<Vec<_>>()
        .join("\n");

    let team_context = knowledge_base
        .members()
        .map(|member| member_block(member, language, l))
        .collect::<Vec<_>>()
        .join("\n");

    let events_context = association
        .events
        .iter()
        .map(|event| {
            format!(
                "{}: {}\n{}: {}\n{}: {}\n",
                l.event,
                event.title.get(language),
                l.date,
                event.date,
                l.description,
                event.description.get(language),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{}: {}\n{}: {}\n{}: {}\n\n{}:\n{}\n{}:\n{}\n{}:\n{}",
        l.organization,
        association.name.get(language),
        l.mission,
        association.mission.get(language),
        l.description,
        association.description.get(language),
        l.partners_section,
        partners_context,
        l.team_section,
        team_context,
        l.events_section,
        events_context,
    )
}
