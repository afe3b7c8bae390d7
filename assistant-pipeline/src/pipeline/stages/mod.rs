use common::error::AppError;
use state_machines::core::GuardError;
use tracing::{debug, instrument};

use crate::{
    completion_result::parse_completion,
    entity_matcher::find_related_entities,
    prompt::{build_system_prompt, search_context_message, search_query},
};

use super::{
    context::TurnContext,
    services::PromptMessage,
    state::{ChatTurnMachine, Completed, EntitiesMatched, Ready, Retrieved, Validated},
};

#[instrument(level = "trace", skip_all, fields(turn_id = %ctx.turn_id))]
pub fn match_entities(
    machine: ChatTurnMachine<(), Ready>,
    ctx: &mut TurnContext<'_>,
) -> Result<ChatTurnMachine<(), EntitiesMatched>, AppError> {
    let request = ctx.request;
    ctx.related = find_related_entities(ctx.knowledge_base, &request.message, request.language);

    debug!(
        turn_id = %ctx.turn_id,
        partners = ctx.related.partners.len(),
        members = ctx.related.members.len(),
        "related entities matched"
    );

    machine
        .match_entities()
        .map_err(|(_, guard)| map_guard_error("match_entities", &guard))
}

#[instrument(level = "trace", skip_all, fields(turn_id = %ctx.turn_id))]
pub async fn retrieve(
    machine: ChatTurnMachine<(), EntitiesMatched>,
    ctx: &mut TurnContext<'_>,
) -> Result<ChatTurnMachine<(), Retrieved>, AppError> {
    let query = search_query(
        &ctx.pipeline_config.search_query_prefix,
        &ctx.request.message,
    );
    let results = ctx.services.search(&query).await?;

    debug!(
        turn_id = %ctx.turn_id,
        result_count = results.as_array().map_or(1, Vec::len),
        "search context retrieved"
    );

    ctx.search_results = Some(results);

    machine
        .retrieve()
        .map_err(|(_, guard)| map_guard_error("retrieve", &guard))
}

#[instrument(level = "trace", skip_all, fields(turn_id = %ctx.turn_id))]
pub async fn complete(
    machine: ChatTurnMachine<(), Retrieved>,
    ctx: &mut TurnContext<'_>,
) -> Result<ChatTurnMachine<(), Completed>, AppError> {
    let request = ctx.request;
    let messages = [
        PromptMessage::system(build_system_prompt(
            ctx.knowledge_base,
            request.language,
            request.is_initial_message,
        )),
        PromptMessage::system(search_context_message(
            ctx.search_results()?,
            request.language,
        )),
        PromptMessage::user(request.message.as_str()),
    ];

    let raw = ctx.services.complete(&messages).await?;
    debug!(turn_id = %ctx.turn_id, raw_completion = %raw, "completion received");

    ctx.raw_completion = Some(raw);

    machine
        .complete()
        .map_err(|(_, guard)| map_guard_error("complete", &guard))
}

#[instrument(level = "trace", skip_all, fields(turn_id = %ctx.turn_id))]
pub fn validate(
    machine: ChatTurnMachine<(), Completed>,
    ctx: &mut TurnContext<'_>,
) -> Result<ChatTurnMachine<(), Validated>, AppError> {
    let completion = parse_completion(ctx.raw_completion()?, ctx.request.language)?;

    debug!(
        turn_id = %ctx.turn_id,
        has_enough_context = completion.has_enough_context,
        confidence = completion.confidence,
        links = completion.relevant_links.len(),
        "completion validated"
    );

    ctx.completion = Some(completion);

    machine
        .validate()
        .map_err(|(_, guard)| map_guard_error("validate", &guard))
}

fn map_guard_error(event: &str, guard: &GuardError) -> AppError {
    AppError::InternalError(format!(
        "invalid chat turn transition during {event}: {guard:?}"
    ))
}
