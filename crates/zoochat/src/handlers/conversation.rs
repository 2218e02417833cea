//! Conversation endpoints: sending a turn, reading and deleting history.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use zoochat_auth::CurrentUser;
use zoochat_core::conversation::{
    build_chat_request, ensure_can_continue, ensure_can_view, evaluate_input, evaluate_output,
    next_turn_index, validate_message, ChatError, ConversationError, ConversationSummary,
    ConversationTurn, ConvoHistoryQuery, ConvoHistoryResponse, ConvoTurnRequest,
    ConvoTurnResponse, GuardrailVerdict, TurnOutcome,
};

use super::extract::{AppJson, AppQuery};
use super::{not_found, AppError};
use crate::context::RequestContext;
use crate::state::AppState;

/// Send one visitor message to an assistant (POST /api/convo_turn).
///
/// Starts a new conversation when `conversation_id` is omitted. A message
/// stopped by the guardrail is stored with the refusal as its reply and
/// never reaches the chat backend.
#[tracing::instrument(
    skip_all,
    fields(
        request_id = %ctx.request_id,
        user_id = %user.id,
        assistant_id = %request.assistant_id,
        conversation_id = tracing::field::Empty,
    )
)]
pub async fn convo_turn(
    CurrentUser(user): CurrentUser,
    ctx: RequestContext,
    State(state): State<AppState>,
    AppJson(request): AppJson<ConvoTurnRequest>,
) -> Result<Json<ConvoTurnResponse>, AppError> {
    let message = validate_message(&request.message, state.config.max_message_chars)?;

    let assistant = state
        .assistants
        .get_assistant(request.assistant_id)
        .await?
        .ok_or_else(|| not_found("Assistant", request.assistant_id))?;
    if !assistant.active {
        return Err(ConversationError::AssistantInactive.into());
    }

    let (conversation_id, history) = match request.conversation_id {
        Some(id) => {
            let turns = state.conversations.get_turns(id, None).await?;
            ensure_can_continue(&turns, user.id, assistant.id)?;
            (id, turns)
        }
        None => (Uuid::new_v4(), Vec::new()),
    };
    tracing::Span::current().record("conversation_id", tracing::field::display(conversation_id));

    let guardrail = match assistant.guardrail_id {
        Some(guardrail_id) => {
            let guardrail = state.guardrails.get_guardrail(guardrail_id).await?;
            if guardrail.is_none() {
                tracing::warn!(%guardrail_id, "Assistant references a missing guardrail");
            }
            guardrail
        }
        None => None,
    };

    let input_verdict = guardrail
        .as_ref()
        .map(|g| evaluate_input(g, &message))
        .unwrap_or(GuardrailVerdict::Allowed);

    let (reply, outcome) = match (input_verdict, &guardrail) {
        (GuardrailVerdict::Blocked(reason), Some(guardrail)) => {
            tracing::info!(%reason, "Visitor message blocked");
            (
                guardrail.refusal_message.clone(),
                TurnOutcome::Blocked { reason },
            )
        }
        _ => {
            let details = state.user_details.get_user_details(user.id).await?;
            let chat_request = build_chat_request(
                &assistant,
                details.as_ref(),
                guardrail.as_ref(),
                &history,
                state.config.history,
                &message,
            );

            let reply = tokio::time::timeout(
                state.config.chat_timeout,
                state.responder.respond(&chat_request),
            )
            .await
            .map_err(|_| ChatError::Timeout)??;

            match guardrail.as_ref().map(|g| (g, evaluate_output(g, &reply))) {
                Some((guardrail, GuardrailVerdict::Blocked(reason))) => {
                    tracing::warn!(%reason, responder = state.responder.name(), "Reply filtered");
                    (
                        guardrail.refusal_message.clone(),
                        TurnOutcome::Filtered { reason },
                    )
                }
                _ => (reply, TurnOutcome::Answered),
            }
        }
    };

    let turn = ConversationTurn::new(
        conversation_id,
        user.id,
        assistant.id,
        next_turn_index(&history),
        message,
        reply,
    )
    .with_outcome(outcome);

    state.conversations.append_turn(&turn).await?;

    tracing::info!(index = turn.index, outcome = ?turn.outcome, "Stored conversation turn");

    Ok(Json(ConvoTurnResponse {
        conversation_id,
        turn,
    }))
}

/// Read a conversation (GET /api/convo_history).
///
/// Unknown conversations read as empty.
pub async fn get_history(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ConvoHistoryQuery>,
) -> Result<Json<ConvoHistoryResponse>, AppError> {
    let turns = state
        .conversations
        .get_turns(query.conversation_id, query.limit)
        .await?;
    ensure_can_view(&turns, user.id, user.is_admin())?;

    Ok(Json(ConvoHistoryResponse {
        conversation_id: query.conversation_id,
        turns,
    }))
}

/// Delete a conversation (DELETE /api/convo_history).
pub async fn delete_history(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ConvoHistoryQuery>,
) -> Result<StatusCode, AppError> {
    let turns = state
        .conversations
        .get_turns(query.conversation_id, None)
        .await?;
    ensure_can_view(&turns, user.id, user.is_admin())?;

    let removed = state
        .conversations
        .delete_conversation(query.conversation_id)
        .await?;

    tracing::info!(conversation_id = %query.conversation_id, removed, "Deleted conversation");

    Ok(StatusCode::NO_CONTENT)
}

/// The caller's conversations, most recent first (GET /api/conversations).
pub async fn list_conversations(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<ConversationSummary>>, AppError> {
    Ok(Json(
        state
            .conversations
            .list_conversations_for_user(user.id)
            .await?,
    ))
}
