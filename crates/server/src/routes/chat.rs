use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use campus_core::{ChatMessage, ChatSession, ConversationMode};
use orchestrator::{ChatWorkflowEngine, StartSessionRequest};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;
use crate::identity::CallerIdentity;
use crate::state::AppState;

#[derive(Serialize, ToSchema)]
pub struct SessionStartResponse {
    pub session: ChatSession,
    pub first_message: ChatMessage,
}

#[derive(Deserialize, ToSchema)]
pub struct PostMessageRequest {
    pub content: String,
}

#[derive(Serialize, ToSchema)]
pub struct MessageExchangeResponse {
    pub mode: ConversationMode,
    pub student_message: ChatMessage,
    pub advisor_message: ChatMessage,
}

fn engine(state: &AppState) -> ChatWorkflowEngine {
    ChatWorkflowEngine::new(state.advisor.clone(), state.bus.clone())
}

#[utoipa::path(
    post,
    path = "/api/chat/sessions",
    request_body = StartSessionRequest,
    responses(
        (status = 201, description = "Session and first message created atomically",
         body = SessionStartResponse),
        (status = 404, description = "A referenced entity does not exist"),
        (status = 502, description = "Advisory service failed; nothing was persisted")
    ),
    tag = "chat"
)]
pub async fn start_session(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Json(request): Json<StartSessionRequest>,
) -> Result<(StatusCode, Json<SessionStartResponse>), AppError> {
    let handle = state
        .handle_for(&caller.identity, caller.target_tenant)
        .await?;

    let start = engine(&state).start_session(&handle, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(SessionStartResponse {
            session: start.session,
            first_message: start.first_message,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/chat/sessions/{id}/messages",
    params(("id" = Uuid, Path, description = "Session ID")),
    request_body = PostMessageRequest,
    responses(
        (status = 200, description = "Student message and advisor reply", body = MessageExchangeResponse),
        (status = 404, description = "Session not found"),
        (status = 409, description = "Session is not active"),
        (status = 502, description = "Advisory service failed; nothing was persisted")
    ),
    tag = "chat"
)]
pub async fn post_message(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(session_id): Path<Uuid>,
    Json(request): Json<PostMessageRequest>,
) -> Result<Json<MessageExchangeResponse>, AppError> {
    let handle = state
        .handle_for(&caller.identity, caller.target_tenant)
        .await?;

    let exchange = engine(&state)
        .post_student_message(&handle, session_id, request.content)
        .await?;

    Ok(Json(MessageExchangeResponse {
        mode: exchange.mode,
        student_message: exchange.student_message,
        advisor_message: exchange.advisor_message,
    }))
}

#[utoipa::path(
    post,
    path = "/api/chat/sessions/{id}/complete",
    params(("id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session completed", body = ChatSession),
        (status = 404, description = "Session not found"),
        (status = 409, description = "Session already ended")
    ),
    tag = "chat"
)]
pub async fn complete_session(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ChatSession>, AppError> {
    let handle = state
        .handle_for(&caller.identity, caller.target_tenant)
        .await?;

    Ok(Json(
        engine(&state).complete_session(&handle, session_id).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/chat/sessions/{id}/cancel",
    params(("id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session cancelled", body = ChatSession),
        (status = 404, description = "Session not found"),
        (status = 409, description = "Session already ended")
    ),
    tag = "chat"
)]
pub async fn cancel_session(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ChatSession>, AppError> {
    let handle = state
        .handle_for(&caller.identity, caller.target_tenant)
        .await?;

    Ok(Json(
        engine(&state).cancel_session(&handle, session_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/chat/sessions/{id}",
    params(("id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session found", body = ChatSession),
        (status = 404, description = "Session not found")
    ),
    tag = "chat"
)]
pub async fn get_session(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ChatSession>, AppError> {
    let handle = state
        .handle_for(&caller.identity, caller.target_tenant)
        .await?;

    let session = handle.chat_sessions().find_by_id(session_id).await?;
    match session {
        Some(s) => Ok(Json(s)),
        None => Err(AppError::NotFound(format!(
            "Chat session not found: {session_id}"
        ))),
    }
}

#[utoipa::path(
    get,
    path = "/api/chat/sessions/{id}/messages",
    params(("id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Messages in arrival order", body = Vec<ChatMessage>)
    ),
    tag = "chat"
)]
pub async fn list_messages(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Vec<ChatMessage>>, AppError> {
    let handle = state
        .handle_for(&caller.identity, caller.target_tenant)
        .await?;

    Ok(Json(
        handle.chat_messages().list_by_session(session_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}/chat-sessions",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "The student's sessions, newest first", body = Vec<ChatSession>)
    ),
    tag = "chat"
)]
pub async fn list_student_sessions(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Vec<ChatSession>>, AppError> {
    let handle = state
        .handle_for(&caller.identity, caller.target_tenant)
        .await?;

    Ok(Json(
        handle.chat_sessions().find_by_student(student_id).await?,
    ))
}
