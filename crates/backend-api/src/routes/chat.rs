use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use astroconsult_chats::{
    ChatError, ChatRoom, HistoryRequest, Message, OpenRoomRequest, SendMessageRequest,
};
use serde::Serialize;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::{error::FORBIDDEN_CHAT_MESSAGE, ApiError, AppState};

const HISTORY_FAILURE_MESSAGE: &str = "Failed to fetch messages";
const INVALID_BODY_MESSAGE: &str = "Invalid request body";

#[derive(Debug, Serialize, ToSchema)]
pub struct MessagesResponse {
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: Message,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RoomResponse {
    pub room: ChatRoom,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RoomsResponse {
    pub rooms: Vec<ChatRoom>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UnreadResponse {
    pub unread: i64,
}

/// History failures keep their own fixed wording for the 500 case.
///
/// Every rejection is logged here; the response body only carries the
/// sanitized message.
fn history_error(error: ChatError) -> ApiError {
    match error {
        ChatError::Unauthorized => {
            warn!("chat history rejected: no valid session");
            ApiError::unauthorized()
        }
        ChatError::Forbidden => {
            warn!("chat history rejected: room missing or caller not a participant");
            ApiError::forbidden(FORBIDDEN_CHAT_MESSAGE)
        }
        ChatError::Validation(reason) | ChatError::InvalidParticipant(reason) => {
            warn!(%reason, "chat history rejected: invalid request");
            ApiError::bad_request(INVALID_BODY_MESSAGE)
        }
        ChatError::Store(source) => {
            error!(error = ?source, "failed to fetch chat history");
            ApiError::internal_server_error(HISTORY_FAILURE_MESSAGE)
        }
    }
}

fn invalid_body(rejection: JsonRejection) -> ApiError {
    warn!(error = %rejection.body_text(), "rejected request body");
    ApiError::bad_request(INVALID_BODY_MESSAGE)
}

#[utoipa::path(
    post,
    path = "/api/chat/messages",
    tag = "Chat",
    request_body = HistoryRequest,
    responses(
        (status = 200, description = "Conversation history; read flags are as stored before this call", body = MessagesResponse),
        (status = 400, description = "Malformed body", body = crate::error::ErrorResponse),
        (status = 401, description = "No valid session", body = crate::error::ErrorResponse),
        (status = 403, description = "Room missing or caller not a participant", body = crate::error::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn get_messages(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<HistoryRequest>, JsonRejection>,
) -> Result<Json<MessagesResponse>, ApiError> {
    // The session is resolved before the body is looked at.
    let caller = state.resolve_caller(&headers).await.map_err(|error| {
        error!(error = ?error, "failed to resolve session for chat history");
        ApiError::internal_server_error(HISTORY_FAILURE_MESSAGE)
    })?;

    if caller.is_none() {
        return Err(history_error(ChatError::Unauthorized));
    }

    let Json(request) = payload.map_err(invalid_body)?;

    let messages = state
        .messages()
        .get_messages(caller.as_ref(), &request)
        .await
        .map_err(history_error)?;

    Ok(Json(MessagesResponse { messages }))
}

#[utoipa::path(
    post,
    path = "/api/chat/rooms",
    tag = "Chat",
    request_body = OpenRoomRequest,
    responses(
        (status = 201, description = "Room created", body = RoomResponse),
        (status = 200, description = "Existing room for this pair", body = RoomResponse),
        (status = 400, description = "Caller is not a user or target is not an astrologer", body = crate::error::ErrorResponse),
        (status = 401, description = "No valid session", body = crate::error::ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn open_room(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<OpenRoomRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RoomResponse>), ApiError> {
    let caller = state.require_caller(&headers).await?;
    let Json(request) = payload.map_err(invalid_body)?;

    let (room, created) = state
        .chats()
        .open_room(&caller, &request.astrologer_id)
        .await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(RoomResponse { room })))
}

#[utoipa::path(
    get,
    path = "/api/chat/rooms",
    tag = "Chat",
    responses(
        (status = 200, description = "Rooms the caller participates in, newest first", body = RoomsResponse),
        (status = 401, description = "No valid session", body = crate::error::ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn list_rooms(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RoomsResponse>, ApiError> {
    let caller = state.require_caller(&headers).await?;
    let rooms = state.chats().list_rooms(&caller).await?;
    Ok(Json(RoomsResponse { rooms }))
}

#[utoipa::path(
    post,
    path = "/api/chat/send",
    tag = "Chat",
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "Message stored", body = MessageResponse),
        (status = 400, description = "Empty or over-long content", body = crate::error::ErrorResponse),
        (status = 401, description = "No valid session", body = crate::error::ErrorResponse),
        (status = 403, description = "Room missing or caller not a participant", body = crate::error::ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn send_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let caller = state.require_caller(&headers).await?;
    let Json(request) = payload.map_err(invalid_body)?;

    let message = state.messages().send_message(&caller, &request).await?;
    Ok((StatusCode::CREATED, Json(MessageResponse { message })))
}

#[utoipa::path(
    get,
    path = "/api/chat/unread",
    tag = "Chat",
    responses(
        (status = 200, description = "Unread messages addressed to the caller", body = UnreadResponse),
        (status = 401, description = "No valid session", body = crate::error::ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn unread_count(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<UnreadResponse>, ApiError> {
    let caller = state.require_caller(&headers).await?;
    let unread = state.messages().unread_count(&caller).await?;
    Ok(Json(UnreadResponse { unread }))
}
