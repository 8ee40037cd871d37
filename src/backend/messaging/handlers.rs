//! HTTP handlers for chats and messages
//!
//! The `/api/chats` and `/api/messages` endpoints. All of them delegate to
//! [`ChatService`].

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::backend::auth::handlers::types::MessageResponse;
use crate::backend::error::BackendError;
use crate::backend::middleware::ApiJson;
use crate::backend::messaging::service::ChatService;
use crate::shared::messaging::{
    Chat, CreateChatRequest, EditMessageRequest, ListMessagesParams, Message, SendMessageRequest,
};

/// GET /api/chats/{userId}
pub async fn list_user_chats(
    State(chats): State<ChatService>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Chat>>, BackendError> {
    Ok(Json(chats.chats_for_user(&user_id).await?))
}

/// POST /api/chats
pub async fn create_chat(
    State(chats): State<ChatService>,
    ApiJson(request): ApiJson<CreateChatRequest>,
) -> Result<(StatusCode, Json<Chat>), BackendError> {
    let chat = chats.create_chat(&request).await?;
    Ok((StatusCode::CREATED, Json(chat)))
}

/// DELETE /api/chats/{chatId}
pub async fn delete_chat(
    State(chats): State<ChatService>,
    Path(chat_id): Path<String>,
) -> Result<Json<MessageResponse>, BackendError> {
    chats.delete_chat(&chat_id).await?;
    Ok(Json(MessageResponse::new("Chat deleted successfully")))
}

/// POST /api/messages
pub async fn send_message(
    State(chats): State<ChatService>,
    ApiJson(request): ApiJson<SendMessageRequest>,
) -> Result<(StatusCode, Json<Message>), BackendError> {
    let message = chats.send_message(&request).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /api/messages/{chatId}?limit=&lastMessageId=
pub async fn list_messages(
    State(chats): State<ChatService>,
    Path(chat_id): Path<String>,
    Query(params): Query<ListMessagesParams>,
) -> Result<Json<Vec<Message>>, BackendError> {
    Ok(Json(chats.get_messages(&chat_id, &params).await?))
}

/// PUT /api/messages/{chatId}/{messageId}
pub async fn edit_message(
    State(chats): State<ChatService>,
    Path((chat_id, message_id)): Path<(String, String)>,
    ApiJson(request): ApiJson<EditMessageRequest>,
) -> Result<Json<Chat>, BackendError> {
    Ok(Json(chats.edit_message(&chat_id, &message_id, &request.content).await?))
}

/// DELETE /api/messages/{chatId}/{messageId}
pub async fn delete_message(
    State(chats): State<ChatService>,
    Path((chat_id, message_id)): Path<(String, String)>,
) -> Result<Json<Chat>, BackendError> {
    Ok(Json(chats.delete_message(&chat_id, &message_id).await?))
}

/// PATCH /api/messages/{chatId}/{messageId}/read
pub async fn mark_read(
    State(chats): State<ChatService>,
    Path((chat_id, message_id)): Path<(String, String)>,
) -> Result<StatusCode, BackendError> {
    chats.mark_read(&chat_id, &message_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
