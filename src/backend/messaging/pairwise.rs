//! Pairwise chat handlers
//!
//! The party-pair addressed endpoints under `/chat`. A pairwise chat is found
//! by its two participants in either order; only `createChat` may create one.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::backend::error::BackendError;
use crate::backend::middleware::ApiJson;
use crate::backend::messaging::service::ChatService;
use crate::shared::messaging::{Chat, ListMessagesParams, Message};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePairwiseChatRequest {
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub receiver: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairwiseSendRequest {
    #[serde(default)]
    pub sender_id: String,
    #[serde(default)]
    pub receiver_id: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairwiseEditRequest {
    #[serde(default)]
    pub chat_id: String,
    #[serde(default)]
    pub message_id: String,
    #[serde(default)]
    pub new_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairwiseDeleteRequest {
    #[serde(default)]
    pub chat_id: String,
    #[serde(default)]
    pub message_id: String,
}

/// `{ message, chat }`
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatEnvelope {
    pub message: String,
    pub chat: Chat,
}

/// `{ message, data }`
#[derive(Debug, Serialize, Deserialize)]
pub struct SentEnvelope {
    pub message: String,
    pub data: Message,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessagesEnvelope {
    pub messages: Vec<Message>,
}

/// POST /chat/createChat
pub async fn create_chat(
    State(chats): State<ChatService>,
    ApiJson(request): ApiJson<CreatePairwiseChatRequest>,
) -> Result<(StatusCode, Json<ChatEnvelope>), BackendError> {
    let chat = chats.ensure_chat(&request.sender, &request.receiver).await?;
    Ok((
        StatusCode::CREATED,
        Json(ChatEnvelope {
            message: "Chat ready".to_string(),
            chat,
        }),
    ))
}

/// POST /chat/sendMessage
pub async fn send_message(
    State(chats): State<ChatService>,
    ApiJson(request): ApiJson<PairwiseSendRequest>,
) -> Result<(StatusCode, Json<SentEnvelope>), BackendError> {
    let data = chats
        .send_pairwise_message(&request.sender_id, &request.receiver_id, &request.text)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(SentEnvelope {
            message: "Message sent".to_string(),
            data,
        }),
    ))
}

/// GET /chat/getMessages/{senderId}/{receiverId}
pub async fn get_messages(
    State(chats): State<ChatService>,
    Path((sender_id, receiver_id)): Path<(String, String)>,
    Query(params): Query<ListMessagesParams>,
) -> Result<Json<MessagesEnvelope>, BackendError> {
    let messages = chats
        .get_pairwise_messages(&sender_id, &receiver_id, &params)
        .await?;
    Ok(Json(MessagesEnvelope { messages }))
}

/// PUT /chat/editMessage
pub async fn edit_message(
    State(chats): State<ChatService>,
    ApiJson(request): ApiJson<PairwiseEditRequest>,
) -> Result<Json<ChatEnvelope>, BackendError> {
    let chat = chats
        .edit_message(&request.chat_id, &request.message_id, &request.new_text)
        .await?;
    Ok(Json(ChatEnvelope {
        message: "Message updated".to_string(),
        chat,
    }))
}

/// DELETE /chat/deleteMessage
pub async fn delete_message(
    State(chats): State<ChatService>,
    ApiJson(request): ApiJson<PairwiseDeleteRequest>,
) -> Result<Json<ChatEnvelope>, BackendError> {
    let chat = chats
        .delete_message(&request.chat_id, &request.message_id)
        .await?;
    Ok(Json(ChatEnvelope {
        message: "Message deleted".to_string(),
        chat,
    }))
}
