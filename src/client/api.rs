//! REST API client
//!
//! Thin async wrapper over the `/api` endpoints. Sends JSON, attaches
//! `Authorization: Bearer` once a token is set, and turns non-2xx answers
//! into [`ClientError::Api`]. Nothing is retried automatically.

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::client::error::ClientError;
use crate::client::state::ClientState;
use crate::shared::config::AppConfig;
use crate::shared::messaging::{
    Chat, CreateChatRequest, CreateUserRequest, ListMessagesParams, Message, SendMessageRequest,
    User, ValidatePhoneResponse,
};

#[derive(Deserialize)]
struct TokenBody {
    token: String,
}

#[derive(Deserialize)]
struct ValidateBody {
    user: User,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// API client
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: AppConfig,
    client: Client,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            client: Client::new(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = self.authorize(request).send().await?;
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.message)
            .unwrap_or_else(|_| {
                if text.is_empty() {
                    status.to_string()
                } else {
                    text
                }
            });

        tracing::warn!(status = status.as_u16(), %message, "API request failed");
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        Ok(self.send(request).await?.json::<T>().await?)
    }

    /// POST /auth/token; the issued token is not stored on the client
    pub async fn generate_token(&self, user_id: &str) -> Result<String, ClientError> {
        let request = self
            .client
            .post(self.config.endpoint("/auth/token"))
            .json(&json!({ "userId": user_id }));
        Ok(self.send_json::<TokenBody>(request).await?.token)
    }

    /// GET /auth/validate with the current token
    pub async fn validate_token(&self) -> Result<User, ClientError> {
        let request = self.client.get(self.config.endpoint("/auth/validate"));
        Ok(self.send_json::<ValidateBody>(request).await?.user)
    }

    /// DELETE /auth/token
    pub async fn logout(&self) -> Result<(), ClientError> {
        self.send(self.client.delete(self.config.endpoint("/auth/token")))
            .await?;
        Ok(())
    }

    pub async fn get_users(&self) -> Result<Vec<User>, ClientError> {
        self.send_json(self.client.get(self.config.endpoint("/users")))
            .await
    }

    /// GET /users/validate/{phone}; a malformed number answers `valid: false`
    pub async fn validate_phone(&self, phone: &str) -> Result<ValidatePhoneResponse, ClientError> {
        let url = self.config.endpoint(&format!("/users/validate/{}", phone));
        let response = self.authorize(self.client.get(url)).send().await?;
        if response.status() == StatusCode::BAD_REQUEST || response.status().is_success() {
            return Ok(response.json().await?);
        }
        Err(ClientError::Api {
            status: response.status().as_u16(),
            message: response.text().await.unwrap_or_default(),
        })
    }

    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<User, ClientError> {
        self.send_json(self.client.post(self.config.endpoint("/users")).json(request))
            .await
    }

    pub async fn get_user_chats(&self, user_id: &str) -> Result<Vec<Chat>, ClientError> {
        let url = self.config.endpoint(&format!("/chats/{}", user_id));
        self.send_json(self.client.get(url)).await
    }

    pub async fn create_chat(&self, request: &CreateChatRequest) -> Result<Chat, ClientError> {
        self.send_json(self.client.post(self.config.endpoint("/chats")).json(request))
            .await
    }

    pub async fn delete_chat(&self, chat_id: &str) -> Result<(), ClientError> {
        let url = self.config.endpoint(&format!("/chats/{}", chat_id));
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    /// One page of history, oldest first
    pub async fn get_chat_messages(
        &self,
        chat_id: &str,
        limit: Option<u32>,
        last_message_id: Option<&str>,
    ) -> Result<Vec<Message>, ClientError> {
        let url = self.config.endpoint(&format!("/messages/{}", chat_id));
        let params = ListMessagesParams {
            limit,
            last_message_id: last_message_id.map(str::to_string),
        };
        self.send_json(self.client.get(url).query(&params)).await
    }

    pub async fn send_message(&self, request: &SendMessageRequest) -> Result<Message, ClientError> {
        self.send_json(self.client.post(self.config.endpoint("/messages")).json(request))
            .await
    }

    /// Send with an immediate provisional entry in `state`
    ///
    /// On success the entry is replaced by the server record; on failure it
    /// stays in the list marked failed and the error is returned.
    pub async fn send_optimistic(
        &self,
        state: &mut ClientState,
        chat_id: &str,
        sender_id: &str,
        content: &str,
    ) -> Result<Message, ClientError> {
        let temp_id = state.begin_send(chat_id, sender_id, content);
        self.deliver(state, &temp_id, chat_id, sender_id, content).await
    }

    /// Resend a failed optimistic entry
    pub async fn resend(&self, state: &mut ClientState, temp_id: &str) -> Result<Message, ClientError> {
        let entry = state
            .retry_send(temp_id)
            .ok_or_else(|| ClientError::UnknownTempId(temp_id.to_string()))?;
        let message = entry.message;
        self.deliver(state, temp_id, &message.chat_id, &message.sender_id, &message.content)
            .await
    }

    async fn deliver(
        &self,
        state: &mut ClientState,
        temp_id: &str,
        chat_id: &str,
        sender_id: &str,
        content: &str,
    ) -> Result<Message, ClientError> {
        let request = SendMessageRequest {
            chat_id: chat_id.to_string(),
            sender_id: sender_id.to_string(),
            content: content.to_string(),
            message_type: None,
        };

        match self.send_message(&request).await {
            Ok(message) => {
                state.confirm_send(temp_id, message.clone());
                Ok(message)
            }
            Err(e) => {
                tracing::warn!(temp_id, "Send failed: {}", e);
                state.fail_send(temp_id);
                Err(e)
            }
        }
    }
}
