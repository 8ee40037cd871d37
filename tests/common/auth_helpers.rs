//! Authentication test helpers
//!
//! Provides utilities for creating test users and tokens through the API.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use yapyap::backend::auth::handlers::types::SignupResponse;
use yapyap::shared::messaging::{Chat, Message, User};

/// Test user credentials
pub struct TestUser {
    pub user: User,
    pub password: String,
    pub token: String,
}

/// Create a password-less user through `POST /api/users`
pub async fn create_user(server: &TestServer, name: &str, phone: &str) -> User {
    let response = server
        .post("/api/users")
        .json(&json!({ "name": name, "phone": phone }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());
    response.json::<User>()
}

/// Issue a token for a user through `POST /api/auth/token`
pub async fn token_for(server: &TestServer, user_id: &str) -> String {
    let response = server
        .post("/api/auth/token")
        .json(&json!({ "userId": user_id }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.json::<serde_json::Value>()["token"]
        .as_str()
        .expect("token in response")
        .to_string()
}

/// Sign up a credentialed user through `POST /user/signup`
pub async fn signup_user(server: &TestServer, name: &str, phone: &str, email: Option<&str>) -> TestUser {
    let password = "password123".to_string();
    let response = server
        .post("/user/signup")
        .json(&json!({
            "name": name,
            "phone": phone,
            "email": email,
            "password": password,
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());

    let body = response.json::<SignupResponse>();
    TestUser {
        user: body.user,
        password,
        token: body.token,
    }
}

/// Create a two-party chat through `POST /api/chats`
pub async fn create_chat(server: &TestServer, a: &str, b: &str) -> Chat {
    let response = server
        .post("/api/chats")
        .json(&json!({ "participants": [a, b] }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());
    response.json::<Chat>()
}

/// Send a text message through `POST /api/messages`
pub async fn send_text(server: &TestServer, chat_id: &str, sender_id: &str, content: &str) -> Message {
    let response = server
        .post("/api/messages")
        .json(&json!({ "chatId": chat_id, "senderId": sender_id, "content": content }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());
    response.json::<Message>()
}
