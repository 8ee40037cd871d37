//! Message API integration tests
//!
//! Sending, cursor pagination, edit, delete and read receipts over
//! `/api/messages`.

#[cfg(feature = "ssr")]
mod tests {
    use std::time::Duration;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use yapyap::shared::messaging::{Chat, Message, MessageType};

    use crate::assert_error_body;
    use crate::common::{create_chat, create_user, send_text, spawn_app, TestApp};

    struct Conversation {
        app: TestApp,
        alice: String,
        bob: String,
        chat: Chat,
    }

    async fn conversation() -> Conversation {
        let app = spawn_app().await;
        let alice = create_user(&app.server, "Alice", "+14155551234").await.id;
        let bob = create_user(&app.server, "Bob", "+14155556789").await.id;
        let chat = create_chat(&app.server, &alice, &bob).await;
        Conversation { app, alice, bob, chat }
    }

    /// Send `count` messages with distinct timestamps
    async fn send_numbered(server: &TestServer, chat_id: &str, sender: &str, count: usize) -> Vec<Message> {
        let mut sent = Vec::with_capacity(count);
        for n in 0..count {
            sent.push(send_text(server, chat_id, sender, &format!("message {n}")).await);
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        sent
    }

    async fn page(server: &TestServer, chat_id: &str, limit: Option<u32>, cursor: Option<&str>) -> Vec<Message> {
        let mut request = server.get(&format!("/api/messages/{chat_id}"));
        if let Some(limit) = limit {
            request = request.add_query_param("limit", limit);
        }
        if let Some(cursor) = cursor {
            request = request.add_query_param("lastMessageId", cursor);
        }
        let response = request.await;
        assert_eq!(response.status_code(), StatusCode::OK, "{}", response.text());
        response.json::<Vec<Message>>()
    }

    fn contents(messages: &[Message]) -> Vec<&str> {
        messages.iter().map(|m| m.content.as_str()).collect()
    }

    #[tokio::test]
    async fn test_send_message_defaults() {
        let c = conversation().await;

        let message = send_text(&c.app.server, &c.chat.id, &c.alice, "hello").await;

        assert_eq!(message.chat_id, c.chat.id);
        assert_eq!(message.sender_id, c.alice);
        assert_eq!(message.message_type, MessageType::Text);
        assert!(!message.is_read);
    }

    #[tokio::test]
    async fn test_send_message_updates_last_message() {
        let c = conversation().await;

        send_text(&c.app.server, &c.chat.id, &c.alice, "first").await;
        let reply = send_text(&c.app.server, &c.chat.id, &c.bob, "second").await;

        let chats = c
            .app
            .server
            .get(&format!("/api/chats/{}", c.alice))
            .await
            .json::<Vec<Chat>>();
        let last = chats[0].last_message.clone().expect("last message set");
        assert_eq!(last.content, "second");
        assert_eq!(last.sender_id, c.bob);
        assert_eq!(last.created_at, reply.created_at);
    }

    #[tokio::test]
    async fn test_send_message_validation() {
        let c = conversation().await;

        let empty = c
            .app
            .server
            .post("/api/messages")
            .json(&json!({ "chatId": c.chat.id, "senderId": c.alice, "content": "   " }))
            .await;
        assert_error_body!(empty, StatusCode::BAD_REQUEST);

        let unknown_sender = c
            .app
            .server
            .post("/api/messages")
            .json(&json!({ "chatId": c.chat.id, "senderId": "ghost", "content": "hi" }))
            .await;
        assert_error_body!(unknown_sender, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_send_message_requires_json_body() {
        let c = conversation().await;

        let plain = c
            .app
            .server
            .post("/api/messages")
            .text(format!(r#"{{"chatId":"{}","senderId":"{}","content":"hi"}}"#, c.chat.id, c.alice))
            .await;
        assert_error_body!(plain, StatusCode::BAD_REQUEST);

        let truncated = c
            .app
            .server
            .post("/api/messages")
            .text(r#"{"chatId": "#)
            .content_type("application/json")
            .await;
        assert_error_body!(truncated, StatusCode::BAD_REQUEST);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
            .fetch_one(&c.app.pool)
            .await
            .unwrap();
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn test_send_image_message() {
        let c = conversation().await;

        let response = c
            .app
            .server
            .post("/api/messages")
            .json(&json!({
                "chatId": c.chat.id,
                "senderId": c.alice,
                "content": "https://example.com/cat.png",
                "type": "image",
            }))
            .await;

        assert_eq!(response.status_code(), StatusCode::CREATED);
        assert_eq!(response.json::<Message>().message_type, MessageType::Image);
    }

    #[tokio::test]
    async fn test_history_is_oldest_first() {
        let c = conversation().await;
        send_numbered(&c.app.server, &c.chat.id, &c.alice, 3).await;

        let messages = page(&c.app.server, &c.chat.id, None, None).await;

        assert_eq!(contents(&messages), vec!["message 0", "message 1", "message 2"]);
    }

    #[tokio::test]
    async fn test_cursor_pagination_walks_back_through_history() {
        let c = conversation().await;
        let sent = send_numbered(&c.app.server, &c.chat.id, &c.alice, 7).await;

        let newest = page(&c.app.server, &c.chat.id, Some(3), None).await;
        assert_eq!(contents(&newest), vec!["message 4", "message 5", "message 6"]);

        let middle = page(&c.app.server, &c.chat.id, Some(3), Some(&newest[0].id)).await;
        assert_eq!(contents(&middle), vec!["message 1", "message 2", "message 3"]);

        let oldest = page(&c.app.server, &c.chat.id, Some(3), Some(&middle[0].id)).await;
        assert_eq!(contents(&oldest), vec!["message 0"]);

        let past_start = page(&c.app.server, &c.chat.id, Some(3), Some(&oldest[0].id)).await;
        assert!(past_start.is_empty());

        let mut stitched = Vec::new();
        for part in [oldest, middle, newest] {
            stitched.extend(part.into_iter().map(|m| m.id));
        }
        let sent_ids: Vec<_> = sent.into_iter().map(|m| m.id).collect();
        assert_eq!(stitched, sent_ids);
    }

    #[tokio::test]
    async fn test_page_limit_defaults_and_clamps() {
        let c = conversation().await;
        for n in 0..105 {
            send_text(&c.app.server, &c.chat.id, &c.alice, &format!("m{n}")).await;
        }

        assert_eq!(page(&c.app.server, &c.chat.id, None, None).await.len(), 20);
        assert_eq!(page(&c.app.server, &c.chat.id, Some(0), None).await.len(), 20);
        assert_eq!(page(&c.app.server, &c.chat.id, Some(500), None).await.len(), 100);
    }

    #[tokio::test]
    async fn test_unknown_cursor_is_ignored() {
        let c = conversation().await;
        send_numbered(&c.app.server, &c.chat.id, &c.alice, 2).await;

        let messages = page(&c.app.server, &c.chat.id, None, Some("not-a-message")).await;

        assert_eq!(contents(&messages), vec!["message 0", "message 1"]);
    }

    #[tokio::test]
    async fn test_history_of_unknown_chat() {
        let app = spawn_app().await;
        let response = app.server.get("/api/messages/missing").await;
        assert_error_body!(response, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_pagination_survives_missing_index() {
        let c = conversation().await;
        let sent = send_numbered(&c.app.server, &c.chat.id, &c.alice, 5).await;

        let indexed = page(&c.app.server, &c.chat.id, Some(2), Some(&sent[3].id)).await;

        sqlx::query("DROP INDEX idx_messages_chat_created")
            .execute(&c.app.pool)
            .await
            .unwrap();

        let fallback = page(&c.app.server, &c.chat.id, Some(2), Some(&sent[3].id)).await;
        assert_eq!(fallback, indexed);
        assert_eq!(contents(&fallback), vec!["message 1", "message 2"]);

        let latest = page(&c.app.server, &c.chat.id, None, None).await;
        assert_eq!(latest.len(), 5);
    }

    #[tokio::test]
    async fn test_edit_message_keeps_timestamp_and_read_flag() {
        let c = conversation().await;
        let original = send_text(&c.app.server, &c.chat.id, &c.alice, "typo").await;
        c.app
            .server
            .patch(&format!("/api/messages/{}/{}/read", c.chat.id, original.id))
            .await;

        let response = c
            .app
            .server
            .put(&format!("/api/messages/{}/{}", c.chat.id, original.id))
            .json(&json!({ "content": "fixed" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Chat>().id, c.chat.id);

        let messages = page(&c.app.server, &c.chat.id, None, None).await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id, original.id);
        assert_eq!(messages[0].content, "fixed");
        assert_eq!(messages[0].created_at, original.created_at);
        assert!(messages[0].is_read);
    }

    #[tokio::test]
    async fn test_edit_message_errors() {
        let c = conversation().await;
        let message = send_text(&c.app.server, &c.chat.id, &c.alice, "hello").await;

        let unknown_message = c
            .app
            .server
            .put(&format!("/api/messages/{}/missing", c.chat.id))
            .json(&json!({ "content": "x" }))
            .await;
        assert_error_body!(unknown_message, StatusCode::NOT_FOUND);

        let unknown_chat = c
            .app
            .server
            .put(&format!("/api/messages/missing/{}", message.id))
            .json(&json!({ "content": "x" }))
            .await;
        assert_error_body!(unknown_chat, StatusCode::NOT_FOUND);

        let empty = c
            .app
            .server
            .put(&format!("/api/messages/{}/{}", c.chat.id, message.id))
            .json(&json!({ "content": "" }))
            .await;
        assert_error_body!(empty, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_message_is_idempotent() {
        let c = conversation().await;
        let keep = send_text(&c.app.server, &c.chat.id, &c.alice, "keep").await;
        let drop = send_text(&c.app.server, &c.chat.id, &c.bob, "drop").await;
        let path = format!("/api/messages/{}/{}", c.chat.id, drop.id);

        let first = c.app.server.delete(&path).await;
        assert_eq!(first.status_code(), StatusCode::OK);
        let second = c.app.server.delete(&path).await;
        assert_eq!(second.status_code(), StatusCode::OK);

        let messages = page(&c.app.server, &c.chat.id, None, None).await;
        let ids: Vec<_> = messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec![keep.id.as_str()]);
    }

    #[tokio::test]
    async fn test_delete_message_in_unknown_chat() {
        let app = spawn_app().await;
        let response = app.server.delete("/api/messages/missing/whatever").await;
        assert_error_body!(response, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_mark_read() {
        let c = conversation().await;
        let message = send_text(&c.app.server, &c.chat.id, &c.alice, "hello").await;

        let response = c
            .app
            .server
            .patch(&format!("/api/messages/{}/{}/read", c.chat.id, message.id))
            .await;
        assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

        let missing = c
            .app
            .server
            .patch(&format!("/api/messages/{}/missing/read", c.chat.id))
            .await;
        assert_error_body!(missing, StatusCode::NOT_FOUND);

        let messages = page(&c.app.server, &c.chat.id, None, None).await;
        assert!(messages[0].is_read);
    }
}
