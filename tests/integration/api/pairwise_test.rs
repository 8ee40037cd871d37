//! Pairwise chat API integration tests
//!
//! The `/chat/*` family, where a chat is addressed by its two participants.

#[cfg(feature = "ssr")]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use yapyap::backend::messaging::pairwise::{ChatEnvelope, MessagesEnvelope, SentEnvelope};
    use yapyap::backend::messaging::ChatService;
    use yapyap::backend::server::connect_in_memory;

    use crate::assert_error_body;
    use crate::common::{create_user, spawn_app, TestApp};

    async fn pair() -> (TestApp, String, String) {
        let app = spawn_app().await;
        let alice = create_user(&app.server, "Alice", "+14155551234").await.id;
        let bob = create_user(&app.server, "Bob", "+14155556789").await.id;
        (app, alice, bob)
    }

    async fn ensure(app: &TestApp, sender: &str, receiver: &str) -> ChatEnvelope {
        let response = app
            .server
            .post("/chat/createChat")
            .json(&json!({ "sender": sender, "receiver": receiver }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());
        response.json::<ChatEnvelope>()
    }

    async fn send(app: &TestApp, sender: &str, receiver: &str, text: &str) -> SentEnvelope {
        let response = app
            .server
            .post("/chat/sendMessage")
            .json(&json!({ "senderId": sender, "receiverId": receiver, "text": text }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());
        response.json::<SentEnvelope>()
    }

    #[tokio::test]
    async fn test_create_chat_is_idempotent_in_either_order() {
        let (app, alice, bob) = pair().await;

        let first = ensure(&app, &alice, &bob).await;
        let again = ensure(&app, &alice, &bob).await;
        let reversed = ensure(&app, &bob, &alice).await;

        assert_eq!(first.chat.id, again.chat.id);
        assert_eq!(first.chat.id, reversed.chat.id);
        assert_eq!(first.chat.participants, vec![alice.clone(), bob.clone()]);
    }

    #[tokio::test]
    async fn test_create_chat_rejects_bad_pairs() {
        let (app, alice, _) = pair().await;

        let with_self = app
            .server
            .post("/chat/createChat")
            .json(&json!({ "sender": alice, "receiver": alice }))
            .await;
        assert_error_body!(with_self, StatusCode::BAD_REQUEST);

        let missing = app
            .server
            .post("/chat/createChat")
            .json(&json!({ "sender": alice }))
            .await;
        assert_error_body!(missing, StatusCode::BAD_REQUEST);

        let unknown = app
            .server
            .post("/chat/createChat")
            .json(&json!({ "sender": alice, "receiver": "ghost" }))
            .await;
        assert_error_body!(unknown, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_send_requires_existing_chat() {
        let (app, alice, bob) = pair().await;

        let response = app
            .server
            .post("/chat/sendMessage")
            .json(&json!({ "senderId": alice, "receiverId": bob, "text": "hi" }))
            .await;
        assert_error_body!(response, StatusCode::NOT_FOUND);

        let chats: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chats")
            .fetch_one(&app.pool)
            .await
            .unwrap();
        assert_eq!(chats, 0);
    }

    #[tokio::test]
    async fn test_send_and_read_back_from_either_side() {
        let (app, alice, bob) = pair().await;
        let chat = ensure(&app, &alice, &bob).await.chat;

        let sent = send(&app, &bob, &alice, "hey alice").await;
        assert_eq!(sent.data.chat_id, chat.id);
        assert_eq!(sent.data.sender_id, bob);

        for (a, b) in [(&alice, &bob), (&bob, &alice)] {
            let response = app.server.get(&format!("/chat/getMessages/{a}/{b}")).await;
            assert_eq!(response.status_code(), StatusCode::OK);
            let body = response.json::<MessagesEnvelope>();
            assert_eq!(body.messages, vec![sent.data.clone()]);
        }
    }

    #[tokio::test]
    async fn test_get_messages_without_chat() {
        let (app, alice, bob) = pair().await;
        let response = app.server.get(&format!("/chat/getMessages/{alice}/{bob}")).await;
        assert_error_body!(response, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_edit_and_delete() {
        let (app, alice, bob) = pair().await;
        let chat = ensure(&app, &alice, &bob).await.chat;
        let sent = send(&app, &alice, &bob, "helo").await.data;

        let edited = app
            .server
            .put("/chat/editMessage")
            .json(&json!({ "chatId": chat.id, "messageId": sent.id, "newText": "hello" }))
            .await;
        assert_eq!(edited.status_code(), StatusCode::OK);
        assert_eq!(edited.json::<ChatEnvelope>().chat.id, chat.id);

        let messages = app
            .server
            .get(&format!("/chat/getMessages/{alice}/{bob}"))
            .await
            .json::<MessagesEnvelope>()
            .messages;
        assert_eq!(messages[0].content, "hello");

        let deleted = app
            .server
            .delete("/chat/deleteMessage")
            .json(&json!({ "chatId": chat.id, "messageId": sent.id }))
            .await;
        assert_eq!(deleted.status_code(), StatusCode::OK);

        let messages = app
            .server
            .get(&format!("/chat/getMessages/{alice}/{bob}"))
            .await
            .json::<MessagesEnvelope>()
            .messages;
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn test_edit_unknown_message() {
        let (app, alice, bob) = pair().await;
        let chat = ensure(&app, &alice, &bob).await.chat;

        let response = app
            .server
            .put("/chat/editMessage")
            .json(&json!({ "chatId": chat.id, "messageId": "missing", "newText": "x" }))
            .await;

        assert_error_body!(response, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_concurrent_ensure_yields_one_chat() {
        let pool = connect_in_memory().await.unwrap();
        let a = yapyap::backend::auth::users::create_user(
            &pool,
            yapyap::backend::auth::users::NewUser {
                name: "A".into(),
                phone: "+15550000001".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let b = yapyap::backend::auth::users::create_user(
            &pool,
            yapyap::backend::auth::users::NewUser {
                name: "B".into(),
                phone: "+15550000002".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let service = Arc::new(ChatService::new(pool.clone()));
        let mut handles = Vec::new();
        for n in 0..8 {
            let service = service.clone();
            let (x, y) = if n % 2 == 0 {
                (a.id.clone(), b.id.clone())
            } else {
                (b.id.clone(), a.id.clone())
            };
            handles.push(tokio::spawn(async move { service.ensure_chat(&x, &y).await }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().id);
        }
        ids.dedup();
        assert_eq!(ids.len(), 1);

        let chats: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chats")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(chats, 1);
    }
}
