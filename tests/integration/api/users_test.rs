//! User API integration tests
//!
//! Creation, phone validation and self-only profile changes.

#[cfg(feature = "ssr")]
mod tests {
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use yapyap::shared::messaging::{User, ValidatePhoneResponse};

    use crate::assert_error_body;
    use crate::common::{create_user, spawn_app, token_for};

    #[tokio::test]
    async fn test_create_user_returns_created_user() {
        let app = spawn_app().await;

        let response = app
            .server
            .post("/api/users")
            .json(&json!({ "name": "Alice", "phone": "+14155551234" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::CREATED);
        let user = response.json::<User>();
        assert_eq!(user.name, "Alice");
        assert_eq!(user.phone, "+14155551234");
        assert!(!user.id.is_empty());
    }

    #[tokio::test]
    async fn test_create_user_duplicate_phone_conflicts() {
        let app = spawn_app().await;
        create_user(&app.server, "Alice", "+14155551234").await;

        let response = app
            .server
            .post("/api/users")
            .json(&json!({ "name": "Other", "phone": "+14155551234" }))
            .await;

        assert_error_body!(response, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_create_user_rejects_bad_input() {
        let app = spawn_app().await;

        let no_plus = app
            .server
            .post("/api/users")
            .json(&json!({ "name": "Alice", "phone": "4155551234" }))
            .await;
        assert_error_body!(no_plus, StatusCode::BAD_REQUEST);

        let no_name = app
            .server
            .post("/api/users")
            .json(&json!({ "name": "  ", "phone": "+14155551234" }))
            .await;
        assert_error_body!(no_name, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_users() {
        let app = spawn_app().await;
        create_user(&app.server, "Alice", "+14155551234").await;
        create_user(&app.server, "Bob", "+14155556789").await;

        let users = app.server.get("/api/users").await.json::<Vec<User>>();
        let mut names: Vec<_> = users.iter().map(|u| u.name.as_str()).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[tokio::test]
    async fn test_validate_phone_well_formed() {
        let app = spawn_app().await;

        let response = app.server.get("/api/users/validate/+14155551234").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body = response.json::<ValidatePhoneResponse>();
        assert!(body.valid);
        assert_eq!(body.exists, Some(false));

        create_user(&app.server, "Alice", "+14155551234").await;
        let body = app
            .server
            .get("/api/users/validate/+14155551234")
            .await
            .json::<ValidatePhoneResponse>();
        assert_eq!(body.exists, Some(true));
    }

    #[tokio::test]
    async fn test_validate_phone_malformed() {
        let app = spawn_app().await;

        for phone in ["4155551234", "+0123"] {
            let response = app.server.get(&format!("/api/users/validate/{phone}")).await;
            assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{phone}");
            let body = response.json::<ValidatePhoneResponse>();
            assert!(!body.valid);
            assert!(body.message.is_some());
        }
    }

    #[tokio::test]
    async fn test_get_unknown_user_is_not_found() {
        let app = spawn_app().await;
        let response = app.server.get("/api/users/does-not-exist").await;
        assert_error_body!(response, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_own_profile() {
        let app = spawn_app().await;
        let alice = create_user(&app.server, "Alice", "+14155551234").await;
        let token = token_for(&app.server, &alice.id).await;

        let response = app
            .server
            .put(&format!("/api/users/{}", alice.id))
            .authorization_bearer(&token)
            .json(&json!({ "about": "Hello there", "name": "Alice B" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let user = response.json::<User>();
        assert_eq!(user.name, "Alice B");
        assert_eq!(user.about, "Hello there");
        assert_eq!(user.phone, "+14155551234");
    }

    #[tokio::test]
    async fn test_update_requires_token() {
        let app = spawn_app().await;
        let alice = create_user(&app.server, "Alice", "+14155551234").await;

        let response = app
            .server
            .put(&format!("/api/users/{}", alice.id))
            .json(&json!({ "name": "Mallory" }))
            .await;

        assert_error_body!(response, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_cannot_modify_another_user() {
        let app = spawn_app().await;
        let alice = create_user(&app.server, "Alice", "+14155551234").await;
        let bob = create_user(&app.server, "Bob", "+14155556789").await;
        let bob_token = token_for(&app.server, &bob.id).await;

        let update = app
            .server
            .put(&format!("/api/users/{}", alice.id))
            .authorization_bearer(&bob_token)
            .json(&json!({ "name": "Mallory" }))
            .await;
        assert_error_body!(update, StatusCode::UNAUTHORIZED);

        let delete = app
            .server
            .delete(&format!("/api/users/{}", alice.id))
            .authorization_bearer(&bob_token)
            .await;
        assert_error_body!(delete, StatusCode::UNAUTHORIZED);

        let still_there = app.server.get(&format!("/api/users/{}", alice.id)).await;
        assert_eq!(still_there.json::<User>().name, "Alice");
    }

    #[tokio::test]
    async fn test_delete_self_revokes_token() {
        let app = spawn_app().await;
        let alice = create_user(&app.server, "Alice", "+14155551234").await;
        let token = token_for(&app.server, &alice.id).await;

        let response = app
            .server
            .delete(&format!("/api/users/{}", alice.id))
            .authorization_bearer(&token)
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let gone = app.server.get(&format!("/api/users/{}", alice.id)).await;
        assert_eq!(gone.status_code(), StatusCode::NOT_FOUND);

        let validate = app
            .server
            .get("/api/auth/validate")
            .authorization_bearer(&token)
            .await;
        assert_eq!(validate.status_code(), StatusCode::UNAUTHORIZED);
    }
}
