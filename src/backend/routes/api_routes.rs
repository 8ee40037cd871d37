/**
 * API Routes
 *
 * The REST family, mounted under `/api`.
 *
 * ## Users
 * - `POST /api/users`, `GET /api/users`
 * - `GET /api/users/validate/{phone}`
 * - `GET|PUT|DELETE /api/users/{userId}` (PUT and DELETE need that user's token)
 *
 * ## Tokens
 * - `POST /api/auth/token`, `DELETE /api/auth/token`
 * - `GET /api/auth/validate`
 *
 * ## Chats and messages
 * - `GET /api/chats/{userId}`, `POST /api/chats`, `DELETE /api/chats/{chatId}`
 * - `POST /api/messages`, `GET /api/messages/{chatId}`
 * - `PUT|DELETE /api/messages/{chatId}/{messageId}`
 * - `PATCH /api/messages/{chatId}/{messageId}/read`
 */

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::backend::auth::handlers::{generate_token, logout, validate_token};
use crate::backend::messaging::handlers as messaging;
use crate::backend::server::state::AppState;
use crate::backend::users;

pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Users
        .route("/api/users", post(users::create_user).get(users::list_users))
        .route("/api/users/validate/{phone}", get(users::validate_phone))
        .route(
            "/api/users/{user_id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        // Tokens
        .route("/api/auth/token", post(generate_token).delete(logout))
        .route("/api/auth/validate", get(validate_token))
        // Chats
        .route("/api/chats", post(messaging::create_chat))
        .route("/api/chats/{id}", get(messaging::list_user_chats).delete(messaging::delete_chat))
        // Messages
        .route("/api/messages", post(messaging::send_message))
        .route("/api/messages/{chat_id}", get(messaging::list_messages))
        .route(
            "/api/messages/{chat_id}/{message_id}",
            put(messaging::edit_message).delete(messaging::delete_message),
        )
        .route(
            "/api/messages/{chat_id}/{message_id}/read",
            patch(messaging::mark_read),
        )
}
