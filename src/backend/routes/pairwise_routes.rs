/**
 * Pairwise Routes
 *
 * Party-pair addressed chat endpoints and the credentialed account flow.
 *
 * - `POST /chat/createChat`
 * - `POST /chat/sendMessage`
 * - `GET /chat/getMessages/{senderId}/{receiverId}`
 * - `PUT /chat/editMessage`
 * - `DELETE /chat/deleteMessage`
 * - `POST /user/signup`
 * - `POST /user/login`
 */

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::backend::auth::handlers::{login, signup};
use crate::backend::messaging::pairwise;
use crate::backend::server::state::AppState;

pub fn configure_pairwise_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/chat/createChat", post(pairwise::create_chat))
        .route("/chat/sendMessage", post(pairwise::send_message))
        .route(
            "/chat/getMessages/{sender_id}/{receiver_id}",
            get(pairwise::get_messages),
        )
        .route("/chat/editMessage", put(pairwise::edit_message))
        .route("/chat/deleteMessage", delete(pairwise::delete_message))
        .route("/user/signup", post(signup))
        .route("/user/login", post(login))
}
