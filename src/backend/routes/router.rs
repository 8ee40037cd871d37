/**
 * Router Configuration
 *
 * Combines both route families, the health check and the HTTP layers into a
 * single Axum router.
 *
 * # Layers
 *
 * - `CorsLayer` built from `ALLOWED_ORIGINS` (`*` allows any origin)
 * - `TraceLayer` for request/response spans
 */

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::pairwise_routes::configure_pairwise_routes;
use crate::backend::server::config::AllowedOrigins;
use crate::backend::server::state::AppState;

pub fn create_router(app_state: AppState) -> Router<()> {
    let cors = cors_layer(&app_state.config.allowed_origins);

    let router = Router::new().route("/health", get(health_check));
    let router = configure_api_routes(router);
    let router = configure_pairwise_routes(router);

    router
        .fallback(|| async { (axum::http::StatusCode::NOT_FOUND, "404 Not Found") })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

fn cors_layer(origins: &AllowedOrigins) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    match origins {
        AllowedOrigins::Any => layer.allow_origin(Any),
        AllowedOrigins::List(list) => {
            let values: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            layer.allow_origin(AllowOrigin::list(values))
        }
    }
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
