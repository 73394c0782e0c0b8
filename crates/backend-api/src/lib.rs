mod docs;
mod error;
mod middleware;
mod state;
mod util;

pub mod routes;

pub use docs::ApiDoc;
pub use error::{ApiError, ErrorResponse};
pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        // Auth routes
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/logout", post(routes::auth::logout))
        .route("/api/auth/me", get(routes::auth::current_user))
        // Chat routes
        .route("/api/chat/messages", post(routes::chat::get_messages))
        .route(
            "/api/chat/rooms",
            get(routes::chat::list_rooms).post(routes::chat::open_room),
        )
        .route("/api/chat/send", post(routes::chat::send_message))
        .route("/api/chat/unread", get(routes::chat::unread_count))
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::logging_middleware))
        .layer(middleware::cors_layer())
}
