use axum::Json;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health_check,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::current_user,
        crate::routes::chat::get_messages,
        crate::routes::chat::open_room,
        crate::routes::chat::list_rooms,
        crate::routes::chat::send_message,
        crate::routes::chat::unread_count
    ),
    components(
        schemas(
            crate::error::ErrorResponse,
            crate::routes::health::HealthResponse,
            crate::routes::auth::RegisterRequest,
            crate::routes::auth::LoginRequest,
            crate::routes::auth::SessionResponse,
            crate::routes::auth::UserResponse,
            crate::routes::chat::MessagesResponse,
            crate::routes::chat::MessageResponse,
            crate::routes::chat::RoomResponse,
            crate::routes::chat::RoomsResponse,
            crate::routes::chat::UnreadResponse,
            astroconsult_chats::Message,
            astroconsult_chats::ChatRoom,
            astroconsult_chats::HistoryRequest,
            astroconsult_chats::OpenRoomRequest,
            astroconsult_chats::SendMessageRequest
        )
    ),
    tags(
        (name = "Health", description = "Service health endpoints"),
        (name = "Auth", description = "Accounts and session management"),
        (name = "Chat", description = "Consultation rooms and messages")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        let schemes = &mut components.security_schemes;

        let mut scheme = SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer));
        if let SecurityScheme::Http(http) = &mut scheme {
            http.bearer_format = Some("Bearer".to_string());
        }

        schemes.insert("bearerAuth".to_string(), scheme);
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
