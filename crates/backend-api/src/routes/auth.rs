use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use astroconsult_auth::{AuthSession, Role, User};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::{util::require_bearer, ApiError, AppState};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub display_name: Option<String>,
    /// `user` (default) or `astrologer`
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "user")]
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    pub user: UserResponse,
    pub expires_at: String,
}

impl SessionResponse {
    pub fn new(session: AuthSession, user: User) -> Self {
        Self {
            token: session.token,
            user: user.into(),
            expires_at: session.expires_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[schema(value_type = String, example = "astrologer")]
    pub role: Role,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        Self {
            id: value.public_id,
            email: value.email,
            display_name: value.display_name,
            role: value.role,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created and signed in", body = SessionResponse),
        (status = 400, description = "Invalid registration payload", body = crate::error::ErrorResponse),
        (status = 409, description = "Email already registered", body = crate::error::ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let role = payload.role.unwrap_or(Role::User);
    if role == Role::Admin {
        return Err(ApiError::bad_request("role must be user or astrologer"));
    }

    let user = state
        .authenticator()
        .register_with_password(
            &payload.email,
            &payload.password,
            payload.display_name.as_deref(),
            role,
        )
        .await?;

    let session = state
        .authenticator()
        .login_with_password(&payload.email, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(SessionResponse::new(session, user))))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = SessionResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state
        .authenticator()
        .login_with_password(&payload.email, &payload.password)
        .await?;
    let user = state.authenticator().user_profile(session.user_id).await?;

    info!(user = %user.public_id, "signed in");
    Ok(Json(SessionResponse::new(session, user)))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    responses(
        (status = 204, description = "Session revoked"),
        (status = 401, description = "No valid session", body = crate::error::ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let token = require_bearer(&headers)?;
    state.authenticator().revoke_session(token).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Profile of the signed-in account", body = UserResponse),
        (status = 401, description = "No valid session", body = crate::error::ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn current_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<UserResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    let (user, _) = state.authenticator().authenticate_token(token).await?;
    Ok(Json(user.into()))
}
