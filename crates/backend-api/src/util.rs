use axum::http::{header::AUTHORIZATION, HeaderMap};

use crate::ApiError;

/// Token from an `Authorization: Bearer <token>` header.
///
/// A missing header, a different scheme, and an empty token all yield `None`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;

    let mut parts = value.split_whitespace();
    let scheme = parts.next()?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }

    parts.next().filter(|token| !token.is_empty())
}

pub fn require_bearer(headers: &HeaderMap) -> Result<&str, ApiError> {
    bearer_token(headers).ok_or_else(ApiError::unauthorized)
}
