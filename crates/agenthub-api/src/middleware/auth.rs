//! Bearer-token extractor
//!
//! Mutating routes take an [`AuthUser`] parameter; its presence is what makes
//! a route authenticated.

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, StatusCode};
use axum::Json;

use crate::response::ApiResponse;
use crate::state::AppState;

/// Authenticated caller, resolved from the `Authorization: Bearer` header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub email: String,
}

fn unauthorized(message: &str) -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::error("UNAUTHORIZED", message)),
    )
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = (StatusCode, Json<ApiResponse<()>>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Missing bearer token"))?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(|| unauthorized("Missing bearer token"))?;

        let claims = state
            .jwt
            .validate_token(token)
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        Ok(Self {
            user_id: claims.sub,
            email: claims.email,
        })
    }
}
