// ============================================================================
// AgentHub API - Auth Handlers
// File: crates/agenthub-api/src/handlers/auth.rs
// ============================================================================
//! Identity-exchange HTTP handler

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use agenthub_core::services::UserInfo;
use agenthub_shared::constants::TOKEN_TYPE_BEARER;

use crate::response::{domain_error_response, ApiResponse};
use crate::state::AppState;

/// Exchange request payload
#[derive(Debug, Deserialize)]
pub struct ExchangeRequest {
    pub identity_assertion: String,
}

/// Exchange response
#[derive(Debug, Serialize)]
pub struct ExchangeResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in_seconds: i64,
    pub user: UserDto,
}

/// User DTO for responses
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    pub email_verified: bool,
}

impl From<UserInfo> for UserDto {
    fn from(user: UserInfo) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            display_name: user.display_name,
            picture: user.picture,
            email_verified: user.email_verified,
        }
    }
}

/// Exchange handler - POST /auth/exchange
pub async fn exchange(
    State(state): State<AppState>,
    Json(payload): Json<ExchangeRequest>,
) -> Result<Json<ApiResponse<ExchangeResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    if payload.identity_assertion.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(
                "VALIDATION_ERROR",
                "identity_assertion is required",
            )),
        ));
    }

    let result = state
        .auth
        .exchange(&payload.identity_assertion)
        .await
        .map_err(domain_error_response)?;

    Ok(Json(ApiResponse::success(ExchangeResponse {
        access_token: result.access_token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in_seconds: result.expires_in_seconds,
        user: UserDto::from(result.user),
    })))
}
