//! API Response wrapper

use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use tracing::error;

use agenthub_core::error::DomainError;

#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.to_string(),
                message: message.to_string(),
            }),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Map a domain error to the HTTP envelope. Dependency failures keep their
/// detail in the logs; the caller only sees a generic 500.
pub fn domain_error_response(err: DomainError) -> (StatusCode, Json<ApiResponse<()>>) {
    let (status, code, message) = match &err {
        DomainError::ValidationError(msg) => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
        }
        DomainError::TenantNotFound => (
            StatusCode::NOT_FOUND,
            "TENANT_NOT_FOUND",
            "Tenant not found".to_string(),
        ),
        DomainError::Forbidden => (
            StatusCode::FORBIDDEN,
            "FORBIDDEN",
            "Only the tenant owner may perform this operation".to_string(),
        ),
        DomainError::UserNotFound => (
            StatusCode::UNAUTHORIZED,
            "AUTH_FAILED",
            "No platform user is mapped to this identity".to_string(),
        ),
        DomainError::IdentityVerificationFailed(_) => (
            StatusCode::UNAUTHORIZED,
            "AUTH_FAILED",
            "Identity verification failed".to_string(),
        ),
        DomainError::NotConfigured(what) => {
            error!("Request rejected, missing configuration: {}", what);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "NOT_CONFIGURED",
                format!("Required configuration missing: {}", what),
            )
        }
        DomainError::TokenGenerationError(_)
        | DomainError::DatabaseError(_)
        | DomainError::StorageError(_)
        | DomainError::InternalError(_) => {
            error!("Internal error handling request: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error".to_string(),
            )
        }
    };
    (status, Json(ApiResponse::error(code, &message)))
}
