// ============================================================================
// AgentHub API - Tenant Handlers
// File: crates/agenthub-api/src/handlers/tenants.rs
// ============================================================================
//! Tenant provisioning HTTP handlers (create, list, get, system prompt)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use agenthub_core::domain::TenantConfig;
use agenthub_core::error::DomainError;
use agenthub_core::repositories::{BucketProvisionOutcome, UpdateOutcome};
use agenthub_core::services::{CreateTenantOutcome, CreateTenantRequest};

use crate::middleware::AuthUser;
use crate::response::{domain_error_response, ApiResponse};
use crate::state::AppState;

/// Create request payload. The field aliases keep older clients working.
#[derive(Debug, Deserialize)]
pub struct CreateClientRequest {
    pub tenant_id: String,
    pub display_name: String,
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default, alias = "storage_bucket_region")]
    pub region: Option<String>,
    #[serde(default, alias = "mongodb_database_name")]
    pub database_name: Option<String>,
    #[serde(default)]
    pub openai_api_key: Option<String>,
    #[serde(default)]
    pub tools: Option<Vec<Value>>,
    #[serde(default, alias = "additional_config")]
    pub overrides: Option<Map<String, Value>>,
}

#[derive(Debug, Serialize)]
pub struct CreateClientResponse {
    pub status: String,
    pub config: TenantConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<BucketProvisionOutcome>,
}

#[derive(Debug, Serialize)]
pub struct ClientListResponse {
    pub count: usize,
    pub clients: Vec<TenantConfig>,
}

#[derive(Debug, Deserialize)]
pub struct SystemPromptRequest {
    pub system_prompt: String,
}

/// Create handler - POST /clients
///
/// The authenticated caller becomes the tenant owner. Re-creating an
/// existing tenant is a normal `exists` result, never a conflict error.
pub async fn create_client(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateClientRequest>,
) -> Result<Json<ApiResponse<CreateClientResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let outcome = state
        .tenants
        .create_tenant(
            CreateTenantRequest {
                tenant_id: payload.tenant_id,
                display_name: payload.display_name,
                system_prompt: payload.system_prompt,
                region: payload.region,
                database_name: payload.database_name,
                openai_api_key: payload.openai_api_key,
                tools: payload.tools,
                overrides: payload.overrides,
            },
            &user.user_id,
        )
        .await
        .map_err(domain_error_response)?;

    let response = match outcome {
        CreateTenantOutcome::Created { config, storage } => CreateClientResponse {
            status: "created".to_string(),
            config,
            storage: Some(storage),
        },
        CreateTenantOutcome::Exists(config) => CreateClientResponse {
            status: "exists".to_string(),
            config,
            storage: None,
        },
    };
    Ok(Json(ApiResponse::success(response)))
}

/// List handler - GET /clients
pub async fn list_clients(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ClientListResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let clients = state
        .tenants
        .list_tenants()
        .await
        .map_err(domain_error_response)?;

    Ok(Json(ApiResponse::success(ClientListResponse {
        count: clients.len(),
        clients,
    })))
}

/// Get handler - GET /clients/{id}
pub async fn get_client(
    State(state): State<AppState>,
    Path(tenant_id): Path<String>,
) -> Result<Json<ApiResponse<TenantConfig>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state
        .tenants
        .get_tenant(&tenant_id)
        .await
        .map_err(domain_error_response)?
    {
        Some(config) => Ok(Json(ApiResponse::success(config))),
        None => Err(domain_error_response(DomainError::TenantNotFound)),
    }
}

/// System prompt handler - PUT|POST /clients/{id}/system-prompt
pub async fn update_system_prompt(
    State(state): State<AppState>,
    user: AuthUser,
    Path(tenant_id): Path<String>,
    Json(payload): Json<SystemPromptRequest>,
) -> Result<Json<ApiResponse<TenantConfig>>, (StatusCode, Json<ApiResponse<()>>)> {
    state
        .gate
        .authorize_mutation(&user.user_id, &tenant_id)
        .await
        .map_err(domain_error_response)?;

    match state
        .tenants
        .update_system_prompt(&tenant_id, &payload.system_prompt)
        .await
        .map_err(domain_error_response)?
    {
        UpdateOutcome::Updated(config) => Ok(Json(ApiResponse::success(config))),
        UpdateOutcome::NotFound => Err(domain_error_response(DomainError::TenantNotFound)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_accepts_legacy_field_names() {
        let payload: CreateClientRequest = serde_json::from_str(
            r#"{
                "tenant_id": "acme",
                "display_name": "Acme",
                "storage_bucket_region": "us-east-1",
                "mongodb_database_name": "ACME_PRIMARY",
                "openai_api_key": "sk-test",
                "additional_config": {"support_email": "help@acme.test"}
            }"#,
        )
        .unwrap();
        assert_eq!(payload.region.as_deref(), Some("us-east-1"));
        assert_eq!(payload.database_name.as_deref(), Some("ACME_PRIMARY"));
        assert_eq!(payload.openai_api_key.as_deref(), Some("sk-test"));
        assert!(payload.overrides.unwrap().contains_key("support_email"));
    }
}
