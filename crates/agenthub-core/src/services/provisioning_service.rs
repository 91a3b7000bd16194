//! Tenant provisioning service
//!
//! Orchestrates storage namespace provisioning and configuration document
//! construction. Owns the uniqueness and merge-precedence rules.

use std::sync::Arc;

use serde_json::{json, Map, Value};
use tracing::{info, warn};

use agenthub_shared::utils::normalize_tenant_id;

use crate::domain::{TenantConfig, TenantDefaults};
use crate::error::DomainError;
use crate::repositories::{
    BucketProvisionOutcome, BucketProvisioner, InsertOutcome, TenantConfigRepository,
    UpdateOutcome,
};

const SYSTEM_PROMPT_PATH: &str = "agent_config.system_prompt";

#[derive(Debug, Clone, Default)]
pub struct CreateTenantRequest {
    pub tenant_id: String,
    pub display_name: String,
    pub system_prompt: Option<String>,
    pub region: Option<String>,
    /// Caller-chosen database namespace; defaults to the upper-cased id.
    pub database_name: Option<String>,
    /// Stored under the `openai` key of the document.
    pub openai_api_key: Option<String>,
    pub tools: Option<Vec<Value>>,
    pub overrides: Option<Map<String, Value>>,
}

#[derive(Debug, Clone)]
pub enum CreateTenantOutcome {
    Created {
        config: TenantConfig,
        storage: BucketProvisionOutcome,
    },
    Exists(TenantConfig),
}

pub struct ProvisioningService<R: TenantConfigRepository, B: BucketProvisioner> {
    tenant_repo: Arc<R>,
    provisioner: Arc<B>,
    defaults: TenantDefaults,
}

impl<R: TenantConfigRepository, B: BucketProvisioner> ProvisioningService<R, B> {
    pub fn new(tenant_repo: Arc<R>, provisioner: Arc<B>, defaults: TenantDefaults) -> Self {
        Self {
            tenant_repo,
            provisioner,
            defaults,
        }
    }

    /// Create a tenant. Idempotent: re-creating an existing tenant id is a
    /// normal `Exists` outcome, not an error.
    pub async fn create_tenant(
        &self,
        request: CreateTenantRequest,
        owner_id: &str,
    ) -> Result<CreateTenantOutcome, DomainError> {
        // 1. Required fields
        if request.tenant_id.trim().is_empty()
            || request.display_name.trim().is_empty()
            || owner_id.trim().is_empty()
        {
            return Err(DomainError::ValidationError(
                "tenant_id, display_name, and owner_id are required".to_string(),
            ));
        }

        // 2. Normalize
        let tenant_id = normalize_tenant_id(&request.tenant_id);
        info!("Creating tenant: {}", tenant_id);

        // 3. Existing record wins, with no further side effects
        if let Some(existing) = self.tenant_repo.get(&tenant_id).await? {
            info!("Tenant {} already exists", tenant_id);
            return Ok(CreateTenantOutcome::Exists(existing));
        }

        // 4. Defaults and generated bindings
        let mut config = TenantConfig::new(
            tenant_id.clone(),
            request.display_name.trim().to_string(),
            owner_id.to_string(),
            request.system_prompt,
            request.region,
            request.tools,
            &self.defaults,
        )?;
        if let Some(name) = request
            .database_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
        {
            config.database_binding.name = name.to_string();
        }
        if let Some(api_key) = request.openai_api_key {
            config
                .extra
                .insert("openai".to_string(), json!({ "api_key": api_key }));
        }

        // 5. Storage provisioning is best-effort: config persistence stays
        // authoritative, a failed bucket is remediated out-of-band.
        let storage = self
            .provisioner
            .ensure_bucket(
                &config.storage_binding.bucket_name,
                &config.storage_binding.region,
            )
            .await;
        if storage.is_failed() {
            warn!(
                "Bucket provisioning failed for tenant {}: {}",
                tenant_id,
                storage.message.as_deref().unwrap_or("unknown")
            );
        }

        // 6. Shallow-merge overrides; identity fields stay protected
        let config = match request.overrides {
            Some(overrides) => config.merge_overrides(overrides)?,
            None => config,
        };

        // 7. Atomic insert; a lost race surfaces as the existing document
        match self.tenant_repo.insert_if_absent(&config).await? {
            InsertOutcome::Inserted => {
                info!("Created tenant configuration for {}", tenant_id);
                Ok(CreateTenantOutcome::Created { config, storage })
            }
            InsertOutcome::Conflict(existing) => {
                info!(
                    "Lost creation race for {}, returning existing configuration",
                    tenant_id
                );
                Ok(CreateTenantOutcome::Exists(existing))
            }
        }
    }

    pub async fn update_system_prompt(
        &self,
        tenant_id: &str,
        system_prompt: &str,
    ) -> Result<UpdateOutcome, DomainError> {
        let tenant_id = normalize_tenant_id(tenant_id);
        self.tenant_repo
            .update_fields(
                &tenant_id,
                vec![(
                    SYSTEM_PROMPT_PATH.to_string(),
                    Value::String(system_prompt.to_string()),
                )],
            )
            .await
    }

    pub async fn get_tenant(&self, tenant_id: &str) -> Result<Option<TenantConfig>, DomainError> {
        self.tenant_repo.get(&normalize_tenant_id(tenant_id)).await
    }

    pub async fn list_tenants(&self) -> Result<Vec<TenantConfig>, DomainError> {
        self.tenant_repo.list_all().await
    }
}
