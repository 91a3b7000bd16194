//! Tenant configuration store trait (port)

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::TenantConfig;
use crate::error::DomainError;

/// Result of an atomic existence-check-plus-insert. On conflict the
/// pre-existing document is returned unchanged.
#[derive(Debug, Clone)]
pub enum InsertOutcome {
    Inserted,
    Conflict(TenantConfig),
}

#[derive(Debug, Clone)]
pub enum UpdateOutcome {
    Updated(TenantConfig),
    NotFound,
}

/// Keyed document collection holding one record per tenant. Implementations
/// must make `insert_if_absent` atomic at the storage layer so concurrent
/// creations have at most one winner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TenantConfigRepository: Send + Sync {
    async fn insert_if_absent(&self, config: &TenantConfig) -> Result<InsertOutcome, DomainError>;

    /// Merge named dot-addressable fields (e.g. `agent_config.system_prompt`)
    /// and refresh `updated_at`. An absent target is reported, not created.
    async fn update_fields(
        &self,
        tenant_id: &str,
        fields: Vec<(String, Value)>,
    ) -> Result<UpdateOutcome, DomainError>;

    async fn get(&self, tenant_id: &str) -> Result<Option<TenantConfig>, DomainError>;

    async fn list_all(&self) -> Result<Vec<TenantConfig>, DomainError>;
}
