//! Ownership authorization gate
//!
//! Consulted before every mutating tenant operation. Creation is exempt (it
//! stamps the caller as owner) and reads are intentionally unauthenticated.

use std::sync::Arc;

use tracing::warn;

use agenthub_shared::utils::normalize_tenant_id;

use crate::domain::TenantConfig;
use crate::error::DomainError;
use crate::repositories::TenantConfigRepository;

pub struct OwnershipGate<R: TenantConfigRepository> {
    tenant_repo: Arc<R>,
}

impl<R: TenantConfigRepository> OwnershipGate<R> {
    pub fn new(tenant_repo: Arc<R>) -> Self {
        Self { tenant_repo }
    }

    /// Allow the mutation only if the caller is the recorded owner. Returns
    /// the tenant's configuration on success.
    pub async fn authorize_mutation(
        &self,
        caller_user_id: &str,
        tenant_id: &str,
    ) -> Result<TenantConfig, DomainError> {
        let tenant_id = normalize_tenant_id(tenant_id);
        let config = self
            .tenant_repo
            .get(&tenant_id)
            .await?
            .ok_or(DomainError::TenantNotFound)?;
        if config.owner_id != caller_user_id {
            warn!(
                "User {} denied mutation on tenant {} owned by another user",
                caller_user_id, tenant_id
            );
            return Err(DomainError::Forbidden);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TenantDefaults;
    use crate::repositories::tenant_config_repository::MockTenantConfigRepository;

    fn owned_by(owner_id: &str) -> TenantConfig {
        TenantConfig::new(
            "acme".to_string(),
            "Acme Corp".to_string(),
            owner_id.to_string(),
            None,
            None,
            None,
            &TenantDefaults {
                storage_region: "ap-south-1".to_string(),
                model: "test-model".to_string(),
                temperature: 0.1,
                preprocessor_url: "http://localhost:8080".to_string(),
                postprocessor_url: "http://localhost:8003".to_string(),
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn owner_is_allowed() {
        let config = owned_by("user-1");
        let mut repo = MockTenantConfigRepository::new();
        repo.expect_get()
            .withf(|id| id == "acme")
            .returning(move |_| Ok(Some(config.clone())));

        let gate = OwnershipGate::new(Arc::new(repo));
        let config = gate.authorize_mutation("user-1", "Acme").await.unwrap();
        assert_eq!(config.owner_id, "user-1");
    }

    #[tokio::test]
    async fn non_owner_is_forbidden() {
        let config = owned_by("user-1");
        let mut repo = MockTenantConfigRepository::new();
        repo.expect_get().returning(move |_| Ok(Some(config.clone())));

        let gate = OwnershipGate::new(Arc::new(repo));
        assert!(matches!(
            gate.authorize_mutation("user-2", "acme").await,
            Err(DomainError::Forbidden)
        ));
    }

    #[tokio::test]
    async fn absent_tenant_is_not_found() {
        let mut repo = MockTenantConfigRepository::new();
        repo.expect_get().returning(|_| Ok(None));

        let gate = OwnershipGate::new(Arc::new(repo));
        assert!(matches!(
            gate.authorize_mutation("user-1", "ghost").await,
            Err(DomainError::TenantNotFound)
        ));
    }
}
