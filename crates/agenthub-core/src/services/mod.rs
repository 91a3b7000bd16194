//! Domain services (business logic)

pub mod auth_service;
pub mod authz_service;
pub mod provisioning_service;

pub use auth_service::{AuthService, ExchangeResult, UserInfo};
pub use authz_service::OwnershipGate;
pub use provisioning_service::{CreateTenantOutcome, CreateTenantRequest, ProvisioningService};

#[cfg(test)]
mod scenario_tests {
    //! Full provisioning/authorization flow against an in-memory store.

    use std::collections::hash_map::Entry;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;
    use serde_json::Value;

    use crate::domain::{TenantConfig, TenantDefaults};
    use crate::error::DomainError;
    use crate::repositories::{
        BucketProvisionOutcome, BucketProvisioner, InsertOutcome, TenantConfigRepository,
        UpdateOutcome,
    };
    use crate::services::{CreateTenantOutcome, CreateTenantRequest, OwnershipGate, ProvisioningService};

    #[derive(Default)]
    struct InMemoryRepo {
        docs: Mutex<HashMap<String, TenantConfig>>,
    }

    #[async_trait]
    impl TenantConfigRepository for InMemoryRepo {
        async fn insert_if_absent(
            &self,
            config: &TenantConfig,
        ) -> Result<InsertOutcome, DomainError> {
            let mut docs = self.docs.lock().unwrap();
            match docs.entry(config.tenant_id.clone()) {
                Entry::Occupied(entry) => Ok(InsertOutcome::Conflict(entry.get().clone())),
                Entry::Vacant(slot) => {
                    slot.insert(config.clone());
                    Ok(InsertOutcome::Inserted)
                }
            }
        }

        async fn update_fields(
            &self,
            tenant_id: &str,
            fields: Vec<(String, Value)>,
        ) -> Result<UpdateOutcome, DomainError> {
            let mut docs = self.docs.lock().unwrap();
            match docs.get_mut(tenant_id) {
                None => Ok(UpdateOutcome::NotFound),
                Some(doc) => {
                    for (path, value) in fields {
                        if path == "agent_config.system_prompt" {
                            if let Value::String(prompt) = value {
                                doc.agent_config.system_prompt = prompt;
                            }
                        }
                    }
                    doc.updated_at = Utc::now();
                    Ok(UpdateOutcome::Updated(doc.clone()))
                }
            }
        }

        async fn get(&self, tenant_id: &str) -> Result<Option<TenantConfig>, DomainError> {
            Ok(self.docs.lock().unwrap().get(tenant_id).cloned())
        }

        async fn list_all(&self) -> Result<Vec<TenantConfig>, DomainError> {
            Ok(self.docs.lock().unwrap().values().cloned().collect())
        }
    }

    struct AlwaysCreates;

    #[async_trait]
    impl BucketProvisioner for AlwaysCreates {
        async fn ensure_bucket(&self, bucket_name: &str, region: &str) -> BucketProvisionOutcome {
            BucketProvisionOutcome::created(bucket_name, region)
        }
    }

    fn defaults() -> TenantDefaults {
        TenantDefaults {
            storage_region: "ap-south-1".to_string(),
            model: "test-model".to_string(),
            temperature: 0.1,
            preprocessor_url: "http://localhost:8080".to_string(),
            postprocessor_url: "http://localhost:8003".to_string(),
        }
    }

    #[tokio::test]
    async fn create_update_and_ownership_denial() {
        let repo = Arc::new(InMemoryRepo::default());
        let service =
            ProvisioningService::new(repo.clone(), Arc::new(AlwaysCreates), defaults());
        let gate = OwnershipGate::new(repo.clone());

        // Create "acme" owned by user-1, no system prompt.
        let outcome = service
            .create_tenant(
                CreateTenantRequest {
                    tenant_id: "acme".to_string(),
                    display_name: "Acme".to_string(),
                    ..Default::default()
                },
                "user-1",
            )
            .await
            .unwrap();
        let created = match outcome {
            CreateTenantOutcome::Created { config, .. } => config,
            other => panic!("expected Created, got {:?}", other),
        };
        assert_eq!(created.agent_config.system_prompt, "");

        // Owner updates the system prompt.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        gate.authorize_mutation("user-1", "acme").await.unwrap();
        let outcome = service
            .update_system_prompt("acme", "Be concise.")
            .await
            .unwrap();
        let updated = match outcome {
            UpdateOutcome::Updated(config) => config,
            UpdateOutcome::NotFound => panic!("tenant should exist"),
        };
        assert_eq!(updated.agent_config.system_prompt, "Be concise.");
        assert!(updated.updated_at > created.updated_at);

        // A different user is denied and the stored value is unchanged.
        let denied = gate.authorize_mutation("user-2", "acme").await;
        assert!(matches!(denied, Err(DomainError::Forbidden)));
        let stored = service.get_tenant("acme").await.unwrap().unwrap();
        assert_eq!(stored.agent_config.system_prompt, "Be concise.");

        // Re-creating the tenant leaves the identity fields untouched.
        let outcome = service
            .create_tenant(
                CreateTenantRequest {
                    tenant_id: "Acme".to_string(),
                    display_name: "Someone Else".to_string(),
                    ..Default::default()
                },
                "user-2",
            )
            .await
            .unwrap();
        match outcome {
            CreateTenantOutcome::Exists(config) => {
                assert_eq!(config.owner_id, "user-1");
                assert_eq!(config.tenant_id, "acme");
            }
            other => panic!("expected Exists, got {:?}", other),
        }
        assert_eq!(service.list_tenants().await.unwrap().len(), 1);
    }
}
