//! Tenant configuration document

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;
use uuid::Uuid;
use validator::Validate;

use crate::error::DomainError;

/// Top-level fields that caller-supplied overrides may never touch: the
/// record identity and the system-generated bindings.
pub const PROTECTED_FIELDS: &[&str] = &[
    "tenant_id",
    "owner_id",
    "database_binding",
    "storage_binding",
];

/// Reference to the tenant's private database namespace in the downstream
/// store. Existence is not validated here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseBinding {
    pub name: String,
}

/// The tenant's isolated object-storage namespace. Always system-generated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageBinding {
    pub bucket_name: String,
    pub region: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub model: String,
    pub temperature: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    pub system_prompt: String,
    pub model_config: ModelConfig,
    #[serde(default)]
    pub tools: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceEndpoint {
    pub url: String,
}

/// Platform defaults baked into every new tenant document. Built once from
/// configuration at startup and passed into the provisioning service.
#[derive(Debug, Clone)]
pub struct TenantDefaults {
    pub storage_region: String,
    pub model: String,
    pub temperature: f64,
    pub preprocessor_url: String,
    pub postprocessor_url: String,
}

/// One configuration document per tenant, keyed by the normalized tenant id.
/// Persisted as a single JSON document; `extra` carries the shallow-merged
/// caller overrides.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TenantConfig {
    #[validate(length(min = 1))]
    pub tenant_id: String,

    #[validate(length(min = 1, max = 200))]
    pub display_name: String,

    #[validate(length(min = 1))]
    pub owner_id: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub database_binding: DatabaseBinding,
    pub storage_binding: StorageBinding,
    pub agent_config: AgentConfig,

    pub preprocessor: ServiceEndpoint,
    pub postprocessor: ServiceEndpoint,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TenantConfig {
    /// Bucket names carry a fresh random suffix on every call so retries
    /// never collide, even across failed attempts.
    pub fn generate_bucket_name(tenant_id: &str) -> String {
        format!("{}-{}", tenant_id, Uuid::new_v4())
    }

    /// Assemble a new document for an already-normalized `tenant_id`.
    pub fn new(
        tenant_id: String,
        display_name: String,
        owner_id: String,
        system_prompt: Option<String>,
        region: Option<String>,
        tools: Option<Vec<Value>>,
        defaults: &TenantDefaults,
    ) -> Result<Self, DomainError> {
        let now = Utc::now();
        let region = region
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| defaults.storage_region.clone());
        let config = Self {
            database_binding: DatabaseBinding {
                name: tenant_id.to_uppercase(),
            },
            storage_binding: StorageBinding {
                bucket_name: Self::generate_bucket_name(&tenant_id),
                region,
            },
            tenant_id,
            display_name,
            owner_id,
            created_at: now,
            updated_at: now,
            agent_config: AgentConfig {
                system_prompt: system_prompt.unwrap_or_default(),
                model_config: ModelConfig {
                    model: defaults.model.clone(),
                    temperature: defaults.temperature,
                },
                tools: tools.unwrap_or_default(),
            },
            preprocessor: ServiceEndpoint {
                url: defaults.preprocessor_url.clone(),
            },
            postprocessor: ServiceEndpoint {
                url: defaults.postprocessor_url.clone(),
            },
            extra: Map::new(),
        };
        config.validate().map_err(|_| {
            DomainError::ValidationError(
                "tenant_id, display_name, and owner_id are required".to_string(),
            )
        })?;
        Ok(config)
    }

    /// Shallow-merge caller overrides into the top-level document. Caller
    /// keys win over system defaults; identity fields and generated bindings
    /// are skipped.
    pub fn merge_overrides(self, overrides: Map<String, Value>) -> Result<Self, DomainError> {
        if overrides.is_empty() {
            return Ok(self);
        }
        let mut doc = match serde_json::to_value(&self) {
            Ok(Value::Object(map)) => map,
            _ => {
                return Err(DomainError::InternalError(
                    "tenant config did not serialize to an object".to_string(),
                ))
            }
        };
        for (key, value) in overrides {
            if PROTECTED_FIELDS.contains(&key.as_str()) {
                warn!("Ignoring override for protected field: {}", key);
                continue;
            }
            doc.insert(key, value);
        }
        serde_json::from_value(Value::Object(doc))
            .map_err(|e| DomainError::ValidationError(format!("invalid override value: {}", e)))
    }
}
