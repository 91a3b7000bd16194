//! Domain entities

pub mod tenant_config;
pub mod user;

pub use tenant_config::{
    AgentConfig, DatabaseBinding, ModelConfig, ServiceEndpoint, StorageBinding, TenantConfig,
    TenantDefaults,
};
pub use user::PlatformUser;
