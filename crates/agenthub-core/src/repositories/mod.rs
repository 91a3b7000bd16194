//! Port traits for external collaborators

pub mod bucket_provisioner;
pub mod tenant_config_repository;
pub mod user_repository;

pub use bucket_provisioner::{BucketProvisionOutcome, BucketProvisionStatus, BucketProvisioner};
pub use tenant_config_repository::{InsertOutcome, TenantConfigRepository, UpdateOutcome};
pub use user_repository::UserRepository;
