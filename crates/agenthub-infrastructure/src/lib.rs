//! # AgentHub Infrastructure
//!
//! Concrete adapters behind the core ports: PostgreSQL persistence and
//! S3 object-storage provisioning.

pub mod database;
pub mod storage;

pub use database::connection::create_pool;
pub use database::postgres::{PgTenantConfigRepository, PgUserRepository};
pub use storage::S3BucketProvisioner;
