//! Storage namespace provisioner trait (port)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketProvisionStatus {
    Created,
    AlreadyExists,
    Failed,
}

/// Outcome of a provisioning attempt, attached to creation responses so the
/// caller can see (and remediate) storage state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketProvisionOutcome {
    pub status: BucketProvisionStatus,
    pub bucket_name: String,
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BucketProvisionOutcome {
    pub fn created(bucket_name: &str, region: &str) -> Self {
        Self {
            status: BucketProvisionStatus::Created,
            bucket_name: bucket_name.to_string(),
            region: region.to_string(),
            message: None,
        }
    }

    pub fn already_exists(bucket_name: &str, region: &str) -> Self {
        Self {
            status: BucketProvisionStatus::AlreadyExists,
            bucket_name: bucket_name.to_string(),
            region: region.to_string(),
            message: None,
        }
    }

    pub fn failed(bucket_name: &str, region: &str, message: impl Into<String>) -> Self {
        Self {
            status: BucketProvisionStatus::Failed,
            bucket_name: bucket_name.to_string(),
            region: region.to_string(),
            message: Some(message.into()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == BucketProvisionStatus::Failed
    }
}

/// Ensures a uniquely named, publicly readable, versioned storage namespace
/// exists. Idempotent: an existing namespace owned by the provisioning
/// identity counts as success. Failures are reported in the outcome, never
/// raised across this boundary.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BucketProvisioner: Send + Sync {
    async fn ensure_bucket(&self, bucket_name: &str, region: &str) -> BucketProvisionOutcome;
}
