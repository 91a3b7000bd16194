// ============================================================================
// AgentHub Infrastructure - S3 Bucket Provisioner
// File: crates/agenthub-infrastructure/src/storage/s3_provisioner.rs
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::types::{
    BucketLocationConstraint, BucketVersioningStatus, CreateBucketConfiguration,
    PublicAccessBlockConfiguration, VersioningConfiguration,
};
use aws_sdk_s3::Client;
use serde_json::json;
use tracing::{error, info, warn};

use agenthub_core::repositories::{BucketProvisionOutcome, BucketProvisioner};
use agenthub_shared::config::StorageSettings;

// The provider's default region rejects an explicit location constraint.
const NO_CONSTRAINT_REGION: &str = "us-east-1";

/// Creates the tenant's object-storage namespace: a uniquely named bucket
/// with a public-read object policy and versioning enabled. Every failure is
/// reported through the outcome so tenant creation can proceed without it.
pub struct S3BucketProvisioner {
    client: Option<Client>,
}

fn location_constraint_for(region: &str) -> Option<BucketLocationConstraint> {
    if region == NO_CONSTRAINT_REGION {
        None
    } else {
        Some(BucketLocationConstraint::from(region))
    }
}

fn public_read_policy(bucket_name: &str) -> String {
    json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Sid": "PublicReadGetObject",
            "Effect": "Allow",
            "Principal": "*",
            "Action": "s3:GetObject",
            "Resource": format!("arn:aws:s3:::{}/*", bucket_name)
        }]
    })
    .to_string()
}

impl S3BucketProvisioner {
    /// Build the provisioner from storage settings. Missing credentials are
    /// tolerated: the adapter stays up and reports every provisioning
    /// attempt as failed.
    pub async fn connect(settings: &StorageSettings) -> Self {
        let (Some(key), Some(secret)) = (
            settings.access_key_id.clone(),
            settings.secret_access_key.clone(),
        ) else {
            warn!("Storage credentials not configured; bucket provisioning disabled");
            return Self { client: None };
        };

        let timeouts = TimeoutConfig::builder()
            .connect_timeout(Duration::from_secs(5))
            .operation_timeout(Duration::from_secs(10))
            .build();
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()))
            .credentials_provider(Credentials::new(key, secret, None, None, "agenthub-config"))
            .timeout_config(timeouts)
            .load()
            .await;

        Self {
            client: Some(Client::new(&sdk_config)),
        }
    }

    async fn bucket_exists(client: &Client, bucket_name: &str) -> Result<bool, String> {
        match client.head_bucket().bucket(bucket_name).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                if err
                    .as_service_error()
                    .map(|e| e.is_not_found())
                    .unwrap_or(false)
                {
                    Ok(false)
                } else {
                    Err(err.to_string())
                }
            }
        }
    }

    // Post-creation setup. Each step is best-effort: a failure is logged and
    // the namespace still counts as usable.
    async fn configure_bucket(client: &Client, bucket_name: &str) {
        let access_block = PublicAccessBlockConfiguration::builder()
            .block_public_acls(false)
            .ignore_public_acls(false)
            .block_public_policy(false)
            .restrict_public_buckets(false)
            .build();
        if let Err(e) = client
            .put_public_access_block()
            .bucket(bucket_name)
            .public_access_block_configuration(access_block)
            .send()
            .await
        {
            warn!("Could not relax public access block on {}: {}", bucket_name, e);
        }

        if let Err(e) = client
            .put_bucket_policy()
            .bucket(bucket_name)
            .policy(public_read_policy(bucket_name))
            .send()
            .await
        {
            warn!("Could not apply public read policy on {}: {}", bucket_name, e);
        }

        let versioning = VersioningConfiguration::builder()
            .status(BucketVersioningStatus::Enabled)
            .build();
        if let Err(e) = client
            .put_bucket_versioning()
            .bucket(bucket_name)
            .versioning_configuration(versioning)
            .send()
            .await
        {
            warn!("Could not enable versioning on {}: {}", bucket_name, e);
        }
    }
}

#[async_trait]
impl BucketProvisioner for S3BucketProvisioner {
    async fn ensure_bucket(&self, bucket_name: &str, region: &str) -> BucketProvisionOutcome {
        let Some(client) = &self.client else {
            return BucketProvisionOutcome::failed(
                bucket_name,
                region,
                "storage credentials not configured",
            );
        };

        match Self::bucket_exists(client, bucket_name).await {
            Ok(true) => {
                info!("Bucket {} already exists", bucket_name);
                return BucketProvisionOutcome::already_exists(bucket_name, region);
            }
            Ok(false) => {}
            Err(message) => {
                error!("Error checking bucket {}: {}", bucket_name, message);
                return BucketProvisionOutcome::failed(bucket_name, region, message);
            }
        }

        let mut create = client.create_bucket().bucket(bucket_name);
        if let Some(constraint) = location_constraint_for(region) {
            create = create.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(constraint)
                    .build(),
            );
        }
        if let Err(err) = create.send().await {
            let service_err = err.into_service_error();
            if service_err.is_bucket_already_owned_by_you() {
                info!("Bucket {} already owned by this account", bucket_name);
                return BucketProvisionOutcome::already_exists(bucket_name, region);
            }
            error!("Error creating bucket {}: {}", bucket_name, service_err);
            return BucketProvisionOutcome::failed(bucket_name, region, service_err.to_string());
        }

        Self::configure_bucket(client, bucket_name).await;
        info!("Created bucket {} in region {}", bucket_name, region);
        BucketProvisionOutcome::created(bucket_name, region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_region_takes_no_location_constraint() {
        assert!(location_constraint_for("us-east-1").is_none());
        assert_eq!(
            location_constraint_for("ap-south-1").unwrap().as_str(),
            "ap-south-1"
        );
    }

    #[test]
    fn read_policy_targets_objects_in_the_bucket() {
        let policy: serde_json::Value =
            serde_json::from_str(&public_read_policy("acme-123")).unwrap();
        let statement = &policy["Statement"][0];
        assert_eq!(statement["Effect"], "Allow");
        assert_eq!(statement["Action"], "s3:GetObject");
        assert_eq!(statement["Resource"], "arn:aws:s3:::acme-123/*");
    }

    #[tokio::test]
    async fn missing_credentials_report_failure_instead_of_panicking() {
        let provisioner = S3BucketProvisioner::connect(&StorageSettings {
            region: "ap-south-1".to_string(),
            access_key_id: None,
            secret_access_key: None,
        })
        .await;

        let outcome = provisioner.ensure_bucket("acme-123", "ap-south-1").await;
        assert!(outcome.is_failed());
        assert_eq!(outcome.bucket_name, "acme-123");
    }
}
