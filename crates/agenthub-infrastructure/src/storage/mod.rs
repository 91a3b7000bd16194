pub mod s3_provisioner;

pub use s3_provisioner::S3BucketProvisioner;
