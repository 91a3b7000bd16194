use std::sync::Arc;

use agenthub_core::services::{AuthService, OwnershipGate, ProvisioningService};
use agenthub_infrastructure::{PgTenantConfigRepository, PgUserRepository, S3BucketProvisioner};
use agenthub_security::{GoogleTokenValidator, JwtService};
use agenthub_shared::config::AppConfig;

pub type TenantService = ProvisioningService<PgTenantConfigRepository, S3BucketProvisioner>;
pub type ExchangeService = AuthService<GoogleTokenValidator, PgUserRepository>;
pub type TenantGate = OwnershipGate<PgTenantConfigRepository>;

#[derive(Clone)]
pub struct AppState {
    pub tenants: Arc<TenantService>,
    pub auth: Arc<ExchangeService>,
    pub gate: Arc<TenantGate>,
    pub jwt: Arc<JwtService>,
    pub config: AppConfig,
}
