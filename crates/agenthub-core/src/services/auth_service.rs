//! Identity exchange service
//!
//! Trades a verified third-party identity assertion for a platform-issued
//! access credential. Failure modes are distinguished in the logs only; the
//! caller sees a uniform rejection.

use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use agenthub_security::{IdentityError, IdentityVerifier, JwtError, JwtService};
use agenthub_shared::utils::mask_email;

use crate::domain::PlatformUser;
use crate::error::DomainError;
use crate::repositories::UserRepository;

pub struct AuthService<V: IdentityVerifier, U: UserRepository> {
    verifier: Arc<V>,
    user_repo: Arc<U>,
    jwt: Arc<JwtService>,
}

/// Result of a successful identity exchange
#[derive(Debug, Clone)]
pub struct ExchangeResult {
    pub access_token: String,
    pub expires_in_seconds: i64,
    pub user: UserInfo,
}

/// User info returned in auth responses
#[derive(Debug, Clone)]
pub struct UserInfo {
    pub id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    pub picture: Option<String>,
    pub email_verified: bool,
}

impl From<&PlatformUser> for UserInfo {
    fn from(user: &PlatformUser) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            picture: user.picture.clone(),
            email_verified: user.email_verified,
        }
    }
}

impl<V: IdentityVerifier, U: UserRepository> AuthService<V, U> {
    pub fn new(verifier: Arc<V>, user_repo: Arc<U>, jwt: Arc<JwtService>) -> Self {
        Self {
            verifier,
            user_repo,
            jwt,
        }
    }

    pub async fn exchange(&self, assertion: &str) -> Result<ExchangeResult, DomainError> {
        // 1. Verify the assertion's signature and audience
        let identity = match self.verifier.verify(assertion).await {
            Ok(identity) => identity,
            Err(IdentityError::NotConfigured) => {
                error!("Identity exchange rejected: provider audience not configured");
                return Err(DomainError::NotConfigured(
                    "identity provider audience".to_string(),
                ));
            }
            Err(e) => {
                warn!("Identity assertion rejected: {}", e);
                return Err(DomainError::IdentityVerificationFailed(e.to_string()));
            }
        };

        // 2. Resolve the subject in the user registry; never auto-provision
        let user = self
            .user_repo
            .find_by_google_id(&identity.subject)
            .await?
            .ok_or_else(|| {
                warn!(
                    "No platform user mapped for {}",
                    mask_email(&identity.email)
                );
                DomainError::UserNotFound
            })?;

        // 3. Issue the platform access credential
        let access_token = self
            .jwt
            .issue_access_token(&user.id.to_string(), &user.email, user.display_name.as_deref())
            .map_err(|e| match e {
                JwtError::NotConfigured => {
                    error!("Identity exchange rejected: signing key not configured");
                    DomainError::NotConfigured("access token signing key".to_string())
                }
                other => DomainError::TokenGenerationError(other.to_string()),
            })?;

        info!("Issued access token for {}", mask_email(&user.email));

        Ok(ExchangeResult {
            access_token,
            expires_in_seconds: self.jwt.expires_in_seconds(),
            user: UserInfo::from(&user),
        })
    }
}
