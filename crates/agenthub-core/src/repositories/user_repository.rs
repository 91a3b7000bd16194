//! User registry trait (port)

use async_trait::async_trait;

use crate::domain::PlatformUser;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Look up a platform user by the identity provider's stable subject id.
    async fn find_by_google_id(&self, google_id: &str)
        -> Result<Option<PlatformUser>, DomainError>;
}
