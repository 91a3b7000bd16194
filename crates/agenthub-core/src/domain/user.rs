//! Platform user entity (Google-federated user registry)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered platform user. The registry is populated out-of-band; the
/// identity exchange never auto-provisions entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformUser {
    pub id: Uuid,
    /// Stable subject identifier from the identity provider.
    pub google_id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub picture: Option<String>,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}
