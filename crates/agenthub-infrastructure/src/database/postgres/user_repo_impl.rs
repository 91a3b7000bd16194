// ============================================================================
// AgentHub Infrastructure - PostgreSQL User Repository
// File: crates/agenthub-infrastructure/src/database/postgres/user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use agenthub_core::domain::PlatformUser;
use agenthub_core::error::DomainError;
use agenthub_core::repositories::UserRepository;

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct PlatformUserRow {
    pub id: Uuid,
    pub google_id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub picture: Option<String>,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<PlatformUserRow> for PlatformUser {
    fn from(row: PlatformUserRow) -> Self {
        PlatformUser {
            id: row.id,
            google_id: row.google_id,
            email: row.email,
            display_name: row.display_name,
            picture: row.picture,
            email_verified: row.email_verified,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_google_id(
        &self,
        google_id: &str,
    ) -> Result<Option<PlatformUser>, DomainError> {
        let row: Option<PlatformUserRow> = sqlx::query_as(
            r#"
            SELECT
                id, google_id, email, display_name,
                picture, email_verified, created_at
            FROM users
            WHERE google_id = $1
            "#,
        )
        .bind(google_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding user by google_id: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }
}
