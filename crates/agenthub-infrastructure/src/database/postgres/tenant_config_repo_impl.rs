// ============================================================================
// AgentHub Infrastructure - PostgreSQL Tenant Configuration Repository
// File: crates/agenthub-infrastructure/src/database/postgres/tenant_config_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{error, info};

use agenthub_core::domain::TenantConfig;
use agenthub_core::error::DomainError;
use agenthub_core::repositories::{InsertOutcome, TenantConfigRepository, UpdateOutcome};

/// Stores each tenant's configuration as a single JSONB document keyed by
/// tenant id. The primary key makes `insert_if_absent` atomic: under
/// concurrent creation exactly one insert wins and the loser reads the
/// winner's document back.
pub struct PgTenantConfigRepository {
    pool: PgPool,
}

impl PgTenantConfigRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// `"agent_config.system_prompt"` -> `{agent_config,system_prompt}` for jsonb_set
fn json_path_to_array(path: &str) -> Vec<String> {
    path.split('.').map(str::to_string).collect()
}

#[async_trait]
impl TenantConfigRepository for PgTenantConfigRepository {
    async fn insert_if_absent(&self, config: &TenantConfig) -> Result<InsertOutcome, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO tenant_configs (tenant_id, doc, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (tenant_id) DO NOTHING
            "#,
        )
        .bind(&config.tenant_id)
        .bind(Json(config))
        .bind(config.created_at)
        .bind(config.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error inserting tenant config: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        if result.rows_affected() == 1 {
            info!("Tenant config stored for {}", config.tenant_id);
            return Ok(InsertOutcome::Inserted);
        }

        // Lost the race (or the tenant predates this call): surface the
        // document that actually holds the key.
        let existing = self.get(&config.tenant_id).await?.ok_or_else(|| {
            DomainError::DatabaseError(format!(
                "tenant {} conflicted on insert but has no row",
                config.tenant_id
            ))
        })?;
        Ok(InsertOutcome::Conflict(existing))
    }

    async fn update_fields(
        &self,
        tenant_id: &str,
        fields: Vec<(String, Value)>,
    ) -> Result<UpdateOutcome, DomainError> {
        let now = Utc::now();
        let now_value = serde_json::to_value(now)
            .map_err(|e| DomainError::InternalError(e.to_string()))?;

        // Nest one jsonb_set per field, innermost first, with the
        // updated_at refresh as the outermost layer.
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE tenant_configs SET doc = ");
        for _ in 0..fields.len() + 1 {
            qb.push("jsonb_set(");
        }
        qb.push("doc");
        for (path, value) in &fields {
            qb.push(", ");
            qb.push_bind(json_path_to_array(path));
            qb.push("::text[], ");
            qb.push_bind(Json(value.clone()));
            qb.push(", true)");
        }
        qb.push(", '{updated_at}', ");
        qb.push_bind(Json(now_value));
        qb.push(", true)");
        qb.push(", updated_at = ");
        qb.push_bind(now);
        qb.push(" WHERE tenant_id = ");
        qb.push_bind(tenant_id);
        qb.push(" RETURNING doc");

        let row: Option<Json<TenantConfig>> = qb
            .build_query_scalar()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error updating tenant config fields: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        match row {
            Some(Json(doc)) => Ok(UpdateOutcome::Updated(doc)),
            None => Ok(UpdateOutcome::NotFound),
        }
    }

    async fn get(&self, tenant_id: &str) -> Result<Option<TenantConfig>, DomainError> {
        let row: Option<Json<TenantConfig>> =
            sqlx::query_scalar("SELECT doc FROM tenant_configs WHERE tenant_id = $1")
                .bind(tenant_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e: sqlx::Error| {
                    error!("Database error fetching tenant config: {}", e);
                    DomainError::DatabaseError(e.to_string())
                })?;

        Ok(row.map(|Json(doc)| doc))
    }

    async fn list_all(&self) -> Result<Vec<TenantConfig>, DomainError> {
        let rows: Vec<Json<TenantConfig>> =
            sqlx::query_scalar("SELECT doc FROM tenant_configs ORDER BY tenant_id")
                .fetch_all(&self.pool)
                .await
                .map_err(|e: sqlx::Error| {
                    error!("Database error listing tenant configs: {}", e);
                    DomainError::DatabaseError(e.to_string())
                })?;

        Ok(rows.into_iter().map(|Json(doc)| doc).collect())
    }
}
