//! Configuration management

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub storage: StorageSettings,
    pub agent: AgentSettings,
    pub services: ServiceSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

/// Identity-provider and access-token settings. The secrets are optional on
/// purpose: a missing secret degrades the dependent operation to a reported
/// configuration error instead of failing startup.
#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    pub google_client_id: Option<String>,
    pub jwt_secret: Option<String>,
    pub jwt_algorithm: String,
    pub jwt_expiry_minutes: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AgentSettings {
    pub model: String,
    pub temperature: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceSettings {
    pub preprocessor_url: String,
    pub postprocessor_url: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8004)?
            .set_default("app.name", "agenthub-server")?
            .set_default("database.url", "postgres://localhost/agenthub")?
            .set_default("database.max_connections", 10)?
            .set_default("auth.jwt_algorithm", crate::constants::DEFAULT_JWT_ALGORITHM)?
            .set_default(
                "auth.jwt_expiry_minutes",
                crate::constants::DEFAULT_JWT_EXPIRY_MINUTES,
            )?
            .set_default("storage.region", crate::constants::DEFAULT_STORAGE_REGION)?
            .set_default("agent.model", crate::constants::DEFAULT_AGENT_MODEL)?
            .set_default("agent.temperature", crate::constants::DEFAULT_AGENT_TEMPERATURE)?
            .set_default("services.preprocessor_url", crate::constants::DEFAULT_PREPROCESSOR_URL)?
            .set_default("services.postprocessor_url", crate::constants::DEFAULT_POSTPROCESSOR_URL)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_uses_platform_defaults() {
        let config = AppConfig::load().expect("defaults should satisfy the schema");
        assert_eq!(config.storage.region, "ap-south-1");
        assert_eq!(config.auth.jwt_algorithm, "HS256");
        assert_eq!(config.auth.jwt_expiry_minutes, 1440);
    }
}
