use axum::{
    routing::{get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use agenthub_api::{
    handlers::{auth, health, tenants},
    state::AppState,
};
use agenthub_core::domain::TenantDefaults;
use agenthub_core::services::{AuthService, OwnershipGate, ProvisioningService};
use agenthub_infrastructure::database::connection;
use agenthub_infrastructure::{PgTenantConfigRepository, PgUserRepository, S3BucketProvisioner};
use agenthub_security::{GoogleTokenValidator, JwtService};
use agenthub_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    agenthub_shared::telemetry::init_telemetry();

    info!("AgentHub server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Connect to Database
    info!("Connecting to database...");
    let pool =
        connection::create_pool(&config.database.url, config.database.max_connections).await?;
    sqlx::migrate!("../../migrations").run(&pool).await?;
    info!("Database connection established.");

    // Adapters
    let tenant_repo = Arc::new(PgTenantConfigRepository::new(pool.clone()));
    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let provisioner = Arc::new(S3BucketProvisioner::connect(&config.storage).await);
    let verifier = Arc::new(GoogleTokenValidator::new(
        config.auth.google_client_id.clone(),
    )?);
    let jwt = Arc::new(JwtService::new(
        config.auth.jwt_secret.clone(),
        &config.auth.jwt_algorithm,
        config.auth.jwt_expiry_minutes,
    )?);

    // Services
    let defaults = TenantDefaults {
        storage_region: config.storage.region.clone(),
        model: config.agent.model.clone(),
        temperature: config.agent.temperature,
        preprocessor_url: config.services.preprocessor_url.clone(),
        postprocessor_url: config.services.postprocessor_url.clone(),
    };
    let tenants = Arc::new(ProvisioningService::new(
        tenant_repo.clone(),
        provisioner,
        defaults,
    ));
    let auth_service = Arc::new(AuthService::new(verifier, user_repo, jwt.clone()));
    let gate = Arc::new(OwnershipGate::new(tenant_repo));

    // Create App State
    let state = AppState {
        tenants,
        auth: auth_service,
        gate,
        jwt,
        config: config.clone(),
    };

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Identity exchange
        .route("/auth/exchange", post(auth::exchange))
        // Tenant provisioning
        .route(
            "/clients",
            post(tenants::create_client).get(tenants::list_clients),
        )
        .route("/clients/{id}", get(tenants::get_client))
        .route(
            "/clients/{id}/system-prompt",
            put(tenants::update_system_prompt).post(tenants::update_system_prompt),
        )
        // Add State
        .with_state(state)
        // Add CORS + request tracing
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
