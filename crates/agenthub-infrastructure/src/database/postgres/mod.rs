pub mod tenant_config_repo_impl;
pub mod user_repo_impl;

pub use tenant_config_repo_impl::PgTenantConfigRepository;
pub use user_repo_impl::PgUserRepository;
