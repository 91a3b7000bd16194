//! # AgentHub Core
//!
//! Domain entities, services, and port traits for tenant provisioning and
//! authorization.

pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

pub use domain::*;
pub use error::DomainError;
