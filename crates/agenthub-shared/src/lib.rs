//! # AgentHub Shared
//!
//! Shared configuration, constants, telemetry, and utilities for the
//! tenant provisioning service.

pub mod config;
pub mod constants;
pub mod error;
pub mod telemetry;
pub mod utils;

pub use error::AppError;
