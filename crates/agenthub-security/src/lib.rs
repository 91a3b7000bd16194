//! # AgentHub Security
//!
//! Access-credential issuing/validation and identity-assertion verification.

pub mod google;
pub mod jwt;

pub use google::{GoogleTokenValidator, IdentityError, IdentityVerifier, VerifiedIdentity};
pub use jwt::{AccessClaims, JwtError, JwtService};
