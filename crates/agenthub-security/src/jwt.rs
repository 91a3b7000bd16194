//! Platform access-credential handling (signed, short-lived JWTs)

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use agenthub_shared::constants::TOKEN_TYPE_ACCESS;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Signing key not configured")]
    NotConfigured,
    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token validation failed: {0}")]
    ValidationError(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub iat: i64,
    pub exp: i64,
    pub token_type: String,
}

pub struct JwtService {
    secret: Option<String>,
    algorithm: Algorithm,
    expiry_minutes: i64,
}

impl JwtService {
    /// `secret` stays optional: issuing/validating with no configured key is
    /// reported per call as [`JwtError::NotConfigured`] rather than refusing
    /// to start.
    pub fn new(
        secret: Option<String>,
        algorithm: &str,
        expiry_minutes: i64,
    ) -> Result<Self, JwtError> {
        let algorithm: Algorithm = algorithm
            .parse()
            .map_err(|_| JwtError::UnsupportedAlgorithm(algorithm.to_string()))?;
        // The signing key is a shared secret, so only the HMAC family applies.
        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(JwtError::UnsupportedAlgorithm(format!("{:?}", algorithm)));
        }
        Ok(Self {
            secret,
            algorithm,
            expiry_minutes,
        })
    }

    fn secret(&self) -> Result<&str, JwtError> {
        self.secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(JwtError::NotConfigured)
    }

    pub fn expires_in_seconds(&self) -> i64 {
        self.expiry_minutes * 60
    }

    pub fn issue_access_token(
        &self,
        subject: &str,
        email: &str,
        name: Option<&str>,
    ) -> Result<String, JwtError> {
        let secret = self.secret()?;
        let now = Utc::now();
        let claims = AccessClaims {
            sub: subject.to_string(),
            email: email.to_string(),
            name: name.map(str::to_string),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(self.expiry_minutes)).timestamp(),
            token_type: TOKEN_TYPE_ACCESS.to_string(),
        };
        encode(
            &Header::new(self.algorithm),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| JwtError::CreationError(e.to_string()))
    }

    pub fn validate_token(&self, token: &str) -> Result<AccessClaims, JwtError> {
        let secret = self.secret()?;
        decode::<AccessClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(self.algorithm),
        )
        .map(|data| data.claims)
        .map_err(|e| JwtError::ValidationError(e.to_string()))
    }
}
