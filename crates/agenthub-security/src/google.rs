//! Google ID-token verification (third-party identity assertions)

use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

use agenthub_shared::utils::mask_email;

const GOOGLE_CERTS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";
const GOOGLE_ISSUERS: [&str; 2] = ["https://accounts.google.com", "accounts.google.com"];
const JWKS_CACHE_TTL: Duration = Duration::from_secs(3600);
const HTTP_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Identity provider audience not configured")]
    NotConfigured,
    #[error("Invalid identity assertion: {0}")]
    InvalidAssertion(String),
    #[error("Unknown signing key: {0}")]
    UnknownKey(String),
    #[error("Failed to fetch signing keys: {0}")]
    KeyFetch(String),
    #[error("HTTP client error: {0}")]
    Http(String),
}

/// Profile extracted from a verified identity assertion.
#[derive(Debug, Clone)]
pub struct VerifiedIdentity {
    pub subject: String,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
    pub email_verified: bool,
}

/// Port for validating third-party identity assertions. Defined here rather
/// than in the core crate so the core -> security dependency stays one-way.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, assertion: &str) -> Result<VerifiedIdentity, IdentityError>;
}

#[derive(Debug, Deserialize)]
struct GoogleClaims {
    sub: String,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
    #[serde(default)]
    email_verified: bool,
}

struct CachedKeys {
    keys: JwkSet,
    fetched_at: Instant,
}

/// Validates Google ID tokens against the configured OAuth client id
/// (audience) using Google's published JWKS, cached for an hour.
pub struct GoogleTokenValidator {
    audience: Option<String>,
    certs_url: String,
    http: reqwest::Client,
    cache: RwLock<Option<CachedKeys>>,
}

impl GoogleTokenValidator {
    pub fn new(audience: Option<String>) -> Result<Self, IdentityError> {
        Self::with_certs_url(audience, GOOGLE_CERTS_URL.to_string())
    }

    /// Tests point this at a local JWKS endpoint.
    pub fn with_certs_url(
        audience: Option<String>,
        certs_url: String,
    ) -> Result<Self, IdentityError> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| IdentityError::Http(e.to_string()))?;
        Ok(Self {
            audience: audience.filter(|a| !a.is_empty()),
            certs_url,
            http,
            cache: RwLock::new(None),
        })
    }

    async fn keys(&self, force_refresh: bool) -> Result<JwkSet, IdentityError> {
        if !force_refresh {
            let guard = self.cache.read().await;
            if let Some(cached) = guard.as_ref() {
                if cached.fetched_at.elapsed() < JWKS_CACHE_TTL {
                    return Ok(cached.keys.clone());
                }
            }
        }
        let keys: JwkSet = self
            .http
            .get(&self.certs_url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| IdentityError::KeyFetch(e.to_string()))?
            .json()
            .await
            .map_err(|e| IdentityError::KeyFetch(e.to_string()))?;
        let mut guard = self.cache.write().await;
        *guard = Some(CachedKeys {
            keys: keys.clone(),
            fetched_at: Instant::now(),
        });
        Ok(keys)
    }

    async fn decoding_key_for(&self, kid: &str) -> Result<DecodingKey, IdentityError> {
        let keys = self.keys(false).await?;
        let jwk = match keys.find(kid) {
            Some(jwk) => jwk.clone(),
            // Key rotation: refetch once before giving up.
            None => self
                .keys(true)
                .await?
                .find(kid)
                .cloned()
                .ok_or_else(|| IdentityError::UnknownKey(kid.to_string()))?,
        };
        DecodingKey::from_jwk(&jwk).map_err(|e| IdentityError::InvalidAssertion(e.to_string()))
    }
}

#[async_trait]
impl IdentityVerifier for GoogleTokenValidator {
    async fn verify(&self, assertion: &str) -> Result<VerifiedIdentity, IdentityError> {
        // A missing audience configuration is a rejection, never a bypass.
        let audience = self
            .audience
            .as_deref()
            .ok_or(IdentityError::NotConfigured)?;

        let header =
            decode_header(assertion).map_err(|e| IdentityError::InvalidAssertion(e.to_string()))?;
        let kid = header
            .kid
            .ok_or_else(|| IdentityError::InvalidAssertion("missing key id".to_string()))?;
        let key = self.decoding_key_for(&kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[audience]);
        validation.set_issuer(&GOOGLE_ISSUERS);

        let data = decode::<GoogleClaims>(assertion, &key, &validation)
            .map_err(|e| IdentityError::InvalidAssertion(e.to_string()))?;
        let claims = data.claims;
        let email = claims
            .email
            .ok_or_else(|| IdentityError::InvalidAssertion("assertion carries no email".to_string()))?;

        debug!("Verified identity assertion for {}", mask_email(&email));

        Ok(VerifiedIdentity {
            subject: claims.sub,
            email,
            name: claims.name,
            picture: claims.picture,
            email_verified: claims.email_verified,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // RFC 7515 appendix A.2 RSA modulus; any well-formed public key works for
    // exercising JWKS parsing and kid lookup.
    const TEST_MODULUS: &str = "ofgWCuLjybRlzo0tZWJjNiuSfb4p4fAkd_wWJcyQoTbji9k0l8W26mPddxHmfHQp-Vaw-4qPCJrcS2mJPMEzP1Pt0Bm4d4QlL-yRT-SFd2lZS-pCgNMsD1W_YpRPEwOWvG6b32690r2jZ47soMZo9wGzjb_7OMg0LOL-bSf63kpaSHSXndS5z5rexMdbBYUsLA9e-KXBdQOS-UTo7WTBEMa2R2CapHg665xsmtdVMTBQY4uDZlxvb3qCo5ZwKh9kG4LT6_I5IhlJH7aGhyxXFvUK-DWNmoudF8NAco9_h9iaGNj8q2ethFkMLs91kzk2PAcDTW9gb54h4FRWyuXpoQ";

    fn jwks_body() -> serde_json::Value {
        serde_json::json!({
            "keys": [{
                "kty": "RSA",
                "alg": "RS256",
                "use": "sig",
                "kid": "test-key",
                "n": TEST_MODULUS,
                "e": "AQAB"
            }]
        })
    }

    #[tokio::test]
    async fn missing_audience_is_rejected_without_network() {
        let validator =
            GoogleTokenValidator::with_certs_url(None, "http://127.0.0.1:1/certs".into()).unwrap();
        assert!(matches!(
            validator.verify("some.token.here").await,
            Err(IdentityError::NotConfigured)
        ));
    }

    #[tokio::test]
    async fn empty_audience_counts_as_not_configured() {
        let validator = GoogleTokenValidator::with_certs_url(
            Some(String::new()),
            "http://127.0.0.1:1/certs".into(),
        )
        .unwrap();
        assert!(matches!(
            validator.verify("some.token.here").await,
            Err(IdentityError::NotConfigured)
        ));
    }

    #[tokio::test]
    async fn malformed_assertion_is_rejected_before_key_fetch() {
        let validator = GoogleTokenValidator::with_certs_url(
            Some("client-id".into()),
            "http://127.0.0.1:1/certs".into(),
        )
        .unwrap();
        assert!(matches!(
            validator.verify("not a jwt").await,
            Err(IdentityError::InvalidAssertion(_))
        ));
    }

    #[tokio::test]
    async fn jwks_fetch_parses_and_caches_keys() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/certs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(jwks_body()))
            .expect(1)
            .mount(&server)
            .await;

        let validator = GoogleTokenValidator::with_certs_url(
            Some("client-id".into()),
            format!("{}/certs", server.uri()),
        )
        .unwrap();

        let keys = validator.keys(false).await.unwrap();
        assert!(keys.find("test-key").is_some());
        assert!(keys.find("other-key").is_none());

        // Second call is served from the cache; the mock's expect(1) verifies.
        let cached = validator.keys(false).await.unwrap();
        assert!(cached.find("test-key").is_some());
    }

    #[tokio::test]
    async fn unknown_kid_refetches_then_reports_unknown_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/certs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(jwks_body()))
            .expect(2)
            .mount(&server)
            .await;

        let validator = GoogleTokenValidator::with_certs_url(
            Some("client-id".into()),
            format!("{}/certs", server.uri()),
        )
        .unwrap();

        assert!(matches!(
            validator.decoding_key_for("rotated-away").await,
            Err(IdentityError::UnknownKey(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_jwks_endpoint_degrades_to_key_fetch_error() {
        let validator = GoogleTokenValidator::with_certs_url(
            Some("client-id".into()),
            "http://127.0.0.1:1/certs".into(),
        )
        .unwrap();
        assert!(matches!(
            validator.keys(false).await,
            Err(IdentityError::KeyFetch(_))
        ));
    }
}
