//! Application-wide constants

pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const TOKEN_TYPE_BEARER: &str = "bearer";

pub const DEFAULT_JWT_ALGORITHM: &str = "HS256";
/// 24 hours, independent of the identity assertion's own expiry.
pub const DEFAULT_JWT_EXPIRY_MINUTES: i64 = 1440;

pub const DEFAULT_STORAGE_REGION: &str = "ap-south-1";

pub const DEFAULT_AGENT_MODEL: &str = "gemini-live-2.5-flash-preview-native-audio-09-2025";
pub const DEFAULT_AGENT_TEMPERATURE: f64 = 0.1;

pub const DEFAULT_PREPROCESSOR_URL: &str = "http://localhost:8080";
pub const DEFAULT_POSTPROCESSOR_URL: &str = "http://localhost:8003";
