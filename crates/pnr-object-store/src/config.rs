//! Object store client configuration.
//!
//! Credentials come from the environment. The API base defaults to the public
//! Cloudinary endpoint and can be pointed at a mock server for testing.

use url::Url;

use crate::signing::SignatureAlgorithm;

/// Default API base for the hosted object store.
pub const DEFAULT_BASE_URL: &str = "https://api.cloudinary.com";

/// Default upload deadline in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for connecting to the object store.
///
/// Custom `Debug` implementation redacts the `api_secret` field.
#[derive(Clone)]
pub struct ObjectStoreConfig {
    /// API base URL. Default: <https://api.cloudinary.com>
    pub base_url: Url,
    /// Account (cloud) name, the first path segment of every API call.
    pub cloud_name: String,
    /// Public API key sent with each signed request.
    pub api_key: String,
    /// Secret used to sign requests. Never sent over the wire.
    pub api_secret: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Digest the account signs uploads with.
    pub signature_algorithm: SignatureAlgorithm,
}

impl std::fmt::Debug for ObjectStoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectStoreConfig")
            .field("base_url", &self.base_url)
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .field("signature_algorithm", &self.signature_algorithm)
            .finish()
    }
}

impl ObjectStoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `CLOUDINARY_CLOUD_NAME` (required)
    /// - `CLOUDINARY_API_KEY` (required)
    /// - `CLOUDINARY_API_SECRET` (required)
    /// - `CLOUDINARY_BASE_URL` (default: `https://api.cloudinary.com`)
    /// - `OBJECT_STORE_TIMEOUT_SECS` (default: 60)
    /// - `CLOUDINARY_SIGNATURE_ALGORITHM` (`sha1` or `sha256`, default: `sha1`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            cloud_name: required_var("CLOUDINARY_CLOUD_NAME")?,
            api_key: required_var("CLOUDINARY_API_KEY")?,
            api_secret: required_var("CLOUDINARY_API_SECRET")?,
            base_url: env_url("CLOUDINARY_BASE_URL", DEFAULT_BASE_URL)?,
            timeout_secs: std::env::var("OBJECT_STORE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            signature_algorithm: env_signature_algorithm("CLOUDINARY_SIGNATURE_ALGORITHM")?,
        })
    }

    /// Create a configuration pointing at a local mock server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `base` cannot be parsed.
    pub fn local_mock(base: &str, cloud_name: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: Url::parse(base)
                .map_err(|e| ConfigError::InvalidUrl("base".to_string(), e.to_string()))?,
            cloud_name: cloud_name.to_string(),
            api_key: "test-key".to_string(),
            api_secret: "test-secret".to_string(),
            timeout_secs: 5,
            signature_algorithm: SignatureAlgorithm::default(),
        })
    }

    /// Endpoint for raw (non-image) uploads.
    pub fn raw_upload_url(&self) -> String {
        format!(
            "{}/v1_1/{}/raw/upload",
            self.base_url.as_str().trim_end_matches('/'),
            self.cloud_name
        )
    }
}

fn required_var(var: &'static str) -> Result<String, ConfigError> {
    match std::env::var(var) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(var)),
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

fn env_signature_algorithm(var: &'static str) -> Result<SignatureAlgorithm, ConfigError> {
    match std::env::var(var) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .parse()
            .map_err(|e: String| ConfigError::Invalid(var, e)),
        _ => Ok(SignatureAlgorithm::default()),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or blank. The service treats this as
    /// "object store not configured".
    #[error("{0} environment variable is required")]
    Missing(&'static str),
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

impl ConfigError {
    /// True when credentials are simply absent rather than malformed.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_mock_builds_valid_config() {
        let cfg = ObjectStoreConfig::local_mock("http://127.0.0.1:9000", "demo").unwrap();
        assert_eq!(cfg.cloud_name, "demo");
        assert_eq!(cfg.timeout_secs, 5);
        assert_eq!(cfg.base_url.as_str(), "http://127.0.0.1:9000/");
        assert_eq!(cfg.signature_algorithm, SignatureAlgorithm::Sha1);
    }

    #[test]
    fn raw_upload_url_has_single_slashes() {
        let cfg = ObjectStoreConfig::local_mock("http://127.0.0.1:9000/", "demo").unwrap();
        assert_eq!(
            cfg.raw_upload_url(),
            "http://127.0.0.1:9000/v1_1/demo/raw/upload"
        );
    }

    #[test]
    fn debug_redacts_secret() {
        let cfg = ObjectStoreConfig::local_mock("http://127.0.0.1:9000", "demo").unwrap();
        let out = format!("{cfg:?}");
        assert!(out.contains("[REDACTED]"));
        assert!(!out.contains("test-secret"));
    }

    #[test]
    fn env_url_uses_default_when_var_absent() {
        let url = env_url("NONEXISTENT_VAR_PNR_OS", "https://example.com").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }

    #[test]
    fn missing_required_var_is_named() {
        let err = required_var("NONEXISTENT_CLOUDINARY_VAR_PNR").unwrap_err();
        assert!(err.to_string().contains("NONEXISTENT_CLOUDINARY_VAR_PNR"));
        assert!(err.is_missing());
    }

    #[test]
    fn absent_signature_algorithm_defaults_to_sha1() {
        let alg = env_signature_algorithm("NONEXISTENT_SIGNATURE_VAR_PNR").unwrap();
        assert_eq!(alg, SignatureAlgorithm::Sha1);
    }

    #[test]
    fn malformed_values_are_not_missing() {
        assert!(!ConfigError::InvalidUrl("CLOUDINARY_BASE_URL".into(), "bad".into()).is_missing());
        assert!(!ConfigError::Invalid("CLOUDINARY_SIGNATURE_ALGORITHM", "md5".into()).is_missing());
    }
}
