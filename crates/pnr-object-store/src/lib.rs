//! # pnr-object-store -- Typed client for the material object store
//!
//! The catalog stores uploaded PDFs in a Cloudinary-compatible object store
//! using the signed raw-upload API. This crate owns the HTTP details:
//! configuration from the environment, request signing, and an error
//! taxonomy the API layer maps to `502 UPLOAD_ERROR`.
//!
//! ## Endpoint
//!
//! `POST {base_url}/v1_1/{cloud_name}/raw/upload`, multipart, with the
//! response's `secure_url` and `public_id` handed back to the caller.

pub mod config;
pub mod error;
pub mod signing;
pub mod upload;

pub use config::{ConfigError, ObjectStoreConfig};
pub use error::ObjectStoreError;
pub use signing::SignatureAlgorithm;
pub use upload::StoredObject;

use std::time::Duration;

/// Client for the object store API.
#[derive(Debug, Clone)]
pub struct CloudinaryClient {
    http: reqwest::Client,
    config: ObjectStoreConfig,
}

impl CloudinaryClient {
    /// Create a new client from configuration.
    pub fn new(config: ObjectStoreConfig) -> Result<Self, ObjectStoreError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ObjectStoreError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self { http, config })
    }

    /// Build a client from environment variables.
    ///
    /// See [`ObjectStoreConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self, ObjectStoreError> {
        Self::new(ObjectStoreConfig::from_env()?)
    }
}
