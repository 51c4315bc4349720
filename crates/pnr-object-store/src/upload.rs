//! Raw file uploads.
//!
//! Calls `POST {base_url}/v1_1/{cloud_name}/raw/upload` with a multipart body
//! carrying the file, the destination folder and public id, and the signed
//! timestamp.

use serde::Deserialize;

use crate::error::ObjectStoreError;
use crate::signing;

/// Metadata returned by the object store for a stored object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoredObject {
    /// HTTPS URL the object can be fetched from.
    pub secure_url: String,
    /// Store-assigned identifier (folder + public id).
    pub public_id: String,
}

/// Content type declared for uploaded material files.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

impl crate::CloudinaryClient {
    /// Upload raw bytes under `folder/public_id`.
    ///
    /// No retries: the multipart body is consumed by the first attempt and the
    /// configured client timeout is the deadline.
    pub async fn upload_raw(
        &self,
        bytes: Vec<u8>,
        folder: &str,
        public_id: &str,
    ) -> Result<StoredObject, ObjectStoreError> {
        let endpoint = "POST /raw/upload";
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = signing::sign(
            &[
                ("folder", folder),
                ("public_id", public_id),
                ("timestamp", &timestamp),
            ],
            &self.config.api_secret,
            self.config.signature_algorithm,
        );

        let size = bytes.len();
        let file = reqwest::multipart::Part::bytes(bytes)
            .file_name(public_id.to_string())
            .mime_str(PDF_CONTENT_TYPE)
            .map_err(|e| ObjectStoreError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        let form = reqwest::multipart::Form::new()
            .part("file", file)
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", folder.to_string())
            .text("public_id", public_id.to_string())
            .text("signature", signature);

        tracing::debug!(folder, public_id, size, "uploading raw object");

        let resp = self
            .http
            .post(self.config.raw_upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| ObjectStoreError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ObjectStoreError::ApiError {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        resp.json().await.map_err(|e| ObjectStoreError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })
    }
}
