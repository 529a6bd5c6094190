//! Content-addressed storage for rendered FIR documents.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::{debug, error};

use crate::config::Settings;
use crate::dto::PinResponse;

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("network error: {0}")]
    Network(String),
    #[error("http error: {0}")]
    Http(u16),
    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

/// Stores a document and returns its content identifier.
#[async_trait]
pub trait FirStorage: Send + Sync {
    async fn store(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, StorageError>;
}

/// Posts documents to a pinning endpoint as multipart part `file`.
#[derive(Clone)]
pub struct PinningClient {
    client: Client,
    url: String,
}

impl PinningClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, StorageError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StorageError::Network(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, StorageError> {
        Self::new(&settings.ipfs_upload_url, settings.http_timeout())
    }
}

#[async_trait]
impl FirStorage for PinningClient {
    async fn store(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, StorageError> {
        let size = bytes.len();
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")
            .map_err(|e| StorageError::InvalidResponse(e.to_string()))?;
        let form = Form::new().part("file", part);

        debug!(url = %self.url, size, "uploading document");
        let resp = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("network error to pinning service: {e}");
                StorageError::Network(e.to_string())
            })?;

        let status = resp.status();
        if !status.is_success() {
            error!(status = %status, "pinning service rejected upload");
            return Err(StorageError::Http(status.as_u16()));
        }

        let body: PinResponse = resp
            .json()
            .await
            .map_err(|e| StorageError::InvalidResponse(e.to_string()))?;
        if body.ipfs_hash.is_empty() {
            return Err(StorageError::InvalidResponse("empty ipfsHash".into()));
        }
        debug!(cid = %body.ipfs_hash, "document pinned");
        Ok(body.ipfs_hash)
    }
}
