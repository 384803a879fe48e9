//! Pinata client - reqwest multipart upload + unpin

use super::{PinMetadata, PinningProvider};
use crate::core::paths::pinata as api;
use crate::error::PinningError;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::json;

/// Static API key pair. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct PinataCredentials {
    pub api_key: String,
    pub api_secret: String,
}

impl PinataCredentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), api_secret: api_secret.into() }
    }
}

impl std::fmt::Debug for PinataCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinataCredentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Deserialize)]
struct PinFileResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: Option<String>,
}

pub struct PinataClient {
    http: reqwest::Client,
    base_url: String,
    credentials: PinataCredentials,
}

impl PinataClient {
    pub fn new(credentials: PinataCredentials) -> Self {
        Self { http: reqwest::Client::new(), base_url: api::BASE_URL.to_string(), credentials }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str { &self.base_url }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header(api::API_KEY_HEADER, &self.credentials.api_key)
            .header(api::API_SECRET_HEADER, &self.credentials.api_secret)
    }
}

/// `pinataMetadata` form field: name plus the wallet as a key/value.
fn metadata_json(metadata: &PinMetadata) -> String {
    json!({
        "name": metadata.name,
        "keyvalues": { "walletAddress": metadata.wallet_address }
    })
    .to_string()
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, PinningError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(PinningError::Status { status: status.as_u16(), body })
}

#[async_trait]
impl PinningProvider for PinataClient {
    async fn store(&self, bytes: Vec<u8>, file_name: &str, metadata: &PinMetadata) -> Result<String, PinningError> {
        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name.to_string()))
            .text("pinataMetadata", metadata_json(metadata));

        let url = format!("{}{}", self.base_url, api::PIN_FILE);
        let response = self.authorized(self.http.post(url)).multipart(form).send().await?;
        let body: PinFileResponse = check_status(response).await?.json().await?;
        body.ipfs_hash.filter(|hash| !hash.is_empty()).ok_or(PinningError::MissingHash)
    }

    async fn unpin(&self, content_identifier: &str) -> Result<(), PinningError> {
        let url = format!("{}{}/{}", self.base_url, api::UNPIN, content_identifier);
        let response = self.authorized(self.http.delete(url)).send().await?;
        let response = check_status(response).await?;
        let ack = response.text().await.unwrap_or_default();
        tracing::debug!(cid = content_identifier, ack = %ack, "pinata unpin acknowledged");
        Ok(())
    }
}
