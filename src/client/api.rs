//! Vault HTTP API client

use async_trait::async_trait;
use reqwest::{Response, Url};

use crate::core::encoding;
use crate::core::model::{DocsResponse, DocumentEntry, ErrorResponse, UploadRequest, UploadResponse};
use crate::core::paths::routes::{DOCS_SEGMENT, UPLOAD_SEGMENT};
use crate::error::ClientError;

/// The three vault calls, abstracted so the session can run against a fake.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait VaultApi {
    /// Upload raw bytes; returns the content identifier.
    async fn upload(&self, wallet_address: &str, name: &str, bytes: &[u8]) -> Result<String, ClientError>;
    async fn list(&self, wallet_address: &str) -> Result<Vec<DocumentEntry>, ClientError>;
    async fn delete(&self, wallet_address: &str, content_identifier: &str) -> Result<(), ClientError>;
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    pub fn new(server_url: &str) -> Result<Self, ClientError> {
        let base = Url::parse(server_url).map_err(|e| ClientError::InvalidServerUrl(format!("{server_url}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidServerUrl(server_url.to_string()));
        }
        Ok(Self { http: reqwest::Client::new(), base })
    }

    pub fn server_url(&self) -> &Url { &self.base }

    /// Base URL plus percent-encoded path segments.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidServerUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Non-2xx responses become `ClientError::Server` with the body's `error`.
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => status.canonical_reason().unwrap_or("request failed").to_string(),
    };
    Err(ClientError::Server { status: status.as_u16(), message })
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl VaultApi for ApiClient {
    async fn upload(&self, wallet_address: &str, name: &str, bytes: &[u8]) -> Result<String, ClientError> {
        let body = UploadRequest::new(wallet_address, name, encoding::encode(bytes));
        let response = self.http.post(self.url(&[UPLOAD_SEGMENT])?).json(&body).send().await?;
        let body: UploadResponse = check(response).await?.json().await?;
        Ok(body.ipfs_hash)
    }

    async fn list(&self, wallet_address: &str) -> Result<Vec<DocumentEntry>, ClientError> {
        let response = self.http.get(self.url(&[DOCS_SEGMENT, wallet_address])?).send().await?;
        let body: DocsResponse = check(response).await?.json().await?;
        Ok(body.docs)
    }

    async fn delete(&self, wallet_address: &str, content_identifier: &str) -> Result<(), ClientError> {
        let url = self.url(&[DOCS_SEGMENT, wallet_address, content_identifier])?;
        check(self.http.delete(url).send().await?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_built_from_segments() {
        let client = ApiClient::new("http://localhost:4000").unwrap();
        assert_eq!(client.url(&["upload"]).unwrap().as_str(), "http://localhost:4000/upload");
        assert_eq!(
            client.url(&["docs", "0xabc", "QmHash"]).unwrap().as_str(),
            "http://localhost:4000/docs/0xabc/QmHash"
        );
    }

    #[test]
    fn base_path_is_kept() {
        let client = ApiClient::new("https://example.com/vault/").unwrap();
        assert_eq!(client.url(&["docs", "0xabc"]).unwrap().as_str(), "https://example.com/vault/docs/0xabc");
    }

    #[test]
    fn wallet_segments_are_escaped() {
        let client = ApiClient::new("http://localhost:4000").unwrap();
        assert_eq!(client.url(&["docs", "a/b c"]).unwrap().as_str(), "http://localhost:4000/docs/a%2Fb%20c");
    }

    #[test]
    fn rejects_unusable_urls() {
        assert!(matches!(ApiClient::new("not a url"), Err(ClientError::InvalidServerUrl(_))));
        assert!(matches!(ApiClient::new("mailto:me@example.com"), Err(ClientError::InvalidServerUrl(_))));
    }
}
