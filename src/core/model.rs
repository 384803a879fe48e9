//! Vault data model and HTTP wire types.
//!
//! Field names follow the JSON the browser client already speaks
//! (`walletAddress`, `ipfsHash`, `uploadedAt`), so the same types serve the
//! server, the CLI and the wasm bindings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::VaultError;

/// One uploaded file, as tracked under a wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentEntry {
    pub name: String,
    /// Identifier returned by the pinning provider. Key for deletion.
    #[serde(rename = "ipfsHash")]
    pub content_identifier: String,
    pub uploaded_at: DateTime<Utc>,
}

impl DocumentEntry {
    pub fn new(name: impl Into<String>, content_identifier: impl Into<String>) -> Self {
        Self::at(name, content_identifier, Utc::now())
    }

    pub fn at(name: impl Into<String>, content_identifier: impl Into<String>, uploaded_at: DateTime<Utc>) -> Self {
        Self { name: name.into(), content_identifier: content_identifier.into(), uploaded_at }
    }
}

/// Per-wallet record. Created lazily on the first upload, never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletDocumentRecord {
    pub wallet_address: String,
    #[serde(default)]
    pub docs: Vec<DocumentEntry>,
}

impl WalletDocumentRecord {
    pub fn new(wallet_address: impl Into<String>) -> Self {
        Self { wallet_address: wallet_address.into(), docs: Vec::new() }
    }

    /// Remove every entry carrying `content_identifier`, keeping the order of
    /// the rest. Returns how many entries were removed.
    pub fn remove(&mut self, content_identifier: &str) -> usize {
        let before = self.docs.len();
        self.docs.retain(|doc| doc.content_identifier != content_identifier);
        before - self.docs.len()
    }
}

/// `POST /upload` body. Every field is optional on the wire so that a
/// missing field is reported as `InvalidRequest` rather than a decode error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// File bytes in transport encoding (see [`crate::core::encoding`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_content: Option<String>,
}

/// An upload whose required fields are all present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidUpload {
    pub wallet_address: String,
    pub name: String,
    pub file_content: String,
}

impl UploadRequest {
    pub fn new(wallet_address: impl Into<String>, name: impl Into<String>, file_content: impl Into<String>) -> Self {
        Self {
            wallet_address: Some(wallet_address.into()),
            name: Some(name.into()),
            file_content: Some(file_content.into()),
        }
    }

    /// Empty strings count as absent.
    pub fn validate(self) -> Result<ValidUpload, VaultError> {
        fn present(field: Option<String>) -> Option<String> {
            field.filter(|value| !value.is_empty())
        }
        match (present(self.wallet_address), present(self.name), present(self.file_content)) {
            (Some(wallet_address), Some(name), Some(file_content)) => {
                Ok(ValidUpload { wallet_address, name, file_content })
            }
            _ => Err(VaultError::InvalidRequest("missing required fields".into())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub ipfs_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocsResponse {
    pub docs: Vec<DocumentEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
