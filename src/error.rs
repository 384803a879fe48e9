//! Error types.
//!
//! [`VaultError`] is the taxonomy the HTTP API exposes. The collaborator
//! errors ([`PinningError`], [`StoreError`]) carry the real cause, which is
//! logged at the endpoint boundary and never sent to the client.

use thiserror::Error;

/// Endpoint-level failures. Each maps to one HTTP status and a fixed message.
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("fetch failed: {0}")]
    FetchFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("document not found")]
    NotFound,
}

impl VaultError {
    pub fn status_code(&self) -> u16 {
        match self {
            VaultError::InvalidRequest(_) => 400,
            VaultError::NotFound => 404,
            VaultError::UploadFailed(_) | VaultError::FetchFailed(_) | VaultError::DeleteFailed(_) => 500,
        }
    }

    /// The short string returned to clients.
    pub fn public_message(&self) -> &'static str {
        match self {
            VaultError::InvalidRequest(_) => "Missing required fields",
            VaultError::UploadFailed(_) => "Failed to upload document",
            VaultError::FetchFailed(_) => "Failed to fetch documents",
            VaultError::DeleteFailed(_) => "Delete failed",
            VaultError::NotFound => "Document not found or already deleted",
        }
    }
}

/// Pinning provider failures.
#[derive(Debug, Error)]
pub enum PinningError {
    #[error("pinning request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("pinning provider returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("pinning provider response has no IpfsHash")]
    MissingHash,
}

/// Document store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[cfg(feature = "native")]
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Configuration read from the process environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
    #[error("invalid {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Failures before the server starts accepting requests.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to bind {addr}: {source}")]
    Bind { addr: String, source: std::io::Error },
    #[error("server error: {0}")]
    Serve(std::io::Error),
}

/// Client-side failures. `Display` of the session-level variants is the text
/// shown to the user.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server url: {0}")]
    InvalidServerUrl(String),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server responded {status}: {message}")]
    Server { status: u16, message: String },
    #[error("MetaMask not installed")]
    WalletUnavailable,
    #[error("Failed to connect wallet")]
    WalletRejected(String),
    #[error("Please select a file.")]
    NoFile,
    #[error("Please connect your wallet.")]
    NoWallet,
    /// The browser facade refuses a second call while one holds the session.
    #[error("Upload already in progress")]
    UploadInProgress,
    #[error("Upload failed")]
    UploadFailed(String),
    #[error("Failed to delete file")]
    DeleteFailed(String),
}

impl ClientError {
    /// Underlying cause for logs, where the display text is user-facing only.
    pub fn detail(&self) -> String {
        match self {
            ClientError::WalletRejected(cause)
            | ClientError::UploadFailed(cause)
            | ClientError::DeleteFailed(cause) => cause.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vault_errors_map_to_status_and_message() {
        let cases = [
            (VaultError::InvalidRequest("x".into()), 400, "Missing required fields"),
            (VaultError::UploadFailed("x".into()), 500, "Failed to upload document"),
            (VaultError::FetchFailed("x".into()), 500, "Failed to fetch documents"),
            (VaultError::DeleteFailed("x".into()), 500, "Delete failed"),
            (VaultError::NotFound, 404, "Document not found or already deleted"),
        ];
        for (err, status, message) in cases {
            assert_eq!(err.status_code(), status);
            assert_eq!(err.public_message(), message);
        }
    }

    #[test]
    fn client_error_detail_keeps_cause() {
        let err = ClientError::UploadFailed("server responded 500".into());
        assert_eq!(err.to_string(), "Upload failed");
        assert_eq!(err.detail(), "server responded 500");
    }
}
