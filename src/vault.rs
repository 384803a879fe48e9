//! Vault - upload, list and delete over a pinning provider and a document store
//!
//! The vault owns both collaborators and is shared by every request handler.
//! The provider call and the database mutation are independent operations:
//!
//! - upload pins first, then appends. A failed append leaves the blob pinned
//!   but untracked.
//! - delete unpins first, then pulls. A failed unpin leaves the entry listed;
//!   an unknown identifier is only detected after the unpin has run.
//!
//! Wallet addresses are taken as supplied by the caller. Nothing here proves
//! the caller controls the wallet.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::{PinningBackend, StoreBackend, VaultConfig};
use crate::core::encoding;
use crate::core::model::{DocumentEntry, UploadRequest};
use crate::error::{ConfigError, StartupError, VaultError};
use crate::pinning::{MemoryPinning, PinMetadata, PinataClient, PinningProvider};
use crate::store::{DocumentStore, MemoryStore, MongoStore};

#[derive(Clone)]
pub struct Vault {
    pinning: Arc<dyn PinningProvider>,
    store: Arc<dyn DocumentStore>,
}

impl Vault {
    pub fn new(pinning: Arc<dyn PinningProvider>, store: Arc<dyn DocumentStore>) -> Self {
        Self { pinning, store }
    }

    /// Vault over in-process backends.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryPinning::new()), Arc::new(MemoryStore::new()))
    }

    /// Construct the configured backends. The document store is connected
    /// (and pinged) here, before any request is served.
    pub async fn connect(config: &VaultConfig) -> Result<Self, StartupError> {
        config.validate()?;

        let store: Arc<dyn DocumentStore> = match config.store {
            StoreBackend::Memory => {
                warn!("using in-memory document store; records are lost on exit");
                Arc::new(MemoryStore::new())
            }
            StoreBackend::Mongo => {
                let uri = config.mongo_uri.as_deref().ok_or(ConfigError::Missing(crate::core::paths::env::MONGO_URI))?;
                Arc::new(MongoStore::connect(uri, config.mongo_db.as_deref()).await?)
            }
        };

        let pinning: Arc<dyn PinningProvider> = match (config.pinning, &config.pinata) {
            (PinningBackend::Memory, _) => {
                warn!("using in-memory pinning; nothing reaches IPFS");
                Arc::new(MemoryPinning::new())
            }
            (PinningBackend::Pinata, Some(credentials)) => {
                Arc::new(PinataClient::new(credentials.clone()).with_base_url(&config.pinata_url))
            }
            (PinningBackend::Pinata, None) => {
                return Err(ConfigError::Missing(crate::core::paths::env::PINATA_API_KEY).into());
            }
        };

        info!(store = config.store.as_str(), pinning = config.pinning.as_str(), "vault ready");
        Ok(Self::new(pinning, store))
    }

    /// Pin the decoded file and record it under the wallet. Returns the
    /// content identifier.
    pub async fn upload(&self, request: UploadRequest) -> Result<String, VaultError> {
        let upload = request.validate()?;
        let bytes = encoding::decode(&upload.file_content).map_err(|e| VaultError::InvalidRequest(e.to_string()))?;

        let metadata = PinMetadata::new(&upload.name, &upload.wallet_address);
        let size = bytes.len();
        let cid = self.pinning.store(bytes, &upload.name, &metadata).await.map_err(|e| {
            error!(wallet = %upload.wallet_address, name = %upload.name, error = %e, "pinning failed");
            VaultError::UploadFailed(e.to_string())
        })?;

        let entry = DocumentEntry::new(&upload.name, &cid);
        self.store.append(&upload.wallet_address, entry).await.map_err(|e| {
            error!(wallet = %upload.wallet_address, cid = %cid, error = %e, "content pinned but not recorded");
            VaultError::UploadFailed(e.to_string())
        })?;

        info!(wallet = %upload.wallet_address, name = %upload.name, cid = %cid, size, "document uploaded");
        Ok(cid)
    }

    /// Entries for `wallet_address` in upload order; empty when the wallet
    /// has never uploaded.
    pub async fn list(&self, wallet_address: &str) -> Result<Vec<DocumentEntry>, VaultError> {
        let record = self.store.find(wallet_address).await.map_err(|e| {
            error!(wallet = %wallet_address, error = %e, "fetch failed");
            VaultError::FetchFailed(e.to_string())
        })?;
        Ok(record.map(|r| r.docs).unwrap_or_default())
    }

    /// Unpin, then remove the entry from this wallet's list.
    pub async fn delete(&self, wallet_address: &str, content_identifier: &str) -> Result<(), VaultError> {
        self.pinning.unpin(content_identifier).await.map_err(|e| {
            error!(wallet = %wallet_address, cid = %content_identifier, error = %e, "unpin failed");
            VaultError::DeleteFailed(e.to_string())
        })?;
        info!(cid = %content_identifier, "unpinned");

        let removed = self.store.pull(wallet_address, content_identifier).await.map_err(|e| {
            error!(wallet = %wallet_address, cid = %content_identifier, error = %e, "unpinned but not removed");
            VaultError::DeleteFailed(e.to_string())
        })?;
        if !removed {
            warn!(wallet = %wallet_address, cid = %content_identifier, "unpinned an identifier not listed for wallet");
            return Err(VaultError::NotFound);
        }
        Ok(())
    }
}
