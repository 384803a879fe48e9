//! In-process pinning for development and tests.

use super::{PinMetadata, PinningProvider};
use crate::error::PinningError;
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// sha2-256 multihash prefix (code 0x12, length 32)
const MULTIHASH_SHA256: [u8; 2] = [0x12, 0x20];

#[derive(Debug, Clone)]
struct Pin {
    metadata: PinMetadata,
    size: usize,
}

/// Pins held in memory, keyed by a CIDv0 of the raw content.
#[derive(Default)]
pub struct MemoryPinning {
    pins: RwLock<HashMap<String, Pin>>,
}

impl MemoryPinning {
    pub fn new() -> Self { Self::default() }

    /// CIDv0 (`Qm...`) of the raw bytes. Not UnixFS-wrapped, so it will not
    /// match what a real IPFS node reports for the same file.
    pub fn content_identifier(bytes: &[u8]) -> String {
        let mut multihash = MULTIHASH_SHA256.to_vec();
        multihash.extend_from_slice(&Sha256::digest(bytes));
        bs58::encode(multihash).into_string()
    }

    pub async fn is_pinned(&self, content_identifier: &str) -> bool {
        self.pins.read().await.contains_key(content_identifier)
    }

    pub async fn len(&self) -> usize {
        self.pins.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn metadata(&self, content_identifier: &str) -> Option<(PinMetadata, usize)> {
        self.pins.read().await.get(content_identifier).map(|pin| (pin.metadata.clone(), pin.size))
    }
}

#[async_trait]
impl PinningProvider for MemoryPinning {
    async fn store(&self, bytes: Vec<u8>, _file_name: &str, metadata: &PinMetadata) -> Result<String, PinningError> {
        let cid = Self::content_identifier(&bytes);
        self.pins.write().await.insert(cid.clone(), Pin { metadata: metadata.clone(), size: bytes.len() });
        Ok(cid)
    }

    /// Unpinning an identifier that is not pinned succeeds, as it does at
    /// hosted providers for content already gone.
    async fn unpin(&self, content_identifier: &str) -> Result<(), PinningError> {
        if self.pins.write().await.remove(content_identifier).is_none() {
            tracing::debug!(cid = content_identifier, "unpin of unknown identifier");
        }
        Ok(())
    }
}
