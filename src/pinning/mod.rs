//! Pinning provider: stores bytes on IPFS and keeps them pinned.
//!
//! | Backend | Type | Notes |
//! |---------|------|-------|
//! | Pinata | [`PinataClient`] | HTTP API, key pair from the environment |
//! | Memory | [`MemoryPinning`] | In-process, CIDv0-shaped identifiers |

mod memory;
mod pinata;

pub use memory::MemoryPinning;
pub use pinata::{PinataClient, PinataCredentials};

use crate::error::PinningError;
use async_trait::async_trait;

/// Metadata attached to a pinned blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinMetadata {
    pub name: String,
    pub wallet_address: String,
}

impl PinMetadata {
    pub fn new(name: impl Into<String>, wallet_address: impl Into<String>) -> Self {
        Self { name: name.into(), wallet_address: wallet_address.into() }
    }
}

#[async_trait]
pub trait PinningProvider: Send + Sync {
    /// Store `bytes` as a named blob and return its content identifier.
    async fn store(&self, bytes: Vec<u8>, file_name: &str, metadata: &PinMetadata) -> Result<String, PinningError>;

    /// Stop pinning `content_identifier`.
    async fn unpin(&self, content_identifier: &str) -> Result<(), PinningError>;
}
