//! Document store: one record per wallet, each an ordered list of entries.
//!
//! The trait mirrors the three document-database primitives the vault needs:
//! keyed read, upsert-with-append and pull-matching-element. Both operations
//! that mutate are single atomic updates, so concurrent uploads for the same
//! wallet never lose an entry.

mod memory;
mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use crate::core::model::{DocumentEntry, WalletDocumentRecord};
use crate::error::StoreError;
use async_trait::async_trait;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Record for `wallet_address`, if one has ever been created.
    async fn find(&self, wallet_address: &str) -> Result<Option<WalletDocumentRecord>, StoreError>;

    /// Append `entry`, creating the record on first use.
    async fn append(&self, wallet_address: &str, entry: DocumentEntry) -> Result<(), StoreError>;

    /// Remove every entry with `content_identifier` from this wallet's record.
    /// The same bytes uploaded twice share one identifier, so both entries go.
    /// Returns `false` when nothing was removed.
    async fn pull(&self, wallet_address: &str, content_identifier: &str) -> Result<bool, StoreError>;
}
