//! In-memory document store for development and tests.

use super::DocumentStore;
use crate::core::model::{DocumentEntry, WalletDocumentRecord};
use crate::error::StoreError;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, WalletDocumentRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    /// Number of wallet records, including ones whose list is now empty.
    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, wallet_address: &str) -> Result<Option<WalletDocumentRecord>, StoreError> {
        Ok(self.records.read().await.get(wallet_address).cloned())
    }

    async fn append(&self, wallet_address: &str, entry: DocumentEntry) -> Result<(), StoreError> {
        self.records
            .write()
            .await
            .entry(wallet_address.to_string())
            .or_insert_with(|| WalletDocumentRecord::new(wallet_address))
            .docs
            .push(entry);
        Ok(())
    }

    async fn pull(&self, wallet_address: &str, content_identifier: &str) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        Ok(records
            .get_mut(wallet_address)
            .map(|record| record.remove(content_identifier) > 0)
            .unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pull_removes_every_duplicate() {
        let store = MemoryStore::new();
        store.append("0xabc", DocumentEntry::new("a.pdf", "Qm1")).await.unwrap();
        store.append("0xabc", DocumentEntry::new("b.pdf", "Qm2")).await.unwrap();
        store.append("0xabc", DocumentEntry::new("a-copy.pdf", "Qm1")).await.unwrap();

        assert!(store.pull("0xabc", "Qm1").await.unwrap());
        let record = store.find("0xabc").await.unwrap().unwrap();
        assert_eq!(record.docs.len(), 1);
        assert_eq!(record.docs[0].name, "b.pdf");
    }

    #[tokio::test]
    async fn record_is_created_lazily() {
        let store = MemoryStore::new();
        assert!(store.find("0xabc").await.unwrap().is_none());

        store.append("0xabc", DocumentEntry::new("a.pdf", "Qm1")).await.unwrap();
        let record = store.find("0xabc").await.unwrap().unwrap();
        assert_eq!(record.wallet_address, "0xabc");
        assert_eq!(record.docs.len(), 1);
    }

    #[tokio::test]
    async fn pull_is_scoped_to_wallet() {
        let store = MemoryStore::new();
        store.append("0xabc", DocumentEntry::new("a.pdf", "Qm1")).await.unwrap();
        store.append("0xdef", DocumentEntry::new("b.pdf", "Qm1")).await.unwrap();

        assert!(store.pull("0xabc", "Qm1").await.unwrap());
        assert!(store.find("0xabc").await.unwrap().unwrap().docs.is_empty());
        assert_eq!(store.find("0xdef").await.unwrap().unwrap().docs.len(), 1);
    }

    #[tokio::test]
    async fn pull_missing_reports_nothing_removed() {
        let store = MemoryStore::new();
        assert!(!store.pull("0xabc", "Qm1").await.unwrap());

        store.append("0xabc", DocumentEntry::new("a.pdf", "Qm1")).await.unwrap();
        assert!(!store.pull("0xabc", "Qm2").await.unwrap());
    }

    #[tokio::test]
    async fn emptied_record_persists() {
        let store = MemoryStore::new();
        store.append("0xabc", DocumentEntry::new("a.pdf", "Qm1")).await.unwrap();
        store.pull("0xabc", "Qm1").await.unwrap();
        assert_eq!(store.record_count().await, 1);
        assert_eq!(store.find("0xabc").await.unwrap().unwrap().docs, vec![]);
    }
}
