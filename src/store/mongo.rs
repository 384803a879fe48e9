//! MongoDB document store.
//!
//! Records live in the `documents` collection with the layout
//! `{walletAddress, docs: [{name, ipfsHash, uploadedAt}]}`, where `uploadedAt`
//! is a BSON date.

use super::DocumentStore;
use crate::core::model::{DocumentEntry, WalletDocumentRecord};
use crate::core::paths::{COLLECTION, DEFAULT_DATABASE};
use crate::error::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::{self, doc};
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEntry {
    #[serde(default)]
    name: String,
    #[serde(default)]
    ipfs_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    uploaded_at: Option<bson::DateTime>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord {
    wallet_address: String,
    #[serde(default)]
    docs: Vec<StoredEntry>,
}

impl From<DocumentEntry> for StoredEntry {
    fn from(entry: DocumentEntry) -> Self {
        Self {
            name: entry.name,
            ipfs_hash: entry.content_identifier,
            uploaded_at: Some(bson::DateTime::from_millis(entry.uploaded_at.timestamp_millis())),
        }
    }
}

impl From<StoredEntry> for DocumentEntry {
    fn from(entry: StoredEntry) -> Self {
        let uploaded_at = entry
            .uploaded_at
            .and_then(|at| DateTime::<Utc>::from_timestamp_millis(at.timestamp_millis()))
            .unwrap_or_default();
        DocumentEntry { name: entry.name, content_identifier: entry.ipfs_hash, uploaded_at }
    }
}

impl From<StoredRecord> for WalletDocumentRecord {
    fn from(record: StoredRecord) -> Self {
        WalletDocumentRecord {
            wallet_address: record.wallet_address,
            docs: record.docs.into_iter().map(DocumentEntry::from).collect(),
        }
    }
}

pub struct MongoStore {
    collection: Collection<StoredRecord>,
}

impl MongoStore {
    /// Connect and ping. `database` falls back to the one named in the URI,
    /// then to `digidock`.
    pub async fn connect(uri: &str, database: Option<&str>) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        let db = match database {
            Some(name) => client.database(name),
            None => client.default_database().unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
        };
        db.run_command(doc! { "ping": 1 }).await?;
        info!(database = db.name(), collection = COLLECTION, "MongoDB connected");
        Ok(Self { collection: db.collection(COLLECTION) })
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find(&self, wallet_address: &str) -> Result<Option<WalletDocumentRecord>, StoreError> {
        let record = self.collection.find_one(doc! { "walletAddress": wallet_address }).await?;
        Ok(record.map(WalletDocumentRecord::from))
    }

    async fn append(&self, wallet_address: &str, entry: DocumentEntry) -> Result<(), StoreError> {
        let entry = bson::to_bson(&StoredEntry::from(entry)).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.collection
            .update_one(doc! { "walletAddress": wallet_address }, doc! { "$push": { "docs": entry } })
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn pull(&self, wallet_address: &str, content_identifier: &str) -> Result<bool, StoreError> {
        let result = self
            .collection
            .update_one(
                doc! { "walletAddress": wallet_address },
                doc! { "$pull": { "docs": { "ipfsHash": content_identifier } } },
            )
            .await?;
        Ok(result.modified_count > 0)
    }
}
