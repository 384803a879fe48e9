//! VaultSession - client UI state
//!
//! Tracks the connected wallet, the file picked for upload, the document
//! list and whether an upload is in flight. Every mutation that changes what
//! the server holds is followed by a refresh of the list.

use tracing::{error, warn};

use super::api::VaultApi;
use super::wallet::WalletProvider;
use crate::core::model::DocumentEntry;
use crate::error::ClientError;

/// A file chosen for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { name: name.into(), bytes }
    }

    pub fn size(&self) -> u64 { self.bytes.len() as u64 }
}

/// Success messages shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Uploaded(String),
    Deleted,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::Uploaded(hash) => write!(f, "Uploaded! IPFS Hash: {}", hash),
            Notice::Deleted => write!(f, "File deleted"),
        }
    }
}

/// Holds `uploading` up for the duration of one call, lowered on drop.
struct UploadingFlag<'a>(&'a mut bool);

impl<'a> UploadingFlag<'a> {
    fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for UploadingFlag<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

pub struct VaultSession<A> {
    api: A,
    wallet: Option<String>,
    docs: Vec<DocumentEntry>,
    file: Option<SelectedFile>,
    uploading: bool,
}

impl<A: VaultApi> VaultSession<A> {
    pub fn new(api: A) -> Self {
        Self { api, wallet: None, docs: Vec::new(), file: None, uploading: false }
    }

    pub fn api(&self) -> &A { &self.api }
    pub fn wallet(&self) -> Option<&str> { self.wallet.as_deref() }
    pub fn docs(&self) -> &[DocumentEntry] { &self.docs }
    pub fn selected_file(&self) -> Option<&SelectedFile> { self.file.as_ref() }
    pub fn is_uploading(&self) -> bool { self.uploading }

    /// Connect the first account the wallet offers, then load its documents.
    pub async fn connect<W>(&mut self, provider: &W) -> Result<String, ClientError>
    where
        W: WalletProvider + ?Sized,
    {
        let accounts = provider.request_accounts().await.map_err(|e| {
            error!(error = %e.detail(), "wallet connection failed");
            match e {
                ClientError::WalletUnavailable => ClientError::WalletUnavailable,
                other => ClientError::WalletRejected(other.detail()),
            }
        })?;
        let address = accounts
            .into_iter()
            .find(|a| !a.is_empty())
            .ok_or_else(|| ClientError::WalletRejected("wallet returned no accounts".into()))?;

        self.wallet = Some(address.clone());
        self.refresh().await;
        Ok(address)
    }

    /// Forget the wallet, its documents and any picked file.
    pub fn disconnect(&mut self) {
        self.wallet = None;
        self.docs.clear();
        self.file = None;
    }

    pub fn select_file(&mut self, file: SelectedFile) {
        self.file = Some(file);
    }

    pub fn clear_file(&mut self) {
        self.file = None;
    }

    /// Reload the list. A failed fetch empties it rather than erroring.
    pub async fn refresh(&mut self) {
        let Some(wallet) = self.wallet.clone() else {
            self.docs.clear();
            return;
        };
        match self.api.list(&wallet).await {
            Ok(docs) => self.docs = docs,
            Err(e) => {
                warn!(wallet = %wallet, error = %e, "failed to fetch docs");
                self.docs.clear();
            }
        }
    }

    /// Upload the picked file for the connected wallet. Dropping the future
    /// mid-call leaves the file selected and the session ready to retry.
    pub async fn upload(&mut self) -> Result<Notice, ClientError> {
        let file = self.file.clone().ok_or(ClientError::NoFile)?;
        let wallet = self.wallet.clone().ok_or(ClientError::NoWallet)?;

        let result = {
            let _uploading = UploadingFlag::raise(&mut self.uploading);
            self.api.upload(&wallet, &file.name, &file.bytes).await
        };

        match result {
            Ok(hash) => {
                self.file = None;
                self.refresh().await;
                Ok(Notice::Uploaded(hash))
            }
            Err(e) => {
                error!(wallet = %wallet, name = %file.name, error = %e, "upload failed");
                Err(ClientError::UploadFailed(e.to_string()))
            }
        }
    }

    /// Delete `content_identifier` once the user has confirmed. Declining is
    /// a no-op (`Ok(None)`).
    pub async fn delete(&mut self, content_identifier: &str, confirmed: bool) -> Result<Option<Notice>, ClientError> {
        if !confirmed {
            return Ok(None);
        }
        let wallet = self.wallet.clone().ok_or(ClientError::NoWallet)?;
        match self.api.delete(&wallet, content_identifier).await {
            Ok(()) => {
                self.refresh().await;
                Ok(Some(Notice::Deleted))
            }
            Err(e) => {
                error!(wallet = %wallet, cid = %content_identifier, error = %e, "delete failed");
                Err(ClientError::DeleteFailed(e.to_string()))
            }
        }
    }
}

#[cfg(all(test, feature = "native"))]
mod tests {
    use super::*;
    use crate::client::wallet::StaticWallet;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// In-memory stand-in for the server.
    #[derive(Default)]
    struct FakeApi {
        docs: Mutex<Vec<(String, DocumentEntry)>>,
        fail_list: bool,
        fail_writes: bool,
        /// Next upload hangs until the caller gives up on it.
        stall_upload: AtomicBool,
        calls: Mutex<Vec<String>>,
    }

    impl FakeApi {
        fn calls(&self) -> Vec<String> { self.calls.lock().unwrap().clone() }
    }

    #[async_trait]
    impl VaultApi for FakeApi {
        async fn upload(&self, wallet: &str, name: &str, bytes: &[u8]) -> Result<String, ClientError> {
            self.calls.lock().unwrap().push(format!("upload {wallet} {name}"));
            if self.stall_upload.swap(false, Ordering::SeqCst) {
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
            if self.fail_writes {
                return Err(ClientError::Server { status: 500, message: "Failed to upload document".into() });
            }
            let hash = format!("Qm{}", bytes.len());
            self.docs.lock().unwrap().push((wallet.to_string(), DocumentEntry::new(name, &hash)));
            Ok(hash)
        }

        async fn list(&self, wallet: &str) -> Result<Vec<DocumentEntry>, ClientError> {
            self.calls.lock().unwrap().push(format!("list {wallet}"));
            if self.fail_list {
                return Err(ClientError::Server { status: 500, message: "Failed to fetch documents".into() });
            }
            let docs = self.docs.lock().unwrap();
            Ok(docs.iter().filter(|(w, _)| w == wallet).map(|(_, d)| d.clone()).collect())
        }

        async fn delete(&self, wallet: &str, hash: &str) -> Result<(), ClientError> {
            self.calls.lock().unwrap().push(format!("delete {wallet} {hash}"));
            if self.fail_writes {
                return Err(ClientError::Server { status: 500, message: "Delete failed".into() });
            }
            let mut docs = self.docs.lock().unwrap();
            let before = docs.len();
            docs.retain(|(w, d)| !(w == wallet && d.content_identifier == hash));
            if docs.len() == before {
                return Err(ClientError::Server { status: 404, message: "Document not found or already deleted".into() });
            }
            Ok(())
        }
    }

    struct NoExtension;

    #[async_trait]
    impl WalletProvider for NoExtension {
        async fn request_accounts(&self) -> Result<Vec<String>, ClientError> {
            Err(ClientError::WalletUnavailable)
        }
    }

    #[tokio::test]
    async fn connect_loads_documents() {
        let api = FakeApi::default();
        api.docs.lock().unwrap().push(("0xabc".into(), DocumentEntry::new("a.pdf", "Qm1")));
        let mut session = VaultSession::new(api);

        let address = session.connect(&StaticWallet::new("0xabc")).await.unwrap();
        assert_eq!(address, "0xabc");
        assert_eq!(session.wallet(), Some("0xabc"));
        assert_eq!(session.docs().len(), 1);
    }

    #[tokio::test]
    async fn connect_errors_are_user_facing() {
        let mut session = VaultSession::new(FakeApi::default());
        let err = session.connect(&NoExtension).await.unwrap_err();
        assert_eq!(err.to_string(), "MetaMask not installed");

        let err = session.connect(&StaticWallet::empty()).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to connect wallet");
        assert!(session.wallet().is_none());
    }

    #[tokio::test]
    async fn upload_requires_file_then_wallet() {
        let mut session = VaultSession::new(FakeApi::default());
        assert_eq!(session.upload().await.unwrap_err().to_string(), "Please select a file.");

        session.select_file(SelectedFile::new("a.pdf", b"hello".to_vec()));
        assert_eq!(session.upload().await.unwrap_err().to_string(), "Please connect your wallet.");
        assert!(session.api().calls().is_empty());
    }

    #[tokio::test]
    async fn upload_clears_file_and_refreshes() {
        let mut session = VaultSession::new(FakeApi::default());
        session.connect(&StaticWallet::new("0xabc")).await.unwrap();
        session.select_file(SelectedFile::new("a.pdf", b"hello".to_vec()));

        let notice = session.upload().await.unwrap();
        assert_eq!(notice.to_string(), "Uploaded! IPFS Hash: Qm5");
        assert!(session.selected_file().is_none());
        assert!(!session.is_uploading());
        assert_eq!(session.docs()[0].content_identifier, "Qm5");
        assert_eq!(session.api().calls(), vec!["list 0xabc", "upload 0xabc a.pdf", "list 0xabc"]);
    }

    #[tokio::test]
    async fn failed_upload_keeps_file() {
        let api = FakeApi { fail_writes: true, ..Default::default() };
        let mut session = VaultSession::new(api);
        session.connect(&StaticWallet::new("0xabc")).await.unwrap();
        session.select_file(SelectedFile::new("a.pdf", b"hello".to_vec()));

        let err = session.upload().await.unwrap_err();
        assert_eq!(err.to_string(), "Upload failed");
        assert!(err.detail().contains("500"));
        assert!(session.selected_file().is_some());
        assert!(!session.is_uploading());
    }

    #[tokio::test]
    async fn abandoned_upload_can_be_retried() {
        let api = FakeApi { stall_upload: AtomicBool::new(true), ..Default::default() };
        let mut session = VaultSession::new(api);
        session.connect(&StaticWallet::new("0xabc")).await.unwrap();
        session.select_file(SelectedFile::new("a.pdf", b"hello".to_vec()));

        let abandoned = tokio::time::timeout(Duration::from_millis(50), session.upload()).await;
        assert!(abandoned.is_err());
        assert!(!session.is_uploading());
        assert!(session.selected_file().is_some());

        let notice = session.upload().await.unwrap();
        assert_eq!(notice, Notice::Uploaded("Qm5".into()));
        assert!(!session.is_uploading());
    }

    #[tokio::test]
    async fn declined_delete_does_nothing() {
        let mut session = VaultSession::new(FakeApi::default());
        session.connect(&StaticWallet::new("0xabc")).await.unwrap();
        assert_eq!(session.delete("Qm1", false).await.unwrap(), None);
        assert_eq!(session.api().calls(), vec!["list 0xabc"]);
    }

    #[tokio::test]
    async fn confirmed_delete_refreshes() {
        let api = FakeApi::default();
        api.docs.lock().unwrap().push(("0xabc".into(), DocumentEntry::new("a.pdf", "Qm1")));
        api.docs.lock().unwrap().push(("0xabc".into(), DocumentEntry::new("b.pdf", "Qm2")));
        let mut session = VaultSession::new(api);
        session.connect(&StaticWallet::new("0xabc")).await.unwrap();

        let notice = session.delete("Qm1", true).await.unwrap();
        assert_eq!(notice, Some(Notice::Deleted));
        assert_eq!(notice.unwrap().to_string(), "File deleted");
        let names: Vec<_> = session.docs().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["b.pdf"]);
    }

    #[tokio::test]
    async fn missing_delete_is_reported() {
        let mut session = VaultSession::new(FakeApi::default());
        session.connect(&StaticWallet::new("0xabc")).await.unwrap();
        let err = session.delete("QmNever", true).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to delete file");
        assert!(err.detail().contains("404"));
    }

    #[tokio::test]
    async fn fetch_failure_empties_list() {
        let api = FakeApi { fail_list: true, ..Default::default() };
        let mut session = VaultSession::new(api);
        session.connect(&StaticWallet::new("0xabc")).await.unwrap();
        assert!(session.docs().is_empty());
        assert_eq!(session.wallet(), Some("0xabc"));
    }

    #[tokio::test]
    async fn disconnect_resets_state() {
        let api = FakeApi::default();
        api.docs.lock().unwrap().push(("0xabc".into(), DocumentEntry::new("a.pdf", "Qm1")));
        let mut session = VaultSession::new(api);
        session.connect(&StaticWallet::new("0xabc")).await.unwrap();
        session.select_file(SelectedFile::new("b.pdf", vec![1, 2, 3]));

        session.disconnect();
        assert!(session.wallet().is_none());
        assert!(session.docs().is_empty());
        assert!(session.selected_file().is_none());
    }
}
