//! WasmVault: JS-facing vault session

use std::cell::RefCell;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::ethereum::EthereumWallet;
use super::log;
use crate::client::{self, ApiClient, SelectedFile, VaultSession};
use crate::core::model::DocumentEntry;
use crate::core::paths::DEFAULT_SERVER_URL;
use crate::error::ClientError;

fn js_error(message: impl ToString) -> JsValue {
    JsValue::from_str(&message.to_string())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value.serialize(&serializer).map_err(js_error)
}

/// A document row ready for display.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentView<'a> {
    name: &'a str,
    ipfs_hash: &'a str,
    uploaded_at: String,
    short_hash: String,
    gateway_url: String,
}

impl<'a> From<&'a DocumentEntry> for DocumentView<'a> {
    fn from(doc: &'a DocumentEntry) -> Self {
        Self {
            name: &doc.name,
            ipfs_hash: &doc.content_identifier,
            uploaded_at: doc.uploaded_at.to_rfc3339(),
            short_hash: client::truncate_hash(&doc.content_identifier),
            gateway_url: client::gateway_url(&doc.content_identifier),
        }
    }
}

#[wasm_bindgen]
pub struct WasmVault {
    session: RefCell<VaultSession<ApiClient>>,
}

impl WasmVault {
    fn busy() -> JsValue {
        js_error("another vault operation is in progress")
    }
}

#[wasm_bindgen]
impl WasmVault {
    /// Create a session against `server_url` (defaults to the local server).
    #[wasm_bindgen(constructor)]
    pub fn new(server_url: Option<String>) -> Result<WasmVault, JsValue> {
        let url = server_url.unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        let api = ApiClient::new(&url).map_err(js_error)?;
        log!("[WasmVault] server {}", url);
        Ok(Self { session: RefCell::new(VaultSession::new(api)) })
    }

    /// Request accounts from `window.ethereum`; resolves to the connected address.
    #[wasm_bindgen]
    pub async fn connect(&self) -> Result<String, JsValue> {
        let mut session = self.session.try_borrow_mut().map_err(|_| Self::busy())?;
        session.connect(&EthereumWallet::new()).await.map_err(js_error)
    }

    #[wasm_bindgen]
    pub fn disconnect(&self) -> Result<(), JsValue> {
        self.session.try_borrow_mut().map_err(|_| Self::busy())?.disconnect();
        Ok(())
    }

    #[wasm_bindgen]
    pub async fn refresh(&self) -> Result<(), JsValue> {
        let mut session = self.session.try_borrow_mut().map_err(|_| Self::busy())?;
        session.refresh().await;
        Ok(())
    }

    #[wasm_bindgen(js_name = "selectFile")]
    pub fn select_file(&self, name: String, bytes: Vec<u8>) -> Result<(), JsValue> {
        let mut session = self.session.try_borrow_mut().map_err(|_| Self::busy())?;
        session.select_file(SelectedFile::new(name, bytes));
        Ok(())
    }

    /// Upload the selected file; resolves to the success message.
    #[wasm_bindgen]
    pub async fn upload(&self) -> Result<String, JsValue> {
        let mut session = self
            .session
            .try_borrow_mut()
            .map_err(|_| js_error(ClientError::UploadInProgress))?;
        let notice = session.upload().await.map_err(js_error)?;
        Ok(notice.to_string())
    }

    /// Ask the user to confirm, then delete. Resolves to the success message,
    /// or `undefined` when the user declined.
    #[wasm_bindgen(js_name = "deleteDocument")]
    pub async fn delete_document(&self, ipfs_hash: String) -> Result<Option<String>, JsValue> {
        let confirmed = web_sys::window()
            .map(|w| w.confirm_with_message("Are you sure you want to delete this file?").unwrap_or(false))
            .unwrap_or(false);
        let mut session = self.session.try_borrow_mut().map_err(|_| Self::busy())?;
        let notice = session.delete(&ipfs_hash, confirmed).await.map_err(js_error)?;
        Ok(notice.map(|n| n.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn wallet(&self) -> Option<String> {
        self.session.try_borrow().ok()?.wallet().map(str::to_string)
    }

    #[wasm_bindgen(getter, js_name = "shortWallet")]
    pub fn short_wallet(&self) -> Option<String> {
        self.wallet().map(|w| client::truncate_address(&w))
    }

    #[wasm_bindgen(getter, js_name = "isUploading")]
    pub fn is_uploading(&self) -> bool {
        // Borrowed mutably only while an operation is running.
        self.session.try_borrow().map(|s| s.is_uploading()).unwrap_or(true)
    }

    /// Selected file as `{name, size, displaySize}`, or `null`.
    #[wasm_bindgen(getter, js_name = "selectedFile")]
    pub fn selected_file(&self) -> Result<JsValue, JsValue> {
        let session = self.session.try_borrow().map_err(|_| Self::busy())?;
        match session.selected_file() {
            Some(file) => to_js(&serde_json::json!({
                "name": file.name,
                "size": file.size(),
                "displaySize": client::format_file_size(file.size()),
            })),
            None => Ok(JsValue::NULL),
        }
    }

    /// Documents as `[{name, ipfsHash, uploadedAt, shortHash, gatewayUrl}]`.
    #[wasm_bindgen(getter)]
    pub fn docs(&self) -> Result<JsValue, JsValue> {
        let session = self.session.try_borrow().map_err(|_| Self::busy())?;
        let views: Vec<DocumentView<'_>> = session.docs().iter().map(DocumentView::from).collect();
        to_js(&views)
    }
}

#[wasm_bindgen(js_name = "formatFileSize")]
pub fn format_file_size(bytes: f64) -> String {
    client::format_file_size(bytes.max(0.0) as u64)
}

#[wasm_bindgen(js_name = "truncateAddress")]
pub fn truncate_address(address: &str) -> String {
    client::truncate_address(address)
}

#[wasm_bindgen(js_name = "truncateHash")]
pub fn truncate_hash(hash: &str) -> String {
    client::truncate_hash(hash)
}

#[wasm_bindgen(js_name = "gatewayUrl")]
pub fn gateway_url(hash: &str) -> String {
    client::gateway_url(hash)
}

#[wasm_bindgen(js_name = "isWalletAvailable")]
pub fn is_wallet_available() -> bool {
    EthereumWallet::is_available()
}
