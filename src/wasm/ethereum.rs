//! EthereumWallet: accounts from an injected `window.ethereum` provider.

use async_trait::async_trait;
use js_sys::{Function, Object, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use super::log;
use crate::client::WalletProvider;
use crate::error::ClientError;

const REQUEST_ACCOUNTS: &str = "eth_requestAccounts";

#[derive(Debug, Clone, Copy, Default)]
pub struct EthereumWallet;

impl EthereumWallet {
    pub fn new() -> Self { Self }

    /// Whether a provider is injected at all.
    pub fn is_available() -> bool {
        provider().is_some()
    }
}

fn provider() -> Option<JsValue> {
    let window = web_sys::window()?;
    let ethereum = Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
    if ethereum.is_undefined() || ethereum.is_null() {
        return None;
    }
    Some(ethereum)
}

fn rejected(value: JsValue) -> ClientError {
    let message = Reflect::get(&value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value));
    ClientError::WalletRejected(message)
}

#[async_trait(?Send)]
impl WalletProvider for EthereumWallet {
    async fn request_accounts(&self) -> Result<Vec<String>, ClientError> {
        let ethereum = provider().ok_or(ClientError::WalletUnavailable)?;
        let request: Function = Reflect::get(&ethereum, &JsValue::from_str("request"))
            .map_err(rejected)?
            .dyn_into()
            .map_err(|_| ClientError::WalletUnavailable)?;

        let args = Object::new();
        Reflect::set(&args, &JsValue::from_str("method"), &JsValue::from_str(REQUEST_ACCOUNTS)).map_err(rejected)?;

        let promise: Promise = request.call1(&ethereum, &args).map_err(rejected)?.dyn_into().map_err(rejected)?;
        let accounts = JsFuture::from(promise).await.map_err(rejected)?;
        let accounts: Vec<String> = serde_wasm_bindgen::from_value(accounts)
            .map_err(|e| ClientError::WalletRejected(e.to_string()))?;

        log!("[EthereumWallet] {} account(s)", accounts.len());
        Ok(accounts)
    }
}
