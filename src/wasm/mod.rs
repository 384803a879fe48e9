//! WASM module: the vault client in the browser
//!
//! Wraps [`crate::client::VaultSession`] for JavaScript:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           WasmVault (JS API)            │
//! │  connect, upload, deleteDocument, docs  │
//! └─────────┬───────────────────┬───────────┘
//!           │                   │
//! ┌─────────▼─────────┐ ┌───────▼───────────┐
//! │  EthereumWallet   │ │  ApiClient        │
//! │  window.ethereum  │ │  fetch (reqwest)  │
//! └───────────────────┘ └───────────────────┘
//! ```

mod app;
mod ethereum;

pub use app::WasmVault;
pub use ethereum::EthereumWallet;

use wasm_bindgen::prelude::*;

/// Initialize WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Log to browser console
pub fn console_log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

macro_rules! log {
    ($($t:tt)*) => {
        crate::wasm::console_log(&format!($($t)*))
    }
}

pub(crate) use log;
