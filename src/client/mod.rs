//! Client: wallet connection, vault API calls and UI state.
//!
//! Platform-neutral; the CLI drives it natively and [`crate::wasm`] wraps it
//! for the browser.
//!
//! ```text
//! VaultSession ──► WalletProvider (requestAccounts)
//!      │
//!      └────────► VaultApi ──► ApiClient (reqwest) ──► server
//! ```

mod api;
mod format;
mod session;
mod wallet;

pub use api::{ApiClient, VaultApi};
pub use format::{format_file_size, gateway_url, truncate_address, truncate_hash};
pub use session::{Notice, SelectedFile, VaultSession};
pub use wallet::{StaticWallet, WalletProvider};
