//! DigiDock: a wallet-keyed document vault.
//!
//! Files are pinned to IPFS through a pinning provider and recorded under the
//! uploader's wallet address in a document store.
//!
//! # Architecture
//!
//! ```text
//! Client (CLI / browser)
//!   │  VaultSession ── WalletProvider
//!   │       │
//!   │       └── ApiClient ──HTTP──┐
//!   │                             ▼
//! Server (axum)              create_router
//!   │                             │
//!   └── Vault ────────────────────┘
//!         ├── PinningProvider  (Pinata, in-memory)
//!         └── DocumentStore    (MongoDB, in-memory)
//! ```
//!
//! # Routes
//!
//! | Route | Method | Description |
//! |-------|--------|-------------|
//! | `/` | GET | Liveness text |
//! | `/upload` | POST | Pin a base64 file and record it |
//! | `/docs/:walletAddress` | GET | List a wallet's documents |
//! | `/docs/:walletAddress/:ipfsHash` | DELETE | Unpin and remove a document |
//!
//! # Features
//!
//! - `native` - Server, CLI, MongoDB and Pinata (default)
//! - `wasm` - Browser client bindings (wasm-bindgen, `window.ethereum`)
//!
//! # Usage
//!
//! ```ignore
//! use digidock::{create_router, Vault, VaultConfig};
//!
//! let config = VaultConfig::from_env()?;
//! let vault = Vault::connect(&config).await?;
//! let app = create_router(std::sync::Arc::new(vault));
//! ```

// =============================================================================
// Shared modules (compile everywhere)
// =============================================================================
pub mod client;
pub mod core;
pub mod error;

// =============================================================================
// Native-only modules (server, CLI, database, tokio)
// =============================================================================
#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod logging;
#[cfg(feature = "native")]
pub mod pinning;
#[cfg(feature = "native")]
pub mod runtime;
#[cfg(feature = "native")]
pub mod server;
#[cfg(feature = "native")]
pub mod store;
#[cfg(feature = "native")]
pub mod vault;

// =============================================================================
// WASM-only modules (browser, wasm-bindgen)
// =============================================================================
#[cfg(feature = "wasm")]
pub mod wasm;

// =============================================================================
// Re-exports: Shared
// =============================================================================
pub use client::{ApiClient, Notice, SelectedFile, StaticWallet, VaultApi, VaultSession, WalletProvider};
pub use core::model::{DocumentEntry, UploadRequest, WalletDocumentRecord};
pub use error::{ClientError, VaultError};

// =============================================================================
// Re-exports: Native
// =============================================================================
#[cfg(feature = "native")]
pub use config::{PinningBackend, StoreBackend, VaultConfig};
#[cfg(feature = "native")]
pub use error::{ConfigError, PinningError, StartupError, StoreError};
#[cfg(feature = "native")]
pub use pinning::{MemoryPinning, PinMetadata, PinataClient, PinataCredentials, PinningProvider};
#[cfg(feature = "native")]
pub use runtime::{install_signal_handlers, Shutdown};
#[cfg(feature = "native")]
pub use server::{create_router, create_router_with_limit};
#[cfg(feature = "native")]
pub use store::{DocumentStore, MemoryStore, MongoStore};
#[cfg(feature = "native")]
pub use vault::Vault;

// =============================================================================
// Re-exports: WASM
// =============================================================================
#[cfg(feature = "wasm")]
pub use wasm::{EthereumWallet, WasmVault};
