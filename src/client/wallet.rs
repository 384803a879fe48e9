//! Wallet providers: where the session gets its address from.

use crate::error::ClientError;
use async_trait::async_trait;

/// Source of wallet accounts (a browser extension, a configured address).
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait WalletProvider {
    /// Ask the wallet for its accounts; the first one is used.
    async fn request_accounts(&self) -> Result<Vec<String>, ClientError>;
}

/// Fixed accounts, e.g. from `--wallet` or `DIGIDOCK_WALLET`.
#[derive(Debug, Clone, Default)]
pub struct StaticWallet {
    accounts: Vec<String>,
}

impl StaticWallet {
    pub fn new(address: impl Into<String>) -> Self {
        Self { accounts: vec![address.into()] }
    }

    pub fn empty() -> Self { Self::default() }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl WalletProvider for StaticWallet {
    async fn request_accounts(&self) -> Result<Vec<String>, ClientError> {
        Ok(self.accounts.clone())
    }
}
