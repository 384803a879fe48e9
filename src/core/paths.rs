//! Route, environment and default constants
//!
//! Centralized registry shared by the server, the CLI and the browser client.

/// HTTP routes (axum path syntax)
pub mod routes {
    pub const ROOT: &str = "/";
    pub const HEALTH: &str = "/health";
    pub const UPLOAD: &str = "/upload";
    pub const DOCS: &str = "/docs/:wallet_address";
    pub const DOC: &str = "/docs/:wallet_address/:ipfs_hash";

    /// First path segment of the docs routes, for clients building URLs
    pub const DOCS_SEGMENT: &str = "docs";
    pub const UPLOAD_SEGMENT: &str = "upload";
}

/// Process environment variables
pub mod env {
    pub const MONGO_URI: &str = "MONGO_URI";
    pub const MONGO_DB: &str = "MONGO_DB";
    pub const PINATA_API_KEY: &str = "PINATA_API_KEY";
    pub const PINATA_API_SECRET: &str = "PINATA_API_SECRET";
    pub const PINATA_API_URL: &str = "PINATA_API_URL";
    pub const PORT: &str = "PORT";
    pub const STORE: &str = "DIGIDOCK_STORE";
    pub const PINNING: &str = "DIGIDOCK_PINNING";
    pub const BODY_LIMIT: &str = "DIGIDOCK_BODY_LIMIT";
    pub const LOG_JSON: &str = "DIGIDOCK_LOG_JSON";
    pub const SERVER: &str = "DIGIDOCK_SERVER";
    pub const WALLET: &str = "DIGIDOCK_WALLET";
}

/// Pinata endpoints
pub mod pinata {
    pub const BASE_URL: &str = "https://api.pinata.cloud";
    pub const PIN_FILE: &str = "/pinning/pinFileToIPFS";
    pub const UNPIN: &str = "/pinning/unpin";
    pub const API_KEY_HEADER: &str = "pinata_api_key";
    pub const API_SECRET_HEADER: &str = "pinata_secret_api_key";
}

pub const SERVICE_NAME: &str = "digidock";
pub const LIVENESS_TEXT: &str = "Decentralized Identity Vault API is running";

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_SERVER_URL: &str = "http://localhost:4000";
pub const DEFAULT_DATABASE: &str = "digidock";
pub const COLLECTION: &str = "documents";
pub const DEFAULT_BODY_LIMIT: usize = 50 * 1024 * 1024;

pub const GATEWAY_URL: &str = "https://ipfs.io/ipfs";
