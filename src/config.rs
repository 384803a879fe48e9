//! Vault configuration - read from the process environment

use crate::core::paths::{self, env};
use crate::error::ConfigError;
use crate::pinning::PinataCredentials;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Mongo,
    Memory,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Mongo => "mongo",
            StoreBackend::Memory => "memory",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Some(StoreBackend::Mongo),
            "memory" | "mem" => Some(StoreBackend::Memory),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinningBackend {
    #[default]
    Pinata,
    Memory,
}

impl PinningBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            PinningBackend::Pinata => "pinata",
            PinningBackend::Memory => "memory",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pinata" => Some(PinningBackend::Pinata),
            "memory" | "mem" => Some(PinningBackend::Memory),
            _ => None,
        }
    }
}

/// Server configuration. `from_env` for the binary, builders for tests.
#[derive(Debug, Clone)]
pub struct VaultConfig {
    pub port: u16,
    pub store: StoreBackend,
    pub mongo_uri: Option<String>,
    pub mongo_db: Option<String>,
    pub pinning: PinningBackend,
    pub pinata: Option<PinataCredentials>,
    pub pinata_url: String,
    pub body_limit: usize,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            port: paths::DEFAULT_PORT,
            store: StoreBackend::default(),
            mongo_uri: None,
            mongo_db: None,
            pinning: PinningBackend::default(),
            pinata: None,
            pinata_url: paths::pinata::BASE_URL.to_string(),
            body_limit: paths::DEFAULT_BODY_LIMIT,
        }
    }
}

impl VaultConfig {
    /// In-process backends only; nothing external is contacted.
    pub fn in_memory() -> Self {
        Self { store: StoreBackend::Memory, pinning: PinningBackend::Memory, ..Default::default() }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(port) = get(env::PORT) {
            config.port = port.parse().map_err(|_| ConfigError::Invalid { var: env::PORT, value: port })?;
        }
        if let Some(store) = get(env::STORE) {
            config.store = StoreBackend::parse(&store).ok_or(ConfigError::Invalid { var: env::STORE, value: store })?;
        }
        if let Some(pinning) = get(env::PINNING) {
            config.pinning =
                PinningBackend::parse(&pinning).ok_or(ConfigError::Invalid { var: env::PINNING, value: pinning })?;
        }
        if let Some(limit) = get(env::BODY_LIMIT) {
            config.body_limit =
                limit.parse().map_err(|_| ConfigError::Invalid { var: env::BODY_LIMIT, value: limit })?;
        }
        if let Some(url) = get(env::PINATA_API_URL) {
            config.pinata_url = url;
        }
        config.mongo_uri = get(env::MONGO_URI);
        config.mongo_db = get(env::MONGO_DB);
        config.pinata = match (get(env::PINATA_API_KEY), get(env::PINATA_API_SECRET)) {
            (Some(key), Some(secret)) => Some(PinataCredentials::new(key, secret)),
            _ => None,
        };

        config.validate()?;
        Ok(config)
    }

    /// Required settings for the selected backends.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store == StoreBackend::Mongo && self.mongo_uri.is_none() {
            return Err(ConfigError::Missing(env::MONGO_URI));
        }
        if self.pinning == PinningBackend::Pinata {
            match &self.pinata {
                None => return Err(ConfigError::Missing(env::PINATA_API_KEY)),
                Some(creds) if creds.api_secret.is_empty() => return Err(ConfigError::Missing(env::PINATA_API_SECRET)),
                Some(_) => {}
            }
        }
        Ok(())
    }

    pub fn with_port(mut self, port: u16) -> Self { self.port = port; self }
    pub fn with_store(mut self, store: StoreBackend) -> Self { self.store = store; self }
    pub fn with_pinning(mut self, pinning: PinningBackend) -> Self { self.pinning = pinning; self }
    pub fn with_mongo(mut self, uri: impl Into<String>, db: Option<String>) -> Self {
        self.store = StoreBackend::Mongo;
        self.mongo_uri = Some(uri.into());
        self.mongo_db = db;
        self
    }
    pub fn with_pinata(mut self, credentials: PinataCredentials) -> Self {
        self.pinning = PinningBackend::Pinata;
        self.pinata = Some(credentials);
        self
    }
    pub fn with_pinata_url(mut self, url: impl Into<String>) -> Self { self.pinata_url = url.into(); self }
    pub fn with_body_limit(mut self, limit: usize) -> Self { self.body_limit = limit; self }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use std::collections::HashMap;
    use std::sync::Mutex;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn full_environment_parses() {
        let config = VaultConfig::from_lookup(lookup(&[
            ("MONGO_URI", "mongodb://localhost:27017/vault"),
            ("PINATA_API_KEY", "key"),
            ("PINATA_API_SECRET", "secret"),
            ("PORT", "5050"),
        ]))
        .unwrap();
        assert_eq!(config.port, 5050);
        assert_eq!(config.store, StoreBackend::Mongo);
        assert_eq!(config.pinning, PinningBackend::Pinata);
        assert_eq!(config.mongo_uri.as_deref(), Some("mongodb://localhost:27017/vault"));
        assert_eq!(config.pinata, Some(PinataCredentials::new("key", "secret")));
        assert_eq!(config.body_limit, 50 * 1024 * 1024);
    }

    #[test]
    fn port_defaults_to_4000() {
        let config = VaultConfig::from_lookup(lookup(&[("DIGIDOCK_STORE", "memory"), ("DIGIDOCK_PINNING", "memory")]))
            .unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.listen_addr(), "0.0.0.0:4000");
    }

    #[test]
    fn missing_credentials_are_reported() {
        let err = VaultConfig::from_lookup(lookup(&[("PINATA_API_KEY", "k"), ("PINATA_API_SECRET", "s")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("MONGO_URI")));

        let err = VaultConfig::from_lookup(lookup(&[("MONGO_URI", "mongodb://x"), ("PINATA_API_KEY", "k")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("PINATA_API_KEY")));
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = VaultConfig::from_lookup(lookup(&[("PORT", "eighty"), ("DIGIDOCK_STORE", "memory")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "PORT", .. }));

        let err = VaultConfig::from_lookup(lookup(&[("DIGIDOCK_STORE", "postgres")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "DIGIDOCK_STORE", .. }));
    }

    #[test]
    fn from_env_reads_process_environment() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());
        std::env::set_var("DIGIDOCK_STORE", "memory");
        std::env::set_var("DIGIDOCK_PINNING", "memory");
        std::env::set_var("PORT", "4100");
        let config = VaultConfig::from_env().unwrap();
        std::env::remove_var("DIGIDOCK_STORE");
        std::env::remove_var("DIGIDOCK_PINNING");
        std::env::remove_var("PORT");

        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.pinning, PinningBackend::Memory);
        assert_eq!(config.port, 4100);
    }

    #[test]
    fn builders_select_backends() {
        let config = VaultConfig::default()
            .with_mongo("mongodb://db:27017", Some("vault".into()))
            .with_pinata(PinataCredentials::new("k", "s"))
            .with_pinata_url("http://pinata.local")
            .with_body_limit(1024)
            .with_port(8080);
        config.validate().unwrap();
        assert_eq!(config.store, StoreBackend::Mongo);
        assert_eq!(config.mongo_db.as_deref(), Some("vault"));
        assert_eq!(config.pinning, PinningBackend::Pinata);
        assert_eq!(config.pinata_url, "http://pinata.local");
        assert_eq!(config.body_limit, 1024);
        assert_eq!(config.listen_addr(), "0.0.0.0:8080");

        let config = config.with_pinning(PinningBackend::Memory).with_store(StoreBackend::Memory);
        config.validate().unwrap();
        assert_eq!(config.pinning, PinningBackend::Memory);
    }

    #[test]
    fn pinata_without_credentials_is_invalid() {
        let config = VaultConfig::in_memory().with_pinning(PinningBackend::Pinata);
        assert!(matches!(config.validate(), Err(ConfigError::Missing("PINATA_API_KEY"))));

        let config = VaultConfig::in_memory().with_pinata(PinataCredentials::new("k", ""));
        assert!(matches!(config.validate(), Err(ConfigError::Missing("PINATA_API_SECRET"))));
    }

    #[test]
    fn backend_names_roundtrip() {
        for backend in [StoreBackend::Mongo, StoreBackend::Memory] {
            assert_eq!(StoreBackend::parse(backend.as_str()), Some(backend));
        }
        for backend in [PinningBackend::Pinata, PinningBackend::Memory] {
            assert_eq!(PinningBackend::parse(backend.as_str()), Some(backend));
        }
    }
}
