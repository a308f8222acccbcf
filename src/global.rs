//! Process-wide configuration.
//!
//! Some callers want module-level state: initialize once at startup, then
//! grab a client wherever one is needed. This module keeps a single
//! [`ClientConfig`] behind a lock for them. Code that can pass a config or
//! client around explicitly should do that instead.

use std::sync::{PoisonError, RwLock};

use lazy_static::lazy_static;

use crate::api::{ApiResult, EarthEngineClient};
use crate::config::{ClientConfig, ConfigOverrides};

lazy_static! {
    static ref CONFIG: RwLock<ClientConfig> = RwLock::new(ClientConfig::new());
}

/// Apply `overrides` to the shared configuration.
///
/// See [`ClientConfig::initialize`] for the merge rules.
pub fn initialize(overrides: ConfigOverrides) {
    CONFIG
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .initialize(overrides);
}

/// Clear the shared configuration.
pub fn reset() {
    CONFIG
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .reset();
}

/// Snapshot of the shared configuration.
pub fn config() -> ClientConfig {
    CONFIG
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Build a client from the shared configuration, initializing it with
/// defaults first if nothing has done so yet.
pub fn client() -> ApiResult<EarthEngineClient> {
    let snapshot = {
        let mut config = CONFIG.write().unwrap_or_else(PoisonError::into_inner);
        if !config.is_initialized() {
            config.initialize(ConfigOverrides::new());
        }
        config.clone()
    };
    EarthEngineClient::from_config(&snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests in this module share the global; run them one at a time.
    static LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_reset_and_initialize() {
        let _guard = LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        reset();
        assert!(!config().is_initialized());

        initialize(ConfigOverrides::new().tile_base_url("https://tiles.example.com"));
        initialize(ConfigOverrides::new().api_base_url("https://api.example.com/api"));
        let snapshot = config();
        assert_eq!(snapshot.api_base_url(), Some("https://api.example.com/api"));
        assert_eq!(snapshot.tile_base_url(), Some("https://tiles.example.com"));
        reset();
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_client_initializes_lazily() {
        let _guard = LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        reset();
        let client = client().unwrap();
        assert_eq!(client.api_base_url(), "https://earthengine.googleapis.com/api");
        assert!(config().is_initialized());
        reset();
    }
}
