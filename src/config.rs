//! Client configuration.
//!
//! A [`ClientConfig`] holds credentials and the two base URLs. It starts
//! uninitialized; [`ClientConfig::initialize`] fills in what it is given
//! and, on the first call only, defaults for the rest. Later calls replace
//! only the fields they name. [`ClientConfig::reset`] clears everything.
//!
//! ```rust,ignore
//! use earthengine_data::config::{ClientConfig, ConfigOverrides};
//!
//! let mut config = ClientConfig::new();
//! config.initialize(ConfigOverrides::new().tile_base_url("https://tiles.example.com"));
//! config.initialize(ConfigOverrides::new().api_base_url("https://api.example.com/api"));
//! // both overrides are now in effect
//! ```

use std::fmt;
use std::sync::Arc;

use crate::auth::{BearerToken, Credentials};
use crate::network::{DEFAULT_API_BASE_URL, DEFAULT_TILE_BASE_URL};

/// Environment variable overriding the API base URL.
pub const ENV_API_BASE_URL: &str = "EE_API_BASE_URL";
/// Environment variable overriding the tile base URL.
pub const ENV_TILE_BASE_URL: &str = "EE_TILE_BASE_URL";
/// Environment variable holding an OAuth2 access token.
pub const ENV_ACCESS_TOKEN: &str = "EE_ACCESS_TOKEN";

/// Connection settings for an [`EarthEngineClient`](crate::api::EarthEngineClient).
#[derive(Clone, Default)]
pub struct ClientConfig {
    credentials: Option<Arc<dyn Credentials>>,
    api_base_url: Option<String>,
    tile_base_url: Option<String>,
    initialized: bool,
}

/// Fields supplied to [`ClientConfig::initialize`]. Unset means "not supplied".
#[derive(Clone, Default)]
pub struct ConfigOverrides {
    credentials: Option<Arc<dyn Credentials>>,
    api_base_url: Option<String>,
    tile_base_url: Option<String>,
}

impl ConfigOverrides {
    /// Overrides that supply nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Supply credentials.
    pub fn credentials(mut self, credentials: impl Credentials + 'static) -> Self {
        self.credentials = Some(Arc::new(credentials));
        self
    }

    /// Supply credentials already shared elsewhere.
    pub fn shared_credentials(mut self, credentials: Arc<dyn Credentials>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Supply the API base URL. Stored exactly as given.
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Supply the tile base URL. Stored exactly as given.
    pub fn tile_base_url(mut self, url: impl Into<String>) -> Self {
        self.tile_base_url = Some(url.into());
        self
    }
}

impl ClientConfig {
    /// An uninitialized configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// A configuration initialized with the default URLs and no credentials.
    pub fn with_defaults() -> Self {
        let mut config = Self::new();
        config.initialize(ConfigOverrides::new());
        config
    }

    /// Initialize from `EE_API_BASE_URL`, `EE_TILE_BASE_URL` and
    /// `EE_ACCESS_TOKEN`; unset variables fall back to defaults.
    pub fn from_env() -> Self {
        let mut overrides = ConfigOverrides::new();
        if let Some(url) = env_var(ENV_API_BASE_URL) {
            overrides = overrides.api_base_url(url);
        }
        if let Some(url) = env_var(ENV_TILE_BASE_URL) {
            overrides = overrides.tile_base_url(url);
        }
        if let Some(token) = env_var(ENV_ACCESS_TOKEN) {
            overrides = overrides.credentials(BearerToken::new(token));
        }

        let mut config = Self::new();
        config.initialize(overrides);
        config
    }

    /// Apply `overrides`.
    ///
    /// Supplied fields always replace the current value. Unsupplied URLs get
    /// their default only if this configuration was never initialized.
    pub fn initialize(&mut self, overrides: ConfigOverrides) {
        if let Some(credentials) = overrides.credentials {
            self.credentials = Some(credentials);
        }

        if let Some(url) = overrides.api_base_url {
            self.api_base_url = Some(url);
        } else if !self.initialized {
            self.api_base_url = Some(DEFAULT_API_BASE_URL.to_string());
        }

        if let Some(url) = overrides.tile_base_url {
            self.tile_base_url = Some(url);
        } else if !self.initialized {
            self.tile_base_url = Some(DEFAULT_TILE_BASE_URL.to_string());
        }

        self.initialized = true;
        tracing::debug!(
            api_base_url = ?self.api_base_url,
            tile_base_url = ?self.tile_base_url,
            has_credentials = self.credentials.is_some(),
            "Client configuration initialized"
        );
    }

    /// Clear credentials, both URLs and the initialized flag.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether [`ClientConfig::initialize`] has run since creation or the last reset.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Base URL for API calls.
    pub fn api_base_url(&self) -> Option<&str> {
        self.api_base_url.as_deref()
    }

    /// Base URL for tiles, thumbnails and downloads.
    pub fn tile_base_url(&self) -> Option<&str> {
        self.tile_base_url.as_deref()
    }

    /// Credentials applied to every request, if any.
    pub fn credentials(&self) -> Option<&Arc<dyn Credentials>> {
        self.credentials.as_ref()
    }

    /// Whether credentials are set.
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("credentials", &self.credentials.as_ref().map(|_| "<credentials>"))
            .field("api_base_url", &self.api_base_url)
            .field("tile_base_url", &self.tile_base_url)
            .field("initialized", &self.initialized)
            .finish()
    }
}

impl fmt::Debug for ConfigOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigOverrides")
            .field("credentials", &self.credentials.as_ref().map(|_| "<credentials>"))
            .field("api_base_url", &self.api_base_url)
            .field("tile_base_url", &self.tile_base_url)
            .finish()
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_uninitialized() {
        let config = ClientConfig::new();
        assert!(!config.is_initialized());
        assert!(config.api_base_url().is_none());
        assert!(config.tile_base_url().is_none());
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_first_initialize_applies_defaults() {
        let config = ClientConfig::with_defaults();
        assert!(config.is_initialized());
        assert_eq!(config.api_base_url(), Some(DEFAULT_API_BASE_URL));
        assert_eq!(config.tile_base_url(), Some(DEFAULT_TILE_BASE_URL));
    }

    #[test]
    fn test_reset_then_initialize_restores_defaults() {
        let mut config = ClientConfig::new();
        config.initialize(
            ConfigOverrides::new()
                .api_base_url("https://a.example.com/api")
                .credentials(BearerToken::new("t")),
        );
        config.reset();
        assert!(!config.is_initialized());
        assert!(config.api_base_url().is_none());
        assert!(config.tile_base_url().is_none());
        assert!(!config.has_credentials());

        config.initialize(ConfigOverrides::new());
        assert_eq!(config.api_base_url(), Some(DEFAULT_API_BASE_URL));
        assert_eq!(config.tile_base_url(), Some(DEFAULT_TILE_BASE_URL));
    }

    #[test]
    fn test_later_initialize_only_overrides_supplied_fields() {
        let mut config = ClientConfig::new();
        config.initialize(ConfigOverrides::new().tile_base_url("https://tiles.example.com/"));
        config.initialize(ConfigOverrides::new().api_base_url("https://api.example.com/api"));

        assert_eq!(config.api_base_url(), Some("https://api.example.com/api"));
        assert_eq!(config.tile_base_url(), Some("https://tiles.example.com/"));
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_credentials_kept_unless_passed() {
        let mut config = ClientConfig::new();
        config.initialize(ConfigOverrides::new().credentials(BearerToken::new("t")));
        config.initialize(ConfigOverrides::new().api_base_url("https://x/api"));
        assert!(config.has_credentials());
    }

    #[test]
    fn test_debug_hides_credentials() {
        let mut config = ClientConfig::new();
        config.initialize(ConfigOverrides::new().credentials(BearerToken::new("secret")));
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<credentials>"));
    }
}
