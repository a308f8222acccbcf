//! Earth Engine data API client implementation.
//!
//! The [`EarthEngineClient`] wraps one HTTP backend. Every operation builds a
//! form-encoded parameter set, sends it to a fixed path, checks the status,
//! and unwraps the JSON envelope (or returns the raw body for images).
//!
//! # Example
//!
//! ```rust,ignore
//! use earthengine_data::api::EarthEngineClient;
//! use earthengine_data::api::types::VisParams;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EarthEngineClient::builder()
//!         .bearer_token(std::env::var("EE_ACCESS_TOKEN")?)
//!         .build()?;
//!
//!     let info = client.get_info("srtm90_v4").await?;
//!     println!("{}", info);
//!
//!     let map_id = client.get_map_id(VisParams::new(r#""srtm90_v4""#)).await?;
//!     println!("{}", client.tile_url(&map_id, 0, 0, 0)?);
//!
//!     Ok(())
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::envelope::unwrap_envelope;
use crate::api::error::{ApiError, ApiResult};
use crate::api::params::{ParamValue, Params};
use crate::api::transport::{HttpRequest, HttpResponse, HttpTransport, Method, FORM_CONTENT_TYPE};
use crate::api::types::{Algorithm, DownloadId, MapId, ThumbId};
use crate::api::urls;
use crate::auth::{BearerToken, Credentials};
use crate::config::{ClientConfig, ConfigOverrides};
use crate::network::DEFAULT_DEADLINE;

/// Parameter naming the response schema version.
pub const JSON_FORMAT_KEY: &str = "json_format";

/// Response schema version requested from the server.
pub const JSON_FORMAT: &str = "v2";

/// Parameter asking /thumb for an ID instead of image bytes.
pub const GET_ID_KEY: &str = "getid";

/// Builder for configuring [`EarthEngineClient`].
pub struct EarthEngineClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn HttpTransport>>,
    default_deadline: Duration,
}

impl Default for EarthEngineClientBuilder {
    fn default() -> Self {
        Self {
            config: ClientConfig::with_defaults(),
            transport: None,
            default_deadline: DEFAULT_DEADLINE,
        }
    }
}

impl fmt::Debug for EarthEngineClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EarthEngineClientBuilder")
            .field("config", &self.config)
            .field("has_transport", &self.transport.is_some())
            .field("default_deadline", &self.default_deadline)
            .finish()
    }
}

impl EarthEngineClientBuilder {
    /// Create a builder starting from the default URLs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    ///
    /// Later `api_base_url`/`tile_base_url`/`credentials` calls merge into it.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the API base URL.
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.config
            .initialize(ConfigOverrides::new().api_base_url(url));
        self
    }

    /// Set the base URL for tiles, thumbnails and downloads.
    pub fn tile_base_url(mut self, url: impl Into<String>) -> Self {
        self.config
            .initialize(ConfigOverrides::new().tile_base_url(url));
        self
    }

    /// Authorize every request with `credentials`.
    pub fn credentials(mut self, credentials: impl Credentials + 'static) -> Self {
        self.config
            .initialize(ConfigOverrides::new().credentials(credentials));
        self
    }

    /// Shorthand for [`BearerToken`] credentials.
    pub fn bearer_token(self, token: impl Into<String>) -> Self {
        self.credentials(BearerToken::new(token))
    }

    /// Use a custom transport instead of the default `reqwest` one.
    pub fn transport(mut self, transport: impl HttpTransport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Use a transport already shared with other clients.
    pub fn shared_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Deadline used when a call does not set one.
    pub fn default_deadline(mut self, deadline: Duration) -> Self {
        self.default_deadline = deadline;
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the configuration is uninitialized or
    /// missing a base URL, or if no transport is available.
    pub fn build(self) -> ApiResult<EarthEngineClient> {
        if !self.config.is_initialized() {
            return Err(ApiError::Config(
                "configuration has not been initialized".to_string(),
            ));
        }
        let api_base_url = self
            .config
            .api_base_url()
            .ok_or_else(|| ApiError::Config("API base URL is not set".to_string()))?
            .to_string();
        let tile_base_url = self
            .config
            .tile_base_url()
            .ok_or_else(|| ApiError::Config("tile base URL is not set".to_string()))?
            .to_string();

        let transport = match self.transport {
            Some(t) => t,
            None => default_transport()?,
        };

        Ok(EarthEngineClient {
            transport,
            credentials: self.config.credentials().cloned(),
            api_base_url,
            tile_base_url,
            default_deadline: self.default_deadline,
        })
    }
}

#[cfg(feature = "http")]
fn default_transport() -> ApiResult<Arc<dyn HttpTransport>> {
    Ok(Arc::new(crate::api::transport::ReqwestTransport::new()?))
}

#[cfg(not(feature = "http"))]
fn default_transport() -> ApiResult<Arc<dyn HttpTransport>> {
    Err(ApiError::Config(
        "no transport configured and the `http` feature is disabled".to_string(),
    ))
}

/// Earth Engine data API client.
///
/// Cheap to clone; clones share the transport and credentials.
#[derive(Clone)]
pub struct EarthEngineClient {
    transport: Arc<dyn HttpTransport>,
    credentials: Option<Arc<dyn Credentials>>,
    api_base_url: String,
    tile_base_url: String,
    default_deadline: Duration,
}

impl fmt::Debug for EarthEngineClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EarthEngineClient")
            .field("api_base_url", &self.api_base_url)
            .field("tile_base_url", &self.tile_base_url)
            .field("default_deadline", &self.default_deadline)
            .field("has_credentials", &self.credentials.is_some())
            .finish_non_exhaustive()
    }
}

impl EarthEngineClient {
    /// Create a client builder for custom configuration.
    pub fn builder() -> EarthEngineClientBuilder {
        EarthEngineClientBuilder::new()
    }

    /// Create a client from an existing configuration.
    ///
    /// # Errors
    ///
    /// Fails if `config` was never initialized or lacks a base URL.
    pub fn from_config(config: &ClientConfig) -> ApiResult<Self> {
        EarthEngineClientBuilder::new().config(config.clone()).build()
    }

    /// Get the API base URL.
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Get the tile base URL.
    pub fn tile_base_url(&self) -> &str {
        &self.tile_base_url
    }

    /// Deadline applied to calls that do not set their own.
    pub fn default_deadline(&self) -> Duration {
        self.default_deadline
    }

    /// Check whether requests are authorized.
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    // =========================================================================
    // Send
    // =========================================================================

    /// Send an API call and return the envelope's `data`.
    ///
    /// `method` must be exactly `"GET"` or `"POST"`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidMethod`] for any other method, before any I/O
    /// - [`ApiError::Transport`] if the request could not be completed
    /// - [`ApiError::HttpStatus`] for a status other than 200
    /// - [`ApiError::MalformedJson`], [`ApiError::Server`] or
    ///   [`ApiError::MissingData`] for a bad envelope
    pub async fn send(&self, path: &str, params: Params, method: &str) -> ApiResult<Value> {
        let method: Method = method.parse()?;
        self.send_json(path, params, method).await
    }

    /// Send an API call and return the body unparsed.
    pub async fn send_raw(&self, path: &str, params: Params, method: &str) -> ApiResult<Vec<u8>> {
        let method: Method = method.parse()?;
        Ok(self.execute(path, params, method).await?.body)
    }

    /// Build the outgoing request without sending it.
    ///
    /// Resolves the deadline, form-encodes the parameters into the query
    /// string (GET) or body (POST), and applies credentials.
    pub fn build_request(
        &self,
        path: &str,
        mut params: Params,
        method: Method,
    ) -> ApiResult<HttpRequest> {
        let timeout = params.take_deadline(self.default_deadline)?;
        let payload = params.encode()?;
        let url = urls::join(&self.api_base_url, path);

        let mut request = match method {
            Method::Get => HttpRequest::new(Method::Get, format!("{}?{}", url, payload), timeout),
            Method::Post => {
                let mut request = HttpRequest::new(Method::Post, url, timeout);
                request.set_header("Content-type", FORM_CONTENT_TYPE);
                request.body = Some(payload);
                request
            }
        };

        if let Some(credentials) = &self.credentials {
            credentials.authorize(&mut request)?;
        }

        Ok(request)
    }

    async fn send_json(&self, path: &str, params: Params, method: Method) -> ApiResult<Value> {
        let response = self.execute(path, params, method).await?;
        unwrap_envelope(&response.body).inspect_err(|e| {
            tracing::warn!(path, error = %e, "Request returned an unusable envelope");
        })
    }

    async fn send_typed<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Params,
        method: Method,
    ) -> ApiResult<T> {
        let data = self.send_json(path, params, method).await?;
        serde_json::from_value(data)
            .map_err(|e| ApiError::Deserialize(format!("Unexpected data from {}: {}", path, e)))
    }

    async fn execute(&self, path: &str, params: Params, method: Method) -> ApiResult<HttpResponse> {
        let request = self.build_request(path, params, method)?;
        tracing::debug!(
            method = %method,
            path,
            timeout_ms = request.timeout.as_millis() as u64,
            "Sending request"
        );

        let response = self
            .transport
            .execute(request)
            .await
            .map_err(ApiError::Transport)?;

        tracing::debug!(path, status = response.status, bytes = response.body.len(), "Received response");
        if response.status != 200 {
            tracing::warn!(path, status = response.status, "Server returned non-200 status");
            return Err(ApiError::HttpStatus(response.status));
        }

        Ok(response)
    }

    // =========================================================================
    // Asset endpoints
    // =========================================================================

    /// Load info for an asset.
    pub async fn get_info(&self, asset_id: &str) -> ApiResult<Value> {
        let params = Params::new().with("id", asset_id);
        self.send_json("/info", params, Method::Post).await
    }

    /// List the contents of a collection asset.
    pub async fn get_list(&self, asset_id: &str) -> ApiResult<Value> {
        let params = Params::new().with("asset_id", asset_id);
        self.send_json("/list", params, Method::Post).await
    }

    /// Save an asset.
    ///
    /// `value` is sent as its JSON text. `path` is the desired ID, including
    /// its full path; the server generates one if omitted.
    pub async fn create_asset(&self, value: &Value, path: Option<&str>) -> ApiResult<Value> {
        let mut params = Params::new()
            .with("value", value.to_string())
            .with(JSON_FORMAT_KEY, JSON_FORMAT);
        if let Some(path) = path {
            params.insert("id", path);
        }
        self.send_json("/create", params, Method::Post).await
    }

    // =========================================================================
    // Computation endpoints
    // =========================================================================

    /// Evaluate an expression (`json` parameter) and return its value.
    pub async fn get_value(&self, params: impl Into<Params>) -> ApiResult<Value> {
        let params = with_json_format(params.into());
        self.send_json("/value", params, Method::Post).await
    }

    /// List available algorithms keyed by name.
    pub async fn get_algorithms(&self) -> ApiResult<BTreeMap<String, Algorithm>> {
        self.send_typed("/algorithms", Params::new(), Method::Get)
            .await
    }

    // =========================================================================
    // Media endpoints
    // =========================================================================

    /// Get a Map ID for rendering tiles.
    pub async fn get_map_id(&self, params: impl Into<Params>) -> ApiResult<MapId> {
        let params = with_json_format(params.into());
        self.send_typed("/mapid", params, Method::Post).await
    }

    /// Render a thumbnail and return the image bytes.
    pub async fn get_thumbnail(&self, params: impl Into<Params>) -> ApiResult<Vec<u8>> {
        Ok(self
            .execute("/thumb", params.into(), Method::Get)
            .await?
            .body)
    }

    /// Get a Thumbnail ID for later use with [`EarthEngineClient::thumb_url`].
    ///
    /// A list-valued `size` is sent as `WIDTHxHEIGHT`.
    pub async fn get_thumb_id(&self, params: impl Into<Params>) -> ApiResult<ThumbId> {
        self.send_typed("/thumb", thumb_id_params(params.into()), Method::Post)
            .await
    }

    /// Get a Download ID for later use with [`EarthEngineClient::download_url`].
    pub async fn get_download_id(&self, params: impl Into<Params>) -> ApiResult<DownloadId> {
        let params = with_json_format(params.into());
        self.send_typed("/download", params, Method::Post).await
    }

    // =========================================================================
    // URL helpers
    // =========================================================================

    /// Tile URL for `map_id`; `x` wraps around at zoom `z`.
    pub fn tile_url(&self, map_id: &MapId, x: i64, y: i64, z: u32) -> ApiResult<String> {
        urls::tile_url(&self.tile_base_url, map_id, x, y, z)
    }

    /// URL from which the thumbnail can be fetched.
    pub fn thumb_url(&self, thumb_id: &ThumbId) -> String {
        urls::thumb_url(&self.tile_base_url, thumb_id)
    }

    /// URL from which the download can be fetched.
    pub fn download_url(&self, download_id: &DownloadId) -> String {
        urls::download_url(&self.tile_base_url, download_id)
    }
}

fn with_json_format(mut params: Params) -> Params {
    params.insert(JSON_FORMAT_KEY, JSON_FORMAT);
    params
}

/// Parameters for /thumb in ID mode.
pub(crate) fn thumb_id_params(params: Params) -> Params {
    let mut request = with_json_format(params).with(GET_ID_KEY, "1");
    if let Some(ParamValue::List(dims)) = request.get("size") {
        let joined = dims.join("x");
        request.insert("size", joined);
    }
    request
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{DEFAULT_API_BASE_URL, DEFAULT_TILE_BASE_URL};
    use async_trait::async_trait;

    struct NoopTransport;

    #[async_trait]
    impl HttpTransport for NoopTransport {
        async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, String> {
            Err("offline".to_string())
        }
    }

    fn client() -> EarthEngineClient {
        EarthEngineClient::builder()
            .api_base_url("https://api.example.com/api/")
            .transport(NoopTransport)
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_debug_hides_credentials() {
        let builder = EarthEngineClient::builder()
            .bearer_token("secret")
            .transport(NoopTransport);
        let debug = format!("{:?}", builder);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("has_transport: true"));
    }

    #[test]
    fn test_builder_defaults() {
        let client = EarthEngineClient::builder()
            .transport(NoopTransport)
            .build()
            .unwrap();
        assert_eq!(client.api_base_url(), DEFAULT_API_BASE_URL);
        assert_eq!(client.tile_base_url(), DEFAULT_TILE_BASE_URL);
        assert_eq!(client.default_deadline(), Duration::from_secs(30));
        assert!(!client.has_credentials());
    }

    #[test]
    fn test_builder_keeps_url_as_given() {
        let client = client();
        assert_eq!(client.api_base_url(), "https://api.example.com/api/");
        let request = client
            .build_request("/list", Params::new(), Method::Get)
            .unwrap();
        assert_eq!(request.url, "https://api.example.com/api/list?");
    }

    #[test]
    fn test_from_uninitialized_config_fails() {
        let err = EarthEngineClient::builder()
            .config(ClientConfig::new())
            .transport(NoopTransport)
            .build()
            .unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn test_build_post_request() {
        let request = client()
            .build_request("/info", Params::new().with("id", "a b"), Method::Post)
            .unwrap();
        assert_eq!(request.url, "https://api.example.com/api/info");
        assert_eq!(request.body.as_deref(), Some("id=a+b"));
        assert_eq!(request.header("content-type"), Some(FORM_CONTENT_TYPE));
        assert_eq!(request.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_build_get_request() {
        let request = client()
            .build_request("/thumb", Params::new().with("format", "png"), Method::Get)
            .unwrap();
        assert_eq!(request.url, "https://api.example.com/api/thumb?format=png");
        assert!(request.body.is_none());
        assert!(request.header("content-type").is_none());
    }

    #[test]
    fn test_deadline_not_encoded() {
        let params = Params::new().with("id", "x").with("deadline", 5);
        let request = client().build_request("/info", params, Method::Post).unwrap();
        assert_eq!(request.timeout, Duration::from_secs(5));
        assert_eq!(request.body.as_deref(), Some("id=x"));
    }

    #[test]
    fn test_credentials_applied() {
        let client = EarthEngineClient::builder()
            .bearer_token("tok")
            .transport(NoopTransport)
            .build()
            .unwrap();
        let request = client
            .build_request("/list", Params::new(), Method::Post)
            .unwrap();
        assert_eq!(request.header("Authorization"), Some("Bearer tok"));
    }

    #[test]
    fn test_thumb_id_params_joins_size() {
        let params = thumb_id_params(Params::new().with("size", vec![100, 200]));
        assert_eq!(params.get("size").unwrap().as_text(), Some("100x200"));
        assert_eq!(params.get(GET_ID_KEY).unwrap().as_text(), Some("1"));
        assert_eq!(params.get(JSON_FORMAT_KEY).unwrap().as_text(), Some("v2"));

        let params = thumb_id_params(Params::new().with("size", 300));
        assert_eq!(params.get("size").unwrap().as_text(), Some("300"));
    }

    #[test]
    fn test_url_helpers_use_tile_base() {
        let client = EarthEngineClient::builder()
            .tile_base_url("https://tiles.example.com/")
            .transport(NoopTransport)
            .build()
            .unwrap();
        assert_eq!(
            client.tile_url(&MapId::new("m", "t"), 8, 1, 3).unwrap(),
            "https://tiles.example.com/map/m/3/0/1?token=t"
        );
        assert_eq!(
            client.download_url(&DownloadId::new("d", "t")),
            "https://tiles.example.com/api/download?docid=d&token=t"
        );
    }
}
