//! HTTP transport seam.
//!
//! The client builds a fully-formed [`HttpRequest`] and hands it to an
//! [`HttpTransport`]. The default implementation, [`ReqwestTransport`], is
//! backed by a pooled `reqwest::Client`; tests substitute their own.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;

use crate::api::error::ApiError;

/// Content type used for POST bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP method accepted by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    Get,
    #[default]
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = ApiError;

    /// Method names are matched exactly (`"GET"`, `"POST"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            other => Err(ApiError::InvalidMethod(other.to_string())),
        }
    }
}

/// A fully-built outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Form-encoded body; `None` for GET.
    pub body: Option<String>,
    /// Deadline for the whole round trip.
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            timeout,
        }
    }

    /// Set a header, replacing any existing value (names compare case-insensitively).
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
    }

    /// Look up a header value (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Query string portion of the URL, if any.
    pub fn query(&self) -> Option<&str> {
        self.url.split_once('?').map(|(_, q)| q)
    }
}

/// A received response: status code and unparsed body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Executes one HTTP round trip.
///
/// Implementations return `Err` with a human-readable message for failures
/// below the HTTP layer (connection, DNS, TLS, timeout). Any received
/// response, whatever its status, is `Ok`.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, String>;
}

/// `reqwest`-backed transport.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl ReqwestTransport {
    /// Create a transport with a pooled connection client.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };

        let mut req = self
            .client
            .request(method, &request.url)
            .timeout(request.timeout);
        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            req = req.body(body);
        }

        let resp = req.send().await.map_err(|e| e.to_string())?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await.map_err(|e| e.to_string())?;
        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse_is_exact() {
        assert_eq!("GET".parse::<Method>().unwrap(), Method::Get);
        assert_eq!("POST".parse::<Method>().unwrap(), Method::Post);
        assert!(matches!("PUT".parse::<Method>(), Err(ApiError::InvalidMethod(m)) if m == "PUT"));
        assert!("get".parse::<Method>().is_err());
    }

    #[test]
    fn test_method_default_is_post() {
        assert_eq!(Method::default(), Method::Post);
    }

    #[test]
    fn test_set_header_replaces_case_insensitively() {
        let mut req = HttpRequest::new(Method::Post, "https://x/api", Duration::from_secs(5));
        req.set_header("Content-type", "text/plain");
        req.set_header("content-type", FORM_CONTENT_TYPE);
        assert_eq!(req.headers.len(), 1);
        assert_eq!(req.header("CONTENT-TYPE"), Some(FORM_CONTENT_TYPE));
    }

    #[test]
    fn test_query() {
        let req = HttpRequest::new(Method::Get, "https://x/api/thumb?a=1&b=2", Duration::ZERO);
        assert_eq!(req.query(), Some("a=1&b=2"));
        let req = HttpRequest::new(Method::Get, "https://x/api/thumb", Duration::ZERO);
        assert_eq!(req.query(), None);
    }
}
