//! Request authorization.
//!
//! The client never inspects credentials. Before each call it hands the
//! outgoing [`HttpRequest`] to the configured [`Credentials`] object, which
//! attaches whatever the backend expects (usually a bearer token header).
//!
//! Acquiring and refreshing tokens is left to the implementor.

use std::fmt;

use crate::api::error::{ApiError, ApiResult};
use crate::api::transport::HttpRequest;

/// A capability that can authorize outgoing requests.
pub trait Credentials: Send + Sync {
    /// Attach authorization to `request`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Auth`] if no valid authorization can be produced.
    fn authorize(&self, request: &mut HttpRequest) -> ApiResult<()>;
}

/// Static OAuth2 access token sent as `Authorization: Bearer <token>`.
#[derive(Clone)]
pub struct BearerToken {
    token: String,
}

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

// Token is never printed.
impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken").finish_non_exhaustive()
    }
}

impl Credentials for BearerToken {
    fn authorize(&self, request: &mut HttpRequest) -> ApiResult<()> {
        if self.token.is_empty() {
            return Err(ApiError::Auth("Access token is empty".to_string()));
        }
        request.set_header("Authorization", format!("Bearer {}", self.token));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::Method;
    use std::time::Duration;

    fn request() -> HttpRequest {
        HttpRequest::new(Method::Get, "https://example.com/api/info", Duration::from_secs(1))
    }

    #[test]
    fn test_bearer_token_sets_header() {
        let mut req = request();
        BearerToken::new("abc123").authorize(&mut req).unwrap();
        assert_eq!(req.header("authorization"), Some("Bearer abc123"));
    }

    #[test]
    fn test_empty_token_rejected() {
        let mut req = request();
        let err = BearerToken::new("").authorize(&mut req).unwrap_err();
        assert!(matches!(err, ApiError::Auth(_)));
        assert!(req.header("Authorization").is_none());
    }

    #[test]
    fn test_debug_hides_token() {
        let debug = format!("{:?}", BearerToken::new("secret"));
        assert!(!debug.contains("secret"));
    }
}
