//! Response envelope handling.
//!
//! Every non-raw response body is a JSON object carrying either `data` (the
//! payload) or `error` (a message from the server).

use serde_json::Value;

use crate::api::error::{ApiError, ApiResult};

/// Decode a response body and unwrap its `data` field.
///
/// `error` takes precedence over `data` when both are present.
pub fn unwrap_envelope(body: &[u8]) -> ApiResult<Value> {
    let content: Value =
        serde_json::from_slice(body).map_err(|e| ApiError::MalformedJson(e.to_string()))?;

    let raw = || String::from_utf8_lossy(body).into_owned();

    let Value::Object(mut fields) = content else {
        return Err(ApiError::MissingData(raw()));
    };

    if let Some(error) = fields.remove("error") {
        return Err(ApiError::Server(match error {
            Value::String(s) => s,
            other => other.to_string(),
        }));
    }

    match fields.remove("data") {
        Some(data) => Ok(data),
        None => Err(ApiError::MissingData(raw())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_returned() {
        let data = unwrap_envelope(br#"{"data": {"id": "abc"}}"#).unwrap();
        assert_eq!(data, json!({"id": "abc"}));
    }

    #[test]
    fn test_null_data_is_still_data() {
        assert_eq!(unwrap_envelope(br#"{"data": null}"#).unwrap(), Value::Null);
    }

    #[test]
    fn test_error_field() {
        let err = unwrap_envelope(br#"{"error": "bad request"}"#).unwrap_err();
        assert!(matches!(err, ApiError::Server(ref m) if m == "bad request"));
    }

    #[test]
    fn test_error_wins_over_data() {
        let err = unwrap_envelope(br#"{"error": "nope", "data": 1}"#).unwrap_err();
        assert!(matches!(err, ApiError::Server(_)));
    }

    #[test]
    fn test_non_string_error() {
        let err = unwrap_envelope(br#"{"error": {"code": 7}}"#).unwrap_err();
        assert!(matches!(err, ApiError::Server(ref m) if m == r#"{"code":7}"#));
    }

    #[test]
    fn test_missing_data() {
        let err = unwrap_envelope(b"{}").unwrap_err();
        assert!(matches!(err, ApiError::MissingData(ref raw) if raw == "{}"));
    }

    #[test]
    fn test_missing_data_keeps_body_text() {
        let body = br#"{ "status" : "ok" }"#;
        let err = unwrap_envelope(body).unwrap_err();
        assert!(matches!(err, ApiError::MissingData(ref raw) if raw == r#"{ "status" : "ok" }"#));
    }

    #[test]
    fn test_non_object_body() {
        let err = unwrap_envelope(b"[1, 2]").unwrap_err();
        assert!(matches!(err, ApiError::MissingData(ref raw) if raw == "[1, 2]"));
    }

    #[test]
    fn test_malformed_json() {
        let err = unwrap_envelope(b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, ApiError::MalformedJson(_)));
    }
}
