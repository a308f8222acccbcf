//! Request parameters.
//!
//! Every operation sends a flat set of string keys to string values, encoded
//! as `application/x-www-form-urlencoded`. List values (band names, per-band
//! min/max, palettes) are comma-joined on the wire.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use crate::api::error::{ApiError, ApiResult};

/// Legacy parameter key holding a per-call deadline in seconds.
pub const DEADLINE_KEY: &str = "deadline";

/// A single parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    List(Vec<String>),
}

impl ParamValue {
    /// Build a list value from anything displayable.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: fmt::Display,
    {
        ParamValue::List(items.into_iter().map(|i| i.to_string()).collect())
    }

    /// Wire form of the value.
    pub fn encode(&self) -> String {
        match self {
            ParamValue::Text(s) => s.clone(),
            ParamValue::List(items) => items.join(","),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            ParamValue::List(_) => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<&String> for ParamValue {
    fn from(s: &String) -> Self {
        ParamValue::Text(s.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Text(if b { "1" } else { "0" }.to_string())
    }
}

impl From<serde_json::Value> for ParamValue {
    /// Strings are sent as-is; anything else as its JSON text.
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::String(s) => ParamValue::Text(s),
            other => ParamValue::Text(other.to_string()),
        }
    }
}

macro_rules! impl_from_scalar {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ParamValue {
                fn from(v: $t) -> Self {
                    ParamValue::Text(v.to_string())
                }
            }

            impl From<Vec<$t>> for ParamValue {
                fn from(v: Vec<$t>) -> Self {
                    ParamValue::list(v)
                }
            }

            impl<const N: usize> From<[$t; N]> for ParamValue {
                fn from(v: [$t; N]) -> Self {
                    ParamValue::list(v)
                }
            }
        )*
    };
}

impl_from_scalar!(i32, i64, u32, u64, f32, f64, usize);

impl From<Vec<String>> for ParamValue {
    fn from(v: Vec<String>) -> Self {
        ParamValue::List(v)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(v: Vec<&str>) -> Self {
        ParamValue::list(v)
    }
}

/// Parameters for one API call.
///
/// Keys are kept sorted so the encoded form is deterministic. The deadline
/// is carried beside the entries and never encoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: BTreeMap<String, ParamValue>,
    deadline: Option<Duration>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set the deadline for this call.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Explicitly set deadline, if any.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Resolve the call deadline and strip it from the entries.
    ///
    /// A `deadline` entry (seconds, may be fractional) is removed and wins
    /// over [`Params::with_deadline`]. Falls back to `default`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidParameter`] if the entry is not a finite,
    /// non-negative number.
    pub fn take_deadline(&mut self, default: Duration) -> ApiResult<Duration> {
        let explicit = self.deadline.take();
        match self.entries.remove(DEADLINE_KEY) {
            Some(value) => parse_deadline(&value),
            None => Ok(explicit.unwrap_or(default)),
        }
    }

    /// Form-encode the entries (`a=1&b=x+y`).
    pub fn encode(&self) -> ApiResult<String> {
        let pairs: Vec<(&str, String)> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.encode()))
            .collect();
        serde_urlencoded::to_string(pairs)
            .map_err(|e| ApiError::InvalidParameter(format!("Failed to encode parameters: {}", e)))
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

fn parse_deadline(value: &ParamValue) -> ApiResult<Duration> {
    let text = value.encode();
    let secs: f64 = text
        .trim()
        .parse()
        .map_err(|_| ApiError::InvalidParameter(format!("deadline is not a number: {}", text)))?;
    Duration::try_from_secs_f64(secs)
        .map_err(|_| ApiError::InvalidParameter(format!("deadline out of range: {}", text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_sorted_and_escaped() {
        let params = Params::new()
            .with("name", "my image")
            .with("bands", vec!["B4", "B3", "B2"])
            .with("min", 0);
        assert_eq!(params.encode().unwrap(), "bands=B4%2CB3%2CB2&min=0&name=my+image");
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(Params::new().encode().unwrap(), "");
    }

    #[test]
    fn test_take_deadline_default() {
        let mut params = Params::new().with("id", "srtm90_v4");
        let d = params.take_deadline(Duration::from_secs(30)).unwrap();
        assert_eq!(d, Duration::from_secs(30));
        assert!(params.contains_key("id"));
    }

    #[test]
    fn test_take_deadline_from_entry_is_removed() {
        let mut params = Params::new().with("id", "x").with(DEADLINE_KEY, 2.5);
        let d = params.take_deadline(Duration::from_secs(30)).unwrap();
        assert_eq!(d, Duration::from_millis(2500));
        assert!(!params.contains_key(DEADLINE_KEY));
        assert_eq!(params.encode().unwrap(), "id=x");
    }

    #[test]
    fn test_take_deadline_explicit() {
        let mut params = Params::new().with_deadline(Duration::from_secs(5));
        assert_eq!(params.take_deadline(Duration::from_secs(30)).unwrap(), Duration::from_secs(5));
        assert_eq!(params.deadline(), None);
    }

    #[test]
    fn test_take_deadline_rejects_garbage() {
        let mut params = Params::new().with(DEADLINE_KEY, "soon");
        assert!(matches!(
            params.take_deadline(Duration::from_secs(30)),
            Err(ApiError::InvalidParameter(_))
        ));

        let mut params = Params::new().with(DEADLINE_KEY, -1);
        assert!(params.take_deadline(Duration::from_secs(30)).is_err());
    }

    #[test]
    fn test_json_value_conversion() {
        let v: ParamValue = serde_json::json!({"type": "Image"}).into();
        assert_eq!(v.as_text(), Some(r#"{"type":"Image"}"#));
        let v: ParamValue = serde_json::json!("plain").into();
        assert_eq!(v.as_text(), Some("plain"));
    }

    #[test]
    fn test_from_iter() {
        let params: Params = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("b"), Some(&ParamValue::Text("2".to_string())));
    }
}
