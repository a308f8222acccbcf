//! Algorithm descriptions returned by GET /algorithms.

use serde::{Deserialize, Serialize};

/// A server-side algorithm signature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Algorithm {
    /// Text description of the algorithm
    #[serde(default)]
    pub description: String,
    /// Return type name
    #[serde(default)]
    pub returns: String,
    /// Arguments in declaration order
    #[serde(default)]
    pub args: Vec<AlgorithmArg>,
    /// Whether the algorithm is deprecated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<serde_json::Value>,
}

/// One argument of an [`Algorithm`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmArg {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Type name
    #[serde(rename = "type", default)]
    pub arg_type: String,
    #[serde(default)]
    pub optional: bool,
    /// Default value when the argument is omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

impl Algorithm {
    /// Names of the required arguments.
    pub fn required_args(&self) -> impl Iterator<Item = &str> {
        self.args
            .iter()
            .filter(|a| !a.optional)
            .map(|a| a.name.as_str())
    }
}
