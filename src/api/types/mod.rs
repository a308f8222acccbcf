//! API response and request types for the Earth Engine data API.
//!
//! This module contains the typed payloads the client decodes from response
//! envelopes and the request builders that produce [`Params`](crate::api::Params).

pub mod algorithm;
pub mod ids;
pub mod visualization;

// Re-export all types for convenience
pub use algorithm::*;
pub use ids::*;
pub use visualization::*;
