//! # Earth Engine Data SDK
//!
//! A Rust client for the Earth Engine data API.
//!
//! ## Modules
//!
//! - [`api`]: the client, request parameters, envelope handling and URL helpers
//! - [`config`]: connection configuration (credentials, base URLs)
//! - [`auth`]: request authorization
//! - [`global`]: optional process-wide configuration
//! - [`network`]: default endpoints and deadline
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use earthengine_data::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EarthEngineClient::from_config(&ClientConfig::from_env())?;
//!
//!     let info = client.get_info("srtm90_v4").await?;
//!     println!("{}", info);
//!
//!     let map_id = client
//!         .get_map_id(VisParams::new(r#""srtm90_v4""#).with_range(vec![0.0], vec![3000.0]))
//!         .await?;
//!     println!("{}", client.tile_url(&map_id, -1, 0, 1)?);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod global;
pub mod network;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::api::types::*;
    pub use crate::api::{ApiError, ApiResult, EarthEngineClient, Method, ParamValue, Params};
    pub use crate::auth::{BearerToken, Credentials};
    pub use crate::config::{ClientConfig, ConfigOverrides};
    pub use crate::network::{DEFAULT_API_BASE_URL, DEFAULT_DEADLINE, DEFAULT_TILE_BASE_URL};
}
