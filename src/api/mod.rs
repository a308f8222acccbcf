//! Client module for the Earth Engine data API.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use earthengine_data::api::EarthEngineClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EarthEngineClient::builder().bearer_token("ya29....").build()?;
//!
//!     let algorithms = client.get_algorithms().await?;
//!     println!("{} algorithms", algorithms.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! All methods return `ApiResult<T>`, an alias for `Result<T, ApiError>`:
//!
//! ```rust,ignore
//! use earthengine_data::api::ApiError;
//!
//! match client.get_info("missing/asset").await {
//!     Ok(info) => println!("{}", info),
//!     Err(ApiError::Server(msg)) => println!("Server said: {}", msg),
//!     Err(ApiError::HttpStatus(code)) => println!("HTTP {}", code),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```
//!
//! # Thumbnails and Downloads
//!
//! ```rust,ignore
//! use earthengine_data::api::types::{ThumbParams, ThumbSize, VisParams};
//!
//! let thumb = ThumbParams::new(VisParams::new(image_json)).with_size(ThumbSize::Dimensions(256, 256));
//! let id = client.get_thumb_id(thumb).await?;
//! println!("{}", client.thumb_url(&id));
//! ```

pub mod client;
pub mod envelope;
pub mod error;
pub mod params;
pub mod transport;
pub mod types;
pub mod urls;

// Re-export main types for convenience
pub use client::{EarthEngineClient, EarthEngineClientBuilder};
pub use error::{ApiError, ApiResult};
pub use params::{ParamValue, Params};
#[cfg(feature = "http")]
pub use transport::ReqwestTransport;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Method};
pub use types::*;
