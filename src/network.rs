//! Network URL constants for the Earth Engine data API.

use std::time::Duration;

/// Default base URL for API calls.
pub const DEFAULT_API_BASE_URL: &str = "https://earthengine.googleapis.com/api";

/// Default base URL for map tiles, thumbnails and downloads.
pub const DEFAULT_TILE_BASE_URL: &str = "https://earthengine.googleapis.com/";

/// Default per-call deadline in seconds.
pub const DEFAULT_DEADLINE_SECS: u64 = 30;

/// Default per-call deadline.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(DEFAULT_DEADLINE_SECS);
