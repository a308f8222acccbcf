//! URL builders for tiles, thumbnails and downloads.
//!
//! Pure string formatting; no network access.

use crate::api::error::{ApiError, ApiResult};
use crate::api::types::{DownloadId, MapId, ThumbId};

/// Highest zoom level whose tile width fits in an `i64`.
pub const MAX_ZOOM: u32 = 62;

/// Wrap a tile x coordinate into `[0, 2^z)`.
///
/// # Errors
///
/// Returns an error if `z` exceeds [`MAX_ZOOM`].
pub fn wrap_tile_x(x: i64, z: u32) -> ApiResult<i64> {
    let width = 2i64
        .checked_pow(z)
        .ok_or_else(|| ApiError::InvalidParameter(format!("Zoom level {} is out of range", z)))?;
    Ok(x.rem_euclid(width))
}

/// Join `base` and `path` without doubling the `/` between them.
pub fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// `{tile_base}/map/{mapid}/{z}/{x}/{y}?token={token}`, with x wrapped around the globe.
pub fn tile_url(tile_base_url: &str, map_id: &MapId, x: i64, y: i64, z: u32) -> ApiResult<String> {
    let x = wrap_tile_x(x, z)?;
    let path = format!("map/{}/{}/{}/{}?token={}", map_id.mapid, z, x, y, map_id.token);
    Ok(join(tile_base_url, &path))
}

/// `{tile_base}/api/thumb?thumbid={id}&token={token}`.
pub fn thumb_url(tile_base_url: &str, thumb_id: &ThumbId) -> String {
    let path = format!("api/thumb?thumbid={}&token={}", thumb_id.thumbid, thumb_id.token);
    join(tile_base_url, &path)
}

/// `{tile_base}/api/download?docid={id}&token={token}`.
pub fn download_url(tile_base_url: &str, download_id: &DownloadId) -> String {
    let path = format!("api/download?docid={}&token={}", download_id.docid, download_id.token);
    join(tile_base_url, &path)
}
