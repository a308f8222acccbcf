//! Map, thumbnail and download IDs.
//!
//! Each is an opaque `(id, token)` pair minted by the server. They are later
//! substituted into tile/thumbnail/download URL templates so the media can
//! be fetched without re-authenticating every request.

use serde::{Deserialize, Serialize};

/// Response data for POST /mapid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapId {
    /// Map identifier
    pub mapid: String,
    /// Access token for the tile service
    pub token: String,
}

/// Response data for POST /thumb with `getid=1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbId {
    /// Thumbnail identifier
    pub thumbid: String,
    /// Access token for the thumbnail service
    pub token: String,
}

/// Response data for POST /download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadId {
    /// Download document identifier
    pub docid: String,
    /// Access token for the download service
    pub token: String,
}

impl MapId {
    pub fn new(mapid: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            mapid: mapid.into(),
            token: token.into(),
        }
    }
}

impl ThumbId {
    pub fn new(thumbid: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            thumbid: thumbid.into(),
            token: token.into(),
        }
    }
}

impl DownloadId {
    pub fn new(docid: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            docid: docid.into(),
            token: token.into(),
        }
    }
}
