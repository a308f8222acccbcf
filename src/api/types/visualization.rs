//! Request builders for map, thumbnail and download parameters.
//!
//! Each builder converts into [`Params`]. Anything the builders do not cover
//! can still be added to the resulting `Params` directly.

use serde_json::Value;

use crate::api::params::{ParamValue, Params};

/// Visualization options shared by /mapid and /thumb.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisParams {
    /// Serialized image expression to render
    pub image: String,
    /// Version number of the image (latest if unset)
    pub version: Option<i64>,
    /// Band names mapped to RGB
    pub bands: Option<Vec<String>>,
    /// Value (or one per band) mapped onto 00
    pub min: Option<Vec<f64>>,
    /// Value (or one per band) mapped onto FF
    pub max: Option<Vec<f64>>,
    pub gain: Option<Vec<f64>>,
    pub bias: Option<Vec<f64>>,
    pub gamma: Option<Vec<f64>>,
    /// CSS-style colors (single-band previews only)
    pub palette: Option<Vec<String>>,
    /// `jpg` or `png`
    pub format: Option<String>,
}

impl VisParams {
    /// Create options for a serialized image.
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            ..Default::default()
        }
    }

    /// Create options from an image expression.
    pub fn from_json(image: &Value) -> Self {
        Self::new(image.to_string())
    }

    /// Pin the image version.
    pub fn with_version(mut self, version: i64) -> Self {
        self.version = Some(version);
        self
    }

    /// Select up to three bands to render.
    pub fn with_bands<I, S>(mut self, bands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bands = Some(bands.into_iter().map(Into::into).collect());
        self
    }

    /// Per-band values mapped to 0 and 255.
    pub fn with_range(mut self, min: Vec<f64>, max: Vec<f64>) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Per-band multiplier, instead of a range.
    pub fn with_gain(mut self, gain: Vec<f64>) -> Self {
        self.gain = Some(gain);
        self
    }

    /// Per-band offset, used with gain.
    pub fn with_bias(mut self, bias: Vec<f64>) -> Self {
        self.bias = Some(bias);
        self
    }

    /// Per-band gamma correction.
    pub fn with_gamma(mut self, gamma: Vec<f64>) -> Self {
        self.gamma = Some(gamma);
        self
    }

    /// Color ramp for single-band images.
    pub fn with_palette<I, S>(mut self, palette: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.palette = Some(palette.into_iter().map(Into::into).collect());
        self
    }

    /// Output format, `jpg` or `png`.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

impl From<VisParams> for Params {
    fn from(vis: VisParams) -> Self {
        let mut params = Params::new().with("image", vis.image);
        if let Some(v) = vis.version {
            params.insert("version", v);
        }
        if let Some(v) = vis.bands {
            params.insert("bands", v);
        }
        for (key, value) in [
            ("min", vis.min),
            ("max", vis.max),
            ("gain", vis.gain),
            ("bias", vis.bias),
            ("gamma", vis.gamma),
        ] {
            if let Some(v) = value {
                params.insert(key, v);
            }
        }
        if let Some(v) = vis.palette {
            params.insert("palette", v);
        }
        if let Some(v) = vis.format {
            params.insert("format", v);
        }
        params
    }
}

/// Maximum thumbnail dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbSize {
    /// Longest side; the other is scaled proportionally.
    Max(u32),
    /// Width and height.
    Dimensions(u32, u32),
}

impl From<ThumbSize> for ParamValue {
    fn from(size: ThumbSize) -> Self {
        match size {
            ThumbSize::Max(n) => n.into(),
            ThumbSize::Dimensions(w, h) => ParamValue::Text(format!("{}x{}", w, h)),
        }
    }
}

/// Options for /thumb: visualization plus size and region.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbParams {
    pub vis: VisParams,
    pub size: Option<ThumbSize>,
    /// `E,S,W,N` or GeoJSON; whole image if unset
    pub region: Option<String>,
}

impl ThumbParams {
    /// Thumbnail of `vis` with server-default size and region.
    pub fn new(vis: VisParams) -> Self {
        Self {
            vis,
            size: None,
            region: None,
        }
    }

    /// Limit the thumbnail size.
    pub fn with_size(mut self, size: ThumbSize) -> Self {
        self.size = Some(size);
        self
    }

    /// Restrict the thumbnail to `region`.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

impl From<ThumbParams> for Params {
    fn from(thumb: ThumbParams) -> Self {
        let mut params = Params::from(thumb.vis);
        if let Some(size) = thumb.size {
            params.insert("size", size);
        }
        if let Some(region) = thumb.region {
            params.insert("region", region);
        }
        params
    }
}

/// Options for /download.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DownloadParams {
    /// Serialized image expression to export
    pub image: String,
    /// Base name for generated files
    pub name: Option<String>,
    /// Per-band options: `id` plus optional `crs`, `crs_transform`, `dimensions`, `scale`
    pub bands: Option<Value>,
    /// Default CRS for bands that do not set one
    pub crs: Option<String>,
    /// Default affine transform: xScale, yShearing, xShearing, yScale, xTranslation, yTranslation
    pub crs_transform: Option<[f64; 6]>,
    /// Default crop dimensions (width, height)
    pub dimensions: Option<(u32, u32)>,
    /// Default scale in meters; ignored when crs and crs_transform are set
    pub scale: Option<f64>,
    /// Polygon to download; ignored when crs and crs_transform are set
    pub region: Option<String>,
}

impl DownloadParams {
    /// Export `image` with server defaults.
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            ..Default::default()
        }
    }

    /// Base name for the generated files.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Per-band options as a JSON array.
    pub fn with_bands(mut self, bands: Value) -> Self {
        self.bands = Some(bands);
        self
    }

    /// Default CRS, optionally with an affine transform.
    pub fn with_crs(mut self, crs: impl Into<String>, transform: Option<[f64; 6]>) -> Self {
        self.crs = Some(crs.into());
        self.crs_transform = transform;
        self
    }

    /// Default crop size in pixels.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.dimensions = Some((width, height));
        self
    }

    /// Default scale in meters.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Polygon to export.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

impl From<DownloadParams> for Params {
    fn from(dl: DownloadParams) -> Self {
        let mut params = Params::new().with("image", dl.image);
        if let Some(v) = dl.name {
            params.insert("name", v);
        }
        if let Some(v) = dl.bands {
            params.insert("bands", v.to_string());
        }
        if let Some(v) = dl.crs {
            params.insert("crs", v);
        }
        if let Some(v) = dl.crs_transform {
            params.insert("crs_transform", Value::from(v.to_vec()).to_string());
        }
        if let Some((w, h)) = dl.dimensions {
            params.insert("dimensions", format!("{}x{}", w, h));
        }
        if let Some(v) = dl.scale {
            params.insert("scale", v);
        }
        if let Some(v) = dl.region {
            params.insert("region", v);
        }
        params
    }
}
