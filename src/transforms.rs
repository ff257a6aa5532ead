//! Transform Types - Caller Config and Sanitized Params
//!
//! `TransformConfig` is what a template hands in. `TransformParams` is what an
//! asset's transform capability is allowed to see.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A width or height as written in a template config.
///
/// Templates use either a pixel count (`width: 800`) or a bare flag
/// (`width: true`) to pick the axis srcset breakpoints are measured on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Flag(bool),
    Pixels(u32),
}

impl Dimension {
    /// Pixel value, if this is a usable (non-zero) pixel count.
    pub fn pixels(self) -> Option<u32> {
        match self {
            Dimension::Pixels(px) if px > 0 => Some(px),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformConfig {
    #[serde(default, deserialize_with = "lenient_dimension")]
    pub width: Option<Dimension>,
    #[serde(default, deserialize_with = "lenient_dimension")]
    pub height: Option<Dimension>,
    #[serde(default)]
    pub ratio: Option<f64>,
    #[serde(default)]
    pub srcset: Vec<u32>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub mode: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub quality: Option<u32>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub format: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub position: Option<String>,
}

/// Which axis srcset breakpoint sizes are measured on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SrcsetAxis {
    Width,
    Height,
}

impl TransformConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(mut self, px: u32) -> Self {
        self.width = Some(Dimension::Pixels(px));
        self
    }

    pub fn with_height(mut self, px: u32) -> Self {
        self.height = Some(Dimension::Pixels(px));
        self
    }

    /// Mark the width axis as set without giving a pixel value.
    pub fn with_width_flag(mut self, flag: bool) -> Self {
        self.width = Some(Dimension::Flag(flag));
        self
    }

    pub fn with_height_flag(mut self, flag: bool) -> Self {
        self.height = Some(Dimension::Flag(flag));
        self
    }

    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.ratio = Some(ratio);
        self
    }

    pub fn with_srcset(mut self, sizes: impl IntoIterator<Item = u32>) -> Self {
        self.srcset = sizes.into_iter().collect();
        self
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    pub fn with_quality(mut self, quality: u32) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    /// Axis srcset sizes are measured on, decided by presence alone.
    ///
    /// Any given width, even `false` or `0`, selects the width axis. Otherwise
    /// a given height selects the height axis. With neither, sizes are widths.
    pub fn srcset_axis(&self) -> SrcsetAxis {
        match (&self.width, &self.height) {
            (None, Some(_)) => SrcsetAxis::Height,
            _ => SrcsetAxis::Width,
        }
    }
}

/// Text form of a template scalar. Numbers keep their JSON text, numeric
/// zero reads as unset.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// Non-negative integer from a number or a numeric string.
pub(crate) fn scalar_count(value: &Value) -> Option<u32> {
    let count = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }?;
    u32::try_from(count).ok()
}

// Templates are loosely typed. Values of the wrong shape read as absent
// instead of failing the whole config.

fn lenient_text<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Value>::deserialize(de)?.as_ref().and_then(scalar_text))
}

fn lenient_count<'de, D: Deserializer<'de>>(de: D) -> Result<Option<u32>, D::Error> {
    Ok(Option::<Value>::deserialize(de)?.as_ref().and_then(scalar_count))
}

fn lenient_dimension<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Dimension>, D::Error> {
    Ok(match Option::<Value>::deserialize(de)? {
        Some(Value::Bool(flag)) => Some(Dimension::Flag(flag)),
        Some(value) => scalar_count(&value).map(Dimension::Pixels),
        None => None,
    })
}

/// Whitelisted transform parameters handed to an asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl From<TransformParams> for TransformConfig {
    fn from(params: TransformParams) -> Self {
        Self {
            width: params.width.map(Dimension::Pixels),
            height: params.height.map(Dimension::Pixels),
            mode: params.mode,
            quality: params.quality,
            format: params.format,
            position: params.position,
            ..Self::default()
        }
    }
}
