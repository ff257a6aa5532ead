//! Responsive Images - `src` and `srcset` Builders
//!
//! Every URL goes through the asset's own transform capability. This module
//! only works out which dimensions to ask for.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::transforms::{Dimension, SrcsetAxis, TransformConfig, TransformParams};
use crate::validation::validate;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// An image the host CMS can produce transformed variants of.
pub trait ImageAsset {
    /// Natural width in pixels.
    fn width(&self) -> u32;

    /// Natural height in pixels.
    fn height(&self) -> u32;

    /// Resolve a URL for the variant described by `params`.
    fn transform_url(&self, params: &TransformParams) -> Result<String, BoxError>;
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Invalid asset: {width}x{height} has no usable dimensions")]
    InvalidAsset { width: u32, height: u32 },

    #[error("Invalid ratio: {0}")]
    InvalidRatio(f64),

    #[error(transparent)]
    Transform(BoxError),
}

/// Both attributes of a responsive `<img>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSources {
    pub src: String,
    pub srcset: String,
}

/// Width-to-height ratio: an explicit non-zero `ratio` wins, otherwise the
/// asset's natural proportions.
pub fn compute_ratio<A: ImageAsset + ?Sized>(
    asset: &A,
    config: &TransformConfig,
) -> Result<f64, ImageError> {
    if let Some(ratio) = config.ratio.filter(|r| *r != 0.0) {
        if !ratio.is_finite() || ratio < 0.0 {
            return Err(ImageError::InvalidRatio(ratio));
        }
        return Ok(ratio);
    }

    let (width, height) = (asset.width(), asset.height());
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidAsset { width, height });
    }

    let ratio = width as f64 / height as f64;
    trace!(width, height, ratio, "derived ratio from asset");
    Ok(ratio)
}

/// Build the `src` URL for an image.
pub fn build_image_src<A: ImageAsset + ?Sized>(
    asset: &A,
    config: &TransformConfig,
) -> Result<String, ImageError> {
    let ratio = compute_ratio(asset, config)?;
    let (width, height) = resolve_dimensions(asset, config, ratio)?;

    let mut params = validate(config);
    params.width = Some(width);
    params.height = Some(height);

    debug!(width, height, ratio, "building image src");
    asset.transform_url(&params).map_err(ImageError::Transform)
}

/// Build the `srcset` attribute for an image, one descriptor per breakpoint.
///
/// An empty `srcset` list yields an empty string.
pub fn build_image_srcset<A: ImageAsset + ?Sized>(
    asset: &A,
    config: &TransformConfig,
) -> Result<String, ImageError> {
    if config.srcset.is_empty() {
        return Ok(String::new());
    }

    let ratio = compute_ratio(asset, config)?;
    let axis = config.srcset_axis();
    let base = TransformParams {
        width: None,
        height: None,
        ..validate(config)
    };

    let mut descriptors = Vec::with_capacity(config.srcset.len());
    for &size in &config.srcset {
        if size == 0 {
            warn!("skipping zero-sized srcset breakpoint");
            continue;
        }

        let (width, height) = breakpoint_dimensions(size, axis, ratio)?;
        let params = TransformParams {
            width: Some(width),
            height: Some(height),
            ..base.clone()
        };

        let url = asset.transform_url(&params).map_err(ImageError::Transform)?;
        trace!(width, height, %url, "srcset breakpoint");
        descriptors.push(format!("{} {}w", url, width));
    }

    debug!(count = descriptors.len(), ratio, ?axis, "built image srcset");
    Ok(descriptors.join(", "))
}

/// Build `src` and `srcset` together.
pub fn build_image_sources<A: ImageAsset + ?Sized>(
    asset: &A,
    config: &TransformConfig,
) -> Result<ImageSources, ImageError> {
    Ok(ImageSources {
        src: build_image_src(asset, config)?,
        srcset: build_image_srcset(asset, config)?,
    })
}

fn resolve_dimensions<A: ImageAsset + ?Sized>(
    asset: &A,
    config: &TransformConfig,
    ratio: f64,
) -> Result<(u32, u32), ImageError> {
    let width = config.width.and_then(Dimension::pixels);
    let height = config.height.and_then(Dimension::pixels);

    match (width, height) {
        (Some(w), _) => Ok((w, height_for(w, ratio)?)),
        (None, Some(h)) => Ok((width_for(h, ratio)?, h)),
        (None, None) => {
            // Fall back to the natural width
            let natural = asset.width();
            if natural == 0 {
                return Err(ImageError::InvalidAsset {
                    width: natural,
                    height: asset.height(),
                });
            }
            Ok((natural, height_for(natural, ratio)?))
        }
    }
}

fn breakpoint_dimensions(
    size: u32,
    axis: SrcsetAxis,
    ratio: f64,
) -> Result<(u32, u32), ImageError> {
    Ok(match axis {
        SrcsetAxis::Width => (size, height_for(size, ratio)?),
        SrcsetAxis::Height => (width_for(size, ratio)?, size),
    })
}

fn height_for(width: u32, ratio: f64) -> Result<u32, ImageError> {
    round_px(width as f64 / ratio, ratio)
}

fn width_for(height: u32, ratio: f64) -> Result<u32, ImageError> {
    round_px(height as f64 * ratio, ratio)
}

// Half away from zero, never below 1px. Anything past u32 is the ratio's fault.
fn round_px(value: f64, ratio: f64) -> Result<u32, ImageError> {
    let rounded = value.round();
    if !rounded.is_finite() || rounded > u32::MAX as f64 {
        return Err(ImageError::InvalidRatio(ratio));
    }
    Ok((rounded as u32).max(1))
}
