//! Transform Validation - Whitelist, Not Schema
//!
//! Only the keys an asset transform understands survive. Unknown keys are
//! dropped and unset (falsy) values are never forwarded. Nothing here fails.

use serde_json::{Map, Value};

use crate::transforms::{scalar_count, scalar_text, Dimension, TransformConfig, TransformParams};

/// Keys a transform capability may receive.
pub const ALLOWED_KEYS: [&str; 6] = ["mode", "width", "height", "quality", "format", "position"];

/// Reduce a typed config to its whitelisted, non-empty transform params.
pub fn validate(config: &TransformConfig) -> TransformParams {
    TransformParams {
        mode: non_empty(config.mode.as_deref()),
        width: config.width.and_then(Dimension::pixels),
        height: config.height.and_then(Dimension::pixels),
        quality: config.quality.filter(|q| *q > 0),
        format: non_empty(config.format.as_deref()),
        position: non_empty(config.position.as_deref()),
    }
}

/// Same as [`validate`], for an untyped mapping straight from a template.
///
/// Values of the wrong shape for their key are treated as unset.
pub fn validate_map(map: &Map<String, Value>) -> TransformParams {
    let mut params = TransformParams::default();

    for (key, value) in map {
        match key.as_str() {
            "mode" => params.mode = text_value(value),
            "width" => params.width = pixel_value(value),
            "height" => params.height = pixel_value(value),
            "quality" => params.quality = pixel_value(value),
            "format" => params.format = text_value(value),
            "position" => params.position = text_value(value),
            _ => {}
        }
    }

    params
}

// "" and "0" are both falsy in template land.
fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty() && *v != "0").map(str::to_string)
}

fn text_value(value: &Value) -> Option<String> {
    non_empty(scalar_text(value).as_deref())
}

fn pixel_value(value: &Value) -> Option<u32> {
    scalar_count(value).filter(|px| *px > 0)
}
