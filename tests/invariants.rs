//! Contract Invariant Tests
//!
//! These tests verify the guarantees templates rely on.

use std::cell::RefCell;

use patternlib_core::{
    build_attribute_string, build_image_src, build_image_srcset, validate, validate_map,
    with_modifier, youtube_id, AttrValue, BoxError, HostedImage, ImageAsset, ImageError,
    TransformConfig, TransformParams, UrlStyle,
};
use serde_json::json;

/// Asset that records every transform request and renders `url(W,H)`.
struct RecordingAsset {
    width: u32,
    height: u32,
    fail_on_width: Option<u32>,
    calls: RefCell<Vec<TransformParams>>,
}

impl RecordingAsset {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            fail_on_width: None,
            calls: RefCell::new(vec![]),
        }
    }

    fn failing_on(mut self, width: u32) -> Self {
        self.fail_on_width = Some(width);
        self
    }
}

impl ImageAsset for RecordingAsset {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn transform_url(&self, params: &TransformParams) -> Result<String, BoxError> {
        self.calls.borrow_mut().push(params.clone());
        if params.width.is_some() && params.width == self.fail_on_width {
            return Err("transform service unavailable".into());
        }
        Ok(format!(
            "url({},{})",
            params.width.unwrap_or_default(),
            params.height.unwrap_or_default()
        ))
    }
}

fn config(value: serde_json::Value) -> TransformConfig {
    serde_json::from_value(value).unwrap()
}

#[test]
fn invariant_src_derives_height_from_width() {
    let asset = RecordingAsset::new(1600, 900);

    let src = build_image_src(&asset, &config(json!({"ratio": null, "width": 800}))).unwrap();

    assert_eq!(src, "url(800,450)");
    let calls = asset.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].width, Some(800));
    assert_eq!(calls[0].height, Some(450));
}

#[test]
fn invariant_srcset_width_flag() {
    let asset = RecordingAsset::new(1600, 900);

    let srcset =
        build_image_srcset(&asset, &config(json!({"width": true, "srcset": [400, 800]}))).unwrap();

    assert_eq!(srcset, "url(400,225) 400w, url(800,450) 800w");
}

#[test]
fn invariant_srcset_axis_follows_presence() {
    let asset = RecordingAsset::new(1600, 900);

    let by_height =
        build_image_srcset(&asset, &config(json!({"height": 0, "srcset": [450]}))).unwrap();
    assert_eq!(by_height, "url(800,450) 800w");

    let by_width = build_image_srcset(
        &asset,
        &config(json!({"width": false, "height": 300, "srcset": [400]})),
    )
    .unwrap();
    assert_eq!(by_width, "url(400,225) 400w");
}

#[test]
fn invariant_srcset_empty_is_noop() {
    let asset = RecordingAsset::new(1600, 900);

    assert_eq!(build_image_srcset(&asset, &config(json!({"srcset": []}))).unwrap(), "");
    assert_eq!(build_image_srcset(&asset, &config(json!({"width": 800}))).unwrap(), "");
    assert!(asset.calls.borrow().is_empty());
}

#[test]
fn invariant_srcset_preserves_order() {
    let asset = RecordingAsset::new(1000, 1000);

    let srcset = build_image_srcset(&asset, &config(json!({"srcset": [800, 200, 400]}))).unwrap();

    assert_eq!(srcset, "url(800,800) 800w, url(200,200) 200w, url(400,400) 400w");
}

#[test]
fn invariant_srcset_base_params_shared() {
    let asset = RecordingAsset::new(1600, 900);

    build_image_srcset(
        &asset,
        &config(json!({"srcset": [400, 800], "mode": "crop", "quality": 70, "foo": "bar"})),
    )
    .unwrap();

    let calls = asset.calls.borrow();
    assert_eq!(calls.len(), 2);
    for call in calls.iter() {
        assert_eq!(call.mode.as_deref(), Some("crop"));
        assert_eq!(call.quality, Some(70));
        assert!(call.width.unwrap() > 0 && call.height.unwrap() > 0);
    }
}

#[test]
fn invariant_transform_failure_aborts_srcset() {
    let asset = RecordingAsset::new(1600, 900).failing_on(800);

    let result = build_image_srcset(&asset, &config(json!({"srcset": [400, 800, 1200]})));

    let err = result.unwrap_err();
    assert!(matches!(err, ImageError::Transform(_)));
    assert_eq!(err.to_string(), "transform service unavailable");
    // Nothing after the failing breakpoint is requested
    assert_eq!(asset.calls.borrow().len(), 2);
}

#[test]
fn invariant_transform_failure_propagates_from_src() {
    let asset = RecordingAsset::new(1600, 900).failing_on(800);

    let result = build_image_src(&asset, &config(json!({"width": 800})));
    assert!(matches!(result, Err(ImageError::Transform(_))));
}

#[test]
fn invariant_zero_height_asset_fails() {
    let asset = RecordingAsset::new(1600, 0);

    let result = build_image_src(&asset, &config(json!({"width": 800})));
    assert!(matches!(result, Err(ImageError::InvalidAsset { .. })));

    let result = build_image_srcset(&asset, &config(json!({"srcset": [400]})));
    assert!(matches!(result, Err(ImageError::InvalidAsset { .. })));
    assert!(asset.calls.borrow().is_empty());
}

#[test]
fn invariant_degenerate_ratio_never_reaches_transform() {
    let zero_width = RecordingAsset::new(0, 900);
    assert!(matches!(
        build_image_src(&zero_width, &config(json!({"width": 800}))),
        Err(ImageError::InvalidAsset { .. })
    ));
    assert!(matches!(
        build_image_srcset(&zero_width, &config(json!({"srcset": [400]}))),
        Err(ImageError::InvalidAsset { .. })
    ));
    assert!(zero_width.calls.borrow().is_empty());

    let asset = RecordingAsset::new(1600, 900);
    let result = build_image_src(&asset, &config(json!({"width": 800, "ratio": 1e-9})));
    assert!(matches!(result, Err(ImageError::InvalidRatio(_))));
    assert!(asset.calls.borrow().is_empty());
}

#[test]
fn invariant_src_never_sends_unset_dimensions() {
    let asset = RecordingAsset::new(1600, 900);

    build_image_src(&asset, &config(json!({"mode": "fit"}))).unwrap();

    let calls = asset.calls.borrow();
    assert_eq!(calls[0].width, Some(1600));
    assert_eq!(calls[0].height, Some(900));
}

#[test]
fn invariant_validate_whitelist() {
    let params = validate(&config(json!({"mode": "crop", "foo": "bar", "width": 0})));
    assert_eq!(
        params,
        TransformParams {
            mode: Some("crop".to_string()),
            ..Default::default()
        }
    );

    let map = json!({"mode": "crop", "foo": "bar", "width": 0});
    assert_eq!(validate_map(map.as_object().unwrap()), params);
}

#[test]
fn invariant_validate_idempotent() {
    let inputs = [
        json!({}),
        json!({"mode": "crop", "width": 800, "height": 0, "quality": 90}),
        json!({"format": "webp", "position": "top-center", "ratio": 2.0, "srcset": [1, 2]}),
        json!({"width": true, "height": 300, "mode": ""}),
    ];

    for input in inputs {
        let once = validate(&config(input));
        let twice = validate(&TransformConfig::from(once.clone()));
        assert_eq!(once, twice);
    }
}

#[test]
fn invariant_markup_helpers() {
    assert_eq!(with_modifier::<&str>("btn", &[]), "btn");
    assert_eq!(with_modifier("btn", &["primary", "lg"]), "btn btn--primary btn--lg");

    let empty: Vec<(&str, AttrValue)> = vec![];
    assert_eq!(build_attribute_string(empty), "");
    assert_eq!(
        build_attribute_string([("disabled", AttrValue::from(true)), ("alt", AttrValue::from("cat"))]),
        "disabled alt=\"cat\" "
    );
}

#[test]
fn invariant_youtube_id() {
    assert_eq!(youtube_id("https://youtu.be/abc123"), Some("abc123"));
    assert_eq!(youtube_id("https://example.com"), None);
}

#[test]
fn invariant_hosted_image_srcset() {
    let image = HostedImage::new("/assets/photo.jpg", 1600, 900).with_style(UrlStyle::Path);

    let srcset = build_image_srcset(
        &image,
        &TransformConfig::new().with_quality(80).with_srcset([400, 800]),
    )
    .unwrap();

    assert_eq!(
        srcset,
        "/assets/_400x225_crop_center-center_80/photo.jpg 400w, \
         /assets/_800x450_crop_center-center_80/photo.jpg 800w"
    );
}
