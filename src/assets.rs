//! Hosted Images - A Ready-Made `ImageAsset`
//!
//! For hosts that serve transforms either through query parameters on the
//! original URL or through transform-handle directories next to the file.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::responsive::{BoxError, ImageAsset};
use crate::transforms::TransformParams;

const DEFAULT_MODE: &str = "crop";
const DEFAULT_POSITION: &str = "center-center";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlStyle {
    /// `photo.jpg?w=800&h=450&mode=crop`
    #[default]
    Query,
    /// `_800x450_crop_center-center_82/photo.jpg`
    Path,
}

#[derive(Debug, Error)]
pub enum HostedImageError {
    #[error("No file name in asset url: {0}")]
    MissingFileName(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostedImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub style: UrlStyle,
}

impl HostedImage {
    pub fn new(url: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            url: url.into(),
            width,
            height,
            style: UrlStyle::default(),
        }
    }

    pub fn with_style(mut self, style: UrlStyle) -> Self {
        self.style = style;
        self
    }

    fn query_url(&self, params: &TransformParams) -> String {
        let mut pairs = vec![];
        if let Some(w) = params.width {
            pairs.push(format!("w={}", w));
        }
        if let Some(h) = params.height {
            pairs.push(format!("h={}", h));
        }
        if let Some(mode) = &params.mode {
            pairs.push(format!("mode={}", urlencoding::encode(mode)));
        }
        if let Some(position) = &params.position {
            pairs.push(format!("pos={}", urlencoding::encode(position)));
        }
        if let Some(q) = params.quality {
            pairs.push(format!("q={}", q));
        }
        if let Some(format) = &params.format {
            pairs.push(format!("fm={}", urlencoding::encode(format)));
        }

        if pairs.is_empty() {
            return self.url.clone();
        }
        let sep = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.url, sep, pairs.join("&"))
    }

    fn path_url(&self, params: &TransformParams) -> Result<String, HostedImageError> {
        let (dir, file) = match self.url.rsplit_once('/') {
            Some((dir, file)) => (Some(dir), file),
            None => (None, self.url.as_str()),
        };
        if file.is_empty() {
            return Err(HostedImageError::MissingFileName(self.url.clone()));
        }

        let mut handle = format!(
            "_{}x{}_{}_{}",
            params.width.map_or_else(|| "AUTO".to_string(), |w| w.to_string()),
            params.height.map_or_else(|| "AUTO".to_string(), |h| h.to_string()),
            params.mode.as_deref().unwrap_or(DEFAULT_MODE),
            params.position.as_deref().unwrap_or(DEFAULT_POSITION),
        );
        if let Some(q) = params.quality {
            handle.push_str(&format!("_{}", q));
        }

        let file = match &params.format {
            Some(format) => {
                let stem = file.rsplit_once('.').map_or(file, |(stem, _)| stem);
                format!("{}.{}", stem, format)
            }
            None => file.to_string(),
        };

        Ok(match dir {
            Some(dir) => format!("{}/{}/{}", dir, handle, file),
            None => format!("{}/{}", handle, file),
        })
    }
}

impl ImageAsset for HostedImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn transform_url(&self, params: &TransformParams) -> Result<String, BoxError> {
        match self.style {
            UrlStyle::Query => Ok(self.query_url(params)),
            UrlStyle::Path => Ok(self.path_url(params)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(width: u32, height: u32) -> TransformParams {
        TransformParams {
            width: Some(width),
            height: Some(height),
            ..Default::default()
        }
    }

    #[test]
    fn test_query_url() {
        let image = HostedImage::new("https://cdn.example.com/photo.jpg", 1600, 900);
        let url = image
            .transform_url(&TransformParams {
                mode: Some("fit".to_string()),
                position: Some("top left".to_string()),
                quality: Some(80),
                ..params(800, 450)
            })
            .unwrap();
        assert_eq!(
            url,
            "https://cdn.example.com/photo.jpg?w=800&h=450&mode=fit&pos=top%20left&q=80"
        );
    }

    #[test]
    fn test_query_url_keeps_existing_query() {
        let image = HostedImage::new("/photo.jpg?v=3", 1600, 900);
        let url = image.transform_url(&params(400, 225)).unwrap();
        assert_eq!(url, "/photo.jpg?v=3&w=400&h=225");
    }

    #[test]
    fn test_query_url_no_params() {
        let image = HostedImage::new("/photo.jpg", 1600, 900);
        assert_eq!(image.transform_url(&TransformParams::default()).unwrap(), "/photo.jpg");
    }

    #[test]
    fn test_path_url() {
        let image = HostedImage::new("/assets/images/photo.jpg", 1600, 900).with_style(UrlStyle::Path);
        let url = image
            .transform_url(&TransformParams {
                quality: Some(82),
                format: Some("webp".to_string()),
                ..params(800, 450)
            })
            .unwrap();
        assert_eq!(url, "/assets/images/_800x450_crop_center-center_82/photo.webp");
    }

    #[test]
    fn test_path_url_missing_file_name() {
        let image = HostedImage::new("/assets/images/", 1600, 900).with_style(UrlStyle::Path);
        let err = image.transform_url(&params(800, 450)).unwrap_err();
        assert!(err.to_string().contains("No file name"));
    }

    #[test]
    fn test_deserialize_style() {
        let image: HostedImage = serde_json::from_str(
            r#"{"url": "/a.png", "width": 10, "height": 20, "style": "path"}"#,
        )
        .unwrap();
        assert_eq!(image.style, UrlStyle::Path);

        let image: HostedImage =
            serde_json::from_str(r#"{"url": "/a.png", "width": 10, "height": 20}"#).unwrap();
        assert_eq!(image.style, UrlStyle::Query);
    }
}
