//! Patternlib Core - Template Helpers for a Pattern Library Frontend
//!
//! Pure helpers behind the site's template filters:
//! 1. Responsive image `src` / `srcset` URLs
//! 2. Transform config whitelisting
//! 3. BEM modifier class lists and attribute strings
//! 4. YouTube ID extraction
//! 5. Cookie, template root and config glue for the host

pub mod transforms;
pub mod validation;
pub mod responsive;
pub mod assets;
pub mod markup;
pub mod video;
pub mod hashing;
pub mod cookies;
pub mod templates;
pub mod config;

pub use transforms::{Dimension, SrcsetAxis, TransformConfig, TransformParams};
pub use validation::{validate, validate_map};
pub use responsive::{
    build_image_sources, build_image_src, build_image_srcset, compute_ratio, BoxError,
    ImageAsset, ImageError, ImageSources,
};
pub use assets::{HostedImage, HostedImageError, UrlStyle};
pub use markup::{build_attribute_string, build_attribute_string_from_map, includes, with_modifier, AttrValue};
pub use video::youtube_id;
pub use cookies::{get_cookie, set_cookie, Cookie, CookieError, CookieJar, CookieSigner, MemoryCookieJar};
pub use templates::TemplateRoots;
pub use config::{ConfigError, PatternlibConfig};

pub const SCHEMA_VERSION: &str = "1.0.0";
