//! Video Helpers - YouTube IDs

use once_cell::sync::Lazy;
use regex::Regex;

/// One capture group per supported URL shape, tried left to right:
/// `v=ID&...`, `/v/ID`, trailing `v=ID`, `youtu.be/ID`.
static YOUTUBE_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"v=([a-zA-Z0-9-]+)&|v/([^&\n]+)|v=([^&\n]+)|youtu\.be/([^&\n]+)").unwrap()
});

/// Extract the video identifier from a YouTube URL.
pub fn youtube_id(url: &str) -> Option<&str> {
    YOUTUBE_ID_REGEX
        .captures(url)
        .and_then(|cap| cap.iter().skip(1).flatten().next())
        .map(|m| m.as_str())
}
