//! Video embed URL resolution.
//!
//! Admins paste whatever URL they copied from the address bar; the stored
//! value stays raw and the canonical player URL is derived here at render
//! time, every time. Unrecognized URLs pass through unchanged so other
//! providers' embed links keep working.

use regex::Regex;

use crate::types::errors::EmbedError;

/// Recognizes YouTube and Vimeo URLs in their common shapes and rewrites
/// them to the provider's canonical embed form.
pub struct EmbedResolver {
    youtube: Regex,
    vimeo: Regex,
}

impl EmbedResolver {
    /// Compiles the recognition patterns.
    ///
    /// # Errors
    /// Returns `EmbedError::InvalidPattern` if a pattern fails to compile.
    pub fn new() -> Result<Self, EmbedError> {
        let youtube = Regex::new(
            r#"(?i)(?:youtube(?:-nocookie)?\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/ ]{11})"#,
        )
        .map_err(|e| EmbedError::InvalidPattern(e.to_string()))?;
        let vimeo = Regex::new(
            r"(?i)vimeo\.com/(?:channels/(?:\w+/)?|groups/(?:[^/]*)/videos/|album/(?:\d+)/video/|video/|)(\d+)(?:$|/|\?)",
        )
        .map_err(|e| EmbedError::InvalidPattern(e.to_string()))?;
        Ok(Self { youtube, vimeo })
    }

    /// Rewrites a raw video URL to its canonical embed URL, or returns it
    /// unchanged when no provider matches.
    pub fn resolve(&self, raw: &str) -> String {
        if let Some(caps) = self.youtube.captures(raw) {
            if let Some(id) = caps.get(1) {
                return format!("https://www.youtube.com/embed/{}", id.as_str());
            }
        }
        if let Some(caps) = self.vimeo.captures(raw) {
            if let Some(id) = caps.get(1) {
                return format!("https://player.vimeo.com/video/{}", id.as_str());
            }
        }
        raw.to_string()
    }
}
