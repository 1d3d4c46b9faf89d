//! Tab Publisher for tabforge.
//!
//! Contributes a product's stored tabs to the host page's tab collection
//! and renders each tab's frontend body. The public boundary is guarded:
//! any failure leaves the host's collection exactly as it arrived.

use crate::managers::tab_store::TabStoreTrait;
use crate::services::embed_resolver::EmbedResolver;
use crate::services::sanitizer::{attr_escape, html_escape};
use crate::types::errors::RenderError;
use crate::types::tab::{Tab, TabLayout};

/// Seam for the host's content pipeline (shortcode expansion, paragraph
/// wrapping and the like). Editor-layout content passes through here before
/// being emitted.
pub trait ContentFilter {
    fn filter(&self, content: &str) -> String;
}

/// Default filter: emits stored content unchanged.
pub struct PassthroughFilter;

impl ContentFilter for PassthroughFilter {
    fn filter(&self, content: &str) -> String {
        content.to_string()
    }
}

/// One tab as contributed to the host's tab collection.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedTab {
    /// Host collection key, always prefixed to avoid colliding with the
    /// host's own tabs.
    pub slug: String,
    /// Escaped display title; an empty stored title reads "Resources".
    pub title: String,
    /// Placement after the host's built-in tabs, stepped so hosts can
    /// interleave their own entries.
    pub priority: u32,
    pub tab: Tab,
}

/// Publishes stored tabs into a host tab collection and renders tab bodies.
pub struct TabPublisher<F: ContentFilter = PassthroughFilter> {
    embed_resolver: EmbedResolver,
    content_filter: F,
}

impl TabPublisher<PassthroughFilter> {
    /// Creates a publisher with the passthrough content filter.
    ///
    /// # Errors
    /// Returns `EmbedError` if the embed patterns fail to compile. The
    /// patterns are fixed, so this only fires on a broken build.
    pub fn new() -> Result<Self, crate::types::errors::EmbedError> {
        Ok(Self {
            embed_resolver: EmbedResolver::new()?,
            content_filter: PassthroughFilter,
        })
    }
}

impl<F: ContentFilter> TabPublisher<F> {
    /// Creates a publisher routing editor content through the given filter.
    pub fn with_filter(filter: F) -> Result<Self, crate::types::errors::EmbedError> {
        Ok(Self {
            embed_resolver: EmbedResolver::new()?,
            content_filter: filter,
        })
    }

    /// Collects a product's published tabs in stored order.
    ///
    /// A product with no stored tabs (or an empty collection) contributes
    /// nothing.
    ///
    /// # Errors
    /// Returns `RenderError` when the tab store fails.
    pub fn collect(
        &self,
        store: &dyn TabStoreTrait,
        product_id: i64,
    ) -> Result<Vec<PublishedTab>, RenderError> {
        let tabs = match store.load_tabs(product_id)? {
            Some(tabs) if !tabs.is_empty() => tabs,
            _ => return Ok(Vec::new()),
        };

        let mut published = Vec::with_capacity(tabs.len());
        for (i, tab) in tabs.iter().enumerate() {
            let title = tab.title.trim();
            let title = if title.is_empty() { "Resources" } else { title };
            published.push(PublishedTab {
                slug: format!("tabby_{}", tab.id),
                title: html_escape(title),
                priority: 50 + (i as u32) * 5,
                tab: tab.clone(),
            });
        }
        Ok(published)
    }

    /// The public boundary: appends this product's tabs to the host's
    /// collection. On any error the host's collection is returned
    /// unchanged, so a broken store never breaks the page.
    pub fn extend(
        &self,
        store: &dyn TabStoreTrait,
        product_id: i64,
        mut host_tabs: Vec<PublishedTab>,
    ) -> Vec<PublishedTab> {
        match self.collect(store, product_id) {
            Ok(published) => {
                host_tabs.extend(published);
                host_tabs
            }
            Err(_) => host_tabs,
        }
    }

    /// Renders one tab's frontend body.
    ///
    /// Layout decides the branch, but a grid with no items or a video tab
    /// with no videos falls back to the editor branch rather than emitting
    /// an empty shell. One malformed entry never blocks its siblings.
    pub fn render_tab(&self, tab: &Tab) -> String {
        let mut out =
            String::from("<div class=\"tabby-frontend tabby-scope tabby-frontend-scope\">");

        match tab.layout {
            TabLayout::Grid if !tab.items.is_empty() => {
                out.push_str("<div class=\"tabby-grid\">");
                for item in &tab.items {
                    if item.url.is_empty() {
                        continue;
                    }
                    let label = item.label.trim();
                    let label = if label.is_empty() { "Resource" } else { label };

                    out.push_str("<div class=\"tabby-item\">");
                    out.push_str(&format!(
                        "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">",
                        attr_escape(&item.url)
                    ));
                    if !item.thumb.is_empty() {
                        out.push_str(&format!(
                            "<img src=\"{}\" class=\"tabby-img\" alt=\"\">",
                            attr_escape(&item.thumb)
                        ));
                    }
                    out.push_str(&format!(
                        "<span class=\"tabby-label\">{}</span>",
                        html_escape(label)
                    ));
                    out.push_str("</a></div>");
                }
                out.push_str("</div>");
            }
            TabLayout::Video if !tab.videos.is_empty() => {
                for video in &tab.videos {
                    if video.url.is_empty() {
                        continue;
                    }
                    let embed_url = self.embed_resolver.resolve(&video.url);

                    out.push_str("<div class=\"tabby-video-wrap\">");
                    if !video.title.is_empty() {
                        out.push_str(&format!(
                            "<h3 class=\"tabby-video-title\">{}</h3>",
                            html_escape(&video.title)
                        ));
                    }
                    out.push_str(&format!(
                        "<div class=\"tabby-video-frame\"><iframe src=\"{}\" allowfullscreen loading=\"lazy\"></iframe></div>",
                        attr_escape(&embed_url)
                    ));
                    out.push_str("</div>");
                }
            }
            _ => {
                out.push_str(&self.content_filter.filter(&tab.content));
            }
        }

        out.push_str("</div>");
        out
    }
}
