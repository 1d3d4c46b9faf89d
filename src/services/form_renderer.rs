//! Builder form renderer for tabforge.
//!
//! Emits the admin-side tab builder markup. Every row carries all three
//! layout sections with `tabby-hidden` on the two inactive ones, so data
//! entered under one layout survives switching to another. Field names
//! follow the `tabby_data[row][...]` contract the save pipeline reads.

use crate::managers::tab_store::TabStoreTrait;
use crate::services::sanitizer::{attr_escape, html_escape};
use crate::types::errors::RenderError;
use crate::types::tab::{ResourceItem, Tab, TabLayout, TabSet, VideoEntry};

/// Renders the builder form for a product's tab collection.
pub struct FormRenderer {
    nonce: String,
}

impl FormRenderer {
    /// Creates a renderer bound to the session's anti-forgery token.
    pub fn new(nonce: &str) -> Self {
        Self {
            nonce: nonce.to_string(),
        }
    }

    /// Renders the full builder form for a product.
    ///
    /// A product with no stored tabs (or an empty collection) gets one
    /// blank editor-layout row so the builder never opens empty.
    ///
    /// # Errors
    /// Returns `RenderError` when the tab store fails.
    pub fn render(
        &self,
        store: &dyn TabStoreTrait,
        product_id: i64,
    ) -> Result<String, RenderError> {
        let tabs = match store.load_tabs(product_id)? {
            Some(tabs) if !tabs.is_empty() => tabs,
            _ => {
                let mut fresh = TabSet::new();
                fresh.upsert(Tab::new_editor());
                fresh
            }
        };

        let mut out = String::new();
        out.push_str(&format!(
            "<input type=\"hidden\" name=\"tabby_nonce_field\" value=\"{}\">\n",
            attr_escape(&self.nonce)
        ));
        out.push_str("<div id=\"tabby-builder-container\" class=\"tabby-scope tabby-admin-scope\">\n");
        out.push_str("<div class=\"tabby-ctrl-bar\">");
        out.push_str("<button type=\"button\" class=\"button tabby-expand-all\">Expand All</button>");
        out.push_str("<button type=\"button\" class=\"button tabby-collapse-all\">Collapse All</button>");
        out.push_str("<button type=\"button\" class=\"button button-primary tabby-add-tab\">+ Create New Tab</button>");
        out.push_str("</div>\n");
        out.push_str("<div id=\"tabby-tabs-list\">\n");
        for tab in tabs.iter() {
            render_row(&mut out, tab);
        }
        out.push_str("</div>\n</div>\n");
        Ok(out)
    }

    /// The admin boundary: renders the builder, or a single neutral notice
    /// when rendering fails. Errors never escape into the host screen.
    pub fn render_or_notice(&self, store: &dyn TabStoreTrait, product_id: i64) -> String {
        match self.render(store, product_id) {
            Ok(html) => html,
            Err(_) => concat!(
                "<div class=\"notice notice-error\"><p>",
                "The tab builder encountered an error and was temporarily disabled on this screen.",
                "</p></div>"
            )
            .to_string(),
        }
    }
}

fn render_row(out: &mut String, tab: &Tab) {
    let id = attr_escape(&tab.id);
    out.push_str(&format!(
        "<div class=\"tabby-tab-row postbox\" data-id=\"{}\">\n",
        id
    ));

    out.push_str("<div class=\"tabby-tab-header\">");
    out.push_str(
        "<span class=\"dashicons dashicons-arrow-down-alt2 tabby-toggle-row\" title=\"Collapse/Expand\"></span>",
    );
    out.push_str(&format!(
        "<input type=\"text\" name=\"tabby_data[{}][title]\" value=\"{}\" placeholder=\"Tab Title\">",
        id,
        attr_escape(&tab.title)
    ));
    out.push_str(&format!(
        "<select name=\"tabby_data[{}][layout]\" class=\"tabby-layout-selector\">",
        id
    ));
    out.push_str(&layout_option(tab.layout, TabLayout::Editor, "TEXT EDITOR"));
    out.push_str(&layout_option(
        tab.layout,
        TabLayout::Grid,
        "PDF/IMAGE RESOURCES",
    ));
    out.push_str(&layout_option(tab.layout, TabLayout::Video, "VIDEO EMBED"));
    out.push_str("</select>");
    out.push_str(
        "<button type=\"button\" class=\"button-link-delete tabby-remove-tab\">Remove</button>",
    );
    out.push_str("</div>\n");

    out.push_str("<div class=\"tabby-tab-body\">\n");

    out.push_str(&format!(
        "<div class=\"view-editor{}\">",
        hidden_unless(tab.layout, TabLayout::Editor)
    ));
    out.push_str(&format!(
        "<textarea name=\"tabby_data[{}][content]\" class=\"widefat\" rows=\"8\">{}</textarea>",
        id,
        html_escape(&tab.content)
    ));
    out.push_str("</div>\n");

    out.push_str(&format!(
        "<div class=\"view-grid{}\">",
        hidden_unless(tab.layout, TabLayout::Grid)
    ));
    out.push_str(
        "<button type=\"button\" class=\"button tabby-batch-upload\">Batch Image/PDF Upload</button>",
    );
    out.push_str("<div class=\"tabby-admin-grid tabby-sortable-items\">");
    for item in &tab.items {
        render_item(out, &id, item);
    }
    out.push_str("</div></div>\n");

    out.push_str(&format!(
        "<div class=\"view-video{}\">",
        hidden_unless(tab.layout, TabLayout::Video)
    ));
    out.push_str("<div class=\"tabby-video-list\">");
    for video in &tab.videos {
        render_video(out, &id, video);
    }
    out.push_str("</div>");
    out.push_str(
        "<button type=\"button\" class=\"button tabby-add-video-row\">+ Add Video Link</button>",
    );
    out.push_str("</div>\n");

    out.push_str("</div>\n</div>\n");
}

fn render_item(out: &mut String, row_id: &str, item: &ResourceItem) {
    let item_id = attr_escape(&item.id);
    out.push_str(&format!(
        "<div class=\"tabby-admin-item\" data-item-id=\"{}\">",
        item_id
    ));
    out.push_str("<button type=\"button\" class=\"tabby-remove-node\" title=\"Remove\">&times;</button>");
    out.push_str(&format!(
        "<img src=\"{}\" alt=\"\">",
        attr_escape(&item.thumb)
    ));
    out.push_str(&format!(
        "<input type=\"text\" class=\"tabby-resource-label-input\" name=\"tabby_data[{}][items][{}][label]\" value=\"{}\">",
        row_id,
        item_id,
        attr_escape(&item.label)
    ));
    out.push_str(&format!(
        "<input type=\"hidden\" name=\"tabby_data[{}][items][{}][url]\" value=\"{}\">",
        row_id,
        item_id,
        attr_escape(&item.url)
    ));
    out.push_str(&format!(
        "<input type=\"hidden\" name=\"tabby_data[{}][items][{}][thumb]\" value=\"{}\">",
        row_id,
        item_id,
        attr_escape(&item.thumb)
    ));
    out.push_str("</div>");
}

fn render_video(out: &mut String, row_id: &str, video: &VideoEntry) {
    let video_id = attr_escape(&video.id);
    out.push_str(&format!(
        "<div class=\"tabby-video-row\" data-video-id=\"{}\">",
        video_id
    ));
    out.push_str("<button type=\"button\" class=\"tabby-remove-node\" title=\"Remove\">&times;</button>");
    out.push_str("<label><strong>Video Title</strong></label>");
    out.push_str(&format!(
        "<input type=\"text\" name=\"tabby_data[{}][videos][{}][v_title]\" value=\"{}\" placeholder=\"e.g. Product Showcase\" class=\"widefat\">",
        row_id,
        video_id,
        attr_escape(&video.title)
    ));
    out.push_str("<label><strong>Embed URL (YouTube/Vimeo)</strong></label>");
    out.push_str(&format!(
        "<input type=\"text\" name=\"tabby_data[{}][videos][{}][v_embed]\" value=\"{}\" placeholder=\"https://www.youtube.com/watch?v=...\" class=\"widefat\">",
        row_id,
        video_id,
        attr_escape(&video.url)
    ));
    out.push_str("</div>");
}

fn layout_option(current: TabLayout, option: TabLayout, label: &str) -> String {
    format!(
        "<option value=\"{}\"{}>{}</option>",
        option.as_str(),
        if current == option { " selected" } else { "" },
        label
    )
}

fn hidden_unless(current: TabLayout, section: TabLayout) -> &'static str {
    if current == section {
        ""
    } else {
        " tabby-hidden"
    }
}
