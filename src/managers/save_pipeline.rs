//! Save Pipeline for tabforge.
//!
//! Receives the posted builder form, runs the precondition gate, sanitizes
//! every field and wholesale-replaces the stored tab collection. Skipping is
//! the default posture: any failed precondition leaves storage untouched, so
//! an unrelated product update can never wipe tab data.

use serde_json::Value;

use crate::managers::tab_store::TabStoreTrait;
use crate::services::sanitizer::{sanitize_key, sanitize_rich_text, sanitize_text, sanitize_url};
use crate::types::errors::StorageError;
use crate::types::tab::{ResourceItem, Tab, TabLayout, TabSet, VideoEntry};

/// Why a save request was skipped without touching storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The anti-forgery token was missing or did not match.
    BadNonce,
    /// The request came from an autosave cycle.
    Autosave,
    /// The request targets a revision, not the product itself.
    Revision,
    /// The requester may not edit this product.
    Unauthorized,
    /// The form payload was absent or not an object. Absence is not a
    /// clear: a save that never carried tab data must not delete any.
    FormAbsent,
}

/// Result of handling a save request.
#[derive(Debug, PartialEq)]
pub enum SaveOutcome {
    /// A precondition failed; storage was not touched.
    Skipped(SkipReason),
    /// The sanitized collection that now replaces the stored one. May be
    /// empty: a present-but-empty form is a legitimate clear.
    Saved(TabSet),
}

/// One inbound save attempt, exactly as the host delivered it.
pub struct SaveRequest<'a> {
    pub nonce: &'a str,
    pub is_autosave: bool,
    pub is_revision: bool,
    pub can_edit: bool,
    /// The posted `tabby_data` payload, if the request carried one.
    pub form: Option<&'a Value>,
}

/// The save pipeline. Holds the session's expected anti-forgery token.
pub struct SavePipeline {
    expected_nonce: String,
}

impl SavePipeline {
    pub fn new(expected_nonce: &str) -> Self {
        Self {
            expected_nonce: expected_nonce.to_string(),
        }
    }

    /// Runs the precondition gate, sanitizes the form and persists the
    /// surviving collection.
    ///
    /// # Errors
    /// Returns `StorageError` only when persistence itself fails. Malformed
    /// form content is never an error: bad entries are dropped.
    pub fn handle(
        &self,
        store: &mut dyn TabStoreTrait,
        product_id: i64,
        request: &SaveRequest,
    ) -> Result<SaveOutcome, StorageError> {
        if request.nonce != self.expected_nonce {
            return Ok(SaveOutcome::Skipped(SkipReason::BadNonce));
        }
        if request.is_autosave {
            return Ok(SaveOutcome::Skipped(SkipReason::Autosave));
        }
        if request.is_revision {
            return Ok(SaveOutcome::Skipped(SkipReason::Revision));
        }
        if !request.can_edit {
            return Ok(SaveOutcome::Skipped(SkipReason::Unauthorized));
        }
        let form = match request.form {
            Some(form) if form.is_object() => form,
            _ => return Ok(SaveOutcome::Skipped(SkipReason::FormAbsent)),
        };

        let tabs = sanitize_form(form);
        store.save_tabs(product_id, &tabs)?;
        Ok(SaveOutcome::Saved(tabs))
    }
}

/// Sanitizes a posted form object into a clean [`TabSet`].
///
/// Row keys are slugified and rows whose key sanitizes to nothing are
/// dropped, as are rows that are not objects. Within a row, every field
/// passes through its matching sanitizer; `items` and `videos` are included
/// only when at least one entry survives. Duplicate keys collapse onto the
/// first occurrence's position.
pub fn sanitize_form(form: &Value) -> TabSet {
    let mut tabs = TabSet::new();
    let rows = match form.as_object() {
        Some(rows) => rows,
        None => return tabs,
    };

    for (raw_key, row) in rows {
        let key = sanitize_key(raw_key);
        if key.is_empty() {
            continue;
        }
        let row = match row.as_object() {
            Some(row) => row,
            None => continue,
        };

        let layout_raw = row.get("layout").and_then(Value::as_str).unwrap_or("");
        let tab = Tab {
            id: key,
            title: sanitize_text(row.get("title").and_then(Value::as_str).unwrap_or("")),
            layout: TabLayout::parse(&sanitize_key(layout_raw)),
            content: sanitize_rich_text(row.get("content").and_then(Value::as_str).unwrap_or("")),
            items: sanitize_items(row.get("items")),
            videos: sanitize_videos(row.get("videos")),
        };
        tabs.upsert(tab);
    }
    tabs
}

fn sanitize_items(value: Option<&Value>) -> Vec<ResourceItem> {
    let entries = match value.and_then(Value::as_object) {
        Some(entries) => entries,
        None => return Vec::new(),
    };

    let mut items = Vec::new();
    for (raw_id, entry) in entries {
        let id = sanitize_key(raw_id);
        if id.is_empty() {
            continue;
        }
        let entry = match entry.as_object() {
            Some(entry) => entry,
            None => continue,
        };

        let label = sanitize_text(entry.get("label").and_then(Value::as_str).unwrap_or(""));
        let url = sanitize_url(entry.get("url").and_then(Value::as_str).unwrap_or(""));
        let thumb = sanitize_url(entry.get("thumb").and_then(Value::as_str).unwrap_or(""));
        if label.is_empty() && url.is_empty() && thumb.is_empty() {
            continue;
        }
        items.push(ResourceItem {
            id,
            label,
            url,
            thumb,
        });
    }
    items
}

fn sanitize_videos(value: Option<&Value>) -> Vec<VideoEntry> {
    let entries = match value.and_then(Value::as_object) {
        Some(entries) => entries,
        None => return Vec::new(),
    };

    let mut videos = Vec::new();
    for (raw_id, entry) in entries {
        let id = sanitize_key(raw_id);
        if id.is_empty() {
            continue;
        }
        let entry = match entry.as_object() {
            Some(entry) => entry,
            None => continue,
        };

        let title = sanitize_text(entry.get("v_title").and_then(Value::as_str).unwrap_or(""));
        let url = sanitize_url(entry.get("v_embed").and_then(Value::as_str).unwrap_or(""));
        if title.is_empty() && url.is_empty() {
            continue;
        }
        videos.push(VideoEntry { id, title, url });
    }
    videos
}
