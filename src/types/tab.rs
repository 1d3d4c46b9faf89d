use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Layout variant of a content tab, deciding which sub-fields are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TabLayout {
    #[default]
    Editor,
    Grid,
    Video,
}

impl TabLayout {
    /// Parses a layout value from untrusted input. Anything unrecognized
    /// normalizes to `Editor`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "grid" => TabLayout::Grid,
            "video" => TabLayout::Video,
            _ => TabLayout::Editor,
        }
    }

    /// The value used in wire/storage form ("editor", "grid", "video").
    pub fn as_str(&self) -> &'static str {
        match self {
            TabLayout::Editor => "editor",
            TabLayout::Grid => "grid",
            TabLayout::Video => "video",
        }
    }
}

/// One entry of the image/PDF resource grid.
///
/// `url` is the authoritative link target; rendering skips the whole item
/// when it is empty. `thumb` is optional and renders without an image when
/// empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceItem {
    pub id: String,
    pub label: String,
    pub url: String,
    pub thumb: String,
}

/// One embedded video. `url` is the raw URL exactly as the admin entered it;
/// canonical embed rewriting happens at render time, every time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoEntry {
    pub id: String,
    pub title: String,
    pub url: String,
}

/// A single content tab attached to a product.
///
/// A tab carries fields for all three layout variants but only the field
/// matching `layout` is meaningful; the others are inert and preserved so
/// switching layouts in the builder does not drop previously entered data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    pub id: String,
    pub title: String,
    pub layout: TabLayout,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ResourceItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub videos: Vec<VideoEntry>,
}

impl Tab {
    /// Creates an empty editor-layout tab with a server-generated row id.
    pub fn new_editor() -> Self {
        Self {
            id: fresh_id("row"),
            title: String::new(),
            layout: TabLayout::Editor,
            content: String::new(),
            items: Vec::new(),
            videos: Vec::new(),
        }
    }
}

/// The full ordered collection of custom tabs for one product.
///
/// Insertion order is the display/render order. Ids are unique: inserting a
/// tab whose id already exists replaces the existing tab in place, keeping
/// its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabSet {
    tabs: Vec<Tab>,
}

impl TabSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    /// Inserts a tab, replacing any existing tab with the same id in place.
    pub fn upsert(&mut self, tab: Tab) {
        match self.tabs.iter_mut().find(|t| t.id == tab.id) {
            Some(existing) => *existing = tab,
            None => self.tabs.push(tab),
        }
    }

    /// Serializes to the persisted JSON shape: an array of tab objects in
    /// display order.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(&self.tabs).unwrap_or(Value::Array(Vec::new()))
    }

    /// Reads a TabSet from a persisted JSON document, validating at the
    /// storage boundary instead of assuming the stored shape is correct.
    ///
    /// Anything that is not an array yields an empty set; rows that are not
    /// objects are dropped; missing fields default to empty; unrecognized
    /// layouts normalize to `editor`.
    pub fn from_value(value: &Value) -> Self {
        let rows = match value.as_array() {
            Some(rows) => rows,
            None => return Self::default(),
        };

        let mut set = Self::default();
        for row in rows {
            let obj = match row.as_object() {
                Some(obj) => obj,
                None => continue,
            };
            let id = match obj.get("id").and_then(Value::as_str) {
                Some(id) if !id.is_empty() => id.to_string(),
                _ => continue,
            };

            let tab = Tab {
                id,
                title: str_field(obj.get("title")),
                layout: TabLayout::parse(&str_field(obj.get("layout"))),
                content: str_field(obj.get("content")),
                items: read_items(obj.get("items")),
                videos: read_videos(obj.get("videos")),
            };
            set.upsert(tab);
        }
        set
    }
}

fn str_field(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn read_items(value: Option<&Value>) -> Vec<ResourceItem> {
    let entries = match value.and_then(Value::as_array) {
        Some(entries) => entries,
        None => return Vec::new(),
    };

    entries
        .iter()
        .filter_map(|entry| {
            let obj = entry.as_object()?;
            let id = obj.get("id").and_then(Value::as_str)?;
            if id.is_empty() {
                return None;
            }
            Some(ResourceItem {
                id: id.to_string(),
                label: str_field(obj.get("label")),
                url: str_field(obj.get("url")),
                thumb: str_field(obj.get("thumb")),
            })
        })
        .collect()
}

fn read_videos(value: Option<&Value>) -> Vec<VideoEntry> {
    let entries = match value.and_then(Value::as_array) {
        Some(entries) => entries,
        None => return Vec::new(),
    };

    entries
        .iter()
        .filter_map(|entry| {
            let obj = entry.as_object()?;
            let id = obj.get("id").and_then(Value::as_str)?;
            if id.is_empty() {
                return None;
            }
            Some(VideoEntry {
                id: id.to_string(),
                title: str_field(obj.get("title")),
                url: str_field(obj.get("url")),
            })
        })
        .collect()
}

/// Generates a server-authoritative identifier with the given prefix
/// ("row", "item", "vid"). Always slug-safe.
pub fn fresh_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}
