use tabforge::database::connection::Database;
use tabforge::managers::tab_store::{TabStore, TabStoreTrait};
use tabforge::types::tab::{Tab, TabLayout, TabSet};

fn sample_set() -> TabSet {
    let mut set = TabSet::new();
    set.upsert(Tab {
        id: "specs".to_string(),
        title: "Specifications".to_string(),
        layout: TabLayout::Editor,
        content: "<p>Details here.</p>".to_string(),
        items: Vec::new(),
        videos: Vec::new(),
    });
    set.upsert(Tab {
        id: "downloads".to_string(),
        title: "Downloads".to_string(),
        layout: TabLayout::Grid,
        content: String::new(),
        items: Vec::new(),
        videos: Vec::new(),
    });
    set
}

#[test]
fn test_save_and_load_roundtrip() {
    let db = Database::open_in_memory().unwrap();
    let mut store = TabStore::new(db.connection());

    let set = sample_set();
    store.save_tabs(42, &set).unwrap();

    let loaded = store.load_tabs(42).unwrap().unwrap();
    assert_eq!(loaded, set);
}

#[test]
fn test_load_missing_product_returns_none() {
    let db = Database::open_in_memory().unwrap();
    let store = TabStore::new(db.connection());
    assert!(store.load_tabs(999).unwrap().is_none());
}

#[test]
fn test_save_replaces_previous_document() {
    let db = Database::open_in_memory().unwrap();
    let mut store = TabStore::new(db.connection());

    store.save_tabs(1, &sample_set()).unwrap();

    let mut replacement = TabSet::new();
    replacement.upsert(Tab::new_editor());
    store.save_tabs(1, &replacement).unwrap();

    let loaded = store.load_tabs(1).unwrap().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded, replacement);
}

#[test]
fn test_save_empty_set_loads_as_empty() {
    let db = Database::open_in_memory().unwrap();
    let mut store = TabStore::new(db.connection());

    store.save_tabs(5, &TabSet::new()).unwrap();

    let loaded = store.load_tabs(5).unwrap().unwrap();
    assert!(loaded.is_empty());
}

#[test]
fn test_delete_tabs_removes_document() {
    let db = Database::open_in_memory().unwrap();
    let mut store = TabStore::new(db.connection());

    store.save_tabs(3, &sample_set()).unwrap();
    assert!(store.has_tabs(3).unwrap());

    store.delete_tabs(3).unwrap();
    assert!(!store.has_tabs(3).unwrap());
    assert!(store.load_tabs(3).unwrap().is_none());
}

#[test]
fn test_delete_missing_product_is_not_an_error() {
    let db = Database::open_in_memory().unwrap();
    let mut store = TabStore::new(db.connection());
    store.delete_tabs(123).unwrap();
}

#[test]
fn test_unparseable_stored_document_loads_as_none() {
    let db = Database::open_in_memory().unwrap();
    db.connection()
        .execute(
            "INSERT INTO product_tabs (product_id, data, updated_at) VALUES (9, 'not json{', 0)",
            [],
        )
        .unwrap();

    let store = TabStore::new(db.connection());
    assert!(store.load_tabs(9).unwrap().is_none());
}

#[test]
fn test_non_array_stored_document_loads_as_none() {
    let db = Database::open_in_memory().unwrap();
    db.connection()
        .execute(
            "INSERT INTO product_tabs (product_id, data, updated_at) VALUES (9, '{\"a\":1}', 0)",
            [],
        )
        .unwrap();

    let store = TabStore::new(db.connection());
    assert!(store.load_tabs(9).unwrap().is_none());
}

#[test]
fn test_malformed_rows_are_dropped_on_load() {
    let db = Database::open_in_memory().unwrap();
    // One valid row, one non-object, one without an id
    let data = r#"[{"id":"specs","title":"Specs","layout":"editor","content":""},42,{"title":"no id"}]"#;
    db.connection()
        .execute(
            "INSERT INTO product_tabs (product_id, data, updated_at) VALUES (9, ?1, 0)",
            [data],
        )
        .unwrap();

    let store = TabStore::new(db.connection());
    let loaded = store.load_tabs(9).unwrap().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.get("specs").unwrap().title, "Specs");
}

#[test]
fn test_unknown_layout_normalizes_to_editor_on_load() {
    let db = Database::open_in_memory().unwrap();
    let data = r#"[{"id":"specs","title":"Specs","layout":"carousel"}]"#;
    db.connection()
        .execute(
            "INSERT INTO product_tabs (product_id, data, updated_at) VALUES (9, ?1, 0)",
            [data],
        )
        .unwrap();

    let store = TabStore::new(db.connection());
    let loaded = store.load_tabs(9).unwrap().unwrap();
    assert_eq!(loaded.get("specs").unwrap().layout, TabLayout::Editor);
}

#[test]
fn test_products_are_isolated() {
    let db = Database::open_in_memory().unwrap();
    let mut store = TabStore::new(db.connection());

    store.save_tabs(1, &sample_set()).unwrap();

    assert!(store.load_tabs(2).unwrap().is_none());
    assert!(!store.has_tabs(2).unwrap());
}
