//! Property-based tests for form sanitization.
//!
//! The posted payload is attacker-controlled JSON of any shape. Sanitizing
//! it must never panic, and whatever survives must already be in clean,
//! slug-keyed form.

use proptest::prelude::*;
use serde_json::Value;

use tabforge::managers::save_pipeline::sanitize_form;

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[ -~]{0,20}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 32, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::btree_map("[ -~]{0,8}", inner, 0..5)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn is_slug(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn sanitizing_arbitrary_json_never_panics(form in arb_json()) {
        let _ = sanitize_form(&form);
    }

    #[test]
    fn surviving_rows_are_clean(form in arb_json()) {
        let set = sanitize_form(&form);

        for tab in set.iter() {
            prop_assert!(is_slug(&tab.id), "tab id {:?} is not slug-safe", tab.id);
            prop_assert!(!tab.title.contains('<'));

            for item in &tab.items {
                prop_assert!(is_slug(&item.id));
                prop_assert!(item.url.is_empty() || item.url.starts_with("http"));
                prop_assert!(item.thumb.is_empty() || item.thumb.starts_with("http"));
                // An entry with nothing in it would have been dropped
                prop_assert!(
                    !(item.label.is_empty() && item.url.is_empty() && item.thumb.is_empty())
                );
            }
            for video in &tab.videos {
                prop_assert!(is_slug(&video.id));
                prop_assert!(video.url.is_empty() || video.url.starts_with("http"));
                prop_assert!(!(video.title.is_empty() && video.url.is_empty()));
            }
        }
    }

    #[test]
    fn non_object_payloads_yield_empty_sets(form in arb_json()) {
        prop_assume!(!form.is_object());
        prop_assert!(sanitize_form(&form).is_empty());
    }
}
