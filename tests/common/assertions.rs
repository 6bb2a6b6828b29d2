//! Domain-specific assertion macros for log2gelf harnesses.
//!
//! These add failure messages that say which GELF field or wire key was
//! wrong, instead of dumping two whole messages.

use log2gelf_core::GelfMessage;

// ---------------------------------------------------------------------------
// Field assertions
// ---------------------------------------------------------------------------

/// Assert that a `GelfMessage` carries an additional field with a value.
///
/// ```rust
/// assert_gelf_field!(message, "clientIp", "192.168.87.52");
/// assert_gelf_field!(message, "clientStatus", 403i64);
/// ```
#[macro_export]
macro_rules! assert_gelf_field {
    ($message:expr, $name:expr, $value:expr) => {{
        let message: &log2gelf_core::GelfMessage = &$message;
        let name: &str = $name;
        let expected = Some(log2gelf_core::FieldValue::from($value));
        match message.field(name) {
            Some(actual) if *actual == expected => {}
            Some(actual) => panic!(
                "assert_gelf_field! failed:\n  field {:?}\n  expected: {:?}\n  actual:   {:?}",
                name, expected, actual
            ),
            None => panic!(
                "assert_gelf_field! failed: field {:?} not set.\n  Available fields: {:?}",
                name,
                message.additional_fields().keys().collect::<Vec<_>>()
            ),
        }
    }};
}

/// Assert that a `GelfMessage` carries an additional field with no value.
#[macro_export]
macro_rules! assert_gelf_field_missing {
    ($message:expr, $name:expr) => {{
        let message: &log2gelf_core::GelfMessage = &$message;
        let name: &str = $name;
        match message.field(name) {
            Some(None) => {}
            Some(Some(actual)) => panic!(
                "assert_gelf_field_missing! failed: field {:?} has value {:?}",
                name, actual
            ),
            None => panic!("assert_gelf_field_missing! failed: field {:?} not set", name),
        }
    }};
}

// ---------------------------------------------------------------------------
// Wire assertions
// ---------------------------------------------------------------------------

/// Assert that a serialized GELF body only uses legal top-level keys: the
/// standard ones, plus additional fields prefixed with `_` (never `_id`).
pub fn assert_gelf_wire_keys(body: &serde_json::Value) {
    const STANDARD: [&str; 6] = ["version", "host", "short_message", "full_message", "timestamp", "level"];
    let object = body
        .as_object()
        .unwrap_or_else(|| panic!("GELF body is not a JSON object: {body}"));
    for key in object.keys() {
        if STANDARD.contains(&key.as_str()) {
            continue;
        }
        assert!(
            key.starts_with('_') && key.len() > 1,
            "non-standard GELF key {key:?} must be '_'-prefixed"
        );
        assert_ne!(key, "_id", "'_id' is reserved by GELF");
    }
    assert_eq!(object.get("version"), Some(&serde_json::json!("1.1")));
    assert!(object.contains_key("short_message"), "short_message is required");
}

/// Assert that delivered bodies carry the given short messages, in order.
pub fn assert_short_messages(bodies: &[serde_json::Value], expected: &[&str]) {
    let actual: Vec<&str> = bodies
        .iter()
        .map(|b| b["short_message"].as_str().unwrap_or("<missing>"))
        .collect();
    pretty_assertions::assert_eq!(actual, expected);
}

/// Assert that two messages agree on every additional field.
pub fn assert_same_fields(left: &GelfMessage, right: &GelfMessage) {
    pretty_assertions::assert_eq!(left.additional_fields(), right.additional_fields());
}
