//! JSON loader.

use crate::container::EnumContainer;
use crate::error::EnumError;
use crate::tokenizer::FieldConverter;
use crate::value::Value;

use super::build_document;

/// Load a JSON object as a container with uppercase field names.
///
/// Nested objects become nested containers; arrays and scalars are stored
/// as they are.
///
/// # Example
/// ```
/// use enumerator::{load_json, Value};
///
/// let doc = load_json(r#"{"a": {"b": 1}, "c": [1, 2, 3]}"#).unwrap();
/// assert_eq!(doc["A"].as_enum().unwrap()["B"], Value::Int(1));
/// assert_eq!(doc["C"], Value::from(vec![1, 2, 3]));
/// ```
pub fn load_json(source: &str) -> Result<EnumContainer, EnumError> {
    load_json_with(source, FieldConverter::Upper)
}

/// Load a JSON object, converting top-level keys with `field_converter`.
///
/// Nested objects are built with the default (uppercase) field converter.
pub fn load_json_with(
    source: &str,
    field_converter: FieldConverter,
) -> Result<EnumContainer, EnumError> {
    let document: serde_json::Value = serde_json::from_str(source)?;
    build_document(Value::from(document), "JSON", field_converter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_objects_become_containers() {
        let doc = load_json(r#"{"a": {"b": 1}, "c": [1, 2, 3]}"#).unwrap();

        let names: Vec<&str> = doc.field_names().collect();
        assert_eq!(names, vec!["A", "C"]);

        let a = doc["A"].as_enum().unwrap();
        assert_eq!(a["B"], Value::Int(1));
        assert_eq!(doc["C"], Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)]));
    }

    #[test]
    fn test_objects_inside_arrays_stay_raw() {
        let doc = load_json(r#"{"items": [{"id": 1}]}"#).unwrap();

        let items = doc["ITEMS"].as_list().unwrap();
        assert!(matches!(&items[0], Value::Map(entries) if entries.contains_key("id")));
    }

    #[test]
    fn test_field_converter_applies_to_top_level_keys() {
        let doc =
            load_json_with(r#"{"Outer Key": {"inner": null}}"#, FieldConverter::Lower).unwrap();

        let outer = doc["outer_key"].as_enum().unwrap();
        assert_eq!(outer["INNER"], Value::Null);
    }

    #[test]
    fn test_reverse_lookup_on_loaded_values() {
        let doc = load_json(r#"{"ok": 200, "not found": 404}"#).unwrap();

        assert_eq!(doc.field_for_value(&Value::Int(404)).unwrap(), "NOT_FOUND");
        assert!(matches!(
            doc.field_for_value(&Value::Int(500)),
            Err(EnumError::ValueNotFound(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        let result = load_json(r#"{"a": "#);
        assert!(matches!(result, Err(EnumError::JsonError(_))));
    }

    #[test]
    fn test_top_level_must_be_object() {
        let result = load_json("[1, 2]");
        assert!(matches!(result, Err(EnumError::NotAMapping("JSON"))));
    }

    #[test]
    fn test_nested_key_collision() {
        let result = load_json(r#"{"a": {"x y": 1, "x-y": 2}}"#);
        assert!(matches!(result, Err(EnumError::DuplicateField(name)) if name == "X_Y"));
    }
}
