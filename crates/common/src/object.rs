//! Helpers for sanitising loosely-typed JSON request bodies.

use serde_json::{Map, Value};

use crate::{AppError, AppResult};

/// Deep-copies a JSON object so it can be mutated without touching the
/// caller's value.
pub fn copy_object(value: &Value) -> AppResult<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map.clone()),
        _ => Err(AppError::BadRequest(
            "Request body must be a JSON object".to_string(),
        )),
    }
}

/// Removes denylisted keys and values that carry no information.
///
/// String values and string items of arrays are trimmed. A key is dropped
/// when it is denylisted, when its value is `null`, an empty or `"0"`
/// string, the number zero, or an empty array.
pub fn delete_invalid_property_in_object(data: &mut Map<String, Value>, denylist: &[&str]) {
    data.retain(|key, value| {
        if denylist.contains(&key.as_str()) {
            return false;
        }

        match value {
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.len() != s.len() {
                    *s = trimmed.to_string();
                }
            }
            Value::Array(items) => {
                for item in items.iter_mut() {
                    if let Value::String(s) = item {
                        *s = s.trim().to_string();
                    }
                }
            }
            _ => {}
        }

        !is_nullish(value)
    });
}

fn is_nullish(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty() || s == "0",
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(items) => items.is_empty(),
        Value::Bool(_) | Value::Object(_) => false,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_copy_object_is_independent() {
        let original = json!({ "title": "Rice" });
        let mut copy = copy_object(&original).unwrap();
        copy.insert("title".to_string(), json!("Bread"));

        assert_eq!(original["title"], "Rice");
        assert_eq!(copy["title"], "Bread");
    }

    #[test]
    fn test_copy_object_rejects_non_objects() {
        assert!(matches!(
            copy_object(&json!([1, 2])),
            Err(AppError::BadRequest(_))
        ));
        assert!(copy_object(&json!("text")).is_err());
    }

    #[test]
    fn test_denylisted_keys_are_removed() {
        let mut data = copy_object(&json!({
            "title": "Rice",
            "likes": ["u1"],
            "bookmarks": ["u2"],
            "reviews": [{ "text": "ok" }],
        }))
        .unwrap();

        delete_invalid_property_in_object(&mut data, &["bookmarks", "likes", "reviews"]);

        assert_eq!(data.len(), 1);
        assert_eq!(data["title"], "Rice");
    }

    #[test]
    fn test_nullish_values_are_removed() {
        let mut data = copy_object(&json!({
            "title": "  Rice  ",
            "description": "   ",
            "slug": "0",
            "price": 0,
            "imageLink": null,
            "tags": [],
            "discount": 5,
        }))
        .unwrap();

        delete_invalid_property_in_object(&mut data, &[]);

        assert_eq!(data["title"], "Rice");
        assert_eq!(data["discount"], 5);
        assert!(!data.contains_key("description"));
        assert!(!data.contains_key("slug"));
        assert!(!data.contains_key("price"));
        assert!(!data.contains_key("imageLink"));
        assert!(!data.contains_key("tags"));
    }

    #[test]
    fn test_array_items_are_trimmed() {
        let mut data = copy_object(&json!({ "tags": [" a ", "b"] })).unwrap();
        delete_invalid_property_in_object(&mut data, &[]);
        assert_eq!(data["tags"], json!(["a", "b"]));
    }
}
