//! Response shape normalization
//!
//! List endpoints answer either with a bare array or with an object that
//! wraps the array under a conventional field (`{"products": [...]}`).
//! Callers always get a plain list.

use serde_json::Value;

/// Extract the list from a list-endpoint body.
///
/// Precedence:
/// 1. a bare JSON array is the list;
/// 2. an object whose `field` member is an array yields that array;
/// 3. anything else yields an empty list.
pub fn normalize_list(value: Value, field: &str) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove(field) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_array() {
        let items = normalize_list(json!([{"name": "a"}, {"name": "b"}]), "products");
        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["name"], "b");
    }

    #[test]
    fn test_wrapped_array() {
        let items = normalize_list(json!({"users": [1, 2, 3], "page": 1}), "users");
        assert_eq!(items, vec![json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn test_wrong_field_is_empty() {
        assert!(normalize_list(json!({"users": [1]}), "products").is_empty());
    }

    #[test]
    fn test_field_not_an_array_is_empty() {
        assert!(normalize_list(json!({"products": {"a": 1}}), "products").is_empty());
        assert!(normalize_list(json!({"products": null}), "products").is_empty());
    }

    #[test]
    fn test_scalars_are_empty() {
        assert!(normalize_list(json!(null), "products").is_empty());
        assert!(normalize_list(json!("products"), "products").is_empty());
        assert!(normalize_list(json!(42), "products").is_empty());
    }
}
