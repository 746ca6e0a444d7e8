//! Forgiving deserializers for portal JSON
//!
//! Values that cannot be read as the expected shape degrade to "empty"
//! instead of failing the whole record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// String form of a scalar JSON value. Null, arrays and objects have none.
pub(crate) fn string_form(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Deserialize any scalar as its string form.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(string_form(&value))
}

/// Deserialize a sequence, replacing a non-array with an empty one and any
/// element of the wrong shape with `T::default()`.
pub(crate) fn seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(elements) => elements
            .into_iter()
            .map(|element| serde_json::from_value(element).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_form_scalars() {
        assert_eq!(string_form(&json!("abc")), Some("abc".to_string()));
        assert_eq!(string_form(&json!(72)), Some("72".to_string()));
        assert_eq!(string_form(&json!(1.75)), Some("1.75".to_string()));
        assert_eq!(string_form(&json!(true)), Some("true".to_string()));
    }

    #[test]
    fn test_string_form_non_scalars() {
        assert_eq!(string_form(&json!(null)), None);
        assert_eq!(string_form(&json!([1, 2])), None);
        assert_eq!(string_form(&json!({"a": 1})), None);
    }
}
