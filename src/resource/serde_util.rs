//! Serde coercions for loosely typed wire fields.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes an optional integer sent either as a JSON number or as a
/// numeric string (`"1"`).
pub mod opt_int {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("Invalid integer: {}", n))),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("Invalid integer: {}", s))),
            Some(other) => Err(serde::de::Error::custom(format!(
                "Expected integer, got {}",
                other
            ))),
        }
    }
}

/// Deserializes an optional identifier sent either as a string or as a
/// number (older compute APIs use integer ids for hypervisors and services).
pub mod opt_string {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(other) => Err(serde::de::Error::custom(format!(
                "Expected string or number, got {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "super::opt_int::deserialize")]
        count: Option<i64>,
        #[serde(default, deserialize_with = "super::opt_string::deserialize")]
        id: Option<String>,
    }

    #[test]
    fn integers_accept_numbers_and_numeric_strings() {
        let p: Probe = serde_json::from_str(r#"{"count": "3", "id": 17}"#).unwrap();
        assert_eq!(p.count, Some(3));
        assert_eq!(p.id.as_deref(), Some("17"));

        let p: Probe = serde_json::from_str(r#"{"count": 8, "id": "abc"}"#).unwrap();
        assert_eq!(p.count, Some(8));
        assert_eq!(p.id.as_deref(), Some("abc"));
    }

    #[test]
    fn null_missing_and_blank_are_unset() {
        let p: Probe = serde_json::from_str(r#"{"count": null}"#).unwrap();
        assert_eq!(p.count, None);
        assert_eq!(p.id, None);

        let p: Probe = serde_json::from_str(r#"{"count": ""}"#).unwrap();
        assert_eq!(p.count, None);
    }

    #[test]
    fn non_numeric_string_is_rejected() {
        assert!(serde_json::from_str::<Probe>(r#"{"count": "many"}"#).is_err());
    }
}
