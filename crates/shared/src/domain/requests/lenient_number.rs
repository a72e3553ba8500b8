//! Numeric fields posted by the web client may arrive as JSON numbers or as strings.

use serde::{Deserialize, Deserializer, de::Error};
use std::{fmt::Display, str::FromStr};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString<T> {
    Number(T),
    Text(String),
    Null,
}

/// Accepts a number, a numeric string, an empty string or null (the last two become 0).
pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr + Default,
    T::Err: Display,
{
    match NumberOrString::<T>::deserialize(deserializer)? {
        NumberOrString::Number(value) => Ok(value),
        NumberOrString::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                Ok(T::default())
            } else {
                text.parse::<T>()
                    .map_err(|e| D::Error::custom(format!("invalid number {text:?}: {e}")))
            }
        }
        NumberOrString::Null => Ok(T::default()),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "super::deserialize")]
        count: i32,
        #[serde(default, deserialize_with = "super::deserialize")]
        weight: f32,
        #[serde(default, deserialize_with = "super::deserialize")]
        sku: i64,
    }

    #[test]
    fn accepts_numbers_and_strings() {
        let sample: Sample =
            serde_json::from_str(r#"{"count": "105", "weight": 500, "sku": "24345325"}"#)
                .unwrap();
        assert_eq!(sample.count, 105);
        assert_eq!(sample.weight, 500.0);
        assert_eq!(sample.sku, 24345325);

        let sample: Sample =
            serde_json::from_str(r#"{"count": 3, "weight": "12.5", "sku": 7}"#).unwrap();
        assert_eq!(sample.count, 3);
        assert_eq!(sample.weight, 12.5);
        assert_eq!(sample.sku, 7);
    }

    #[test]
    fn empty_null_and_missing_become_zero() {
        let sample: Sample =
            serde_json::from_str(r#"{"count": "", "weight": null}"#).unwrap();
        assert_eq!(sample.count, 0);
        assert_eq!(sample.weight, 0.0);
        assert_eq!(sample.sku, 0);
    }

    #[test]
    fn rejects_non_numeric_text() {
        assert!(serde_json::from_str::<Sample>(r#"{"count": "abc"}"#).is_err());
    }
}
