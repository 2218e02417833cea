//! Serde helpers for partial-update payloads.
//!
//! JSON update bodies need to distinguish "field absent" (leave unchanged)
//! from "field is null" (clear it). Pair these with `#[serde(default)]`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Deserialize a present field (including `null`) as `Some(_)`.
///
/// With `#[serde(default)]`, an absent field stays `None`, so the result is:
/// absent → `None`, `null` → `Some(None)`, value → `Some(Some(value))`.
pub fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Serialize the counterpart of [`deserialize_nullable`].
///
/// Use with `skip_serializing_if = "Option::is_none"` so that an absent
/// field is omitted and `Some(None)` is written as `null`.
pub fn serialize_nullable<S, T>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    match value {
        Some(inner) => inner.serialize(serializer),
        None => serializer.serialize_none(),
    }
}

/// Deserialize an optional string, treating blank strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    struct Patch {
        #[serde(
            default,
            deserialize_with = "deserialize_nullable",
            serialize_with = "serialize_nullable",
            skip_serializing_if = "Option::is_none"
        )]
        link: Option<Option<Uuid>>,
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        note: Option<String>,
    }

    #[test]
    fn absent_field_is_none() {
        let patch: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(patch.link, None);
        assert_eq!(patch.note, None);
    }

    #[test]
    fn null_field_is_some_none() {
        let patch: Patch = serde_json::from_str(r#"{"link": null}"#).unwrap();
        assert_eq!(patch.link, Some(None));
    }

    #[test]
    fn present_field_is_some_some() {
        let id = Uuid::new_v4();
        let patch: Patch = serde_json::from_str(&format!(r#"{{"link": "{id}"}}"#)).unwrap();
        assert_eq!(patch.link, Some(Some(id)));
    }

    #[test]
    fn serialization_preserves_three_states() {
        let cleared = Patch {
            link: Some(None),
            note: None,
        };
        assert_eq!(
            serde_json::to_string(&cleared).unwrap(),
            r#"{"link":null,"note":null}"#
        );

        let untouched = Patch {
            link: None,
            note: None,
        };
        assert_eq!(serde_json::to_string(&untouched).unwrap(), r#"{"note":null}"#);
    }

    #[test]
    fn blank_string_is_none() {
        let patch: Patch = serde_json::from_str(r#"{"note": "   "}"#).unwrap();
        assert_eq!(patch.note, None);
    }
}
