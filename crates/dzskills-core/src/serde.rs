use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// Deserializes an optional UUID query parameter, treating `""` as absent.
pub fn deserialize_optional_uuid<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => Uuid::parse_str(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Filter {
        #[serde(default, deserialize_with = "deserialize_optional_uuid")]
        category_id: Option<Uuid>,
    }

    #[test]
    fn test_empty_string_is_none() {
        let f: Filter = serde_json::from_str(r#"{"category_id":""}"#).unwrap();
        assert!(f.category_id.is_none());
    }

    #[test]
    fn test_missing_is_none() {
        let f: Filter = serde_json::from_str("{}").unwrap();
        assert!(f.category_id.is_none());
    }

    #[test]
    fn test_valid_uuid() {
        let id = Uuid::new_v4();
        let f: Filter = serde_json::from_str(&format!(r#"{{"category_id":"{}"}}"#, id)).unwrap();
        assert_eq!(f.category_id, Some(id));
    }

    #[test]
    fn test_invalid_uuid_is_error() {
        let result: Result<Filter, _> = serde_json::from_str(r#"{"category_id":"nope"}"#);
        assert!(result.is_err());
    }
}
