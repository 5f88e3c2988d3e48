//! Comma-joined tag lists at the persistence boundary.
//!
//! Services and ingredients are `Vec<String>` everywhere in the domain. Only
//! snapshot rows store them as a single comma-separated string.

/// Joins tags with `,` for storage.
///
/// Commas inside a tag would not survive a round trip, so they are replaced
/// with spaces.
pub fn join_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| tag.replace(',', " ").trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// Splits a stored tag string, trimming whitespace and dropping empty entries.
pub fn split_tags(stored: &str) -> Vec<String> {
    stored
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

/// Serde adapter for `Vec<String>` fields stored as a comma-joined string.
pub mod comma_joined {
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize as a single joined string.
    pub fn serialize<S: Serializer>(tags: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::join_tags(tags))
    }

    /// Deserialize from a joined string; `null` yields an empty list.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<String>, D::Error> {
        let stored = Option::<String>::deserialize(deserializer)?;
        Ok(stored.as_deref().map(super::split_tags).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_split_trims_and_drops_empty() {
        assert_eq!(
            split_tags("parking, duchas,,socorrista "),
            tags(&["parking", "duchas", "socorrista"])
        );
    }

    #[test]
    fn test_split_empty_string() {
        assert!(split_tags("").is_empty());
        assert!(split_tags(" , ").is_empty());
    }

    #[test]
    fn test_join_keeps_order() {
        assert_eq!(join_tags(&tags(&["parking", "duchas", "wifi"])), "parking,duchas,wifi");
        assert_eq!(join_tags(&[]), "");
    }

    #[test]
    fn test_join_strips_embedded_commas() {
        let joined = join_tags(&tags(&["sobrasada, miel", "pan"]));
        assert_eq!(split_tags(&joined), tags(&["sobrasada  miel", "pan"]));
    }

    #[test]
    fn test_serde_adapter() {
        #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
        struct Row {
            #[serde(with = "comma_joined")]
            services: Vec<String>,
        }

        let row = Row { services: tags(&["parking", "hamacas"]) };
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"services":"parking,hamacas"}"#);
        assert_eq!(serde_json::from_str::<Row>(&json).unwrap(), row);

        let null: Row = serde_json::from_str(r#"{"services":null}"#).unwrap();
        assert!(null.services.is_empty());
    }

    proptest::proptest! {
        #[test]
        fn prop_split_inverts_join(raw in proptest::collection::vec("[a-zà-ü _]{0,12}", 0..8)) {
            let expected: Vec<String> = raw
                .iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();
            proptest::prop_assert_eq!(split_tags(&join_tags(&raw)), expected);
        }
    }
}
