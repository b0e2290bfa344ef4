//! Common serde helpers for form payloads

use serde::{Deserialize, Deserializer};

/// Deserialize an optional string that treats `""` (or whitespace) as absent
///
/// Web forms send an untouched optional input as an empty string.
pub fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
        .map(|opt| opt.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "blank_as_none")]
        email: Option<String>,
    }

    #[test]
    fn test_blank_as_none() {
        let parse = |s: &str| serde_json::from_str::<Form>(s).unwrap().email;
        assert_eq!(parse(r#"{"email": ""}"#), None);
        assert_eq!(parse(r#"{"email": "   "}"#), None);
        assert_eq!(parse(r#"{"email": null}"#), None);
        assert_eq!(parse(r#"{}"#), None);
        assert_eq!(parse(r#"{"email": "a@b.ma"}"#).as_deref(), Some("a@b.ma"));
    }
}
