//! Field-level deserialization helpers shared by the content records.
//!
//! Content files written by hand tend to keep a key with an empty value
//! (`website = ""`) instead of deleting it. Those values are normalised to
//! `None` here so the renderer never has to tell "empty" from "absent".

use serde::{Deserialize, Deserializer};

/// Deserialize an optional string, mapping blank strings to `None`.
pub fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Deserialize an optional year-like value that may be written as a string
/// (`"2023"`, `"Present"`) or a bare integer (`2023`).
pub fn year_like<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum YearLike {
        Text(String),
        Number(i64),
    }

    let value = Option::<YearLike>::deserialize(deserializer)?;
    Ok(value
        .map(|v| match v {
            YearLike::Text(s) => s,
            YearLike::Number(n) => n.to_string(),
        })
        .filter(|s| !s.trim().is_empty()))
}

/// Extract the leading four-digit year of a date string (`"2023"`, `"2023-05"`).
///
/// Returns `None` for open-ended markers such as `"Present"`.
#[must_use]
pub fn leading_year(value: &str) -> Option<i32> {
    let digits: String = value.trim().chars().take(4).collect();
    if digits.len() == 4 && digits.chars().all(|c| c.is_ascii_digit()) {
        digits.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Record {
        #[serde(default, deserialize_with = "non_empty")]
        website: Option<String>,
        #[serde(default, deserialize_with = "year_like")]
        year: Option<String>,
    }

    #[test]
    fn test_non_empty_maps_blank_to_none() {
        let record: Record = toml::from_str(r#"website = """#).unwrap();
        assert!(record.website.is_none());

        let record: Record = toml::from_str(r#"website = "   ""#).unwrap();
        assert!(record.website.is_none());

        let record: Record = toml::from_str(r#"website = "https://5genesis.eu""#).unwrap();
        assert_eq!(record.website.as_deref(), Some("https://5genesis.eu"));
    }

    #[test]
    fn test_non_empty_missing_key() {
        let record: Record = toml::from_str("").unwrap();
        assert!(record.website.is_none());
        assert!(record.year.is_none());
    }

    #[test]
    fn test_year_like_accepts_numbers_and_text() {
        let record: Record = toml::from_str("year = 2019").unwrap();
        assert_eq!(record.year.as_deref(), Some("2019"));

        let record: Record = toml::from_str(r#"year = "Present""#).unwrap();
        assert_eq!(record.year.as_deref(), Some("Present"));
    }

    #[test]
    fn test_leading_year() {
        assert_eq!(leading_year("2023"), Some(2023));
        assert_eq!(leading_year("2023-05"), Some(2023));
        assert_eq!(leading_year(" 1999 "), Some(1999));
        assert_eq!(leading_year("Present"), None);
        assert_eq!(leading_year("99"), None);
    }
}
