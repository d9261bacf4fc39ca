//! Curriculum vitae records.

use serde::{Deserialize, Serialize};

use super::DateRange;
use crate::fields::{non_empty, year_like};

/// A titled CV section such as "Education". Item order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CvSection {
    pub title: String,

    #[serde(default)]
    pub items: Vec<CvItem>,
}

/// One entry of a CV section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CvItem {
    pub title: String,

    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, deserialize_with = "year_like", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(default, deserialize_with = "year_like", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    /// Short description, written in Markdown.
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Bullet points. `Some(vec![])` is kept distinct from `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl CvItem {
    /// The item's period.
    #[must_use]
    pub fn period(&self) -> DateRange<'_> {
        DateRange::new(self.start_date.as_deref(), self.end_date.as_deref())
    }

    /// Detail bullets, empty when the list is absent.
    #[must_use]
    pub fn details(&self) -> &[String] {
        self.details.as_deref().unwrap_or_default()
    }
}

/// A named group of skills, e.g. "Programming & Tools".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkillGroup {
    pub category: String,

    #[serde(default)]
    pub items: Vec<String>,
}

/// An award or honour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Award {
    pub title: String,

    pub organization: String,

    #[serde(deserialize_with = "required_year")]
    pub year: String,

    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A professional service role such as reviewing or chairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceRole {
    pub role: String,

    pub organization: String,

    /// Free-form period, e.g. "2015-Present".
    pub period: String,

    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn required_year<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    year_like(deserializer)?.ok_or_else(|| serde::de::Error::custom("year cannot be empty"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_section_preserves_order() {
        let section: CvSection = toml::from_str(
            r#"
title = "Education"

[[items]]
title = "M.Sc. in Automation Systems"
organization = "National Technical University of Athens (NTUA)"
start_date = "1999"
end_date = "2001"
details = []

[[items]]
title = "B.Sc. in Physics"
start_date = 1994
end_date = 1999
description = ""
"#,
        )
        .unwrap();

        assert_eq!(section.items.len(), 2);
        assert_eq!(section.items[0].title, "M.Sc. in Automation Systems");
        assert_eq!(section.items[1].title, "B.Sc. in Physics");
        assert_eq!(section.items[1].period().to_string(), "1994 – 1999");
        assert!(section.items[1].description.is_none());
    }

    #[test]
    fn test_empty_details_distinct_from_absent() {
        let with_empty: CvItem = toml::from_str("title = \"a\"\ndetails = []").unwrap();
        let without: CvItem = toml::from_str("title = \"a\"").unwrap();

        assert_eq!(with_empty.details, Some(Vec::new()));
        assert_eq!(without.details, None);
        assert!(with_empty.details().is_empty());
        assert!(without.details().is_empty());
    }

    #[test]
    fn test_award_year_accepts_number() {
        let award: Award = toml::from_str(
            "title = \"Best Paper Award\"\norganization = \"IEEE CNSM\"\nyear = 2019",
        )
        .unwrap();
        assert_eq!(award.year, "2019");
    }

    #[test]
    fn test_award_requires_year() {
        let result: Result<Award, _> =
            toml::from_str("title = \"Best Paper Award\"\norganization = \"IEEE CNSM\"\nyear = \"\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_cv_item_rejects_unknown_keys() {
        let result: Result<CvItem, _> = toml::from_str("title = \"a\"\ngrade = \"A\"");
        assert!(result.is_err());
    }
}
