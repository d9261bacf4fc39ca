//! Curated external links.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fields::non_empty;

/// Fixed topic a link is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LinkCategory {
    #[serde(rename = "5G/6G Research")]
    MobileResearch,
    #[serde(rename = "Standards & Specifications")]
    Standards,
    #[serde(rename = "Tools & Frameworks")]
    Tools,
    #[serde(rename = "Organizations & Consortia")]
    Organizations,
    #[serde(rename = "Educational Resources")]
    Education,
    #[serde(rename = "Research Databases")]
    Databases,
    #[serde(rename = "Cybersecurity")]
    Cybersecurity,
    #[serde(rename = "Cloud & Edge Computing")]
    CloudEdge,
    #[serde(rename = "Network Management")]
    NetworkManagement,
    #[serde(rename = "AI & Machine Learning")]
    MachineLearning,
}

impl LinkCategory {
    /// All categories, in display order.
    pub const ALL: [LinkCategory; 10] = [
        Self::MobileResearch,
        Self::Standards,
        Self::Tools,
        Self::Organizations,
        Self::Education,
        Self::Databases,
        Self::Cybersecurity,
        Self::CloudEdge,
        Self::NetworkManagement,
        Self::MachineLearning,
    ];

    /// Display name, identical to the value used in content files.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::MobileResearch => "5G/6G Research",
            Self::Standards => "Standards & Specifications",
            Self::Tools => "Tools & Frameworks",
            Self::Organizations => "Organizations & Consortia",
            Self::Education => "Educational Resources",
            Self::Databases => "Research Databases",
            Self::Cybersecurity => "Cybersecurity",
            Self::CloudEdge => "Cloud & Edge Computing",
            Self::NetworkManagement => "Network Management",
            Self::MachineLearning => "AI & Machine Learning",
        }
    }

    /// URL fragment for the category heading.
    #[must_use]
    pub fn anchor(&self) -> String {
        self.label()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect::<String>()
            .split('-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl fmt::Display for LinkCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A curated external resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Link {
    pub title: String,

    pub url: String,

    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub category: LinkCategory,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub featured: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<NaiveDate>,
}
