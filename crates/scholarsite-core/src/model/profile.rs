//! The site owner's profile record.

use serde::{Deserialize, Serialize};

use crate::fields::non_empty;

/// Profile shown on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    /// Full name.
    pub name: String,

    /// Position or headline.
    pub title: String,

    /// Institution or group.
    pub affiliation: String,

    /// Home page of the affiliation.
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub affiliation_url: Option<String>,

    /// Biography, written in Markdown.
    pub bio: String,

    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Site-relative path or URL of the portrait.
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,

    /// Site-relative path or URL of a downloadable CV.
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub cv_url: Option<String>,

    #[serde(default)]
    pub research_interests: Vec<String>,

    #[serde(default)]
    pub social_links: SocialLinks,
}

/// Academic and social network profiles, each optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLinks {
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub google_scholar: Option<String>,

    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub orcid: Option<String>,

    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub research_gate: Option<String>,

    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,

    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,

    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
}

/// A platform a social link points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocialPlatform {
    GoogleScholar,
    Orcid,
    ResearchGate,
    LinkedIn,
    GitHub,
    Twitter,
}

impl SocialPlatform {
    /// All platforms, in display order.
    pub const ALL: [SocialPlatform; 6] = [
        Self::GoogleScholar,
        Self::Orcid,
        Self::ResearchGate,
        Self::LinkedIn,
        Self::GitHub,
        Self::Twitter,
    ];

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::GoogleScholar => "Google Scholar",
            Self::Orcid => "ORCID",
            Self::ResearchGate => "ResearchGate",
            Self::LinkedIn => "LinkedIn",
            Self::GitHub => "GitHub",
            Self::Twitter => "X / Twitter",
        }
    }

    /// Stable identifier used in CSS classes and content keys.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::GoogleScholar => "google-scholar",
            Self::Orcid => "orcid",
            Self::ResearchGate => "researchgate",
            Self::LinkedIn => "linkedin",
            Self::GitHub => "github",
            Self::Twitter => "twitter",
        }
    }
}

impl SocialLinks {
    /// URL configured for a platform.
    #[must_use]
    pub fn get(&self, platform: SocialPlatform) -> Option<&str> {
        let url = match platform {
            SocialPlatform::GoogleScholar => &self.google_scholar,
            SocialPlatform::Orcid => &self.orcid,
            SocialPlatform::ResearchGate => &self.research_gate,
            SocialPlatform::LinkedIn => &self.linkedin,
            SocialPlatform::GitHub => &self.github,
            SocialPlatform::Twitter => &self.twitter,
        };
        url.as_deref()
    }

    /// Present links in display order.
    pub fn iter(&self) -> impl Iterator<Item = (SocialPlatform, &str)> {
        SocialPlatform::ALL
            .into_iter()
            .filter_map(|platform| self.get(platform).map(|url| (platform, url)))
    }
}
