//! Typed content records.
//!
//! Every record is a closed shape: unknown keys are rejected when a content
//! file is loaded, and fields constrained to a fixed vocabulary are enums.
//! Post front matter follows the same rule.

mod cv;
mod link;
mod post;
mod profile;
mod project;
mod publication;

use std::fmt;

pub use cv::{Award, CvItem, CvSection, ServiceRole, SkillGroup};
pub use link::{Link, LinkCategory};
pub use post::{Post, PostMeta, sort_newest_first};
pub use profile::{Profile, SocialLinks, SocialPlatform};
pub use project::{Project, ProjectCatalog, ProjectStats, ProjectStatus, ProjectSummary};
pub use publication::{Publication, PublicationKind, PublicationList, ScholarStats};

use crate::fields::leading_year;

/// Separator placed between the two ends of a date range.
pub const RANGE_SEPARATOR: &str = " \u{2013} ";

/// A display period such as `2023 – 2025`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange<'a> {
    start: Option<&'a str>,
    end: Option<&'a str>,
}

impl<'a> DateRange<'a> {
    /// Create a range from optional endpoints.
    #[must_use]
    pub fn new(start: Option<&'a str>, end: Option<&'a str>) -> Self {
        Self { start, end }
    }

    /// Range start.
    #[must_use]
    pub fn start(&self) -> Option<&'a str> {
        self.start
    }

    /// Range end.
    #[must_use]
    pub fn end(&self) -> Option<&'a str> {
        self.end
    }

    /// True when neither endpoint is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Whether the start does not come after the end.
    ///
    /// Only endpoints that begin with a four-digit year are compared; open
    /// markers such as `Present` always satisfy the ordering.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        match (
            self.start.and_then(leading_year),
            self.end.and_then(leading_year),
        ) {
            (Some(start), Some(end)) => start <= end,
            _ => true,
        }
    }
}

impl fmt::Display for DateRange<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.start, self.end) {
            (Some(start), Some(end)) => write!(f, "{start}{RANGE_SEPARATOR}{end}"),
            (Some(only), None) | (None, Some(only)) => f.write_str(only),
            (None, None) => Ok(()),
        }
    }
}
