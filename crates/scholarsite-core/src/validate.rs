//! Load-time checks of the content invariants.
//!
//! Deserialization already enforces the closed shapes (required keys,
//! unknown keys, enum vocabularies). This pass covers what the types alone
//! cannot express: non-blank required text, unique publication ids, ordered
//! date ranges, project-to-publication references and post slugs.

use std::{
    collections::{HashMap, hash_map::Entry},
    fmt,
};

use crate::{
    content::SiteContent,
    error::{CoreError, Result},
    model::DateRange,
};

/// How serious a validation issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// A single problem found in the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub severity: Severity,

    /// Path to the offending record, e.g. `cv[1].items[2]`.
    pub location: String,

    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

/// Every issue found in one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<Issue>,
}

impl ValidationReport {
    fn error(&mut self, location: impl Into<String>, message: impl Into<String>) {
        self.issues.push(Issue {
            severity: Severity::Error,
            location: location.into(),
            message: message.into(),
        });
    }

    fn warning(&mut self, location: impl Into<String>, message: impl Into<String>) {
        self.issues.push(Issue {
            severity: Severity::Warning,
            location: location.into(),
            message: message.into(),
        });
    }

    /// All issues in the order they were found.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }

    /// Convert error-severity issues into a [`CoreError::Validation`].
    pub fn ensure_ok(&self) -> Result<()> {
        let errors: Vec<_> = self.errors().map(ToString::to_string).collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation {
                count: errors.len(),
                summary: errors.join("; "),
            })
        }
    }
}

/// Run every check against loaded content.
#[must_use]
pub fn validate(content: &SiteContent) -> ValidationReport {
    let mut report = ValidationReport::default();

    check_profile(content, &mut report);
    check_cv(content, &mut report);
    check_projects(content, &mut report);
    check_publications(content, &mut report);
    check_links(content, &mut report);
    check_posts(content, &mut report);

    report
}

fn require_text(report: &mut ValidationReport, location: &str, field: &str, value: &str) {
    if value.trim().is_empty() {
        report.error(location, format!("`{field}` cannot be empty"));
    }
}

fn is_absolute_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

fn check_profile(content: &SiteContent, report: &mut ValidationReport) {
    let profile = &content.profile;
    require_text(report, "profile", "name", &profile.name);
    require_text(report, "profile", "title", &profile.title);
    require_text(report, "profile", "affiliation", &profile.affiliation);
    require_text(report, "profile", "bio", &profile.bio);

    for (platform, url) in profile.social_links.iter() {
        if !is_absolute_url(url) {
            report.warning(
                format!("profile.social_links.{}", platform.key()),
                format!("{} link is not an absolute URL: {url}", platform.label()),
            );
        }
    }

    for (i, interest) in profile.research_interests.iter().enumerate() {
        if interest.trim().is_empty() {
            report.warning(
                format!("profile.research_interests[{i}]"),
                "blank research interest",
            );
        }
    }
}

fn check_cv(content: &SiteContent, report: &mut ValidationReport) {
    for (s, section) in content.cv.iter().enumerate() {
        let location = format!("cv[{s}]");
        require_text(report, &location, "title", &section.title);

        if section.items.is_empty() {
            report.warning(&location, format!("section `{}` has no items", section.title));
        }

        for (i, item) in section.items.iter().enumerate() {
            let location = format!("cv[{s}].items[{i}]");
            require_text(report, &location, "title", &item.title);
            check_period(report, &location, item.period());
        }
    }

    for (i, group) in content.skills.iter().enumerate() {
        require_text(report, &format!("skills[{i}]"), "category", &group.category);
    }

    for (i, award) in content.awards.iter().enumerate() {
        require_text(report, &format!("awards[{i}]"), "title", &award.title);
    }

    for (i, role) in content.service.iter().enumerate() {
        require_text(report, &format!("service[{i}]"), "role", &role.role);
    }
}

fn check_period(report: &mut ValidationReport, location: &str, period: DateRange<'_>) {
    if !period.is_ordered() {
        report.error(location, format!("start date comes after end date ({period})"));
    }
}

fn check_projects(content: &SiteContent, report: &mut ValidationReport) {
    for (i, project) in content.projects.in_declared_order().enumerate() {
        let location = format!("projects[{i}]");
        require_text(report, &location, "title", &project.title);
        require_text(report, &location, "description", &project.description);
        require_text(report, &location, "role", &project.role);
        check_period(report, &location, project.period());

        if let Some(website) = &project.website
            && !is_absolute_url(website)
        {
            report.warning(&location, format!("website is not an absolute URL: {website}"));
        }

        for id in &project.publications {
            if content.publications.get(id).is_none() {
                report.error(
                    &location,
                    format!(
                        "project `{}` references unknown publication `{id}`",
                        project.short_name()
                    ),
                );
            }
        }
    }
}

fn check_publications(content: &SiteContent, report: &mut ValidationReport) {
    let mut first_seen: HashMap<&str, usize> = HashMap::new();

    for (i, publication) in content.publications.all().iter().enumerate() {
        let location = format!("publications[{i}]");
        require_text(report, &location, "id", &publication.id);
        require_text(report, &location, "title", &publication.title);
        require_text(report, &location, "venue", &publication.venue);

        if publication.authors.is_empty() {
            report.warning(&location, "publication has no authors");
        }

        if publication.id.trim().is_empty() {
            continue;
        }

        match first_seen.entry(publication.id.as_str()) {
            Entry::Occupied(first) => report.error(
                &location,
                format!(
                    "duplicate publication id `{}` (first used by publications[{}])",
                    publication.id,
                    first.get()
                ),
            ),
            Entry::Vacant(slot) => {
                slot.insert(i);
            }
        }
    }
}

fn check_links(content: &SiteContent, report: &mut ValidationReport) {
    for (i, link) in content.links.iter().enumerate() {
        let location = format!("links[{i}]");
        require_text(report, &location, "title", &link.title);

        if link.url.trim().is_empty() {
            report.error(&location, "`url` cannot be empty");
        } else if !is_absolute_url(&link.url) {
            report.warning(&location, format!("url is not an absolute URL: {}", link.url));
        }
    }
}

/// Lowercase ASCII letters, digits and single hyphens between them.
fn is_slug(value: &str) -> bool {
    !value.is_empty()
        && value.split('-').all(|part| {
            !part.is_empty() && part.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}

fn check_posts(content: &SiteContent, report: &mut ValidationReport) {
    for post in &content.posts {
        let location = format!("posts/{}.md", post.slug);
        require_text(report, &location, "title", &post.meta.title);
        require_text(report, &location, "description", &post.meta.description);

        if !is_slug(&post.slug) {
            report.error(
                &location,
                "file name must be a slug of lowercase letters, digits and hyphens",
            );
        }

        if let Some(updated) = post.meta.updated_date
            && updated < post.meta.pub_date
        {
            report.error(
                &location,
                format!("updated_date {updated} is before pub_date {}", post.meta.pub_date),
            );
        }

        if post.body.trim().is_empty() {
            report.warning(&location, "post has no body");
        }

        if let Some(image) = &post.meta.hero_image
            && !image.starts_with('/')
            && !is_absolute_url(image)
        {
            report.warning(
                &location,
                format!("hero_image is neither site-relative nor an absolute URL: {image}"),
            );
        }
    }
}
