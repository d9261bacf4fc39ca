//! Research projects and the catalog that groups them by status.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DateRange;
use crate::fields::{non_empty, year_like};

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Completed,
}

impl ProjectStatus {
    /// Lowercase identifier, as written in content files.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Heading used when projects are grouped by status.
    #[must_use]
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Active => "Active Projects",
            Self::Completed => "Completed Projects",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A funded research project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub title: String,

    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub acronym: Option<String>,

    /// Summary, written in Markdown.
    pub description: String,

    /// The owner's role in the project.
    pub role: String,

    pub status: ProjectStatus,

    #[serde(deserialize_with = "required_date")]
    pub start_date: String,

    /// `None` renders as an open range ("2023 – Present").
    #[serde(default, deserialize_with = "year_like", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    /// Funding body, e.g. "European Commission".
    pub funding: String,

    /// Funding programme, e.g. "Horizon Europe".
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub funding_program: Option<String>,

    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub technologies: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub objectives: Vec<String>,

    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,

    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,

    /// Ids of publications produced by the project.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub publications: Vec<String>,
}

impl Project {
    /// The project's period, open-ended when no end date is set.
    #[must_use]
    pub fn period(&self) -> DateRange<'_> {
        DateRange::new(
            Some(self.start_date.as_str()),
            Some(self.end_date.as_deref().unwrap_or("Present")),
        )
    }

    /// Acronym if present, otherwise the full title.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.acronym.as_deref().unwrap_or(&self.title)
    }
}

fn required_date<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    year_like(deserializer)?.ok_or_else(|| serde::de::Error::custom("start_date cannot be empty"))
}

/// Portfolio-level facts that are not derived from the project list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectSummary {
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub total_funding: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub research_areas: Vec<String>,
}

/// Counts and summary facts for the projects page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectStats<'a> {
    pub total_projects: usize,
    pub active_projects: usize,
    pub completed_projects: usize,
    pub total_funding: Option<&'a str>,
    pub research_areas: &'a [String],
}

/// Projects partitioned by status, each group in declared order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectCatalog {
    active: Vec<Project>,
    completed: Vec<Project>,
    /// Group and position within the group, in file order.
    declared: Vec<(ProjectStatus, usize)>,
    summary: ProjectSummary,
}

impl ProjectCatalog {
    /// Partition projects by status, keeping their relative order.
    #[must_use]
    pub fn new(projects: Vec<Project>, summary: ProjectSummary) -> Self {
        let mut active = Vec::new();
        let mut completed = Vec::new();
        let mut declared = Vec::with_capacity(projects.len());
        for project in projects {
            let group = match project.status {
                ProjectStatus::Active => &mut active,
                ProjectStatus::Completed => &mut completed,
            };
            declared.push((project.status, group.len()));
            group.push(project);
        }
        Self {
            active,
            completed,
            declared,
            summary,
        }
    }

    /// Projects with status `active`.
    #[must_use]
    pub fn active(&self) -> &[Project] {
        &self.active
    }

    /// Projects with status `completed`.
    #[must_use]
    pub fn completed(&self) -> &[Project] {
        &self.completed
    }

    /// Projects of one status.
    #[must_use]
    pub fn with_status(&self, status: ProjectStatus) -> &[Project] {
        match status {
            ProjectStatus::Active => &self.active,
            ProjectStatus::Completed => &self.completed,
        }
    }

    /// All projects: active ones first, then completed ones.
    pub fn all(&self) -> impl Iterator<Item = &Project> {
        self.active.iter().chain(self.completed.iter())
    }

    /// All projects in the order they were declared.
    pub fn in_declared_order(&self) -> impl Iterator<Item = &Project> {
        self.declared
            .iter()
            .map(|&(status, i)| &self.with_status(status)[i])
    }

    /// Total number of projects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len() + self.completed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn summary(&self) -> &ProjectSummary {
        &self.summary
    }

    /// Counts derived from the current lists.
    #[must_use]
    pub fn stats(&self) -> ProjectStats<'_> {
        ProjectStats {
            total_projects: self.all().count(),
            active_projects: self.active.len(),
            completed_projects: self.completed.len(),
            total_funding: self.summary.total_funding.as_deref(),
            research_areas: &self.summary.research_areas,
        }
    }
}
