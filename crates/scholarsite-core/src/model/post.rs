//! Blog posts written as Markdown files with front matter.

use std::{cmp::Reverse, path::Path};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    error::{CoreError, Result},
    fields::non_empty,
    frontmatter::{FrontmatterFormat, split_frontmatter},
};

/// Front matter of a post.
///
/// Dates are `YYYY-MM-DD` strings in both TOML and YAML. The camel-case
/// aliases accept front matter written for JavaScript site generators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostMeta {
    pub title: String,

    pub description: String,

    #[serde(alias = "pubDate")]
    pub pub_date: NaiveDate,

    #[serde(default, alias = "updatedDate", skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<NaiveDate>,

    /// Falls back to the profile name when absent.
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub draft: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub featured: bool,

    #[serde(
        default,
        alias = "heroImage",
        deserialize_with = "non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub hero_image: Option<String>,
}

/// A post loaded from `posts/<slug>.md`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// File stem, used as the last URL segment.
    pub slug: String,
    pub meta: PostMeta,
    /// Markdown body after the front matter.
    pub body: String,
}

impl Post {
    /// Parse a post from its source text. `path` is only used in errors.
    pub fn parse(slug: impl Into<String>, source: &str, path: &Path) -> Result<Self> {
        let (format, raw, body) = split_frontmatter(source).ok_or_else(|| {
            CoreError::content(path, "post must start with a `+++` or `---` front matter block")
        })?;

        let meta: PostMeta = match format {
            FrontmatterFormat::Toml => {
                toml::from_str(raw).map_err(|e| CoreError::content(path, e.to_string()))?
            }
            FrontmatterFormat::Yaml => {
                serde_yaml::from_str(raw).map_err(|e| CoreError::content(path, e.to_string()))?
            }
        };

        Ok(Self {
            slug: slug.into(),
            meta,
            body: body.to_string(),
        })
    }

    /// Render the post back to Markdown with TOML front matter.
    pub fn to_markdown(&self) -> Result<String> {
        let meta = toml::to_string(&self.meta)?;
        Ok(format!("+++\n{meta}+++\n\n{}", self.body))
    }

    #[must_use]
    pub fn is_draft(&self) -> bool {
        self.meta.draft
    }

    /// Date of the latest revision.
    #[must_use]
    pub fn last_modified(&self) -> NaiveDate {
        self.meta.updated_date.unwrap_or(self.meta.pub_date)
    }
}

/// Sort newest first; posts from the same day are ordered by slug.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| {
        (Reverse(a.meta.pub_date), &a.slug).cmp(&(Reverse(b.meta.pub_date), &b.slug))
    });
}
