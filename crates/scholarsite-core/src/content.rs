//! Loading the content directory into typed collections.
//!
//! The content directory holds one file per collection. Each may be TOML or
//! YAML, picked by extension:
//!
//! - `profile.toml` (required)
//! - `cv.toml` - CV sections, skills, awards and service
//! - `projects.toml` - project summary and project list
//! - `publications.toml` - scholar statistics and publication list
//! - `links.toml` - curated links
//!
//! Blog posts live next to them as `posts/<slug>.md`, one Markdown file per
//! post with TOML (`+++`) or YAML (`---`) front matter.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, info, warn};

use crate::{
    error::{CoreError, Result},
    model::{
        Award, CvSection, Link, LinkCategory, Post, Profile, Project, ProjectCatalog,
        ProjectSummary, PublicationList, ServiceRole, SkillGroup, sort_newest_first,
    },
    validate::{self, ValidationReport},
};

/// File extensions accepted for content files, in lookup order.
pub const CONTENT_EXTENSIONS: [&str; 3] = ["toml", "yaml", "yml"];

/// Subdirectory of the content directory holding blog posts.
pub const POSTS_DIR: &str = "posts";

/// Extension of post files.
pub const POST_EXTENSION: &str = "md";

/// One of the content files making up a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentFile {
    Profile,
    Cv,
    Projects,
    Publications,
    Links,
}

impl ContentFile {
    /// All content files.
    pub const ALL: [ContentFile; 5] = [
        Self::Profile,
        Self::Cv,
        Self::Projects,
        Self::Publications,
        Self::Links,
    ];

    /// File name without extension.
    #[must_use]
    pub fn stem(&self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Cv => "cv",
            Self::Projects => "projects",
            Self::Publications => "publications",
            Self::Links => "links",
        }
    }

    /// Whether a site cannot be built without this file.
    #[must_use]
    pub fn is_required(&self) -> bool {
        matches!(self, Self::Profile)
    }

    /// Match a file name such as `cv.yaml` to a content file.
    #[must_use]
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (stem, ext) = name.rsplit_once('.')?;
        if !CONTENT_EXTENSIONS.contains(&ext) {
            return None;
        }
        Self::ALL.into_iter().find(|f| f.stem() == stem)
    }

    /// Locate this file inside a content directory.
    #[must_use]
    pub fn find_in(&self, dir: &Path) -> Option<PathBuf> {
        let mut found = CONTENT_EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{}.{ext}", self.stem())))
            .filter(|path| path.is_file());

        let first = found.next()?;
        for shadowed in found {
            warn!(
                used = %first.display(),
                ignored = %shadowed.display(),
                "multiple files for the same collection"
            );
        }
        Some(first)
    }
}

/// On-disk shape of `cv.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CvFile {
    #[serde(default)]
    pub sections: Vec<CvSection>,

    #[serde(default)]
    pub skills: Vec<SkillGroup>,

    #[serde(default)]
    pub awards: Vec<Award>,

    #[serde(default)]
    pub service: Vec<ServiceRole>,
}

/// On-disk shape of `projects.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectsFile {
    #[serde(default)]
    pub summary: ProjectSummary,

    #[serde(default)]
    pub projects: Vec<Project>,
}

/// On-disk shape of `links.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinksFile {
    #[serde(default)]
    pub links: Vec<Link>,
}

/// Every collection rendered by the site, loaded and immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteContent {
    pub profile: Profile,
    pub cv: Vec<CvSection>,
    pub skills: Vec<SkillGroup>,
    pub awards: Vec<Award>,
    pub service: Vec<ServiceRole>,
    pub projects: ProjectCatalog,
    pub publications: PublicationList,
    pub links: Vec<Link>,
    /// Every post, drafts included, newest first.
    pub posts: Vec<Post>,
}

impl SiteContent {
    /// Load every collection from a content directory.
    ///
    /// Only the profile is mandatory; other missing files yield empty
    /// collections. No semantic validation is performed here.
    pub fn load(dir: &Path) -> Result<Self> {
        info!(dir = %dir.display(), "loading content");

        if !dir.is_dir() {
            return Err(CoreError::MissingContent(dir.to_path_buf()));
        }

        let profile_path = ContentFile::Profile
            .find_in(dir)
            .ok_or_else(|| CoreError::MissingContent(dir.join("profile.toml")))?;
        let profile: Profile = parse_file(&profile_path)?;

        let cv: CvFile = load_optional(dir, ContentFile::Cv)?;
        let projects: ProjectsFile = load_optional(dir, ContentFile::Projects)?;
        let publications: PublicationList = load_optional(dir, ContentFile::Publications)?;
        let links: LinksFile = load_optional(dir, ContentFile::Links)?;
        let posts = load_posts(&dir.join(POSTS_DIR))?;

        let content = Self {
            profile,
            cv: cv.sections,
            skills: cv.skills,
            awards: cv.awards,
            service: cv.service,
            projects: ProjectCatalog::new(projects.projects, projects.summary),
            publications,
            links: links.links,
            posts,
        };

        info!(
            cv_sections = content.cv.len(),
            projects = content.projects.len(),
            publications = content.publications.len(),
            links = content.links.len(),
            posts = content.posts.len(),
            "content loaded"
        );

        Ok(content)
    }

    /// Load and validate, failing on any error-severity issue.
    ///
    /// Warnings are logged and returned alongside the content.
    pub fn load_validated(dir: &Path) -> Result<(Self, ValidationReport)> {
        let content = Self::load(dir)?;
        let report = content.validate();

        for issue in report.warnings() {
            warn!(location = %issue.location, "{}", issue.message);
        }

        report.ensure_ok()?;
        Ok((content, report))
    }

    /// Check the content invariants.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        validate::validate(self)
    }

    /// Posts that are not drafts, newest first.
    pub fn published_posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter().filter(|post| !post.is_draft())
    }

    /// Look up a post by slug, drafts included.
    #[must_use]
    pub fn post(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.slug == slug)
    }

    /// Links grouped by category in category order, skipping empty groups.
    #[must_use]
    pub fn links_by_category(&self) -> Vec<(LinkCategory, Vec<&Link>)> {
        LinkCategory::ALL
            .into_iter()
            .filter_map(|category| {
                let links: Vec<_> = self.links.iter().filter(|l| l.category == category).collect();
                (!links.is_empty()).then_some((category, links))
            })
            .collect()
    }

    /// Write every collection as TOML files into `dir`, and each post as
    /// `posts/<slug>.md` with TOML front matter.
    ///
    /// Returns the paths written.
    pub fn write_toml(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;

        let cv = CvFile {
            sections: self.cv.clone(),
            skills: self.skills.clone(),
            awards: self.awards.clone(),
            service: self.service.clone(),
        };
        let projects = ProjectsFile {
            summary: self.projects.summary().clone(),
            projects: self.projects.in_declared_order().cloned().collect(),
        };
        let links = LinksFile {
            links: self.links.clone(),
        };

        let files = [
            (ContentFile::Profile, toml::to_string_pretty(&self.profile)?),
            (ContentFile::Cv, toml::to_string_pretty(&cv)?),
            (ContentFile::Projects, toml::to_string_pretty(&projects)?),
            (
                ContentFile::Publications,
                toml::to_string_pretty(&self.publications)?,
            ),
            (ContentFile::Links, toml::to_string_pretty(&links)?),
        ];

        let mut written = Vec::with_capacity(files.len());
        for (file, body) in files {
            let path = dir.join(format!("{}.toml", file.stem()));
            std::fs::write(&path, body)?;
            debug!(path = %path.display(), "wrote content file");
            written.push(path);
        }

        if !self.posts.is_empty() {
            let posts_dir = dir.join(POSTS_DIR);
            std::fs::create_dir_all(&posts_dir)?;
            for post in &self.posts {
                let path = posts_dir.join(format!("{}.{POST_EXTENSION}", post.slug));
                std::fs::write(&path, post.to_markdown()?)?;
                debug!(path = %path.display(), "wrote post");
                written.push(path);
            }
        }

        Ok(written)
    }
}

/// Parse one content file, choosing the format by extension.
pub fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    debug!(path = %path.display(), "parsing content file");

    let source = std::fs::read_to_string(path)?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext {
        "toml" => toml::from_str(&source).map_err(|e| CoreError::content(path, e.to_string())),
        "yaml" | "yml" => {
            serde_yaml::from_str(&source).map_err(|e| CoreError::content(path, e.to_string()))
        }
        other => Err(CoreError::content(
            path,
            format!("unsupported content format `{other}`"),
        )),
    }
}

/// Load every `*.md` file of the posts directory. A missing directory
/// means no posts.
fn load_posts(dir: &Path) -> Result<Vec<Post>> {
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "no posts directory");
        return Ok(Vec::new());
    }

    let mut posts = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(POST_EXTENSION) {
            continue;
        }
        let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
            warn!(path = %path.display(), "skipping post with a non UTF-8 file name");
            continue;
        };

        debug!(path = %path.display(), "parsing post");
        let source = std::fs::read_to_string(&path)?;
        posts.push(Post::parse(slug, &source, &path)?);
    }

    sort_newest_first(&mut posts);
    Ok(posts)
}

fn load_optional<T: DeserializeOwned + Default>(dir: &Path, file: ContentFile) -> Result<T> {
    match file.find_in(dir) {
        Some(path) => parse_file(&path),
        None => {
            debug!(file = file.stem(), "content file absent, using empty collection");
            Ok(T::default())
        }
    }
}
