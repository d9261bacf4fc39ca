//! Build orchestration.
//!
//! Loads and validates the content directory, then writes every page, the
//! blog posts, the feeds, the sitemap, robots.txt and the static assets.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use rayon::prelude::*;
use scholarsite_core::{Config, CoreError, Post, SiteContent};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    assets::{AssetError, AssetProcessor},
    feed::{FeedError, FeedGenerator},
    html::{HtmlError, HtmlGenerator, PageKind},
    robots::{RobotsError, RobotsGenerator},
    sitemap::SitemapGenerator,
};

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Content could not be loaded or failed validation.
    #[error("content error: {0}")]
    Content(#[from] CoreError),

    /// HTML generation error.
    #[error("HTML error: {0}")]
    Html(#[from] HtmlError),

    /// Feed generation error.
    #[error("feed error: {0}")]
    Feed(#[from] FeedError),

    /// Robots generation error.
    #[error("robots error: {0}")]
    Robots(#[from] RobotsError),

    /// Asset error.
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),

    /// Cleaning the output directory would delete site sources.
    #[error("refusing to clean output directory {output}: it contains {protected}")]
    UnsafeOutput { output: PathBuf, protected: PathBuf },
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Number of HTML pages generated, post pages included.
    pub pages: usize,

    /// Number of blog posts rendered.
    pub posts: usize,

    /// Number of items across the publications and blog feeds.
    pub feed_items: usize,

    /// Number of static assets copied.
    pub assets: usize,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Site builder that orchestrates the build process.
#[derive(Debug)]
pub struct Builder {
    config: Config,
    content_dir: PathBuf,
    output_dir: PathBuf,
    static_dir: Option<PathBuf>,
}

impl Builder {
    /// Create a new builder.
    #[must_use]
    pub fn new(
        config: Config,
        content_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            content_dir: content_dir.into(),
            output_dir: output_dir.into(),
            static_dir: None,
        }
    }

    /// Set the static assets directory.
    #[must_use]
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Load the content directory and build the site from it.
    pub fn build(&self) -> Result<BuildStats> {
        info!(content = %self.content_dir.display(), "loading content");
        let (content, _report) = SiteContent::load_validated(&self.content_dir)?;
        self.build_content(&content)
    }

    /// Build the site from already loaded content.
    pub fn build_content(&self, content: &SiteContent) -> Result<BuildStats> {
        let start = Instant::now();
        let mut stats = BuildStats::default();

        info!(output = %self.output_dir.display(), "starting build");

        // 1. Clean output directory
        self.clean_output()?;

        // 2. Generate HTML pages
        let pages = PageKind::present_in(content);
        let posts: Vec<&Post> = content.published_posts().collect();
        stats.posts = self.generate_posts(&posts, content)?;
        stats.pages = self.generate_pages(&pages, content)? + stats.posts;

        // 3. Feeds
        if self.config.feed.enabled {
            let feeds = FeedGenerator::new(self.config.clone());
            stats.feed_items = feeds.write(&content.publications, &self.output_dir)?;
            if !posts.is_empty() {
                stats.feed_items += feeds.write_posts(content, &self.output_dir)?;
            }
        }

        // 4. Sitemap and robots.txt
        let sitemap = SitemapGenerator::new(self.config.clone()).generate(&pages, content);
        fs::write(self.output_dir.join("sitemap.xml"), sitemap)?;
        RobotsGenerator::new(self.config.clone()).generate(&self.output_dir)?;

        // 5. Static assets
        if let Some(static_dir) = &self.static_dir {
            stats.assets = AssetProcessor::new()
                .process(static_dir, &self.output_dir)?
                .len();
        }

        stats.duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        info!(
            pages = stats.pages,
            posts = stats.posts,
            feed_items = stats.feed_items,
            assets = stats.assets,
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }

    /// Clean the output directory.
    ///
    /// Fails without touching anything when the output directory is, or
    /// contains, the content or static directory.
    fn clean_output(&self) -> Result<()> {
        let output = resolve(&self.output_dir)?;
        for source in std::iter::once(&self.content_dir).chain(self.static_dir.as_ref()) {
            if resolve(source)?.starts_with(&output) {
                return Err(BuildError::UnsafeOutput {
                    output: self.output_dir.clone(),
                    protected: source.clone(),
                });
            }
        }

        if self.output_dir.exists() {
            debug!(dir = %self.output_dir.display(), "cleaning output directory");
            fs::remove_dir_all(&self.output_dir)?;
        }
        fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }

    /// Render and write pages in parallel.
    fn generate_pages(&self, pages: &[PageKind], content: &SiteContent) -> Result<usize> {
        let generator = HtmlGenerator::new(self.config.clone());

        info!(count = pages.len(), "generating HTML pages");

        pages
            .par_iter()
            .map(|page| {
                let html = generator.generate(*page, content)?;
                let output_path = generator.output_path(*page, &self.output_dir);

                if let Some(parent) = output_path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&output_path, &html)?;

                debug!(path = %output_path.display(), "wrote page");
                Ok::<_, BuildError>(())
            })
            .collect::<Result<Vec<()>>>()
            .map(|written| written.len())
    }

    /// Render and write post pages in parallel.
    fn generate_posts(&self, posts: &[&Post], content: &SiteContent) -> Result<usize> {
        let generator = HtmlGenerator::new(self.config.clone());

        info!(count = posts.len(), "generating blog posts");

        posts
            .par_iter()
            .map(|post| {
                let html = generator.generate_post(post, content)?;
                let output_path = generator.post_output_path(post, &self.output_dir);

                if let Some(parent) = output_path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&output_path, &html)?;

                debug!(path = %output_path.display(), "wrote post");
                Ok::<_, BuildError>(())
            })
            .collect::<Result<Vec<()>>>()
            .map(|written| written.len())
    }
}

/// Canonical path when it exists, otherwise the absolute form.
fn resolve(path: &Path) -> Result<PathBuf> {
    match fs::canonicalize(path) {
        Ok(path) => Ok(path),
        Err(_) => Ok(std::path::absolute(path)?),
    }
}
