//! RSS feeds of publications and blog posts.
//!
//! Generates RSS 2.0 feeds with the newest entries first. Both feeds share
//! the `feed.limit` cap.

use std::{fs, path::Path};

use chrono::{NaiveDate, Utc};
use rss::{Category, ChannelBuilder, GuidBuilder, Item, ItemBuilder};
use scholarsite_core::{Config, Post, Publication, PublicationList, SiteContent};
use thiserror::Error;
use tracing::debug;

use crate::html::{PageKind, post_url};

/// File name of the publications feed, relative to the output directory.
pub const FEED_FILE: &str = "publications.xml";

/// File name of the blog feed, relative to the output directory.
pub const BLOG_FEED_FILE: &str = "blog.xml";

/// Feed generation errors.
#[derive(Debug, Error)]
pub enum FeedError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;

/// Feed generator.
#[derive(Debug)]
pub struct FeedGenerator {
    config: Config,
}

impl FeedGenerator {
    /// Create a new feed generator.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Publications that go into the feed, newest first, capped by `feed.limit`.
    #[must_use]
    pub fn entries<'a>(&self, publications: &'a PublicationList) -> Vec<&'a Publication> {
        let mut entries = publications.by_recency();
        entries.truncate(self.config.feed.limit);
        entries
    }

    /// Generate the feed XML.
    #[must_use]
    pub fn generate(&self, publications: &PublicationList) -> String {
        let entries = self.entries(publications);
        debug!(count = entries.len(), limit = self.config.feed.limit, "generating feed");

        let items: Vec<Item> = entries
            .iter()
            .map(|publication| self.publication_to_item(publication))
            .collect();

        let description = self
            .config
            .site
            .description
            .clone()
            .unwrap_or_else(|| format!("Publications from {}", self.config.site.title));

        ChannelBuilder::default()
            .title(format!("{} | Publications", self.config.site.title))
            .link(self.config.url_for(PageKind::Publications.url()))
            .description(description)
            .language(Some(self.config.site.language.clone()))
            .last_build_date(Some(Utc::now().to_rfc2822()))
            .items(items)
            .build()
            .to_string()
    }

    /// Write the feed into `output_dir`, returning the number of items.
    pub fn write(&self, publications: &PublicationList, output_dir: &Path) -> Result<usize> {
        let xml = self.generate(publications);
        fs::write(output_dir.join(FEED_FILE), xml)?;
        Ok(self.entries(publications).len())
    }

    /// Published posts that go into the blog feed, newest first.
    #[must_use]
    pub fn post_entries<'a>(&self, content: &'a SiteContent) -> Vec<&'a Post> {
        content
            .published_posts()
            .take(self.config.feed.limit)
            .collect()
    }

    /// Generate the blog feed XML.
    #[must_use]
    pub fn generate_posts(&self, content: &SiteContent) -> String {
        let entries = self.post_entries(content);
        debug!(count = entries.len(), limit = self.config.feed.limit, "generating blog feed");

        let author = content.profile.name.as_str();
        let items: Vec<Item> = entries
            .iter()
            .map(|post| self.post_to_item(post, author))
            .collect();

        ChannelBuilder::default()
            .title(format!("{} | Blog", self.config.site.title))
            .link(self.config.url_for(PageKind::Blog.url()))
            .description(format!("Blog posts by {author}"))
            .language(Some(self.config.site.language.clone()))
            .last_build_date(Some(Utc::now().to_rfc2822()))
            .items(items)
            .build()
            .to_string()
    }

    /// Write the blog feed into `output_dir`, returning the number of items.
    pub fn write_posts(&self, content: &SiteContent, output_dir: &Path) -> Result<usize> {
        let xml = self.generate_posts(content);
        fs::write(output_dir.join(BLOG_FEED_FILE), xml)?;
        Ok(self.post_entries(content).len())
    }

    fn post_to_item(&self, post: &Post, default_author: &str) -> Item {
        let link = self.config.url_for(&post_url(post));
        let guid = GuidBuilder::default().value(link.clone()).permalink(true).build();

        let mut builder = ItemBuilder::default();
        builder.title(Some(post.meta.title.clone()));
        builder.link(Some(link));
        builder.guid(Some(guid));
        builder.description(Some(post.meta.description.clone()));
        builder.author(Some(
            post.meta
                .author
                .clone()
                .unwrap_or_else(|| default_author.to_string()),
        ));

        if let Some(date) = post.meta.pub_date.and_hms_opt(0, 0, 0) {
            builder.pub_date(Some(date.and_utc().to_rfc2822()));
        }

        let categories: Vec<_> = post
            .meta
            .tags
            .iter()
            .map(|name| Category {
                name: name.clone(),
                domain: None,
            })
            .collect();
        builder.categories(categories);

        builder.build()
    }

    fn publication_to_item(&self, publication: &Publication) -> Item {
        let permalink = format!(
            "{}#{}",
            self.config.url_for(PageKind::Publications.url()),
            publication.id
        );
        let link = publication
            .url
            .clone()
            .or_else(|| publication.doi_url())
            .unwrap_or_else(|| permalink.clone());

        let guid = GuidBuilder::default().value(permalink).permalink(true).build();

        let mut builder = ItemBuilder::default();
        builder.title(Some(publication.title.clone()));
        builder.link(Some(link));
        builder.guid(Some(guid));

        // Only the year is known, so items are dated January 1st.
        if let Some(date) = NaiveDate::from_ymd_opt(i32::from(publication.year), 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
        {
            builder.pub_date(Some(date.and_utc().to_rfc2822()));
        }

        let description = publication
            .abstract_text
            .clone()
            .unwrap_or_else(|| format!("{}, {}", publication.venue, publication.year));
        builder.description(Some(description));

        if !publication.authors.is_empty() {
            builder.author(Some(publication.byline()));
        }

        let categories: Vec<_> = std::iter::once(publication.kind.label().to_string())
            .chain(publication.tags.iter().cloned())
            .map(|name| Category { name, domain: None })
            .collect();
        builder.categories(categories);

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use scholarsite_core::fixture;
    use tempfile::TempDir;

    use super::*;

    fn test_config() -> Config {
        let mut config = Config::new("Georgios Xylouris", "https://xilouris.github.io");
        config.site.description = Some("Publications and projects".to_string());
        config
    }

    #[test]
    fn test_generate_feed() {
        let generator = FeedGenerator::new(test_config());
        let content = fixture::starter_content();

        let xml = generator.generate(&content.publications);

        assert!(xml.contains("<title>Georgios Xylouris | Publications</title>"));
        assert!(xml.contains("<link>https://xilouris.github.io/publications/</link>"));
        assert!(xml.contains("[Journal Article Title]"));
        assert!(xml.contains("<category>Journal Article</category>"));
        assert!(xml.contains("https://doi.org/10.0000/placeholder"));

        let newer = xml.find("[Journal Article Title]").unwrap();
        let older = xml.find("[Conference Paper Title]").unwrap();
        assert!(newer < older);
    }

    #[test]
    fn test_feed_limit() {
        let mut config = test_config();
        config.feed.limit = 1;
        let generator = FeedGenerator::new(config);
        let content = fixture::starter_content();

        let xml = generator.generate(&content.publications);

        assert!(xml.contains("[Journal Article Title]"));
        assert!(!xml.contains("[Conference Paper Title]"));
    }

    #[test]
    fn test_publication_to_item() {
        let generator = FeedGenerator::new(test_config());
        let content = fixture::starter_content();
        let publication = content.publications.get("starter-conference-2022").unwrap();

        let item = generator.publication_to_item(publication);

        assert_eq!(item.title(), Some("[Conference Paper Title]"));
        assert_eq!(item.link(), Some("https://example.org/paper"));
        assert_eq!(
            item.guid().map(|g| g.value()),
            Some("https://xilouris.github.io/publications/#starter-conference-2022")
        );
        assert!(item.pub_date().is_some_and(|d| d.contains("2022")));
        assert_eq!(item.description(), Some("[Conference Name], 2022"));
    }

    #[test]
    fn test_generate_blog_feed() {
        let generator = FeedGenerator::new(test_config());
        let mut content = fixture::starter_content();
        let mut draft = content.posts[0].clone();
        draft.slug = "draft".to_string();
        draft.meta.title = "[Unpublished]".to_string();
        draft.meta.draft = true;
        content.posts.push(draft);

        let xml = generator.generate_posts(&content);

        assert!(xml.contains("<title>Georgios Xylouris | Blog</title>"));
        assert!(xml.contains("<link>https://xilouris.github.io/blog/</link>"));
        assert!(xml.contains("<link>https://xilouris.github.io/blog/welcome/</link>"));
        assert!(xml.contains("<author>[Your Name]</author>"));
        assert!(xml.contains("Wed, 15 Jan 2025 00:00:00 +0000"));
        assert!(!xml.contains("[Unpublished]"));
        assert_eq!(generator.post_entries(&content).len(), 1);
    }

    #[test]
    fn test_write_feed() {
        let dir = TempDir::new().unwrap();
        let generator = FeedGenerator::new(test_config());
        let content = fixture::starter_content();

        let count = generator.write(&content.publications, dir.path()).unwrap();

        assert_eq!(count, 2);
        assert!(dir.path().join(FEED_FILE).exists());
    }
}
