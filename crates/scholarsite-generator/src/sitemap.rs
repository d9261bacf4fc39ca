//! Sitemap generation.
//!
//! Generates an XML sitemap listing every rendered page, including one entry
//! per published blog post.

use std::fmt::Write as _;

use chrono::NaiveDate;
use scholarsite_core::{Config, SiteContent};
use tracing::debug;

use crate::html::{PageKind, post_url};

/// Change frequency for sitemap entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Weekly,
    Monthly,
    Yearly,
}

impl ChangeFreq {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

/// A sitemap URL entry.
#[derive(Debug, Clone)]
pub struct SitemapUrl {
    /// URL location.
    pub loc: String,

    /// Last modification date.
    pub lastmod: Option<NaiveDate>,

    /// Change frequency.
    pub changefreq: ChangeFreq,

    /// Priority (0.0 to 1.0).
    pub priority: f32,
}

/// Sitemap generator.
#[derive(Debug)]
pub struct SitemapGenerator {
    config: Config,
}

impl SitemapGenerator {
    /// Create a new sitemap generator.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Generate sitemap XML for the given pages.
    #[must_use]
    pub fn generate(&self, pages: &[PageKind], content: &SiteContent) -> String {
        debug!(count = pages.len(), "generating sitemap");

        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
        xml.push('\n');

        for page in pages {
            let url = self.page_to_url(*page, content);
            xml.push_str(&url_to_xml(&url));

            if *page == PageKind::Blog {
                for post in content.published_posts() {
                    xml.push_str(&url_to_xml(&SitemapUrl {
                        loc: self.config.url_for(&post_url(post)),
                        lastmod: Some(post.last_modified()),
                        changefreq: ChangeFreq::Yearly,
                        priority: 0.6,
                    }));
                }
            }
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Convert a page to a sitemap URL entry.
    fn page_to_url(&self, page: PageKind, content: &SiteContent) -> SitemapUrl {
        let (changefreq, priority) = match page {
            PageKind::Home => (ChangeFreq::Monthly, 1.0),
            PageKind::Publications | PageKind::Blog => (ChangeFreq::Weekly, 0.8),
            PageKind::Cv | PageKind::Projects => (ChangeFreq::Monthly, 0.8),
            PageKind::Links => (ChangeFreq::Yearly, 0.5),
        };

        // Only the scholar statistics, posts and links carry dates.
        let lastmod = match page {
            PageKind::Publications => content
                .publications
                .scholar
                .as_ref()
                .and_then(|s| s.last_updated)
                .map(|t| t.date_naive()),
            PageKind::Blog => content.published_posts().map(|p| p.last_modified()).max(),
            PageKind::Links => content.links.iter().filter_map(|l| l.date_added).max(),
            _ => None,
        };

        SitemapUrl {
            loc: self.config.url_for(page.url()),
            lastmod,
            changefreq,
            priority,
        }
    }
}

/// Convert a URL entry to XML.
fn url_to_xml(url: &SitemapUrl) -> String {
    let mut xml = String::from("  <url>\n");

    let _ = writeln!(xml, "    <loc>{}</loc>", escape_xml(&url.loc));

    if let Some(lastmod) = &url.lastmod {
        let _ = writeln!(xml, "    <lastmod>{}</lastmod>", lastmod.format("%Y-%m-%d"));
    }

    let _ = writeln!(xml, "    <changefreq>{}</changefreq>", url.changefreq.as_str());
    let _ = writeln!(xml, "    <priority>{:.1}</priority>", url.priority);

    xml.push_str("  </url>\n");
    xml
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
