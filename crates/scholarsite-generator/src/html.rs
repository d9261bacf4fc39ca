//! HTML generation for the site sections.
//!
//! Each section of the site is one page, plus one page per blog post.
//! Page bodies are assembled from
//! small HTML fragments and wrapped in the section's template, then in the
//! `base` template. All content text is escaped; free-text Markdown fields
//! go through [`MarkdownRenderer`]. Absent optional fields produce no
//! element at all.

use std::{
    fmt::{self, Write as _},
    path::{Path, PathBuf},
};

use chrono::{Datelike, NaiveDate, Utc};
use scholarsite_core::{
    Award, Config, CvItem, CvSection, Link, Post, Profile, Project, ProjectStats, ProjectStatus,
    Publication, PublicationList, ScholarStats, ServiceRole, SiteContent, SkillGroup,
    SocialLinks,
};
use thiserror::Error;
use tracing::debug;

use crate::{
    markup::MarkdownRenderer,
    template::{Template, TemplateContext, TemplateError, TemplateRegistry},
};

/// HTML generation errors.
#[derive(Debug, Error)]
pub enum HtmlError {
    /// Template error.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
}

/// Result type for HTML generation.
pub type Result<T> = std::result::Result<T, HtmlError>;

/// A section of the site rendered as one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Home,
    Cv,
    Projects,
    Publications,
    Blog,
    Links,
}

impl PageKind {
    /// All pages, in navigation order.
    pub const ALL: [PageKind; 6] = [
        Self::Home,
        Self::Cv,
        Self::Projects,
        Self::Publications,
        Self::Blog,
        Self::Links,
    ];

    /// Site-relative URL of the page.
    #[must_use]
    pub fn url(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Cv => "/cv/",
            Self::Projects => "/projects/",
            Self::Publications => "/publications/",
            Self::Blog => "/blog/",
            Self::Links => "/links/",
        }
    }

    /// Name of the template the page body is rendered with.
    #[must_use]
    pub fn template_name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Cv => "cv",
            Self::Projects => "projects",
            Self::Publications => "publications",
            Self::Blog => "blog",
            Self::Links => "links",
        }
    }

    /// Label shown in the navigation bar.
    #[must_use]
    pub fn nav_label(&self) -> &'static str {
        match self {
            Self::Home => "About",
            Self::Cv => "CV",
            Self::Projects => "Projects",
            Self::Publications => "Publications",
            Self::Blog => "Blog",
            Self::Links => "Links",
        }
    }

    /// Whether the content has anything to show on this page.
    ///
    /// The home page is always present since the profile is required.
    #[must_use]
    pub fn has_content(&self, content: &SiteContent) -> bool {
        match self {
            Self::Home => true,
            Self::Cv => {
                !(content.cv.is_empty()
                    && content.skills.is_empty()
                    && content.awards.is_empty()
                    && content.service.is_empty())
            }
            Self::Projects => !content.projects.is_empty(),
            Self::Publications => !content.publications.is_empty(),
            Self::Blog => content.published_posts().next().is_some(),
            Self::Links => !content.links.is_empty(),
        }
    }

    /// Pages that have content, in navigation order.
    #[must_use]
    pub fn present_in(content: &SiteContent) -> Vec<PageKind> {
        Self::ALL
            .into_iter()
            .filter(|page| page.has_content(content))
            .collect()
    }
}

/// Site-relative URL of a post page.
#[must_use]
pub fn post_url(post: &Post) -> String {
    format!("{}{}/", PageKind::Blog.url(), post.slug)
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template_name())
    }
}

/// HTML page generator.
#[derive(Debug)]
pub struct HtmlGenerator {
    templates: TemplateRegistry,
    markdown: MarkdownRenderer,
    config: Config,
}

impl HtmlGenerator {
    /// Create a new HTML generator with the given configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_templates(config, TemplateRegistry::new())
    }

    /// Create a generator with custom templates.
    #[must_use]
    pub fn with_templates(config: Config, templates: TemplateRegistry) -> Self {
        Self {
            templates,
            markdown: MarkdownRenderer::new(),
            config,
        }
    }

    /// Register a custom template.
    pub fn register_template(&mut self, template: Template) {
        self.templates.register(template);
    }

    /// Generate the full HTML document for a page.
    pub fn generate(&self, page: PageKind, content: &SiteContent) -> Result<String> {
        debug!(page = %page, url = page.url(), "generating HTML");

        let (title, inner_ctx) = match page {
            PageKind::Home => (content.profile.name.clone(), self.home_context(content)),
            PageKind::Cv => ("Curriculum Vitae".to_string(), self.cv_context(content)),
            PageKind::Projects => ("Research Projects".to_string(), self.projects_context(content)),
            PageKind::Publications => {
                ("Publications".to_string(), self.publications_context(content))
            }
            PageKind::Blog => ("Blog".to_string(), self.blog_context(content)),
            PageKind::Links => ("Useful Links".to_string(), self.links_context(content)),
        };

        let inner_ctx = inner_ctx.with_var("title", escape_html(&title));
        let inner_html = self.templates.render(page.template_name(), &inner_ctx)?;

        let base_ctx = self.base_context(page, page.url(), &title, &inner_html, content);
        Ok(self.templates.render("base", &base_ctx)?)
    }

    /// Generate the full HTML document for one blog post.
    pub fn generate_post(&self, post: &Post, content: &SiteContent) -> Result<String> {
        let url = post_url(post);
        debug!(slug = %post.slug, url = %url, "generating post HTML");

        let inner_ctx = self.post_context(post, content);
        let inner_html = self.templates.render("post", &inner_ctx)?;

        let base_ctx = self
            .base_context(PageKind::Blog, &url, &post.meta.title, &inner_html, content)
            .with_var("description", escape_html(&post.meta.description));
        Ok(self.templates.render("base", &base_ctx)?)
    }

    /// Get the output path for a post page.
    #[must_use]
    pub fn post_output_path(&self, post: &Post, output_dir: &Path) -> PathBuf {
        output_dir
            .join(PageKind::Blog.url().trim_matches('/'))
            .join(&post.slug)
            .join("index.html")
    }

    /// Get the output path for a page.
    #[must_use]
    pub fn output_path(&self, page: PageKind, output_dir: &Path) -> PathBuf {
        let relative = page.url().trim_matches('/');

        if relative.is_empty() {
            output_dir.join("index.html")
        } else {
            output_dir.join(relative).join("index.html")
        }
    }

    /// `page` selects the highlighted navigation entry; `path` is the
    /// site-relative URL of the document itself.
    fn base_context(
        &self,
        page: PageKind,
        path: &str,
        title: &str,
        inner_html: &str,
        content: &SiteContent,
    ) -> TemplateContext {
        let site_title = escape_html(&self.config.site.title);

        let mut ctx = TemplateContext::new()
            .with_var("lang", escape_html(&self.config.site.language))
            .with_var("title", escape_html(title))
            .with_var("canonical_url", escape_html(&self.config.url_for(path)))
            .with_var("content", inner_html)
            .with_var("nav", nav_html(page, &PageKind::present_in(content)))
            .with_var("year", Utc::now().year().to_string());

        if page != PageKind::Home {
            ctx.insert("site_title_suffix", format!(" | {site_title}"));
        }
        ctx.insert("site_title", site_title);

        ctx.insert_opt("description", self.config.site.description.as_deref().map(escape_html));
        ctx.insert_opt("author", self.config.site.author.as_deref().map(escape_html));

        if self.config.feed.enabled {
            let mut links = vec![format!(
                r#"<link rel="alternate" type="application/rss+xml" title="Publications" href="{}">"#,
                escape_html(&self.config.url_for(crate::feed::FEED_FILE))
            )];
            if PageKind::Blog.has_content(content) {
                links.push(format!(
                    r#"<link rel="alternate" type="application/rss+xml" title="Blog" href="{}">"#,
                    escape_html(&self.config.url_for(crate::feed::BLOG_FEED_FILE))
                ));
            }
            ctx.insert("feed_link", links.join("\n    "));
        }

        ctx
    }

    fn home_context(&self, content: &SiteContent) -> TemplateContext {
        let profile = &content.profile;

        let affiliation = match &profile.affiliation_url {
            Some(url) => format!(
                r#"<a href="{}">{}</a>"#,
                escape_html(url),
                escape_html(&profile.affiliation)
            ),
            None => escape_html(&profile.affiliation),
        };

        let mut ctx = TemplateContext::new()
            .with_var("name", escape_html(&profile.name))
            .with_var("position", escape_html(&profile.title))
            .with_var("affiliation", affiliation)
            .with_var("bio_html", self.markdown.render(&profile.bio));

        ctx.insert_opt(
            "portrait",
            profile.profile_image.as_deref().map(|src| {
                format!(
                    r#"<img class="portrait" src="{}" alt="{}">"#,
                    escape_html(src),
                    escape_html(&profile.name)
                )
            }),
        );
        ctx.insert_opt("contact", contact_html(profile));
        ctx.insert_opt("social_html", social_links_html(&profile.social_links));
        ctx.insert_opt(
            "interests_html",
            tags_html(&profile.research_interests).map(|tags| {
                format!(
                    "<section class=\"research-interests\">\n<h2>Research Interests</h2>\n{tags}\n</section>"
                )
            }),
        );

        let featured: Vec<_> = content.publications.featured().collect();
        if !featured.is_empty() {
            let mut html = String::from(
                "<section class=\"featured-publications\">\n<h2>Selected Publications</h2>\n<ol class=\"publication-list\">\n",
            );
            for publication in featured {
                html.push_str(&publication_html(publication));
            }
            let _ = write!(
                html,
                "</ol>\n<p><a href=\"{}\">All publications</a></p>\n</section>",
                PageKind::Publications.url()
            );
            ctx.insert("featured_html", html);
        }

        ctx
    }

    fn cv_context(&self, content: &SiteContent) -> TemplateContext {
        let sections: String = content
            .cv
            .iter()
            .map(|section| self.cv_section_html(section))
            .collect();

        let mut ctx = TemplateContext::new().with_var("sections_html", sections);

        ctx.insert_opt(
            "cv_download",
            content.profile.cv_url.as_deref().map(|url| {
                format!(
                    r#"<a class="cv-download" href="{}">Download PDF</a>"#,
                    escape_html(url)
                )
            }),
        );
        ctx.insert_opt("skills_html", skills_html(&content.skills));
        ctx.insert_opt("awards_html", awards_html(&content.awards));
        ctx.insert_opt("service_html", service_html(&content.service));

        ctx
    }

    fn cv_section_html(&self, section: &CvSection) -> String {
        let mut html = format!(
            "<section class=\"cv-section\" id=\"{}\">\n<h2>{}</h2>\n",
            slugify(&section.title),
            escape_html(&section.title)
        );
        for item in &section.items {
            html.push_str(&self.cv_item_html(item));
        }
        html.push_str("</section>\n");
        html
    }

    /// Render one CV entry; only the title is always present.
    fn cv_item_html(&self, item: &CvItem) -> String {
        let mut html = String::from("<div class=\"cv-item\">\n<div class=\"cv-item-header\">\n");
        let _ = writeln!(html, "<h3>{}</h3>", escape_html(&item.title));

        let period = item.period();
        if !period.is_empty() {
            let _ = writeln!(
                html,
                r#"<span class="period">{}</span>"#,
                escape_html(&period.to_string())
            );
        }
        html.push_str("</div>\n");

        html.push_str(&optional_element("p", "organization", item.organization.as_deref()));
        html.push_str(&optional_element("p", "location muted", item.location.as_deref()));

        if let Some(description) = &item.description {
            let _ = writeln!(
                html,
                r#"<div class="description">{}</div>"#,
                self.markdown.render(description)
            );
        }

        if !item.details().is_empty() {
            html.push_str("<ul class=\"details\">\n");
            for detail in item.details() {
                let _ = writeln!(html, "<li>{}</li>", self.markdown.render_inline(detail));
            }
            html.push_str("</ul>\n");
        }

        html.push_str("</div>\n");
        html
    }

    fn projects_context(&self, content: &SiteContent) -> TemplateContext {
        let catalog = &content.projects;

        let groups: String = [ProjectStatus::Active, ProjectStatus::Completed]
            .into_iter()
            .filter(|status| !catalog.with_status(*status).is_empty())
            .map(|status| {
                let mut html = format!(
                    "<section class=\"project-group\" id=\"{status}\" data-status=\"{status}\">\n<h2>{}</h2>\n",
                    status.heading()
                );
                for project in catalog.with_status(status) {
                    html.push_str(&self.project_html(project, &content.publications));
                }
                html.push_str("</section>\n");
                html
            })
            .collect();

        TemplateContext::new()
            .with_var("stats_html", project_stats_html(&catalog.stats()))
            .with_var("groups_html", groups)
    }

    fn project_html(&self, project: &Project, publications: &PublicationList) -> String {
        let mut html = format!(
            "<article class=\"card project\" id=\"project-{}\">\n<header>\n",
            slugify(project.short_name())
        );

        if let Some(logo) = &project.logo {
            let _ = writeln!(
                html,
                r#"<img class="project-logo" src="{}" alt="{}">"#,
                escape_html(logo),
                escape_html(project.short_name())
            );
        }
        let _ = writeln!(html, "<h3>{}</h3>", escape_html(&project.title));
        let _ = writeln!(
            html,
            r#"<span class="status status-{}">{}</span>"#,
            project.status,
            status_label(project.status)
        );
        html.push_str("</header>\n");

        let _ = writeln!(
            html,
            r#"<p class="period">{}</p>"#,
            escape_html(&project.period().to_string())
        );
        let _ = writeln!(
            html,
            r#"<p class="role"><strong>Role:</strong> {}</p>"#,
            escape_html(&project.role)
        );

        let funding = match &project.funding_program {
            Some(program) => format!("{} ({})", escape_html(&project.funding), escape_html(program)),
            None => escape_html(&project.funding),
        };
        let _ = writeln!(html, r#"<p class="funding"><strong>Funding:</strong> {funding}</p>"#);

        let _ = writeln!(
            html,
            r#"<div class="description">{}</div>"#,
            self.markdown.render(&project.description)
        );

        if !project.objectives.is_empty() {
            html.push_str("<h4>Objectives</h4>\n<ul class=\"objectives\">\n");
            for objective in &project.objectives {
                let _ = writeln!(html, "<li>{}</li>", self.markdown.render_inline(objective));
            }
            html.push_str("</ul>\n");
        }

        if let Some(impact) = &project.impact {
            let _ = writeln!(
                html,
                r#"<div class="impact"><h4>Impact</h4>{}</div>"#,
                self.markdown.render(impact)
            );
        }

        if let Some(tags) = tags_html(&project.technologies) {
            html.push_str(&tags);
            html.push('\n');
        }

        let related: Vec<_> = project
            .publications
            .iter()
            .filter_map(|id| publications.get(id))
            .collect();
        if !related.is_empty() {
            html.push_str("<h4>Related Publications</h4>\n<ul class=\"related-publications\">\n");
            for publication in related {
                let _ = writeln!(
                    html,
                    r##"<li><a href="{}#{}">{}</a></li>"##,
                    PageKind::Publications.url(),
                    escape_html(&publication.id),
                    escape_html(&publication.title)
                );
            }
            html.push_str("</ul>\n");
        }

        if let Some(website) = &project.website {
            let _ = writeln!(
                html,
                r#"<p class="website"><a href="{}" rel="noopener">Project website</a></p>"#,
                escape_html(website)
            );
        }

        html.push_str("</article>\n");
        html
    }

    fn publications_context(&self, content: &SiteContent) -> TemplateContext {
        let mut groups = String::new();
        let mut current_year = None;

        for publication in content.publications.by_recency() {
            if current_year != Some(publication.year) {
                if current_year.is_some() {
                    groups.push_str("</ol>\n</section>\n");
                }
                let _ = write!(
                    groups,
                    "<section class=\"publication-year\" id=\"year-{0}\">\n<h2>{0}</h2>\n<ol class=\"publication-list\">\n",
                    publication.year
                );
                current_year = Some(publication.year);
            }
            groups.push_str(&publication_html(publication));
        }
        if current_year.is_some() {
            groups.push_str("</ol>\n</section>\n");
        }

        let mut ctx = TemplateContext::new().with_var("groups_html", groups);
        ctx.insert_opt(
            "scholar_html",
            content.publications.scholar.as_ref().map(scholar_stats_html),
        );
        ctx
    }

    fn blog_context(&self, content: &SiteContent) -> TemplateContext {
        let mut html = String::from("<ul class=\"post-list\">\n");
        for post in content.published_posts() {
            let class = if post.meta.featured { "post-summary featured" } else { "post-summary" };
            let _ = writeln!(
                html,
                "<li class=\"{class}\">\n<h2><a href=\"{}\">{}</a></h2>\n{}",
                escape_html(&post_url(post)),
                escape_html(&post.meta.title),
                date_html(post.meta.pub_date)
            );
            let _ = writeln!(
                html,
                r#"<p class="description">{}</p>"#,
                escape_html(&post.meta.description)
            );
            if let Some(tags) = tags_html(&post.meta.tags) {
                html.push_str(&tags);
                html.push('\n');
            }
            html.push_str("</li>\n");
        }
        html.push_str("</ul>");

        TemplateContext::new().with_var("posts_html", html)
    }

    fn post_context(&self, post: &Post, content: &SiteContent) -> TemplateContext {
        let meta = &post.meta;
        let author = meta.author.as_deref().unwrap_or(&content.profile.name);

        let mut byline = format!(
            r#"<span class="author">{}</span> {}"#,
            escape_html(author),
            date_html(meta.pub_date)
        );
        if let Some(updated) = meta.updated_date.filter(|d| *d != meta.pub_date) {
            let _ = write!(
                byline,
                r#" <span class="updated">Updated {}</span>"#,
                date_html(updated)
            );
        }

        let mut ctx = TemplateContext::new()
            .with_var("title", escape_html(&meta.title))
            .with_var("byline", byline)
            .with_var("body_html", self.markdown.render(&post.body))
            .with_var("blog_url", PageKind::Blog.url());

        ctx.insert_opt(
            "hero_html",
            meta.hero_image.as_deref().map(|src| {
                format!(
                    r#"<img class="hero-image" src="{}" alt="{}">"#,
                    escape_html(src),
                    escape_html(&meta.title)
                )
            }),
        );
        ctx.insert_opt("tags_html", tags_html(&meta.tags));
        ctx
    }

    fn links_context(&self, content: &SiteContent) -> TemplateContext {
        let groups: String = content
            .links_by_category()
            .into_iter()
            .map(|(category, links)| {
                let mut html = format!(
                    "<section class=\"link-category\" id=\"{}\">\n<h2>{}</h2>\n<ul class=\"link-list\">\n",
                    category.anchor(),
                    escape_html(category.label())
                );
                for link in links {
                    html.push_str(&link_html(link));
                }
                html.push_str("</ul>\n</section>\n");
                html
            })
            .collect();

        TemplateContext::new().with_var("groups_html", groups)
    }
}

/// Escape text for use in HTML content and attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Generate a URL-safe slug from a string.
fn slugify(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

fn date_html(date: NaiveDate) -> String {
    format!(
        r#"<time datetime="{}">{}</time>"#,
        date.format("%Y-%m-%d"),
        date.format("%B %-d, %Y")
    )
}

fn status_label(status: ProjectStatus) -> &'static str {
    match status {
        ProjectStatus::Active => "Active",
        ProjectStatus::Completed => "Completed",
    }
}

/// An element wrapping escaped text, or nothing when the value is absent.
fn optional_element(tag: &str, class: &str, value: Option<&str>) -> String {
    value
        .map(|v| format!("<{tag} class=\"{class}\">{}</{tag}>\n", escape_html(v)))
        .unwrap_or_default()
}

fn nav_html(current: PageKind, pages: &[PageKind]) -> String {
    pages
        .iter()
        .map(|page| {
            let active = if *page == current {
                r#" class="active" aria-current="page""#
            } else {
                ""
            };
            format!(r#"<a href="{}"{active}>{}</a>"#, page.url(), page.nav_label())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn contact_html(profile: &Profile) -> Option<String> {
    let mut items = Vec::new();

    if let Some(location) = &profile.location {
        items.push(format!(r#"<li class="location">{}</li>"#, escape_html(location)));
    }
    if let Some(email) = &profile.email {
        let email = escape_html(email);
        items.push(format!(
            r#"<li class="email"><a href="mailto:{email}">{email}</a></li>"#
        ));
    }
    if let Some(cv_url) = &profile.cv_url {
        items.push(format!(
            r#"<li class="cv"><a href="{}">Download CV</a></li>"#,
            escape_html(cv_url)
        ));
    }

    (!items.is_empty()).then(|| format!("<ul class=\"contact\">\n{}\n</ul>", items.join("\n")))
}

/// Generate the list of social profile links.
///
/// Platforms without a URL are left out entirely.
#[must_use]
pub fn social_links_html(links: &SocialLinks) -> Option<String> {
    let items: Vec<_> = links
        .iter()
        .map(|(platform, url)| {
            format!(
                r#"<li><a class="social-link social-{}" href="{}" rel="me noopener">{}</a></li>"#,
                platform.key(),
                escape_html(url),
                platform.label()
            )
        })
        .collect();

    (!items.is_empty())
        .then(|| format!("<ul class=\"social-links\">\n{}\n</ul>", items.join("\n")))
}

/// Generate a tag list, or nothing for an empty list.
#[must_use]
pub fn tags_html(tags: &[String]) -> Option<String> {
    if tags.is_empty() {
        return None;
    }

    let items = tags
        .iter()
        .map(|tag| format!("<li>{}</li>", escape_html(tag)))
        .collect::<Vec<_>>()
        .join("");
    Some(format!(r#"<ul class="tags">{items}</ul>"#))
}

fn skills_html(groups: &[SkillGroup]) -> Option<String> {
    if groups.is_empty() {
        return None;
    }

    let mut html = String::from("<section class=\"skills\">\n<h2>Skills &amp; Expertise</h2>\n");
    for group in groups {
        let _ = writeln!(
            html,
            "<div class=\"skill-group\">\n<h3>{}</h3>\n{}\n</div>",
            escape_html(&group.category),
            tags_html(&group.items).unwrap_or_default()
        );
    }
    html.push_str("</section>");
    Some(html)
}

fn awards_html(awards: &[Award]) -> Option<String> {
    if awards.is_empty() {
        return None;
    }

    let mut html = String::from("<section class=\"awards\">\n<h2>Awards &amp; Honors</h2>\n<ul>\n");
    for award in awards {
        let _ = write!(
            html,
            r#"<li><strong>{}</strong>, {} <span class="period">({})</span>"#,
            escape_html(&award.title),
            escape_html(&award.organization),
            escape_html(&award.year)
        );
        html.push_str(&optional_element("p", "description", award.description.as_deref()));
        html.push_str("</li>\n");
    }
    html.push_str("</ul>\n</section>");
    Some(html)
}

fn service_html(roles: &[ServiceRole]) -> Option<String> {
    if roles.is_empty() {
        return None;
    }

    let mut html =
        String::from("<section class=\"service\">\n<h2>Professional Service</h2>\n<ul>\n");
    for role in roles {
        let _ = write!(
            html,
            r#"<li><strong>{}</strong>, {} <span class="period">{}</span>"#,
            escape_html(&role.role),
            escape_html(&role.organization),
            escape_html(&role.period)
        );
        html.push_str(&optional_element("p", "description", role.description.as_deref()));
        html.push_str("</li>\n");
    }
    html.push_str("</ul>\n</section>");
    Some(html)
}

fn stat_html(value: impl fmt::Display, label: &str) -> String {
    format!(
        r#"<div class="stat"><span class="value">{value}</span><span class="label">{label}</span></div>"#
    )
}

/// Generate the portfolio statistics block of the projects page.
#[must_use]
pub fn project_stats_html(stats: &ProjectStats<'_>) -> String {
    let mut html = String::from("<section class=\"project-stats\">\n<div class=\"stats\">\n");
    let _ = writeln!(html, "{}", stat_html(stats.total_projects, "Total Projects"));
    let _ = writeln!(html, "{}", stat_html(stats.active_projects, "Active"));
    let _ = writeln!(html, "{}", stat_html(stats.completed_projects, "Completed"));
    html.push_str("</div>\n");

    if let Some(funding) = stats.total_funding {
        let _ = writeln!(
            html,
            r#"<p class="total-funding"><strong>Funding:</strong> {}</p>"#,
            escape_html(funding)
        );
    }
    if let Some(tags) = tags_html(stats.research_areas) {
        let _ = writeln!(html, "<h3>Research Areas</h3>\n{tags}");
    }

    html.push_str("</section>");
    html
}

fn scholar_stats_html(scholar: &ScholarStats) -> String {
    let mut html = String::from("<section class=\"scholar-stats\">\n<div class=\"stats\">\n");
    let _ = writeln!(html, "{}", stat_html(scholar.total_publications, "Publications"));
    let _ = writeln!(html, "{}", stat_html(scholar.total_citations, "Citations"));
    let _ = writeln!(html, "{}", stat_html(scholar.h_index, "h-index"));
    let _ = writeln!(html, "{}", stat_html(scholar.i10_index, "i10-index"));
    html.push_str("</div>\n");

    if let Some(updated) = scholar.last_updated {
        let _ = writeln!(
            html,
            r#"<p class="muted">Citation data from Google Scholar, last updated {}.</p>"#,
            updated.format("%B %-d, %Y")
        );
    }

    html.push_str("</section>");
    html
}

/// Generate a publication list entry.
#[must_use]
pub fn publication_html(publication: &Publication) -> String {
    let title = escape_html(&publication.title);
    let title = match publication.url.as_deref().or(publication.pdf_url.as_deref()) {
        Some(url) => format!(r#"<a href="{}">{title}</a>"#, escape_html(url)),
        None => title,
    };

    let mut html = format!(
        "<li class=\"publication publication-{}\" id=\"{}\">\n",
        publication.kind,
        escape_html(&publication.id)
    );
    let _ = writeln!(
        html,
        r#"<span class="publication-kind">{}</span>"#,
        publication.kind.label()
    );
    let _ = writeln!(html, r#"<span class="publication-title">{title}</span>"#);

    if !publication.authors.is_empty() {
        let _ = writeln!(
            html,
            r#"<span class="authors">{}</span>"#,
            escape_html(&publication.byline())
        );
    }
    let _ = writeln!(
        html,
        r#"<span class="venue">{}, {}</span>"#,
        escape_html(&publication.venue),
        publication.year
    );

    let mut links = Vec::new();
    if let Some(doi_url) = publication.doi_url() {
        links.push(format!(r#"<a href="{}">DOI</a>"#, escape_html(&doi_url)));
    }
    if let Some(pdf_url) = &publication.pdf_url {
        links.push(format!(r#"<a href="{}">PDF</a>"#, escape_html(pdf_url)));
    }
    if let Some(citations) = publication.citations.filter(|c| *c > 0) {
        links.push(format!(r#"<span class="citations">Cited by {citations}</span>"#));
    }
    if !links.is_empty() {
        let _ = writeln!(html, r#"<div class="publication-links">{}</div>"#, links.join(" "));
    }

    if let Some(abstract_text) = &publication.abstract_text {
        let _ = writeln!(
            html,
            "<details class=\"abstract\"><summary>Abstract</summary><p>{}</p></details>",
            escape_html(abstract_text)
        );
    }

    html.push_str("</li>\n");
    html
}

/// Generate a curated link entry.
#[must_use]
pub fn link_html(link: &Link) -> String {
    let class = if link.featured { "link featured" } else { "link" };
    let mut html = format!(
        "<li class=\"{class}\">\n<a href=\"{}\" rel=\"noopener\">{}</a>\n",
        escape_html(&link.url),
        escape_html(&link.title)
    );
    html.push_str(&optional_element("p", "description", link.description.as_deref()));
    if let Some(tags) = tags_html(&link.tags) {
        html.push_str(&tags);
        html.push('\n');
    }
    html.push_str("</li>\n");
    html
}

#[cfg(test)]
mod tests {
    use scholarsite_core::fixture;

    use super::*;

    fn test_config() -> Config {
        let mut config = Config::new("Georgios Xylouris", "https://xilouris.github.io");
        config.site.description = Some("Personal academic site".to_string());
        config
    }

    #[test]
    fn test_generate_home_page() {
        let generator = HtmlGenerator::new(test_config());
        let content = fixture::starter_content();

        let html = generator.generate(PageKind::Home, &content).unwrap();

        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("<title>[Your Name]</title>"));
        assert!(html.contains(r#"<link rel="canonical" href="https://xilouris.github.io/">"#));
        assert!(html.contains("<h1>[Your Name]</h1>"));
        assert!(html.contains("<strong>Markdown</strong>"));
        assert!(html.contains("Selected Publications"));
    }

    #[test]
    fn test_generate_sub_page_title_and_nav() {
        let generator = HtmlGenerator::new(test_config());
        let content = fixture::starter_content();

        let html = generator.generate(PageKind::Cv, &content).unwrap();

        assert!(html.contains("<title>Curriculum Vitae | Georgios Xylouris</title>"));
        assert!(html.contains(r#"<a href="/cv/" class="active" aria-current="page">CV</a>"#));
        assert!(html.contains(r#"<a href="/links/">Links</a>"#));
    }

    #[test]
    fn test_nav_skips_empty_sections() {
        let generator = HtmlGenerator::new(test_config());
        let mut content = fixture::starter_content();
        content.links.clear();

        let html = generator.generate(PageKind::Home, &content).unwrap();
        assert!(!html.contains(r#"href="/links/""#));
        assert!(!PageKind::Links.has_content(&content));
    }

    #[test]
    fn test_social_links_omit_absent_platforms() {
        let links = SocialLinks {
            github: Some("https://github.com/xilouris".to_string()),
            research_gate: None,
            ..SocialLinks::default()
        };

        let html = social_links_html(&links).unwrap();
        assert!(html.contains(r#"href="https://github.com/xilouris""#));
        assert!(!html.contains("ResearchGate"));

        assert!(social_links_html(&SocialLinks::default()).is_none());
    }

    #[test]
    fn test_cv_item_omits_absent_fields() {
        let generator = HtmlGenerator::new(test_config());
        let item = CvItem {
            title: "Head of NOC".to_string(),
            ..CvItem::default()
        };

        let html = generator.cv_item_html(&item);
        assert!(html.contains("<h3>Head of NOC</h3>"));
        assert!(!html.contains("period"));
        assert!(!html.contains("organization"));
        assert!(!html.contains("location"));
        assert!(!html.contains("details"));
    }

    #[test]
    fn test_cv_item_empty_details_render_nothing() {
        let generator = HtmlGenerator::new(test_config());
        let content = fixture::starter_content();
        let education = &content.cv[0].items[0];
        assert_eq!(education.details, Some(Vec::new()));

        let html = generator.cv_item_html(education);
        assert!(!html.contains("<ul"));
        assert!(html.contains("2010 \u{2013} 2014"));
    }

    #[test]
    fn test_projects_grouped_by_status() {
        let generator = HtmlGenerator::new(test_config());
        let content = fixture::starter_content();

        let html = generator.generate(PageKind::Projects, &content).unwrap();
        let active = html.find(r#"id="active""#).unwrap();
        let completed = html.find(r#"id="completed""#).unwrap();
        let current = html.find("[PROJECT - Full Project Title]").unwrap();
        let past = html.find("[PAST - Completed Project Title]").unwrap();

        assert!(active < current && current < completed && completed < past);
        assert!(html.contains("Active Projects"));
        assert!(html.contains("Completed Projects"));
        assert!(html.contains(r##"<a href="/publications/#starter-journal-2024">"##));
    }

    #[test]
    fn test_open_ended_project_shows_present() {
        let generator = HtmlGenerator::new(test_config());
        let mut project = fixture::starter_content().projects.active()[0].clone();
        project.end_date = None;

        let html = generator.project_html(&project, &PublicationList::default());
        assert!(html.contains("2023 \u{2013} Present"));
    }

    #[test]
    fn test_publications_grouped_by_year() {
        let generator = HtmlGenerator::new(test_config());
        let content = fixture::starter_content();

        let html = generator.generate(PageKind::Publications, &content).unwrap();
        let newer = html.find(r#"id="year-2024""#).unwrap();
        let older = html.find(r#"id="year-2022""#).unwrap();
        assert!(newer < older);
        assert!(html.contains(r#"<a href="https://doi.org/10.0000/placeholder">DOI</a>"#));
        assert!(!html.contains("scholar-stats"));
    }

    #[test]
    fn test_links_grouped_by_category() {
        let generator = HtmlGenerator::new(test_config());
        let content = fixture::starter_content();

        let html = generator.generate(PageKind::Links, &content).unwrap();
        let research = html.find(r#"id="5g-6g-research""#).unwrap();
        let standards = html.find(r#"id="standards-specifications""#).unwrap();
        assert!(research < standards);
        assert!(html.contains("Standards &amp; Specifications"));
        assert!(!html.contains(r#"id="cybersecurity""#));
    }

    #[test]
    fn test_generate_blog_index_skips_drafts() {
        let generator = HtmlGenerator::new(test_config());
        let mut content = fixture::starter_content();
        let mut draft = content.posts[0].clone();
        draft.slug = "unfinished".to_string();
        draft.meta.draft = true;
        content.posts.push(draft);

        let html = generator.generate(PageKind::Blog, &content).unwrap();

        assert!(html.contains("<title>Blog | Georgios Xylouris</title>"));
        assert!(html.contains(r#"<a href="/blog/welcome/">[First Post Title]</a>"#));
        assert!(html.contains(r#"<time datetime="2025-01-15">January 15, 2025</time>"#));
        assert!(!html.contains("/blog/unfinished/"));
        assert!(html.contains(r#"title="Blog" href="https://xilouris.github.io/blog.xml""#));
    }

    #[test]
    fn test_generate_post_page() {
        let generator = HtmlGenerator::new(test_config());
        let content = fixture::starter_content();
        let post = &content.posts[0];

        let html = generator.generate_post(post, &content).unwrap();

        assert!(html.contains("<title>[First Post Title] | Georgios Xylouris</title>"));
        assert!(html.contains(
            r#"<link rel="canonical" href="https://xilouris.github.io/blog/welcome/">"#
        ));
        assert!(html.contains(r#"content="[One-sentence summary of the post]""#));
        assert!(html.contains(r#"<span class="author">[Your Name]</span>"#));
        assert!(html.contains("<strong>Markdown</strong>"));
        assert!(html.contains(r#"<a href="/blog/" class="active" aria-current="page">Blog</a>"#));
        assert!(!html.contains("hero-image"));
        assert!(!html.contains("Updated"));
    }

    #[test]
    fn test_post_author_and_update_date() {
        let generator = HtmlGenerator::new(test_config());
        let content = fixture::starter_content();
        let mut post = content.posts[0].clone();
        post.meta.author = Some("A. Kourtis".to_string());
        post.meta.updated_date = NaiveDate::from_ymd_opt(2025, 2, 1);
        post.meta.hero_image = Some("/images/hero.png".to_string());

        let html = generator.generate_post(&post, &content).unwrap();

        assert!(html.contains(r#"<span class="author">A. Kourtis</span>"#));
        assert!(html.contains(r#"Updated <time datetime="2025-02-01">"#));
        assert!(html.contains(r#"<img class="hero-image" src="/images/hero.png""#));
    }

    #[test]
    fn test_blog_absent_without_published_posts() {
        let generator = HtmlGenerator::new(test_config());
        let mut content = fixture::starter_content();
        content.posts[0].meta.draft = true;

        assert!(!PageKind::Blog.has_content(&content));
        let html = generator.generate(PageKind::Home, &content).unwrap();
        assert!(!html.contains(r#"href="/blog/""#));
        assert!(!html.contains("blog.xml"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">R&D's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;R&amp;D&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_content_text_is_escaped() {
        let generator = HtmlGenerator::new(test_config());
        let mut content = fixture::starter_content();
        content.profile.name = "<script>x</script>".to_string();

        let html = generator.generate(PageKind::Home, &content).unwrap();
        assert!(!html.contains("<script>x</script>"));
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Professional Experience"), "professional-experience");
        assert_eq!(slugify("[PROJECT]"), "project");
        assert_eq!(slugify("5G-EPICENTRE"), "5g-epicentre");
    }

    #[test]
    fn test_output_path() {
        let generator = HtmlGenerator::new(test_config());
        let output_dir = Path::new("public");

        assert_eq!(
            generator.output_path(PageKind::Home, output_dir),
            PathBuf::from("public/index.html")
        );
        assert_eq!(
            generator.output_path(PageKind::Publications, output_dir),
            PathBuf::from("public/publications/index.html")
        );

        let post = &fixture::starter_content().posts[0];
        assert_eq!(
            generator.post_output_path(post, output_dir),
            PathBuf::from("public/blog/welcome/index.html")
        );
    }
}
