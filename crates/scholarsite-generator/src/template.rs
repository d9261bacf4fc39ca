//! HTML template system for page generation.
//!
//! A small string interpolation engine: `{{ name }}` inserts a required
//! variable and `{{ name? }}` an optional one. Values are inserted verbatim,
//! so callers escape text before putting it in a context.

use std::collections::HashMap;

use thiserror::Error;

/// Template rendering errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Missing required variable.
    #[error("missing required variable: {0}")]
    MissingVariable(String),

    /// Template not found.
    #[error("template not found: {0}")]
    NotFound(String),

    /// Invalid template syntax.
    #[error("invalid template syntax: {0}")]
    InvalidSyntax(String),
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Template context with variables for interpolation.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    variables: HashMap<String, String>,
}

impl TemplateContext {
    /// Create a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable into the context.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Insert a variable only when a value is present.
    pub fn insert_opt(&mut self, key: impl Into<String>, value: Option<impl Into<String>>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    /// Create context with initial variables.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a variable value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Check if a variable exists.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }
}

/// A named template.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    content: String,
}

impl Template {
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the template with the given context.
    ///
    /// Substituted values are never rescanned for placeholders.
    pub fn render(&self, context: &TemplateContext) -> Result<String> {
        let mut result = String::with_capacity(self.content.len());
        let mut rest = self.content.as_str();

        while let Some(start) = rest.find("{{") {
            result.push_str(&rest[..start]);

            let after_open = &rest[start + 2..];
            let end = after_open.find("}}").ok_or_else(|| {
                TemplateError::InvalidSyntax(format!("unclosed {{{{ in template `{}`", self.name))
            })?;

            let var_name = after_open[..end].trim();
            let (var_name, optional) = match var_name.strip_suffix('?') {
                Some(stripped) => (stripped.trim_end(), true),
                None => (var_name, false),
            };

            match context.get(var_name) {
                Some(value) => result.push_str(value),
                None if optional => {}
                None => return Err(TemplateError::MissingVariable(var_name.to_string())),
            }

            rest = &after_open[end + 2..];
        }

        result.push_str(rest);
        Ok(result)
    }
}

/// Registry of templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, Template>,
}

impl TemplateRegistry {
    /// Create a new registry with the built-in templates.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register_defaults();
        registry
    }

    fn register_defaults(&mut self) {
        self.register(Template::new("base", DEFAULT_BASE_TEMPLATE));
        self.register(Template::new("home", DEFAULT_HOME_TEMPLATE));
        self.register(Template::new("cv", DEFAULT_CV_TEMPLATE));
        self.register(Template::new("projects", DEFAULT_PROJECTS_TEMPLATE));
        self.register(Template::new("publications", DEFAULT_PUBLICATIONS_TEMPLATE));
        self.register(Template::new("blog", DEFAULT_BLOG_TEMPLATE));
        self.register(Template::new("post", DEFAULT_POST_TEMPLATE));
        self.register(Template::new("links", DEFAULT_LINKS_TEMPLATE));
    }

    /// Register a template, replacing any template with the same name.
    pub fn register(&mut self, template: Template) {
        self.templates.insert(template.name.clone(), template);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Render a named template with the given context.
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String> {
        let template = self
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;
        template.render(context)
    }
}

/// Default base HTML template.
pub const DEFAULT_BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="{{ lang }}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}{{ site_title_suffix? }}</title>
    <meta name="description" content="{{ description? }}">
    <meta name="author" content="{{ author? }}">
    <link rel="canonical" href="{{ canonical_url }}">
    {{ feed_link? }}
    <style>
        :root {
            --color-primary: #1D4ED8;
            --color-primary-hover: #1E40AF;
            --color-bg: #F8FAFC;
            --color-surface: #FFFFFF;
            --color-text: #1E293B;
            --color-text-muted: #64748B;
            --color-border: #E2E8F0;
            --color-active: #15803D;
            --color-completed: #6B7280;
            --radius: 8px;
        }

        @media (prefers-color-scheme: dark) {
            :root {
                --color-primary: #60A5FA;
                --color-primary-hover: #93C5FD;
                --color-bg: #0F172A;
                --color-surface: #1E293B;
                --color-text: #F1F5F9;
                --color-text-muted: #94A3B8;
                --color-border: #334155;
            }
        }

        *, *::before, *::after { box-sizing: border-box; }

        body {
            margin: 0;
            font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
            line-height: 1.6;
            color: var(--color-text);
            background: var(--color-bg);
        }

        a { color: var(--color-primary); text-decoration: none; }
        a:hover { color: var(--color-primary-hover); text-decoration: underline; }

        .container { max-width: 56rem; margin: 0 auto; padding: 0 1.5rem; }

        header.site-header { border-bottom: 1px solid var(--color-border); background: var(--color-surface); }
        header.site-header nav { display: flex; align-items: center; justify-content: space-between; padding: 1rem 0; }
        .site-title { font-weight: 700; color: var(--color-text); }
        .nav-links { display: flex; gap: 1.25rem; }
        .nav-links a.active { font-weight: 600; border-bottom: 2px solid var(--color-primary); }

        main { padding: 2.5rem 0; }
        h1, h2, h3 { line-height: 1.25; }
        .muted, .period, .venue { color: var(--color-text-muted); }

        .profile { display: flex; gap: 2rem; align-items: flex-start; }
        .profile img { width: 10rem; height: 10rem; object-fit: cover; border-radius: 50%; }
        .social-links { display: flex; flex-wrap: wrap; gap: 0.75rem; padding: 0; list-style: none; }
        .tags { display: flex; flex-wrap: wrap; gap: 0.5rem; padding: 0; list-style: none; }
        .tags li { padding: 0.125rem 0.625rem; border: 1px solid var(--color-border); border-radius: 999px; font-size: 0.875rem; }

        .card {
            background: var(--color-surface);
            border: 1px solid var(--color-border);
            border-radius: var(--radius);
            padding: 1.25rem 1.5rem;
            margin-bottom: 1rem;
        }

        .stats { display: grid; grid-template-columns: repeat(auto-fit, minmax(9rem, 1fr)); gap: 1rem; }
        .stat .value { display: block; font-size: 1.75rem; font-weight: 700; }
        .status { font-size: 0.75rem; text-transform: uppercase; letter-spacing: 0.05em; }
        .status-active { color: var(--color-active); }
        .status-completed { color: var(--color-completed); }

        .post-list { padding: 0; list-style: none; }
        .post-summary { padding: 1rem 0; border-bottom: 1px solid var(--color-border); }
        .post-summary h2 { margin: 0 0 0.25rem; font-size: 1.25rem; }
        .post-summary.featured h2::before { content: "\2605  "; color: var(--color-primary); }
        .post-meta, time { color: var(--color-text-muted); font-size: 0.875rem; }
        article.post > img { width: 100%; border-radius: var(--radius); }
        .post-body pre { overflow-x: auto; padding: 1rem; background: var(--color-surface); border-radius: var(--radius); }

        footer { border-top: 1px solid var(--color-border); padding: 1.5rem 0; color: var(--color-text-muted); font-size: 0.875rem; }

        @media (max-width: 640px) {
            .profile { flex-direction: column; }
            .nav-links { gap: 0.75rem; }
        }
    </style>
</head>
<body>
    <header class="site-header">
        <div class="container">
            <nav>
                <a href="/" class="site-title">{{ site_title }}</a>
                <div class="nav-links">
                    {{ nav }}
                </div>
            </nav>
        </div>
    </header>
    <main>
        <div class="container">
            {{ content }}
        </div>
    </main>
    <footer>
        <div class="container">
            <p>&copy; {{ year }} {{ site_title }}</p>
        </div>
    </footer>
</body>
</html>"##;

/// Default home page template.
pub const DEFAULT_HOME_TEMPLATE: &str = r#"<section class="profile">
    {{ portrait? }}
    <div class="profile-summary">
        <h1>{{ name }}</h1>
        <p class="profile-title">{{ position }}</p>
        <p class="profile-affiliation">{{ affiliation }}</p>
        {{ contact? }}
        {{ social_html? }}
    </div>
</section>
<section class="bio">
    <h2>About</h2>
    {{ bio_html }}
</section>
{{ interests_html? }}
{{ featured_html? }}"#;

/// Default CV template.
pub const DEFAULT_CV_TEMPLATE: &str = r#"<article class="cv">
    <header class="page-header">
        <h1>{{ title }}</h1>
        {{ cv_download? }}
    </header>
    {{ sections_html }}
    {{ skills_html? }}
    {{ awards_html? }}
    {{ service_html? }}
</article>"#;

/// Default projects template.
pub const DEFAULT_PROJECTS_TEMPLATE: &str = r#"<article class="projects">
    <h1>{{ title }}</h1>
    {{ stats_html }}
    {{ groups_html }}
</article>"#;

/// Default publications template.
pub const DEFAULT_PUBLICATIONS_TEMPLATE: &str = r#"<article class="publications">
    <h1>{{ title }}</h1>
    {{ scholar_html? }}
    {{ groups_html }}
</article>"#;

/// Default blog index template.
pub const DEFAULT_BLOG_TEMPLATE: &str = r#"<article class="blog">
    <h1>{{ title }}</h1>
    {{ posts_html }}
</article>"#;

/// Default blog post template.
pub const DEFAULT_POST_TEMPLATE: &str = r#"<article class="post">
    <header>
        <h1>{{ title }}</h1>
        <p class="post-meta">{{ byline }}</p>
        {{ tags_html? }}
    </header>
    {{ hero_html? }}
    <div class="post-body">
        {{ body_html }}
    </div>
    <footer>
        <p><a href="{{ blog_url }}">All posts</a></p>
    </footer>
</article>"#;

/// Default links template.
pub const DEFAULT_LINKS_TEMPLATE: &str = r#"<article class="links">
    <h1>{{ title }}</h1>
    {{ groups_html }}
</article>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_simple_render() {
        let template = Template::new("test", "Hello, {{ name }}!");
        let mut ctx = TemplateContext::new();
        ctx.insert("name", "World");

        let result = template.render(&ctx).unwrap();
        assert_eq!(result, "Hello, World!");
    }

    #[test]
    fn test_template_multiple_variables() {
        let template = Template::new("test", "{{ name }}, {{ title }} at {{ affiliation }}.");
        let ctx = TemplateContext::new()
            .with_var("name", "Georgios Xylouris")
            .with_var("title", "Head of NOC")
            .with_var("affiliation", "NCSR Demokritos");

        let result = template.render(&ctx).unwrap();
        assert_eq!(result, "Georgios Xylouris, Head of NOC at NCSR Demokritos.");
    }

    #[test]
    fn test_template_optional_variable() {
        let template = Template::new("test", "Hello{{ suffix? }}!");
        let ctx = TemplateContext::new();

        let result = template.render(&ctx).unwrap();
        assert_eq!(result, "Hello!");

        let ctx = TemplateContext::new().with_var("suffix", ", World");
        let result = template.render(&ctx).unwrap();
        assert_eq!(result, "Hello, World!");
    }

    #[test]
    fn test_template_missing_required_variable() {
        let template = Template::new("test", "Hello, {{ name }}!");
        let ctx = TemplateContext::new();

        let result = template.render(&ctx);
        assert!(matches!(result, Err(TemplateError::MissingVariable(ref v)) if v == "name"));
    }

    #[test]
    fn test_template_unclosed_delimiter() {
        let template = Template::new("broken", "Hello, {{ name");
        let result = template.render(&TemplateContext::new());
        assert!(matches!(result, Err(TemplateError::InvalidSyntax(_))));
    }

    #[test]
    fn test_substituted_values_are_not_rescanned() {
        let template = Template::new("test", "<p>{{ bio }}</p>");
        let ctx = TemplateContext::new().with_var("bio", "uses {{ braces }}");

        let result = template.render(&ctx).unwrap();
        assert_eq!(result, "<p>uses {{ braces }}</p>");
    }

    #[test]
    fn test_insert_opt() {
        let mut ctx = TemplateContext::new();
        ctx.insert_opt("email", None::<String>);
        ctx.insert_opt("location", Some("Athens, Greece"));

        assert!(!ctx.contains("email"));
        assert_eq!(ctx.get("location"), Some("Athens, Greece"));
    }

    #[test]
    fn test_template_registry() {
        let registry = TemplateRegistry::new();

        for name in ["base", "home", "cv", "projects", "publications", "blog", "post", "links"] {
            assert!(registry.get(name).is_some(), "missing template {name}");
        }
        assert!(registry.get("nonexistent").is_none());
        assert!(matches!(
            registry.render("nonexistent", &TemplateContext::new()),
            Err(TemplateError::NotFound(_))
        ));
    }

    #[test]
    fn test_render_base_template() {
        let registry = TemplateRegistry::new();
        let ctx = TemplateContext::new()
            .with_var("lang", "en")
            .with_var("title", "CV")
            .with_var("canonical_url", "https://example.com/cv/")
            .with_var("content", "<p>Hello!</p>")
            .with_var("site_title", "My Site")
            .with_var("nav", r#"<a href="/cv/">CV</a>"#)
            .with_var("year", "2026");

        let result = registry.render("base", &ctx).unwrap();
        assert!(result.contains("<!DOCTYPE html>"));
        assert!(result.contains("<title>CV</title>"));
        assert!(result.contains("<p>Hello!</p>"));
        assert!(result.contains(r#"<a href="/cv/">CV</a>"#));
    }
}
