//! Markdown rendering for free-text content fields.
//!
//! Biographies and descriptions are written in Markdown. Raw HTML in those
//! fields is escaped rather than passed through.

use pulldown_cmark::{Event, Options, Parser, html};

/// Markdown renderer for content fields.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    options: Options,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    #[must_use]
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);

        Self { options }
    }

    /// Render Markdown to block-level HTML.
    #[must_use]
    pub fn render(&self, text: &str) -> String {
        let parser = Parser::new_ext(text, self.options).map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            other => other,
        });

        let mut output = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut output, parser);
        output
    }

    /// Render a single paragraph of Markdown without the wrapping `<p>`.
    ///
    /// Multi-paragraph input is returned as block HTML.
    #[must_use]
    pub fn render_inline(&self, text: &str) -> String {
        let rendered = self.render(text);
        let trimmed = rendered.trim_end();

        match trimmed
            .strip_prefix("<p>")
            .and_then(|s| s.strip_suffix("</p>"))
        {
            Some(inner) if !inner.contains("<p>") => inner.to_string(),
            _ => rendered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_paragraphs() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("First paragraph.\n\nSecond with **bold**.");

        assert!(html.contains("<p>First paragraph.</p>"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("Hello <script>alert(1)</script>");

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_render_inline_strips_paragraph() {
        let renderer = MarkdownRenderer::new();
        assert_eq!(
            renderer.render_inline("Network *automation*"),
            "Network <em>automation</em>"
        );
    }

    #[test]
    fn test_render_inline_keeps_multiple_paragraphs() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render_inline("One.\n\nTwo.");
        assert!(html.starts_with("<p>One.</p>"));
        assert!(html.contains("<p>Two.</p>"));
    }

    #[test]
    fn test_ampersand_is_escaped() {
        let renderer = MarkdownRenderer::new();
        assert_eq!(renderer.render_inline("R&D"), "R&amp;D");
    }
}
