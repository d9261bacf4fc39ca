//! Front matter splitting for Markdown posts.

/// Delimiter types for front matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML front matter delimited by `---`.
    Yaml,
    /// TOML front matter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Get the delimiter string for this format.
    #[must_use]
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split a document into its front matter and body.
///
/// Both delimiters must sit on a line of their own. Returns `None` when the
/// document does not open with a delimiter or the block is never closed.
#[must_use]
pub fn split_frontmatter(source: &str) -> Option<(FrontmatterFormat, &str, &str)> {
    let source = source.trim_start_matches('\u{feff}').trim_start();

    let format = if source.starts_with("---") {
        FrontmatterFormat::Yaml
    } else if source.starts_with("+++") {
        FrontmatterFormat::Toml
    } else {
        return None;
    };
    let delimiter = format.delimiter();

    let after_open = &source[delimiter.len()..];
    let line_end = after_open.find('\n')?;
    if !after_open[..line_end].trim().is_empty() {
        return None;
    }
    let rest = &after_open[line_end + 1..];

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == delimiter {
            let frontmatter = &rest[..offset];
            let body = rest[offset + line.len()..].trim_start_matches(['\r', '\n']);
            return Some((format, frontmatter, body));
        }
        offset += line.len();
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_yaml_frontmatter() {
        let content = r#"---
title: "Hello World"
pub_date: 2024-01-14
---

This is the body content."#;

        let (format, fm, body) = split_frontmatter(content).expect("split");
        assert_eq!(format, FrontmatterFormat::Yaml);
        assert!(fm.contains("title:"));
        assert_eq!(body, "This is the body content.");
    }

    #[test]
    fn test_split_toml_frontmatter() {
        let content = "+++\ntitle = \"Hello World\"\r\n+++\r\n\r\nBody.";

        let (format, fm, body) = split_frontmatter(content).expect("split");
        assert_eq!(format, FrontmatterFormat::Toml);
        assert!(fm.contains("title ="));
        assert_eq!(body, "Body.");
    }

    #[test]
    fn test_delimiter_inside_value_does_not_close() {
        let content = "---\ntitle: \"a --- b\"\n---\nBody with --- inside.";

        let (_, fm, body) = split_frontmatter(content).expect("split");
        assert_eq!(fm, "title: \"a --- b\"\n");
        assert_eq!(body, "Body with --- inside.");
    }

    #[test]
    fn test_no_frontmatter() {
        assert!(split_frontmatter("Just some content without frontmatter.").is_none());
        assert!(split_frontmatter("---\ntitle: never closed\n").is_none());
        assert!(split_frontmatter("--- title: inline\n---\n").is_none());
    }
}
