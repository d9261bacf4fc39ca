//! Check command - validate configuration and content

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use scholarsite_core::{
    Config, ContentFile, Severity, SiteContent,
    content::{POST_EXTENSION, POSTS_DIR},
};

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates configuration and every content file, then prints all issues.
pub fn run(config_path: &Path, content: Option<&Path>, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and content");

    let result = check(config_path, content);

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Run every check and collect the findings.
pub fn check(config_path: &Path, content: Option<&Path>) -> ValidationResult {
    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let config = match Config::load_with_env(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            check_config_values(&c, &mut result);
            c
        }
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            println!("  ✗ Configuration invalid: {e}");
            // Content can still be checked against the default layout.
            Config::new("scholarsite", "https://example.com")
        }
    };

    let content_dir = super::content_dir(content, &config);
    println!("\nChecking content files in {}...", content_dir.display());

    if !content_dir.is_dir() {
        result.add_error(format!(
            "Content directory does not exist: {}",
            content_dir.display()
        ));
        println!("  ✗ {} missing (required)", content_dir.display());
        return result;
    }

    check_unrecognised_files(&content_dir, &mut result);

    match SiteContent::load(&content_dir) {
        Ok(site) => {
            println!("  ✓ All content files parsed");
            check_content(&site, &mut result);
            println!("\nChecking static references...");
            check_static_references(&site, Path::new(&config.build.static_dir), &mut result);
        }
        Err(e) => {
            result.add_error(e.to_string());
            println!("  ✗ Content failed to load");
        }
    }

    result
}

/// Check configuration values for common issues.
fn check_config_values(config: &Config, result: &mut ValidationResult) {
    if !config.site.base_url.starts_with("http") {
        result.add_warning("site.base_url should start with http:// or https://");
    }

    if config.site.base_url.ends_with('/') {
        result.add_warning("site.base_url should not end with a slash");
    }

    let output = Path::new(&config.build.output_dir);
    if output.exists() && !output.is_dir() {
        result.add_error(format!(
            "Output path exists but is not a directory: {}",
            config.build.output_dir
        ));
    }
}

/// Warn about files in the content directory that are never loaded.
fn check_unrecognised_files(content_dir: &Path, result: &mut ValidationResult) {
    for entry in walkdir::WalkDir::new(content_dir)
        .min_depth(1)
        .max_depth(2)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
        .filter_map(|e| e.ok())
    {
        let name = entry.file_name().to_string_lossy();
        let is_file = entry.file_type().is_file();

        let recognised = match entry.depth() {
            1 if name == POSTS_DIR => entry.file_type().is_dir(),
            1 => is_file && ContentFile::from_file_name(&name).is_some(),
            _ => {
                let in_posts = entry
                    .path()
                    .parent()
                    .and_then(Path::file_name)
                    .is_some_and(|dir| dir == POSTS_DIR);
                let is_post = entry.path().extension().is_some_and(|ext| ext == POST_EXTENSION);
                // Entries of other subdirectories were reported with their parent.
                !in_posts || (is_file && is_post)
            }
        };

        if !recognised {
            result.add_warning(format!(
                "Unrecognised entry in content directory: {}",
                entry.path().display()
            ));
        }
    }
}

/// Fold the content validation report into the result.
fn check_content(content: &SiteContent, result: &mut ValidationResult) {
    let report = content.validate();

    for issue in report.issues() {
        match issue.severity {
            Severity::Error => result.add_error(issue.to_string()),
            Severity::Warning => result.add_warning(issue.to_string()),
        }
    }

    let errors = report.errors().count();
    if errors == 0 {
        println!("  ✓ Content invariants hold");
    } else {
        println!("  ✗ {errors} content invariant violation(s)");
    }
}

/// Warn when site-relative asset paths do not exist under the static directory.
fn check_static_references(content: &SiteContent, static_dir: &Path, result: &mut ValidationResult) {
    let profile = &content.profile;
    let mut references = vec![
        ("profile.profile_image".to_string(), profile.profile_image.as_deref()),
        ("profile.cv_url".to_string(), profile.cv_url.as_deref()),
    ];
    for (i, project) in content.projects.in_declared_order().enumerate() {
        references.push((format!("projects[{i}].logo"), project.logo.as_deref()));
    }
    for post in &content.posts {
        references.push((
            format!("posts/{}.md hero_image", post.slug),
            post.meta.hero_image.as_deref(),
        ));
    }

    let mut missing = 0;
    for (field, path) in references {
        let Some(path) = path.filter(|p| p.starts_with('/')) else {
            continue;
        };

        let on_disk = static_dir.join(path.trim_start_matches('/'));
        if !on_disk.exists() {
            missing += 1;
            result.add_warning(format!(
                "{field} points to {path} but {} does not exist",
                on_disk.display()
            ));
        }
    }

    if missing == 0 {
        println!("  ✓ All static references resolve");
    } else {
        println!("  ⚠ {missing} static reference(s) missing");
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use scholarsite_core::fixture;
    use tempfile::TempDir;

    use super::*;

    fn write_site(root: &Path) -> std::path::PathBuf {
        let config_path = root.join("config.toml");
        fs::write(
            &config_path,
            format!(
                "[site]\ntitle = \"Test\"\nbase_url = \"https://example.com\"\n\n[build]\nstatic_dir = \"{}\"\n",
                root.join("static").display()
            ),
        )
        .unwrap();
        fixture::starter_content()
            .write_toml(&root.join("content"))
            .unwrap();
        config_path
    }

    #[test]
    fn test_check_fixture_site() {
        let root = TempDir::new().unwrap();
        let config_path = write_site(root.path());

        let result = check(&config_path, Some(&root.path().join("content")));

        assert!(result.errors().is_empty(), "{:?}", result.errors());
        // The starter profile references a portrait and CV that are not shipped.
        assert_eq!(
            result
                .warnings()
                .iter()
                .filter(|w| w.contains("does not exist"))
                .count(),
            2
        );
    }

    #[test]
    fn test_unrecognised_file_is_warning() {
        let root = TempDir::new().unwrap();
        let config_path = write_site(root.path());
        fs::write(root.path().join("content/notes.md"), "draft").unwrap();
        fs::write(root.path().join("content/.hidden"), "").unwrap();

        let result = check(&config_path, Some(&root.path().join("content")));

        let unrecognised: Vec<_> = result
            .warnings()
            .iter()
            .filter(|w| w.contains("Unrecognised"))
            .collect();
        assert_eq!(unrecognised.len(), 1);
        assert!(unrecognised[0].contains("notes.md"));
    }

    #[test]
    fn test_non_markdown_file_in_posts_is_warning() {
        let root = TempDir::new().unwrap();
        let config_path = write_site(root.path());
        let posts = root.path().join("content/posts");
        fs::write(posts.join("draft.txt"), "idea").unwrap();
        fs::create_dir_all(root.path().join("content/drafts")).unwrap();
        fs::write(root.path().join("content/drafts/old.md"), "old").unwrap();

        let result = check(&config_path, Some(&root.path().join("content")));

        let unrecognised: Vec<_> = result
            .warnings()
            .iter()
            .filter(|w| w.contains("Unrecognised"))
            .collect();
        assert_eq!(unrecognised.len(), 2, "{unrecognised:?}");
        assert!(unrecognised.iter().any(|w| w.contains("draft.txt")));
        assert!(unrecognised.iter().any(|w| w.ends_with("drafts")));
        assert!(result.errors().is_empty(), "{:?}", result.errors());
    }

    #[test]
    fn test_missing_hero_image_is_warning() {
        let root = TempDir::new().unwrap();
        let config_path = write_site(root.path());
        let mut content = fixture::starter_content();
        content.posts[0].meta.hero_image = Some("/images/hero.png".to_string());
        content.write_toml(&root.path().join("content")).unwrap();

        let result = check(&config_path, Some(&root.path().join("content")));

        assert!(
            result
                .warnings()
                .iter()
                .any(|w| w.starts_with("posts/welcome.md hero_image points to /images/hero.png"))
        );
    }

    #[test]
    fn test_invalid_content_is_error() {
        let root = TempDir::new().unwrap();
        let config_path = write_site(root.path());
        fs::write(
            root.path().join("content/links.toml"),
            "[[links]]\ntitle = \"x\"\nurl = \"https://x.org\"\ncategory = \"Blogs\"\n",
        )
        .unwrap();

        let result = check(&config_path, Some(&root.path().join("content")));
        assert_eq!(result.errors().len(), 1);
        assert!(result.errors()[0].contains("links.toml"));
    }

    #[test]
    fn test_strict_mode_fails_on_warnings() {
        let root = TempDir::new().unwrap();
        let config_path = write_site(root.path());
        let content = root.path().join("content");

        assert!(run(&config_path, Some(&content), false).is_ok());
        assert!(run(&config_path, Some(&content), true).is_err());
    }

    #[test]
    fn test_missing_content_dir() {
        let root = TempDir::new().unwrap();
        let config_path = write_site(root.path());

        let result = check(&config_path, Some(&root.path().join("nope")));
        assert_eq!(result.errors().len(), 1);
    }
}
