//! Robots.txt generation.

use std::{fmt::Write as _, fs, path::Path};

use scholarsite_core::Config;
use thiserror::Error;
use tracing::info;

/// Robots generation errors.
#[derive(Debug, Error)]
pub enum RobotsError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for robots generation.
pub type Result<T> = std::result::Result<T, RobotsError>;

/// Robots.txt generator.
#[derive(Debug)]
pub struct RobotsGenerator {
    config: Config,
}

impl RobotsGenerator {
    /// Create a new robots generator.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Render robots.txt, pointing crawlers at the sitemap.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from("User-agent: *\n");

        for path in &self.config.robots.disallow {
            let _ = writeln!(out, "Disallow: {path}");
        }

        for path in &self.config.robots.allow {
            let _ = writeln!(out, "Allow: {path}");
        }

        let _ = writeln!(out, "Sitemap: {}", self.config.url_for("sitemap.xml"));
        out
    }

    /// Write robots.txt into `output_dir` when enabled.
    ///
    /// Returns whether a file was written.
    pub fn generate(&self, output_dir: &Path) -> Result<bool> {
        if !self.config.robots.enabled {
            return Ok(false);
        }

        info!("generating robots.txt");
        fs::write(output_dir.join("robots.txt"), self.render())?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_render_robots() {
        let mut config = Config::new("Site", "https://xilouris.github.io");
        config.robots.disallow = vec!["/drafts/".to_string()];

        let robots = RobotsGenerator::new(config).render();

        assert_eq!(
            robots,
            "User-agent: *\nDisallow: /drafts/\nSitemap: https://xilouris.github.io/sitemap.xml\n"
        );
    }

    #[test]
    fn test_disabled_robots_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::new("Site", "https://example.com");
        config.robots.enabled = false;

        let written = RobotsGenerator::new(config).generate(dir.path()).unwrap();

        assert!(!written);
        assert!(!dir.path().join("robots.txt").exists());
    }
}
