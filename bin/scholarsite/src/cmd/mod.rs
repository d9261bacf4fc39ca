//! Command implementations.

use std::path::{Path, PathBuf};

use scholarsite_core::Config;

pub mod build;
pub mod check;
pub mod import;
pub mod new;

/// Content directory from the command line, falling back to `build.content_dir`.
#[must_use]
pub fn content_dir(cli_content: Option<&Path>, config: &Config) -> PathBuf {
    cli_content
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.build.content_dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_dir_prefers_cli() {
        let mut config = Config::new("Site", "https://example.com");
        config.build.content_dir = "data".to_string();

        assert_eq!(content_dir(None, &config), PathBuf::from("data"));
        assert_eq!(
            content_dir(Some(Path::new("other")), &config),
            PathBuf::from("other")
        );
    }
}
