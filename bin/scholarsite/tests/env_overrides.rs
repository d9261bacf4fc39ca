//! Environment overrides apply to every command that reads config.toml.
//!
//! Kept in its own test binary since it mutates the process environment.

use std::fs;

use scholarsite::cmd;
use scholarsite_core::fixture;
use tempfile::TempDir;

#[test]
fn test_commands_honour_environment_overrides() {
    let root = TempDir::new().unwrap();
    let config_path = root.path().join("config.toml");
    fs::write(
        &config_path,
        "[site]\ntitle = \"Test\"\nbase_url = \"https://example.com\"\n\n[build]\ncontent_dir = \"missing\"\n",
    )
    .unwrap();
    let content = root.path().join("data");
    fixture::starter_content().write_toml(&content).unwrap();

    let without = cmd::check::check(&config_path, None);
    assert!(
        without
            .errors()
            .iter()
            .any(|e| e.contains("Content directory does not exist"))
    );

    // SAFETY: this binary runs a single test, so no other thread reads the environment.
    unsafe {
        std::env::set_var("SCHOLARSITE__BUILD__CONTENT_DIR", &content);
        std::env::set_var("SCHOLARSITE__SITE__BASE_URL", "https://staging.example.org/");
    }

    let with = cmd::check::check(&config_path, None);
    assert!(with.errors().is_empty(), "{:?}", with.errors());
    assert!(
        with.warnings()
            .iter()
            .any(|w| w.contains("should not end with a slash"))
    );

    let output = root.path().join("public");
    let stats = cmd::build::run(&config_path, None, Some(&output), None).unwrap();
    assert!(stats.pages > 0);
    let sitemap = fs::read_to_string(output.join("sitemap.xml")).unwrap();
    assert!(sitemap.contains("https://staging.example.org/"));
}
