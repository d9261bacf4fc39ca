//! New command - scaffold a site from the starter content

use std::{fs, path::Path};

use color_eyre::eyre::{Result, WrapErr, bail};
use scholarsite_core::fixture;

/// Run the new command.
///
/// Creates `config.toml`, a `content/` directory with placeholder files and a
/// sample post, and an empty `static/` directory under `dir`.
pub fn run(dir: &Path) -> Result<()> {
    tracing::info!(?dir, "Scaffolding new site");

    let content_dir = dir.join("content");
    if content_dir.exists() {
        bail!(
            "Refusing to overwrite existing content directory: {}",
            content_dir.display()
        );
    }

    let config_path = dir.join("config.toml");
    if config_path.exists() {
        bail!(
            "Refusing to overwrite existing configuration: {}",
            config_path.display()
        );
    }

    fs::create_dir_all(dir).wrap_err("Failed to create site directory")?;
    fs::write(&config_path, generate_config()).wrap_err("Failed to write config.toml")?;
    println!("Created: {}", config_path.display());

    let written = fixture::starter_content()
        .write_toml(&content_dir)
        .wrap_err("Failed to write starter content")?;
    for path in &written {
        println!("Created: {}", path.display());
    }

    let static_dir = dir.join("static");
    fs::create_dir_all(&static_dir).wrap_err("Failed to create static directory")?;
    println!("Created: {}/", static_dir.display());

    println!();
    println!("Replace the [bracketed] placeholders, then run `scholarsite build`.");

    tracing::info!(files = written.len() + 1, "Site scaffolded");
    Ok(())
}

fn generate_config() -> String {
    r#"[site]
title = "[Your Name]"
base_url = "https://example.org"
language = "en"
description = "[One-line description of your research]"

[build]
output_dir = "public"
content_dir = "content"
static_dir = "static"

[feed]
enabled = true
limit = 50

[robots]
enabled = true
disallow = []
"#
    .to_string()
}
