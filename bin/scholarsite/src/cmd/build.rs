//! Build command - generates the static site

use std::{path::Path, time::Instant};

use color_eyre::eyre::{Result, WrapErr};
use scholarsite_core::Config;
use scholarsite_generator::{BuildStats, Builder};

/// Run the build command.
///
/// Loads the configuration (with `SCHOLARSITE__*` overrides), applies the
/// command-line overrides and builds the site.
pub fn run(
    config_path: &Path,
    content: Option<&Path>,
    output: Option<&Path>,
    base_url: Option<&str>,
) -> Result<BuildStats> {
    let start = Instant::now();
    tracing::info!(?config_path, ?content, ?output, ?base_url, "Starting build");

    let mut config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;

    if let Some(output) = output {
        config.build.output_dir = output.to_string_lossy().to_string();
    }

    if let Some(url) = base_url {
        tracing::info!(base_url = url, "Overriding site base_url from CLI");
        config.site.base_url = url.to_string();
        config.validate().wrap_err("Invalid --base-url")?;
    }

    tracing::debug!(?config, "Loaded configuration");

    let content_dir = super::content_dir(content, &config);
    let output_dir = Path::new(&config.build.output_dir).to_path_buf();
    let static_dir = Path::new(&config.build.static_dir).to_path_buf();

    let mut builder = Builder::new(config, &content_dir, &output_dir);
    if static_dir.is_dir() {
        tracing::info!(static_dir = %static_dir.display(), "Found static directory, will copy to output");
        builder = builder.with_static_dir(&static_dir);
    }

    let stats = builder.build().wrap_err("Build failed")?;
    let duration = start.elapsed();

    println!();
    println!("  Build completed successfully!");
    println!();
    println!("  Pages:      {}", stats.pages);
    println!("  Posts:      {}", stats.posts);
    println!("  Feed items: {}", stats.feed_items);
    println!("  Assets:     {}", stats.assets);
    println!();
    println!("  Duration:   {:.2}s", duration.as_secs_f64());
    println!("  Output:     {}", output_dir.display());
    println!();

    tracing::info!(?stats, ?duration, "Build completed successfully");

    Ok(stats)
}
