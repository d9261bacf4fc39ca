//! scholarsite CLI Library
//!
//! Command implementations for the scholarsite binary, exposed as a library
//! so they can be exercised from tests and other tools.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, check, new, import-scholar)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use scholarsite::cmd;
//!
//! // Build the site with the settings from config.toml
//! cmd::build::run(Path::new("config.toml"), None, None, None).unwrap();
//! ```

pub mod cmd;

// Re-export core types for convenience
pub use scholarsite_core::{Config, SiteContent};
pub use scholarsite_generator::{BuildStats, Builder};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
///
/// # Example
///
/// ```no_run
/// scholarsite::init_tracing(2); // Enable DEBUG level logging
/// ```
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
