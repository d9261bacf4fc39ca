//! scholarsite CLI
//!
//! Single binary static site generator for academic profiles.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for scholarsite.
#[derive(Parser)]
#[command(
    name = "scholarsite",
    version,
    about = "A static site generator for academic profiles"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Content directory (defaults to build.content_dir)
    #[arg(long)]
    content: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Build the static site
    Build {
        /// Output directory (defaults to build.output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Override site base URL (e.g., https://example.github.io)
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Validate configuration and content
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Scaffold a new site with placeholder content
    New {
        /// Directory to create the site in
        path: PathBuf,
    },
    /// Convert a Google Scholar JSON export into publications.toml
    ImportScholar {
        /// Path to the exported author record
        export: PathBuf,
        /// Output file (defaults to <content>/publications.toml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    scholarsite::init_tracing(cli.verbose);

    let content = cli.content.as_deref();

    match cli.command {
        Commands::Build { output, base_url } => {
            scholarsite::cmd::build::run(
                &cli.config,
                content,
                output.as_deref(),
                base_url.as_deref(),
            )?;
        }
        Commands::Check { strict } => {
            scholarsite::cmd::check::run(&cli.config, content, strict)?;
        }
        Commands::New { path } => {
            scholarsite::cmd::new::run(&path)?;
        }
        Commands::ImportScholar { export, output } => {
            scholarsite::cmd::import::run(&cli.config, content, &export, output.as_deref())?;
        }
    }

    Ok(())
}
