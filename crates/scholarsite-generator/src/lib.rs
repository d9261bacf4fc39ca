//! scholarsite Generator Library
//!
//! Static site generation engine for scholarsite.
//!
//! # Modules
//!
//! - [`template`] - HTML template system with variable interpolation
//! - [`markup`] - Markdown rendering for free-text fields
//! - [`html`] - HTML generation for each site section and blog post
//! - [`feed`] - RSS feeds of publications and blog posts
//! - [`sitemap`] - XML sitemap generation
//! - [`robots`] - robots.txt generation
//! - [`assets`] - Static asset copying
//! - [`build`] - Build orchestration

pub mod assets;
pub mod build;
pub mod feed;
pub mod html;
pub mod markup;
pub mod robots;
pub mod sitemap;
pub mod template;

pub use assets::AssetProcessor;
pub use build::{BuildStats, Builder};
pub use feed::FeedGenerator;
pub use html::{HtmlGenerator, PageKind};
pub use robots::RobotsGenerator;
pub use sitemap::SitemapGenerator;
pub use template::{Template, TemplateContext, TemplateRegistry};
