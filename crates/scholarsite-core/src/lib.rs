//! Scholarsite Core Library
//!
//! Content model, type contracts, configuration and error handling for the
//! scholarsite academic profile generator.
//!
//! # Modules
//!
//! - [`model`] - Typed content records (profile, CV, projects, publications, links, posts)
//! - [`content`] - Loading the content directory into a [`SiteContent`]
//! - [`frontmatter`] - Splitting Markdown posts into front matter and body
//! - [`validate`] - Load-time checks of the content invariants
//! - [`fixture`] - Placeholder starter content for scaffolding and tests
//! - [`config`] - Site configuration

pub mod config;
pub mod content;
pub mod error;
pub mod fields;
pub mod fixture;
pub mod frontmatter;
pub mod model;
pub mod validate;

pub use config::Config;
pub use content::{ContentFile, SiteContent};
pub use error::{CoreError, Result};
pub use model::{
    Award, CvItem, CvSection, DateRange, Link, LinkCategory, Post, PostMeta, Profile, Project,
    ProjectCatalog, ProjectStats, ProjectStatus, ProjectSummary, Publication, PublicationKind,
    PublicationList, ScholarStats, ServiceRole, SkillGroup, SocialLinks, SocialPlatform,
};
pub use validate::{Issue, Severity, ValidationReport};
