//! Placeholder starter content.
//!
//! Used by `scholarsite new` to scaffold a site and by tests as a small but
//! complete [`SiteContent`]. Fill-in text is written as `[bracketed]` hints.

use chrono::NaiveDate;

use crate::{
    content::SiteContent,
    model::{
        Award, CvItem, CvSection, Link, LinkCategory, Post, PostMeta, Profile, Project,
        ProjectCatalog, ProjectStatus, ProjectSummary, Publication, PublicationKind,
        PublicationList, ServiceRole, SkillGroup, SocialLinks,
    },
};

fn s(value: &str) -> String {
    value.to_string()
}

fn some(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn list(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// A complete starter site with placeholder text.
#[must_use]
pub fn starter_content() -> SiteContent {
    SiteContent {
        profile: starter_profile(),
        cv: starter_cv(),
        skills: vec![
            SkillGroup {
                category: s("Research Areas"),
                items: list(&["[Research area 1]", "[Research area 2]"]),
            },
            SkillGroup {
                category: s("Programming & Tools"),
                items: list(&["[Language or tool]"]),
            },
        ],
        awards: vec![Award {
            title: s("[Award Title]"),
            organization: s("[Awarding Organization]"),
            year: s("2024"),
            description: some("[Why the award was given]"),
        }],
        service: vec![ServiceRole {
            role: s("[Reviewer]"),
            organization: s("[Journal or Conference]"),
            period: s("2020-Present"),
            description: None,
        }],
        projects: starter_projects(),
        publications: starter_publications(),
        links: vec![
            Link {
                title: s("[Standards Body]"),
                url: s("https://example.org/standards"),
                description: some("[What this resource offers]"),
                category: LinkCategory::Standards,
                tags: list(&["[tag]"]),
                featured: true,
                date_added: NaiveDate::from_ymd_opt(2025, 1, 1),
            },
            Link {
                title: s("[Research Consortium]"),
                url: s("https://example.org/consortium"),
                description: None,
                category: LinkCategory::MobileResearch,
                tags: Vec::new(),
                featured: false,
                date_added: None,
            },
        ],
        posts: vec![starter_post()],
    }
}

fn starter_post() -> Post {
    Post {
        slug: s("welcome"),
        meta: PostMeta {
            title: s("[First Post Title]"),
            description: s("[One-sentence summary of the post]"),
            pub_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap_or_default(),
            updated_date: None,
            author: None,
            tags: list(&["[tag]"]),
            draft: false,
            featured: false,
            hero_image: None,
        },
        body: s("[Write the post in **Markdown**. Set `draft = true` to keep it unpublished.]\n"),
    }
}

fn starter_profile() -> Profile {
    Profile {
        name: s("[Your Name]"),
        title: s("[Your Position]"),
        affiliation: s("[Your Institution]"),
        affiliation_url: some("https://example.org"),
        bio: s("[A short biography. **Markdown** is supported.]"),
        email: some("[you@example.org]"),
        location: some("[City, Country]"),
        profile_image: some("/images/profile.jpeg"),
        cv_url: some("/files/cv.pdf"),
        research_interests: list(&["[Research interest 1]", "[Research interest 2]"]),
        social_links: SocialLinks {
            google_scholar: some("https://scholar.google.com/citations?user=[id]"),
            orcid: some("https://orcid.org/[0000-0000-0000-0000]"),
            research_gate: None,
            linkedin: None,
            github: some("https://github.com/[username]"),
            twitter: None,
        },
    }
}

fn starter_cv() -> Vec<CvSection> {
    vec![
        CvSection {
            title: s("Education"),
            items: vec![CvItem {
                title: s("[Degree]"),
                organization: some("[University]"),
                location: some("[City, Country]"),
                start_date: some("2010"),
                end_date: some("2014"),
                description: some("[Thesis title]"),
                details: Some(Vec::new()),
            }],
        },
        CvSection {
            title: s("Professional Experience"),
            items: vec![CvItem {
                title: s("[Position]"),
                organization: some("[Employer]"),
                location: None,
                start_date: some("2015"),
                end_date: some("Present"),
                description: None,
                details: Some(list(&["[Responsibility 1]", "[Responsibility 2]"])),
            }],
        },
    ]
}

fn starter_projects() -> ProjectCatalog {
    let active = Project {
        title: s("[PROJECT - Full Project Title]"),
        acronym: some("[PROJECT]"),
        description: s("[What the project is about]"),
        role: s("[Your Role]"),
        status: ProjectStatus::Active,
        start_date: s("2023"),
        end_date: some("2025"),
        funding: s("[Funding Body]"),
        funding_program: some("[Funding Programme]"),
        website: None,
        technologies: list(&["[Technology]"]),
        objectives: list(&["[Objective 1]", "[Objective 2]"]),
        impact: some("[Expected impact]"),
        logo: None,
        publications: list(&["starter-journal-2024"]),
    };

    let completed = Project {
        title: s("[PAST - Completed Project Title]"),
        acronym: some("[PAST]"),
        description: s("[What the project achieved]"),
        role: s("[Your Role]"),
        status: ProjectStatus::Completed,
        start_date: s("2018"),
        end_date: some("2021"),
        funding: s("[Funding Body]"),
        funding_program: None,
        website: some("https://example.org/past"),
        technologies: Vec::new(),
        objectives: Vec::new(),
        impact: None,
        logo: None,
        publications: Vec::new(),
    };

    ProjectCatalog::new(
        vec![active, completed],
        ProjectSummary {
            total_funding: some("[Summary of funding sources]"),
            research_areas: list(&["[Area 1]", "[Area 2]"]),
        },
    )
}

fn starter_publications() -> PublicationList {
    PublicationList {
        scholar: None,
        publications: vec![
            Publication {
                id: s("starter-journal-2024"),
                title: s("[Journal Article Title]"),
                authors: list(&["[Your Name]", "[Co-author]"]),
                venue: s("[Journal Name]"),
                year: 2024,
                kind: PublicationKind::Journal,
                abstract_text: some("[Abstract]"),
                doi: some("10.0000/placeholder"),
                url: None,
                pdf_url: None,
                citations: Some(0),
                tags: list(&["[tag]"]),
                featured: true,
            },
            Publication {
                id: s("starter-conference-2022"),
                title: s("[Conference Paper Title]"),
                authors: list(&["[Your Name]"]),
                venue: s("[Conference Name]"),
                year: 2022,
                kind: PublicationKind::Conference,
                abstract_text: None,
                doi: None,
                url: some("https://example.org/paper"),
                pdf_url: None,
                citations: None,
                tags: Vec::new(),
                featured: false,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_uses_placeholders() {
        let content = starter_content();
        assert!(content.profile.name.starts_with('['));
        assert!(content.profile.name.ends_with(']'));
    }

    #[test]
    fn test_starter_post_is_published() {
        let content = starter_content();
        assert_eq!(content.published_posts().count(), 1);
    }

    #[test]
    fn test_starter_covers_both_statuses() {
        let content = starter_content();
        assert_eq!(content.projects.active().len(), 1);
        assert_eq!(content.projects.completed().len(), 1);
    }
}
