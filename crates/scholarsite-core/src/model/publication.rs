//! Publications and citation statistics.

use std::{cmp::Reverse, fmt};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::non_empty;

/// Kind of venue a publication appeared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PublicationKind {
    Journal,
    Conference,
    Workshop,
    Preprint,
    BookChapter,
}

impl PublicationKind {
    /// Identifier as written in content files.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Journal => "journal",
            Self::Conference => "conference",
            Self::Workshop => "workshop",
            Self::Preprint => "preprint",
            Self::BookChapter => "book-chapter",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Journal => "Journal Article",
            Self::Conference => "Conference Paper",
            Self::Workshop => "Workshop Paper",
            Self::Preprint => "Preprint",
            Self::BookChapter => "Book Chapter",
        }
    }

    /// Guess the kind from a free-text venue name.
    ///
    /// Used when importing records that carry no explicit type. Anything not
    /// recognised is treated as a conference paper.
    #[must_use]
    pub fn from_venue(venue: &str) -> Self {
        let venue = venue.to_lowercase();
        let has = |keywords: &[&str]| keywords.iter().any(|k| venue.contains(k));

        if has(&["arxiv", "preprint", "techrxiv"]) {
            Self::Preprint
        } else if has(&["workshop"]) {
            Self::Workshop
        } else if has(&["journal", "transactions", "magazine", "letters"]) {
            Self::Journal
        } else if has(&["book", "chapter"]) {
            Self::BookChapter
        } else {
            Self::Conference
        }
    }
}

impl fmt::Display for PublicationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Publication {
    /// Identifier, unique across the publication set.
    pub id: String,

    pub title: String,

    /// Authors in byline order.
    pub authors: Vec<String>,

    pub venue: String,

    pub year: u16,

    #[serde(rename = "type")]
    pub kind: PublicationKind,

    #[serde(
        rename = "abstract",
        default,
        deserialize_with = "non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub abstract_text: Option<String>,

    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,

    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citations: Option<u32>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub featured: bool,
}

impl Publication {
    /// Resolvable link for the DOI, if any.
    #[must_use]
    pub fn doi_url(&self) -> Option<String> {
        self.doi.as_deref().map(|doi| {
            if doi.starts_with("http://") || doi.starts_with("https://") {
                doi.to_string()
            } else {
                format!("https://doi.org/{doi}")
            }
        })
    }

    /// Authors joined for a byline.
    #[must_use]
    pub fn byline(&self) -> String {
        self.authors.join(", ")
    }
}

/// Citation metrics, typically imported from Google Scholar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScholarStats {
    pub total_publications: u32,
    pub total_citations: u32,
    pub h_index: u32,
    pub i10_index: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// The publication collection as stored in `publications.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PublicationList {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scholar: Option<ScholarStats>,

    #[serde(default)]
    pub publications: Vec<Publication>,
}

impl PublicationList {
    /// Publications in declared order.
    #[must_use]
    pub fn all(&self) -> &[Publication] {
        &self.publications
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.publications.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.publications.is_empty()
    }

    /// Look a publication up by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Publication> {
        self.publications.iter().find(|p| p.id == id)
    }

    /// Featured publications in declared order.
    pub fn featured(&self) -> impl Iterator<Item = &Publication> {
        self.publications.iter().filter(|p| p.featured)
    }

    /// Publications newest first; within a year, most cited first.
    ///
    /// The sort is stable, so ties keep their declared order.
    #[must_use]
    pub fn by_recency(&self) -> Vec<&Publication> {
        let mut sorted: Vec<_> = self.publications.iter().collect();
        sorted.sort_by_key(|p| (Reverse(p.year), Reverse(p.citations.unwrap_or(0))));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publication(id: &str, year: u16, citations: Option<u32>) -> Publication {
        Publication {
            id: id.to_string(),
            title: format!("Paper {id}"),
            authors: vec!["G. Xilouris".to_string()],
            venue: "IEEE Access".to_string(),
            year,
            kind: PublicationKind::Journal,
            abstract_text: None,
            doi: None,
            url: None,
            pdf_url: None,
            citations,
            tags: Vec::new(),
            featured: false,
        }
    }

    #[test]
    fn test_parse_publication_list() {
        let list: PublicationList = toml::from_str(
            r#"
[scholar]
total_publications = 114
total_citations = 2500
h_index = 24
i10_index = 60

[[publications]]
id = "xilouris2023slicing"
title = "Network Slicing for 5G and Beyond: A Survey"
authors = ["G. Xilouris", "E. Trouva"]
venue = "IEEE Communications Surveys & Tutorials"
year = 2023
type = "journal"
abstract = ""
featured = true

[[publications]]
id = "xilouris2019orchestration"
title = "Orchestration of Multi-domain Network Slices"
authors = ["G. Xilouris"]
venue = "IEEE GLOBECOM"
year = 2019
type = "book-chapter"
"#,
        )
        .unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list.scholar.as_ref().map(|s| s.h_index), Some(24));
        assert!(list.publications[0].abstract_text.is_none());
        assert_eq!(list.publications[1].kind, PublicationKind::BookChapter);
        assert_eq!(list.featured().count(), 1);
        assert_eq!(
            list.get("xilouris2019orchestration").map(|p| p.year),
            Some(2019)
        );
    }

    #[test]
    fn test_kind_rejects_unknown_variant() {
        let result: Result<Publication, _> = toml::from_str(
            r#"
id = "x"
title = "t"
authors = []
venue = "v"
year = 2020
type = "book"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_by_recency() {
        let list = PublicationList {
            scholar: None,
            publications: vec![
                publication("a", 2019, Some(10)),
                publication("b", 2023, None),
                publication("c", 2019, Some(40)),
                publication("d", 2023, Some(3)),
            ],
        };

        let ids: Vec<_> = list.by_recency().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["d", "b", "c", "a"]);
    }

    #[test]
    fn test_kind_from_venue() {
        assert_eq!(
            PublicationKind::from_venue("IEEE Transactions on Network and Service Management"),
            PublicationKind::Journal
        );
        assert_eq!(
            PublicationKind::from_venue("IEEE Communications Magazine"),
            PublicationKind::Journal
        );
        assert_eq!(
            PublicationKind::from_venue("2018 IEEE Conference on NFV-SDN"),
            PublicationKind::Conference
        );
        assert_eq!(
            PublicationKind::from_venue("Workshop on 5G Testbeds"),
            PublicationKind::Workshop
        );
        assert_eq!(
            PublicationKind::from_venue("arXiv preprint arXiv:2101.00001"),
            PublicationKind::Preprint
        );
        assert_eq!(
            PublicationKind::from_venue("Springer Book on Network Security"),
            PublicationKind::BookChapter
        );
    }

    #[test]
    fn test_doi_url() {
        let mut p = publication("a", 2020, None);
        assert!(p.doi_url().is_none());

        p.doi = Some("10.1109/ACCESS.2021.000001".to_string());
        assert_eq!(
            p.doi_url().as_deref(),
            Some("https://doi.org/10.1109/ACCESS.2021.000001")
        );

        p.doi = Some("https://doi.org/10.1/x".to_string());
        assert_eq!(p.doi_url().as_deref(), Some("https://doi.org/10.1/x"));
    }
}
