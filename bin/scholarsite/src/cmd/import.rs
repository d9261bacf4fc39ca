//! Import command - convert a Google Scholar export into publications.toml
//!
//! The export is the JSON author record produced by the `scholarly` Python
//! package (`scholarly.fill(author)` dumped with `json.dump`). Only the fields
//! below are read; everything else in the record is ignored.

use std::{
    collections::{HashMap, HashSet},
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use color_eyre::eyre::{Result, WrapErr, bail};
use scholarsite_core::{
    Config, Publication, PublicationKind, PublicationList, ScholarStats, content::parse_file,
};
use serde::Deserialize;

/// Abstracts longer than this are cut at a character boundary.
pub const MAX_ABSTRACT_CHARS: usize = 500;

const STOPWORDS: [&str; 8] = ["a", "an", "the", "on", "of", "in", "for", "to"];

/// Author record as exported from Google Scholar.
#[derive(Debug, Default, Deserialize)]
pub struct ScholarAuthor {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub scholar_id: Option<String>,

    #[serde(default)]
    pub citedby: u32,

    #[serde(default)]
    pub hindex: u32,

    #[serde(default)]
    pub i10index: u32,

    #[serde(default)]
    pub publications: Vec<ScholarPublication>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScholarPublication {
    #[serde(default)]
    pub bib: ScholarBib,

    #[serde(default)]
    pub num_citations: Option<u32>,

    #[serde(default)]
    pub pub_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScholarBib {
    #[serde(default)]
    pub title: Option<String>,

    /// Authors joined with `" and "`.
    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub venue: Option<String>,

    #[serde(default)]
    pub pub_year: Option<YearValue>,

    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
}

/// Scholar writes years as strings, older exports as numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum YearValue {
    Number(u16),
    Text(String),
}

impl YearValue {
    fn year(&self) -> Option<u16> {
        match self {
            Self::Number(n) => Some(*n).filter(|n| *n > 0),
            Self::Text(s) => s.trim().parse().ok().filter(|n| *n > 0),
        }
    }
}

/// Run the import-scholar command.
///
/// Returns the number of publications written.
pub fn run(
    config_path: &Path,
    content: Option<&Path>,
    export: &Path,
    output: Option<&Path>,
) -> Result<usize> {
    let output = match output {
        Some(path) => path.to_path_buf(),
        None => default_output(config_path, content)?,
    };

    if output.extension().and_then(|e| e.to_str()) != Some("toml") {
        bail!("Output must be a .toml file: {}", output.display());
    }

    tracing::info!(?export, ?output, "Importing Google Scholar export");

    let raw = fs::read_to_string(export)
        .wrap_err_with(|| format!("Failed to read export: {}", export.display()))?;
    let author: ScholarAuthor =
        serde_json::from_str(&raw).wrap_err("Failed to parse Google Scholar export")?;

    let existing = if output.is_file() {
        let list: PublicationList = parse_file(&output)
            .wrap_err_with(|| format!("Failed to read existing {}", output.display()))?;
        Some(list)
    } else {
        None
    };

    let now = Utc::now();
    let list = convert(&author, existing.as_ref(), now);

    let body = toml::to_string_pretty(&list).wrap_err("Failed to serialize publications")?;
    let header = format!(
        "# Imported from Google Scholar\n# Author: {}\n# Scholar ID: {}\n# Last updated: {}\n\n",
        author.name.as_deref().unwrap_or("unknown"),
        author.scholar_id.as_deref().unwrap_or("unknown"),
        now.format("%Y-%m-%d %H:%M:%S UTC"),
    );

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).wrap_err("Failed to create output directory")?;
    }
    fs::write(&output, header + &body).wrap_err("Failed to write publications file")?;

    println!("✓ Wrote {}", output.display());
    println!("  Publications:    {}", list.len());
    println!("  Total citations: {}", author.citedby);
    println!("  h-index:         {}", author.hindex);
    println!("  i10-index:       {}", author.i10index);

    Ok(list.len())
}

fn default_output(config_path: &Path, content: Option<&Path>) -> Result<PathBuf> {
    let dir = match content {
        Some(dir) => dir.to_path_buf(),
        None => {
            let config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
            super::content_dir(None, &config)
        }
    };
    Ok(dir.join("publications.toml"))
}

/// Convert an export into a publication list.
///
/// Entries without a title or a year are skipped. When `existing` is given,
/// imported entries are matched to it by normalised title and keep their
/// id, type, featured flag, tags, DOI and PDF link; existing entries missing
/// from the export are kept as they are. Ids in the result are unique.
#[must_use]
pub fn convert(
    author: &ScholarAuthor,
    existing: Option<&PublicationList>,
    now: DateTime<Utc>,
) -> PublicationList {
    let previous_list = existing.map(PublicationList::all).unwrap_or_default();
    let mut known: HashMap<String, Vec<usize>> = HashMap::new();
    for (i, previous) in previous_list.iter().enumerate() {
        known
            .entry(normalize_title(&previous.title))
            .or_default()
            .push(i);
    }

    let mut matched = HashSet::new();
    let mut used_ids: HashSet<String> = HashSet::new();
    let mut imported = Vec::new();

    for (i, entry) in author.publications.iter().enumerate() {
        let Some(mut publication) = import_entry(entry) else {
            tracing::warn!(index = i, "Skipping Scholar entry without title or year");
            continue;
        };

        let key = normalize_title(&publication.title);
        if let Some(index) = take_match(&mut known, previous_list, &key, publication.year) {
            let previous = &previous_list[index];
            if used_ids.insert(previous.id.clone()) {
                publication.id = previous.id.clone();
            }
            publication.kind = previous.kind;
            publication.featured = previous.featured;
            publication.tags = previous.tags.clone();
            publication.doi = previous.doi.clone();
            publication.pdf_url = previous.pdf_url.clone();
            matched.insert(index);
        }
        imported.push(publication);
    }

    let mut publications = Vec::new();
    for (i, previous) in previous_list.iter().enumerate() {
        if matched.contains(&i) {
            continue;
        }
        let mut kept = previous.clone();
        if !used_ids.insert(kept.id.clone()) {
            kept.id = unique_id(&base_id(&kept), &mut used_ids);
        }
        publications.push(kept);
    }

    for mut publication in imported {
        if publication.id.is_empty() {
            publication.id = unique_id(&base_id(&publication), &mut used_ids);
        }
        publications.push(publication);
    }

    let mut list = PublicationList {
        scholar: None,
        publications,
    };
    list.publications = list.by_recency().into_iter().cloned().collect();

    list.scholar = Some(ScholarStats {
        total_publications: u32::try_from(list.len()).unwrap_or(u32::MAX),
        total_citations: author.citedby,
        h_index: author.hindex,
        i10_index: author.i10index,
        last_updated: Some(now),
    });

    list
}

/// Each existing entry is matched at most once. Among entries sharing a
/// title, the one with the same year wins.
fn take_match(
    known: &mut HashMap<String, Vec<usize>>,
    previous: &[Publication],
    key: &str,
    year: u16,
) -> Option<usize> {
    let candidates = known.get_mut(key)?;
    if candidates.is_empty() {
        return None;
    }
    let pos = candidates
        .iter()
        .position(|&i| previous[i].year == year)
        .unwrap_or(0);
    Some(candidates.remove(pos))
}

fn import_entry(entry: &ScholarPublication) -> Option<Publication> {
    let bib = &entry.bib;
    let title = bib.title.as_deref().map(str::trim).filter(|t| !t.is_empty())?;
    let year = bib.pub_year.as_ref().and_then(YearValue::year)?;

    let authors = bib
        .author
        .as_deref()
        .unwrap_or_default()
        .split(" and ")
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect();

    let venue = bib
        .venue
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("Unknown Venue");

    let abstract_text = bib
        .abstract_text
        .as_deref()
        .map(|a| a.trim().chars().take(MAX_ABSTRACT_CHARS).collect::<String>())
        .map(|a| a.trim_end().to_string())
        .filter(|a| !a.is_empty());

    Some(Publication {
        id: String::new(),
        title: title.to_string(),
        authors,
        venue: venue.to_string(),
        year,
        kind: PublicationKind::from_venue(venue),
        abstract_text,
        doi: None,
        url: entry.pub_url.clone().filter(|u| !u.trim().is_empty()),
        pdf_url: None,
        citations: Some(entry.num_citations.unwrap_or(0)),
        tags: Vec::new(),
        featured: false,
    })
}

/// Lowercase alphanumeric words, for matching titles across imports.
fn normalize_title(title: &str) -> String {
    title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

fn ascii_slug(word: &str) -> String {
    word.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// `{first-author-surname}-{year}-{first-title-word}`.
fn base_id(publication: &Publication) -> String {
    let surname = publication
        .authors
        .first()
        .and_then(|a| a.split_whitespace().last())
        .map(ascii_slug)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "anon".to_string());

    let word = publication
        .title
        .split_whitespace()
        .map(ascii_slug)
        .find(|w| !w.is_empty() && !STOPWORDS.contains(&w.as_str()))
        .unwrap_or_else(|| "paper".to_string());

    format!("{surname}-{}-{word}", publication.year)
}

fn unique_id(base: &str, used: &mut HashSet<String>) -> String {
    let mut id = base.to_string();
    let mut n = 2;
    while used.contains(&id) {
        id = format!("{base}-{n}");
        n += 1;
    }
    used.insert(id.clone());
    id
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use tempfile::TempDir;

    use super::*;

    const EXPORT: &str = r#"{
  "name": "Georgios Xylouris",
  "scholar_id": "eydLJrwAAAAJ",
  "citedby": 2150,
  "hindex": 24,
  "i10index": 51,
  "interests": ["5G"],
  "publications": [
    {
      "bib": {
        "title": "Network Slicing in 5G Testbeds",
        "author": "G Xilouris and A Kourtis",
        "venue": "IEEE Transactions on Network and Service Management",
        "pub_year": "2021",
        "abstract": "We study slicing."
      },
      "num_citations": 40,
      "pub_url": "https://example.org/slicing",
      "author_pub_id": "eydLJrwAAAAJ:abc"
    },
    {
      "bib": {
        "title": "The 5GENESIS Platform",
        "author": "A Kourtis and G Xilouris",
        "venue": "EuCNC",
        "pub_year": 2021
      },
      "num_citations": 120
    },
    {
      "bib": {
        "title": "Network Slicing Orchestration",
        "author": "G Xilouris",
        "venue": "arXiv preprint",
        "pub_year": "2021"
      }
    },
    { "bib": { "title": "Undated draft", "author": "G Xilouris" } },
    { "bib": { "pub_year": "2019" } }
  ]
}"#;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn author() -> ScholarAuthor {
        serde_json::from_str(EXPORT).unwrap()
    }

    #[test]
    fn test_convert_export() {
        let list = convert(&author(), None, now());

        assert_eq!(list.len(), 3);
        let ids: Vec<_> = list.all().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "kourtis-2021-5genesis",
                "xilouris-2021-network",
                "xilouris-2021-network-2"
            ]
        );

        let slicing = list.get("xilouris-2021-network").unwrap();
        assert_eq!(slicing.authors, vec!["G Xilouris", "A Kourtis"]);
        assert_eq!(slicing.kind, PublicationKind::Journal);
        assert_eq!(slicing.citations, Some(40));
        assert_eq!(slicing.url.as_deref(), Some("https://example.org/slicing"));

        let preprint = list.get("xilouris-2021-network-2").unwrap();
        assert_eq!(preprint.kind, PublicationKind::Preprint);
        assert_eq!(preprint.citations, Some(0));
        assert!(preprint.abstract_text.is_none());

        let stats = list.scholar.as_ref().unwrap();
        assert_eq!(stats.total_publications, 3);
        assert_eq!(stats.total_citations, 2150);
        assert_eq!(stats.h_index, 24);
        assert_eq!(stats.last_updated, Some(now()));
    }

    #[test]
    fn test_long_abstract_is_truncated() {
        let mut author = author();
        author.publications[0].bib.abstract_text = Some("ω".repeat(800));

        let list = convert(&author, None, now());
        let slicing = list.get("xilouris-2021-network").unwrap();
        assert_eq!(
            slicing.abstract_text.as_ref().unwrap().chars().count(),
            MAX_ABSTRACT_CHARS
        );
    }

    #[test]
    fn test_merge_keeps_curated_fields() {
        let mut first = convert(&author(), None, now());
        let curated = first
            .publications
            .iter_mut()
            .find(|p| p.title == "The 5GENESIS Platform")
            .unwrap();
        curated.id = "5genesis-platform".to_string();
        curated.featured = true;
        curated.doi = Some("10.1109/EuCNC.2021".to_string());
        curated.tags = vec!["5G".to_string()];

        let mut manual = curated.clone();
        manual.id = "manual-entry".to_string();
        manual.title = "A Paper Scholar Does Not Know".to_string();
        first.publications.push(manual);

        let mut updated = author();
        updated.publications[1].bib.title = Some("The 5GENESIS platform.".to_string());
        updated.publications[1].num_citations = Some(150);

        let list = convert(&updated, Some(&first), now());

        assert_eq!(list.len(), 4);
        let platform = list.get("5genesis-platform").unwrap();
        assert!(platform.featured);
        assert_eq!(platform.citations, Some(150));
        assert_eq!(platform.doi.as_deref(), Some("10.1109/EuCNC.2021"));
        assert!(list.get("manual-entry").is_some());
        assert!(list.get("kourtis-2021-5genesis").is_none());
    }

    #[test]
    fn test_reimport_of_same_titled_papers_keeps_distinct_ids() {
        let export = r#"{
  "publications": [
    { "bib": { "title": "Network Slicing", "author": "G Xilouris", "venue": "IEEE Network", "pub_year": "2021" } },
    { "bib": { "title": "Network slicing.", "author": "G Xilouris", "venue": "EuCNC", "pub_year": "2020" } }
  ]
}"#;
        let author: ScholarAuthor = serde_json::from_str(export).unwrap();

        let first = convert(&author, None, now());
        let second = convert(&author, Some(&first), now());
        let third = convert(&author, Some(&second), now());

        for list in [&first, &second, &third] {
            assert_eq!(list.len(), 2);
            let ids: HashSet<_> = list.all().iter().map(|p| p.id.as_str()).collect();
            assert_eq!(ids.len(), 2);
        }
        assert_eq!(second.get("xilouris-2021-network").unwrap().year, 2021);
        assert_eq!(second.get("xilouris-2020-network").unwrap().year, 2020);
    }

    #[test]
    fn test_existing_duplicate_ids_are_renamed() {
        let author: ScholarAuthor = serde_json::from_str(
            r#"{ "publications": [
                { "bib": { "title": "Alpha", "author": "G Xilouris", "pub_year": "2020" } },
                { "bib": { "title": "Beta", "author": "G Xilouris", "pub_year": "2020" } }
            ] }"#,
        )
        .unwrap();
        let mut existing = convert(&author, None, now());
        for publication in &mut existing.publications {
            publication.id = "shared".to_string();
        }

        let list = convert(&author, Some(&existing), now());
        let ids: HashSet<_> = list.all().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(list.len(), 2);
        assert_eq!(ids.len(), 2);
        assert!(ids.contains("shared"));
    }

    #[test]
    fn test_run_writes_loadable_file() {
        let root = TempDir::new().unwrap();
        let export = root.path().join("scholar.json");
        fs::write(&export, EXPORT).unwrap();
        let output = root.path().join("content/publications.toml");

        let count = run(
            &root.path().join("config.toml"),
            None,
            &export,
            Some(&output),
        )
        .unwrap();
        assert_eq!(count, 3);

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.starts_with("# Imported from Google Scholar"));

        let list: PublicationList = parse_file(&output).unwrap();
        assert_eq!(list.len(), 3);
        assert!(list.scholar.unwrap().last_updated.is_some());
    }

    #[test]
    fn test_run_rejects_non_toml_output() {
        let root = TempDir::new().unwrap();
        let export = root.path().join("scholar.json");
        fs::write(&export, EXPORT).unwrap();

        let result = run(
            &root.path().join("config.toml"),
            None,
            &export,
            Some(&root.path().join("publications.yaml")),
        );
        assert!(result.is_err());
    }
}
