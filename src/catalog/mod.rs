//! Clip catalog
//!
//! The catalog is the immutable table of voice clips. It is loaded once at
//! startup (see [`manifest`]), validated, and then only read. Insertion
//! order is meaningful: search ties are broken by it.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::error::LoadError;
use crate::search::tokenize;

pub mod audio;
pub mod manifest;
pub mod scaffold;

pub use audio::AudioRef;

/// Longest id Telegram accepts for an inline query result
pub const MAX_ID_BYTES: usize = 64;

/// Category reported for clips without tags
pub const UNCATEGORIZED: &str = "uncategorized";

/// Stable, unique clip identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ClipId(String);

impl ClipId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ClipId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ClipId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ClipId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One voice clip with its bilingual labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClipRecord {
    pub id: ClipId,
    pub audio: AudioRef,
    #[serde(rename = "en")]
    pub label_en: String,
    #[serde(rename = "uk")]
    pub label_uk: String,
    /// Race, unit and category tags; the first one is the primary category
    pub tags: Vec<String>,
}

impl ClipRecord {
    /// Build a record, trimming labels and de-duplicating tags.
    pub fn new(
        id: impl Into<ClipId>,
        audio: AudioRef,
        label_en: impl Into<String>,
        label_uk: impl Into<String>,
        tags: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Self {
        let mut unique: Vec<String> = Vec::new();
        for tag in tags {
            let tag = tag.as_ref().trim().to_lowercase();
            if !tag.is_empty() && !unique.contains(&tag) {
                unique.push(tag);
            }
        }

        Self {
            id: id.into(),
            audio,
            label_en: label_en.into().trim().to_string(),
            label_uk: label_uk.into().trim().to_string(),
            tags: unique,
        }
    }

    pub fn primary_category(&self) -> &str {
        self.tags.first().map_or(UNCATEGORIZED, String::as_str)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Title shown to a user with the given Telegram `language_code`.
    ///
    /// Ukrainian speakers get the Ukrainian label when there is one; every
    /// other case falls back to whichever label is present.
    pub fn title_for(&self, language_code: Option<&str>) -> &str {
        let wants_uk = language_code.is_some_and(|code| code.starts_with("uk"));
        if (wants_uk && !self.label_uk.is_empty()) || self.label_en.is_empty() {
            &self.label_uk
        } else {
            &self.label_en
        }
    }

    /// Every text field the search index tokenizes
    pub fn searchable_text(&self) -> impl Iterator<Item = &str> {
        [self.label_en.as_str(), self.label_uk.as_str()]
            .into_iter()
            .chain(self.tags.iter().map(String::as_str))
    }
}

/// Clip count for one primary category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Validated, immutable clip table
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    clips: Vec<ClipRecord>,
    positions: HashMap<ClipId, usize>,
}

impl Catalog {
    /// Validate records and freeze them in insertion order.
    ///
    /// Every non-empty label must yield at least one search token, so each
    /// clip stays findable by its exact label.
    pub fn from_records(records: Vec<ClipRecord>) -> Result<Self, LoadError> {
        let mut positions = HashMap::with_capacity(records.len());

        for (position, record) in records.iter().enumerate() {
            let id = record.id.as_str();
            if id.trim().is_empty() {
                return Err(LoadError::EmptyId { position });
            }
            if id.len() > MAX_ID_BYTES {
                return Err(LoadError::IdTooLong {
                    id: id.to_string(),
                    max: MAX_ID_BYTES,
                });
            }
            if record.label_en.is_empty() && record.label_uk.is_empty() {
                return Err(LoadError::Unlabeled { id: id.to_string() });
            }
            for (language, label) in [("en", &record.label_en), ("uk", &record.label_uk)] {
                if !label.is_empty() && tokenize(label).is_empty() {
                    return Err(LoadError::UnsearchableLabel {
                        id: id.to_string(),
                        language,
                        label: label.clone(),
                    });
                }
            }
            if positions.insert(record.id.clone(), position).is_some() {
                return Err(LoadError::DuplicateId { id: id.to_string() });
            }
        }

        Ok(Self {
            clips: records,
            positions,
        })
    }

    /// Load and validate a TOML manifest from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        manifest::load(path.as_ref())
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ClipRecord> {
        self.positions.get(id).map(|&position| &self.clips[position])
    }

    /// Record at an insertion position
    pub fn at(&self, position: usize) -> Option<&ClipRecord> {
        self.clips.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClipRecord> {
        self.clips.iter()
    }

    /// Clip counts per primary category, sorted by category name
    pub fn stats(&self) -> Vec<CategoryCount> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for clip in &self.clips {
            *counts.entry(clip.primary_category()).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(category, count)| CategoryCount {
                category: category.to_string(),
                count,
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ClipRecord;
    type IntoIter = std::slice::Iter<'a, ClipRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(id: &str, en: &str, uk: &str, tags: &[&str]) -> ClipRecord {
        ClipRecord::new(
            id,
            AudioRef::FileId(format!("file-{id}")),
            en,
            uk,
            tags.iter().copied(),
        )
    }

    #[test]
    fn test_record_normalizes_tags() {
        let record = clip("1", " Zealot Ready ", "", &["Protoss", "protoss", " ", "zealot"]);
        assert_eq!(record.label_en, "Zealot Ready");
        assert_eq!(record.tags, vec!["protoss", "zealot"]);
        assert_eq!(record.primary_category(), "protoss");
    }

    #[test]
    fn test_title_for_language() {
        let record = clip("1", "My life for Aiur", "Моє життя за Айур", &[]);
        assert_eq!(record.title_for(Some("uk")), "Моє життя за Айур");
        assert_eq!(record.title_for(Some("uk-UA")), "Моє життя за Айур");
        assert_eq!(record.title_for(Some("en")), "My life for Aiur");
        assert_eq!(record.title_for(None), "My life for Aiur");

        let english_only = clip("2", "Ready", "", &[]);
        assert_eq!(english_only.title_for(Some("uk")), "Ready");

        let ukrainian_only = clip("3", "", "Готовий", &[]);
        assert_eq!(ukrainian_only.title_for(Some("en")), "Готовий");
    }

    #[test]
    fn test_catalog_lookup_and_order() {
        let catalog = Catalog::from_records(vec![
            clip("b", "Marine Ready", "", &["terran"]),
            clip("a", "Zealot Ready", "", &["protoss"]),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.at(0).unwrap().id.as_str(), "b");
        assert_eq!(catalog.get("a").unwrap().label_en, "Zealot Ready");
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn test_catalog_rejects_duplicates() {
        let err = Catalog::from_records(vec![
            clip("1", "Zealot Ready", "", &[]),
            clip("1", "Marine Ready", "", &[]),
        ])
        .unwrap_err();
        assert!(matches!(err, LoadError::DuplicateId { ref id } if id == "1"));
    }

    #[test]
    fn test_catalog_rejects_bad_ids_and_labels() {
        let err = Catalog::from_records(vec![clip("  ", "x", "", &[])]).unwrap_err();
        assert!(matches!(err, LoadError::EmptyId { position: 0 }));

        let long = "x".repeat(MAX_ID_BYTES + 1);
        let err = Catalog::from_records(vec![clip(&long, "x", "", &[])]).unwrap_err();
        assert!(matches!(err, LoadError::IdTooLong { .. }));

        let err = Catalog::from_records(vec![clip("1", "", "  ", &[])]).unwrap_err();
        assert!(matches!(err, LoadError::Unlabeled { .. }));
    }

    #[test]
    fn test_catalog_rejects_labels_without_words() {
        let err = Catalog::from_records(vec![clip("sigh", "...", "", &[])]).unwrap_err();
        assert!(matches!(
            err,
            LoadError::UnsearchableLabel { ref id, language: "en", .. } if id == "sigh"
        ));

        let err = Catalog::from_records(vec![clip("1", "Ready", "?!", &[])]).unwrap_err();
        assert!(matches!(err, LoadError::UnsearchableLabel { language: "uk", .. }));

        assert!(Catalog::from_records(vec![clip("1", "Ready", "", &[])]).is_ok());
    }

    #[test]
    fn test_stats_by_primary_category() {
        let catalog = Catalog::from_records(vec![
            clip("1", "Zealot Ready", "", &["protoss", "zealot"]),
            clip("2", "Marine Ready", "", &["terran", "marine"]),
            clip("3", "Probe", "", &["protoss", "probe"]),
            clip("4", "Main theme", "", &[]),
        ])
        .unwrap();

        let stats = catalog.stats();
        assert_eq!(
            stats,
            vec![
                CategoryCount { category: "protoss".into(), count: 2 },
                CategoryCount { category: "terran".into(), count: 1 },
                CategoryCount { category: UNCATEGORIZED.into(), count: 1 },
            ]
        );
    }
}
