//! Token index over catalog labels and tags

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::normalize::tokenize;
use crate::catalog::Catalog;

/// Shortest prefix indexed for partial matches, in characters
pub const MIN_PREFIX_CHARS: usize = 2;

/// Read-only mapping from normalized tokens to catalog positions.
///
/// Postings hold insertion positions in ascending order, never ids, so
/// every posting is a valid index into the catalog it was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchIndex {
    tokens: BTreeMap<String, Vec<usize>>,
    prefixes: BTreeMap<String, Vec<usize>>,
    clips: usize,
}

impl SearchIndex {
    pub fn build(catalog: &Catalog) -> Self {
        let mut tokens: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        let mut prefixes: BTreeMap<String, Vec<usize>> = BTreeMap::new();

        for (position, record) in catalog.iter().enumerate() {
            let record_tokens: BTreeSet<String> =
                record.searchable_text().flat_map(tokenize).collect();
            let record_prefixes: BTreeSet<&str> = record_tokens
                .iter()
                .flat_map(|token| prefixes_of(token))
                .collect();

            for prefix in record_prefixes {
                prefixes.entry(prefix.to_string()).or_default().push(position);
            }
            for token in record_tokens {
                tokens.entry(token).or_default().push(position);
            }
        }

        debug!(
            clips = catalog.len(),
            tokens = tokens.len(),
            prefixes = prefixes.len(),
            "search index built"
        );

        Self {
            tokens,
            prefixes,
            clips: catalog.len(),
        }
    }

    /// Positions whose tokens equal `word` or start with it, ascending.
    ///
    /// `word` must already be normalized.
    pub fn lookup(&self, word: &str) -> Vec<usize> {
        let exact = self.tokens.get(word).map_or(&[][..], Vec::as_slice);
        let partial = if word.chars().count() >= MIN_PREFIX_CHARS {
            self.prefixes.get(word).map_or(&[][..], Vec::as_slice)
        } else {
            &[]
        };
        merge_sorted(exact, partial)
    }

    /// Number of distinct full tokens
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Number of catalog entries the index was built from
    pub fn clip_count(&self) -> usize {
        self.clips
    }

    /// Every (key, positions) pair, full tokens first, then prefixes
    pub fn postings(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.tokens
            .iter()
            .chain(self.prefixes.iter())
            .map(|(key, positions)| (key.as_str(), positions.as_slice()))
    }
}

/// Prefixes of at least [`MIN_PREFIX_CHARS`] characters, the token included.
fn prefixes_of(token: &str) -> impl Iterator<Item = &str> {
    token
        .char_indices()
        .map(|(offset, c)| offset + c.len_utf8())
        .skip(MIN_PREFIX_CHARS - 1)
        .map(move |end| &token[..end])
}

fn merge_sorted(a: &[usize], b: &[usize]) -> Vec<usize> {
    let mut merged = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => {
                merged.push(a[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                merged.push(b[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                merged.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    merged.extend_from_slice(&a[i..]);
    merged.extend_from_slice(&b[j..]);
    merged
}
