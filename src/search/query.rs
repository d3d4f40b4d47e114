//! Query handler: normalize, look up, rank, truncate

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::index::SearchIndex;
use super::normalize::tokenize;
use crate::catalog::{Catalog, ClipId, ClipRecord};

/// Telegram shows at most this many inline results
pub const DEFAULT_LIMIT: usize = 50;

pub const DEFAULT_GREETING: &str = "\
👋 Hi! I send StarCraft voice lines.

Type my name in any chat, then a unit, a race or a phrase, and pick a clip from the list.

👋 Привіт! Я надсилаю голосові репліки зі StarCraft.

Набери моє ім'я в будь-якому чаті, потім юніт, расу чи фразу, і обери кліп зі списку.";

/// What an empty or whitespace-only query returns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyQuery {
    /// No results
    #[default]
    #[serde(alias = "none")]
    Empty,
    /// The first `limit` clips in catalog order
    Browse,
}

impl std::str::FromStr for EmptyQuery {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "empty" | "none" => Ok(Self::Empty),
            "browse" => Ok(Self::Browse),
            other => Err(format!("invalid empty query policy {other} (expected empty|browse)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    pub limit: usize,
    pub empty_query: EmptyQuery,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            empty_query: EmptyQuery::default(),
        }
    }
}

/// A ranked result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchHit<'a> {
    #[serde(flatten)]
    pub record: &'a ClipRecord,
    /// Number of distinct query words the clip matched
    pub score: usize,
}

/// Stateless search over an immutable catalog and its index.
///
/// Safe to share behind an `Arc` across any number of concurrent callers.
#[derive(Debug, Clone)]
pub struct QueryHandler {
    catalog: Catalog,
    index: SearchIndex,
    options: QueryOptions,
    greeting: String,
}

impl QueryHandler {
    /// Build the index once and take ownership of the catalog.
    pub fn new(catalog: Catalog, options: QueryOptions) -> Self {
        let index = SearchIndex::build(&catalog);
        Self {
            catalog,
            index,
            options,
            greeting: DEFAULT_GREETING.to_string(),
        }
    }

    #[must_use]
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    /// The fixed welcome text for `/start`
    pub fn start(&self) -> &str {
        &self.greeting
    }

    /// Rank clips by how many distinct query words they match.
    ///
    /// Ties keep catalog order. At most `limit` hits are returned; no match
    /// is an empty list, never an error.
    pub fn search(&self, text: &str) -> Vec<SearchHit<'_>> {
        let mut words = tokenize(text);
        let mut seen = std::collections::HashSet::new();
        words.retain(|word| seen.insert(word.clone()));

        if words.is_empty() {
            return match self.options.empty_query {
                EmptyQuery::Empty => Vec::new(),
                EmptyQuery::Browse => self
                    .catalog
                    .iter()
                    .take(self.options.limit)
                    .map(|record| SearchHit { record, score: 0 })
                    .collect(),
            };
        }

        let mut scores = vec![0usize; self.catalog.len()];
        for word in &words {
            for position in self.index.lookup(word) {
                if let Some(score) = scores.get_mut(position) {
                    *score += 1;
                }
            }
        }

        let mut ranked: Vec<(usize, usize)> = scores
            .into_iter()
            .enumerate()
            .filter(|&(_, score)| score > 0)
            .collect();
        // stable: equal scores stay in catalog order
        ranked.sort_by_key(|&(_, score)| Reverse(score));
        ranked.truncate(self.options.limit);

        debug!(
            target: "search",
            words = words.len(),
            hits = ranked.len(),
            "query evaluated"
        );

        ranked
            .into_iter()
            .filter_map(|(position, score)| {
                self.catalog
                    .at(position)
                    .map(|record| SearchHit { record, score })
            })
            .collect()
    }

    /// Same ranking as [`search`](Self::search), ids only
    pub fn search_ids(&self, text: &str) -> Vec<ClipId> {
        self.search(text)
            .into_iter()
            .map(|hit| hit.record.id.clone())
            .collect()
    }
}
