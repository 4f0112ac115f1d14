//! crates/foodmatch_core/src/category_index.rs
//!
//! Category table loading, caching and search.
//!
//! The table is a tab-separated resource with a header row and
//! `[id, name, url]` columns. It is parsed once per process and cached; the
//! search is a normalized substring match ranked so that the most specific
//! category for a query comes first.

use crate::domain::CategoryRow;
use crate::ports::CategorySource;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};

/// Curated category shortcuts shown by the UI. Fixed data, not derived.
pub const POPULAR_CATEGORIES: &[(&str, &str)] = &[
    ("30-300", "ハンバーグ"),
    ("30-307", "カレー"),
    ("30-309", "唐揚げ"),
    ("14-121", "オムライス"),
    ("15-687", "カルボナーラ"),
    ("30-301", "餃子"),
    ("33-353", "だし巻き卵・卵焼き"),
    ("17-159", "味噌汁"),
    ("14-131", "チャーハン"),
    ("30-302", "肉じゃが"),
];

//=========================================================================================
// The Cached Index
//=========================================================================================

/// Owns the category source and a process-wide, load-once cache of the
/// parsed table. Construct one at startup and share it behind an `Arc`.
pub struct CategoryIndex {
    source: Arc<dyn CategorySource>,
    cache: OnceCell<Arc<Vec<CategoryRow>>>,
}

impl CategoryIndex {
    /// Creates a new `CategoryIndex` around the given source.
    pub fn new(source: Arc<dyn CategorySource>) -> Self {
        Self {
            source,
            cache: OnceCell::new(),
        }
    }

    /// Whether a table has been loaded and cached.
    pub fn is_loaded(&self) -> bool {
        self.cache.initialized()
    }

    /// Returns the category table, fetching and parsing it on first use.
    ///
    /// Fails open: a source or parse failure is logged and answered with an
    /// empty table so search degrades to "no matches" instead of erroring.
    /// Failed loads are not cached, so a later call retries the source.
    pub async fn load(&self) -> Arc<Vec<CategoryRow>> {
        let loaded = self
            .cache
            .get_or_try_init(|| async {
                let raw = self.source.load_raw().await?;
                let rows = parse_table(&raw);
                info!("loaded {} categories", rows.len());
                Ok::<_, crate::ports::PortError>(Arc::new(rows))
            })
            .await;

        match loaded {
            Ok(rows) => Arc::clone(rows),
            Err(e) => {
                warn!("failed to load category table: {e}");
                Arc::new(Vec::new())
            }
        }
    }
}

/// Parses the raw tab-separated text. The first line is a header and is
/// skipped; blank lines and lines with fewer than three columns are dropped.
fn parse_table(raw: &str) -> Vec<CategoryRow> {
    raw.lines()
        .skip(1)
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            let mut columns = line.split('\t');
            match (columns.next(), columns.next(), columns.next()) {
                (Some(id), Some(name), Some(url)) => Some(CategoryRow {
                    id: id.to_string(),
                    name: name.to_string(),
                    url: url.to_string(),
                }),
                _ => None,
            }
        })
        .collect()
}

//=========================================================================================
// Normalization and Search
//=========================================================================================

/// Normalizes a string for matching: trims whitespace, folds full-width
/// katakana (U+30A1..U+30F6) down to hiragana, and lowercases.
/// Idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(input: &str) -> String {
    input
        .trim()
        .chars()
        .map(|c| match c {
            '\u{30A1}'..='\u{30F6}' => char::from_u32(c as u32 - 0x60).unwrap_or(c),
            _ => c,
        })
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Searches `table` for rows whose normalized name contains the normalized
/// query, ranked: exact match, then prefix match, then shorter name first
/// (a shorter name is the more specific category). Truncated to `limit`.
pub fn search_categories(query: &str, table: &[CategoryRow], limit: usize) -> Vec<CategoryRow> {
    let normalized_query = normalize(query);
    if normalized_query.is_empty() || table.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<(&CategoryRow, (u8, u8, usize))> = table
        .iter()
        .filter_map(|row| {
            let name = normalize(&row.name);
            if !name.contains(&normalized_query) {
                return None;
            }
            let exact = if name == normalized_query { 0 } else { 1 };
            let prefix = if name.starts_with(&normalized_query) { 0 } else { 1 };
            Some((row, (exact, prefix, row.name.chars().count())))
        })
        .collect();

    results.sort_by(|a, b| a.1.cmp(&b.1));
    results
        .into_iter()
        .take(limit)
        .map(|(row, _)| row.clone())
        .collect()
}

/// Exact id lookup, no normalization.
pub fn category_by_id<'a>(id: &str, table: &'a [CategoryRow]) -> Option<&'a CategoryRow> {
    if id.is_empty() {
        return None;
    }
    table.iter().find(|row| row.id == id)
}
