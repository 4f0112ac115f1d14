//! crates/foodmatch_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any upstream API schema or storage format.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel category id used when a recipe's source category cannot be resolved.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// One row of the category lookup table (tab-separated: id, name, url).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRow {
    pub id: String,
    pub name: String,
    pub url: String,
}

/// Popularity markers carried by upstream ranking results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Popularity {
    pub is_pickup: bool,
    pub rank: String,
}

/// The canonical recipe record consumed by all presentation code, regardless
/// of originating source (upstream API or bundled samples). Unmapped source
/// fields are empty strings or empty sequences, never nulls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub description: String,
    pub source_url: String,
    pub materials: Vec<String>,
    pub instructions: Vec<String>,
    pub time_estimate: String,
    pub cost_estimate: String,
    pub popularity: Popularity,
    pub author: String,
    pub category_id: String,
}

/// A favorited recipe inside a user's profile document.
///
/// Invariant: at most one entry per recipe id exists in the sequence at any
/// time. Re-adding replaces the old entry and moves it to the front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub description: String,
    pub saved_at: NaiveDate,
}

impl FavoriteEntry {
    /// Builds an entry for `recipe` stamped with `saved_at`.
    pub fn from_recipe(recipe: &Recipe, saved_at: NaiveDate) -> Self {
        Self {
            id: recipe.id.clone(),
            title: recipe.title.clone(),
            image_url: recipe.image_url.clone(),
            description: recipe.description.clone(),
            saved_at,
        }
    }
}

/// A cooking-history row, kept most recent first.
///
/// Invariant: history is a recency-ordered set keyed by recipe id, not an
/// append log. Re-adding an id removes the prior occurrence first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub description: String,
    pub date: NaiveDate,
}

impl HistoryEntry {
    /// Builds an entry for `recipe` stamped with `date`.
    pub fn from_recipe(recipe: &Recipe, date: NaiveDate) -> Self {
        Self {
            id: recipe.id.clone(),
            title: recipe.title.clone(),
            image_url: recipe.image_url.clone(),
            description: recipe.description.clone(),
            date,
        }
    }
}

/// The per-user document owned by the document store, keyed by `uid`.
/// Created exactly once at signup and mutated only through the profile store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub uid: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub favorites: Vec<FavoriteEntry>,
    #[serde(default)]
    pub histories: Vec<HistoryEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The result of matching a user's on-hand ingredients against one recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchReport {
    /// On-hand ingredients found in at least one of the recipe's materials.
    pub matched: Vec<String>,
    /// Material names covered by none of the on-hand ingredients.
    pub missing: Vec<String>,
    /// `matched.len() / materials.len()`, 0.0 for a recipe without materials.
    pub match_ratio: f64,
    /// True when `missing` is empty.
    pub is_fully_coverable: bool,
}
