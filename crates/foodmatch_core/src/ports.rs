//! crates/foodmatch_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like the upstream
//! recipe API or the per-user document store.

use crate::domain::{FavoriteEntry, HistoryEntry, Recipe, UserProfile};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use tokio_util::sync::CancellationToken;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, filesystem).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Recipe API Failure Taxonomy
//=========================================================================================

/// Failure classification for upstream recipe-API calls.
///
/// `Config` and `Upstream` trigger the gateway's fallback data; `Cancelled`
/// must unwind to the caller untouched, with no fallback substitution.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Recipe API is not configured: {0}")]
    Config(String),
    #[error("Upstream recipe API failure: {0}")]
    Upstream(String),
    #[error("Operation was cancelled")]
    Cancelled,
}

impl GatewayError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

//=========================================================================================
// Wire Records
//=========================================================================================

/// A recipe record as returned by the upstream search/ranking endpoints.
///
/// The upstream schema is loose: ids and ranks arrive as numbers or strings,
/// and the material list arrives as a string or an array. Every optional
/// field defaults to empty so nothing null-ish survives normalization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRecipe {
    #[serde(rename = "recipeId", deserialize_with = "stringified")]
    pub recipe_id: String,
    #[serde(rename = "recipeTitle")]
    pub recipe_title: String,
    #[serde(rename = "foodImageUrl")]
    pub food_image_url: String,
    #[serde(rename = "recipeDescription")]
    pub recipe_description: String,
    #[serde(rename = "recipeUrl")]
    pub recipe_url: String,
    #[serde(rename = "recipeMaterial", deserialize_with = "string_or_seq")]
    pub recipe_material: Vec<String>,
    #[serde(rename = "recipeIndication")]
    pub recipe_indication: String,
    #[serde(rename = "recipeCost")]
    pub recipe_cost: String,
    #[serde(deserialize_with = "stringified")]
    pub rank: String,
    pub pickup: i64,
    pub nickname: String,
    #[serde(rename = "categoryUrl")]
    pub category_url: String,
}

/// Accepts a JSON number or string and yields its string form.
fn stringified<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(i64),
        Text(String),
    }

    Ok(match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => n.to_string(),
        NumberOrString::Text(s) => s,
    })
}

/// Accepts a single JSON string or an array of strings.
fn string_or_seq<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) if s.is_empty() => Vec::new(),
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(items) => items,
    })
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Source of the raw category table text (header row included).
/// Whether the text comes from disk or over the network is an adapter concern.
#[async_trait]
pub trait CategorySource: Send + Sync {
    async fn load_raw(&self) -> PortResult<String>;
}

/// The upstream recipe API.
///
/// Implementations classify their own failures (missing credential, non-2xx,
/// embedded error payload, transport) and never substitute fallback data;
/// graceful degradation belongs to the gateway.
#[async_trait]
pub trait RecipeApi: Send + Sync {
    async fn category_ranking(
        &self,
        category_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<RawRecipe>, GatewayError>;
}

/// A field-level patch applied to one user document.
#[derive(Debug, Clone)]
pub enum ProfilePatch {
    Favorites(Vec<FavoriteEntry>),
    Histories(Vec<HistoryEntry>),
}

/// Keyed per-user document storage with document-level atomicity.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, uid: &str) -> PortResult<Option<UserProfile>>;

    /// Creates the document; fails with `AlreadyExists` when `uid` is taken.
    async fn create(&self, profile: &UserProfile) -> PortResult<()>;

    /// Atomically replaces one field of an existing document.
    async fn patch(&self, uid: &str, patch: ProfilePatch) -> PortResult<()>;
}

/// Ephemeral recipe-by-id cache written by the presentation layer at
/// selection time and read back at detail-view time. No durability.
pub trait DetailCache: Send + Sync {
    fn put(&self, recipe: Recipe);
    fn get(&self, recipe_id: &str) -> Option<Recipe>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_recipe_accepts_numeric_id_and_array_material() {
        let raw: RawRecipe = serde_json::from_str(
            r#"{
                "recipeId": 1180006594,
                "recipeTitle": "簡単ふわふわオムライス",
                "recipeMaterial": ["卵 3個", "ご飯 200g"],
                "rank": "1",
                "pickup": 1
            }"#,
        )
        .unwrap();

        assert_eq!(raw.recipe_id, "1180006594");
        assert_eq!(raw.recipe_title, "簡単ふわふわオムライス");
        assert_eq!(raw.recipe_material, vec!["卵 3個", "ご飯 200g"]);
        assert_eq!(raw.rank, "1");
        assert_eq!(raw.pickup, 1);
    }

    #[test]
    fn raw_recipe_accepts_string_material_and_numeric_rank() {
        let raw: RawRecipe =
            serde_json::from_str(r#"{"recipeId": "42", "recipeMaterial": "卵 3個", "rank": 7}"#)
                .unwrap();

        assert_eq!(raw.recipe_material, vec!["卵 3個"]);
        assert_eq!(raw.rank, "7");
    }

    #[test]
    fn raw_recipe_missing_fields_default_to_empty() {
        let raw: RawRecipe = serde_json::from_str(r#"{"recipeId": 9}"#).unwrap();

        assert_eq!(raw.recipe_id, "9");
        assert_eq!(raw.recipe_title, "");
        assert!(raw.recipe_material.is_empty());
        assert_eq!(raw.category_url, "");
        assert_eq!(raw.pickup, 0);
    }
}
