//! crates/foodmatch_core/src/gateway.rs
//!
//! The recipe gateway: searches the upstream API by category or by on-hand
//! ingredients, normalizes the heterogeneous responses into canonical
//! records, and degrades to the bundled samples on any failure so browsing
//! keeps working offline or misconfigured. Cancellation is the one failure
//! that propagates.

use crate::category_index::{search_categories, CategoryIndex};
use crate::domain::{CategoryRow, Popularity, Recipe, UNKNOWN_CATEGORY};
use crate::matcher::rank_by_match;
use crate::ports::{DetailCache, GatewayError, RawRecipe, RecipeApi};
use crate::sample_data::{sample_by_id, sample_recipes};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, warn};

//=========================================================================================
// The Gateway
//=========================================================================================

pub struct RecipeGateway {
    api: Arc<dyn RecipeApi>,
    detail_cache: Arc<dyn DetailCache>,
    categories: Arc<CategoryIndex>,
}

impl RecipeGateway {
    pub fn new(
        api: Arc<dyn RecipeApi>,
        detail_cache: Arc<dyn DetailCache>,
        categories: Arc<CategoryIndex>,
    ) -> Self {
        Self {
            api,
            detail_cache,
            categories,
        }
    }

    /// Fetches the upstream ranking for `category_id` as canonical recipes.
    ///
    /// An empty id is a legitimate empty result, not a fallback. API and
    /// configuration failures are logged and answered with the bundled
    /// samples; the only error callers ever see is `Cancelled`.
    pub async fn search_by_category(
        &self,
        category_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Recipe>, GatewayError> {
        let category_id = category_id.trim();
        if category_id.is_empty() {
            return Ok(Vec::new());
        }
        // A cancelled search must unwind before touching any shared cache.
        if cancel.is_cancelled() {
            return Err(GatewayError::Cancelled);
        }

        match self.api.category_ranking(category_id, cancel).await {
            Ok(raw) => {
                let table = self.categories.load().await;
                Ok(raw.iter().map(|r| recipe_from_api(r, &table)).collect())
            }
            Err(GatewayError::Cancelled) => Err(GatewayError::Cancelled),
            Err(err) => {
                report_and_degrade(&err);
                Ok(sample_recipes().to_vec())
            }
        }
    }

    /// Searches by free-text ingredient keywords.
    ///
    /// The first ingredient is resolved against the category table; a hit
    /// delegates to the category-ranking path. With no category mapping the
    /// bundled samples are ranked locally by match ratio, which needs no
    /// credential and is deterministic.
    pub async fn search_by_ingredients(
        &self,
        ingredients: &[String],
        cancel: &CancellationToken,
    ) -> Result<Vec<Recipe>, GatewayError> {
        let terms: Vec<String> = ingredients
            .iter()
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
            .collect();
        if terms.is_empty() {
            return Ok(Vec::new());
        }
        if cancel.is_cancelled() {
            return Err(GatewayError::Cancelled);
        }

        let table = self.categories.load().await;
        if let Some(category) = search_categories(&terms[0], &table, 1).into_iter().next() {
            return self.search_by_category(&category.id, cancel).await;
        }

        Ok(rank_by_match(&terms, sample_recipes()))
    }

    /// Resolves one recipe by id, from the selection-time detail cache first,
    /// then the bundled samples. The upstream API has no recipe-by-id
    /// endpoint, so there is nothing to fetch; unknown ids yield `None`.
    pub async fn detail(&self, recipe_id: &str) -> Option<Recipe> {
        let recipe_id = recipe_id.trim();
        if recipe_id.is_empty() {
            return None;
        }
        if let Some(recipe) = self.detail_cache.get(recipe_id) {
            return Some(recipe);
        }
        sample_by_id(recipe_id)
    }

    /// Remembers a recipe the user selected so `detail` can serve it later.
    pub fn cache_for_detail(&self, recipe: Recipe) {
        self.detail_cache.put(recipe);
    }
}

/// Logs a degraded search. Configuration problems and upstream failures are
/// kept distinguishable for operability.
fn report_and_degrade(err: &GatewayError) {
    match err {
        GatewayError::Config(msg) => {
            error!("recipe API misconfigured, serving sample data: {msg}");
        }
        other => {
            warn!("recipe API unavailable, serving sample data: {other}");
        }
    }
}

//=========================================================================================
// Raw-to-Canonical Mapping
//=========================================================================================

/// Adapter from an upstream record to the canonical shape. The upstream id
/// and title survive losslessly; everything absent becomes empty.
pub fn recipe_from_api(raw: &RawRecipe, table: &[CategoryRow]) -> Recipe {
    Recipe {
        id: raw.recipe_id.clone(),
        title: raw.recipe_title.clone(),
        image_url: raw.food_image_url.clone(),
        description: raw.recipe_description.clone(),
        source_url: raw.recipe_url.clone(),
        materials: raw.recipe_material.clone(),
        // Ranking results carry no instruction text.
        instructions: Vec::new(),
        time_estimate: raw.recipe_indication.clone(),
        cost_estimate: raw.recipe_cost.clone(),
        popularity: Popularity {
            is_pickup: raw.pickup == 1,
            rank: raw.rank.clone(),
        },
        author: raw.nickname.clone(),
        category_id: derive_category_id(&raw.category_url, table),
    }
}

/// Re-derives a recipe's category by matching known category ids against the
/// path segments of the record's category URL. Segment equality, not plain
/// substring, so id "30" cannot swallow "30-307".
fn derive_category_id(category_url: &str, table: &[CategoryRow]) -> String {
    let segments: Vec<&str> = category_url
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    table
        .iter()
        .find(|row| segments.iter().any(|segment| *segment == row.id))
        .map(|row| row.id.clone())
        .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string())
}
