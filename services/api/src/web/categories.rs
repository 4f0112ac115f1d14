//! services/api/src/web/categories.rs
//!
//! Axum handlers for category search and the curated category shortcuts.

use crate::web::state::AppState;
use axum::{
    extract::{Query, State},
    response::Json,
};
use foodmatch_core::category_index::{search_categories, POPULAR_CATEGORIES};
use foodmatch_core::domain::CategoryRow;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

const DEFAULT_SEARCH_LIMIT: usize = 20;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// One category row in API form.
#[derive(Serialize, ToSchema)]
pub struct CategoryDto {
    pub id: String,
    pub name: String,
    pub url: String,
}

impl From<CategoryRow> for CategoryDto {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            url: row.url,
        }
    }
}

/// One curated category shortcut.
#[derive(Serialize, ToSchema)]
pub struct PopularCategoryDto {
    pub id: String,
    pub name: String,
}

#[derive(Deserialize, IntoParams)]
pub struct CategorySearchParams {
    /// The search query; matched as a normalized substring of category names.
    pub q: String,
    /// Maximum number of rows to return (default 20).
    pub limit: Option<usize>,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Search the category table.
#[utoipa::path(
    get,
    path = "/categories",
    params(CategorySearchParams),
    responses(
        (status = 200, description = "Matching categories, most specific first", body = [CategoryDto])
    )
)]
pub async fn search_categories_handler(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<CategorySearchParams>,
) -> Json<Vec<CategoryDto>> {
    let table = app_state.categories.load().await;
    let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    let rows = search_categories(&params.q, &table, limit);
    Json(rows.into_iter().map(CategoryDto::from).collect())
}

/// The fixed list of popular category shortcuts.
#[utoipa::path(
    get,
    path = "/categories/popular",
    responses(
        (status = 200, description = "Curated category shortcuts", body = [PopularCategoryDto])
    )
)]
pub async fn popular_categories_handler() -> Json<Vec<PopularCategoryDto>> {
    Json(
        POPULAR_CATEGORIES
            .iter()
            .map(|(id, name)| PopularCategoryDto {
                id: id.to_string(),
                name: name.to_string(),
            })
            .collect(),
    )
}
