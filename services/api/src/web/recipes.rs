//! services/api/src/web/recipes.rs
//!
//! Axum handlers for recipe search, selection and detail. Search never
//! hard-fails towards the client: upstream problems were already degraded to
//! sample data by the gateway before the handler sees the result.

use crate::web::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use foodmatch_core::domain::{Popularity, Recipe};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use utoipa::{IntoParams, ToSchema};

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// A canonical recipe in API form. Also accepted as a request body when the
/// client reports a selection.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct RecipeDto {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub time_estimate: String,
    #[serde(default)]
    pub cost_estimate: String,
    #[serde(default)]
    pub is_pickup: bool,
    #[serde(default)]
    pub rank: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub category_id: String,
}

impl From<Recipe> for RecipeDto {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            image_url: recipe.image_url,
            description: recipe.description,
            source_url: recipe.source_url,
            materials: recipe.materials,
            instructions: recipe.instructions,
            time_estimate: recipe.time_estimate,
            cost_estimate: recipe.cost_estimate,
            is_pickup: recipe.popularity.is_pickup,
            rank: recipe.popularity.rank,
            author: recipe.author,
            category_id: recipe.category_id,
        }
    }
}

impl RecipeDto {
    pub fn into_domain(self) -> Recipe {
        Recipe {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            description: self.description,
            source_url: self.source_url,
            materials: self.materials,
            instructions: self.instructions,
            time_estimate: self.time_estimate,
            cost_estimate: self.cost_estimate,
            popularity: Popularity {
                is_pickup: self.is_pickup,
                rank: self.rank,
            },
            author: self.author,
            category_id: self.category_id,
        }
    }
}

#[derive(Deserialize, IntoParams)]
pub struct RecipeSearchParams {
    /// Category id to rank recipes for. Mutually exclusive with `ingredients`.
    pub category_id: Option<String>,
    /// Comma-separated on-hand ingredients. Mutually exclusive with `category_id`.
    pub ingredients: Option<String>,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Search recipes by category or by on-hand ingredients.
#[utoipa::path(
    get,
    path = "/recipes",
    params(RecipeSearchParams),
    responses(
        (status = 200, description = "Matching recipes (sample data when the upstream API is unavailable)", body = [RecipeDto]),
        (status = 400, description = "Neither or both of category_id and ingredients given")
    )
)]
pub async fn search_recipes_handler(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<RecipeSearchParams>,
) -> Result<Json<Vec<RecipeDto>>, (StatusCode, String)> {
    let cancel = CancellationToken::new();

    let result = match (params.category_id, params.ingredients) {
        (Some(category_id), None) => {
            app_state
                .gateway
                .search_by_category(&category_id, &cancel)
                .await
        }
        (None, Some(ingredients)) => {
            let on_hand: Vec<String> = ingredients
                .split(',')
                .map(|i| i.trim().to_string())
                .filter(|i| !i.is_empty())
                .collect();
            app_state
                .gateway
                .search_by_ingredients(&on_hand, &cancel)
                .await
        }
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                "Exactly one of category_id or ingredients is required".to_string(),
            ))
        }
    };

    match result {
        Ok(recipes) => Ok(Json(recipes.into_iter().map(RecipeDto::from).collect())),
        // Only reachable when the request's token is cancelled; the client
        // gave up, so there is nothing useful to answer.
        Err(e) => Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string())),
    }
}

/// Report that the user selected a recipe from a result list, so the detail
/// view can serve it without an upstream recipe-by-id endpoint.
#[utoipa::path(
    post,
    path = "/recipes/selected",
    request_body = RecipeDto,
    responses(
        (status = 204, description = "Recipe cached for the detail view"),
        (status = 400, description = "Recipe id missing")
    )
)]
pub async fn select_recipe_handler(
    State(app_state): State<Arc<AppState>>,
    Json(recipe): Json<RecipeDto>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if recipe.id.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Recipe id is required".to_string()));
    }
    app_state.gateway.cache_for_detail(recipe.into_domain());
    Ok(StatusCode::NO_CONTENT)
}

/// Fetch one recipe for the detail view.
#[utoipa::path(
    get,
    path = "/recipes/{id}",
    params(("id" = String, Path, description = "The recipe id")),
    responses(
        (status = 200, description = "The recipe", body = RecipeDto),
        (status = 404, description = "Neither the selection cache nor the sample data knows this id")
    )
)]
pub async fn recipe_detail_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RecipeDto>, (StatusCode, String)> {
    match app_state.gateway.detail(&id).await {
        Some(recipe) => Ok(Json(RecipeDto::from(recipe))),
        None => Err((StatusCode::NOT_FOUND, format!("Recipe {id} not found"))),
    }
}
