//! services/api/src/web/rest.rs
//!
//! The master definition for the OpenAPI specification, aggregating the
//! handlers defined in the sibling modules.

use crate::web::{categories, profile, recipes};
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        categories::search_categories_handler,
        categories::popular_categories_handler,
        recipes::search_recipes_handler,
        recipes::select_recipe_handler,
        recipes::recipe_detail_handler,
        profile::create_user_handler,
        profile::get_user_handler,
        profile::upsert_favorite_handler,
        profile::remove_favorite_handler,
        profile::add_history_handler,
    ),
    components(
        schemas(
            categories::CategoryDto,
            categories::PopularCategoryDto,
            recipes::RecipeDto,
            profile::CreateUserRequest,
            profile::UserProfileDto,
            profile::FavoriteEntryDto,
            profile::HistoryEntryDto,
        )
    ),
    tags(
        (name = "FoodMatch API", description = "API endpoints for recipe discovery, favorites and cooking history.")
    )
)]
pub struct ApiDoc;
