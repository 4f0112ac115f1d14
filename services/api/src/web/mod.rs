pub mod categories;
pub mod profile;
pub mod recipes;
pub mod rest;
pub mod state;

// Re-export the handlers to make them easily accessible to the binary that
// will build the web server router.
pub use categories::{popular_categories_handler, search_categories_handler};
pub use profile::{
    add_history_handler, create_user_handler, get_user_handler, remove_favorite_handler,
    upsert_favorite_handler,
};
pub use recipes::{recipe_detail_handler, search_recipes_handler, select_recipe_handler};
