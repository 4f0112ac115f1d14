pub mod category_index;
pub mod domain;
pub mod gateway;
pub mod matcher;
pub mod optimistic;
pub mod ports;
pub mod profile;
pub mod sample_data;

pub use domain::{
    CategoryRow, FavoriteEntry, HistoryEntry, MatchReport, Popularity, Recipe, UserProfile,
    UNKNOWN_CATEGORY,
};
pub use ports::{
    CategorySource, DetailCache, DocumentStore, GatewayError, PortError, PortResult,
    ProfilePatch, RawRecipe, RecipeApi,
};
