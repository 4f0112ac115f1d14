//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use foodmatch_core::category_index::CategoryIndex;
use foodmatch_core::gateway::RecipeGateway;
use foodmatch_core::profile::ProfileStore;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub categories: Arc<CategoryIndex>,
    pub gateway: Arc<RecipeGateway>,
    pub profiles: Arc<ProfileStore>,
}
