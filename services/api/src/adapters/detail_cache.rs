//! services/api/src/adapters/detail_cache.rs
//!
//! In-memory implementation of the `DetailCache` port: recipes the user
//! selected from a result list, kept around so the detail view can render
//! without an upstream recipe-by-id endpoint. Process-lifetime only, no
//! durability.

use foodmatch_core::domain::Recipe;
use foodmatch_core::ports::DetailCache;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryDetailCache {
    entries: Mutex<HashMap<String, Recipe>>,
}

impl MemoryDetailCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DetailCache for MemoryDetailCache {
    fn put(&self, recipe: Recipe) {
        if recipe.id.is_empty() {
            return;
        }
        // A poisoned lock only means a writer panicked; the map is still usable.
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(recipe.id.clone(), recipe);
    }

    fn get(&self, recipe_id: &str) -> Option<Recipe> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(recipe_id).cloned()
    }
}
