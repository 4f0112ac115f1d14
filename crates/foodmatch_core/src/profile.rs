//! crates/foodmatch_core/src/profile.rs
//!
//! Manages the per-user profile document: creation, favorites and cooking
//! history. Sequence rules (dedup by id, move-to-front) are pure helper
//! functions; the store wires them to the document-store port and stamps
//! dates.

use crate::domain::{FavoriteEntry, HistoryEntry, Recipe, UserProfile};
use crate::ports::{DocumentStore, PortError, ProfilePatch};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::warn;

//=========================================================================================
// Errors
//=========================================================================================

/// Failures surfaced by profile operations.
///
/// `Validation` means the caller passed a blank identifier, which is a bug at
/// the call site and fails fast. `Persistence` is a store failure after
/// validation passed; callers use it to run their optimistic rollback. A
/// missing document is never an error here.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Invalid argument: {0}")]
    Validation(String),
    #[error("Profile already exists for uid {0}")]
    AlreadyExists(String),
    #[error("Document store failure: {0}")]
    Persistence(String),
}

impl From<PortError> for ProfileError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::AlreadyExists(key) => Self::AlreadyExists(key),
            other => Self::Persistence(other.to_string()),
        }
    }
}

pub type ProfileResult<T> = Result<T, ProfileError>;

//=========================================================================================
// The Store
//=========================================================================================

pub struct ProfileStore {
    store: Arc<dyn DocumentStore>,
}

impl ProfileStore {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Creates the user document with empty favorites and histories.
    /// A second call for the same uid fails with `AlreadyExists` rather than
    /// clobbering what the user has saved since.
    pub async fn create_profile(
        &self,
        uid: &str,
        email: &str,
        name: &str,
    ) -> ProfileResult<UserProfile> {
        let uid = require_id("uid", uid)?;
        let now = Utc::now();
        let profile = UserProfile {
            uid: uid.to_string(),
            email: email.trim().to_string(),
            name: name.trim().to_string(),
            favorites: Vec::new(),
            histories: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.store.create(&profile).await?;
        Ok(profile)
    }

    /// Fetches the user document. `None` means "no such user", which callers
    /// must tolerate: freshly registered accounts can race ahead of profile
    /// creation.
    pub async fn get_profile(&self, uid: &str) -> ProfileResult<Option<UserProfile>> {
        let uid = require_id("uid", uid)?;
        Ok(self.store.get(uid).await?)
    }

    /// Saves `recipe` as a favorite, replacing any earlier entry with the
    /// same id and moving it to the front with today's date. Returns the new
    /// sequence so the caller can mirror local state without a re-read.
    pub async fn upsert_favorite(
        &self,
        uid: &str,
        recipe: &Recipe,
    ) -> ProfileResult<Vec<FavoriteEntry>> {
        let uid = require_id("uid", uid)?;
        require_id("recipe id", &recipe.id)?;

        let Some(profile) = self.store.get(uid).await? else {
            warn!("no profile document for uid {uid}, favorite not saved");
            return Ok(Vec::new());
        };

        let entry = FavoriteEntry::from_recipe(recipe, today());
        let favorites = upsert_entry(profile.favorites, entry);
        self.store
            .patch(uid, ProfilePatch::Favorites(favorites.clone()))
            .await?;
        Ok(favorites)
    }

    /// Removes the favorite with `recipe_id`. Removing an id that is not in
    /// the sequence is a no-op success.
    pub async fn remove_favorite(
        &self,
        uid: &str,
        recipe_id: &str,
    ) -> ProfileResult<Vec<FavoriteEntry>> {
        let uid = require_id("uid", uid)?;
        let recipe_id = require_id("recipe id", recipe_id)?;

        let Some(profile) = self.store.get(uid).await? else {
            warn!("no profile document for uid {uid}, nothing to remove");
            return Ok(Vec::new());
        };

        if !profile.favorites.iter().any(|f| f.id == recipe_id) {
            return Ok(profile.favorites);
        }

        let favorites = remove_entry(profile.favorites, recipe_id);
        self.store
            .patch(uid, ProfilePatch::Favorites(favorites.clone()))
            .await?;
        Ok(favorites)
    }

    /// Records that the user cooked `recipe` today. An earlier entry for the
    /// same id is removed first, so history stays a recency-ordered set.
    /// Suppressing repeat writes within one day is the caller's concern; the
    /// contract here is always move-to-front.
    pub async fn add_history_entry(
        &self,
        uid: &str,
        recipe: &Recipe,
    ) -> ProfileResult<Vec<HistoryEntry>> {
        let uid = require_id("uid", uid)?;
        require_id("recipe id", &recipe.id)?;

        let Some(profile) = self.store.get(uid).await? else {
            warn!("no profile document for uid {uid}, history not recorded");
            return Ok(Vec::new());
        };

        let entry = HistoryEntry::from_recipe(recipe, today());
        let histories = push_history(profile.histories, entry);
        self.store
            .patch(uid, ProfilePatch::Histories(histories.clone()))
            .await?;
        Ok(histories)
    }
}

fn require_id<'a>(label: &str, value: &'a str) -> ProfileResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ProfileError::Validation(format!("{label} is required")));
    }
    Ok(value)
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

//=========================================================================================
// Pure Sequence Rules
//=========================================================================================

/// Insert-or-replace by id: any earlier entry with the same id is dropped
/// and the new entry goes to the front.
pub fn upsert_entry(favorites: Vec<FavoriteEntry>, entry: FavoriteEntry) -> Vec<FavoriteEntry> {
    let mut next: Vec<FavoriteEntry> = favorites
        .into_iter()
        .filter(|f| f.id != entry.id)
        .collect();
    next.insert(0, entry);
    next
}

/// Drops the entry with `recipe_id`, keeping the rest in order.
pub fn remove_entry(favorites: Vec<FavoriteEntry>, recipe_id: &str) -> Vec<FavoriteEntry> {
    favorites
        .into_iter()
        .filter(|f| f.id != recipe_id)
        .collect()
}

/// Move-to-front for history rows: the prior occurrence of the id, if any,
/// is removed before the new entry is prepended.
pub fn push_history(histories: Vec<HistoryEntry>, entry: HistoryEntry) -> Vec<HistoryEntry> {
    let mut next: Vec<HistoryEntry> = histories
        .into_iter()
        .filter(|h| h.id != entry.id)
        .collect();
    next.insert(0, entry);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Popularity;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    //=====================================================================================
    // In-memory document store
    //=====================================================================================

    #[derive(Default)]
    struct MemoryStore {
        documents: Mutex<HashMap<String, UserProfile>>,
        fail_writes: bool,
    }

    impl MemoryStore {
        fn failing() -> Self {
            Self {
                documents: Mutex::new(HashMap::new()),
                fail_writes: true,
            }
        }

        fn seed(&self, profile: UserProfile) {
            self.documents
                .lock()
                .unwrap()
                .insert(profile.uid.clone(), profile);
        }
    }

    #[async_trait]
    impl DocumentStore for MemoryStore {
        async fn get(&self, uid: &str) -> Result<Option<UserProfile>, PortError> {
            Ok(self.documents.lock().unwrap().get(uid).cloned())
        }

        async fn create(&self, profile: &UserProfile) -> Result<(), PortError> {
            let mut documents = self.documents.lock().unwrap();
            if documents.contains_key(&profile.uid) {
                return Err(PortError::AlreadyExists(profile.uid.clone()));
            }
            documents.insert(profile.uid.clone(), profile.clone());
            Ok(())
        }

        async fn patch(&self, uid: &str, patch: ProfilePatch) -> Result<(), PortError> {
            if self.fail_writes {
                return Err(PortError::Unexpected("write refused".to_string()));
            }
            let mut documents = self.documents.lock().unwrap();
            let profile = documents
                .get_mut(uid)
                .ok_or_else(|| PortError::NotFound(uid.to_string()))?;
            match patch {
                ProfilePatch::Favorites(favorites) => profile.favorites = favorites,
                ProfilePatch::Histories(histories) => profile.histories = histories,
            }
            profile.updated_at = Utc::now();
            Ok(())
        }
    }

    fn store_with(profile: Option<UserProfile>) -> (ProfileStore, Arc<MemoryStore>) {
        let memory = Arc::new(MemoryStore::default());
        if let Some(profile) = profile {
            memory.seed(profile);
        }
        (ProfileStore::new(memory.clone()), memory)
    }

    fn profile(uid: &str) -> UserProfile {
        let now = Utc::now();
        UserProfile {
            uid: uid.to_string(),
            email: format!("{uid}@example.com"),
            name: "田中太郎".to_string(),
            favorites: Vec::new(),
            histories: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn recipe(id: &str, title: &str) -> Recipe {
        Recipe {
            id: id.to_string(),
            title: title.to_string(),
            image_url: format!("https://img.example.jp/{id}.jpg"),
            description: String::new(),
            source_url: String::new(),
            materials: Vec::new(),
            instructions: Vec::new(),
            time_estimate: String::new(),
            cost_estimate: String::new(),
            popularity: Popularity::default(),
            author: String::new(),
            category_id: String::new(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    //=====================================================================================
    // Profile lifecycle
    //=====================================================================================

    #[tokio::test]
    async fn create_profile_starts_empty_and_fails_on_second_call() {
        let (store, _) = store_with(None);

        let created = store
            .create_profile("user-1", "tanaka@example.com", "田中太郎")
            .await
            .unwrap();
        assert!(created.favorites.is_empty());
        assert!(created.histories.is_empty());

        let second = store
            .create_profile("user-1", "tanaka@example.com", "田中太郎")
            .await;
        assert!(matches!(second, Err(ProfileError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn get_profile_returns_none_for_unknown_uid() {
        let (store, _) = store_with(None);

        assert!(store.get_profile("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn blank_identifiers_fail_validation() {
        let (store, _) = store_with(None);

        assert!(matches!(
            store.get_profile("   ").await,
            Err(ProfileError::Validation(_))
        ));
        assert!(matches!(
            store.create_profile("", "a@example.com", "a").await,
            Err(ProfileError::Validation(_))
        ));
        assert!(matches!(
            store.upsert_favorite("user-1", &recipe("", "no id")).await,
            Err(ProfileError::Validation(_))
        ));
        assert!(matches!(
            store.remove_favorite("user-1", " ").await,
            Err(ProfileError::Validation(_))
        ));
    }

    //=====================================================================================
    // Favorites
    //=====================================================================================

    #[tokio::test]
    async fn upsert_favorite_deduplicates_and_moves_to_front() {
        let (store, memory) = store_with(Some(profile("user-1")));

        store
            .upsert_favorite("user-1", &recipe("a", "オムライス"))
            .await
            .unwrap();
        store
            .upsert_favorite("user-1", &recipe("b", "肉じゃが"))
            .await
            .unwrap();
        let favorites = store
            .upsert_favorite("user-1", &recipe("a", "オムライス"))
            .await
            .unwrap();

        let ids: Vec<&str> = favorites.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);

        // The returned sequence is what was persisted.
        let stored = memory.get("user-1").await.unwrap().unwrap();
        assert_eq!(stored.favorites, favorites);
    }

    #[tokio::test]
    async fn remove_favorite_is_a_noop_for_unknown_ids() {
        let (store, memory) = store_with(Some(profile("user-1")));
        store
            .upsert_favorite("user-1", &recipe("a", "オムライス"))
            .await
            .unwrap();

        let favorites = store.remove_favorite("user-1", "missing").await.unwrap();
        assert_eq!(favorites.len(), 1);

        let favorites = store.remove_favorite("user-1", "a").await.unwrap();
        assert!(favorites.is_empty());
        assert!(memory.get("user-1").await.unwrap().unwrap().favorites.is_empty());
    }

    #[tokio::test]
    async fn mutations_on_a_missing_profile_are_warned_noops() {
        let (store, _) = store_with(None);

        assert!(store
            .upsert_favorite("ghost", &recipe("a", "x"))
            .await
            .unwrap()
            .is_empty());
        assert!(store
            .add_history_entry("ghost", &recipe("a", "x"))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn write_failures_surface_as_persistence_errors() {
        let memory = Arc::new(MemoryStore::failing());
        memory.seed(profile("user-1"));
        let store = ProfileStore::new(memory);

        let result = store.upsert_favorite("user-1", &recipe("a", "x")).await;

        assert!(matches!(result, Err(ProfileError::Persistence(_))));
    }

    //=====================================================================================
    // History
    //=====================================================================================

    #[tokio::test]
    async fn history_moves_repeated_ids_to_the_front() {
        let (store, _) = store_with(Some(profile("user-1")));

        store
            .add_history_entry("user-1", &recipe("a", "オムライス"))
            .await
            .unwrap();
        store
            .add_history_entry("user-1", &recipe("b", "肉じゃが"))
            .await
            .unwrap();
        let histories = store
            .add_history_entry("user-1", &recipe("a", "オムライス"))
            .await
            .unwrap();

        let ids: Vec<&str> = histories.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(histories.len(), 2);
    }

    //=====================================================================================
    // Pure sequence rules with fixed dates
    //=====================================================================================

    fn favorite(id: &str, saved_at: NaiveDate) -> FavoriteEntry {
        FavoriteEntry {
            id: id.to_string(),
            title: id.to_string(),
            image_url: String::new(),
            description: String::new(),
            saved_at,
        }
    }

    #[test]
    fn upsert_entry_refreshes_the_date_of_a_replaced_favorite() {
        let existing = vec![
            favorite("a", date("2024-11-01")),
            favorite("b", date("2024-11-02")),
        ];

        let next = upsert_entry(existing, favorite("a", date("2024-11-15")));

        assert_eq!(next.len(), 2);
        assert_eq!(next[0].id, "a");
        assert_eq!(next[0].saved_at, date("2024-11-15"));
        assert_eq!(next[1].id, "b");
    }

    #[test]
    fn push_history_keeps_one_row_per_id() {
        let entry = |id: &str, d: &str| HistoryEntry {
            id: id.to_string(),
            title: id.to_string(),
            image_url: String::new(),
            description: String::new(),
            date: date(d),
        };
        let existing = vec![entry("a", "2024-11-14"), entry("b", "2024-11-13")];

        let next = push_history(existing, entry("a", "2024-11-15"));

        assert_eq!(next.len(), 2);
        assert_eq!(next[0].id, "a");
        assert_eq!(next[0].date, date("2024-11-15"));
        assert_eq!(next[1].id, "b");
    }
}
