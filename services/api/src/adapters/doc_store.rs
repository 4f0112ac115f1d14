//! services/api/src/adapters/doc_store.rs
//!
//! This module contains the document-store adapter, which is the concrete
//! implementation of the `DocumentStore` port from the `core` crate. Each
//! user owns one JSONB document in the `users` table, keyed by `uid`, and
//! every mutation is a single statement so the document stays the unit of
//! consistency.

use async_trait::async_trait;
use chrono::Utc;
use foodmatch_core::domain::UserProfile;
use foodmatch_core::ports::{DocumentStore, PortError, PortResult, ProfilePatch};
use sqlx::{PgPool, Row};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A Postgres adapter that implements the `DocumentStore` port.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Creates a new `PgDocumentStore`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

fn unexpected(e: impl std::fmt::Display) -> PortError {
    PortError::Unexpected(e.to_string())
}

//=========================================================================================
// `DocumentStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn get(&self, uid: &str) -> PortResult<Option<UserProfile>> {
        let row = sqlx::query("SELECT profile FROM users WHERE uid = $1")
            .bind(uid)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        match row {
            None => Ok(None),
            Some(row) => {
                let document: serde_json::Value = row.try_get("profile").map_err(unexpected)?;
                let profile = serde_json::from_value(document).map_err(|e| {
                    PortError::Unexpected(format!("users/{uid} holds a malformed document: {e}"))
                })?;
                Ok(Some(profile))
            }
        }
    }

    async fn create(&self, profile: &UserProfile) -> PortResult<()> {
        let document = serde_json::to_value(profile).map_err(unexpected)?;

        // ON CONFLICT DO NOTHING + affected-row count detects a duplicate uid
        // without a read-then-write race.
        let result = sqlx::query(
            "INSERT INTO users (uid, profile, created_at, updated_at) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (uid) DO NOTHING",
        )
        .bind(&profile.uid)
        .bind(&document)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(PortError::AlreadyExists(profile.uid.clone()));
        }
        Ok(())
    }

    async fn patch(&self, uid: &str, patch: ProfilePatch) -> PortResult<()> {
        let (path, value) = match patch {
            ProfilePatch::Favorites(favorites) => (
                vec!["favorites".to_string()],
                serde_json::to_value(favorites).map_err(unexpected)?,
            ),
            ProfilePatch::Histories(histories) => (
                vec!["histories".to_string()],
                serde_json::to_value(histories).map_err(unexpected)?,
            ),
        };

        let now = Utc::now();
        let now_json = serde_json::to_value(now).map_err(unexpected)?;

        // One statement replaces the field and refreshes both timestamps, so
        // concurrent patches serialize at the row and the last writer wins.
        let result = sqlx::query(
            "UPDATE users \
             SET profile = jsonb_set(jsonb_set(profile, $2::text[], $3::jsonb), '{updated_at}', $4::jsonb), \
                 updated_at = $5 \
             WHERE uid = $1",
        )
        .bind(uid)
        .bind(&path)
        .bind(&value)
        .bind(&now_json)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!("users/{uid}")));
        }
        Ok(())
    }
}
