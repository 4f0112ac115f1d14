//! services/api/src/web/profile.rs
//!
//! Axum handlers for the per-user profile: creation, favorites and cooking
//! history. Profile failures DO surface to the client, unlike recipe
//! searches, so the caller can run its optimistic rollback.

use crate::web::recipes::RecipeDto;
use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{DateTime, NaiveDate, Utc};
use foodmatch_core::domain::{FavoriteEntry, HistoryEntry, UserProfile};
use foodmatch_core::profile::ProfileError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// The request payload for creating a profile. Issued by the identity
/// provider's post-registration hook, not by end users directly.
#[derive(Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub uid: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Serialize, ToSchema)]
pub struct FavoriteEntryDto {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub description: String,
    pub saved_at: NaiveDate,
}

impl From<FavoriteEntry> for FavoriteEntryDto {
    fn from(entry: FavoriteEntry) -> Self {
        Self {
            id: entry.id,
            title: entry.title,
            image_url: entry.image_url,
            description: entry.description,
            saved_at: entry.saved_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct HistoryEntryDto {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub description: String,
    pub date: NaiveDate,
}

impl From<HistoryEntry> for HistoryEntryDto {
    fn from(entry: HistoryEntry) -> Self {
        Self {
            id: entry.id,
            title: entry.title,
            image_url: entry.image_url,
            description: entry.description,
            date: entry.date,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct UserProfileDto {
    pub uid: String,
    pub email: String,
    pub name: String,
    pub favorites: Vec<FavoriteEntryDto>,
    pub histories: Vec<HistoryEntryDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserProfile> for UserProfileDto {
    fn from(profile: UserProfile) -> Self {
        Self {
            uid: profile.uid,
            email: profile.email,
            name: profile.name,
            favorites: profile.favorites.into_iter().map(Into::into).collect(),
            histories: profile.histories.into_iter().map(Into::into).collect(),
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

/// Maps profile failures onto HTTP statuses. Store failures are logged with
/// their cause and answered opaquely.
fn profile_error_response(err: ProfileError) -> (StatusCode, String) {
    match err {
        ProfileError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
        ProfileError::AlreadyExists(uid) => (
            StatusCode::CONFLICT,
            format!("Profile already exists for uid {uid}"),
        ),
        ProfileError::Persistence(cause) => {
            error!("profile operation failed: {cause}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Profile update failed".to_string(),
            )
        }
    }
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Create the profile document for a freshly registered user.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Profile created", body = UserProfileDto),
        (status = 400, description = "Missing uid"),
        (status = 409, description = "A profile already exists for this uid")
    )
)]
pub async fn create_user_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let profile = app_state
        .profiles
        .create_profile(&request.uid, &request.email, &request.name)
        .await
        .map_err(profile_error_response)?;
    Ok((StatusCode::CREATED, Json(UserProfileDto::from(profile))))
}

/// Fetch a user's profile.
#[utoipa::path(
    get,
    path = "/users/{uid}",
    params(("uid" = String, Path, description = "The user id")),
    responses(
        (status = 200, description = "The profile", body = UserProfileDto),
        (status = 404, description = "No profile document for this uid")
    )
)]
pub async fn get_user_handler(
    State(app_state): State<Arc<AppState>>,
    Path(uid): Path<String>,
) -> Result<Json<UserProfileDto>, (StatusCode, String)> {
    let profile = app_state
        .profiles
        .get_profile(&uid)
        .await
        .map_err(profile_error_response)?;

    match profile {
        Some(profile) => Ok(Json(UserProfileDto::from(profile))),
        None => Err((StatusCode::NOT_FOUND, format!("No profile for uid {uid}"))),
    }
}

/// Save a recipe as a favorite. Re-saving an already favorited recipe moves
/// it to the front with a fresh date instead of duplicating it.
#[utoipa::path(
    put,
    path = "/users/{uid}/favorites",
    params(("uid" = String, Path, description = "The user id")),
    request_body = RecipeDto,
    responses(
        (status = 200, description = "The new favorites sequence", body = [FavoriteEntryDto])
    )
)]
pub async fn upsert_favorite_handler(
    State(app_state): State<Arc<AppState>>,
    Path(uid): Path<String>,
    Json(recipe): Json<RecipeDto>,
) -> Result<Json<Vec<FavoriteEntryDto>>, (StatusCode, String)> {
    let favorites = app_state
        .profiles
        .upsert_favorite(&uid, &recipe.into_domain())
        .await
        .map_err(profile_error_response)?;
    Ok(Json(favorites.into_iter().map(Into::into).collect()))
}

/// Remove a favorite. Removing an id that is not favorited succeeds as a
/// no-op.
#[utoipa::path(
    delete,
    path = "/users/{uid}/favorites/{recipe_id}",
    params(
        ("uid" = String, Path, description = "The user id"),
        ("recipe_id" = String, Path, description = "The recipe id to remove")
    ),
    responses(
        (status = 200, description = "The new favorites sequence", body = [FavoriteEntryDto])
    )
)]
pub async fn remove_favorite_handler(
    State(app_state): State<Arc<AppState>>,
    Path((uid, recipe_id)): Path<(String, String)>,
) -> Result<Json<Vec<FavoriteEntryDto>>, (StatusCode, String)> {
    let favorites = app_state
        .profiles
        .remove_favorite(&uid, &recipe_id)
        .await
        .map_err(profile_error_response)?;
    Ok(Json(favorites.into_iter().map(Into::into).collect()))
}

/// Record that the user cooked a recipe. At most one history row is written
/// per recipe and day: a second report on the same day leaves the sequence
/// untouched, while a report on a later day moves the entry to the front.
#[utoipa::path(
    post,
    path = "/users/{uid}/histories",
    params(("uid" = String, Path, description = "The user id")),
    request_body = RecipeDto,
    responses(
        (status = 200, description = "The new histories sequence", body = [HistoryEntryDto])
    )
)]
pub async fn add_history_handler(
    State(app_state): State<Arc<AppState>>,
    Path(uid): Path<String>,
    Json(recipe): Json<RecipeDto>,
) -> Result<Json<Vec<HistoryEntryDto>>, (StatusCode, String)> {
    let recipe = recipe.into_domain();

    // The store's contract is move-to-front; suppressing the write when the
    // same recipe was already recorded today is this call site's job.
    let existing = app_state
        .profiles
        .get_profile(&uid)
        .await
        .map_err(profile_error_response)?;
    if let Some(profile) = existing {
        let today = Utc::now().date_naive();
        if already_recorded_on(&profile.histories, &recipe.id, today) {
            return Ok(Json(
                profile.histories.into_iter().map(Into::into).collect(),
            ));
        }
    }

    let histories = app_state
        .profiles
        .add_history_entry(&uid, &recipe)
        .await
        .map_err(profile_error_response)?;
    Ok(Json(histories.into_iter().map(Into::into).collect()))
}

/// Whether `histories` already holds `recipe_id` dated `day`.
fn already_recorded_on(histories: &[HistoryEntry], recipe_id: &str, day: NaiveDate) -> bool {
    histories
        .iter()
        .any(|entry| entry.id == recipe_id && entry.date == day)
}
