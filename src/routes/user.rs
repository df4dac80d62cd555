//! Per-user routes: profile, favorites, cooking history, saved recipes.
//!
//! Every route here sits behind the auth middleware. The authenticated
//! uid is the only identity used for storage; uids appearing in request
//! paths or bodies must match it.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::user::ProfileUpdate;
use crate::models::{CookingHistoryEntry, Favorite, SavedRecipe, UserProfile};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const MAX_RECIPE_ID_LEN: usize = 200;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/user/profile", post(update_profile))
        .route("/api/user/profile/{uid}", get(get_profile))
        .route(
            "/api/user/favorites",
            get(list_favorites).post(add_favorite),
        )
        .route(
            "/api/user/cooking-history",
            get(list_cooking_history).post(add_cooking_history),
        )
        .route("/api/user/recipes", get(list_recipes).post(save_recipe))
        .route("/api/user/recipes/{id}", delete(delete_recipe))
        .route("/api/user/account", delete(delete_account))
}

/// Generic acknowledgement body, matching the original API's
/// `{message}` responses.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn message(text: &str) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: text.to_string(),
    })
}

/// Reject a request whose body names a different user than the token.
fn check_uid(body_uid: Option<&str>, user: &AuthUser) -> Result<()> {
    match body_uid {
        Some(uid) if uid != user.uid => Err(AppError::Forbidden),
        _ => Ok(()),
    }
}

fn validate_recipe_id(recipe_id: &str) -> Result<()> {
    if recipe_id.trim().is_empty() {
        return Err(AppError::BadRequest("recipeId must not be empty".to_string()));
    }
    if recipe_id.len() > MAX_RECIPE_ID_LEN {
        return Err(AppError::BadRequest(format!(
            "recipeId must be at most {} characters",
            MAX_RECIPE_ID_LEN
        )));
    }
    Ok(())
}

// ─── Profile ─────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProfileRequest {
    /// Accepted for wire compatibility with the original client, but
    /// only as a cross-check against the authenticated uid.
    uid: Option<String>,
    #[serde(flatten)]
    update: ProfileUpdate,
}

/// Merge profile fields into the user's document, creating it if absent.
async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<MessageResponse>> {
    check_uid(body.uid.as_deref(), &user)?;

    state.db.merge_profile(&user.uid, body.update).await?;

    tracing::info!(uid = %user.uid, "Profile updated");

    Ok(message("Profile updated successfully"))
}

/// Fetch a profile document; 404 if the user has never saved one.
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(uid): Path<String>,
) -> Result<Json<UserProfile>> {
    if uid != user.uid {
        return Err(AppError::Forbidden);
    }

    let profile = state
        .db
        .get_profile(&uid)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", uid)))?;

    Ok(Json(profile))
}

// ─── Favorites ───────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecipeRefRequest {
    uid: Option<String>,
    recipe_id: String,
}

/// Mark a recipe as favorite. Favoriting the same recipe id twice
/// overwrites the existing document rather than duplicating it.
async fn add_favorite(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<RecipeRefRequest>,
) -> Result<Json<MessageResponse>> {
    check_uid(body.uid.as_deref(), &user)?;
    validate_recipe_id(&body.recipe_id)?;

    state.db.add_favorite(&user.uid, &body.recipe_id).await?;

    Ok(message("Recipe added to favorites"))
}

#[derive(Serialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<Favorite>,
}

async fn list_favorites(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<FavoritesResponse>> {
    let favorites = state.db.list_favorites(&user.uid).await?;
    Ok(Json(FavoritesResponse { favorites }))
}

// ─── Cooking History ─────────────────────────────────────────

/// Append a cooking history entry. No uniqueness constraint: cooking
/// the same recipe again appends another entry.
async fn add_cooking_history(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<RecipeRefRequest>,
) -> Result<Json<MessageResponse>> {
    check_uid(body.uid.as_deref(), &user)?;
    validate_recipe_id(&body.recipe_id)?;

    state
        .db
        .add_history_entry(&user.uid, &body.recipe_id)
        .await?;

    Ok(message("Cooking history updated"))
}

#[derive(Serialize)]
pub struct CookingHistoryResponse {
    pub history: Vec<CookingHistoryEntry>,
}

async fn list_cooking_history(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<CookingHistoryResponse>> {
    let history = state.db.list_history(&user.uid).await?;
    Ok(Json(CookingHistoryResponse { history }))
}

// ─── Saved Recipes ───────────────────────────────────────────

#[derive(Deserialize)]
struct SaveRecipeRequest {
    /// Opaque recipe payload: the client has historically stored both
    /// free-text strings and structured objects here.
    recipe: serde_json::Value,
}

#[derive(Serialize)]
pub struct SaveRecipeResponse {
    pub id: String,
    pub message: String,
}

async fn save_recipe(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<SaveRecipeRequest>,
) -> Result<Json<SaveRecipeResponse>> {
    if body.recipe.is_null() {
        return Err(AppError::BadRequest("recipe must not be null".to_string()));
    }

    let saved = state.db.save_recipe(&user.uid, body.recipe).await?;

    Ok(Json(SaveRecipeResponse {
        id: saved.id,
        message: "Recipe saved".to_string(),
    }))
}

#[derive(Serialize)]
pub struct SavedRecipesResponse {
    pub recipes: Vec<SavedRecipe>,
}

async fn list_recipes(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<SavedRecipesResponse>> {
    let recipes = state.db.list_saved_recipes(&user.uid).await?;
    Ok(Json(SavedRecipesResponse { recipes }))
}

async fn delete_recipe(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    if id.trim().is_empty() {
        return Err(AppError::BadRequest("recipe id must not be empty".to_string()));
    }

    state.db.delete_saved_recipe(&user.uid, &id).await?;

    Ok(message("Recipe deleted"))
}

// ─── Account Deletion ────────────────────────────────────────

#[derive(Serialize)]
pub struct DeleteAccountResponse {
    pub deleted: usize,
    pub message: String,
}

/// Delete the user's profile and every subcollection document.
async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DeleteAccountResponse>> {
    tracing::info!(uid = %user.uid, "User-initiated account deletion");

    let deleted = state.db.delete_user_data(&user.uid).await?;

    Ok(Json(DeleteAccountResponse {
        deleted,
        message: "Account data removed".to_string(),
    }))
}
