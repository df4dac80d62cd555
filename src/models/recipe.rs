//! Per-user recipe records: favorites, cooking history, saved recipes.

use serde::{Deserialize, Serialize};

/// Favorite recipe marker stored in `users/{uid}/favorites/{recipeId}`.
///
/// The document id is derived from the recipe id, so favoriting the
/// same recipe twice overwrites rather than duplicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub recipe_id: String,
    /// When the recipe was favorited (RFC3339)
    pub added_at: String,
}

/// Append-only cooking log entry in `users/{uid}/cookingHistory`.
///
/// Cooking the same recipe repeatedly produces multiple entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookingHistoryEntry {
    /// Document id (uuid)
    pub id: String,
    pub recipe_id: String,
    /// When the recipe was cooked (RFC3339)
    pub cooked_at: String,
}

/// Saved recipe in `users/{uid}/recipes`.
///
/// The `recipe` payload is opaque: the original client stored either a
/// free-text string or a structured object with a `recipe_name` field,
/// and this tier never interprets it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecipe {
    /// Document id (uuid)
    pub id: String,
    pub recipe: serde_json::Value,
    /// When the recipe was saved (RFC3339)
    pub created_at: String,
}
