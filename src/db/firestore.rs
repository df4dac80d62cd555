//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - User profiles (`users/{uid}`)
//! - Favorites (`users/{uid}/favorites`)
//! - Cooking history (`users/{uid}/cookingHistory`)
//! - Saved recipes (`users/{uid}/recipes`)

use crate::db::collections;
use crate::error::AppError;
use crate::models::user::ProfileUpdate;
use crate::models::{CookingHistoryEntry, Favorite, SavedRecipe, UserProfile};
use futures_util::{stream, StreamExt};

const MAX_CONCURRENT_DB_OPS: usize = 20;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated
        // connection to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    /// Parent path for a user's subcollections.
    fn user_path(&self, uid: &str) -> Result<firestore::ParentPathBuilder, AppError> {
        self.get_client()?
            .parent_path(collections::USERS, uid)
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Profile Operations ──────────────────────────────────────

    /// Get a user's profile document.
    pub async fn get_profile(&self, uid: &str) -> Result<Option<UserProfile>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(uid)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Merge an update into a user's profile, creating the document if
    /// absent. Returns the stored profile.
    pub async fn merge_profile(
        &self,
        uid: &str,
        update: ProfileUpdate,
    ) -> Result<UserProfile, AppError> {
        // Fetch-modify-write to preserve fields the request left out.
        let mut profile = self.get_profile(uid).await?.unwrap_or_default();
        let now = chrono::Utc::now().to_rfc3339();
        profile.merge(update, &now);

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(uid)
            .object(&profile)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(profile)
    }

    // ─── Favorite Operations ─────────────────────────────────────

    /// Mark a recipe as a favorite.
    ///
    /// The document id is the percent-encoded recipe id, so repeated
    /// favoriting of the same recipe overwrites the existing document.
    pub async fn add_favorite(&self, uid: &str, recipe_id: &str) -> Result<Favorite, AppError> {
        let favorite = Favorite {
            recipe_id: recipe_id.to_string(),
            added_at: chrono::Utc::now().to_rfc3339(),
        };

        let doc_id = urlencoding::encode(recipe_id).into_owned();
        let parent = self.user_path(uid)?;

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::FAVORITES)
            .document_id(&doc_id)
            .parent(&parent)
            .object(&favorite)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(favorite)
    }

    /// List all favorites for a user.
    pub async fn list_favorites(&self, uid: &str) -> Result<Vec<Favorite>, AppError> {
        let parent = self.user_path(uid)?;

        self.get_client()?
            .fluent()
            .select()
            .from(collections::FAVORITES)
            .parent(&parent)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Cooking History Operations ──────────────────────────────

    /// Append a cooking history entry. Duplicate recipe ids are legal:
    /// a user may cook the same recipe repeatedly.
    pub async fn add_history_entry(
        &self,
        uid: &str,
        recipe_id: &str,
    ) -> Result<CookingHistoryEntry, AppError> {
        let entry = CookingHistoryEntry {
            id: uuid::Uuid::new_v4().to_string(),
            recipe_id: recipe_id.to_string(),
            cooked_at: chrono::Utc::now().to_rfc3339(),
        };

        let parent = self.user_path(uid)?;

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::COOKING_HISTORY)
            .document_id(&entry.id)
            .parent(&parent)
            .object(&entry)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(entry)
    }

    /// List a user's cooking history, newest first.
    pub async fn list_history(&self, uid: &str) -> Result<Vec<CookingHistoryEntry>, AppError> {
        let parent = self.user_path(uid)?;

        self.get_client()?
            .fluent()
            .select()
            .from(collections::COOKING_HISTORY)
            .parent(&parent)
            .order_by([(
                "cookedAt",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Saved Recipe Operations ─────────────────────────────────

    /// Save an opaque recipe payload. Returns the stored record with
    /// its generated document id.
    pub async fn save_recipe(
        &self,
        uid: &str,
        recipe: serde_json::Value,
    ) -> Result<SavedRecipe, AppError> {
        let saved = SavedRecipe {
            id: uuid::Uuid::new_v4().to_string(),
            recipe,
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        let parent = self.user_path(uid)?;

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::RECIPES)
            .document_id(&saved.id)
            .parent(&parent)
            .object(&saved)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(saved)
    }

    /// List a user's saved recipes.
    pub async fn list_saved_recipes(&self, uid: &str) -> Result<Vec<SavedRecipe>, AppError> {
        let parent = self.user_path(uid)?;

        self.get_client()?
            .fluent()
            .select()
            .from(collections::RECIPES)
            .parent(&parent)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a saved recipe by document id.
    pub async fn delete_saved_recipe(&self, uid: &str, recipe_doc_id: &str) -> Result<(), AppError> {
        let parent = self.user_path(uid)?;

        self.get_client()?
            .fluent()
            .delete()
            .from(collections::RECIPES)
            .parent(&parent)
            .document_id(recipe_doc_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── User Data Deletion ──────────────────────────────────────

    /// Delete ALL data for a user: every subcollection document plus the
    /// profile itself. Returns the number of documents deleted.
    pub async fn delete_user_data(&self, uid: &str) -> Result<usize, AppError> {
        let mut deleted_count = 0;

        let favorites = self.list_favorites(uid).await?;
        let favorite_ids: Vec<String> = favorites
            .iter()
            .map(|f| urlencoding::encode(&f.recipe_id).into_owned())
            .collect();
        deleted_count += self
            .delete_from_subcollection(uid, collections::FAVORITES, &favorite_ids)
            .await?;

        let history = self.list_history(uid).await?;
        let history_ids: Vec<String> = history.into_iter().map(|e| e.id).collect();
        deleted_count += self
            .delete_from_subcollection(uid, collections::COOKING_HISTORY, &history_ids)
            .await?;

        let recipes = self.list_saved_recipes(uid).await?;
        let recipe_ids: Vec<String> = recipes.into_iter().map(|r| r.id).collect();
        deleted_count += self
            .delete_from_subcollection(uid, collections::RECIPES, &recipe_ids)
            .await?;

        // Profile document last, so a failure above leaves the account
        // discoverable for a retried deletion.
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::USERS)
            .document_id(uid)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        deleted_count += 1;

        tracing::info!(uid, deleted_count, "User data deletion complete");

        Ok(deleted_count)
    }

    /// Delete documents from one of a user's subcollections with bounded
    /// concurrency.
    async fn delete_from_subcollection(
        &self,
        uid: &str,
        collection: &str,
        doc_ids: &[String],
    ) -> Result<usize, AppError> {
        let client = self.get_client()?;
        let parent = self.user_path(uid)?;

        let parent = &parent;
        stream::iter(doc_ids.iter().cloned())
            .map(|doc_id| async move {
                client
                    .fluent()
                    .delete()
                    .from(collection)
                    .parent(parent)
                    .document_id(&doc_id)
                    .execute()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))
            })
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<(), AppError>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<()>, AppError>>()?;

        tracing::debug!(uid, collection, count = doc_ids.len(), "Deleted documents");

        Ok(doc_ids.len())
    }
}
