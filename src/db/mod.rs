//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    /// Subcollection of `users/{uid}`: favorites keyed by recipe id
    pub const FAVORITES: &str = "favorites";
    /// Subcollection of `users/{uid}`: append-only cooking log
    pub const COOKING_HISTORY: &str = "cookingHistory";
    /// Subcollection of `users/{uid}`: saved recipe payloads
    pub const RECIPES: &str = "recipes";
}
