//! Data models stored in Firestore and returned by the API.

pub mod recipe;
pub mod user;

pub use recipe::{CookingHistoryEntry, Favorite, SavedRecipe};
pub use user::UserProfile;
