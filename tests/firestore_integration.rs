//! Firestore integration tests.
//!
//! These run only against the emulator (set FIRESTORE_EMULATOR_HOST).

use recipe_recommender::models::user::ProfileUpdate;
use serde_json::json;

mod common;

fn fresh_uid() -> String {
    format!("it-{}", uuid::Uuid::new_v4())
}

#[tokio::test]
async fn missing_profile_is_none() {
    require_emulator!();
    let db = common::test_db().await;

    let profile = db.get_profile(&fresh_uid()).await.unwrap();
    assert!(profile.is_none());
}

#[tokio::test]
async fn profile_merge_creates_then_preserves_fields() {
    require_emulator!();
    let db = common::test_db().await;
    let uid = fresh_uid();

    db.merge_profile(
        &uid,
        ProfileUpdate {
            display_name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            dietary_preferences: Some("vegetarian".to_string()),
        },
    )
    .await
    .unwrap();

    // Partial update: only dietary preferences change.
    db.merge_profile(
        &uid,
        ProfileUpdate {
            dietary_preferences: Some("vegan".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let profile = db.get_profile(&uid).await.unwrap().unwrap();
    assert_eq!(profile.display_name, "Ada");
    assert_eq!(profile.email, "ada@example.com");
    assert_eq!(profile.dietary_preferences, "vegan");
    assert!(profile.created_at.is_some());
}

#[tokio::test]
async fn favoriting_twice_overwrites_not_duplicates() {
    require_emulator!();
    let db = common::test_db().await;
    let uid = fresh_uid();

    db.add_favorite(&uid, "pad-thai").await.unwrap();
    db.add_favorite(&uid, "pad-thai").await.unwrap();

    let favorites = db.list_favorites(&uid).await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].recipe_id, "pad-thai");
}

#[tokio::test]
async fn favorite_ids_with_slashes_are_stored_safely() {
    require_emulator!();
    let db = common::test_db().await;
    let uid = fresh_uid();

    db.add_favorite(&uid, "soups/tom yum").await.unwrap();

    let favorites = db.list_favorites(&uid).await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].recipe_id, "soups/tom yum");
}

#[tokio::test]
async fn cooking_history_appends_duplicates() {
    require_emulator!();
    let db = common::test_db().await;
    let uid = fresh_uid();

    db.add_history_entry(&uid, "pad-thai").await.unwrap();
    db.add_history_entry(&uid, "pad-thai").await.unwrap();

    let history = db.list_history(&uid).await.unwrap();
    assert_eq!(history.len(), 2);
    assert!(history.iter().all(|e| e.recipe_id == "pad-thai"));
}

#[tokio::test]
async fn saved_recipes_round_trip_and_delete() {
    require_emulator!();
    let db = common::test_db().await;
    let uid = fresh_uid();

    // Both payload shapes the original client produced.
    let as_text = db
        .save_recipe(&uid, json!("Just stir-fry everything"))
        .await
        .unwrap();
    let as_object = db
        .save_recipe(&uid, json!({"recipe_name": "Pad Thai", "servings": 2}))
        .await
        .unwrap();

    let recipes = db.list_saved_recipes(&uid).await.unwrap();
    assert_eq!(recipes.len(), 2);

    db.delete_saved_recipe(&uid, &as_text.id).await.unwrap();

    let recipes = db.list_saved_recipes(&uid).await.unwrap();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].id, as_object.id);
}

#[tokio::test]
async fn delete_user_data_removes_everything() {
    require_emulator!();
    let db = common::test_db().await;
    let uid = fresh_uid();

    db.merge_profile(
        &uid,
        ProfileUpdate {
            display_name: Some("Gone Soon".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    db.add_favorite(&uid, "pad-thai").await.unwrap();
    db.add_history_entry(&uid, "pad-thai").await.unwrap();
    db.save_recipe(&uid, json!("soup")).await.unwrap();

    let deleted = db.delete_user_data(&uid).await.unwrap();
    assert_eq!(deleted, 4);

    assert!(db.get_profile(&uid).await.unwrap().is_none());
    assert!(db.list_favorites(&uid).await.unwrap().is_empty());
    assert!(db.list_history(&uid).await.unwrap().is_empty());
    assert!(db.list_saved_recipes(&uid).await.unwrap().is_empty());
}
