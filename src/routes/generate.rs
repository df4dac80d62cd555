//! Recipe generation route.

use crate::error::Result;
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/generate-recipe", post(generate_recipe))
}

/// Forward the request payload to the generation worker and return its
/// output verbatim.
///
/// The payload usually carries `preference` for a fresh recommendation,
/// or `get_details` + `recipe_name` for ingredients and instructions,
/// but this tier does not interpret it; the worker owns the schema.
async fn generate_recipe(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>> {
    tracing::debug!("Forwarding generation request to worker");

    let result = state.generator.generate(&payload).await?;

    Ok(Json(result))
}
