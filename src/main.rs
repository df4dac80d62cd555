//! Recipe Recommender API Server
//!
//! Bridges recipe generation requests to an external worker process and
//! stores user profiles, favorites, cooking history, and saved recipes
//! in Firestore.

use recipe_recommender::{
    config::Config,
    db::FirestoreDb,
    services::{FirebaseAuthVerifier, GeneratorService},
    AppState,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Recipe Recommender API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.firebase_project_id)
        .await
        .expect("Failed to connect to Firestore");

    // Initialize generation worker bridge
    let generator = GeneratorService::new(
        config.worker_program.clone(),
        config.worker_args.clone(),
        Duration::from_secs(config.worker_timeout_secs),
        config.max_concurrent_generations,
    );
    tracing::info!(
        program = %config.worker_program,
        max_concurrent = config.max_concurrent_generations,
        "Generation worker bridge initialized"
    );

    // Initialize Firebase ID token verifier
    let auth_verifier = Arc::new(
        FirebaseAuthVerifier::new(&config.firebase_project_id)
            .expect("Failed to initialize token verifier"),
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        generator,
        auth_verifier,
    });

    // Build router
    let app = recipe_recommender::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("recipe_recommender=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
