//! Recipe Recommender: backend API for AI-assisted recipe suggestions.
//!
//! This crate provides the HTTP tier that bridges recipe generation
//! requests to an external worker process and persists user profiles,
//! favorites, cooking history, and saved recipes in Firestore.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use config::Config;
use db::FirestoreDb;
use services::{FirebaseAuthVerifier, GeneratorService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub generator: GeneratorService,
    pub auth_verifier: Arc<FirebaseAuthVerifier>,
}
