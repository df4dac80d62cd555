//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// Firebase / GCP project ID (Firestore + ID token audience)
    pub firebase_project_id: String,
    /// Program used to run the generation worker (e.g. `python3`)
    pub worker_program: String,
    /// Arguments passed to the worker program (script path etc.)
    pub worker_args: Vec<String>,
    /// Seconds to wait for a worker before killing it
    pub worker_timeout_secs: u64,
    /// Upper bound on concurrently running worker processes
    pub max_concurrent_generations: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            // The original Express server defaulted to port 5001.
            port: env::var("PORT")
                .unwrap_or_else(|_| "5001".to_string())
                .parse()
                .unwrap_or(5001),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            firebase_project_id: env::var("FIREBASE_PROJECT_ID")
                .map_err(|_| ConfigError::Missing("FIREBASE_PROJECT_ID"))?,
            worker_program: env::var("WORKER_PROGRAM")
                .unwrap_or_else(|_| "python3".to_string()),
            worker_args: vec![env::var("WORKER_SCRIPT")
                .unwrap_or_else(|_| "ai/generateRecipe.py".to_string())],
            worker_timeout_secs: env::var("WORKER_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap_or(60),
            max_concurrent_generations: env::var("MAX_CONCURRENT_GENERATIONS")
                .unwrap_or_else(|_| "8".to_string())
                .parse()
                .unwrap_or(8),
        })
    }

    /// Default config for tests only.
    pub fn test_default() -> Self {
        Self {
            port: 5001,
            frontend_url: "http://localhost:3000".to_string(),
            firebase_project_id: "test-project".to_string(),
            worker_program: "sh".to_string(),
            worker_args: vec!["-c".to_string(), "cat".to_string()],
            worker_timeout_secs: 5,
            max_concurrent_generations: 2,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
