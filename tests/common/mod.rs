use jsonwebtoken::{encode, Algorithm, DecodingKey, EncodingKey, Header};
use recipe_recommender::config::Config;
use recipe_recommender::db::FirestoreDb;
use recipe_recommender::routes::create_router;
use recipe_recommender::services::{FirebaseAuthVerifier, GeneratorService};
use recipe_recommender::AppState;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

pub const TEST_KID: &str = "test-kid";
pub const TEST_SECRET: &[u8] = b"test-secret";

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create a test app with offline mock dependencies and a worker stub
/// that echoes stdin back to stdout.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_worker("cat")
}

/// Create a test app whose generation worker runs the given shell
/// script (stdin carries the request payload).
#[allow(dead_code)]
pub fn create_test_app_with_worker(script: &str) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = test_db_offline();

    let generator = GeneratorService::new(
        "sh",
        vec!["-c".to_string(), script.to_string()],
        Duration::from_secs(5),
        config.max_concurrent_generations,
    );

    let auth_verifier = Arc::new(
        FirebaseAuthVerifier::new_with_static_key(
            &config.firebase_project_id,
            TEST_KID,
            DecodingKey::from_secret(TEST_SECRET),
            Algorithm::HS256,
        )
        .expect("Failed to build static verifier"),
    );

    let state = Arc::new(AppState {
        config,
        db,
        generator,
        auth_verifier,
    });

    (create_router(state.clone()), state)
}

#[derive(Serialize)]
struct TestClaims {
    sub: String,
    iss: String,
    aud: String,
    exp: usize,
    iat: usize,
}

/// Mint an ID token the static-key verifier accepts.
#[allow(dead_code)]
pub fn create_test_token(uid: &str) -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    let claims = TestClaims {
        sub: uid.to_string(),
        iss: "https://securetoken.google.com/test-project".to_string(),
        aud: "test-project".to_string(),
        exp: now + 3600,
        iat: now,
    };

    let mut header = Header::new(Algorithm::HS256);
    header.kid = Some(TEST_KID.to_string());
    encode(&header, &claims, &EncodingKey::from_secret(TEST_SECRET)).unwrap()
}
