//! Business logic services.

pub mod firebase_auth;
pub mod generator;

pub use firebase_auth::FirebaseAuthVerifier;
pub use generator::GeneratorService;
