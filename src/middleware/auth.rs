//! Bearer-token authentication middleware.
//!
//! Extracts the Firebase ID token from the Authorization header and
//! verifies it; the resulting uid is the only identity handlers trust.
//! A uid supplied in a path or body is checked against it, never
//! believed on its own.

use crate::services::firebase_auth::AuthError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Authenticated user extracted from a verified ID token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub uid: String,
}

/// Middleware that requires a valid Firebase ID token.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(h) if h.starts_with("Bearer ") => &h[7..],
        _ => return Err(StatusCode::UNAUTHORIZED),
    };

    let verified = state
        .auth_verifier
        .verify_id_token(token)
        .await
        .map_err(|e| match e {
            AuthError::Rejected(reason) => {
                tracing::debug!(reason = %reason, "Rejected bearer token");
                StatusCode::UNAUTHORIZED
            }
            AuthError::Transient(reason) => {
                tracing::error!(reason = %reason, "Token verification unavailable");
                StatusCode::SERVICE_UNAVAILABLE
            }
        })?;

    let auth_user = AuthUser { uid: verified.uid };
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}
