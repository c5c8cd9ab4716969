//! Authentication middleware for session token validation
//!
//! The gate accepts the token from the `jwt` cookie, falling back to an
//! `Authorization: Bearer` header. Every verification failure (missing,
//! malformed, expired, bad signature) is answered with the same
//! Unauthorized response so callers cannot tell which check failed.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::Response,
};
use tracing::debug;
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

/// Name of the session cookie
pub const AUTH_COOKIE: &str = "jwt";

/// Authenticated caller identity, attached to request extensions
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
}

/// Read a single cookie value from the Cookie header
pub(crate) fn get_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;
    for pair in cookie_header.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        let key = parts.next()?.trim();
        let value = parts.next()?.trim();
        if key == name {
            return Some(value.to_string());
        }
    }
    None
}

/// Extract the session token from the request headers
fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = get_cookie_value(headers, AUTH_COOKIE) {
        return Some(token);
    }

    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.to_string())
}

/// Authentication middleware
///
/// On success inserts [`AuthUser`] into the request extensions for
/// downstream handlers; performs no data access itself.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(req.headers()).ok_or(ApiError::Unauthorized)?;

    let claims = state.jwt_service.validate_token(&token).map_err(|e| {
        debug!("Token validation failed: {}", e);
        ApiError::Unauthorized
    })?;

    req.extensions_mut().insert(AuthUser { id: claims.sub });

    Ok(next.run(req).await)
}
