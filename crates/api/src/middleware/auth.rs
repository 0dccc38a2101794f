//! Bearer token extractor.
//!
//! Routes that require authentication take [`RequireToken`] as an argument;
//! routes that don't simply omit it. That makes authentication a per-route
//! capability visible in each handler's signature instead of a blanket
//! layer.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::AppError;
use crate::services::auth::Claims;
use crate::state::AppState;

/// Extractor that requires a valid bearer credential.
///
/// A missing `Authorization` header, a non-Bearer scheme, and an invalid or
/// expired token all reject with 403.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireToken(claims): RequireToken,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", claims.email)
/// }
/// ```
pub struct RequireToken(pub Claims);

impl<S> FromRequestParts<S> for RequireToken
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Forbidden("Missing Authorization header".to_string()))?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Forbidden("Authorization header must be a Bearer token".to_string())
        })?;

        let state = AppState::from_ref(state);
        let claims = state
            .tokens()
            .verify(token)
            .map_err(|_| AppError::Forbidden("Invalid or expired token".to_string()))?;

        Ok(Self(claims))
    }
}
