//! Registration and login route handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Credentials payload for registration and login.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl CredentialsRequest {
    fn validate(self) -> Result<(String, String)> {
        let email = self
            .email
            .ok_or_else(|| AppError::Validation("Missing required field: email".to_string()))?;
        let password = self
            .password
            .ok_or_else(|| AppError::Validation("Missing required field: password".to_string()))?;

        Ok((email, password))
    }
}

/// Register a new user. Duplicate emails are rejected with 409.
#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    let (email, password) = payload.validate()?;

    let user = AuthService::new(state.db())
        .register(&email, &password)
        .await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "User created",
            "user": user.email,
        })),
    ))
}

/// Login with email and password. Success returns a bearer token with a
/// one-hour expiry; any credential failure is 401 and no token is issued.
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<Value>> {
    let (email, password) = payload.validate()?;

    let user = AuthService::new(state.db()).login(&email, &password).await?;

    let token = state.tokens().issue(&user.id, &user.email)?;

    Ok(Json(json!({ "token": token })))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_email_and_password() {
        let request: CredentialsRequest =
            serde_json::from_value(json!({ "email": "roger@roger.com" })).unwrap();
        assert!(matches!(
            request.validate(),
            Err(AppError::Validation(_))
        ));

        let request: CredentialsRequest =
            serde_json::from_value(json!({ "password": "rosebud123" })).unwrap();
        assert!(matches!(
            request.validate(),
            Err(AppError::Validation(_))
        ));

        let request: CredentialsRequest = serde_json::from_value(json!({
            "email": "roger@roger.com",
            "password": "rosebud123",
        }))
        .unwrap();
        assert!(request.validate().is_ok());
    }
}
