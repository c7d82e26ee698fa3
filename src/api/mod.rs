//! API handlers for Deskhive REST endpoints

pub mod bookings;
pub mod branches;
pub mod health;
pub mod memberships;
pub mod offices;
pub mod openapi;
pub mod webhooks;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{error::AppError, models::user::RenterClaims, AppState};

/// Extractor for the authenticated actor from a bearer JWT
pub struct AuthenticatedRenter(pub RenterClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedRenter {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // Get the Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        // Check for Bearer token
        if !auth_header.starts_with("Bearer ") {
            return Err(AppError::Authentication(
                "Invalid authorization header format".to_string(),
            ));
        }

        let token = &auth_header[7..];

        // Validate JWT token using the secret from configuration
        let claims = RenterClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedRenter(claims))
    }
}
