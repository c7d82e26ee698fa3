//! Authenticated actor claims
//!
//! Identity and session management live in an external service; this server
//! only validates the bearer JWT it issues and reads the claims.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// JWT claims for an authenticated renter or owner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenterClaims {
    /// Email address of the actor
    pub sub: String,
    /// Display name
    pub name: Option<String>,
    /// Whether the actor manages branches and offices
    pub owner: bool,
    pub exp: i64,
    pub iat: i64,
}

impl RenterClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    pub fn email(&self) -> &str {
        &self.sub
    }

    pub fn require_owner(&self) -> Result<(), AppError> {
        if self.owner {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Only office owners may manage branches, offices and memberships".to_string(),
            ))
        }
    }
}
