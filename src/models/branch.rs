//! Office branch model (the business location grouping offices)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Branch model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OfficeBranch {
    pub id: Uuid,
    /// Email of the owner managing this branch
    pub owner_email: String,
    pub name: String,
    pub street: String,
    pub city: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl OfficeBranch {
    /// Human-readable location line used in notification emails
    pub fn location_line(&self) -> String {
        format!("{}, {}", self.street, self.city)
    }
}

/// Create branch request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBranch {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 1, max = 200))]
    pub street: String,
    #[validate(length(min = 1, max = 120))]
    pub city: String,
    pub phone: Option<String>,
}
