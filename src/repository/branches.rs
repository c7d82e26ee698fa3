//! Branches repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::branch::OfficeBranch,
};

#[derive(Clone)]
pub struct BranchesRepository {
    pool: Pool<Postgres>,
}

impl BranchesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get branch by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<OfficeBranch> {
        sqlx::query_as::<_, OfficeBranch>("SELECT * FROM branches WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::BranchNotFound(id))
    }

    /// Create a new branch
    pub async fn create(&self, branch: &OfficeBranch) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO branches (id, owner_email, name, street, city, phone, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(branch.id)
        .bind(&branch.owner_email)
        .bind(&branch.name)
        .bind(&branch.street)
        .bind(&branch.city)
        .bind(&branch.phone)
        .bind(branch.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
