//! Offices and inactivities repository for database operations

use chrono::{NaiveDate, Utc};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::office::{Inactivity, Office},
};

#[derive(Clone)]
pub struct OfficesRepository {
    pool: Pool<Postgres>,
}

impl OfficesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get office by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Office> {
        sqlx::query_as::<_, Office>("SELECT * FROM offices WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::OfficeNotFound(id))
    }

    /// List offices of a branch, newest first
    pub async fn list_for_branch(&self, branch_id: Uuid) -> AppResult<Vec<Office>> {
        let offices = sqlx::query_as::<_, Office>(
            "SELECT * FROM offices WHERE branch_id = $1 ORDER BY created_at DESC",
        )
        .bind(branch_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(offices)
    }

    /// Create a new office
    pub async fn create(&self, office: &Office) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO offices (id, branch_id, name, price, capacity, is_private, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(office.id)
        .bind(office.branch_id)
        .bind(&office.name)
        .bind(office.price)
        .bind(office.capacity)
        .bind(office.is_private)
        .bind(office.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Soft-delete an office as of the given effective date
    pub async fn soft_delete(&self, id: Uuid, effective_date: NaiveDate) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE offices SET deleted_at = $1, modified_at = $2 WHERE id = $3",
        )
        .bind(effective_date)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::OfficeNotFound(id));
        }
        Ok(())
    }

    // ---- Inactivities ----

    /// List inactivity rules for an office
    pub async fn list_inactivities(&self, office_id: Uuid) -> AppResult<Vec<Inactivity>> {
        let rules = sqlx::query_as::<_, Inactivity>(
            "SELECT * FROM inactivities WHERE office_id = $1 ORDER BY created_at",
        )
        .bind(office_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rules)
    }

    /// Store an inactivity rule
    pub async fn create_inactivity(&self, rule: &Inactivity) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO inactivities (id, office_id, specific_date, weekday, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(rule.id)
        .bind(rule.office_id)
        .bind(rule.specific_date)
        .bind(rule.weekday)
        .bind(rule.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Delete an inactivity rule
    pub async fn delete_inactivity(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM inactivities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::Validation(format!(
                "Inactivity {} not found",
                id
            )));
        }
        Ok(())
    }
}
