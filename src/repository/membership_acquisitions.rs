//! Memberships and acquisitions repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::booking::PaymentRecord,
    models::membership::{AcquisitionRow, Membership, MembershipAcquisition},
};

#[derive(Clone)]
pub struct MembershipAcquisitionsRepository {
    pool: Pool<Postgres>,
}

impl MembershipAcquisitionsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // ---- Memberships ----

    /// Get membership by ID
    pub async fn get_membership(&self, id: Uuid) -> AppResult<Membership> {
        sqlx::query_as::<_, Membership>("SELECT * FROM memberships WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::MembershipNotFound(id))
    }

    /// Create a new membership
    pub async fn create_membership(&self, membership: &Membership) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO memberships (id, branch_id, name, price, access_days, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(membership.id)
        .bind(membership.branch_id)
        .bind(&membership.name)
        .bind(membership.price)
        .bind(&membership.access_days)
        .bind(membership.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    // ---- Acquisitions ----

    /// Get acquisition by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<MembershipAcquisition> {
        self.find_by_id(id)
            .await?
            .ok_or(AppError::MembershipAcquisitionNotFound(id))
    }

    /// Get acquisition by ID, if present
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MembershipAcquisition>> {
        let row = sqlx::query_as::<_, AcquisitionRow>(
            "SELECT * FROM membership_acquisitions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(MembershipAcquisition::from))
    }

    /// Store a new acquisition
    pub async fn create(&self, acquisition: &MembershipAcquisition) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO membership_acquisitions (
                id, membership_id, buyer_email, status, access_days, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(acquisition.id)
        .bind(acquisition.membership_id)
        .bind(&acquisition.buyer_email)
        .bind(i16::from(acquisition.status))
        .bind(&acquisition.access_days)
        .bind(acquisition.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Attach a settlement record and mark a pending acquisition bought.
    ///
    /// Returns false when the acquisition was already bought (or is gone);
    /// nothing is written in that case.
    pub async fn confirm(&self, id: Uuid, record: &PaymentRecord) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE membership_acquisitions
            SET status = 1,
                payment_id = $1,
                payment_gross_amount = $2,
                payment_fee_amount = $3,
                payment_currency = $4,
                payment_method = $5
            WHERE id = $6 AND status = 0
            "#,
        )
        .bind(&record.external_payment_id)
        .bind(record.gross_amount)
        .bind(record.fee_amount)
        .bind(&record.currency_id)
        .bind(&record.payment_method_id)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
