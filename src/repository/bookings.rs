//! Bookings repository for database operations

use chrono::{DateTime, Duration, NaiveDate, Utc};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::booking::{Booking, BookingRow, PaymentRecord, TimeRange},
};

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

/// The bookings table carries a gist exclusion constraint on
/// (office_id, tstzrange(start_time, end_time)); a violation means a
/// concurrent request won the slot between our overlap check and the insert.
fn map_insert_error(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23P01") => {
            AppError::OfficeIsNotAvailable
        }
        _ => AppError::Database(e),
    }
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get booking by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Booking> {
        self.find_by_id(id)
            .await?
            .ok_or(AppError::BookingNotFound(id))
    }

    /// Get booking by ID, if present
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        let row = sqlx::query_as::<_, BookingRow>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Booking::from))
    }

    /// Store a new booking
    pub async fn create(&self, booking: &Booking) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, office_id, renter_email, start_time, end_time,
                status, billed_hours, price, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(booking.id)
        .bind(booking.office_id)
        .bind(&booking.renter_email)
        .bind(booking.start_time)
        .bind(booking.end_time)
        .bind(i16::from(booking.status))
        .bind(booking.billed_hours)
        .bind(booking.price)
        .bind(booking.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;
        Ok(())
    }

    /// Attach a settlement record and schedule a pending booking.
    ///
    /// The `status = 0` predicate is the storage-level idempotency guard:
    /// returns false when the booking was already scheduled (or is gone),
    /// in which case nothing was written.
    pub async fn confirm(&self, id: Uuid, record: &PaymentRecord) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE bookings
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

    /// All pending/scheduled bookings of an office starting on the given
    /// UTC date, ordered by start time.
    pub async fn find_for_office_on(
        &self,
        office_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Vec<Booking>> {
        let day_start = day_start_utc(date);
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT * FROM bookings
            WHERE office_id = $1
              AND start_time >= $2 AND start_time < $3
              AND status IN (0, 1)
            ORDER BY start_time
            "#,
        )
        .bind(office_id)
        .bind(day_start)
        .bind(day_start + Duration::days(1))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Booking::from).collect())
    }

    /// Pending/scheduled bookings of an office overlapping the given range
    pub async fn find_overlapping(
        &self,
        office_id: Uuid,
        range: &TimeRange,
    ) -> AppResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT * FROM bookings
            WHERE office_id = $1
              AND start_time < $3 AND end_time > $2
              AND status IN (0, 1)
            ORDER BY start_time
            "#,
        )
        .bind(office_id)
        .bind(range.start_time)
        .bind(range.end_time)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Booking::from).collect())
    }

    /// Paged bookings of a renter; `only_current` keeps bookings that have
    /// not ended yet as of `now`.
    pub async fn list_for_renter(
        &self,
        renter_email: &str,
        only_current: bool,
        now: DateTime<Utc>,
        offset: i64,
        limit: i64,
    ) -> AppResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT * FROM bookings
            WHERE renter_email = $1
              AND (NOT $2 OR end_time > $3)
            ORDER BY start_time
            OFFSET $4 LIMIT $5
            "#,
        )
        .bind(renter_email)
        .bind(only_current)
        .bind(now)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Booking::from).collect())
    }

    /// Count bookings of a renter under the same filter as `list_for_renter`
    pub async fn count_for_renter(
        &self,
        renter_email: &str,
        only_current: bool,
        now: DateTime<Utc>,
    ) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM bookings
            WHERE renter_email = $1
              AND (NOT $2 OR end_time > $3)
            "#,
        )
        .bind(renter_email)
        .bind(only_current)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Whether the renter ever booked the office
    pub async fn exists(&self, renter_email: &str, office_id: Uuid) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM bookings WHERE renter_email = $1 AND office_id = $2)",
        )
        .bind(renter_email)
        .bind(office_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}

fn day_start_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0).unwrap().and_utc()
}
