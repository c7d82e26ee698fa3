//! Booking model and schedule types

use chrono::{DateTime, Timelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Booking status (stored as SMALLINT)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[repr(i16)]
pub enum BookingStatus {
    /// Created by the direct strategy, awaiting gateway confirmation
    Pending = 0,
    /// Confirmed; terminal
    Scheduled = 1,
}

impl From<i16> for BookingStatus {
    fn from(v: i16) -> Self {
        match v {
            1 => BookingStatus::Scheduled,
            _ => BookingStatus::Pending,
        }
    }
}

impl From<BookingStatus> for i16 {
    fn from(s: BookingStatus) -> Self {
        s as i16
    }
}

/// A requested reservation time range
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct ScheduleInfo {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl ScheduleInfo {
    /// Both timestamps must land on exact hour boundaries and the range
    /// must be non-empty.
    pub fn validate(&self) -> AppResult<()> {
        if !on_hour_boundary(&self.start_time) || !on_hour_boundary(&self.end_time) {
            return Err(AppError::InvalidScheduleTime(
                "Booking times must fall on exact hour boundaries".to_string(),
            ));
        }
        if self.end_time <= self.start_time {
            return Err(AppError::InvalidScheduleTime(
                "Booking end must be after its start".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of billed hours; valid only after `validate`
    pub fn hours(&self) -> i64 {
        (self.end_time - self.start_time).num_hours()
    }

    pub fn range(&self) -> TimeRange {
        TimeRange {
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

fn on_hour_boundary(t: &DateTime<Utc>) -> bool {
    t.minute() == 0 && t.second() == 0 && t.nanosecond() == 0
}

/// A half-open `[start, end)` occupied interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct TimeRange {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl TimeRange {
    /// Two ranges overlap unless one ends at or before the other starts
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start_time < other.end_time && other.start_time < self.end_time
    }
}

/// Gateway truth captured when a payment is approved; immutable once attached
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentRecord {
    /// Payment id on the gateway side
    pub external_payment_id: String,
    pub gross_amount: Decimal,
    pub fee_amount: Decimal,
    pub currency_id: String,
    pub payment_method_id: String,
}

/// Booking model
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Booking {
    pub id: Uuid,
    pub office_id: Uuid,
    pub renter_email: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: BookingStatus,
    pub billed_hours: i32,
    pub price: Decimal,
    pub payment: Option<PaymentRecord>,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Direct booking: priced per hour at the office's current rate,
    /// created pending until the gateway confirms payment.
    pub fn direct(
        office_id: Uuid,
        renter_email: &str,
        schedule: ScheduleInfo,
        hourly_price: Decimal,
    ) -> AppResult<Self> {
        schedule.validate()?;
        let hours = schedule.hours();
        Ok(Self {
            id: Uuid::new_v4(),
            office_id,
            renter_email: renter_email.to_string(),
            start_time: schedule.start_time,
            end_time: schedule.end_time,
            status: BookingStatus::Pending,
            billed_hours: hours as i32,
            price: hourly_price * Decimal::from(hours),
            payment: None,
            created_at: Utc::now(),
        })
    }

    /// Membership-backed booking: already paid for through the membership,
    /// so it carries zero price and is scheduled immediately.
    pub fn membership_backed(
        office_id: Uuid,
        renter_email: &str,
        schedule: ScheduleInfo,
    ) -> AppResult<Self> {
        schedule.validate()?;
        let hours = schedule.hours();
        Ok(Self {
            id: Uuid::new_v4(),
            office_id,
            renter_email: renter_email.to_string(),
            start_time: schedule.start_time,
            end_time: schedule.end_time,
            status: BookingStatus::Scheduled,
            billed_hours: hours as i32,
            price: Decimal::ZERO,
            payment: None,
            created_at: Utc::now(),
        })
    }

    /// Attach the settlement record and schedule the booking. The entity is
    /// a passive holder here; the reconciliation resolver guards against
    /// double application.
    pub fn attach_payment(&mut self, record: PaymentRecord) {
        self.payment = Some(record);
        self.status = BookingStatus::Scheduled;
    }

    pub fn range(&self) -> TimeRange {
        TimeRange {
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

/// Internal row structure for database queries
#[derive(Debug, Clone, FromRow)]
pub struct BookingRow {
    pub id: Uuid,
    pub office_id: Uuid,
    pub renter_email: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: i16,
    pub billed_hours: i32,
    pub price: Decimal,
    pub payment_id: Option<String>,
    pub payment_gross_amount: Option<Decimal>,
    pub payment_fee_amount: Option<Decimal>,
    pub payment_currency: Option<String>,
    pub payment_method: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        let payment = row.payment_id.map(|external_payment_id| PaymentRecord {
            external_payment_id,
            gross_amount: row.payment_gross_amount.unwrap_or_default(),
            fee_amount: row.payment_fee_amount.unwrap_or_default(),
            currency_id: row.payment_currency.unwrap_or_default(),
            payment_method_id: row.payment_method.unwrap_or_default(),
        });
        Booking {
            id: row.id,
            office_id: row.office_id,
            renter_email: row.renter_email,
            start_time: row.start_time,
            end_time: row.end_time,
            status: row.status.into(),
            billed_hours: row.billed_hours,
            price: row.price,
            payment,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2018, 12, 8, hour, min, 0).unwrap()
    }

    fn schedule(start_hour: u32, end_hour: u32) -> ScheduleInfo {
        ScheduleInfo {
            start_time: at(start_hour, 0),
            end_time: at(end_hour, 0),
        }
    }

    #[test]
    fn schedule_must_be_hour_aligned() {
        let off_boundary = ScheduleInfo {
            start_time: at(14, 30),
            end_time: at(18, 0),
        };
        assert!(matches!(
            off_boundary.validate(),
            Err(AppError::InvalidScheduleTime(_))
        ));

        assert!(schedule(14, 18).validate().is_ok());
    }

    #[test]
    fn schedule_end_must_follow_start() {
        assert!(matches!(
            schedule(18, 14).validate(),
            Err(AppError::InvalidScheduleTime(_))
        ));
        assert!(matches!(
            schedule(14, 14).validate(),
            Err(AppError::InvalidScheduleTime(_))
        ));
    }

    #[test]
    fn direct_booking_is_priced_per_hour() {
        let booking = Booking::direct(
            Uuid::new_v4(),
            "renter@example.com",
            schedule(14, 18),
            Decimal::from(400),
        )
        .unwrap();

        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.billed_hours, 4);
        assert_eq!(booking.price, Decimal::from(1600));
        assert!(booking.payment.is_none());
    }

    #[test]
    fn membership_backed_booking_is_free_and_scheduled() {
        let booking =
            Booking::membership_backed(Uuid::new_v4(), "renter@example.com", schedule(9, 11))
                .unwrap();

        assert_eq!(booking.status, BookingStatus::Scheduled);
        assert_eq!(booking.price, Decimal::ZERO);
        assert_eq!(booking.billed_hours, 2);
    }

    #[test]
    fn attach_payment_schedules_and_records() {
        let mut booking = Booking::direct(
            Uuid::new_v4(),
            "renter@example.com",
            schedule(14, 18),
            Decimal::from(400),
        )
        .unwrap();

        booking.attach_payment(PaymentRecord {
            external_payment_id: "9042".to_string(),
            gross_amount: Decimal::from(110),
            fee_amount: Decimal::from(5),
            currency_id: "ARS".to_string(),
            payment_method_id: "visa".to_string(),
        });

        assert_eq!(booking.status, BookingStatus::Scheduled);
        assert_eq!(
            booking.payment.as_ref().map(|p| p.gross_amount),
            Some(Decimal::from(110))
        );
    }

    #[test]
    fn ranges_overlap_unless_one_ends_before_the_other_starts() {
        let base = schedule(14, 18).range();

        assert!(base.overlaps(&schedule(15, 16).range()));
        assert!(base.overlaps(&schedule(13, 15).range()));
        assert!(base.overlaps(&schedule(17, 20).range()));
        assert!(base.overlaps(&schedule(13, 20).range()));
        // Touching endpoints do not overlap
        assert!(!base.overlaps(&schedule(18, 19).range()));
        assert!(!base.overlaps(&schedule(12, 14).range()));
    }
}
