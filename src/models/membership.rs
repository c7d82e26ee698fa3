//! Membership and membership acquisition models

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::booking::PaymentRecord;
use super::office::weekday_index;
use crate::error::{AppError, AppResult};

/// A membership an owner sells on a branch: recurring access on a set of
/// weekdays for a monthly price.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Membership {
    pub id: Uuid,
    pub branch_id: Uuid,
    pub name: String,
    /// Monthly price
    pub price: Decimal,
    /// Weekdays this membership can grant (0=Monday .. 6=Sunday)
    pub access_days: Vec<i16>,
    pub created_at: DateTime<Utc>,
}

/// Create membership request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMembership {
    pub branch_id: Uuid,
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub price: Decimal,
    /// Weekdays the membership covers (0=Monday .. 6=Sunday)
    #[validate(length(min = 1, max = 7))]
    pub access_days: Vec<u8>,
}

/// Acquisition status (stored as SMALLINT)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[repr(i16)]
pub enum AcquisitionStatus {
    /// Purchase intent registered, awaiting gateway confirmation
    Pending = 0,
    /// Paid; terminal
    Bought = 1,
}

impl From<i16> for AcquisitionStatus {
    fn from(v: i16) -> Self {
        match v {
            1 => AcquisitionStatus::Bought,
            _ => AcquisitionStatus::Pending,
        }
    }
}

impl From<AcquisitionStatus> for i16 {
    fn from(s: AcquisitionStatus) -> Self {
        s as i16
    }
}

/// A renter's purchase of a membership, restricted to a chosen subset of
/// the membership's configured weekdays.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MembershipAcquisition {
    pub id: Uuid,
    pub membership_id: Uuid,
    pub buyer_email: String,
    pub status: AcquisitionStatus,
    /// Chosen access weekdays (0=Monday .. 6=Sunday)
    pub access_days: Vec<i16>,
    pub payment: Option<PaymentRecord>,
    pub created_at: DateTime<Utc>,
}

impl MembershipAcquisition {
    /// Build a pending acquisition; the chosen days must be a subset of the
    /// membership's configured access days.
    pub fn new(
        membership: &Membership,
        buyer_email: &str,
        days: &[Weekday],
    ) -> AppResult<Self> {
        if days.is_empty() {
            return Err(AppError::Validation(
                "An acquisition needs at least one access day".to_string(),
            ));
        }
        let mut access_days: Vec<i16> = days.iter().copied().map(weekday_index).collect();
        access_days.sort_unstable();
        access_days.dedup();

        if access_days
            .iter()
            .any(|day| !membership.access_days.contains(day))
        {
            return Err(AppError::Validation(
                "Requested access days are not covered by the membership".to_string(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            membership_id: membership.id,
            buyer_email: buyer_email.to_string(),
            status: AcquisitionStatus::Pending,
            access_days,
            payment: None,
            created_at: Utc::now(),
        })
    }

    /// Booking through this acquisition requires it to be bought and the
    /// requested date's weekday to be in its access set.
    pub fn can_book_on(&self, date: NaiveDate) -> bool {
        self.status == AcquisitionStatus::Bought
            && self.access_days.contains(&weekday_index(date.weekday()))
    }

    /// Attach the settlement record and mark the acquisition bought.
    pub fn attach_payment(&mut self, record: PaymentRecord) {
        self.payment = Some(record);
        self.status = AcquisitionStatus::Bought;
    }
}

/// Internal row structure for database queries
#[derive(Debug, Clone, FromRow)]
pub struct AcquisitionRow {
    pub id: Uuid,
    pub membership_id: Uuid,
    pub buyer_email: String,
    pub status: i16,
    pub access_days: Vec<i16>,
    pub payment_id: Option<String>,
    pub payment_gross_amount: Option<Decimal>,
    pub payment_fee_amount: Option<Decimal>,
    pub payment_currency: Option<String>,
    pub payment_method: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<AcquisitionRow> for MembershipAcquisition {
    fn from(row: AcquisitionRow) -> Self {
        let payment = row.payment_id.map(|external_payment_id| PaymentRecord {
            external_payment_id,
            gross_amount: row.payment_gross_amount.unwrap_or_default(),
            fee_amount: row.payment_fee_amount.unwrap_or_default(),
            currency_id: row.payment_currency.unwrap_or_default(),
            payment_method_id: row.payment_method.unwrap_or_default(),
        });
        MembershipAcquisition {
            id: row.id,
            membership_id: row.membership_id,
            buyer_email: row.buyer_email,
            status: row.status.into(),
            access_days: row.access_days,
            payment,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn membership(days: &[i16]) -> Membership {
        Membership {
            id: Uuid::new_v4(),
            branch_id: Uuid::new_v4(),
            name: "Full week".to_string(),
            price: Decimal::from(12000),
            access_days: days.to_vec(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn acquisition_days_must_be_a_subset() {
        let weekdays_only = membership(&[0, 1, 2, 3, 4]);

        let ok = MembershipAcquisition::new(
            &weekdays_only,
            "buyer@example.com",
            &[Weekday::Mon, Weekday::Wed],
        );
        assert!(ok.is_ok());

        let saturday = MembershipAcquisition::new(
            &weekdays_only,
            "buyer@example.com",
            &[Weekday::Mon, Weekday::Sat],
        );
        assert!(saturday.is_err());

        let empty = MembershipAcquisition::new(&weekdays_only, "buyer@example.com", &[]);
        assert!(empty.is_err());
    }

    #[test]
    fn pending_acquisition_cannot_book() {
        let membership = membership(&[0, 1, 2, 3, 4]);
        let acquisition =
            MembershipAcquisition::new(&membership, "buyer@example.com", &[Weekday::Mon])
                .unwrap();

        // 2018-12-03 is a Monday
        let monday = NaiveDate::from_ymd_opt(2018, 12, 3).unwrap();
        assert!(!acquisition.can_book_on(monday));
    }

    #[test]
    fn bought_acquisition_books_only_its_access_days() {
        let membership = membership(&[0, 1, 2, 3, 4]);
        let mut acquisition =
            MembershipAcquisition::new(&membership, "buyer@example.com", &[Weekday::Mon])
                .unwrap();
        acquisition.attach_payment(PaymentRecord {
            external_payment_id: "9042".to_string(),
            gross_amount: Decimal::from(12000),
            fee_amount: Decimal::ZERO,
            currency_id: "ARS".to_string(),
            payment_method_id: "visa".to_string(),
        });

        let monday = NaiveDate::from_ymd_opt(2018, 12, 3).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2018, 12, 4).unwrap();
        assert!(acquisition.can_book_on(monday));
        assert!(!acquisition.can_book_on(tuesday));
    }
}
