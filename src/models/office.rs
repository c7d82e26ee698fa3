//! Office and inactivity models

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Day-of-week index used across the schema (0=Monday, 6=Sunday)
pub fn weekday_index(weekday: Weekday) -> i16 {
    weekday.num_days_from_monday() as i16
}

/// Inverse of `weekday_index`, for request payloads
pub fn weekday_from_index(day: u8) -> AppResult<Weekday> {
    match day {
        0 => Ok(Weekday::Mon),
        1 => Ok(Weekday::Tue),
        2 => Ok(Weekday::Wed),
        3 => Ok(Weekday::Thu),
        4 => Ok(Weekday::Fri),
        5 => Ok(Weekday::Sat),
        6 => Ok(Weekday::Sun),
        other => Err(AppError::Validation(format!(
            "Invalid weekday index {other} (expected 0=Monday .. 6=Sunday)"
        ))),
    }
}

/// Office model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Office {
    pub id: Uuid,
    pub branch_id: Uuid,
    pub name: String,
    /// Hourly rental price
    pub price: Decimal,
    pub capacity: i32,
    /// Private offices are hidden from public listings
    pub is_private: bool,
    /// Soft-deletion effective date; the office stays bookable until then
    pub deleted_at: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl Office {
    /// An office is unbookable once its deletion effective-date has passed
    pub fn is_deleted_as_of(&self, today: NaiveDate) -> bool {
        self.deleted_at.map(|date| date <= today).unwrap_or(false)
    }
}

/// Create office request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOffice {
    pub branch_id: Uuid,
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub price: Decimal,
    #[validate(range(min = 1, max = 500))]
    pub capacity: i32,
    #[serde(default)]
    pub is_private: bool,
}

/// An inactivity rule marking an office closed, either on one specific
/// calendar date or on every occurrence of a weekday. Exactly one of the
/// two must be set.
///
/// Inactivities are informational: the occupied-slot lookup and the booking
/// validation chain deliberately do not consult them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Inactivity {
    pub id: Uuid,
    pub office_id: Uuid,
    pub specific_date: Option<NaiveDate>,
    /// 0=Monday .. 6=Sunday
    pub weekday: Option<i16>,
    pub created_at: DateTime<Utc>,
}

impl Inactivity {
    /// Build an inactivity rule, enforcing the date-XOR-weekday invariant.
    pub fn new(
        office_id: Uuid,
        specific_date: Option<NaiveDate>,
        weekday: Option<Weekday>,
    ) -> AppResult<Self> {
        match (specific_date, weekday) {
            (Some(_), Some(_)) => Err(AppError::Validation(
                "An inactivity is either a specific date or a recurring weekday, not both"
                    .to_string(),
            )),
            (None, None) => Err(AppError::Validation(
                "An inactivity needs a specific date or a recurring weekday".to_string(),
            )),
            (date, day) => Ok(Self {
                id: Uuid::new_v4(),
                office_id,
                specific_date: date,
                weekday: day.map(weekday_index),
                created_at: Utc::now(),
            }),
        }
    }
}

/// Create inactivity request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateInactivity {
    /// Specific closed date (YYYY-MM-DD)
    pub specific_date: Option<NaiveDate>,
    /// Recurring closed weekday (0=Monday .. 6=Sunday)
    pub weekday: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn office(deleted_at: Option<NaiveDate>) -> Office {
        Office {
            id: Uuid::new_v4(),
            branch_id: Uuid::new_v4(),
            name: "Corner office".to_string(),
            price: Decimal::from(400),
            capacity: 4,
            is_private: false,
            deleted_at,
            created_at: Utc::now(),
            modified_at: None,
        }
    }

    #[test]
    fn deletion_takes_effect_on_the_effective_date() {
        let today = NaiveDate::from_ymd_opt(2018, 12, 8).unwrap();

        assert!(!office(None).is_deleted_as_of(today));
        assert!(!office(today.succ_opt()).is_deleted_as_of(today));
        assert!(office(Some(today)).is_deleted_as_of(today));
        assert!(office(today.pred_opt()).is_deleted_as_of(today));
    }

    #[test]
    fn inactivity_requires_exactly_one_kind() {
        let office_id = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2018, 12, 25).unwrap();

        assert!(Inactivity::new(office_id, Some(date), None).is_ok());
        assert!(Inactivity::new(office_id, None, Some(Weekday::Mon)).is_ok());
        assert!(Inactivity::new(office_id, Some(date), Some(Weekday::Mon)).is_err());
        assert!(Inactivity::new(office_id, None, None).is_err());
    }

    #[test]
    fn recurring_inactivity_maps_weekday_from_monday() {
        let rule = Inactivity::new(Uuid::new_v4(), None, Some(Weekday::Sun)).unwrap();
        assert_eq!(rule.weekday, Some(6));
        assert_eq!(rule.specific_date, None);
    }
}
