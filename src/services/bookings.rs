//! Booking service: creation strategies and occupied-slot lookup

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{Booking, ScheduleInfo, TimeRange},
        office::Office,
    },
    repository::Repository,
    services::{
        events::{BookingConfirmed, BookingEvents},
        payments::{PaymentGateway, PreferenceInfo},
    },
};

#[derive(Clone)]
pub struct BookingService {
    repository: Repository,
    gateway: Arc<dyn PaymentGateway>,
    events: BookingEvents,
    /// Externally reachable base URL for webhook notification endpoints
    public_url: String,
}

impl BookingService {
    pub fn new(
        repository: Repository,
        gateway: Arc<dyn PaymentGateway>,
        events: BookingEvents,
        public_url: String,
    ) -> Self {
        Self {
            repository,
            gateway,
            events,
            public_url: public_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a booking. The presence of a membership acquisition id selects
    /// the membership-backed strategy; otherwise the renter pays per booking.
    pub async fn create_booking(
        &self,
        renter_email: &str,
        office_id: Uuid,
        membership_acquisition_id: Option<Uuid>,
        schedule: ScheduleInfo,
    ) -> AppResult<Booking> {
        let office = self.validate_request(office_id, &schedule).await?;

        match membership_acquisition_id {
            Some(acquisition_id) => {
                MembershipBacked { acquisition_id }
                    .book(self, office, renter_email, schedule)
                    .await
            }
            None => Direct.book(self, office, renter_email, schedule).await,
        }
    }

    /// Occupied time ranges of an office on a date: every pending or
    /// scheduled booking counts (a pending booking is reserving
    /// gateway-pending funds). Inactivity rules are not subtracted here;
    /// they are informational only.
    pub async fn find_occupied_slots(
        &self,
        office_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Vec<TimeRange>> {
        self.repository.offices.get_by_id(office_id).await?;
        let bookings = self
            .repository
            .bookings
            .find_for_office_on(office_id, date)
            .await?;
        Ok(occupied_ranges(&bookings))
    }

    /// Paged bookings of a renter
    pub async fn list_for_renter(
        &self,
        renter_email: &str,
        only_current: bool,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Booking>, i64)> {
        let now = Utc::now();
        let bookings = self
            .repository
            .bookings
            .list_for_renter(renter_email, only_current, now, offset, limit)
            .await?;
        let total = self
            .repository
            .bookings
            .count_for_renter(renter_email, only_current, now)
            .await?;
        Ok((bookings, total))
    }

    /// Whether the renter ever booked the office
    pub async fn has_booked(&self, renter_email: &str, office_id: Uuid) -> AppResult<bool> {
        self.repository.bookings.exists(renter_email, office_id).await
    }

    /// Validation chain shared by both strategies: schedule shape, office
    /// deletion state, then overlap against pending/scheduled bookings.
    async fn validate_request(
        &self,
        office_id: Uuid,
        schedule: &ScheduleInfo,
    ) -> AppResult<Office> {
        schedule.validate()?;

        let office = self.repository.offices.get_by_id(office_id).await?;
        if office.is_deleted_as_of(Utc::now().date_naive()) {
            return Err(AppError::OfficeIsDeleted);
        }

        let conflicting = self
            .repository
            .bookings
            .find_overlapping(office_id, &schedule.range())
            .await?;
        if !conflicting.is_empty() {
            return Err(AppError::OfficeIsNotAvailable);
        }

        Ok(office)
    }
}

/// Occupied ranges are derived from bookings alone; inactivity rules do not
/// feed into them.
fn occupied_ranges(bookings: &[Booking]) -> Vec<TimeRange> {
    bookings.iter().map(Booking::range).collect()
}

/// A way of turning a validated request into a persisted booking
#[async_trait]
trait CreationStrategy {
    async fn book(
        &self,
        service: &BookingService,
        office: Office,
        renter_email: &str,
        schedule: ScheduleInfo,
    ) -> AppResult<Booking>;
}

/// Pay-per-booking: the booking stays pending until the gateway confirms
/// the payment through a webhook.
struct Direct;

#[async_trait]
impl CreationStrategy for Direct {
    async fn book(
        &self,
        service: &BookingService,
        office: Office,
        renter_email: &str,
        schedule: ScheduleInfo,
    ) -> AppResult<Booking> {
        let booking = Booking::direct(office.id, renter_email, schedule, office.price)?;
        service.repository.bookings.create(&booking).await?;

        // The pending booking is kept even if preference creation fails:
        // the caller sees the gateway error and may retry the checkout.
        let preference = service
            .gateway
            .create_preference(&PreferenceInfo {
                title: format!("Office booking: {}", office.name),
                unit_price: booking.price,
                payer_email: renter_email.to_string(),
                external_reference: booking.id.to_string(),
                notification_url: format!(
                    "{}/api/v1/webhooks/payments/bookings/{}",
                    service.public_url, booking.id
                ),
            })
            .await?;

        tracing::info!(
            booking_id = %booking.id,
            office_id = %office.id,
            preference_id = %preference.id,
            price = %booking.price,
            "direct booking created, awaiting payment"
        );

        Ok(booking)
    }
}

/// Membership-backed: access was already paid for through the membership,
/// so the booking is free and scheduled immediately, skipping the payment
/// reconciliation path entirely.
struct MembershipBacked {
    acquisition_id: Uuid,
}

#[async_trait]
impl CreationStrategy for MembershipBacked {
    async fn book(
        &self,
        service: &BookingService,
        office: Office,
        renter_email: &str,
        schedule: ScheduleInfo,
    ) -> AppResult<Booking> {
        let acquisition = service
            .repository
            .membership_acquisitions
            .get_by_id(self.acquisition_id)
            .await?;

        if acquisition.buyer_email != renter_email {
            return Err(AppError::MembershipAcquisitionForbidden);
        }
        if !acquisition.can_book_on(schedule.start_time.date_naive()) {
            return Err(AppError::MembershipAcquisitionNotActive);
        }

        let booking = Booking::membership_backed(office.id, renter_email, schedule)?;
        service.repository.bookings.create(&booking).await?;

        service.events.publish(BookingConfirmed {
            booking_id: booking.id,
            office_id: office.id,
            branch_id: office.branch_id,
            renter_email: renter_email.to_string(),
            amount: booking.price,
            date: booking.start_time.date_naive(),
        });

        tracing::info!(
            booking_id = %booking.id,
            office_id = %office.id,
            acquisition_id = %self.acquisition_id,
            "membership-backed booking scheduled"
        );

        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Weekday};
    use rust_decimal::Decimal;
    use crate::models::office::Inactivity;

    fn booking(start_hour: u32, end_hour: u32) -> Booking {
        Booking::direct(
            Uuid::new_v4(),
            "renter@example.com",
            ScheduleInfo {
                start_time: Utc.with_ymd_and_hms(2018, 12, 3, start_hour, 0, 0).unwrap(),
                end_time: Utc.with_ymd_and_hms(2018, 12, 3, end_hour, 0, 0).unwrap(),
            },
            Decimal::from(400),
        )
        .unwrap()
    }

    #[test]
    fn occupied_ranges_come_from_bookings_alone() {
        // 2018-12-03 is a Monday; a recurring-Monday inactivity rule exists
        // for the office, yet the occupied-slot list is unaffected by it.
        let _closed_on_mondays =
            Inactivity::new(Uuid::new_v4(), None, Some(Weekday::Mon)).unwrap();

        let bookings = vec![booking(9, 11), booking(14, 18)];
        let ranges = occupied_ranges(&bookings);

        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0], bookings[0].range());
        assert_eq!(ranges[1], bookings[1].range());
    }

    #[test]
    fn no_bookings_means_no_occupied_ranges() {
        assert!(occupied_ranges(&[]).is_empty());
    }
}
