//! Booking confirmation events
//!
//! Fire-and-forget publication: subscribers (if any) receive confirmations
//! over a broadcast channel; a publish with no listener is not an error.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Emitted once per booking when it reaches `SCHEDULED`
#[derive(Debug, Clone, Serialize)]
pub struct BookingConfirmed {
    pub booking_id: Uuid,
    pub office_id: Uuid,
    pub branch_id: Uuid,
    pub renter_email: String,
    /// Settled amount: gateway gross for direct bookings, zero for
    /// membership-backed ones
    pub amount: Decimal,
    pub date: NaiveDate,
}

#[derive(Clone)]
pub struct BookingEvents {
    sender: broadcast::Sender<BookingConfirmed>,
}

impl BookingEvents {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(64);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BookingConfirmed> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: BookingConfirmed) {
        tracing::info!(
            booking_id = %event.booking_id,
            office_id = %event.office_id,
            amount = %event.amount,
            "booking confirmed"
        );
        let _ = self.sender.send(event);
    }
}

impl Default for BookingEvents {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> BookingConfirmed {
        BookingConfirmed {
            booking_id: Uuid::new_v4(),
            office_id: Uuid::new_v4(),
            branch_id: Uuid::new_v4(),
            renter_email: "renter@example.com".to_string(),
            amount: Decimal::from(110),
            date: NaiveDate::from_ymd_opt(2018, 12, 8).unwrap(),
        }
    }

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let events = BookingEvents::new();
        let mut receiver = events.subscribe();

        let published = event();
        let booking_id = published.booking_id;
        events.publish(published);

        let received = receiver.recv().await.unwrap();
        assert_eq!(received.booking_id, booking_id);
    }

    #[test]
    fn publishing_without_subscribers_is_a_no_op() {
        let events = BookingEvents::new();
        events.publish(event());
    }
}
