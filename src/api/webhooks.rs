//! Payment webhook intake
//!
//! The gateway only needs an acknowledgment: these handlers return 200 no
//! matter what, including for payloads we cannot parse. Anything we fail to
//! process will be redelivered by the gateway.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::services::reconciliation::{PaymentTarget, WebhookNotification};

/// Payment notification for a booking
#[utoipa::path(
    post,
    path = "/webhooks/payments/bookings/{id}",
    tag = "webhooks",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Notification acknowledged")
    )
)]
pub async fn booking_payment(
    State(state): State<crate::AppState>,
    Path(booking_id): Path<Uuid>,
    body: String,
) -> StatusCode {
    handle(&state, PaymentTarget::Booking(booking_id), &body).await;
    StatusCode::OK
}

/// Payment notification for a membership acquisition
#[utoipa::path(
    post,
    path = "/webhooks/payments/membership-acquisitions/{id}",
    tag = "webhooks",
    params(
        ("id" = Uuid, Path, description = "Membership acquisition ID")
    ),
    responses(
        (status = 200, description = "Notification acknowledged")
    )
)]
pub async fn acquisition_payment(
    State(state): State<crate::AppState>,
    Path(acquisition_id): Path<Uuid>,
    body: String,
) -> StatusCode {
    handle(
        &state,
        PaymentTarget::MembershipAcquisition(acquisition_id),
        &body,
    )
    .await;
    StatusCode::OK
}

async fn handle(state: &crate::AppState, target: PaymentTarget, body: &str) {
    match serde_json::from_str::<WebhookNotification>(body) {
        Ok(notification) => {
            state
                .services
                .reconciliation
                .handle_notification(target, notification)
                .await;
        }
        Err(e) => {
            tracing::warn!(payment_target = ?target, error = %e, "unparseable payment webhook payload");
        }
    }
}
