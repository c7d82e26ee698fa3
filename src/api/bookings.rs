//! Booking endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::booking::{Booking, ScheduleInfo},
};

use super::AuthenticatedRenter;

/// Create booking request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookingRequest {
    /// Office to reserve
    pub office_id: Uuid,
    /// Present when booking through a membership; selects the
    /// membership-backed creation strategy
    pub membership_acquisition_id: Option<Uuid>,
    /// Reservation start (hour-aligned, RFC 3339)
    pub start_time: DateTime<Utc>,
    /// Reservation end (hour-aligned, RFC 3339)
    pub end_time: DateTime<Utc>,
}

/// Create a booking
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = Booking),
        (status = 400, description = "Invalid schedule time"),
        (status = 404, description = "Office or acquisition not found"),
        (status = 409, description = "Office not available"),
        (status = 422, description = "Office deleted or membership not active"),
        (status = 502, description = "Payment preference could not be registered")
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    AuthenticatedRenter(claims): AuthenticatedRenter,
    Json(request): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    let booking = state
        .services
        .bookings
        .create_booking(
            claims.email(),
            request.office_id,
            request.membership_acquisition_id,
            ScheduleInfo {
                start_time: request.start_time,
                end_time: request.end_time,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(booking)))
}

/// Booking listing query
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListBookingsQuery {
    /// Keep only bookings that have not ended yet
    #[serde(default)]
    pub only_current: bool,
    #[serde(default)]
    pub offset: i64,
    pub limit: Option<i64>,
}

/// Paged booking list response
#[derive(Serialize, ToSchema)]
pub struct BookingsPage {
    pub bookings: Vec<Booking>,
    pub total: i64,
}

/// List the caller's bookings
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(ListBookingsQuery),
    responses(
        (status = 200, description = "The caller's bookings", body = BookingsPage)
    )
)]
pub async fn list_bookings(
    State(state): State<crate::AppState>,
    AuthenticatedRenter(claims): AuthenticatedRenter,
    Query(query): Query<ListBookingsQuery>,
) -> AppResult<Json<BookingsPage>> {
    let limit = query.limit.unwrap_or(20).clamp(1, 100);
    let (bookings, total) = state
        .services
        .bookings
        .list_for_renter(claims.email(), query.only_current, query.offset.max(0), limit)
        .await?;

    Ok(Json(BookingsPage { bookings, total }))
}
