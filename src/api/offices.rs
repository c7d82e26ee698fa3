//! Office management and availability endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::booking::TimeRange,
    models::office::{CreateInactivity, CreateOffice, Inactivity, Office},
};

use super::AuthenticatedRenter;

/// Create a new office
#[utoipa::path(
    post,
    path = "/offices",
    tag = "offices",
    security(("bearer_auth" = [])),
    request_body = CreateOffice,
    responses(
        (status = 201, description = "Office created", body = Office),
        (status = 400, description = "Invalid request"),
        (status = 403, description = "Caller does not own the branch"),
        (status = 404, description = "Branch not found")
    )
)]
pub async fn create_office(
    State(state): State<crate::AppState>,
    AuthenticatedRenter(claims): AuthenticatedRenter,
    Json(request): Json<CreateOffice>,
) -> AppResult<(StatusCode, Json<Office>)> {
    claims.require_owner()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let office = state
        .services
        .offices
        .create_office(claims.email(), request)
        .await?;
    Ok((StatusCode::CREATED, Json(office)))
}

/// Get an office
#[utoipa::path(
    get,
    path = "/offices/{id}",
    tag = "offices",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Office ID")
    ),
    responses(
        (status = 200, description = "Office details", body = Office),
        (status = 404, description = "Office not found")
    )
)]
pub async fn get_office(
    State(state): State<crate::AppState>,
    AuthenticatedRenter(_claims): AuthenticatedRenter,
    Path(office_id): Path<Uuid>,
) -> AppResult<Json<Office>> {
    let office = state.services.offices.get_office(office_id).await?;
    Ok(Json(office))
}

/// Office deletion query
#[derive(Debug, Deserialize, IntoParams)]
pub struct DeleteOfficeQuery {
    /// Effective deletion date (YYYY-MM-DD); today when omitted
    pub effective_date: Option<NaiveDate>,
}

/// Soft-delete an office
#[utoipa::path(
    delete,
    path = "/offices/{id}",
    tag = "offices",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Office ID"),
        DeleteOfficeQuery
    ),
    responses(
        (status = 204, description = "Office deleted"),
        (status = 403, description = "Caller does not own the branch"),
        (status = 404, description = "Office not found")
    )
)]
pub async fn delete_office(
    State(state): State<crate::AppState>,
    AuthenticatedRenter(claims): AuthenticatedRenter,
    Path(office_id): Path<Uuid>,
    Query(query): Query<DeleteOfficeQuery>,
) -> AppResult<StatusCode> {
    claims.require_owner()?;

    state
        .services
        .offices
        .delete_office(claims.email(), office_id, query.effective_date)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Add an inactivity rule to an office
#[utoipa::path(
    post,
    path = "/offices/{id}/inactivities",
    tag = "offices",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Office ID")
    ),
    request_body = CreateInactivity,
    responses(
        (status = 201, description = "Inactivity created", body = Inactivity),
        (status = 400, description = "Neither or both of date and weekday given"),
        (status = 404, description = "Office not found")
    )
)]
pub async fn create_inactivity(
    State(state): State<crate::AppState>,
    AuthenticatedRenter(claims): AuthenticatedRenter,
    Path(office_id): Path<Uuid>,
    Json(request): Json<CreateInactivity>,
) -> AppResult<(StatusCode, Json<Inactivity>)> {
    claims.require_owner()?;

    let rule = state
        .services
        .offices
        .add_inactivity(claims.email(), office_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(rule)))
}

/// List inactivity rules of an office
#[utoipa::path(
    get,
    path = "/offices/{id}/inactivities",
    tag = "offices",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Office ID")
    ),
    responses(
        (status = 200, description = "Inactivity rules", body = Vec<Inactivity>),
        (status = 404, description = "Office not found")
    )
)]
pub async fn list_inactivities(
    State(state): State<crate::AppState>,
    AuthenticatedRenter(_claims): AuthenticatedRenter,
    Path(office_id): Path<Uuid>,
) -> AppResult<Json<Vec<Inactivity>>> {
    let rules = state.services.offices.list_inactivities(office_id).await?;
    Ok(Json(rules))
}

/// Remove an inactivity rule
#[utoipa::path(
    delete,
    path = "/inactivities/{id}",
    tag = "offices",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Inactivity ID")
    ),
    responses(
        (status = 204, description = "Inactivity removed"),
        (status = 404, description = "Inactivity not found")
    )
)]
pub async fn delete_inactivity(
    State(state): State<crate::AppState>,
    AuthenticatedRenter(claims): AuthenticatedRenter,
    Path(inactivity_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    claims.require_owner()?;

    state.services.offices.remove_inactivity(inactivity_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Response of the has-booked check
#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct HasBookedResponse {
    pub has_booked: bool,
}

/// Whether the caller ever booked the office (used to gate reviews)
#[utoipa::path(
    get,
    path = "/offices/{id}/has-booked",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Office ID")
    ),
    responses(
        (status = 200, description = "Existence check result", body = HasBookedResponse)
    )
)]
pub async fn has_booked(
    State(state): State<crate::AppState>,
    AuthenticatedRenter(claims): AuthenticatedRenter,
    Path(office_id): Path<Uuid>,
) -> AppResult<Json<HasBookedResponse>> {
    let has_booked = state
        .services
        .bookings
        .has_booked(claims.email(), office_id)
        .await?;
    Ok(Json(HasBookedResponse { has_booked }))
}

/// Occupied-slots query
#[derive(Debug, Deserialize, IntoParams)]
pub struct OccupiedSlotsQuery {
    /// Date to inspect (YYYY-MM-DD)
    pub date: NaiveDate,
}

/// Occupied time ranges of an office on a date
#[utoipa::path(
    get,
    path = "/offices/{id}/occupied-slots",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Office ID"),
        OccupiedSlotsQuery
    ),
    responses(
        (status = 200, description = "Occupied ranges", body = Vec<TimeRange>),
        (status = 404, description = "Office not found")
    )
)]
pub async fn occupied_slots(
    State(state): State<crate::AppState>,
    AuthenticatedRenter(_claims): AuthenticatedRenter,
    Path(office_id): Path<Uuid>,
    Query(query): Query<OccupiedSlotsQuery>,
) -> AppResult<Json<Vec<TimeRange>>> {
    let slots = state
        .services
        .bookings
        .find_occupied_slots(office_id, query.date)
        .await?;
    Ok(Json(slots))
}
