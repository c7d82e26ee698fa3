//! Membership and acquisition endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::membership::{CreateMembership, Membership, MembershipAcquisition},
};

use super::AuthenticatedRenter;

/// Create a membership
#[utoipa::path(
    post,
    path = "/memberships",
    tag = "memberships",
    security(("bearer_auth" = [])),
    request_body = CreateMembership,
    responses(
        (status = 201, description = "Membership created", body = Membership),
        (status = 400, description = "Invalid request"),
        (status = 403, description = "Caller does not own the branch"),
        (status = 404, description = "Branch not found")
    )
)]
pub async fn create_membership(
    State(state): State<crate::AppState>,
    AuthenticatedRenter(claims): AuthenticatedRenter,
    Json(request): Json<CreateMembership>,
) -> AppResult<(StatusCode, Json<Membership>)> {
    claims.require_owner()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let membership = state
        .services
        .memberships
        .create_membership(claims.email(), request)
        .await?;
    Ok((StatusCode::CREATED, Json(membership)))
}

/// Get a membership
#[utoipa::path(
    get,
    path = "/memberships/{id}",
    tag = "memberships",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Membership ID")
    ),
    responses(
        (status = 200, description = "Membership details", body = Membership),
        (status = 404, description = "Membership not found")
    )
)]
pub async fn get_membership(
    State(state): State<crate::AppState>,
    AuthenticatedRenter(_claims): AuthenticatedRenter,
    Path(membership_id): Path<Uuid>,
) -> AppResult<Json<Membership>> {
    let membership = state.services.memberships.get_membership(membership_id).await?;
    Ok(Json(membership))
}

/// Purchase request for a membership acquisition
#[derive(Debug, Deserialize, ToSchema)]
pub struct PurchaseMembershipRequest {
    pub membership_id: Uuid,
    /// Chosen access weekdays (0=Monday .. 6=Sunday); must be covered by
    /// the membership
    pub access_days: Vec<u8>,
}

/// Purchase a membership
#[utoipa::path(
    post,
    path = "/membership-acquisitions",
    tag = "memberships",
    security(("bearer_auth" = [])),
    request_body = PurchaseMembershipRequest,
    responses(
        (status = 201, description = "Acquisition created, awaiting payment", body = MembershipAcquisition),
        (status = 400, description = "Days not covered by the membership"),
        (status = 404, description = "Membership not found"),
        (status = 502, description = "Payment preference could not be registered")
    )
)]
pub async fn purchase_membership(
    State(state): State<crate::AppState>,
    AuthenticatedRenter(claims): AuthenticatedRenter,
    Json(request): Json<PurchaseMembershipRequest>,
) -> AppResult<(StatusCode, Json<MembershipAcquisition>)> {
    let acquisition = state
        .services
        .memberships
        .purchase(claims.email(), request.membership_id, &request.access_days)
        .await?;
    Ok((StatusCode::CREATED, Json(acquisition)))
}
