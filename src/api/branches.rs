//! Branch management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::branch::{CreateBranch, OfficeBranch},
    models::office::Office,
};

use super::AuthenticatedRenter;

/// Create a new branch
#[utoipa::path(
    post,
    path = "/branches",
    tag = "branches",
    security(("bearer_auth" = [])),
    request_body = CreateBranch,
    responses(
        (status = 201, description = "Branch created", body = OfficeBranch),
        (status = 400, description = "Invalid request"),
        (status = 403, description = "Caller is not an owner")
    )
)]
pub async fn create_branch(
    State(state): State<crate::AppState>,
    AuthenticatedRenter(claims): AuthenticatedRenter,
    Json(request): Json<CreateBranch>,
) -> AppResult<(StatusCode, Json<OfficeBranch>)> {
    claims.require_owner()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let branch = state
        .services
        .offices
        .create_branch(claims.email(), request)
        .await?;
    Ok((StatusCode::CREATED, Json(branch)))
}

/// Get a branch
#[utoipa::path(
    get,
    path = "/branches/{id}",
    tag = "branches",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Branch ID")
    ),
    responses(
        (status = 200, description = "Branch details", body = OfficeBranch),
        (status = 404, description = "Branch not found")
    )
)]
pub async fn get_branch(
    State(state): State<crate::AppState>,
    AuthenticatedRenter(_claims): AuthenticatedRenter,
    Path(branch_id): Path<Uuid>,
) -> AppResult<Json<OfficeBranch>> {
    let branch = state.services.offices.get_branch(branch_id).await?;
    Ok(Json(branch))
}

/// List offices of a branch
#[utoipa::path(
    get,
    path = "/branches/{id}/offices",
    tag = "offices",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Branch ID")
    ),
    responses(
        (status = 200, description = "Branch offices", body = Vec<Office>),
        (status = 404, description = "Branch not found")
    )
)]
pub async fn list_branch_offices(
    State(state): State<crate::AppState>,
    AuthenticatedRenter(_claims): AuthenticatedRenter,
    Path(branch_id): Path<Uuid>,
) -> AppResult<Json<Vec<Office>>> {
    let offices = state.services.offices.list_branch_offices(branch_id).await?;
    Ok(Json(offices))
}
