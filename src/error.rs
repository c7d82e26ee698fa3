//! Error types for Deskhive server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Application error codes exposed in every error response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NoSuchBranch = 4,
    NoSuchOffice = 5,
    NoSuchBooking = 6,
    NoSuchMembership = 7,
    NoSuchMembershipAcquisition = 8,
    InvalidScheduleTime = 9,
    OfficeIsDeleted = 10,
    OfficeIsNotAvailable = 11,
    MembershipAcquisitionForbidden = 12,
    MembershipAcquisitionIsNotActive = 13,
    PaymentGatewayFailure = 14,
    BadValue = 15,
    Duplicate = 16,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Branch {0} not found")]
    BranchNotFound(Uuid),

    #[error("Office {0} not found")]
    OfficeNotFound(Uuid),

    #[error("Booking {0} not found")]
    BookingNotFound(Uuid),

    #[error("Membership {0} not found")]
    MembershipNotFound(Uuid),

    #[error("Membership acquisition {0} not found")]
    MembershipAcquisitionNotFound(Uuid),

    #[error("Invalid schedule time: {0}")]
    InvalidScheduleTime(String),

    #[error("Office is deleted")]
    OfficeIsDeleted,

    #[error("Office is not available for the requested time range")]
    OfficeIsNotAvailable,

    #[error("Membership acquisition belongs to another renter")]
    MembershipAcquisitionForbidden,

    #[error("Membership acquisition is not active for the requested day")]
    MembershipAcquisitionNotActive,

    #[error("Payment gateway error: {0}")]
    PaymentGateway(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::Authorization(msg) => {
                (StatusCode::FORBIDDEN, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::BranchNotFound(_) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchBranch, self.to_string())
            }
            AppError::OfficeNotFound(_) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchOffice, self.to_string())
            }
            AppError::BookingNotFound(_) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchBooking, self.to_string())
            }
            AppError::MembershipNotFound(_) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchMembership, self.to_string())
            }
            AppError::MembershipAcquisitionNotFound(_) => (
                StatusCode::NOT_FOUND,
                ErrorCode::NoSuchMembershipAcquisition,
                self.to_string(),
            ),
            AppError::InvalidScheduleTime(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::InvalidScheduleTime,
                msg.clone(),
            ),
            AppError::OfficeIsDeleted => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::OfficeIsDeleted,
                self.to_string(),
            ),
            AppError::OfficeIsNotAvailable => (
                StatusCode::CONFLICT,
                ErrorCode::OfficeIsNotAvailable,
                self.to_string(),
            ),
            AppError::MembershipAcquisitionForbidden => (
                StatusCode::FORBIDDEN,
                ErrorCode::MembershipAcquisitionForbidden,
                self.to_string(),
            ),
            AppError::MembershipAcquisitionNotActive => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::MembershipAcquisitionIsNotActive,
                self.to_string(),
            ),
            AppError::PaymentGateway(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorCode::PaymentGatewayFailure,
                msg.clone(),
            ),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Conflict(msg) => {
                (StatusCode::CONFLICT, ErrorCode::Duplicate, msg.clone())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
