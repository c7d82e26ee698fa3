//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{bookings, branches, health, memberships, offices, webhooks};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Deskhive API",
        version = "0.3.0",
        description = "Coworking Office Booking REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "Deskhive Team", email = "contact@deskhive.io")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Branches
        branches::create_branch,
        branches::get_branch,
        branches::list_branch_offices,
        // Offices
        offices::create_office,
        offices::get_office,
        offices::delete_office,
        offices::create_inactivity,
        offices::list_inactivities,
        offices::delete_inactivity,
        offices::occupied_slots,
        offices::has_booked,
        // Bookings
        bookings::create_booking,
        bookings::list_bookings,
        // Memberships
        memberships::create_membership,
        memberships::get_membership,
        memberships::purchase_membership,
        // Webhooks
        webhooks::booking_payment,
        webhooks::acquisition_payment,
    ),
    components(
        schemas(
            // Branches
            crate::models::branch::OfficeBranch,
            crate::models::branch::CreateBranch,
            // Offices
            crate::models::office::Office,
            crate::models::office::CreateOffice,
            crate::models::office::Inactivity,
            crate::models::office::CreateInactivity,
            // Bookings
            crate::models::booking::Booking,
            crate::models::booking::BookingStatus,
            crate::models::booking::PaymentRecord,
            crate::models::booking::TimeRange,
            bookings::CreateBookingRequest,
            bookings::BookingsPage,
            offices::HasBookedResponse,
            // Memberships
            crate::models::membership::Membership,
            crate::models::membership::CreateMembership,
            crate::models::membership::MembershipAcquisition,
            crate::models::membership::AcquisitionStatus,
            memberships::PurchaseMembershipRequest,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "branches", description = "Branch management"),
        (name = "offices", description = "Office and inactivity management"),
        (name = "bookings", description = "Booking creation and availability"),
        (name = "memberships", description = "Membership catalog and purchases"),
        (name = "webhooks", description = "Payment gateway callbacks")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
