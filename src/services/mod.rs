//! Business logic services

pub mod bookings;
pub mod email;
pub mod events;
pub mod memberships;
pub mod offices;
pub mod payments;
pub mod reconciliation;

use std::sync::Arc;

use crate::{
    config::{EmailConfig, ServerConfig},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub offices: offices::OfficeService,
    pub bookings: bookings::BookingService,
    pub memberships: memberships::MembershipService,
    pub reconciliation: reconciliation::ReconciliationService,
    pub email: email::EmailService,
    pub events: events::BookingEvents,
}

impl Services {
    /// Create all services with the given repository and gateway client
    pub fn new(
        repository: Repository,
        gateway: Arc<dyn payments::PaymentGateway>,
        server_config: &ServerConfig,
        email_config: EmailConfig,
    ) -> Self {
        let email = email::EmailService::new(email_config);
        let events = events::BookingEvents::new();
        Self {
            offices: offices::OfficeService::new(repository.clone()),
            bookings: bookings::BookingService::new(
                repository.clone(),
                gateway.clone(),
                events.clone(),
                server_config.public_url.clone(),
            ),
            memberships: memberships::MembershipService::new(
                repository.clone(),
                gateway.clone(),
                server_config.public_url.clone(),
            ),
            reconciliation: reconciliation::ReconciliationService::new(
                repository,
                gateway,
                email.clone(),
                events.clone(),
            ),
            email,
            events,
        }
    }
}
