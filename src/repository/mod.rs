//! Repository layer for database operations

pub mod bookings;
pub mod branches;
pub mod membership_acquisitions;
pub mod offices;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub branches: branches::BranchesRepository,
    pub offices: offices::OfficesRepository,
    pub bookings: bookings::BookingsRepository,
    pub membership_acquisitions: membership_acquisitions::MembershipAcquisitionsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            branches: branches::BranchesRepository::new(pool.clone()),
            offices: offices::OfficesRepository::new(pool.clone()),
            bookings: bookings::BookingsRepository::new(pool.clone()),
            membership_acquisitions:
                membership_acquisitions::MembershipAcquisitionsRepository::new(pool.clone()),
            pool,
        }
    }
}
