//! Domain models

pub mod booking;
pub mod branch;
pub mod membership;
pub mod office;
pub mod user;

pub use booking::{Booking, BookingStatus, PaymentRecord, ScheduleInfo, TimeRange};
pub use branch::OfficeBranch;
pub use membership::{AcquisitionStatus, Membership, MembershipAcquisition};
pub use office::{Inactivity, Office};
