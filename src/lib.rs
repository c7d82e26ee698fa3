//! Deskhive Coworking Office Booking System
//!
//! A Rust implementation of the Deskhive booking server, providing a REST
//! JSON API for reserving time-boxed office slots, selling recurring
//! membership access, and reconciling asynchronous payment notifications.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
