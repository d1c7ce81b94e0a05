//! FieldCare Maintenance Service CRM
//!
//! Tracks service interventions through their lifecycle: status progression,
//! technician time entries with derived labor hours, materials used and
//! free-text search, exposed as a REST JSON API.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod search;
pub mod services;
pub mod timesheet;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}
