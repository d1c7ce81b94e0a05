//! API handlers for FieldCare REST endpoints

pub mod health;
pub mod interventions;
pub mod openapi;
pub mod timesheet;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Interventions
        .route("/interventions", get(interventions::list_interventions))
        .route("/interventions", post(interventions::create_intervention))
        .route("/interventions/refresh", post(interventions::refresh_interventions))
        .route("/interventions/:id", get(interventions::get_intervention))
        .route("/interventions/:id", put(interventions::update_intervention))
        .route("/interventions/:id/status", put(interventions::update_status))
        .route("/interventions/:id/conclude", post(interventions::conclude_intervention))
        // Timesheet helpers
        .route("/timesheet/slots", get(timesheet::list_slots))
        .route("/timesheet/hours", post(timesheet::compute_hours))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
