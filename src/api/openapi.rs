//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, interventions, timesheet};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "FieldCare API",
        version = "1.0.0",
        description = "Maintenance Service CRM REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Interventions
        interventions::list_interventions,
        interventions::get_intervention,
        interventions::create_intervention,
        interventions::update_intervention,
        interventions::update_status,
        interventions::conclude_intervention,
        interventions::refresh_interventions,
        // Timesheet
        timesheet::list_slots,
        timesheet::compute_hours,
    ),
    components(
        schemas(
            // Interventions
            crate::models::intervention::Intervention,
            crate::models::intervention::InterventionDetails,
            crate::models::intervention::TimeEntry,
            crate::models::intervention::MaterialUsed,
            crate::models::intervention::CreateIntervention,
            crate::models::intervention::UpdateIntervention,
            crate::models::intervention::UpdateStatus,
            crate::models::intervention::ConcludeIntervention,
            crate::models::enums::InterventionStatus,
            interventions::InterventionListResponse,
            interventions::RefreshResponse,
            // Timesheet
            timesheet::HoursRequest,
            timesheet::HoursResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "interventions", description = "Service intervention lifecycle"),
        (name = "timesheet", description = "Time entry helpers")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
