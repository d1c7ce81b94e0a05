//! Intervention endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::intervention::{
        ConcludeIntervention, CreateIntervention, Intervention, InterventionDetails,
        InterventionQuery, UpdateIntervention, UpdateStatus,
    },
    search::InterventionFilter,
};

/// Filtered intervention list
#[derive(Serialize, ToSchema)]
pub struct InterventionListResponse {
    /// Matching interventions, in creation order
    pub items: Vec<Intervention>,
    /// Number of matching interventions
    pub total: usize,
}

/// Cache reload result
#[derive(Serialize, ToSchema)]
pub struct RefreshResponse {
    /// Number of interventions loaded from the store
    pub loaded: usize,
}

/// List interventions with free-text search and status filter
#[utoipa::path(
    get,
    path = "/interventions",
    tag = "interventions",
    params(InterventionQuery),
    responses(
        (status = 200, description = "Matching interventions", body = InterventionListResponse),
        (status = 400, description = "Unknown status", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_interventions(
    State(state): State<crate::AppState>,
    Query(query): Query<InterventionQuery>,
) -> AppResult<Json<InterventionListResponse>> {
    let filter = InterventionFilter::from_query(&query)?;
    let items = state.services.interventions.search(&filter).await?;
    let total = items.len();
    Ok(Json(InterventionListResponse { items, total }))
}

/// Get intervention by ID
#[utoipa::path(
    get,
    path = "/interventions/{id}",
    tag = "interventions",
    params(("id" = String, Path, description = "Intervention ID")),
    responses(
        (status = 200, description = "Intervention details", body = InterventionDetails),
        (status = 404, description = "Intervention not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_intervention(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<InterventionDetails>> {
    let intervention = state.services.interventions.get(&id).await?;
    Ok(Json(intervention.into()))
}

/// Create intervention
#[utoipa::path(
    post,
    path = "/interventions",
    tag = "interventions",
    request_body = CreateIntervention,
    responses(
        (status = 201, description = "Intervention created", body = Intervention),
        (status = 400, description = "Invalid data", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_intervention(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateIntervention>,
) -> AppResult<(StatusCode, Json<Intervention>)> {
    let intervention = state.services.interventions.create(data).await?;
    Ok((StatusCode::CREATED, Json(intervention)))
}

/// Update intervention
#[utoipa::path(
    put,
    path = "/interventions/{id}",
    tag = "interventions",
    params(("id" = String, Path, description = "Intervention ID")),
    request_body = UpdateIntervention,
    responses(
        (status = 200, description = "Intervention updated", body = Intervention),
        (status = 400, description = "Invalid data or status change", body = crate::error::ErrorResponse),
        (status = 404, description = "Intervention not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_intervention(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(data): Json<UpdateIntervention>,
) -> AppResult<Json<Intervention>> {
    let intervention = state.services.interventions.update(&id, data).await?;
    Ok(Json(intervention))
}

/// Change intervention status
#[utoipa::path(
    put,
    path = "/interventions/{id}/status",
    tag = "interventions",
    params(("id" = String, Path, description = "Intervention ID")),
    request_body = UpdateStatus,
    responses(
        (status = 200, description = "Status changed", body = Intervention),
        (status = 400, description = "Transition not allowed", body = crate::error::ErrorResponse),
        (status = 404, description = "Intervention not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_status(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(data): Json<UpdateStatus>,
) -> AppResult<Json<Intervention>> {
    let intervention = state.services.interventions.change_status(&id, data.status).await?;
    Ok(Json(intervention))
}

/// Conclude intervention (work report, time entries, materials)
#[utoipa::path(
    post,
    path = "/interventions/{id}/conclude",
    tag = "interventions",
    params(("id" = String, Path, description = "Intervention ID")),
    request_body = ConcludeIntervention,
    responses(
        (status = 200, description = "Intervention concluded", body = InterventionDetails),
        (status = 400, description = "Invalid data, or intervention not in progress or completed", body = crate::error::ErrorResponse),
        (status = 404, description = "Intervention not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn conclude_intervention(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(data): Json<ConcludeIntervention>,
) -> AppResult<Json<InterventionDetails>> {
    let intervention = state.services.interventions.conclude(&id, data).await?;
    Ok(Json(intervention.into()))
}

/// Reload the intervention cache from the store
#[utoipa::path(
    post,
    path = "/interventions/refresh",
    tag = "interventions",
    responses(
        (status = 200, description = "Cache reloaded", body = RefreshResponse),
        (status = 503, description = "Store unavailable", body = crate::error::ErrorResponse)
    )
)]
pub async fn refresh_interventions(
    State(state): State<crate::AppState>,
) -> AppResult<Json<RefreshResponse>> {
    let loaded = state.services.interventions.refresh().await?;
    Ok(Json(RefreshResponse { loaded }))
}
