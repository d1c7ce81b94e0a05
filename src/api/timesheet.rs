//! Timesheet helper endpoints used by the time-entry forms

use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::timesheet;

/// Slot times to evaluate
#[derive(Debug, Deserialize, ToSchema)]
pub struct HoursRequest {
    pub start1: Option<String>,
    pub end1: Option<String>,
    pub start2: Option<String>,
    pub end2: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HoursResponse {
    /// Counted minutes of the first slot
    pub first_slot_minutes: u32,
    /// Counted minutes of the second slot
    pub second_slot_minutes: u32,
    pub total_hours: f64,
}

/// Half-hour clock options (00:00 to 23:30)
#[utoipa::path(
    get,
    path = "/timesheet/slots",
    tag = "timesheet",
    responses(
        (status = 200, description = "Clock values", body = Vec<String>)
    )
)]
pub async fn list_slots() -> Json<Vec<String>> {
    Json(timesheet::half_hour_slots())
}

/// Compute worked hours for a pair of slots
#[utoipa::path(
    post,
    path = "/timesheet/hours",
    tag = "timesheet",
    request_body = HoursRequest,
    responses(
        (status = 200, description = "Worked time", body = HoursResponse)
    )
)]
pub async fn compute_hours(Json(req): Json<HoursRequest>) -> Json<HoursResponse> {
    let (start1, end1) = (req.start1.as_deref(), req.end1.as_deref());
    let (start2, end2) = (req.start2.as_deref(), req.end2.as_deref());

    Json(HoursResponse {
        first_slot_minutes: timesheet::slot_minutes(start1, end1),
        second_slot_minutes: timesheet::slot_minutes(start2, end2),
        total_hours: timesheet::compute_total_hours(start1, end1, start2, end2),
    })
}
