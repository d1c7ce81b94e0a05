//! Intervention (service visit) model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidateEmail};

use super::enums::InterventionStatus;
use crate::{
    error::{AppError, AppResult},
    timesheet,
};

// ---------------------------------------------------------------------------
// Owned line items
// ---------------------------------------------------------------------------

/// One day's worked time by one technician
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct TimeEntry {
    pub date: NaiveDate,
    #[validate(length(min = 1, message = "Technician is required"))]
    pub technician: String,
    /// First slot start (HH:MM)
    pub start1: String,
    /// First slot end (HH:MM)
    pub end1: String,
    /// Second slot start (HH:MM)
    #[serde(default)]
    pub start2: Option<String>,
    /// Second slot end (HH:MM)
    #[serde(default)]
    pub end2: Option<String>,
    /// Derived from the slots on every save; any value sent by a client is ignored
    #[serde(default)]
    pub total_hours: f64,
}

impl TimeEntry {
    pub fn new(date: NaiveDate, technician: impl Into<String>, start1: &str, end1: &str) -> Self {
        let mut entry = Self {
            date,
            technician: technician.into(),
            start1: start1.to_string(),
            end1: end1.to_string(),
            start2: None,
            end2: None,
            total_hours: 0.0,
        };
        entry.recompute();
        entry
    }

    pub fn with_second_slot(mut self, start2: &str, end2: &str) -> Self {
        self.start2 = Some(start2.to_string());
        self.end2 = Some(end2.to_string());
        self.recompute();
        self
    }

    /// Overwrite `total_hours` from the entry's own slots
    pub fn recompute(&mut self) {
        self.total_hours = timesheet::compute_total_hours(
            Some(&self.start1),
            Some(&self.end1),
            self.start2.as_deref(),
            self.end2.as_deref(),
        );
    }

    fn normalize(&mut self) {
        self.technician = self.technician.trim().to_string();
        self.start1 = self.start1.trim().to_string();
        self.end1 = self.end1.trim().to_string();
        self.start2 = blank_to_none(self.start2.take());
        self.end2 = blank_to_none(self.end2.take());
        self.recompute();
    }
}

/// Material consumed during an intervention (snapshot, not a catalog reference)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct MaterialUsed {
    /// Unit of measure code (PZ, MT, KG, ...)
    pub unit: String,
    #[validate(range(min = 0.0, message = "Quantity must not be negative"))]
    pub quantity: f64,
    pub description: String,
}

// ---------------------------------------------------------------------------
// Intervention
// ---------------------------------------------------------------------------

/// Intervention record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Intervention {
    pub id: String,
    // Client / location
    pub company_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    // Equipment
    pub system_type: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub installation_location: Option<String>,
    pub internal_reference: Option<String>,
    // Scheduling
    pub scheduled_date: Option<NaiveDate>,
    /// HH:MM
    pub scheduled_time: Option<String>,
    pub status: InterventionStatus,
    /// Free-text technician assignment
    pub assigned_technicians: Option<String>,
    pub office_notes: Option<String>,
    // Conclusion, meaningful once `concluded` is set
    pub concluded: bool,
    pub quote_requested: bool,
    pub client_absent: bool,
    pub work_description: Option<String>,
    pub conclusion_notes: Option<String>,
    pub kilometers: Option<f64>,
    pub time_entries: Vec<TimeEntry>,
    pub materials: Vec<MaterialUsed>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Intervention {
    /// Build the stored record for a freshly created intervention
    pub fn from_create(id: String, data: &CreateIntervention, now: DateTime<Utc>) -> Self {
        Self {
            id,
            company_name: data.company_name.clone(),
            email: data.email.clone(),
            phone: data.phone.clone(),
            address: data.address.clone(),
            system_type: data.system_type.clone(),
            brand: data.brand.clone(),
            model: data.model.clone(),
            serial_number: data.serial_number.clone(),
            installation_location: data.installation_location.clone(),
            internal_reference: data.internal_reference.clone(),
            scheduled_date: data.scheduled_date,
            scheduled_time: data.scheduled_time.clone(),
            status: InterventionStatus::default(),
            assigned_technicians: data.assigned_technicians.clone(),
            office_notes: data.office_notes.clone(),
            concluded: false,
            quote_requested: false,
            client_absent: false,
            work_description: None,
            conclusion_notes: None,
            kilometers: None,
            time_entries: Vec::new(),
            materials: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Total labor hours across all time entries
    pub fn total_hours(&self) -> f64 {
        self.time_entries.iter().map(|e| e.total_hours).sum()
    }

    /// Apply the present fields of a patch in place
    pub fn apply(&mut self, patch: &UpdateIntervention, now: DateTime<Utc>) {
        macro_rules! set_field {
            ($($field:ident),* $(,)?) => {
                $(
                    if let Some(ref val) = patch.$field {
                        self.$field = val.clone();
                    }
                )*
            };
        }

        set_field!(
            company_name,
            email,
            phone,
            address,
            system_type,
            brand,
            model,
            serial_number,
            installation_location,
            internal_reference,
            scheduled_date,
            scheduled_time,
            status,
            assigned_technicians,
            office_notes,
            concluded,
            quote_requested,
            client_absent,
            work_description,
            conclusion_notes,
            kilometers,
            time_entries,
            materials,
        );
        self.updated_at = now;
    }
}

/// Intervention with its derived labor total
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InterventionDetails {
    #[serde(flatten)]
    pub intervention: Intervention,
    /// Sum of all time entries, in hours
    pub labor_hours: f64,
}

impl From<Intervention> for InterventionDetails {
    fn from(intervention: Intervention) -> Self {
        let labor_hours = intervention.total_hours();
        Self { intervention, labor_hours }
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Create intervention request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateIntervention {
    #[validate(length(min = 1, message = "Company name is required"))]
    pub company_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    pub system_type: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub installation_location: Option<String>,
    pub internal_reference: Option<String>,
    /// Scheduled date (YYYY-MM-DD)
    pub scheduled_date: Option<NaiveDate>,
    /// Scheduled time (HH:MM)
    pub scheduled_time: Option<String>,
    pub assigned_technicians: Option<String>,
    pub office_notes: Option<String>,
}

impl CreateIntervention {
    /// Trim required fields and turn blank optional fields into `None`
    pub fn normalize(&mut self) {
        for field in [&mut self.company_name, &mut self.email, &mut self.phone, &mut self.address] {
            *field = field.trim().to_string();
        }
        for field in [
            &mut self.system_type,
            &mut self.brand,
            &mut self.model,
            &mut self.serial_number,
            &mut self.installation_location,
            &mut self.internal_reference,
            &mut self.scheduled_time,
            &mut self.assigned_technicians,
            &mut self.office_notes,
        ] {
            *field = blank_to_none(field.take());
        }
    }

    /// Field checks run after `normalize`
    pub fn check(&self) -> AppResult<()> {
        self.validate()?;
        check_clock(self.scheduled_time.as_deref())
    }
}

/// Update intervention request.
///
/// An omitted field is left untouched. For optional fields an explicit
/// `null` (or a blank string) clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct UpdateIntervention {
    pub company_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub system_type: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub brand: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub model: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub serial_number: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub installation_location: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub internal_reference: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub scheduled_date: Option<Option<NaiveDate>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub scheduled_time: Option<Option<String>>,
    pub status: Option<InterventionStatus>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub assigned_technicians: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub office_notes: Option<Option<String>>,
    pub concluded: Option<bool>,
    pub quote_requested: Option<bool>,
    pub client_absent: Option<bool>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub work_description: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub conclusion_notes: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<f64>)]
    pub kilometers: Option<Option<f64>>,
    pub time_entries: Option<Vec<TimeEntry>>,
    pub materials: Option<Vec<MaterialUsed>>,
}

impl UpdateIntervention {
    pub fn status_only(status: InterventionStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Only a status change, nothing else
    pub fn is_status_only(&self) -> bool {
        self.status.is_some()
            && *self
                == Self {
                    status: self.status,
                    ..Default::default()
                }
    }

    /// Whether the patch writes any conclusion field
    pub fn touches_conclusion(&self) -> bool {
        self.concluded.is_some()
            || self.quote_requested.is_some()
            || self.client_absent.is_some()
            || self.work_description.is_some()
            || self.conclusion_notes.is_some()
            || self.kilometers.is_some()
    }

    /// Trim text, turn blank optional strings into explicit clears and
    /// recompute every time entry's hours
    pub fn normalize(&mut self) {
        for field in [&mut self.company_name, &mut self.email, &mut self.phone, &mut self.address]
            .into_iter()
            .flatten()
        {
            *field = field.trim().to_string();
        }
        for field in [
            &mut self.system_type,
            &mut self.brand,
            &mut self.model,
            &mut self.serial_number,
            &mut self.installation_location,
            &mut self.internal_reference,
            &mut self.scheduled_time,
            &mut self.assigned_technicians,
            &mut self.office_notes,
            &mut self.work_description,
            &mut self.conclusion_notes,
        ] {
            if let Some(inner) = field.as_mut() {
                *inner = blank_to_none(inner.take());
            }
        }
        if let Some(entries) = self.time_entries.as_mut() {
            entries.iter_mut().for_each(TimeEntry::normalize);
        }
        if let Some(materials) = self.materials.as_mut() {
            for material in materials.iter_mut() {
                material.unit = material.unit.trim().to_uppercase();
                material.description = material.description.trim().to_string();
            }
        }
    }

    /// Field checks run after `normalize`
    pub fn check(&self) -> AppResult<()> {
        let required = [
            ("company_name", &self.company_name),
            ("phone", &self.phone),
            ("address", &self.address),
        ];
        for (name, value) in required {
            if matches!(value, Some(v) if v.is_empty()) {
                return Err(AppError::Validation(format!("{}: must not be blank", name)));
            }
        }
        if let Some(ref email) = self.email {
            if !email.validate_email() {
                return Err(AppError::Validation("email: Invalid email format".to_string()));
            }
        }
        if let Some(Some(km)) = self.kilometers {
            if !(km >= 0.0) {
                return Err(AppError::Validation("kilometers: must not be negative".to_string()));
            }
        }
        if let Some(Some(ref time)) = self.scheduled_time {
            check_clock(Some(time))?;
        }
        for entry in self.time_entries.iter().flatten() {
            entry.validate()?;
        }
        for material in self.materials.iter().flatten() {
            material.validate()?;
        }
        Ok(())
    }
}

/// Status change request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatus {
    pub status: InterventionStatus,
}

/// Conclusion request: closes the intervention as completed.
///
/// Omitted fields keep their stored value, so entries logged while the
/// intervention was in progress survive a conclusion that does not resend them.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ConcludeIntervention {
    pub quote_requested: Option<bool>,
    pub client_absent: Option<bool>,
    pub work_description: Option<String>,
    pub conclusion_notes: Option<String>,
    pub kilometers: Option<f64>,
    pub time_entries: Option<Vec<TimeEntry>>,
    pub materials: Option<Vec<MaterialUsed>>,
}

impl From<ConcludeIntervention> for UpdateIntervention {
    fn from(data: ConcludeIntervention) -> Self {
        Self {
            status: Some(InterventionStatus::Completed),
            concluded: Some(true),
            quote_requested: data.quote_requested,
            client_absent: data.client_absent,
            work_description: data.work_description.map(Some),
            conclusion_notes: data.conclusion_notes.map(Some),
            kilometers: data.kilometers.map(Some),
            time_entries: data.time_entries,
            materials: data.materials,
            ..Default::default()
        }
    }
}

/// Query parameters for browsing interventions
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct InterventionQuery {
    /// Free-text search (company, system type, brand, model, technicians, address, notes)
    pub q: Option<String>,
    /// Status code, or "all"
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn check_clock(value: Option<&str>) -> AppResult<()> {
    match value {
        Some(time) if !timesheet::is_valid_clock(time) => Err(AppError::Validation(format!(
            "scheduled_time: '{}' is not a HH:MM time",
            time
        ))),
        _ => Ok(()),
    }
}
