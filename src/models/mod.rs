//! Data models for FieldCare

pub mod enums;
pub mod intervention;

// Re-export commonly used types
pub use enums::{InterventionStatus, StatusFilter};
pub use intervention::{
    ConcludeIntervention, CreateIntervention, Intervention, InterventionDetails, MaterialUsed,
    TimeEntry, UpdateIntervention,
};
