//! Shared domain enums

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

// ---------------------------------------------------------------------------
// InterventionStatus
// ---------------------------------------------------------------------------

/// Lifecycle stage of an intervention.
///
/// `requested -> in_progress -> completed`, with `cancelled` reachable from
/// either non-terminal state. Italian form labels are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum InterventionStatus {
    #[default]
    #[serde(alias = "Da fare")]
    Requested,
    #[serde(alias = "In corso")]
    InProgress,
    #[serde(alias = "Completato")]
    Completed,
    #[serde(alias = "Annullato")]
    Cancelled,
}

impl InterventionStatus {
    pub const ALL: [InterventionStatus; 4] = [
        InterventionStatus::Requested,
        InterventionStatus::InProgress,
        InterventionStatus::Completed,
        InterventionStatus::Cancelled,
    ];

    /// Storage / wire code
    pub fn as_str(&self) -> &'static str {
        match self {
            InterventionStatus::Requested => "requested",
            InterventionStatus::InProgress => "in_progress",
            InterventionStatus::Completed => "completed",
            InterventionStatus::Cancelled => "cancelled",
        }
    }

    /// Label shown to office staff
    pub fn label(&self) -> &'static str {
        match self {
            InterventionStatus::Requested => "Da fare",
            InterventionStatus::InProgress => "In corso",
            InterventionStatus::Completed => "Completato",
            InterventionStatus::Cancelled => "Annullato",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, InterventionStatus::Completed | InterventionStatus::Cancelled)
    }

    /// Whether the forward state machine has an edge `self -> next`.
    /// Staying in the same state is not a transition and is always allowed.
    pub fn can_transition_to(&self, next: InterventionStatus) -> bool {
        use InterventionStatus::*;

        if *self == next {
            return true;
        }
        matches!(
            (self, next),
            (Requested, InProgress)
                | (Requested, Cancelled)
                | (InProgress, Completed)
                | (InProgress, Cancelled)
        )
    }

    /// Conclusion data belongs to work that has started: in progress, or
    /// already completed and being amended.
    pub fn accepts_conclusion(&self) -> bool {
        self.can_transition_to(InterventionStatus::Completed)
    }
}

impl FromStr for InterventionStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        InterventionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s || status.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| AppError::Validation(format!("Unknown status '{}'", s)))
    }
}

impl std::fmt::Display for InterventionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// StatusFilter
// ---------------------------------------------------------------------------

/// Status selector used when browsing interventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(InterventionStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: InterventionStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(StatusFilter::All),
            other => other.parse().map(StatusFilter::Only),
        }
    }
}

impl From<InterventionStatus> for StatusFilter {
    fn from(status: InterventionStatus) -> Self {
        StatusFilter::Only(status)
    }
}
