//! Free-text and status filtering over the in-memory intervention collection
//!
//! Filtering is a stable subsequence: records keep their original relative
//! order. The free-text query is matched case-insensitively as a substring
//! against every field registered in [`SEARCHABLE_FIELDS`].

pub mod view;

pub use view::FilteredView;

use crate::{
    error::AppResult,
    models::{
        enums::StatusFilter,
        intervention::{Intervention, InterventionQuery},
    },
};

type FieldExtractor = fn(&Intervention) -> Option<&str>;

fn company_name(i: &Intervention) -> Option<&str> {
    Some(&i.company_name)
}

fn system_type(i: &Intervention) -> Option<&str> {
    i.system_type.as_deref()
}

fn brand(i: &Intervention) -> Option<&str> {
    i.brand.as_deref()
}

fn model(i: &Intervention) -> Option<&str> {
    i.model.as_deref()
}

fn assigned_technicians(i: &Intervention) -> Option<&str> {
    i.assigned_technicians.as_deref()
}

fn address(i: &Intervention) -> Option<&str> {
    Some(&i.address)
}

fn office_notes(i: &Intervention) -> Option<&str> {
    i.office_notes.as_deref()
}

/// Fields the free-text query is matched against
pub const SEARCHABLE_FIELDS: &[FieldExtractor] = &[
    company_name,
    system_type,
    brand,
    model,
    assigned_technicians,
    address,
    office_notes,
];

/// A normalized search: lowercased, trimmed query plus a status selector
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct InterventionFilter {
    query: String,
    status: StatusFilter,
}

impl InterventionFilter {
    pub fn new(query: &str, status: StatusFilter) -> Self {
        Self {
            query: query.trim().to_lowercase(),
            status,
        }
    }

    /// Build a filter from API query parameters
    pub fn from_query(params: &InterventionQuery) -> AppResult<Self> {
        let status = match params.status.as_deref() {
            Some(raw) => raw.parse()?,
            None => StatusFilter::All,
        };
        Ok(Self::new(params.q.as_deref().unwrap_or_default(), status))
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn status(&self) -> StatusFilter {
        self.status
    }

    fn matches_text(&self, intervention: &Intervention) -> bool {
        if self.query.is_empty() {
            return true;
        }
        SEARCHABLE_FIELDS
            .iter()
            .filter_map(|extract| extract(intervention))
            .any(|value| value.to_lowercase().contains(&self.query))
    }

    pub fn matches(&self, intervention: &Intervention) -> bool {
        self.status.matches(intervention.status) && self.matches_text(intervention)
    }
}

/// Records passing `filter`, in their original order
pub fn filter_interventions<'a>(
    interventions: &'a [Intervention],
    filter: &InterventionFilter,
) -> Vec<&'a Intervention> {
    interventions.iter().filter(|i| filter.matches(i)).collect()
}
