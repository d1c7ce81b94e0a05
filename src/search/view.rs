//! Memoized filter result

use super::{filter_interventions, InterventionFilter};
use crate::models::intervention::Intervention;

/// Filtered view over the collection, keyed on the collection revision and
/// the normalized filter. Unrelated reads reuse the previous result.
#[derive(Debug, Default)]
pub struct FilteredView {
    key: Option<(u64, InterventionFilter)>,
    rows: Vec<Intervention>,
    computations: u64,
}

impl FilteredView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows for `filter` over `items` at `revision`, recomputed only when
    /// either the revision or the filter changed since the last call.
    pub fn get(&mut self, revision: u64, items: &[Intervention], filter: &InterventionFilter) -> &[Intervention] {
        let fresh = matches!(&self.key, Some((rev, cached)) if *rev == revision && cached == filter);
        if !fresh {
            self.rows = filter_interventions(items, filter).into_iter().cloned().collect();
            self.key = Some((revision, filter.clone()));
            self.computations += 1;
            tracing::debug!(
                "Filtered view recomputed (#{}): revision={} query='{}' rows={}",
                self.computations,
                revision,
                filter.query(),
                self.rows.len()
            );
        }
        &self.rows
    }

    /// Number of times the view has been recomputed
    #[cfg(test)]
    pub(crate) fn computations(&self) -> u64 {
        self.computations
    }
}
