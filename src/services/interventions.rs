//! Intervention lifecycle service
//!
//! Validates and normalizes raw edits, recomputes derived time-entry hours,
//! enforces the status state machine, delegates writes to the repository and
//! keeps the in-memory collection consistent with what the repository
//! returned. On any failure the collection is left as it was.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use super::collection::InterventionCollection;
use crate::{
    config::LifecycleConfig,
    error::{AppError, AppResult},
    models::{
        enums::InterventionStatus,
        intervention::{ConcludeIntervention, CreateIntervention, Intervention, UpdateIntervention},
    },
    repository::InterventionRepository,
    search::{FilteredView, InterventionFilter},
};

pub type SharedCollection = Arc<RwLock<InterventionCollection>>;

const REFRESH_ATTEMPTS: usize = 3;

#[derive(Clone)]
pub struct InterventionsService {
    repository: Arc<dyn InterventionRepository>,
    collection: SharedCollection,
    view: Arc<Mutex<FilteredView>>,
    allow_status_corrections: bool,
}

impl InterventionsService {
    pub fn new(
        repository: Arc<dyn InterventionRepository>,
        collection: SharedCollection,
        config: &LifecycleConfig,
    ) -> Self {
        Self {
            repository,
            collection,
            view: Arc::new(Mutex::new(FilteredView::new())),
            allow_status_corrections: config.allow_status_corrections,
        }
    }

    /// Shared handle on the cached collection
    pub fn collection(&self) -> SharedCollection {
        self.collection.clone()
    }

    /// Reload the collection from the repository.
    ///
    /// A write that lands while the listing is in flight bumps the revision;
    /// the stale listing is then discarded and the repository listed again.
    pub async fn refresh(&self) -> AppResult<usize> {
        for _ in 0..REFRESH_ATTEMPTS {
            let revision = self.collection.read().await.revision();
            let records = self.repository.list().await?;

            let mut collection = self.collection.write().await;
            if collection.revision() != revision {
                tracing::debug!("Intervention collection changed during reload, listing again");
                continue;
            }
            let count = records.len();
            collection.replace_all(records);
            tracing::info!("Intervention collection loaded: {} records", count);
            return Ok(count);
        }
        Err(AppError::Conflict(
            "Intervention collection kept changing during reload".to_string(),
        ))
    }

    async fn ensure_loaded(&self) -> AppResult<()> {
        let loaded = self.collection.read().await.is_loaded();
        if !loaded {
            self.refresh().await?;
        }
        Ok(())
    }

    /// All cached interventions, in repository order
    pub async fn list(&self) -> AppResult<Vec<Intervention>> {
        self.search(&InterventionFilter::default()).await
    }

    /// Interventions matching `filter`, in repository order
    pub async fn search(&self, filter: &InterventionFilter) -> AppResult<Vec<Intervention>> {
        self.ensure_loaded().await?;
        let collection = self.collection.read().await;
        let mut view = self.view.lock().await;
        Ok(view.get(collection.revision(), collection.items(), filter).to_vec())
    }

    /// One intervention, from the cache when present
    pub async fn get(&self, id: &str) -> AppResult<Intervention> {
        if let Some(found) = self.collection.read().await.get(id) {
            return Ok(found.clone());
        }
        self.repository.get(id).await
    }

    /// Create a new intervention in status `requested`
    pub async fn create(&self, mut data: CreateIntervention) -> AppResult<Intervention> {
        data.normalize();
        data.check()?;

        let record = self.repository.create(&data).await?;
        tracing::info!(
            "Intervention created: id={} company='{}'",
            record.id,
            record.company_name
        );
        self.collection.write().await.upsert(record.clone());
        Ok(record)
    }

    /// Apply a partial update.
    ///
    /// A status change must follow the state machine, and conclusion fields
    /// are only accepted when the resulting status is in progress or completed.
    /// Re-sending the current status alone is a no-op.
    pub async fn update(&self, id: &str, mut data: UpdateIntervention) -> AppResult<Intervention> {
        data.normalize();
        data.check()?;

        if data.is_empty() {
            return self.get(id).await;
        }
        if data.status.is_some() || data.touches_conclusion() {
            let current = self.get(id).await?;
            let target = data.status.unwrap_or(current.status);

            if target == current.status && data.is_status_only() {
                return Ok(current);
            }
            if !current.status.can_transition_to(target) {
                self.enforce(id, &format!("status '{}' -> '{}'", current.status, target))?;
            }
            if data.touches_conclusion() && !target.accepts_conclusion() {
                self.enforce(id, &format!("conclusion data while '{}'", target))?;
            }
        }
        self.write(id, data).await
    }

    pub async fn change_status(&self, id: &str, status: InterventionStatus) -> AppResult<Intervention> {
        self.update(id, UpdateIntervention::status_only(status)).await
    }

    /// Record the conclusion of the work and mark the intervention completed.
    ///
    /// Goes through the same checks as `update`: allowed from `in_progress`,
    /// or on a completed intervention to amend its conclusion fields.
    pub async fn conclude(&self, id: &str, data: ConcludeIntervention) -> AppResult<Intervention> {
        let record = self.update(id, data.into()).await?;
        tracing::info!(
            "Intervention concluded: id={} labor_hours={:.2} materials={}",
            record.id,
            record.total_hours(),
            record.materials.len()
        );
        Ok(record)
    }

    /// Let a lifecycle rule violation through as an administrative correction
    /// when configured, reject it otherwise
    fn enforce(&self, id: &str, change: &str) -> AppResult<()> {
        if self.allow_status_corrections {
            tracing::warn!("Status correction on intervention {}: {}", id, change);
            return Ok(());
        }
        tracing::warn!("Rejected change on intervention {}: {}", id, change);
        Err(AppError::Validation(format!(
            "Intervention {} does not allow {}",
            id, change
        )))
    }

    async fn write(&self, id: &str, data: UpdateIntervention) -> AppResult<Intervention> {
        let record = self
            .repository
            .update(id, &data)
            .await
            .inspect_err(|e| tracing::warn!("Intervention {} not saved: {}", id, e))?;

        tracing::info!(
            "Intervention updated: id={} status={}",
            record.id,
            record.status.as_str()
        );
        self.collection.write().await.upsert(record.clone());
        Ok(record)
    }
}
