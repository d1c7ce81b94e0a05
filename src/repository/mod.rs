//! Repository layer: durable storage for interventions

pub mod interventions;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::intervention::{CreateIntervention, Intervention, UpdateIntervention},
};

pub use interventions::PgInterventionRepository;
pub use memory::MemoryInterventionRepository;

/// Storage capability for intervention records.
///
/// The store assigns ids on creation and reports `NotFound` for updates of
/// unknown ids, `Conflict` for concurrent-modification clashes and
/// `Unavailable` when it cannot be reached.
#[async_trait]
pub trait InterventionRepository: Send + Sync {
    /// All records, in creation order
    async fn list(&self) -> AppResult<Vec<Intervention>>;

    /// One record by id
    async fn get(&self, id: &str) -> AppResult<Intervention>;

    /// Store a new record with status `requested`
    async fn create(&self, data: &CreateIntervention) -> AppResult<Intervention>;

    /// Apply the present fields of `data` to an existing record
    async fn update(&self, id: &str, data: &UpdateIntervention) -> AppResult<Intervention>;
}

/// Main repository struct holding the configured storage backends
#[derive(Clone)]
pub struct Repository {
    pub interventions: Arc<dyn InterventionRepository>,
}

impl Repository {
    /// Create a PostgreSQL-backed repository with the given pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            interventions: Arc::new(PgInterventionRepository::new(pool)),
        }
    }

    /// Create a process-local repository (development and tests)
    pub fn in_memory() -> Self {
        Self {
            interventions: Arc::new(MemoryInterventionRepository::new()),
        }
    }
}
