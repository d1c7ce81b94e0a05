//! Business logic services

pub mod collection;
pub mod interventions;

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{config::LifecycleConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub interventions: interventions::InterventionsService,
}

impl Services {
    /// Create all services with the given repository. The intervention cache
    /// starts empty and is seeded by `InterventionsService::refresh` or the
    /// first read.
    pub fn new(repository: Repository, lifecycle: LifecycleConfig) -> Self {
        let collection = Arc::new(RwLock::new(collection::InterventionCollection::new()));
        let interventions = interventions::InterventionsService::new(
            repository.interventions.clone(),
            collection,
            &lifecycle,
        );

        Self { interventions }
    }
}
