//! Process-local intervention repository

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::InterventionRepository;
use crate::{
    error::{AppError, AppResult},
    models::intervention::{CreateIntervention, Intervention, UpdateIntervention},
};

/// Keeps records in memory, in insertion order. Data is lost on restart.
#[derive(Clone, Default)]
pub struct MemoryInterventionRepository {
    records: Arc<RwLock<Vec<Intervention>>>,
}

impl MemoryInterventionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InterventionRepository for MemoryInterventionRepository {
    async fn list(&self) -> AppResult<Vec<Intervention>> {
        Ok(self.records.read().await.clone())
    }

    async fn get(&self, id: &str) -> AppResult<Intervention> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Intervention {} not found", id)))
    }

    async fn create(&self, data: &CreateIntervention) -> AppResult<Intervention> {
        let record = Intervention::from_create(Uuid::new_v4().to_string(), data, Utc::now());
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: &str, data: &UpdateIntervention) -> AppResult<Intervention> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Intervention {} not found", id)))?;
        record.apply(data, Utc::now());
        Ok(record.clone())
    }
}
