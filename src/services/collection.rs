//! In-memory cache of intervention records
//!
//! The repository is the system of record. This collection mirrors it for
//! browsing and is only written after a repository call has succeeded. Every
//! change bumps `revision`, which invalidates filtered views.

use crate::models::intervention::Intervention;

#[derive(Debug, Default)]
pub struct InterventionCollection {
    items: Vec<Intervention>,
    revision: u64,
    loaded: bool,
}

impl InterventionCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection with the repository listing
    pub fn replace_all(&mut self, items: Vec<Intervention>) {
        self.items = items;
        self.loaded = true;
        self.revision += 1;
    }

    /// Insert a new record or replace the one with the same id, in place.
    /// Returns `true` when the record was inserted.
    pub fn upsert(&mut self, record: Intervention) -> bool {
        self.revision += 1;
        match self.items.iter_mut().find(|i| i.id == record.id) {
            Some(existing) => {
                *existing = record;
                false
            }
            None => {
                self.items.push(record);
                true
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Intervention> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn items(&self) -> &[Intervention] {
        &self.items
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::InterventionStatus;
    use crate::search::tests::sample;

    #[test]
    fn test_upsert_inserts_then_replaces_in_place() {
        let mut collection = InterventionCollection::new();
        collection.replace_all(vec![
            sample("1", "Acme", InterventionStatus::Requested),
            sample("2", "Beta", InterventionStatus::Requested),
        ]);
        let rev = collection.revision();

        assert!(collection.upsert(sample("3", "Gamma", InterventionStatus::Requested)));
        assert_eq!(collection.items().len(), 3);

        assert!(!collection.upsert(sample("1", "Acme", InterventionStatus::InProgress)));
        assert_eq!(collection.items().len(), 3);
        assert_eq!(collection.items()[0].id, "1");
        assert_eq!(collection.get("1").unwrap().status, InterventionStatus::InProgress);
        assert_eq!(collection.revision(), rev + 2);
    }

    #[test]
    fn test_loaded_flag() {
        let mut collection = InterventionCollection::new();
        assert!(!collection.is_loaded());
        assert!(collection.items().is_empty());
        collection.replace_all(Vec::new());
        assert!(collection.is_loaded());
    }
}
