//! In-memory storage backend for testing and embedding

use crate::codes::standard_codes;
use crate::error::{StorageError, StorageResult};
use crate::traits::StorageBackend;
use async_trait::async_trait;
use kinnet_core::{
    KinshipCode, KinshipCodeId, KinshipEdge, KinshipSource, PersonId, PersonSummary,
};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage backend
///
/// Rows are kept in insertion order, so lookups are deterministic.
pub struct MemoryStorage {
    edges: RwLock<Vec<KinshipEdge>>,
    codes: RwLock<HashMap<KinshipCodeId, KinshipCode>>,
    persons: RwLock<HashMap<PersonId, PersonSummary>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            edges: RwLock::new(Vec::new()),
            codes: RwLock::new(HashMap::new()),
            persons: RwLock::new(HashMap::new()),
        }
    }

    /// Storage preloaded with the built-in code table
    pub fn with_standard_codes() -> Self {
        let codes = standard_codes()
            .into_iter()
            .map(|c| (c.code, c))
            .collect();
        Self {
            codes: RwLock::new(codes),
            ..Self::new()
        }
    }

    fn lock_error(e: impl std::fmt::Display) -> StorageError {
        StorageError::Lock(e.to_string())
    }

    fn edges_where(&self, keep: impl Fn(&KinshipEdge) -> bool) -> StorageResult<Vec<KinshipEdge>> {
        let edges = self.edges.read().map_err(Self::lock_error)?;
        Ok(edges.iter().filter(|e| keep(e)).cloned().collect())
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KinshipSource for MemoryStorage {
    async fn get_kinship_edges(&self, person_id: PersonId) -> kinnet_core::Result<Vec<KinshipEdge>> {
        Ok(self.edges_where(|e| e.person_id == person_id)?)
    }

    async fn get_kinship_edges_as_target(
        &self,
        person_id: PersonId,
    ) -> kinnet_core::Result<Vec<KinshipEdge>> {
        Ok(self.edges_where(|e| e.kin_person_id == person_id)?)
    }

    async fn get_kinship_code(&self, code: KinshipCodeId) -> kinnet_core::Result<Option<KinshipCode>> {
        let codes = self.codes.read().map_err(Self::lock_error)?;
        Ok(codes.get(&code).cloned())
    }

    async fn get_person(&self, person_id: PersonId) -> kinnet_core::Result<Option<PersonSummary>> {
        let persons = self.persons.read().map_err(Self::lock_error)?;
        Ok(persons.get(&person_id).cloned())
    }
}

#[async_trait]
impl StorageBackend for MemoryStorage {
    async fn health_check(&self) -> StorageResult<bool> {
        Ok(true)
    }

    async fn save_code(&self, code: &KinshipCode) -> StorageResult<()> {
        let mut codes = self.codes.write().map_err(Self::lock_error)?;
        codes.insert(code.code, code.clone());
        Ok(())
    }

    async fn save_person(&self, person: &PersonSummary) -> StorageResult<()> {
        let mut persons = self.persons.write().map_err(Self::lock_error)?;
        persons.insert(person.person_id, person.clone());
        Ok(())
    }

    async fn save_edge(&self, edge: &KinshipEdge) -> StorageResult<()> {
        let mut edges = self.edges.write().map_err(Self::lock_error)?;

        // Check for duplicate
        let exists = edges.iter().any(|e| {
            e.person_id == edge.person_id
                && e.kin_person_id == edge.kin_person_id
                && e.kinship_code == edge.kinship_code
        });

        if !exists {
            edges.push(edge.clone());
        }
        Ok(())
    }

    async fn edge_count(&self) -> StorageResult<usize> {
        let edges = self.edges.read().map_err(Self::lock_error)?;
        Ok(edges.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::{FATHER, SON};

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = MemoryStorage::with_standard_codes();
        assert!(storage.health_check().await.unwrap());

        storage.save_edge(&KinshipEdge::new(1, 2, FATHER)).await.unwrap();
        storage.save_edge(&KinshipEdge::new(1, 2, FATHER)).await.unwrap();
        storage.save_edge(&KinshipEdge::new(2, 1, SON)).await.unwrap();
        assert_eq!(storage.edge_count().await.unwrap(), 2);

        let outgoing = storage.get_kinship_edges(PersonId(1)).await.unwrap();
        assert_eq!(outgoing.len(), 1);
        assert_eq!(outgoing[0].kin_person_id, PersonId(2));

        let incoming = storage.get_kinship_edges_as_target(PersonId(1)).await.unwrap();
        assert_eq!(incoming.len(), 1);
        assert_eq!(incoming[0].person_id, PersonId(2));

        let code = storage.get_kinship_code(KinshipCodeId(FATHER)).await.unwrap();
        assert_eq!(code.unwrap().kin_rel, "F");
        assert!(storage.get_kinship_code(KinshipCodeId(-1)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_person_lookup() {
        let storage = MemoryStorage::new();
        storage
            .save_person(&PersonSummary::new(7).with_name("Su Shi"))
            .await
            .unwrap();

        let person = storage.get_person(PersonId(7)).await.unwrap();
        assert_eq!(person.unwrap().name.as_deref(), Some("Su Shi"));
        assert!(storage.get_person(PersonId(8)).await.unwrap().is_none());
    }
}
