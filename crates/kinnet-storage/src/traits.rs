//! Storage backend trait definitions

use crate::error::StorageResult;
use async_trait::async_trait;
use kinnet_core::{KinshipCode, KinshipEdge, KinshipSource, PersonSummary};
use serde::{Deserialize, Serialize};

/// A self-contained set of kinship reference data and rows
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KinshipDataset {
    #[serde(default)]
    pub codes: Vec<KinshipCode>,
    #[serde(default)]
    pub persons: Vec<PersonSummary>,
    #[serde(default)]
    pub edges: Vec<KinshipEdge>,
}

impl KinshipDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_codes(mut self, codes: Vec<KinshipCode>) -> Self {
        self.codes = codes;
        self
    }

    pub fn with_persons(mut self, persons: Vec<PersonSummary>) -> Self {
        self.persons = persons;
        self
    }

    pub fn with_edges(mut self, edges: Vec<KinshipEdge>) -> Self {
        self.edges = edges;
        self
    }
}

/// Writable backend that also serves as the explorer's data source
#[async_trait]
pub trait StorageBackend: KinshipSource {
    /// Health check
    async fn health_check(&self) -> StorageResult<bool>;

    /// Save a kinship code
    async fn save_code(&self, code: &KinshipCode) -> StorageResult<()>;

    /// Save a person summary
    async fn save_person(&self, person: &PersonSummary) -> StorageResult<()>;

    /// Save a kinship row; an identical row is stored once
    async fn save_edge(&self, edge: &KinshipEdge) -> StorageResult<()>;

    /// Count stored kinship rows
    async fn edge_count(&self) -> StorageResult<usize>;

    /// Save a whole dataset
    async fn save_dataset(&self, dataset: &KinshipDataset) -> StorageResult<()> {
        for code in &dataset.codes {
            self.save_code(code).await?;
        }
        for person in &dataset.persons {
            self.save_person(person).await?;
        }
        for edge in &dataset.edges {
            self.save_edge(edge).await?;
        }
        tracing::info!(
            "Saved dataset: {} codes, {} persons, {} edges",
            dataset.codes.len(),
            dataset.persons.len(),
            dataset.edges.len()
        );
        Ok(())
    }
}
