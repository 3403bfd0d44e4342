//! Read-only kinship data source

use crate::error::Result;
use crate::kinship::{KinshipCode, KinshipCodeId, KinshipEdge};
use crate::person::{PersonId, PersonSummary};
use async_trait::async_trait;

/// Storage collaborator consumed by the explorer.
///
/// Failures must surface as errors: an unreachable store is never the same
/// as a person with no relatives.
#[async_trait]
pub trait KinshipSource: Send + Sync {
    /// All stored rows where the person is the source
    async fn get_kinship_edges(&self, person_id: PersonId) -> Result<Vec<KinshipEdge>>;

    /// All stored rows where the person is the target
    async fn get_kinship_edges_as_target(&self, person_id: PersonId) -> Result<Vec<KinshipEdge>>;

    /// Look up a kinship code
    async fn get_kinship_code(&self, code: KinshipCodeId) -> Result<Option<KinshipCode>>;

    /// Biographical summary used to label network nodes
    async fn get_person(&self, _person_id: PersonId) -> Result<Option<PersonSummary>> {
        Ok(None)
    }
}
