//! Stored kinship rows and kinship code reference data

use crate::person::PersonId;
use serde::{Deserialize, Serialize};

/// Identifier of a kinship code in the lookup table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KinshipCodeId(pub i64);

impl From<i64> for KinshipCodeId {
    fn from(code: i64) -> Self {
        Self(code)
    }
}

impl std::fmt::Display for KinshipCodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored, directed kinship row.
///
/// Reads as "`person_id`'s relation described by `kinship_code` is
/// `kin_person_id`".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KinshipEdge {
    pub person_id: PersonId,

    pub kin_person_id: PersonId,

    pub kinship_code: KinshipCodeId,

    /// Source text the row was extracted from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl KinshipEdge {
    pub fn new(
        person_id: impl Into<PersonId>,
        kin_person_id: impl Into<PersonId>,
        kinship_code: impl Into<KinshipCodeId>,
    ) -> Self {
        Self {
            person_id: person_id.into(),
            kin_person_id: kin_person_id.into(),
            kinship_code: kinship_code.into(),
            source: None,
            pages: None,
            notes: None,
        }
    }

    pub fn with_source(mut self, source: i64, pages: Option<String>) -> Self {
        self.source = Some(source);
        self.pages = pages;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Kinship code reference data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KinshipCode {
    pub code: KinshipCodeId,

    /// Short abbreviation, e.g. `F`, `B+`, `FBS`
    pub kin_rel: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kin_rel_chn: Option<String>,

    /// First component of a compound relation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kin_pair1: Option<KinshipCodeId>,

    /// Second component of a compound relation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kin_pair2: Option<KinshipCodeId>,
}

impl KinshipCode {
    pub fn new(code: impl Into<KinshipCodeId>, kin_rel: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            kin_rel: kin_rel.into(),
            kin_rel_chn: None,
            kin_pair1: None,
            kin_pair2: None,
        }
    }

    pub fn with_chinese(mut self, kin_rel_chn: impl Into<String>) -> Self {
        self.kin_rel_chn = Some(kin_rel_chn.into());
        self
    }

    pub fn with_pair(
        mut self,
        first: impl Into<KinshipCodeId>,
        second: impl Into<KinshipCodeId>,
    ) -> Self {
        self.kin_pair1 = Some(first.into());
        self.kin_pair2 = Some(second.into());
        self
    }

    /// Component codes, when both are present and differ from this code
    pub fn components(&self) -> Option<(KinshipCodeId, KinshipCodeId)> {
        match (self.kin_pair1, self.kin_pair2) {
            (Some(first), Some(second)) if first != self.code && second != self.code => {
                Some((first, second))
            }
            _ => None,
        }
    }
}
