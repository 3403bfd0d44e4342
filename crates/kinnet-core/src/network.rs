//! Kinship network results and their assembly

use crate::error::{Error, Result};
use crate::filter::KinshipFilterOptions;
use crate::kinship::KinshipCodeId;
use crate::mourning::{KinshipCounts, MourningPolicy};
use crate::person::{PersonId, PersonSummary};
use crate::simplify::TermSimplifier;
use crate::step::AtomicStep;
use crate::traversal::TraversalState;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// How a stored edge was followed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkDirection {
    /// From the row's person to its kin
    Stored,
    /// From the row's kin back to its person, via the reciprocal steps
    Reciprocal,
}

/// One stored edge on a relationship path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathLink {
    pub from: PersonId,
    pub to: PersonId,
    pub kinship_code: KinshipCodeId,
    pub direction: LinkDirection,
    /// Steps describing `to` relative to `from`
    pub steps: Vec<AtomicStep>,
}

/// How a relative was reached from the ego
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KinshipPathInfo {
    /// Compact notation of the steps, e.g. `FB+S`
    pub relationship_path: String,

    pub steps: Vec<AtomicStep>,

    pub links: Vec<PathLink>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub simplified_term: Option<String>,

    pub generations_up: u32,
    pub generations_down: u32,
    pub collateral_steps: u32,
    pub marriage_links: u32,

    /// `generations_up + generations_down + collateral_steps + marriage_links`
    pub distance: u32,

    pub is_blood_relation: bool,

    /// Some step on the path came from an unreadable code
    pub low_confidence: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub within_mourning_circle: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mourning_degree: Option<u8>,
}

/// A reachable relative
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KinshipNetworkNode {
    pub person_id: PersonId,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_name_chn: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub death_year: Option<i32>,

    pub path_info: KinshipPathInfo,
}

impl KinshipNetworkNode {
    /// Backed by a single stored row
    pub fn is_direct(&self) -> bool {
        self.path_info.links.len() == 1
    }
}

/// Traversal statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraversalStats {
    pub states_expanded: usize,
    pub edges_examined: usize,
    pub states_pruned: usize,
    pub max_depth_reached: u32,
}

/// Result of exploring one person's kinship network
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonKinshipNetworkResult {
    pub person_id: PersonId,
    pub nodes: Vec<KinshipNetworkNode>,
    pub direct_count: usize,
    pub derived_count: usize,
    pub total_count: usize,

    /// Effective filters after merging caller overrides onto defaults
    pub filters: KinshipFilterOptions,

    /// Wall-clock duration of the exploration in milliseconds
    pub processing_time: u64,

    /// The frontier loop stopped on timeout; nodes are what was finalized
    #[serde(default)]
    pub truncated: bool,

    #[serde(default)]
    pub stats: TraversalStats,
}

impl PersonKinshipNetworkResult {
    /// An empty result for an ego with no reachable relatives
    pub fn empty(person_id: PersonId, filters: KinshipFilterOptions) -> Self {
        Self {
            person_id,
            nodes: Vec::new(),
            direct_count: 0,
            derived_count: 0,
            total_count: 0,
            filters,
            processing_time: 0,
            truncated: false,
            stats: TraversalStats::default(),
        }
    }

    pub fn node(&self, person_id: PersonId) -> Option<&KinshipNetworkNode> {
        self.nodes.iter().find(|n| n.person_id == person_id)
    }

    pub fn person_ids(&self) -> Vec<PersonId> {
        self.nodes.iter().map(|n| n.person_id).collect()
    }
}

/// Packages finalized traversal states into a network result
pub struct ResultAssembler<'a> {
    simplifier: &'a TermSimplifier,
    mourning: &'a dyn MourningPolicy,
}

impl<'a> ResultAssembler<'a> {
    pub fn new(simplifier: &'a TermSimplifier, mourning: &'a dyn MourningPolicy) -> Self {
        Self {
            simplifier,
            mourning,
        }
    }

    /// Build path metadata for one finalized state
    pub fn path_info(&self, state: &TraversalState, filters: &KinshipFilterOptions) -> KinshipPathInfo {
        let counts = state.counts;

        let mourning_degree = if filters.mourning_circle {
            self.mourning
                .degree_of(&KinshipCounts::for_mourning(&state.steps))
        } else {
            None
        };

        let simplified_term = if filters.simplify_terms {
            self.simplifier.simplify(&state.steps).map(str::to_string)
        } else {
            None
        };

        KinshipPathInfo {
            relationship_path: state.relationship_path(),
            steps: state.steps.clone(),
            links: state.links.clone(),
            simplified_term,
            generations_up: counts.generations_up,
            generations_down: counts.generations_down,
            collateral_steps: counts.collateral_steps,
            marriage_links: counts.marriage_links,
            distance: state.distance(),
            is_blood_relation: counts.marriage_links == 0,
            low_confidence: state.steps.iter().any(|s| s.is_unknown()),
            within_mourning_circle: filters.mourning_circle.then_some(mourning_degree.is_some()),
            mourning_degree,
        }
    }

    pub fn assemble(
        &self,
        person_id: PersonId,
        filters: KinshipFilterOptions,
        states: Vec<TraversalState>,
        persons: &HashMap<PersonId, PersonSummary>,
        stats: TraversalStats,
        elapsed: Duration,
        truncated: bool,
    ) -> Result<PersonKinshipNetworkResult> {
        let mut seen = HashSet::new();
        let mut nodes = Vec::with_capacity(states.len());

        for state in states {
            if state.person_id == person_id {
                return Err(Error::Invariant(format!(
                    "ego {} reported as its own relative",
                    person_id
                )));
            }
            if !seen.insert(state.person_id) {
                return Err(Error::Invariant(format!(
                    "person {} finalized twice",
                    state.person_id
                )));
            }
            state.check_invariants()?;

            let path_info = self.path_info(&state, &filters);
            if path_info.within_mourning_circle == Some(false) {
                continue;
            }

            let summary = persons.get(&state.person_id);
            nodes.push(KinshipNetworkNode {
                person_id: state.person_id,
                person_name: summary.and_then(|p| p.name.clone()),
                person_name_chn: summary.and_then(|p| p.name_chn.clone()),
                birth_year: summary.and_then(|p| p.birth_year),
                death_year: summary.and_then(|p| p.death_year),
                path_info,
            });
        }

        let direct_count = nodes.iter().filter(|n| n.is_direct()).count();
        let derived_count = nodes.len() - direct_count;

        Ok(PersonKinshipNetworkResult {
            person_id,
            total_count: nodes.len(),
            direct_count,
            derived_count,
            nodes,
            filters,
            processing_time: elapsed.as_millis() as u64,
            truncated,
            stats,
        })
    }
}
