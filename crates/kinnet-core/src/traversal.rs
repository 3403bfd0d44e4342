//! Kinship network traversal
//!
//! Explores outward from an ego in order of increasing relationship
//! distance. The first state popped for a person is the one reported. Later
//! states for the same person are still expanded when no earlier expanded
//! state is at least as good on every counter, so a relative is found
//! whenever any path to them stays inside the limits.

use crate::classify::RelationClassifier;
use crate::error::{Error, Result};
use crate::filter::{KinshipFilterOptions, KinshipFilterOverrides};
use crate::kinship::{KinshipCodeId, KinshipEdge};
use crate::mourning::{KinshipCounts, MourningPolicy, WeightedMourningPolicy};
use crate::network::{
    LinkDirection, PathLink, PersonKinshipNetworkResult, ResultAssembler, TraversalStats,
};
use crate::person::PersonId;
use crate::reciprocal::reciprocal_path;
use crate::simplify::TermSimplifier;
use crate::source::KinshipSource;
use crate::step::{render_path, AtomicStep};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A candidate path from the ego to one person
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalState {
    pub person_id: PersonId,

    /// Stored edges followed, in order
    pub links: Vec<PathLink>,

    /// Flattened steps of all links
    pub steps: Vec<AtomicStep>,

    pub counts: KinshipCounts,

    /// Number of links; always `links.len()`
    pub depth: u32,
}

impl TraversalState {
    /// The ego itself
    pub fn root(person_id: PersonId) -> Self {
        Self {
            person_id,
            links: Vec::new(),
            steps: Vec::new(),
            counts: KinshipCounts::default(),
            depth: 0,
        }
    }

    /// Follow one more link
    pub fn extend(&self, link: PathLink) -> Self {
        let mut counts = self.counts;
        for step in &link.steps {
            counts.record(*step);
        }

        let mut steps = self.steps.clone();
        steps.extend_from_slice(&link.steps);
        let mut links = self.links.clone();
        let person_id = link.to;
        links.push(link);

        Self {
            person_id,
            links,
            steps,
            counts,
            depth: self.depth + 1,
        }
    }

    pub fn distance(&self) -> u32 {
        self.counts.generations_up
            + self.counts.generations_down
            + self.counts.collateral_steps
            + self.counts.marriage_links
    }

    pub fn relationship_path(&self) -> String {
        render_path(&self.steps)
    }

    pub fn is_within(&self, filters: &KinshipFilterOptions) -> bool {
        self.counts.generations_up <= filters.max_ancestor_gen
            && self.counts.generations_down <= filters.max_descend_gen
            && self.counts.collateral_steps <= filters.max_collateral_links
            && self.counts.marriage_links <= filters.max_marriage_links
            && self.depth <= filters.max_loop_depth
    }

    /// `a` dominates `b` when it is no worse on any counter
    fn dominates(a: &(KinshipCounts, u32), b: &(KinshipCounts, u32)) -> bool {
        a.0.generations_up <= b.0.generations_up
            && a.0.generations_down <= b.0.generations_down
            && a.0.collateral_steps <= b.0.collateral_steps
            && a.0.marriage_links <= b.0.marriage_links
            && a.1 <= b.1
    }

    /// Recompute derived fields and compare against the stored ones
    pub fn check_invariants(&self) -> Result<()> {
        if self.depth as usize != self.links.len() {
            return Err(Error::Invariant(format!(
                "depth {} does not match {} links for person {}",
                self.depth,
                self.links.len(),
                self.person_id
            )));
        }

        let recomputed = self
            .links
            .iter()
            .fold(TraversalState::root(self.person_id), |state, link| {
                state.extend(link.clone())
            });
        if recomputed.counts != self.counts || recomputed.steps != self.steps {
            return Err(Error::Invariant(format!(
                "counters for person {} do not match path {}",
                self.person_id,
                self.relationship_path()
            )));
        }
        Ok(())
    }
}

/// Frontier entry: min-ordered by distance, depth, rendered path, person
#[derive(Debug)]
struct FrontierEntry {
    distance: u32,
    depth: u32,
    path: String,
    state: TraversalState,
}

impl FrontierEntry {
    fn new(state: TraversalState) -> Self {
        Self {
            distance: state.distance(),
            depth: state.depth,
            path: state.relationship_path(),
            state,
        }
    }

    fn key(&self) -> (u32, u32, &str, PersonId) {
        (self.distance, self.depth, &self.path, self.state.person_id)
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Per-call lookup cache; dropped when the exploration returns
struct TraversalContext<'a, S: KinshipSource + ?Sized> {
    source: &'a S,
    classifier: RelationClassifier,
    outgoing: HashMap<PersonId, Vec<KinshipEdge>>,
    incoming: HashMap<PersonId, Vec<KinshipEdge>>,
    codes: HashMap<KinshipCodeId, Vec<AtomicStep>>,
}

impl<'a, S: KinshipSource + ?Sized> TraversalContext<'a, S> {
    fn new(source: &'a S, classifier: RelationClassifier) -> Self {
        Self {
            source,
            classifier,
            outgoing: HashMap::new(),
            incoming: HashMap::new(),
            codes: HashMap::new(),
        }
    }

    async fn steps_for(&mut self, code: KinshipCodeId) -> Result<Vec<AtomicStep>> {
        if let Some(steps) = self.codes.get(&code) {
            return Ok(steps.clone());
        }

        let steps = match self.source.get_kinship_code(code).await? {
            None => {
                tracing::warn!("Kinship code {} not found, following as unknown", code);
                vec![AtomicStep::Unknown]
            }
            Some(kinship_code) => match kinship_code.components() {
                Some((first, second)) => {
                    let first = self.source.get_kinship_code(first).await?;
                    let second = self.source.get_kinship_code(second).await?;
                    match (first, second) {
                        (Some(first), Some(second)) => self
                            .classifier
                            .classify(&kinship_code, Some((&first, &second))),
                        _ => self.classifier.classify(&kinship_code, None),
                    }
                }
                None => self.classifier.classify(&kinship_code, None),
            },
        };

        self.codes.insert(code, steps.clone());
        Ok(steps)
    }

    async fn outgoing_edges(&mut self, person_id: PersonId) -> Result<Vec<KinshipEdge>> {
        if let Some(edges) = self.outgoing.get(&person_id) {
            return Ok(edges.clone());
        }
        let mut edges = self.source.get_kinship_edges(person_id).await?;
        edges.sort_by_key(|e| (e.kin_person_id, e.kinship_code));
        self.outgoing.insert(person_id, edges.clone());
        Ok(edges)
    }

    async fn incoming_edges(&mut self, person_id: PersonId) -> Result<Vec<KinshipEdge>> {
        if let Some(edges) = self.incoming.get(&person_id) {
            return Ok(edges.clone());
        }
        let mut edges = self.source.get_kinship_edges_as_target(person_id).await?;
        edges.sort_by_key(|e| (e.person_id, e.kinship_code));
        self.incoming.insert(person_id, edges.clone());
        Ok(edges)
    }

    /// Links leaving `person_id`, stored direction first
    async fn links_from(
        &mut self,
        person_id: PersonId,
        include_reciprocal: bool,
    ) -> Result<Vec<PathLink>> {
        let mut links = Vec::new();

        for edge in self.outgoing_edges(person_id).await? {
            if edge.kin_person_id == person_id {
                continue;
            }
            links.push(PathLink {
                from: person_id,
                to: edge.kin_person_id,
                kinship_code: edge.kinship_code,
                direction: LinkDirection::Stored,
                steps: self.steps_for(edge.kinship_code).await?,
            });
        }

        if include_reciprocal {
            for edge in self.incoming_edges(person_id).await? {
                if edge.person_id == person_id {
                    continue;
                }
                let steps = self.steps_for(edge.kinship_code).await?;
                links.push(PathLink {
                    from: person_id,
                    to: edge.person_id,
                    kinship_code: edge.kinship_code,
                    direction: LinkDirection::Reciprocal,
                    steps: reciprocal_path(&steps),
                });
            }
        }

        Ok(links)
    }
}

/// Kinship network explorer
///
/// Holds the injected data source and classification policies. Each call
/// builds its own caches, so concurrent explorations never share mutable
/// state.
pub struct KinshipExplorer<S: KinshipSource + ?Sized> {
    source: Arc<S>,
    classifier: RelationClassifier,
    simplifier: TermSimplifier,
    mourning: Arc<dyn MourningPolicy>,
    defaults: KinshipFilterOptions,
    timeout: Option<Duration>,
}

impl<S: KinshipSource + ?Sized> KinshipExplorer<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            classifier: RelationClassifier::new(),
            simplifier: TermSimplifier::standard(),
            mourning: Arc::new(WeightedMourningPolicy::default()),
            defaults: KinshipFilterOptions::default(),
            timeout: None,
        }
    }

    /// Replace the kin-term dictionary
    pub fn with_simplifier(mut self, simplifier: TermSimplifier) -> Self {
        self.simplifier = simplifier;
        self
    }

    /// Replace the mourning-grade scoring
    pub fn with_mourning_policy(mut self, policy: impl MourningPolicy + 'static) -> Self {
        self.mourning = Arc::new(policy);
        self
    }

    /// Options that caller overrides are merged onto
    pub fn with_defaults(mut self, defaults: KinshipFilterOptions) -> Self {
        self.defaults = defaults;
        self
    }

    /// Stop the frontier loop after `timeout` and return a truncated result
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn defaults(&self) -> &KinshipFilterOptions {
        &self.defaults
    }

    /// Explore a person's kinship network; unset overrides keep the defaults
    pub async fn explore_kinship_network(
        &self,
        person_id: PersonId,
        overrides: &KinshipFilterOverrides,
    ) -> Result<PersonKinshipNetworkResult> {
        let filters = self.defaults.merged(overrides);
        self.explore_with_options(person_id, filters).await
    }

    /// Explore with fully specified options
    pub async fn explore_with_options(
        &self,
        person_id: PersonId,
        filters: KinshipFilterOptions,
    ) -> Result<PersonKinshipNetworkResult> {
        filters.validate()?;

        let started = Instant::now();
        tracing::debug!(
            "Exploring kinship network: person={}, filters={:?}",
            person_id,
            filters
        );

        let mut ctx = TraversalContext::new(self.source.as_ref(), self.classifier);
        let mut stats = TraversalStats::default();
        let mut heap = BinaryHeap::new();
        let mut reported: HashSet<PersonId> = HashSet::new();
        let mut expanded: HashMap<PersonId, Vec<(KinshipCounts, u32)>> = HashMap::new();
        let mut finalized: Vec<TraversalState> = Vec::new();
        let mut truncated = false;

        reported.insert(person_id);
        heap.push(FrontierEntry::new(TraversalState::root(person_id)));

        while let Some(FrontierEntry { state, .. }) = heap.pop() {
            if let Some(timeout) = self.timeout {
                if started.elapsed() >= timeout {
                    tracing::warn!(
                        "Kinship exploration for {} timed out after {:?}; returning {} finalized nodes",
                        person_id,
                        timeout,
                        finalized.len()
                    );
                    truncated = true;
                    break;
                }
            }

            state.check_invariants()?;

            if reported.insert(state.person_id) {
                finalized.push(state.clone());
            }

            let label = (state.counts, state.depth);
            let labels = expanded.entry(state.person_id).or_default();
            if labels.iter().any(|l| TraversalState::dominates(l, &label)) {
                stats.states_pruned += 1;
                continue;
            }
            labels.push(label);

            stats.states_expanded += 1;
            stats.max_depth_reached = stats.max_depth_reached.max(state.depth);

            if state.depth >= filters.max_loop_depth {
                continue;
            }
            if !filters.include_derived && state.depth >= 1 {
                continue;
            }

            for link in ctx
                .links_from(state.person_id, filters.include_reciprocal)
                .await?
            {
                stats.edges_examined += 1;

                if link.to == person_id {
                    continue;
                }

                let next = state.extend(link);
                if !next.is_within(&filters) {
                    tracing::trace!(
                        "Pruned {} via {} (counts {:?}, depth {})",
                        next.person_id,
                        next.relationship_path(),
                        next.counts,
                        next.depth
                    );
                    stats.states_pruned += 1;
                    continue;
                }
                heap.push(FrontierEntry::new(next));
            }
        }

        let mut persons = HashMap::new();
        for state in &finalized {
            if let Some(summary) = self.source.get_person(state.person_id).await? {
                persons.insert(state.person_id, summary);
            }
        }

        let assembler = ResultAssembler::new(&self.simplifier, self.mourning.as_ref());
        let result = assembler.assemble(
            person_id,
            filters,
            finalized,
            &persons,
            stats,
            started.elapsed(),
            truncated,
        )?;

        tracing::debug!(
            "Kinship network for {}: {} nodes ({} direct, {} derived), {} states expanded, {} pruned",
            person_id,
            result.total_count,
            result.direct_count,
            result.derived_count,
            result.stats.states_expanded,
            result.stats.states_pruned
        );

        Ok(result)
    }
}
