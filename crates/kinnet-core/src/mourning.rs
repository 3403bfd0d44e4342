//! Mourning-circle (五服) classification
//!
//! The traditional five grades rank kin by ritual mourning obligation. Here
//! a grade is approximated from the accumulated counters of a relationship
//! path: grade 0 is the closest tier, 5 the outermost, and anything beyond
//! falls outside the circle.

use crate::step::{AtomicStep, GenerationDelta};
use serde::{Deserialize, Serialize};

/// Outermost mourning grade
pub const MAX_MOURNING_DEGREE: u8 = 5;

/// Counters accumulated along a relationship path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KinshipCounts {
    pub generations_up: u32,
    pub generations_down: u32,
    pub collateral_steps: u32,
    pub marriage_links: u32,
}

impl KinshipCounts {
    pub fn new(up: u32, down: u32, collateral: u32, marriage: u32) -> Self {
        Self {
            generations_up: up,
            generations_down: down,
            collateral_steps: collateral,
            marriage_links: marriage,
        }
    }

    /// Counters for a bare step sequence
    pub fn from_steps(steps: &[AtomicStep]) -> Self {
        let mut counts = Self::default();
        for step in steps {
            counts.record(*step);
        }
        counts
    }

    /// Counters for grading a path.
    ///
    /// A parent step directly followed by a child step passes through a
    /// common ancestor, so the pair counts as one collateral step: `FS`
    /// grades like `B`, `FFSS` like `FBS`.
    pub fn for_mourning(steps: &[AtomicStep]) -> Self {
        let mut counts = Self::default();
        let mut iter = steps.iter().copied().peekable();
        while let Some(step) = iter.next() {
            let through_ancestor = step.generation_delta() == GenerationDelta::Up
                && iter
                    .peek()
                    .is_some_and(|next| next.generation_delta() == GenerationDelta::Down);
            if through_ancestor {
                iter.next();
                counts.collateral_steps += 1;
            } else {
                counts.record(step);
            }
        }
        counts
    }

    /// Add one step to the counters
    pub fn record(&mut self, step: AtomicStep) {
        match step.generation_delta() {
            GenerationDelta::Up => self.generations_up += 1,
            GenerationDelta::Down => self.generations_down += 1,
            GenerationDelta::None => {}
        }
        if step.is_collateral() {
            self.collateral_steps += 1;
        }
        if step.is_marriage() {
            self.marriage_links += 1;
        }
    }

    pub fn generation_distance(&self) -> u32 {
        self.generations_up + self.generations_down
    }
}

/// Scoring policy for mourning grades
pub trait MourningPolicy: Send + Sync {
    /// Grade in `0..=5`, or `None` when outside all five grades
    fn degree_of(&self, counts: &KinshipCounts) -> Option<u8>;
}

/// Weighted sum of generation distance, collateral steps and marriage links.
///
/// `degree = (generation * (up + down) + collateral * c + marriage * m) / divisor`,
/// rounded down. With the default weights full siblings land on grade 1,
/// parents and children on 1, first cousins (father's brother's son) on 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedMourningPolicy {
    pub generation_weight: u32,
    pub collateral_weight: u32,
    pub marriage_weight: u32,
    pub divisor: u32,
}

impl Default for WeightedMourningPolicy {
    fn default() -> Self {
        Self {
            generation_weight: 3,
            collateral_weight: 2,
            marriage_weight: 2,
            divisor: 2,
        }
    }
}

impl WeightedMourningPolicy {
    pub fn score(&self, counts: &KinshipCounts) -> u32 {
        let generations = self
            .generation_weight
            .saturating_mul(counts.generation_distance());
        let collateral = self
            .collateral_weight
            .saturating_mul(counts.collateral_steps);
        let marriage = self.marriage_weight.saturating_mul(counts.marriage_links);
        generations
            .saturating_add(collateral)
            .saturating_add(marriage)
            / self.divisor.max(1)
    }
}

impl MourningPolicy for WeightedMourningPolicy {
    fn degree_of(&self, counts: &KinshipCounts) -> Option<u8> {
        let score = self.score(counts);
        if score > u32::from(MAX_MOURNING_DEGREE) {
            None
        } else {
            Some(score as u8)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn degree(up: u32, down: u32, collateral: u32, marriage: u32) -> Option<u8> {
        WeightedMourningPolicy::default().degree_of(&KinshipCounts::new(up, down, collateral, marriage))
    }

    #[test]
    fn test_reference_cases() {
        // full sibling
        assert_eq!(degree(0, 0, 1, 0), Some(1));
        // father's brother's son
        assert_eq!(degree(1, 1, 1, 0), Some(4));
        // parent, child
        assert_eq!(degree(1, 0, 0, 0), Some(1));
        assert_eq!(degree(0, 1, 0, 0), Some(1));
        // wife
        assert_eq!(degree(0, 0, 0, 1), Some(1));
        // self
        assert_eq!(degree(0, 0, 0, 0), Some(0));
    }

    #[test]
    fn test_counts_from_steps() {
        use AtomicStep::*;
        let counts = KinshipCounts::from_steps(&[Father, ElderBrother, Wife, Son]);
        assert_eq!(counts, KinshipCounts::new(1, 1, 1, 1));
        assert_eq!(KinshipCounts::from_steps(&[Unknown]), KinshipCounts::default());
    }

    #[test]
    fn test_chained_paths_grade_like_compound_codes() {
        use AtomicStep::*;
        let policy = WeightedMourningPolicy::default();
        let grade = |steps: &[AtomicStep]| policy.degree_of(&KinshipCounts::for_mourning(steps));

        assert_eq!(KinshipCounts::for_mourning(&[Father, Son]), KinshipCounts::new(0, 0, 1, 0));
        assert_eq!(grade(&[Father, Son]), Some(1));
        assert_eq!(grade(&[Parent, Child]), grade(&[Sibling]));
        assert_eq!(
            KinshipCounts::for_mourning(&[Father, Father, Son, Son]),
            KinshipCounts::new(1, 1, 1, 0)
        );
        assert_eq!(grade(&[Father, Father, Son, Son]), Some(4));
        assert_eq!(grade(&[Father, Father, Son]), grade(&[Father, Brother]));

        // no common ancestor between child and parent steps
        assert_eq!(KinshipCounts::for_mourning(&[Son, Father]), KinshipCounts::new(1, 1, 0, 0));
        assert_eq!(
            KinshipCounts::for_mourning(&[Father, ElderBrother, Son]),
            KinshipCounts::from_steps(&[Father, ElderBrother, Son])
        );
    }

    #[test]
    fn test_outside_circle() {
        // great-great-great-grandfather
        assert_eq!(degree(5, 0, 0, 0), None);
        // second cousin
        assert_eq!(degree(2, 2, 1, 0), None);
    }

    #[test]
    fn test_monotonic_in_each_counter() {
        let policy = WeightedMourningPolicy::default();
        let base = KinshipCounts::new(1, 1, 0, 0);
        let base_score = policy.score(&base);
        for bumped in [
            KinshipCounts::new(2, 1, 0, 0),
            KinshipCounts::new(1, 2, 0, 0),
            KinshipCounts::new(1, 1, 1, 0),
            KinshipCounts::new(1, 1, 0, 1),
        ] {
            assert!(policy.score(&bumped) >= base_score);
        }
    }

    #[test]
    fn test_custom_weights() {
        let strict = WeightedMourningPolicy {
            generation_weight: 1,
            collateral_weight: 1,
            marriage_weight: 5,
            divisor: 1,
        };
        assert_eq!(strict.degree_of(&KinshipCounts::new(0, 0, 0, 1)), Some(5));
        assert_eq!(strict.degree_of(&KinshipCounts::new(0, 0, 1, 1)), None);
    }
}
