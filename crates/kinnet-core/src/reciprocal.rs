//! Reciprocal resolver for reading stored edges backwards

use crate::step::AtomicStep;

/// Reciprocal of a single step: if B is A's `step`, A is B's `reciprocal_of(step)`.
///
/// The gender of the person on the other end is unknown here, so parent and
/// child reciprocals use the neutral variants. Seniority flips for siblings.
pub fn reciprocal_of(step: AtomicStep) -> AtomicStep {
    use AtomicStep::*;
    match step {
        Father | Mother | Parent => Child,
        Son | Daughter | Child => Parent,
        ElderBrother | ElderSister | ElderSibling => YoungerSibling,
        YoungerBrother | YoungerSister | YoungerSibling => ElderSibling,
        Brother | Sister | Sibling => Sibling,
        Husband => Wife,
        Wife => Husband,
        Unknown => Unknown,
    }
}

/// Reciprocal of a step sequence.
///
/// If B is A's `[F, B]` (father's brother), A is B's `[sibling, child]`: the
/// order is reversed and each step reciprocated.
pub fn reciprocal_path(steps: &[AtomicStep]) -> Vec<AtomicStep> {
    steps.iter().rev().map(|s| reciprocal_of(*s)).collect()
}
