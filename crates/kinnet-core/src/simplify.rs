//! Term simplifier: relationship paths to conventional kinship terms

use crate::step::AtomicStep;
use std::collections::HashMap;

/// Dictionary of known path signatures.
///
/// Lookups try the exact normalized path first, then the same path with
/// sibling seniority dropped, then with every step reduced to its neutral
/// form (parent, child, sibling). A path with no entry yields `None`.
#[derive(Debug, Clone)]
pub struct TermSimplifier {
    terms: HashMap<Vec<AtomicStep>, String>,
}

impl Default for TermSimplifier {
    fn default() -> Self {
        Self::standard()
    }
}

impl TermSimplifier {
    /// An empty dictionary
    pub fn empty() -> Self {
        Self {
            terms: HashMap::new(),
        }
    }

    /// The built-in dictionary of common kin terms
    pub fn standard() -> Self {
        use AtomicStep::*;

        let entries: &[(&[AtomicStep], &str)] = &[
            (&[Father], "Father"),
            (&[Mother], "Mother"),
            (&[Parent], "Parent"),
            (&[Son], "Son"),
            (&[Daughter], "Daughter"),
            (&[Child], "Child"),
            (&[Husband], "Husband"),
            (&[Wife], "Wife"),
            (&[ElderBrother], "Elder brother"),
            (&[YoungerBrother], "Younger brother"),
            (&[Brother], "Brother"),
            (&[ElderSister], "Elder sister"),
            (&[YoungerSister], "Younger sister"),
            (&[Sister], "Sister"),
            (&[ElderSibling], "Elder sibling"),
            (&[YoungerSibling], "Younger sibling"),
            (&[Sibling], "Sibling"),
            // Grandparents and grandchildren
            (&[Father, Father], "Grandfather (paternal)"),
            (&[Father, Mother], "Grandmother (paternal)"),
            (&[Mother, Father], "Grandfather (maternal)"),
            (&[Mother, Mother], "Grandmother (maternal)"),
            (&[Parent, Parent], "Grandparent"),
            (&[Father, Father, Father], "Great-grandfather (paternal)"),
            (&[Son, Son], "Grandson (son's son)"),
            (&[Son, Daughter], "Granddaughter (son's daughter)"),
            (&[Daughter, Son], "Grandson (daughter's son)"),
            (&[Daughter, Daughter], "Granddaughter (daughter's daughter)"),
            (&[Child, Child], "Grandchild"),
            (&[Son, Son, Son], "Great-grandson (patrilineal)"),
            // Uncles and aunts
            (&[Father, ElderBrother], "Uncle (paternal, elder)"),
            (&[Father, YoungerBrother], "Uncle (paternal, younger)"),
            (&[Father, Brother], "Uncle (paternal)"),
            (&[Father, Sister], "Aunt (paternal)"),
            (&[Mother, Brother], "Uncle (maternal)"),
            (&[Mother, Sister], "Aunt (maternal)"),
            (&[Father, Sibling], "Uncle or aunt (paternal)"),
            (&[Mother, Sibling], "Uncle or aunt (maternal)"),
            (&[Parent, Sibling], "Uncle or aunt"),
            (&[Father, Brother, Wife], "Aunt (paternal uncle's wife)"),
            (&[Father, Sister, Husband], "Uncle (paternal aunt's husband)"),
            (&[Mother, Brother, Wife], "Aunt (maternal uncle's wife)"),
            // Cousins
            (&[Father, Brother, Son], "Cousin (patrilineal)"),
            (&[Father, Brother, Daughter], "Cousin (patrilineal, female)"),
            (&[Father, Brother, Child], "Cousin (patrilineal)"),
            (&[Father, Sister, Son], "Cousin (paternal aunt's son)"),
            (&[Father, Sister, Daughter], "Cousin (paternal aunt's daughter)"),
            (&[Mother, Brother, Son], "Cousin (maternal uncle's son)"),
            (&[Mother, Brother, Daughter], "Cousin (maternal uncle's daughter)"),
            (&[Mother, Sister, Son], "Cousin (maternal aunt's son)"),
            (&[Mother, Sister, Daughter], "Cousin (maternal aunt's daughter)"),
            (&[Parent, Sibling, Child], "Cousin"),
            // Nephews and nieces
            (&[Brother, Son], "Nephew (brother's son)"),
            (&[Brother, Daughter], "Niece (brother's daughter)"),
            (&[Sister, Son], "Nephew (sister's son)"),
            (&[Sister, Daughter], "Niece (sister's daughter)"),
            (&[Sibling, Child], "Nephew or niece"),
            (&[Brother, Son, Son], "Grandnephew (brother's grandson)"),
            // In-laws
            (&[Wife, Father], "Father-in-law (wife's father)"),
            (&[Wife, Mother], "Mother-in-law (wife's mother)"),
            (&[Husband, Father], "Father-in-law (husband's father)"),
            (&[Husband, Mother], "Mother-in-law (husband's mother)"),
            (&[Wife, Brother], "Brother-in-law (wife's brother)"),
            (&[Wife, Sister], "Sister-in-law (wife's sister)"),
            (&[Husband, Brother], "Brother-in-law (husband's brother)"),
            (&[Husband, Sister], "Sister-in-law (husband's sister)"),
            (&[Brother, Wife], "Sister-in-law (brother's wife)"),
            (&[Sister, Husband], "Brother-in-law (sister's husband)"),
            (&[Son, Wife], "Daughter-in-law"),
            (&[Daughter, Husband], "Son-in-law"),
            (&[Child, Wife], "Daughter-in-law"),
            (&[Child, Husband], "Son-in-law"),
            (&[Parent, Wife], "Parent's wife"),
            (&[Father, Wife], "Father's wife"),
        ];

        let mut simplifier = Self::empty();
        for (path, term) in entries {
            simplifier = simplifier.with_entry(path.to_vec(), *term);
        }
        simplifier
    }

    /// Add or replace a dictionary entry
    pub fn with_entry(mut self, path: Vec<AtomicStep>, term: impl Into<String>) -> Self {
        self.terms.insert(path, term.into());
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Look up the conventional term for a path
    pub fn simplify(&self, path: &[AtomicStep]) -> Option<&str> {
        let normalized = normalize(path);
        if normalized.is_empty() || normalized.iter().any(|s| s.is_unknown()) {
            return None;
        }

        if let Some(term) = self.terms.get(&normalized) {
            return Some(term.as_str());
        }

        let generalized: Vec<AtomicStep> = normalized.iter().map(|s| s.generalized()).collect();
        if let Some(term) = self.terms.get(&generalized) {
            return Some(term.as_str());
        }

        let neutral: Vec<AtomicStep> = normalized.iter().map(|s| s.neutral()).collect();
        self.terms.get(&neutral).map(String::as_str)
    }
}

/// Cancel adjacent marriage round trips.
///
/// A husband's wife (or a wife's husband) is the starting person, so such a
/// pair contributes nothing to the relationship. An empty result means the
/// path leads back to the start.
pub fn normalize(path: &[AtomicStep]) -> Vec<AtomicStep> {
    let mut normalized: Vec<AtomicStep> = Vec::with_capacity(path.len());
    for &step in path {
        let cancels = matches!(
            (normalized.last(), step),
            (Some(AtomicStep::Husband), AtomicStep::Wife)
                | (Some(AtomicStep::Wife), AtomicStep::Husband)
        );
        if cancels {
            normalized.pop();
        } else {
            normalized.push(step);
        }
    }
    normalized
}
