//! Kinship filter options

use crate::limits::{
    validate_collateral_links, validate_generations, validate_loop_depth,
    validate_marriage_links, ValidationError,
};
use serde::{Deserialize, Serialize};

/// Effective limits and switches for one network exploration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KinshipFilterOptions {
    /// Generations upwards (parents, grandparents, ...)
    #[serde(default = "default_generations")]
    pub max_ancestor_gen: u32,

    /// Generations downwards (children, grandchildren, ...)
    #[serde(default = "default_generations")]
    pub max_descend_gen: u32,

    /// Sibling steps on one path
    #[serde(default = "default_one")]
    pub max_collateral_links: u32,

    /// Husband/wife steps on one path
    #[serde(default = "default_one")]
    pub max_marriage_links: u32,

    /// Stored edges chained from the ego
    #[serde(default = "default_generations")]
    pub max_loop_depth: u32,

    /// Keep only relatives inside the five mourning grades
    #[serde(default)]
    pub mourning_circle: bool,

    /// Attach a conventional kin term where one is known
    #[serde(default)]
    pub simplify_terms: bool,

    /// Follow stored edges backwards from their target
    #[serde(default = "default_true")]
    pub include_reciprocal: bool,

    /// Chain edges beyond the first hop
    #[serde(default = "default_true")]
    pub include_derived: bool,
}

fn default_generations() -> u32 {
    3
}

fn default_one() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

impl Default for KinshipFilterOptions {
    fn default() -> Self {
        Self {
            max_ancestor_gen: default_generations(),
            max_descend_gen: default_generations(),
            max_collateral_links: default_one(),
            max_marriage_links: default_one(),
            max_loop_depth: default_generations(),
            mourning_circle: false,
            simplify_terms: false,
            include_reciprocal: true,
            include_derived: true,
        }
    }
}

impl KinshipFilterOptions {
    /// Reject limits beyond the hard caps
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_generations("Ancestor generation limit", self.max_ancestor_gen)?;
        validate_generations("Descendant generation limit", self.max_descend_gen)?;
        validate_collateral_links(self.max_collateral_links)?;
        validate_marriage_links(self.max_marriage_links)?;
        validate_loop_depth(self.max_loop_depth)?;
        Ok(())
    }

    /// Apply caller overrides on top of these options
    pub fn merged(mut self, overrides: &KinshipFilterOverrides) -> Self {
        if let Some(v) = overrides.max_ancestor_gen {
            self.max_ancestor_gen = v;
        }
        if let Some(v) = overrides.max_descend_gen {
            self.max_descend_gen = v;
        }
        if let Some(v) = overrides.max_collateral_links {
            self.max_collateral_links = v;
        }
        if let Some(v) = overrides.max_marriage_links {
            self.max_marriage_links = v;
        }
        if let Some(v) = overrides.max_loop_depth {
            self.max_loop_depth = v;
        }
        if let Some(v) = overrides.mourning_circle {
            self.mourning_circle = v;
        }
        if let Some(v) = overrides.simplify_terms {
            self.simplify_terms = v;
        }
        if let Some(v) = overrides.include_reciprocal {
            self.include_reciprocal = v;
        }
        if let Some(v) = overrides.include_derived {
            self.include_derived = v;
        }
        self
    }
}

/// Partial filter options supplied by a caller; unset fields keep defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KinshipFilterOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_ancestor_gen: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_descend_gen: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_collateral_links: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_marriage_links: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_loop_depth: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mourning_circle: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simplify_terms: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_reciprocal: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_derived: Option<bool>,
}

impl KinshipFilterOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse overrides from a JSON object, e.g. `{"maxLoopDepth": 2}`
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(json).map_err(|e| ValidationError::MalformedFilters(e.to_string()))
    }

    pub fn with_max_ancestor_gen(mut self, value: u32) -> Self {
        self.max_ancestor_gen = Some(value);
        self
    }

    pub fn with_max_descend_gen(mut self, value: u32) -> Self {
        self.max_descend_gen = Some(value);
        self
    }

    pub fn with_max_collateral_links(mut self, value: u32) -> Self {
        self.max_collateral_links = Some(value);
        self
    }

    pub fn with_max_marriage_links(mut self, value: u32) -> Self {
        self.max_marriage_links = Some(value);
        self
    }

    pub fn with_max_loop_depth(mut self, value: u32) -> Self {
        self.max_loop_depth = Some(value);
        self
    }

    pub fn with_mourning_circle(mut self, value: bool) -> Self {
        self.mourning_circle = Some(value);
        self
    }

    pub fn with_simplify_terms(mut self, value: bool) -> Self {
        self.simplify_terms = Some(value);
        self
    }

    pub fn with_include_reciprocal(mut self, value: bool) -> Self {
        self.include_reciprocal = Some(value);
        self
    }

    pub fn with_include_derived(mut self, value: bool) -> Self {
        self.include_derived = Some(value);
        self
    }
}
