//! kinnet Core - Kinship network exploration
//!
//! This crate provides the kinship data model, the relation classification
//! policies and the traversal engine that walks a person's kinship graph
//! under generation, collateral, marriage and depth limits.

pub mod classify;
pub mod error;
pub mod filter;
pub mod kinship;
pub mod limits;
pub mod mourning;
pub mod network;
pub mod person;
pub mod reciprocal;
pub mod simplify;
pub mod source;
pub mod step;
pub mod traversal;

pub use classify::RelationClassifier;
pub use error::{Error, Result};
pub use filter::{KinshipFilterOptions, KinshipFilterOverrides};
pub use kinship::{KinshipCode, KinshipCodeId, KinshipEdge};
pub use mourning::{KinshipCounts, MourningPolicy, WeightedMourningPolicy};
pub use network::{
    KinshipNetworkNode, KinshipPathInfo, LinkDirection, PathLink, PersonKinshipNetworkResult,
    ResultAssembler, TraversalStats,
};
pub use person::{PersonId, PersonSummary};
pub use reciprocal::{reciprocal_of, reciprocal_path};
pub use simplify::TermSimplifier;
pub use source::KinshipSource;
pub use step::{AtomicStep, GenerationDelta};
pub use traversal::{KinshipExplorer, TraversalState};
