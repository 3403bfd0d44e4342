//! CLI command implementations

pub mod code;
pub mod config;
pub mod explore;
pub mod import;
