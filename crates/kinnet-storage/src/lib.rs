//! kinnet Storage - Kinship data sources
//!
//! This crate provides the backends the explorer reads kinship rows, codes
//! and person summaries from.

#![allow(clippy::result_large_err)]

pub mod codes;
pub mod error;
pub mod memory;
pub mod migration;
pub mod traits;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use codes::standard_codes;
pub use error::{StorageError, StorageResult};
pub use memory::MemoryStorage;
pub use migration::{pending_migrations, Migratable, SchemaVersion, CURRENT_VERSION};
pub use traits::{KinshipDataset, StorageBackend};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStorage;
