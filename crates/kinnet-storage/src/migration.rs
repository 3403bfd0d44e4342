//! Schema version tracking for persistent backends
//!
//! Versions are applied in order, each exactly once. A database written by a
//! newer build is left untouched.

use crate::StorageResult;

/// Schema version this build writes
pub const CURRENT_VERSION: u32 = 2;

/// One step in the schema history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaVersion {
    pub version: u32,
    pub description: &'static str,
}

/// Full schema history, oldest first
pub fn get_migrations() -> Vec<SchemaVersion> {
    vec![
        SchemaVersion {
            version: 1,
            description: "Kinship rows, kinship codes and person summaries",
        },
        SchemaVersion {
            version: 2,
            description: "Lookup indexes on kinship row source and target",
        },
    ]
}

/// Versions still to apply on top of `applied`
pub fn pending_migrations(applied: u32) -> Vec<SchemaVersion> {
    get_migrations()
        .into_iter()
        .filter(|m| m.version > applied)
        .collect()
}

/// A backend whose schema is brought up to date on open
pub trait Migratable {
    fn get_schema_version(&self) -> StorageResult<u32>;

    fn set_schema_version(&self, version: u32) -> StorageResult<()>;

    /// Apply a single schema step
    fn apply(&self, migration: &SchemaVersion) -> StorageResult<()>;

    /// Apply every pending step and return the resulting version
    fn migrate_to_latest(&self) -> StorageResult<u32> {
        let applied = self.get_schema_version()?;

        if applied > CURRENT_VERSION {
            tracing::warn!(
                "Database schema v{} is newer than this build (v{}); leaving it as is",
                applied,
                CURRENT_VERSION
            );
            return Ok(applied);
        }

        let pending = pending_migrations(applied);
        if pending.is_empty() {
            tracing::debug!("Schema up to date at v{}", applied);
            return Ok(applied);
        }

        for migration in &pending {
            tracing::info!(
                "Applying schema v{}: {}",
                migration.version,
                migration.description
            );
            self.apply(migration)?;
            self.set_schema_version(migration.version)?;
        }
        Ok(CURRENT_VERSION)
    }
}
