//! SQLite storage backend over CBDB-style kinship tables
//!
//! Reads `KIN_DATA`, `KINSHIP_CODES` and `BIOG_MAIN`. Opening an existing
//! database only adds missing tables and indexes; rows are never rewritten.

use crate::error::{StorageError, StorageResult};
use crate::migration::{Migratable, SchemaVersion};
use crate::traits::StorageBackend;
use async_trait::async_trait;
use kinnet_core::{
    KinshipCode, KinshipCodeId, KinshipEdge, KinshipSource, PersonId, PersonSummary,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::Mutex;

const SCHEMA_V1: &str = r#"
    CREATE TABLE IF NOT EXISTS KINSHIP_CODES (
        c_kincode INTEGER PRIMARY KEY,
        c_kinrel TEXT NOT NULL,
        c_kinrel_chn TEXT,
        c_kin_pair1 INTEGER,
        c_kin_pair2 INTEGER
    );

    CREATE TABLE IF NOT EXISTS KIN_DATA (
        c_personid INTEGER NOT NULL,
        c_kin_id INTEGER NOT NULL,
        c_kin_code INTEGER NOT NULL,
        c_source INTEGER,
        c_pages TEXT,
        c_notes TEXT,
        PRIMARY KEY (c_personid, c_kin_id, c_kin_code)
    );

    CREATE TABLE IF NOT EXISTS BIOG_MAIN (
        c_personid INTEGER PRIMARY KEY,
        c_name TEXT,
        c_name_chn TEXT,
        c_birthyear INTEGER,
        c_deathyear INTEGER
    );
"#;

const SCHEMA_V2: &str = r#"
    CREATE INDEX IF NOT EXISTS idx_kin_data_person ON KIN_DATA(c_personid);
    CREATE INDEX IF NOT EXISTS idx_kin_data_kin ON KIN_DATA(c_kin_id);
"#;

const EDGE_COLUMNS: &str = "c_personid, c_kin_id, c_kin_code, c_source, c_pages, c_notes";

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Open or create a SQLite database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .map_err(|e| StorageError::Connection(format!("{}: {}", path.display(), e)))?;
        Self::from_connection(conn)
    }

    /// Create an in-memory SQLite database (for testing)
    pub fn in_memory() -> StorageResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| StorageError::Connection(e.to_string()))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> StorageResult<Self> {
        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.migrate_to_latest()?;
        Ok(storage)
    }

    fn lock(&self) -> StorageResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))
    }

    fn query_edges(&self, column: &str, person_id: PersonId) -> StorageResult<Vec<KinshipEdge>> {
        let conn = self.lock()?;
        let sql = format!(
            "SELECT {} FROM KIN_DATA WHERE {} = ?1 ORDER BY c_personid, c_kin_id, c_kin_code",
            EDGE_COLUMNS, column
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![person_id.0], row_to_edge)?;

        let mut edges = Vec::new();
        for row in rows {
            edges.push(row?);
        }
        Ok(edges)
    }

    fn query_code(&self, code: KinshipCodeId) -> StorageResult<Option<KinshipCode>> {
        let conn = self.lock()?;
        let code = conn
            .query_row(
                "SELECT c_kincode, c_kinrel, c_kinrel_chn, c_kin_pair1, c_kin_pair2
                 FROM KINSHIP_CODES WHERE c_kincode = ?1",
                params![code.0],
                |row| {
                    Ok(KinshipCode {
                        code: KinshipCodeId(row.get(0)?),
                        kin_rel: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                        kin_rel_chn: row.get(2)?,
                        kin_pair1: nonzero(row.get(3)?).map(KinshipCodeId),
                        kin_pair2: nonzero(row.get(4)?).map(KinshipCodeId),
                    })
                },
            )
            .optional()?;
        Ok(code)
    }

    fn query_person(&self, person_id: PersonId) -> StorageResult<Option<PersonSummary>> {
        let conn = self.lock()?;
        let person = conn
            .query_row(
                "SELECT c_personid, c_name, c_name_chn, c_birthyear, c_deathyear
                 FROM BIOG_MAIN WHERE c_personid = ?1",
                params![person_id.0],
                |row| {
                    Ok(PersonSummary {
                        person_id: PersonId(row.get(0)?),
                        name: row.get(1)?,
                        name_chn: row.get(2)?,
                        birth_year: nonzero(row.get(3)?).and_then(|y| i32::try_from(y).ok()),
                        death_year: nonzero(row.get(4)?).and_then(|y| i32::try_from(y).ok()),
                    })
                },
            )
            .optional()?;
        Ok(person)
    }
}

/// CBDB stores 0 for "no value" in several integer columns
fn nonzero(value: Option<i64>) -> Option<i64> {
    value.filter(|v| *v != 0)
}

fn row_to_edge(row: &Row<'_>) -> rusqlite::Result<KinshipEdge> {
    Ok(KinshipEdge {
        person_id: PersonId(row.get(0)?),
        kin_person_id: PersonId(row.get(1)?),
        kinship_code: KinshipCodeId(row.get(2)?),
        source: nonzero(row.get(3)?),
        pages: row.get(4)?,
        notes: row.get(5)?,
    })
}

impl Migratable for SqliteStorage {
    fn get_schema_version(&self) -> StorageResult<u32> {
        let conn = self.lock()?;
        let version: u32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
        Ok(version)
    }

    fn set_schema_version(&self, version: u32) -> StorageResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(&format!("PRAGMA user_version = {}", version))?;
        Ok(())
    }

    fn apply(&self, migration: &SchemaVersion) -> StorageResult<()> {
        let sql = match migration.version {
            1 => SCHEMA_V1,
            2 => SCHEMA_V2,
            other => {
                return Err(StorageError::Migration(format!(
                    "No SQL for schema version {}",
                    other
                )))
            }
        };
        let conn = self.lock()?;
        conn.execute_batch(sql)
            .map_err(|e| StorageError::Migration(format!("v{}: {}", migration.version, e)))?;
        Ok(())
    }
}

#[async_trait]
impl KinshipSource for SqliteStorage {
    async fn get_kinship_edges(&self, person_id: PersonId) -> kinnet_core::Result<Vec<KinshipEdge>> {
        Ok(self.query_edges("c_personid", person_id)?)
    }

    async fn get_kinship_edges_as_target(
        &self,
        person_id: PersonId,
    ) -> kinnet_core::Result<Vec<KinshipEdge>> {
        Ok(self.query_edges("c_kin_id", person_id)?)
    }

    async fn get_kinship_code(&self, code: KinshipCodeId) -> kinnet_core::Result<Option<KinshipCode>> {
        Ok(self.query_code(code)?)
    }

    async fn get_person(&self, person_id: PersonId) -> kinnet_core::Result<Option<PersonSummary>> {
        Ok(self.query_person(person_id)?)
    }
}

#[async_trait]
impl StorageBackend for SqliteStorage {
    async fn health_check(&self) -> StorageResult<bool> {
        let conn = self.lock()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(true)
    }

    async fn save_code(&self, code: &KinshipCode) -> StorageResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO KINSHIP_CODES (c_kincode, c_kinrel, c_kinrel_chn, c_kin_pair1, c_kin_pair2)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                code.code.0,
                code.kin_rel,
                code.kin_rel_chn,
                code.kin_pair1.map(|c| c.0),
                code.kin_pair2.map(|c| c.0)
            ],
        )?;
        Ok(())
    }

    async fn save_person(&self, person: &PersonSummary) -> StorageResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO BIOG_MAIN (c_personid, c_name, c_name_chn, c_birthyear, c_deathyear)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                person.person_id.0,
                person.name,
                person.name_chn,
                person.birth_year,
                person.death_year
            ],
        )?;
        Ok(())
    }

    async fn save_edge(&self, edge: &KinshipEdge) -> StorageResult<()> {
        let conn = self.lock()?;
        conn.execute(
            &format!(
                "INSERT OR REPLACE INTO KIN_DATA ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                EDGE_COLUMNS
            ),
            params![
                edge.person_id.0,
                edge.kin_person_id.0,
                edge.kinship_code.0,
                edge.source,
                edge.pages,
                edge.notes
            ],
        )?;
        Ok(())
    }

    async fn edge_count(&self) -> StorageResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM KIN_DATA", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
