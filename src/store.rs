use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// The `inputs` record: the three last-entered figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedInputs {
    pub party_a_salary: f64,
    pub party_b_salary: f64,
    pub expense: f64,
}

/// The `contributions` record: the last-computed allocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedContributions {
    pub party_a_contribution: f64,
    pub party_b_contribution: f64,
}

/// Snapshot of both named records. Each part can be absent on its own: the
/// records are written separately, so one may exist without the other.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PersistedState {
    pub inputs: Option<SavedInputs>,
    pub contributions: Option<SavedContributions>,
}

impl PersistedState {
    /// True when no record has ever been written.
    pub fn is_absent(&self) -> bool {
        self.inputs.is_none() && self.contributions.is_none()
    }
}

const INPUTS_RECORD: &str = "inputs";
const CONTRIBUTIONS_RECORD: &str = "contributions";

/// Durable storage for the calculator state.
///
/// Injected into the controller so the medium can be swapped: tests run
/// against [`MemoryStore`], the binaries prefer [`SqliteStore`] and fall
/// back to [`MemoryStore`] when the file cannot be opened.
pub trait StateStore: Send {
    /// Overwrite the stored records with this snapshot. The two records are
    /// written independently, not as one atomic unit; a crash between the
    /// writes may leave one record older than the other.
    fn save(&mut self, state: &PersistedState) -> Result<()>;

    /// Read back whatever records exist. A record that was never written, or
    /// that no longer deserializes, reads as `None`.
    fn load(&self) -> Result<PersistedState>;
}

/// Store backed by a local SQLite file: one `records` table, one row per
/// named record, values as JSON text.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and ensure the schema exists.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open state database at {}", path.display()))?;
        Self::from_connection(conn)
    }

    /// Build a store from an existing connection (in-memory in tests).
    pub fn from_connection(conn: Connection) -> Result<Self> {
        // WAL keeps the file readable if the process dies mid-write
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS records (
                name TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(SqliteStore { conn })
    }

    fn write_record<T: Serialize>(&self, name: &str, record: &T) -> Result<()> {
        let json = serde_json::to_string(record)?;
        self.conn
            .execute(
                "INSERT OR REPLACE INTO records (name, value) VALUES (?1, ?2)",
                params![name, json],
            )
            .with_context(|| format!("Failed to write record '{}'", name))?;
        Ok(())
    }

    fn read_record<T: for<'de> Deserialize<'de>>(&self, name: &str) -> Result<Option<T>> {
        let json: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM records WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("Failed to read record '{}'", name))?;

        // A value that no longer deserializes counts as absent; stale or
        // corrupt state must not keep the calculator from starting
        Ok(json.and_then(|j| serde_json::from_str(&j).ok()))
    }
}

impl StateStore for SqliteStore {
    fn save(&mut self, state: &PersistedState) -> Result<()> {
        if let Some(inputs) = &state.inputs {
            self.write_record(INPUTS_RECORD, inputs)?;
        }
        if let Some(contributions) = &state.contributions {
            self.write_record(CONTRIBUTIONS_RECORD, contributions)?;
        }
        Ok(())
    }

    fn load(&self) -> Result<PersistedState> {
        Ok(PersistedState {
            inputs: self.read_record(INPUTS_RECORD)?,
            contributions: self.read_record(CONTRIBUTIONS_RECORD)?,
        })
    }
}

/// HashMap-backed store with the same contract. Used by tests and as the
/// session-only fallback when the durable medium is unavailable. Values are
/// kept as JSON text so the serialization path matches the real store.
#[derive(Default)]
pub struct MemoryStore {
    records: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn save(&mut self, state: &PersistedState) -> Result<()> {
        if let Some(inputs) = &state.inputs {
            self.records
                .insert(INPUTS_RECORD.to_string(), serde_json::to_string(inputs)?);
        }
        if let Some(contributions) = &state.contributions {
            self.records.insert(
                CONTRIBUTIONS_RECORD.to_string(),
                serde_json::to_string(contributions)?,
            );
        }
        Ok(())
    }

    fn load(&self) -> Result<PersistedState> {
        Ok(PersistedState {
            inputs: self
                .records
                .get(INPUTS_RECORD)
                .and_then(|j| serde_json::from_str(j).ok()),
            contributions: self
                .records
                .get(CONTRIBUTIONS_RECORD)
                .and_then(|j| serde_json::from_str(j).ok()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sqlite_store() -> SqliteStore {
        let conn = Connection::open_in_memory().unwrap();
        SqliteStore::from_connection(conn).unwrap()
    }

    fn sample_state() -> PersistedState {
        PersistedState {
            inputs: Some(SavedInputs {
                party_a_salary: 36000.0,
                party_b_salary: 21000.0,
                expense: 5000.0,
            }),
            contributions: Some(SavedContributions {
                party_a_contribution: 3157.894736842105,
                party_b_contribution: 1842.1052631578948,
            }),
        }
    }

    #[test]
    fn test_fresh_store_is_absent() {
        let store = sqlite_store();
        let state = store.load().unwrap();
        assert!(state.is_absent());
    }

    #[test]
    fn test_round_trip_is_exact() {
        let mut store = sqlite_store();
        let saved = sample_state();
        store.save(&saved).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, saved, "loaded state must match the last save exactly");
    }

    #[test]
    fn test_save_overwrites_previous() {
        let mut store = sqlite_store();
        store.save(&sample_state()).unwrap();

        let mut updated = sample_state();
        updated.inputs.as_mut().unwrap().party_a_salary = 40000.0;
        store.save(&updated).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.inputs.unwrap().party_a_salary, 40000.0);
    }

    #[test]
    fn test_records_are_independent() {
        let mut store = sqlite_store();
        store
            .save(&PersistedState {
                inputs: sample_state().inputs,
                contributions: None,
            })
            .unwrap();

        let loaded = store.load().unwrap();
        assert!(loaded.inputs.is_some());
        assert!(
            loaded.contributions.is_none(),
            "an unwritten record must stay absent"
        );
    }

    #[test]
    fn test_corrupt_record_reads_as_absent() {
        let store = sqlite_store();
        store
            .conn
            .execute(
                "INSERT INTO records (name, value) VALUES ('inputs', 'not json')",
                [],
            )
            .unwrap();

        let state = store.load().unwrap();
        assert!(state.inputs.is_none());
    }

    #[test]
    fn test_record_layout_keys() {
        let json = serde_json::to_string(&sample_state().inputs.unwrap()).unwrap();
        assert!(json.contains("\"partyASalary\""));
        assert!(json.contains("\"partyBSalary\""));
        assert!(json.contains("\"expense\""));

        let json = serde_json::to_string(&sample_state().contributions.unwrap()).unwrap();
        assert!(json.contains("\"partyAContribution\""));
        assert!(json.contains("\"partyBContribution\""));
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_absent());

        store.save(&sample_state()).unwrap();
        assert_eq!(store.load().unwrap(), sample_state());
    }
}
