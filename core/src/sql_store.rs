//! SQLite-backed repository.
//!
//! RULE: Only this module talks to the database.
//! The connection is always in-memory and lives exactly as long as the
//! repository that owns it, so nothing outlives the session.

use crate::{
    error::PanelResult,
    repository::{Record, Repository},
};
use rusqlite::{params, Connection, OptionalExtension};
use std::marker::PhantomData;

pub struct PanelStore {
    conn: Connection,
}

impl PanelStore {
    /// Open a private in-memory database.
    pub fn in_memory() -> PanelResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> PanelResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_records.sql"))?;
        Ok(())
    }

    // ── Records ────────────────────────────────────────────────

    pub fn insert_record(
        &self,
        collection: &str,
        record_id: &str,
        position: i64,
        payload: &str,
    ) -> PanelResult<()> {
        self.conn.execute(
            "INSERT INTO record (collection, record_id, position, payload)
             VALUES (?1, ?2, ?3, ?4)",
            params![collection, record_id, position, payload],
        )?;
        Ok(())
    }

    pub fn record_payload(&self, collection: &str, record_id: &str) -> PanelResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM record WHERE collection = ?1 AND record_id = ?2",
                params![collection, record_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(payload)
    }

    pub fn record_payloads(&self, collection: &str) -> PanelResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT payload FROM record WHERE collection = ?1
             ORDER BY position ASC",
        )?;
        let rows = stmt.query_map(params![collection], |row| row.get(0))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Returns the number of rows touched (0 for an unknown id).
    pub fn update_payload(
        &self,
        collection: &str,
        record_id: &str,
        payload: &str,
    ) -> PanelResult<usize> {
        let changed = self.conn.execute(
            "UPDATE record SET payload = ?1 WHERE collection = ?2 AND record_id = ?3",
            params![payload, collection, record_id],
        )?;
        Ok(changed)
    }

    pub fn clear_collection(&self, collection: &str) -> PanelResult<()> {
        self.conn.execute(
            "DELETE FROM record WHERE collection = ?1",
            params![collection],
        )?;
        Ok(())
    }

    pub fn record_count(&self, collection: &str) -> PanelResult<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM record WHERE collection = ?1",
            params![collection],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

/// A repository whose records live as JSON payloads in `PanelStore`.
pub struct SqliteRepository<R> {
    store:   PanelStore,
    _record: PhantomData<R>,
}

impl<R: Record> SqliteRepository<R> {
    pub fn new(records: Vec<R>) -> PanelResult<Self> {
        let store = PanelStore::in_memory()?;
        store.migrate()?;
        let mut repo = Self {
            store,
            _record: PhantomData,
        };
        repo.reset(records)?;
        Ok(repo)
    }

    pub fn store(&self) -> &PanelStore {
        &self.store
    }
}

impl<R: Record> Repository<R> for SqliteRepository<R> {
    fn get(&self, id: &str) -> PanelResult<Option<R>> {
        match self.store.record_payload(R::COLLECTION, id)? {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    fn list(&self) -> PanelResult<Vec<R>> {
        self.store
            .record_payloads(R::COLLECTION)?
            .iter()
            .map(|payload| serde_json::from_str(payload).map_err(Into::into))
            .collect()
    }

    fn replace(&mut self, record: R) -> PanelResult<bool> {
        let payload = serde_json::to_string(&record)?;
        let changed = self
            .store
            .update_payload(R::COLLECTION, record.id(), &payload)?;
        Ok(changed > 0)
    }

    fn reset(&mut self, records: Vec<R>) -> PanelResult<()> {
        self.store.clear_collection(R::COLLECTION)?;
        for (position, record) in records.iter().enumerate() {
            let payload = serde_json::to_string(record)?;
            self.store
                .insert_record(R::COLLECTION, record.id(), position as i64, &payload)?;
        }
        log::debug!("{}: loaded {} records into sqlite", R::COLLECTION, records.len());
        Ok(())
    }
}
