//! Repository seam between the views and wherever records live.
//!
//! Views only ever see `dyn Repository<R>`; the in-memory fixture vector
//! and the SQLite-backed store are interchangeable behind it.

use crate::error::PanelResult;
use serde::{de::DeserializeOwned, Serialize};

/// A record held in a keyed collection.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Stable collection name (table key in SQLite, log target elsewhere).
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
}

pub trait Repository<R: Record> {
    fn get(&self, id: &str) -> PanelResult<Option<R>>;

    /// Every record in insertion order.
    fn list(&self) -> PanelResult<Vec<R>>;

    /// Replace the record with the same id in place.
    /// Returns false (and changes nothing) when the id is unknown.
    fn replace(&mut self, record: R) -> PanelResult<bool>;

    /// Drop every record and load `records` in their given order.
    fn reset(&mut self, records: Vec<R>) -> PanelResult<()>;

    /// Apply `change` to the record `id`. `change` returns whether it
    /// modified the record; only then is the copy written back.
    ///
    /// Returns the record as it stands afterwards, or None for an unknown id.
    fn update(
        &mut self,
        id: &str,
        change: &mut dyn FnMut(&mut R) -> PanelResult<bool>,
    ) -> PanelResult<Option<R>> {
        let Some(mut record) = self.get(id)? else {
            return Ok(None);
        };
        if change(&mut record)? {
            self.replace(record.clone())?;
        }
        Ok(Some(record))
    }
}

/// `Vec`-backed repository; the default for a session.
pub struct MemoryRepository<R> {
    records: Vec<R>,
}

impl<R: Record> MemoryRepository<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self { records }
    }
}

impl<R: Record> Repository<R> for MemoryRepository<R> {
    fn get(&self, id: &str) -> PanelResult<Option<R>> {
        Ok(self.records.iter().find(|r| r.id() == id).cloned())
    }

    fn list(&self) -> PanelResult<Vec<R>> {
        Ok(self.records.clone())
    }

    fn replace(&mut self, record: R) -> PanelResult<bool> {
        match self.records.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => {
                *slot = record;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn reset(&mut self, records: Vec<R>) -> PanelResult<()> {
        self.records = records;
        Ok(())
    }
}
