//! The filterable list pattern every interactive view is built on.
//!
//! A `ListView` owns one repository and the view's current criteria. The
//! visible rows are a memoized pure derivation keyed on
//! (collection revision, criteria): any successful write bumps the revision,
//! any criteria change alters the key, and either forces a recompute.

use crate::{
    error::PanelResult,
    filter::{apply_filters, Criteria},
    repository::{Record, Repository},
};

pub struct ListView<R: Record, C: Criteria<R>> {
    repo:     Box<dyn Repository<R>>,
    criteria: C,
    revision: u64,
    cache:    Option<(u64, C, Vec<R>)>,
}

impl<R: Record, C: Criteria<R>> ListView<R, C> {
    pub fn new(repo: Box<dyn Repository<R>>, criteria: C) -> Self {
        Self {
            repo,
            criteria,
            revision: 0,
            cache: None,
        }
    }

    pub fn criteria(&self) -> &C {
        &self.criteria
    }

    pub fn set_criteria(&mut self, criteria: C) {
        self.criteria = criteria;
    }

    /// Number of writes applied since the view was created or reloaded.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The rows matching the current criteria, in collection order.
    pub fn visible(&mut self) -> PanelResult<&[R]> {
        let fresh = matches!(
            &self.cache,
            Some((rev, criteria, _)) if *rev == self.revision && *criteria == self.criteria
        );
        if !fresh {
            let all = self.repo.list()?;
            let rows = apply_filters(&all, &self.criteria);
            log::debug!(
                "{}: recomputed view, {} of {} rows visible",
                R::COLLECTION,
                rows.len(),
                all.len()
            );
            self.cache = Some((self.revision, self.criteria.clone(), rows));
        }
        Ok(self.cache.as_ref().map_or(&[][..], |(_, _, rows)| rows.as_slice()))
    }

    pub fn get(&self, id: &str) -> PanelResult<Option<R>> {
        self.repo.get(id)
    }

    pub fn all(&self) -> PanelResult<Vec<R>> {
        self.repo.list()
    }

    /// Apply `change` to record `id`. Unknown ids are ignored.
    ///
    /// Returns the record as it stands afterwards and whether it changed.
    pub fn modify(
        &mut self,
        id: &str,
        change: &mut dyn FnMut(&mut R) -> PanelResult<bool>,
    ) -> PanelResult<Option<(R, bool)>> {
        let mut changed = false;
        let record = self.repo.update(id, &mut |record: &mut R| {
            changed = change(record)?;
            Ok(changed)
        })?;
        match record {
            Some(record) => {
                if changed {
                    self.revision += 1;
                }
                Ok(Some((record, changed)))
            }
            None => {
                log::debug!("{}: ignoring change for unknown id '{id}'", R::COLLECTION);
                Ok(None)
            }
        }
    }

    /// Replace the whole collection (session refresh).
    pub fn reload(&mut self, records: Vec<R>) -> PanelResult<()> {
        self.repo.reset(records)?;
        self.revision = 0;
        self.cache = None;
        Ok(())
    }
}
