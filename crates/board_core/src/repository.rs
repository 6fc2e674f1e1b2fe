//! In-memory opportunity collection, persisted after every mutation.

use shared::{timestamp, BoardError, Opportunity, OpportunityId, Snapshot, Status};
use storage::{SnapshotBackend, Store};
use tracing::{info, warn};

use crate::clock::{Clock, SystemClock};

/// What [`OpportunityRepository::open`] found in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Restored,
    /// Nothing had been saved yet.
    FirstRun,
    /// The stored snapshot could not be read back and was ignored.
    RecoveredFromCorruption,
}

pub struct OpportunityRepository<B, C = SystemClock> {
    store: Store<B>,
    clock: C,
    opportunities: Vec<Opportunity>,
    current_id: OpportunityId,
    load_state: LoadState,
    unsaved: Option<BoardError>,
}

impl<B: SnapshotBackend> OpportunityRepository<B, SystemClock> {
    pub fn open(store: Store<B>) -> Result<Self, BoardError> {
        Self::open_with_clock(store, SystemClock)
    }
}

impl<B: SnapshotBackend, C: Clock> OpportunityRepository<B, C> {
    /// Loads the persisted snapshot. A corrupt snapshot is logged and
    /// replaced by an empty board; any other read failure is returned.
    pub fn open_with_clock(store: Store<B>, clock: C) -> Result<Self, BoardError> {
        let (snapshot, load_state) = match store.load() {
            Ok(Some(snapshot)) => (snapshot, LoadState::Restored),
            Ok(None) => (Snapshot::default(), LoadState::FirstRun),
            Err(err) if err.is_corrupt() => {
                warn!(
                    key = store.key(),
                    error = %err,
                    "ignoring corrupt snapshot; starting empty"
                );
                (Snapshot::default(), LoadState::RecoveredFromCorruption)
            }
            Err(err) => return Err(err.into()),
        };

        info!(
            key = store.key(),
            opportunities = snapshot.opportunities.len(),
            next_id = %snapshot.current_id,
            ?load_state,
            "opened opportunity board"
        );

        Ok(Self {
            store,
            clock,
            opportunities: snapshot.opportunities,
            current_id: snapshot.current_id,
            load_state,
            unsaved: None,
        })
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn add(&mut self, title: &str, company: &str) -> Result<Opportunity, BoardError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(BoardError::Validation { field: "title" });
        }
        let company = company.trim();
        if company.is_empty() {
            return Err(BoardError::Validation { field: "company" });
        }

        let id = self.current_id;
        let Some(next_id) = id.next() else {
            warn!(%id, "id counter exhausted; refusing to add");
            return Err(BoardError::IdsExhausted);
        };
        self.current_id = next_id;
        let now = timestamp::to_snapshot_precision(self.clock.now());
        let opportunity = Opportunity::new(id, title, company, now);
        self.opportunities.push(opportunity.clone());
        self.persist();

        info!(%id, title, company, "opportunity added");
        Ok(opportunity)
    }

    /// Moves `id` to `status`. Returns `false` without touching the store
    /// when no such opportunity exists.
    pub fn update_status(&mut self, id: OpportunityId, status: Status) -> bool {
        let now = timestamp::to_snapshot_precision(self.clock.now());
        let Some(opportunity) = self.opportunities.iter_mut().find(|opp| opp.id() == id) else {
            info!(%id, %status, "status update for unknown opportunity ignored");
            return false;
        };
        let from = opportunity.status();
        opportunity.transition(status, now);
        self.persist();

        info!(%id, %from, to = %status, "opportunity moved");
        true
    }

    /// Removes `id`, returning the removed record. Unknown ids change nothing.
    pub fn delete(&mut self, id: OpportunityId) -> Option<Opportunity> {
        let index = self.opportunities.iter().position(|opp| opp.id() == id)?;
        let removed = self.opportunities.remove(index);
        self.persist();

        info!(%id, title = removed.title(), "opportunity deleted");
        Some(removed)
    }

    pub fn find_by_id(&self, id: OpportunityId) -> Option<&Opportunity> {
        self.opportunities.iter().find(|opp| opp.id() == id)
    }

    pub fn filter_by_status(&self, status: Status) -> Vec<&Opportunity> {
        self.opportunities
            .iter()
            .filter(|opp| opp.status() == status)
            .collect()
    }

    /// Case-insensitive substring search over title and company. A blank
    /// query is no filter at all.
    pub fn search(&self, query: &str) -> Vec<&Opportunity> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.opportunities.iter().collect();
        }
        self.opportunities
            .iter()
            .filter(|opp| opp.matches_lowercase(&needle))
            .collect()
    }

    pub fn opportunities(&self) -> &[Opportunity] {
        &self.opportunities
    }

    pub fn len(&self) -> usize {
        self.opportunities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opportunities.is_empty()
    }

    pub fn next_id(&self) -> OpportunityId {
        self.current_id
    }

    /// The last failed write, if no save has succeeded since. Memory stays
    /// ahead of the store until then.
    pub fn persistence_warning(&self) -> Option<&BoardError> {
        self.unsaved.as_ref()
    }

    pub fn store(&self) -> &Store<B> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store<B> {
        &mut self.store
    }

    fn persist(&mut self) {
        match self.store.save(&self.opportunities, self.current_id) {
            Ok(()) => {
                if self.unsaved.take().is_some() {
                    info!(key = self.store.key(), "snapshot persisted after earlier failure");
                }
            }
            Err(err) => {
                warn!(
                    key = self.store.key(),
                    error = %err,
                    "failed to persist snapshot; keeping in-memory changes"
                );
                self.unsaved = Some(err.into());
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/repository_tests.rs"]
mod tests;
