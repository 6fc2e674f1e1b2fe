use std::collections::HashSet;

use serde::Serialize;
use shared::{Opportunity, OpportunityId, Snapshot};
use tracing::warn;

use crate::{SnapshotBackend, StoreError};

/// Entry name used by the original board.
pub const DEFAULT_STORAGE_KEY: &str = "opportunityBoard";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotRef<'a> {
    opportunities: &'a [Opportunity],
    current_id: OpportunityId,
}

/// Owns the persisted snapshot entry.
#[derive(Debug)]
pub struct Store<B> {
    backend: B,
    key: String,
}

impl<B: SnapshotBackend> Store<B> {
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Reads the snapshot. `Ok(None)` means nothing has been saved yet.
    pub fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        let Some(raw) = self.backend.read(&self.key)? else {
            return Ok(None);
        };
        let parsed: Snapshot = serde_json::from_str(&raw).map_err(|err| self.corrupt(err))?;
        self.normalize(parsed).map(Some)
    }

    /// Replaces the whole snapshot entry.
    pub fn save(
        &mut self,
        opportunities: &[Opportunity],
        current_id: OpportunityId,
    ) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(&SnapshotRef {
            opportunities,
            current_id,
        })
        .map_err(StoreError::Encode)?;
        self.backend.write(&self.key, &encoded)
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.backend.remove(&self.key)
    }

    fn normalize(&self, mut snapshot: Snapshot) -> Result<Snapshot, StoreError> {
        let mut seen = HashSet::with_capacity(snapshot.opportunities.len());
        for opp in &snapshot.opportunities {
            if opp.id().0 < 1 {
                return Err(self.corrupt(format!("non-positive id {}", opp.id())));
            }
            if !seen.insert(opp.id()) {
                return Err(self.corrupt(format!("duplicate id {}", opp.id())));
            }
            if opp.updated_at() < opp.created_at() {
                return Err(self.corrupt(format!(
                    "id {} updated before it was created",
                    opp.id()
                )));
            }
        }

        if snapshot.current_id.0 < 1 {
            snapshot.current_id = OpportunityId::FIRST;
        }
        if let Some(max_id) = snapshot.max_id() {
            let Some(after_max) = max_id.next() else {
                return Err(self.corrupt(format!("id {max_id} leaves no room for a next id")));
            };
            if snapshot.current_id < after_max {
                warn!(
                    key = %self.key,
                    stored = %snapshot.current_id,
                    repaired = %after_max,
                    "id counter behind stored records; advancing"
                );
                snapshot.current_id = after_max;
            }
        }
        Ok(snapshot)
    }

    fn corrupt(&self, reason: impl ToString) -> StoreError {
        StoreError::Corrupt {
            key: self.key.clone(),
            reason: reason.to_string(),
        }
    }
}
