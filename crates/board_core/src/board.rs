use shared::{BoardError, OpportunityId};
use storage::{SnapshotBackend, Store};
use tracing::{debug, info};

use crate::{
    clock::{Clock, SystemClock},
    intent::{BoardIntent, Effect},
    projector::{project, BoardProjection},
    repository::{LoadState, OpportunityRepository},
};

/// Opportunities added to a board that has never been saved.
pub const SAMPLE_OPPORTUNITIES: [(&str, &str); 3] = [
    ("Senior Frontend Developer", "TechCorp"),
    ("Full Stack Engineer", "Innovation Labs"),
    ("Product Manager", "StartupXYZ"),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct BoardOptions {
    pub seed_samples: bool,
}

/// One board: the repository plus the search query currently applied to
/// the view. Adapters own this and feed it [`BoardIntent`]s.
pub struct Board<B, C = SystemClock> {
    repository: OpportunityRepository<B, C>,
    query: String,
}

impl<B: SnapshotBackend> Board<B, SystemClock> {
    pub fn open(store: Store<B>, options: BoardOptions) -> Result<Self, BoardError> {
        Self::open_with_clock(store, SystemClock, options)
    }
}

impl<B: SnapshotBackend, C: Clock> Board<B, C> {
    pub fn open_with_clock(
        store: Store<B>,
        clock: C,
        options: BoardOptions,
    ) -> Result<Self, BoardError> {
        let mut repository = OpportunityRepository::open_with_clock(store, clock)?;
        if options.seed_samples && repository.load_state() == LoadState::FirstRun {
            for (title, company) in SAMPLE_OPPORTUNITIES {
                repository.add(title, company)?;
            }
            info!(count = SAMPLE_OPPORTUNITIES.len(), "seeded sample opportunities");
        }
        Ok(Self {
            repository,
            query: String::new(),
        })
    }

    pub fn dispatch(&mut self, intent: BoardIntent) -> Result<Effect, BoardError> {
        debug!(
            intent = intent.name(),
            mutates = intent.mutates(),
            "dispatching board intent"
        );
        match intent {
            BoardIntent::Add { title, company } => {
                self.repository.add(&title, &company).map(Effect::Added)
            }
            BoardIntent::Move { id, status } => Ok(if self.repository.update_status(id, status) {
                Effect::Moved { id, status }
            } else {
                Effect::Ignored { id }
            }),
            BoardIntent::Delete { id } => Ok(self
                .repository
                .delete(id)
                .map_or(Effect::Ignored { id }, Effect::Deleted)),
            BoardIntent::Search { query } => {
                self.query = query.trim().to_string();
                Ok(Effect::QueryChanged {
                    active: !self.query.is_empty(),
                })
            }
        }
    }

    pub fn projection(&self) -> BoardProjection {
        project(self.repository.opportunities(), &self.query)
    }

    pub fn active_query(&self) -> Option<&str> {
        (!self.query.is_empty()).then_some(self.query.as_str())
    }

    pub fn repository(&self) -> &OpportunityRepository<B, C> {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut OpportunityRepository<B, C> {
        &mut self.repository
    }

    pub fn contains(&self, id: OpportunityId) -> bool {
        self.repository.find_by_id(id).is_some()
    }

    pub fn persistence_warning(&self) -> Option<&BoardError> {
        self.repository.persistence_warning()
    }
}

#[cfg(test)]
#[path = "tests/board_tests.rs"]
mod tests;
