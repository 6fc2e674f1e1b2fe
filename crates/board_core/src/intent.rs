//! Typed user intents handed from a presentation adapter to the board.

use shared::{BoardError, Opportunity, OpportunityId, Status};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardIntent {
    Add { title: String, company: String },
    Move { id: OpportunityId, status: Status },
    Delete { id: OpportunityId },
    Search { query: String },
}

impl BoardIntent {
    /// A card dropped onto the column named `target`.
    pub fn drop_onto(id: OpportunityId, target: &str) -> Result<Self, BoardError> {
        Ok(Self::Move {
            id,
            status: target.parse()?,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Move { .. } => "move",
            Self::Delete { .. } => "delete",
            Self::Search { .. } => "search",
        }
    }

    /// Whether handling this intent writes the snapshot.
    pub fn mutates(&self) -> bool {
        !matches!(self, Self::Search { .. })
    }
}

/// What a dispatched intent did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Added(Opportunity),
    Moved { id: OpportunityId, status: Status },
    Deleted(Opportunity),
    QueryChanged { active: bool },
    /// The intent named an opportunity that no longer exists.
    Ignored { id: OpportunityId },
}
