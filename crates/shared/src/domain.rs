use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::BoardError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_newtype!(OpportunityId);

impl OpportunityId {
    pub const FIRST: Self = Self(1);

    /// The id after this one, or `None` once the id space is used up.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

/// Pipeline stage of an opportunity. Column order on the board follows
/// [`Status::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Saved,
    Applied,
    Interview,
    Offer,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Saved,
        Status::Applied,
        Status::Interview,
        Status::Offer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Saved => "saved",
            Status::Applied => "applied",
            Status::Interview => "interview",
            Status::Offer => "offer",
        }
    }

    /// Column heading shown by adapters.
    pub fn label(self) -> &'static str {
        match self {
            Status::Saved => "Saved",
            Status::Applied => "Applied",
            Status::Interview => "Interview",
            Status::Offer => "Offer",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = BoardError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Status::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| BoardError::UnknownStatus(trimmed.to_string()))
    }
}

/// A single tracked job application.
///
/// Title, company, id and creation time are fixed once the record exists;
/// only [`Opportunity::transition`] changes it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    id: OpportunityId,
    title: String,
    company: String,
    status: Status,
    #[serde(with = "crate::timestamp")]
    created_at: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    updated_at: DateTime<Utc>,
}

impl Opportunity {
    /// Builds a fresh `saved` record. Callers are expected to have trimmed
    /// and validated `title` and `company`.
    pub fn new(
        id: OpportunityId,
        title: impl Into<String>,
        company: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            company: company.into(),
            status: Status::Saved,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> OpportunityId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves the record to `status` and refreshes `updated_at`. A clock that
    /// reads earlier than the creation time is clamped to it.
    pub fn transition(&mut self, status: Status, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = now.max(self.created_at);
    }

    /// Case-insensitive substring match on title or company. `needle` must
    /// already be lowercased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.company.to_lowercase().contains(needle)
    }
}

fn first_id() -> OpportunityId {
    OpportunityId::FIRST
}

// An explicit `null` falls back the same way a missing key does.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Opportunity>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_first_id<'de, D>(deserializer: D) -> Result<OpportunityId, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or(OpportunityId::FIRST))
}

/// Everything persisted for a board: the ordered collection and the next id
/// to hand out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub opportunities: Vec<Opportunity>,
    #[serde(default = "first_id", deserialize_with = "null_as_first_id")]
    pub current_id: OpportunityId,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            opportunities: Vec::new(),
            current_id: OpportunityId::FIRST,
        }
    }
}

impl Snapshot {
    pub fn max_id(&self) -> Option<OpportunityId> {
        self.opportunities.iter().map(Opportunity::id).max()
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
