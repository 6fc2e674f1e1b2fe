//! Read-only views of the board, grouped by status.

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::{Opportunity, OpportunityId, Status};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub id: OpportunityId,
    pub status: Status,
    pub title: Vec<Segment>,
    pub company: Vec<Segment>,
    pub created_at: DateTime<Utc>,
}

impl CardView {
    pub fn plain_title(&self) -> String {
        self.title.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn plain_company(&self) -> String {
        self.company.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnView {
    pub status: Status,
    /// Opportunities in this status on the whole board, search or not.
    pub total: usize,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardProjection {
    pub query: Option<String>,
    /// One column per status, in [`Status::ALL`] order. Only [`project`]
    /// builds these.
    columns: Vec<ColumnView>,
}

impl BoardProjection {
    pub fn columns(&self) -> &[ColumnView] {
        &self.columns
    }

    pub fn column(&self, status: Status) -> &ColumnView {
        let index = match status {
            Status::Saved => 0,
            Status::Applied => 1,
            Status::Interview => 2,
            Status::Offer => 3,
        };
        &self.columns[index]
    }

    pub fn visible_cards(&self) -> usize {
        self.columns.iter().map(|c| c.cards.len()).sum()
    }
}

/// Builds the four columns. Cards are filtered by `query` (blank means no
/// filter); column totals always count the unfiltered collection.
pub fn project(opportunities: &[Opportunity], query: &str) -> BoardProjection {
    let trimmed = query.trim();
    let needle = trimmed.to_lowercase();
    let totals = status_counts(opportunities);

    let columns = Status::ALL
        .into_iter()
        .zip(totals)
        .map(|(status, (_, total))| ColumnView {
            status,
            total,
            cards: opportunities
                .iter()
                .filter(|opp| opp.status() == status)
                .filter(|opp| needle.is_empty() || opp.matches_lowercase(&needle))
                .map(|opp| card(opp, &needle))
                .collect(),
        })
        .collect();

    BoardProjection {
        query: (!trimmed.is_empty()).then(|| trimmed.to_string()),
        columns,
    }
}

pub fn status_counts(opportunities: &[Opportunity]) -> [(Status, usize); 4] {
    Status::ALL.map(|status| {
        let count = opportunities
            .iter()
            .filter(|opp| opp.status() == status)
            .count();
        (status, count)
    })
}

fn card(opportunity: &Opportunity, needle: &str) -> CardView {
    CardView {
        id: opportunity.id(),
        status: opportunity.status(),
        title: highlight(opportunity.title(), needle),
        company: highlight(opportunity.company(), needle),
        created_at: opportunity.created_at(),
    }
}

/// Splits `text` around case-insensitive occurrences of `needle`, which must
/// be lowercase. The needle is matched literally.
pub fn highlight(text: &str, needle: &str) -> Vec<Segment> {
    if needle.is_empty() || text.is_empty() {
        return vec![plain(text)];
    }

    // Lowercasing can change byte lengths, so keep a map from each lowered
    // byte back to the original char it came from.
    let mut lowered = String::with_capacity(text.len());
    let mut origin = Vec::with_capacity(text.len() + 1);
    for (index, ch) in text.char_indices() {
        for lower in ch.to_lowercase() {
            let before = lowered.len();
            lowered.push(lower);
            origin.resize(origin.len() + (lowered.len() - before), index);
        }
    }
    origin.push(text.len());

    let mut segments = Vec::new();
    let mut cursor = 0;
    for (start, matched) in lowered.match_indices(needle) {
        let from = origin[start];
        let to = origin[start + matched.len()];
        if from < cursor || to <= from {
            continue;
        }
        if from > cursor {
            segments.push(plain(&text[cursor..from]));
        }
        segments.push(Segment {
            text: text[from..to].to_string(),
            highlighted: true,
        });
        cursor = to;
    }
    if cursor < text.len() || segments.is_empty() {
        segments.push(plain(&text[cursor..]));
    }
    segments
}

fn plain(text: &str) -> Segment {
    Segment {
        text: text.to_string(),
        highlighted: false,
    }
}

#[cfg(test)]
#[path = "tests/projector_tests.rs"]
mod tests;
