//! Plain-text rendering of a board projection.

use std::fmt::Write as _;

use board_core::{BoardProjection, CardView, Segment};
use chrono::Local;
use shared::Opportunity;

pub fn render_board(projection: &BoardProjection) -> String {
    let mut out = String::new();
    if let Some(query) = &projection.query {
        let _ = writeln!(out, "Search: \"{query}\"");
    }
    for column in projection.columns() {
        let heading = column.status.label();
        if projection.query.is_some() {
            let _ = writeln!(out, "{heading} ({} of {})", column.cards.len(), column.total);
        } else {
            let _ = writeln!(out, "{heading} ({})", column.total);
        }
        if column.cards.is_empty() {
            out.push_str("  -\n");
        }
        for card in &column.cards {
            out.push_str(&render_card(card));
            out.push('\n');
        }
    }
    out
}

fn render_card(card: &CardView) -> String {
    format!(
        "  #{:<4} {} @ {}  (added {})",
        card.id,
        render_segments(&card.title),
        render_segments(&card.company),
        card.created_at.with_timezone(&Local).format("%Y-%m-%d")
    )
}

/// Highlighted segments are wrapped in `*`.
pub fn render_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| {
            if s.highlighted {
                format!("*{}*", s.text)
            } else {
                s.text.clone()
            }
        })
        .collect()
}

pub fn render_detail(opportunity: &Opportunity) -> String {
    format!(
        "#{id} {title}\ncompany: {company}\nstatus:  {status}\ncreated: {created}\nupdated: {updated}\n",
        id = opportunity.id(),
        title = opportunity.title(),
        company = opportunity.company(),
        status = opportunity.status(),
        created = shared::timestamp::format(&opportunity.created_at()),
        updated = shared::timestamp::format(&opportunity.updated_at()),
    )
}
