//! # Squad Selector
//!
//! Fills the 4-3-3 best XI from a ranked pool.
//!
//! Categories are processed in a fixed order (GK, FB, CB, DM, CM, W, ST)
//! and each takes its top-N unassigned subjects by score. The result is
//! greedy per category, not a global optimum: a subject is never moved to
//! improve the total. Slots without an eligible subject stay empty and
//! render with their role code.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::formation::{slot_count, LayoutPosition, SlotRole, FORMATION_433};
use crate::context::ViewingContext;
use crate::models::Position;
use crate::scoring::normalizer::mean;
use crate::scoring::RankedSubject;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotAssignment {
    pub role: SlotRole,
    pub subject: Option<RankedSubject>,
    pub layout: LayoutPosition,
}

impl SlotAssignment {
    /// Subject name, or the role code for an empty slot.
    pub fn display_label(&self) -> &str {
        match &self.subject {
            Some(ranked) => &ranked.subject.name,
            None => self.role.code(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadSelection {
    /// Always eleven entries, in `FORMATION_433` order.
    pub slots: Vec<SlotAssignment>,
}

impl SquadSelection {
    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.subject.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.filled_count() == self.slots.len()
    }

    /// Mean score of the filled slots; 0 when nobody was selected.
    pub fn average_score(&self) -> f64 {
        mean(self.slots.iter().filter_map(|s| s.subject.as_ref()).map(|r| r.score))
    }

    pub fn slot(&self, role: SlotRole) -> Option<&SlotAssignment> {
        self.slots.iter().find(|s| s.role == role)
    }
}

/// Assign subjects from `pool` to the eleven formation slots.
///
/// The pool is re-sorted by descending unrounded average (stable) and
/// restricted to the context's viewing category before assignment. Each
/// subject id fills at most one slot, even when listed twice.
pub fn select_squad(pool: &[RankedSubject], ctx: &ViewingContext) -> SquadSelection {
    let mut ranked: Vec<&RankedSubject> =
        pool.iter().filter(|r| ctx.includes_category(r.subject.category_id.as_deref())).collect();
    ranked.sort_by(|a, b| b.average.total_cmp(&a.average));

    let mut picks: Vec<Option<RankedSubject>> = vec![None; FORMATION_433.len()];
    let mut assigned: HashSet<&str> = HashSet::new();

    for position in Position::SELECTION_ORDER {
        let mut candidates = ranked.iter().copied().filter(|r| r.subject.position == position);
        let slots = FORMATION_433.iter().enumerate().filter(|(_, role)| role.position() == position);
        for (index, _) in slots {
            let next = candidates.find(|r| !assigned.contains(r.subject.id.as_str()));
            let Some(pick) = next else { break };
            assigned.insert(pick.subject.id.as_str());
            picks[index] = Some(pick.clone());
        }

        log::debug!(
            "squad: {} filled {}/{}",
            position.short_name(),
            picks
                .iter()
                .zip(FORMATION_433.iter())
                .filter(|(p, role)| p.is_some() && role.position() == position)
                .count(),
            slot_count(position)
        );
    }

    let slots = FORMATION_433
        .iter()
        .zip(picks)
        .map(|(role, subject)| SlotAssignment { role: *role, subject, layout: role.layout() })
        .collect();

    SquadSelection { slots }
}
