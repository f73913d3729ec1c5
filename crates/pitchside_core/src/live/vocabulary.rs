//! Capture vocabulary
//!
//! The four game phases an action is recorded under, the fixed six
//! actions offered per phase, the qualitative result scale and the
//! twelve pitch zones used for coarse location tagging.

use serde::{Deserialize, Serialize};

use crate::models::ZonePoint;

/// Game phase the tracked subject's team is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Organised attack
    Offensive,
    /// Organised defence
    Defensive,
    /// Ball just won
    TransitionToOffense,
    /// Ball just lost
    TransitionToDefense,
}

impl Phase {
    pub const ALL: [Phase; 4] =
        [Phase::Offensive, Phase::Defensive, Phase::TransitionToOffense, Phase::TransitionToDefense];

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Offensive => "Offensive",
            Phase::Defensive => "Defensive",
            Phase::TransitionToOffense => "Transition to offense",
            Phase::TransitionToDefense => "Transition to defense",
        }
    }

    pub fn is_attacking(&self) -> bool {
        matches!(self, Phase::Offensive | Phase::TransitionToOffense)
    }

    pub fn is_transition(&self) -> bool {
        matches!(self, Phase::TransitionToOffense | Phase::TransitionToDefense)
    }
}

/// Qualitative outcome of a captured action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaptureResult {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TacticalAction {
    pub key: &'static str,
    pub label: &'static str,
}

const fn action(key: &'static str, label: &'static str) -> TacticalAction {
    TacticalAction { key, label }
}

pub const ACTIONS_PER_PHASE: usize = 6;

const OFFENSIVE_ACTIONS: [TacticalAction; ACTIONS_PER_PHASE] = [
    action("pass", "Pass"),
    action("dribble", "Dribble"),
    action("shot", "Shot"),
    action("cross", "Cross"),
    action("off_ball_run", "Off-ball run"),
    action("ball_retention", "Ball retention"),
];

const DEFENSIVE_ACTIONS: [TacticalAction; ACTIONS_PER_PHASE] = [
    action("marking", "Marking"),
    action("tackle", "Tackle"),
    action("interception", "Interception"),
    action("pressing", "Pressing"),
    action("cover", "Cover"),
    action("aerial_duel", "Aerial duel"),
];

const TRANSITION_TO_OFFENSE_ACTIONS: [TacticalAction; ACTIONS_PER_PHASE] = [
    action("counter_run", "Counter-attack run"),
    action("forward_pass", "Forward pass"),
    action("ball_carry", "Ball carry"),
    action("support_run", "Support run"),
    action("switch_play", "Switch of play"),
    action("secure_possession", "Secure possession"),
];

const TRANSITION_TO_DEFENSE_ACTIONS: [TacticalAction; ACTIONS_PER_PHASE] = [
    action("counter_press", "Counter-press"),
    action("recovery_run", "Recovery run"),
    action("tactical_foul", "Tactical foul"),
    action("delay", "Delay"),
    action("close_lane", "Close passing lane"),
    action("regroup", "Regroup"),
];

/// The six actions offered for `phase`.
pub fn actions_for(phase: Phase) -> &'static [TacticalAction; ACTIONS_PER_PHASE] {
    match phase {
        Phase::Offensive => &OFFENSIVE_ACTIONS,
        Phase::Defensive => &DEFENSIVE_ACTIONS,
        Phase::TransitionToOffense => &TRANSITION_TO_OFFENSE_ACTIONS,
        Phase::TransitionToDefense => &TRANSITION_TO_DEFENSE_ACTIONS,
    }
}

/// Look up an action of `phase` by key or, case-insensitively, by label.
pub fn find_action(phase: Phase, name: &str) -> Option<&'static TacticalAction> {
    actions_for(phase).iter().find(|a| a.key == name || a.label.eq_ignore_ascii_case(name))
}

pub const ZONE_COLUMNS: u8 = 4;
pub const ZONE_ROWS: u8 = 3;
pub const ZONE_COUNT: u8 = ZONE_COLUMNS * ZONE_ROWS;

/// One of the twelve pitch cells, numbered row-major from the own-goal
/// end: columns run along the pitch length, rows across its width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ZoneId(u8);

impl ZoneId {
    pub fn new(id: u8) -> Option<Self> {
        (id < ZONE_COUNT).then_some(Self(id))
    }

    pub fn index(&self) -> u8 {
        self.0
    }

    pub fn column(&self) -> u8 {
        self.0 % ZONE_COLUMNS
    }

    pub fn row(&self) -> u8 {
        self.0 / ZONE_COLUMNS
    }

    /// Centre of the cell on the 0-100 heat-map grid.
    pub fn center(&self) -> ZonePoint {
        ZonePoint {
            x: (f64::from(self.column()) + 0.5) * 100.0 / f64::from(ZONE_COLUMNS),
            y: (f64::from(self.row()) + 0.5) * 100.0 / f64::from(ZONE_ROWS),
        }
    }

    pub fn all() -> impl Iterator<Item = ZoneId> {
        (0..ZONE_COUNT).map(ZoneId)
    }
}

impl TryFrom<u8> for ZoneId {
    type Error = String;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        ZoneId::new(id).ok_or_else(|| format!("zone id {id} out of range 0..{ZONE_COUNT}"))
    }
}

impl From<ZoneId> for u8 {
    fn from(zone: ZoneId) -> u8 {
        zone.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_six_unique_actions_per_phase() {
        for phase in Phase::ALL {
            let keys: HashSet<&str> = actions_for(phase).iter().map(|a| a.key).collect();
            assert_eq!(keys.len(), ACTIONS_PER_PHASE, "{phase:?}");
        }
    }

    #[test]
    fn test_find_action_by_key_or_label() {
        assert_eq!(find_action(Phase::Offensive, "shot").unwrap().label, "Shot");
        assert_eq!(find_action(Phase::Defensive, "aerial DUEL").unwrap().key, "aerial_duel");
        assert!(find_action(Phase::Defensive, "shot").is_none());
    }

    #[test]
    fn test_zone_ids() {
        assert!(ZoneId::new(11).is_some());
        assert!(ZoneId::new(12).is_none());
        assert_eq!(ZoneId::all().count(), 12);

        let zone = ZoneId::new(5).unwrap();
        assert_eq!((zone.column(), zone.row()), (1, 1));
        assert_eq!(zone.center(), ZonePoint { x: 37.5, y: 50.0 });
    }

    #[test]
    fn test_zone_serde_rejects_out_of_range() {
        assert_eq!(serde_json::from_str::<ZoneId>("3").unwrap().index(), 3);
        assert!(serde_json::from_str::<ZoneId>("12").is_err());
        assert_eq!(serde_json::to_string(&ZoneId::new(7).unwrap()).unwrap(), "7");
    }

    #[test]
    fn test_phase_wire_names() {
        assert_eq!(serde_json::to_string(&Phase::TransitionToOffense).unwrap(), "\"TRANSITION_TO_OFFENSE\"");
        assert_eq!(serde_json::to_string(&CaptureResult::Negative).unwrap(), "\"NEGATIVE\"");
    }
}
