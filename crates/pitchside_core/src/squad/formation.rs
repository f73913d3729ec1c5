// 4-3-3 slot layout used by the best XI view.
// Coordinates are percentages: x = 0 left touchline, 100 right touchline;
// y = 0 own goal line, 100 opponent goal line.

use serde::{Deserialize, Serialize};

use crate::models::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotRole {
    #[serde(rename = "GK")]
    Goalkeeper,
    #[serde(rename = "LB")]
    LeftBack,
    #[serde(rename = "LCB")]
    LeftCenterBack,
    #[serde(rename = "RCB")]
    RightCenterBack,
    #[serde(rename = "RB")]
    RightBack,
    #[serde(rename = "CDM")]
    DefensiveMid,
    #[serde(rename = "LCM")]
    LeftMid,
    #[serde(rename = "RCM")]
    RightMid,
    #[serde(rename = "LW")]
    LeftWing,
    #[serde(rename = "ST")]
    Striker,
    #[serde(rename = "RW")]
    RightWing,
}

impl SlotRole {
    /// Role code, also used as the placeholder label of an empty slot.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Goalkeeper => "GK",
            Self::LeftBack => "LB",
            Self::LeftCenterBack => "LCB",
            Self::RightCenterBack => "RCB",
            Self::RightBack => "RB",
            Self::DefensiveMid => "CDM",
            Self::LeftMid => "LCM",
            Self::RightMid => "RCM",
            Self::LeftWing => "LW",
            Self::Striker => "ST",
            Self::RightWing => "RW",
        }
    }

    /// Position category eligible for this slot.
    pub fn position(&self) -> Position {
        match self {
            Self::Goalkeeper => Position::Goalkeeper,
            Self::LeftBack | Self::RightBack => Position::Fullback,
            Self::LeftCenterBack | Self::RightCenterBack => Position::CenterBack,
            Self::DefensiveMid => Position::DefensiveMid,
            Self::LeftMid | Self::RightMid => Position::Midfielder,
            Self::LeftWing | Self::RightWing => Position::Winger,
            Self::Striker => Position::Striker,
        }
    }

    pub fn layout(&self) -> LayoutPosition {
        let (x, y) = match self {
            Self::Goalkeeper => (50.0, 5.0),
            Self::LeftBack => (15.0, 25.0),
            Self::LeftCenterBack => (38.0, 20.0),
            Self::RightCenterBack => (62.0, 20.0),
            Self::RightBack => (85.0, 25.0),
            Self::DefensiveMid => (50.0, 40.0),
            Self::LeftMid => (32.0, 55.0),
            Self::RightMid => (68.0, 55.0),
            Self::LeftWing => (15.0, 78.0),
            Self::Striker => (50.0, 85.0),
            Self::RightWing => (85.0, 78.0),
        };
        LayoutPosition { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutPosition {
    pub x: f32,
    pub y: f32,
}

/// The eleven slots in display order (back to front, left to right).
/// Within a category, slots fill in this order.
pub const FORMATION_433: [SlotRole; 11] = [
    SlotRole::Goalkeeper,
    SlotRole::LeftBack,
    SlotRole::LeftCenterBack,
    SlotRole::RightCenterBack,
    SlotRole::RightBack,
    SlotRole::DefensiveMid,
    SlotRole::LeftMid,
    SlotRole::RightMid,
    SlotRole::LeftWing,
    SlotRole::Striker,
    SlotRole::RightWing,
];

/// Number of slots a category owns in the formation.
pub fn slot_count(position: Position) -> usize {
    FORMATION_433.iter().filter(|r| r.position() == position).count()
}
