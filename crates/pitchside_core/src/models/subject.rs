//! Subjects (squad members) and their position categories.

use serde::{Deserialize, Serialize};

/// Position category used for squad selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Goalkeeper,
    Fullback,
    CenterBack,
    DefensiveMid,
    Midfielder,
    Winger,
    Striker,
}

impl Position {
    /// Order in which the squad selector fills categories.
    pub const SELECTION_ORDER: [Position; 7] = [
        Position::Goalkeeper,
        Position::Fullback,
        Position::CenterBack,
        Position::DefensiveMid,
        Position::Midfielder,
        Position::Winger,
        Position::Striker,
    ];

    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Goalkeeper => "GK",
            Self::Fullback => "FB",
            Self::CenterBack => "CB",
            Self::DefensiveMid => "DM",
            Self::Midfielder => "CM",
            Self::Winger => "W",
            Self::Striker => "ST",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Goalkeeper => "Goalkeeper",
            Self::Fullback => "Fullback",
            Self::CenterBack => "Center back",
            Self::DefensiveMid => "Defensive midfielder",
            Self::Midfielder => "Midfielder",
            Self::Winger => "Winger",
            Self::Striker => "Striker",
        }
    }
}

/// Squad member metadata as provided by storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub position: Position,
    /// Age group or squad category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

impl Subject {
    pub fn new(id: impl Into<String>, name: impl Into<String>, position: Position) -> Self {
        Self { id: id.into(), name: name.into(), position, category_id: None }
    }

    pub fn in_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }
}
