//! Score records and the session descriptors that travel with them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::attribute::{AttributeGroup, GroupType};

/// ISO date format used for session dates (`YYYY-MM-DD`).
pub const SESSION_DATE_FORMAT: &str = "%Y-%m-%d";

/// Reference to the training session or match a record belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// ISO date string. Filtering compares it lexically.
    pub date: String,
}

impl SessionRef {
    pub fn on(date: NaiveDate) -> Self {
        Self { session_id: None, date: date.format(SESSION_DATE_FORMAT).to_string() }
    }

    /// The `YYYY-MM-DD` prefix of the date (drops any time component).
    pub fn day(&self) -> &str {
        self.date.get(..10).unwrap_or(&self.date)
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.day(), SESSION_DATE_FORMAT).ok()
    }
}

/// A point on the pitch heat map, both axes in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZonePoint {
    pub x: f64,
    pub y: f64,
}

/// One evaluation of a subject, entered by hand or produced by live capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub id: Uuid,
    pub subject_id: String,
    pub session: SessionRef,
    #[serde(default)]
    pub technical: AttributeGroup,
    #[serde(default)]
    pub physical: AttributeGroup,
    /// Absent on legacy records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tactical: Option<AttributeGroup>,
    #[serde(default)]
    pub zone_points: Vec<ZonePoint>,
    #[serde(default)]
    pub notes: String,
}

impl ScoreRecord {
    /// New hand-entered record with a fresh id and empty notes.
    pub fn manual(
        subject_id: impl Into<String>,
        session: SessionRef,
        technical: AttributeGroup,
        physical: AttributeGroup,
        tactical: Option<AttributeGroup>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject_id: subject_id.into(),
            session,
            technical,
            physical,
            tactical,
            zone_points: Vec::new(),
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_zone_points(mut self, points: Vec<ZonePoint>) -> Self {
        self.zone_points = points;
        self
    }

    pub fn group(&self, group_type: GroupType) -> Option<&AttributeGroup> {
        match group_type {
            GroupType::Technical => Some(&self.technical),
            GroupType::Physical => Some(&self.physical),
            GroupType::Tactical => self.tactical.as_ref(),
        }
    }

    pub fn has_tactical(&self) -> bool {
        self.tactical.as_ref().is_some_and(|g| !g.is_empty())
    }

    pub fn session_day(&self) -> &str {
        self.session.day()
    }
}

/// Session metadata handed to the storage collaborator alongside a record.
/// Storage decides whether it maps to an existing session or a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescriptor {
    pub date: String,
    pub team_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

impl SessionDescriptor {
    pub fn new(date: NaiveDate, team_id: impl Into<String>, category_id: Option<String>) -> Self {
        Self { date: date.format(SESSION_DATE_FORMAT).to_string(), team_id: team_id.into(), category_id }
    }

    pub fn session_ref(&self) -> SessionRef {
        SessionRef { session_id: None, date: self.date.clone() }
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, SESSION_DATE_FORMAT).ok()
    }
}

/// A record ready for persistence, paired with its session descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingWrite {
    pub record: ScoreRecord,
    pub session: SessionDescriptor,
}
