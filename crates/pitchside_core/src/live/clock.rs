//! Match Clock State Machine
//!
//! ```text
//! NotStarted --start--> Running(1) --end_half--> Halftime --start_second_half--> Running(2)
//!                       Running(p) <--toggle--> Paused(p)
//!                       Running(2)/Paused(2) --finish--> Finished
//! ```
//!
//! Time only advances while running, one whole second per tick. Any
//! transition requested from a state that doesn't allow it is ignored and
//! leaves the clock untouched.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPeriod {
    First,
    Second,
}

impl MatchPeriod {
    pub fn number(&self) -> u8 {
        match self {
            MatchPeriod::First => 1,
            MatchPeriod::Second => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ClockState {
    NotStarted,
    Running { period: MatchPeriod },
    Paused { period: MatchPeriod },
    Halftime,
    Finished,
}

/// Outcome of a requested transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTransition {
    Applied { from: ClockState, to: ClockState },
    Ignored { state: ClockState },
}

impl ClockTransition {
    pub fn is_applied(&self) -> bool {
        matches!(self, ClockTransition::Applied { .. })
    }
}

/// Serializable view of the clock for the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockSnapshot {
    pub elapsed_seconds: u32,
    pub period: u8,
    pub running: bool,
    pub at_halftime: bool,
    pub sides_flipped: bool,
    pub label: ClockLabel,
}

/// `MM:SS` label, stored inline to keep the snapshot `Copy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ClockLabel {
    minutes: u32,
    seconds: u8,
}

impl ClockLabel {
    pub fn from_elapsed(elapsed_seconds: u32) -> Self {
        Self { minutes: elapsed_seconds / 60, seconds: (elapsed_seconds % 60) as u8 }
    }
}

impl std::fmt::Display for ClockLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}

impl From<ClockLabel> for String {
    fn from(label: ClockLabel) -> String {
        label.to_string()
    }
}

impl TryFrom<String> for ClockLabel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let (m, s) = value.split_once(':').ok_or_else(|| format!("invalid clock label '{value}'"))?;
        let minutes = m.parse::<u32>().map_err(|e| format!("invalid minutes in '{value}': {e}"))?;
        let seconds = s.parse::<u8>().map_err(|e| format!("invalid seconds in '{value}': {e}"))?;
        if seconds >= 60 {
            return Err(format!("invalid seconds in '{value}'"));
        }
        Ok(Self { minutes, seconds })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchClock {
    state: ClockState,
    elapsed_seconds: u32,
    /// Toggled when the first half ends; the UI mirrors the pitch.
    sides_flipped: bool,
}

impl Default for MatchClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchClock {
    pub fn new() -> Self {
        Self { state: ClockState::NotStarted, elapsed_seconds: 0, sides_flipped: false }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    /// 1 until the second half starts, 2 afterwards.
    pub fn period(&self) -> u8 {
        match self.state {
            ClockState::Running { period } | ClockState::Paused { period } => period.number(),
            ClockState::NotStarted | ClockState::Halftime => 1,
            ClockState::Finished => 2,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, ClockState::Running { .. })
    }

    pub fn at_halftime(&self) -> bool {
        self.state == ClockState::Halftime
    }

    pub fn sides_flipped(&self) -> bool {
        self.sides_flipped
    }

    /// Tactical events may only be captured while the clock runs.
    pub fn can_capture(&self) -> bool {
        self.is_running()
    }

    pub fn timestamp_label(&self) -> String {
        ClockLabel::from_elapsed(self.elapsed_seconds).to_string()
    }

    pub fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot {
            elapsed_seconds: self.elapsed_seconds,
            period: self.period(),
            running: self.is_running(),
            at_halftime: self.at_halftime(),
            sides_flipped: self.sides_flipped,
            label: ClockLabel::from_elapsed(self.elapsed_seconds),
        }
    }

    pub fn start(&mut self) -> ClockTransition {
        match self.state {
            ClockState::NotStarted => self.enter(ClockState::Running { period: MatchPeriod::First }),
            _ => self.ignore("start"),
        }
    }

    /// Ends the first half, paused or running.
    pub fn end_half(&mut self) -> ClockTransition {
        match self.state {
            ClockState::Running { period: MatchPeriod::First } | ClockState::Paused { period: MatchPeriod::First } => {
                self.sides_flipped = !self.sides_flipped;
                self.enter(ClockState::Halftime)
            }
            _ => self.ignore("end_half"),
        }
    }

    pub fn start_second_half(&mut self) -> ClockTransition {
        match self.state {
            ClockState::Halftime => self.enter(ClockState::Running { period: MatchPeriod::Second }),
            _ => self.ignore("start_second_half"),
        }
    }

    /// Pause or resume within the current period.
    pub fn toggle(&mut self) -> ClockTransition {
        match self.state {
            ClockState::Running { period } => self.enter(ClockState::Paused { period }),
            ClockState::Paused { period } => self.enter(ClockState::Running { period }),
            _ => self.ignore("toggle"),
        }
    }

    pub fn finish(&mut self) -> ClockTransition {
        match self.state {
            ClockState::Running { period: MatchPeriod::Second } | ClockState::Paused { period: MatchPeriod::Second } => {
                self.enter(ClockState::Finished)
            }
            _ => self.ignore("finish"),
        }
    }

    /// Advance one second if running. Returns whether time moved.
    pub fn tick(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        true
    }

    fn enter(&mut self, to: ClockState) -> ClockTransition {
        let from = self.state;
        self.state = to;
        log::debug!("clock: {:?} -> {:?} at {}", from, to, self.timestamp_label());
        ClockTransition::Applied { from, to }
    }

    fn ignore(&self, request: &str) -> ClockTransition {
        log::debug!("clock: ignored {} in {:?}", request, self.state);
        ClockTransition::Ignored { state: self.state }
    }
}
