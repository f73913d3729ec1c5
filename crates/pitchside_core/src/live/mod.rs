//! Live match capture: clock, tactical event protocol, finalization.

pub mod capture;
pub mod clock;
pub mod finalizer;
pub mod ticker;
pub mod tracker;
pub mod vocabulary;


pub use capture::{CaptureLog, CaptureSession, LogStats, PendingAction, TacticalEvent};
pub use clock::{ClockLabel, ClockSnapshot, ClockState, ClockTransition, MatchClock, MatchPeriod};
pub use finalizer::{capture_score, finalize, positive_ratio, CaptureNotes, RecordOrigin, CAPTURE_NOTES_VERSION};
pub use ticker::{ClockTicker, TICK_MS};
pub use tracker::{LiveTracker, TrackerSnapshot};
pub use vocabulary::{actions_for, find_action, CaptureResult, Phase, TacticalAction, ZoneId};
