//! Live Tracker
//!
//! One match, one clock, any number of tracked subjects. Each subject owns
//! an independent capture log; the capture protocol state (active phase,
//! pending action) belongs to whichever subject is active and is reset on
//! every switch. Switching never touches the clock or other logs.
//!
//! Clock transitions take the host's monotonic time so elapsed seconds are
//! settled before the state changes.

use serde::{Deserialize, Serialize};

use super::capture::{CaptureLog, CaptureSession, TacticalEvent};
use super::clock::{ClockSnapshot, ClockTransition, MatchClock};
use super::finalizer::finalize;
use super::ticker::ClockTicker;
use super::vocabulary::{CaptureResult, Phase, TacticalAction, ZoneId};
use crate::config::TrackerConfig;
use crate::error::CaptureError;
use crate::models::{PendingWrite, SessionDescriptor};

#[derive(Debug, Clone, Default)]
pub struct LiveTracker {
    clock: MatchClock,
    ticker: ClockTicker,
    logs: Vec<CaptureLog>,
    active: Option<String>,
    session: CaptureSession,
}

/// UI-facing view of the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerSnapshot {
    pub clock: ClockSnapshot,
    pub active_subject: Option<String>,
    pub active_phase: Option<Phase>,
    pub pending_action: Option<String>,
    pub event_counts: Vec<(String, usize)>,
}

impl LiveTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clock(&self) -> &MatchClock {
        &self.clock
    }

    pub fn session(&self) -> &CaptureSession {
        &self.session
    }

    pub fn active_subject(&self) -> Option<&str> {
        self.active.as_deref()
    }

    // -- clock --------------------------------------------------------------

    /// Apply elapsed whole seconds. Call from the host's frame/timer loop.
    pub fn poll(&mut self, now_ms: u64) -> u32 {
        self.ticker.poll(&mut self.clock, now_ms)
    }

    pub fn start(&mut self, now_ms: u64) -> ClockTransition {
        self.transition(now_ms, MatchClock::start)
    }

    pub fn end_half(&mut self, now_ms: u64) -> ClockTransition {
        self.transition(now_ms, MatchClock::end_half)
    }

    pub fn start_second_half(&mut self, now_ms: u64) -> ClockTransition {
        self.transition(now_ms, MatchClock::start_second_half)
    }

    pub fn toggle(&mut self, now_ms: u64) -> ClockTransition {
        self.transition(now_ms, MatchClock::toggle)
    }

    pub fn finish(&mut self, now_ms: u64) -> ClockTransition {
        self.transition(now_ms, MatchClock::finish)
    }

    fn transition(&mut self, now_ms: u64, apply: fn(&mut MatchClock) -> ClockTransition) -> ClockTransition {
        self.ticker.poll(&mut self.clock, now_ms);
        let outcome = apply(&mut self.clock);
        if outcome.is_applied() {
            self.ticker.resync(&self.clock, now_ms);
        }
        outcome
    }

    // -- subjects -----------------------------------------------------------

    /// Start tracking a subject. Returns `false` if it was already tracked.
    pub fn track(&mut self, subject_id: &str) -> bool {
        if self.log_for(subject_id).is_some() {
            return false;
        }
        self.logs.push(CaptureLog::new(subject_id));
        if self.active.is_none() {
            self.active = Some(subject_id.to_string());
        }
        true
    }

    /// Stop tracking a subject and hand back its log.
    pub fn untrack(&mut self, subject_id: &str) -> Option<CaptureLog> {
        let index = self.logs.iter().position(|l| l.subject_id == subject_id)?;
        if self.active.as_deref() == Some(subject_id) {
            self.active = None;
            self.session = CaptureSession::new();
        }
        Some(self.logs.remove(index))
    }

    /// Make another tracked subject active. Protocol state starts fresh.
    pub fn switch_subject(&mut self, subject_id: &str) -> Result<(), CaptureError> {
        if self.log_for(subject_id).is_none() {
            return Err(CaptureError::UnknownSubject(subject_id.to_string()));
        }
        if self.active.as_deref() != Some(subject_id) {
            log::debug!("tracker: active subject {:?} -> {}", self.active, subject_id);
            self.active = Some(subject_id.to_string());
            self.session = CaptureSession::new();
        }
        Ok(())
    }

    pub fn log_for(&self, subject_id: &str) -> Option<&CaptureLog> {
        self.logs.iter().find(|l| l.subject_id == subject_id)
    }

    pub fn logs(&self) -> &[CaptureLog] {
        &self.logs
    }

    fn active_log_mut(&mut self) -> Result<&mut CaptureLog, CaptureError> {
        let active = self.active.as_deref().ok_or(CaptureError::NoActiveSubject)?;
        self.logs
            .iter_mut()
            .find(|l| l.subject_id == active)
            .ok_or_else(|| CaptureError::UnknownSubject(active.to_string()))
    }

    // -- capture ------------------------------------------------------------

    pub fn select_phase(&mut self, phase: Phase) -> Result<(), CaptureError> {
        if self.active.is_none() {
            return Err(CaptureError::NoActiveSubject);
        }
        self.session.select_phase(phase);
        Ok(())
    }

    pub fn select_action(&mut self, name: &str) -> Result<&'static TacticalAction, CaptureError> {
        if self.active.is_none() {
            return Err(CaptureError::NoActiveSubject);
        }
        self.session.select_action(name, &self.clock)
    }

    pub fn qualify(&mut self, result: CaptureResult) -> Result<TacticalEvent, CaptureError> {
        let Self { clock, logs, active, session, .. } = self;
        let active = active.as_deref().ok_or(CaptureError::NoActiveSubject)?;
        let log = logs
            .iter_mut()
            .find(|l| l.subject_id == active)
            .ok_or_else(|| CaptureError::UnknownSubject(active.to_string()))?;
        session.qualify(result, clock, log).cloned()
    }

    pub fn discard_pending(&mut self) -> bool {
        self.session.discard_pending()
    }

    /// Tag the active subject's most recent event.
    pub fn tag_last_zone(&mut self, zone: ZoneId) -> Result<TacticalEvent, CaptureError> {
        self.active_log_mut()?.tag_last_zone(zone).cloned()
    }

    /// Abort the capture: every log is emptied and pending state dropped.
    /// Tracked subjects and the clock are kept.
    pub fn discard_all(&mut self) {
        for log in &mut self.logs {
            log.clear();
        }
        self.session = CaptureSession::new();
        log::info!("tracker: capture discarded for {} subjects", self.logs.len());
    }

    // -- output -------------------------------------------------------------

    /// Finalize every tracked subject, in tracking order.
    pub fn finalize_all(&self, descriptor: &SessionDescriptor, config: &TrackerConfig) -> Vec<PendingWrite> {
        self.logs
            .iter()
            .map(|log| PendingWrite {
                record: finalize(&log.subject_id, descriptor.session_ref(), log.events(), config),
                session: descriptor.clone(),
            })
            .collect()
    }

    pub fn snapshot(&self) -> TrackerSnapshot {
        TrackerSnapshot {
            clock: self.clock.snapshot(),
            active_subject: self.active.clone(),
            active_phase: self.session.active_phase(),
            pending_action: self.session.pending().map(|p| p.action.key.to_string()),
            event_counts: self.logs.iter().map(|l| (l.subject_id.clone(), l.len())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::live::finalizer::{CaptureNotes, RecordOrigin};
    use chrono::NaiveDate;

    fn started(subjects: &[&str]) -> LiveTracker {
        let mut tracker = LiveTracker::new();
        for s in subjects {
            tracker.track(s);
        }
        tracker.start(0);
        tracker
    }

    fn capture(tracker: &mut LiveTracker, phase: Phase, action: &str, result: CaptureResult) {
        tracker.select_phase(phase).unwrap();
        tracker.select_action(action).unwrap();
        tracker.qualify(result).unwrap();
    }

    #[test]
    fn test_logs_are_independent_per_subject() {
        let mut tracker = started(&["a", "b"]);
        assert_eq!(tracker.active_subject(), Some("a"));

        capture(&mut tracker, Phase::Offensive, "pass", CaptureResult::Positive);
        tracker.switch_subject("b").unwrap();
        capture(&mut tracker, Phase::Defensive, "tackle", CaptureResult::Negative);
        capture(&mut tracker, Phase::Defensive, "cover", CaptureResult::Neutral);

        assert_eq!(tracker.log_for("a").unwrap().len(), 1);
        assert_eq!(tracker.log_for("b").unwrap().len(), 2);
    }

    #[test]
    fn test_switch_drops_pending_and_phase_but_not_clock() {
        let mut tracker = started(&["a", "b"]);
        tracker.select_phase(Phase::Offensive).unwrap();
        tracker.select_action("shot").unwrap();

        tracker.switch_subject("b").unwrap();
        assert!(tracker.session().pending().is_none());
        assert!(tracker.session().active_phase().is_none());
        assert!(tracker.clock().is_running());
        assert_eq!(tracker.qualify(CaptureResult::Positive), Err(CaptureError::NoPendingAction));
        assert!(tracker.log_for("a").unwrap().is_empty());
    }

    #[test]
    fn test_switch_to_same_subject_keeps_state() {
        let mut tracker = started(&["a"]);
        tracker.select_phase(Phase::Offensive).unwrap();
        tracker.select_action("shot").unwrap();
        tracker.switch_subject("a").unwrap();
        assert!(tracker.session().pending().is_some());
    }

    #[test]
    fn test_unknown_subject() {
        let mut tracker = started(&["a"]);
        assert_eq!(tracker.switch_subject("zz"), Err(CaptureError::UnknownSubject("zz".to_string())));
        assert!(!tracker.track("a"));
    }

    #[test]
    fn test_no_active_subject() {
        let mut tracker = LiveTracker::new();
        tracker.start(0);
        assert_eq!(tracker.select_phase(Phase::Offensive), Err(CaptureError::NoActiveSubject));
        assert_eq!(tracker.qualify(CaptureResult::Neutral), Err(CaptureError::NoActiveSubject));
    }

    #[test]
    fn test_events_carry_clock_time() {
        let mut tracker = started(&["a"]);
        tracker.poll(1_000);
        tracker.poll(75_400);
        capture(&mut tracker, Phase::Offensive, "pass", CaptureResult::Positive);

        let event = tracker.log_for("a").unwrap().last().unwrap().clone();
        assert_eq!(event.elapsed_seconds, 75);
        assert_eq!(event.timestamp_label, "01:15");
        assert_eq!(event.period, 1);
    }

    #[test]
    fn test_paused_time_is_not_counted() {
        let mut tracker = started(&["a"]);
        tracker.toggle(10_500);
        tracker.poll(50_000);
        tracker.toggle(60_000);
        tracker.poll(62_000);
        assert_eq!(tracker.clock().elapsed_seconds(), 12);
    }

    #[test]
    fn test_second_half_events_have_period_two() {
        let mut tracker = started(&["a"]);
        tracker.end_half(45_000);
        assert!(tracker.select_phase(Phase::Offensive).is_ok());
        assert_eq!(tracker.select_action("pass"), Err(CaptureError::ClockNotRunning));

        tracker.start_second_half(100_000);
        tracker.poll(101_000);
        capture(&mut tracker, Phase::Offensive, "pass", CaptureResult::Positive);
        let event = tracker.log_for("a").unwrap().last().unwrap();
        assert_eq!(event.period, 2);
        assert_eq!(event.elapsed_seconds, 46);
    }

    #[test]
    fn test_zone_tag_targets_active_subject_last_event() {
        let mut tracker = started(&["a", "b"]);
        capture(&mut tracker, Phase::Offensive, "pass", CaptureResult::Positive);
        capture(&mut tracker, Phase::Offensive, "shot", CaptureResult::Negative);
        let tagged = tracker.tag_last_zone(ZoneId::new(10).unwrap()).unwrap();
        assert_eq!(tagged.action, "shot");

        tracker.switch_subject("b").unwrap();
        assert_eq!(tracker.tag_last_zone(ZoneId::new(1).unwrap()), Err(CaptureError::EmptyLog));
    }

    #[test]
    fn test_discard_all() {
        let mut tracker = started(&["a", "b"]);
        capture(&mut tracker, Phase::Offensive, "pass", CaptureResult::Positive);
        tracker.select_action("shot").unwrap();

        tracker.discard_all();
        assert!(tracker.logs().iter().all(|l| l.is_empty()));
        assert!(tracker.session().pending().is_none());
        assert_eq!(tracker.logs().len(), 2);
        assert!(tracker.clock().is_running());
    }

    #[test]
    fn test_finalize_all_pairs_descriptor() {
        let mut tracker = started(&["a", "b"]);
        capture(&mut tracker, Phase::Offensive, "pass", CaptureResult::Positive);

        let descriptor =
            SessionDescriptor::new(NaiveDate::from_ymd_opt(2025, 9, 6).unwrap(), "team-1", Some("u15".to_string()));
        let writes = tracker.finalize_all(&descriptor, &TrackerConfig::default());

        assert_eq!(writes.len(), 2);
        assert_eq!(writes[0].record.subject_id, "a");
        assert_eq!(writes[0].record.session.date, "2025-09-06");
        assert_eq!(writes[0].session, descriptor);
        assert_eq!(RecordOrigin::of(&writes[0].record), RecordOrigin::TacticalCapture);
        assert_eq!(writes[0].record.technical.get("passing"), Some(10.0));
        // untouched subject finalizes to neutral
        assert_eq!(CaptureNotes::parse(&writes[1].record.notes).unwrap().score, 5.0);
    }

    #[test]
    fn test_untrack_active_clears_session() {
        let mut tracker = started(&["a", "b"]);
        capture(&mut tracker, Phase::Offensive, "pass", CaptureResult::Positive);
        let log = tracker.untrack("a").unwrap();
        assert_eq!(log.len(), 1);
        assert!(tracker.active_subject().is_none());
        assert!(tracker.session().active_phase().is_none());
    }

    #[test]
    fn test_snapshot() {
        let mut tracker = started(&["a"]);
        tracker.select_phase(Phase::Defensive).unwrap();
        tracker.select_action("tackle").unwrap();
        let snap = tracker.snapshot();
        assert_eq!(snap.pending_action.as_deref(), Some("tackle"));
        assert_eq!(snap.event_counts, vec![("a".to_string(), 0)]);
        assert!(snap.clock.running);
    }
}
