//! # Tactical Capture
//!
//! Three-step protocol per event, strictly in order:
//!
//! 1. **Phase** - sticky context, kept across events until changed
//! 2. **Action** - one of the phase's six actions; creates a pending event
//! 3. **Result** - positive/neutral/negative; commits the pending event
//!
//! After a commit the most recent event may be tagged with a pitch zone.
//! Re-tagging overwrites. Older events are never retagged.
//!
//! Every rejected step returns a [`CaptureError`] and changes nothing.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::clock::MatchClock;
use super::vocabulary::{find_action, CaptureResult, Phase, TacticalAction, ZoneId};
use crate::error::CaptureError;

/// One committed capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TacticalEvent {
    pub id: Uuid,
    /// `MM:SS` at commit time.
    pub timestamp_label: String,
    pub elapsed_seconds: u32,
    pub period: u8,
    pub phase: Phase,
    /// Action key from the phase vocabulary.
    pub action: String,
    pub result: CaptureResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<ZoneId>,
}

/// Append-only event log of one subject.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CaptureLog {
    pub subject_id: String,
    events: Vec<TacticalEvent>,
}

impl CaptureLog {
    pub fn new(subject_id: impl Into<String>) -> Self {
        Self { subject_id: subject_id.into(), events: Vec::new() }
    }

    pub fn events(&self) -> &[TacticalEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last(&self) -> Option<&TacticalEvent> {
        self.events.last()
    }

    fn push(&mut self, event: TacticalEvent) -> &TacticalEvent {
        self.events.push(event);
        &self.events[self.events.len() - 1]
    }

    /// Set the zone of the most recent event, overwriting any earlier tag.
    pub fn tag_last_zone(&mut self, zone: ZoneId) -> Result<&TacticalEvent, CaptureError> {
        let last = self.events.last_mut().ok_or(CaptureError::EmptyLog)?;
        last.zone_id = Some(zone);
        Ok(last)
    }

    /// Drop every event. Used when a capture is aborted.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn stats(&self) -> LogStats {
        let mut stats = LogStats::default();
        for event in &self.events {
            stats.record(event);
        }
        stats
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LogStats {
    pub total: usize,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    pub offensive: usize,
    pub defensive: usize,
    pub transition_to_offense: usize,
    pub transition_to_defense: usize,
}

impl LogStats {
    pub fn record(&mut self, event: &TacticalEvent) {
        self.total += 1;
        match event.result {
            CaptureResult::Positive => self.positive += 1,
            CaptureResult::Neutral => self.neutral += 1,
            CaptureResult::Negative => self.negative += 1,
        }
        match event.phase {
            Phase::Offensive => self.offensive += 1,
            Phase::Defensive => self.defensive += 1,
            Phase::TransitionToOffense => self.transition_to_offense += 1,
            Phase::TransitionToDefense => self.transition_to_defense += 1,
        }
    }

    /// Share of positive results; 0 for an empty log.
    pub fn positive_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.positive as f64 / self.total as f64
        }
    }
}

/// Action chosen but not yet qualified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAction {
    pub phase: Phase,
    pub action: &'static TacticalAction,
}

/// Protocol state for the subject currently being captured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureSession {
    active_phase: Option<Phase>,
    pending: Option<PendingAction>,
}

impl CaptureSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_phase(&self) -> Option<Phase> {
        self.active_phase
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    /// Step 1. Switching to another phase drops a pending action.
    pub fn select_phase(&mut self, phase: Phase) {
        if self.pending.is_some_and(|p| p.phase != phase) {
            log::debug!("capture: phase changed to {:?}, pending action dropped", phase);
            self.pending = None;
        }
        self.active_phase = Some(phase);
    }

    /// Step 2. Replaces any earlier pending action.
    pub fn select_action(
        &mut self,
        name: &str,
        clock: &MatchClock,
    ) -> Result<&'static TacticalAction, CaptureError> {
        if !clock.can_capture() {
            return Err(reject(CaptureError::ClockNotRunning));
        }
        let phase = self.active_phase.ok_or_else(|| reject(CaptureError::NoActivePhase))?;
        let action = find_action(phase, name)
            .ok_or_else(|| reject(CaptureError::UnknownAction { phase, action: name.to_string() }))?;

        self.pending = Some(PendingAction { phase, action });
        Ok(action)
    }

    /// Step 3. Commits the pending action into `log`.
    pub fn qualify<'a>(
        &mut self,
        result: CaptureResult,
        clock: &MatchClock,
        log: &'a mut CaptureLog,
    ) -> Result<&'a TacticalEvent, CaptureError> {
        if !clock.can_capture() {
            return Err(reject(CaptureError::ClockNotRunning));
        }
        let pending = self.pending.take().ok_or_else(|| reject(CaptureError::NoPendingAction))?;

        let event = TacticalEvent {
            id: Uuid::new_v4(),
            timestamp_label: clock.timestamp_label(),
            elapsed_seconds: clock.elapsed_seconds(),
            period: clock.period(),
            phase: pending.phase,
            action: pending.action.key.to_string(),
            result,
            zone_id: None,
        };
        log::debug!(
            "capture: {} {} {:?} {:?} at {}",
            log.subject_id,
            event.action,
            event.phase,
            event.result,
            event.timestamp_label
        );
        Ok(log.push(event))
    }

    /// Drop the pending action without logging anything.
    pub fn discard_pending(&mut self) -> bool {
        self.pending.take().is_some()
    }
}

fn reject(error: CaptureError) -> CaptureError {
    log::debug!("capture: rejected ({})", error);
    error
}
