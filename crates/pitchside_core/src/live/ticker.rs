//! Whole-second ticking from a monotonic millisecond source.
//!
//! The ticker never owns a timer thread. The host polls it with the
//! current monotonic time (every frame, every 250 ms, whatever it has) and
//! the ticker applies the whole seconds that passed since its anchor. The
//! anchor advances by exactly the ticks applied, so the sub-second
//! remainder carries over and nothing drifts. Polling twice with the same
//! time cannot tick twice.

use super::clock::MatchClock;

pub const TICK_MS: u64 = 1_000;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClockTicker {
    anchor_ms: Option<u64>,
}

impl ClockTicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.anchor_ms.is_some()
    }

    /// Apply elapsed whole seconds to `clock`. Returns ticks applied.
    pub fn poll(&mut self, clock: &mut MatchClock, now_ms: u64) -> u32 {
        if !clock.is_running() {
            self.anchor_ms = None;
            return 0;
        }

        let Some(anchor) = self.anchor_ms else {
            self.anchor_ms = Some(now_ms);
            return 0;
        };

        // A source that went backwards applies nothing.
        let ticks = now_ms.saturating_sub(anchor) / TICK_MS;
        let ticks = u32::try_from(ticks).unwrap_or(u32::MAX);
        for _ in 0..ticks {
            clock.tick();
        }
        self.anchor_ms = Some(anchor + u64::from(ticks) * TICK_MS);
        ticks
    }

    /// Re-anchor after a transition: armed at `now_ms` if the clock runs,
    /// disarmed otherwise.
    pub fn resync(&mut self, clock: &MatchClock, now_ms: u64) {
        self.anchor_ms = clock.is_running().then_some(now_ms);
    }

    /// Stop ticking. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        self.anchor_ms = None;
    }
}
