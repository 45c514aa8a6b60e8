//! One-shot timers keyed by purpose
//!
//! There is at most one live timer per [`TimerPurpose`]. Arming a purpose
//! that is already armed replaces the old deadline, which is what gives the
//! update timer its trailing-edge debounce.

use std::collections::BTreeMap;

use tracing::trace;

use crate::types::Millis;

/// What a timer is for
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimerPurpose {
    /// Debounced display refresh
    Update,
    /// Launch safety net for the pending application
    PendingApp,
    /// Idle display auto-revert
    IdleRevert,
}

/// Deadline table for the indicator's timers
#[derive(Clone, Debug, Default)]
pub struct Timers {
    armed: BTreeMap<TimerPurpose, Millis>,
}

impl Timers {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `purpose` to fire `delay` after `now`, cancelling any earlier instance.
    pub fn arm(&mut self, purpose: TimerPurpose, now: Millis, delay: Millis) -> Millis {
        let deadline = now.saturating_add(delay);
        if let Some(previous) = self.armed.insert(purpose, deadline) {
            trace!(?purpose, previous, deadline, "timer re-armed");
        } else {
            trace!(?purpose, deadline, "timer armed");
        }
        deadline
    }

    /// Cancel `purpose`. Returns whether it was armed.
    pub fn cancel(&mut self, purpose: TimerPurpose) -> bool {
        let cancelled = self.armed.remove(&purpose).is_some();
        if cancelled {
            trace!(?purpose, "timer cancelled");
        }
        cancelled
    }

    /// Whether `purpose` is armed
    pub fn is_armed(&self, purpose: TimerPurpose) -> bool {
        self.armed.contains_key(&purpose)
    }

    /// Deadline of `purpose`, if armed
    pub fn deadline(&self, purpose: TimerPurpose) -> Option<Millis> {
        self.armed.get(&purpose).copied()
    }

    /// Earliest deadline across all purposes
    pub fn next_deadline(&self) -> Option<Millis> {
        self.armed.values().copied().min()
    }

    /// Remove and return the earliest timer due at `now`.
    ///
    /// Ties go to the purpose declared first. The returned deadline is the
    /// time the timer was due, which callers use as its firing time.
    pub fn pop_due(&mut self, now: Millis) -> Option<(TimerPurpose, Millis)> {
        let (purpose, deadline) = self
            .armed
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .min_by_key(|(purpose, deadline)| (**deadline, **purpose))
            .map(|(purpose, deadline)| (*purpose, *deadline))?;
        self.armed.remove(&purpose);
        trace!(?purpose, deadline, now, "timer fired");
        Some((purpose, deadline))
    }

    /// Cancel everything
    pub fn clear(&mut self) {
        if !self.armed.is_empty() {
            trace!(count = self.armed.len(), "all timers cancelled");
        }
        self.armed.clear();
    }

    /// Whether nothing is armed
    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }
}
