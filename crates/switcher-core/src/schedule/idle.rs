//! Idle display state machine
//!
//! Only active while nothing is focused and the active workspace has no
//! applications at all. The user can click the indicator to flip between
//! two displays; a timer flips it back.
//!
//! | Context  | Default           | Toggle partner   |
//! |----------|-------------------|------------------|
//! | Desktop  | `Desktop`         | `WorkspaceNumber`|
//! | Overview | `WorkspaceNumber` | `NoApplications` |

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::Timings;
use crate::schedule::timers::{TimerPurpose, Timers};
use crate::types::Millis;

/// What the panel shows while idle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdleMode {
    Desktop,
    WorkspaceNumber,
    NoApplications,
}

impl IdleMode {
    /// Mode shown when idle is entered in the given context
    pub fn default_for(in_overview: bool) -> Self {
        if in_overview {
            IdleMode::WorkspaceNumber
        } else {
            IdleMode::Desktop
        }
    }

    /// Mode a manual toggle moves to
    pub fn toggled(self, in_overview: bool) -> Self {
        match (in_overview, self) {
            (true, IdleMode::NoApplications) => IdleMode::WorkspaceNumber,
            (true, _) => IdleMode::NoApplications,
            (false, IdleMode::Desktop) => IdleMode::WorkspaceNumber,
            (false, _) => IdleMode::Desktop,
        }
    }
}

/// Idle display state
#[derive(Clone, Debug)]
pub struct IdleDisplay {
    mode: IdleMode,
    active: bool,
}

impl Default for IdleDisplay {
    fn default() -> Self {
        Self {
            mode: IdleMode::Desktop,
            active: false,
        }
    }
}

impl IdleDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode. Only meaningful while [`is_active`](Self::is_active).
    pub fn mode(&self) -> IdleMode {
        self.mode
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enter the idle state. A no-op if already idle, so a pending toggle
    /// survives unrelated refreshes.
    pub fn enter(&mut self, in_overview: bool) -> IdleMode {
        if !self.active {
            self.active = true;
            self.mode = IdleMode::default_for(in_overview);
            trace!(mode = ?self.mode, "idle display entered");
        }
        self.mode
    }

    /// Leave the idle state and drop any pending revert.
    pub fn leave(&mut self, timers: &mut Timers) {
        if self.active {
            self.active = false;
            timers.cancel(TimerPurpose::IdleRevert);
            trace!("idle display left");
        }
    }

    /// Overview context changed: drop the pending revert and restart from the default.
    pub fn reset(&mut self, in_overview: bool, timers: &mut Timers) {
        timers.cancel(TimerPurpose::IdleRevert);
        self.mode = IdleMode::default_for(in_overview);
    }

    /// Manual toggle. In the overview every toggle restarts the
    /// auto-revert; on the desktop only the non-default mode reverts.
    pub fn toggle(
        &mut self,
        in_overview: bool,
        timers: &mut Timers,
        now: Millis,
        timings: &Timings,
    ) -> IdleMode {
        self.mode = self.mode.toggled(in_overview);
        if in_overview || self.mode != IdleMode::default_for(in_overview) {
            timers.arm(TimerPurpose::IdleRevert, now, timings.idle_revert);
        } else {
            timers.cancel(TimerPurpose::IdleRevert);
        }
        trace!(mode = ?self.mode, in_overview, "idle display toggled");
        self.mode
    }

    /// Auto-revert fired: return to the default for the current context.
    pub fn revert(&mut self, in_overview: bool) -> IdleMode {
        self.mode = IdleMode::default_for(in_overview);
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_defaults() {
        let mut timers = Timers::new();
        let mut idle = IdleDisplay::new();
        assert_eq!(idle.enter(false), IdleMode::Desktop);
        idle.leave(&mut timers);
        assert_eq!(idle.enter(true), IdleMode::WorkspaceNumber);
    }

    #[test]
    fn test_enter_keeps_toggled_mode() {
        let mut timers = Timers::new();
        let mut idle = IdleDisplay::new();
        idle.enter(false);
        idle.toggle(false, &mut timers, 0, &Timings::default());

        assert_eq!(idle.enter(false), IdleMode::WorkspaceNumber);
    }

    #[test]
    fn test_toggle_outside_overview() {
        let timings = Timings::default();
        let mut timers = Timers::new();
        let mut idle = IdleDisplay::new();
        idle.enter(false);

        assert_eq!(
            idle.toggle(false, &mut timers, 0, &timings),
            IdleMode::WorkspaceNumber
        );
        assert_eq!(timers.deadline(TimerPurpose::IdleRevert), Some(3000));

        // Toggling back to the default drops the revert
        assert_eq!(idle.toggle(false, &mut timers, 500, &timings), IdleMode::Desktop);
        assert!(!timers.is_armed(TimerPurpose::IdleRevert));
    }

    #[test]
    fn test_toggle_inside_overview() {
        let timings = Timings::default();
        let mut timers = Timers::new();
        let mut idle = IdleDisplay::new();
        idle.enter(true);

        assert_eq!(
            idle.toggle(true, &mut timers, 0, &timings),
            IdleMode::NoApplications
        );
        assert!(timers.is_armed(TimerPurpose::IdleRevert));
        assert_eq!(idle.revert(true), IdleMode::WorkspaceNumber);
    }

    #[test]
    fn test_second_toggle_rearms() {
        let timings = Timings::default();
        let mut timers = Timers::new();
        let mut idle = IdleDisplay::new();
        idle.enter(true);

        idle.toggle(true, &mut timers, 0, &timings);
        idle.toggle(true, &mut timers, 1000, &timings);
        idle.toggle(true, &mut timers, 2000, &timings);

        assert_eq!(idle.mode(), IdleMode::NoApplications);
        assert_eq!(timers.deadline(TimerPurpose::IdleRevert), Some(5000));

        // Back on the default, a revert is still pending
        idle.toggle(true, &mut timers, 2500, &timings);
        assert_eq!(idle.mode(), IdleMode::WorkspaceNumber);
        assert_eq!(timers.deadline(TimerPurpose::IdleRevert), Some(5500));
    }

    #[test]
    fn test_reset_and_leave_cancel_revert() {
        let timings = Timings::default();
        let mut timers = Timers::new();
        let mut idle = IdleDisplay::new();
        idle.enter(false);
        idle.toggle(false, &mut timers, 0, &timings);

        idle.reset(true, &mut timers);
        assert_eq!(idle.mode(), IdleMode::WorkspaceNumber);
        assert!(!timers.is_armed(TimerPurpose::IdleRevert));

        idle.toggle(true, &mut timers, 0, &timings);
        idle.leave(&mut timers);
        assert!(!idle.is_active());
        assert!(!timers.is_armed(TimerPurpose::IdleRevert));
    }
}
