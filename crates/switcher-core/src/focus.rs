//! Focus tracking with launch-gap bridging
//!
//! When one app closes its window and another is still starting, the shell
//! briefly reports no focus at all. While a launch is pending the tracker
//! keeps reporting the last known app so the panel does not blink to
//! "Desktop" in between.

use tracing::{debug, trace};

use crate::config::Timings;
use crate::schedule::{TimerPurpose, Timers};
use crate::types::{AppId, Millis};

/// Current, last known and pending application
#[derive(Clone, Debug, Default)]
pub struct FocusTracker {
    current_app: Option<AppId>,
    last_known_app: Option<AppId>,
    pending_app: Option<AppId>,
}

impl FocusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the app to display given the app owning the focused window.
    ///
    /// `focused` must already be `None` for windows or apps that no longer
    /// exist.
    pub fn on_focus_changed(
        &mut self,
        focused: Option<&AppId>,
        timers: &mut Timers,
    ) -> Option<AppId> {
        let resolved = match focused {
            Some(app) => {
                self.last_known_app = Some(app.clone());
                if self.pending_app.as_ref() == Some(app) {
                    trace!(app = %app, "pending app arrived");
                    self.pending_app = None;
                    timers.cancel(TimerPurpose::PendingApp);
                }
                Some(app.clone())
            }
            None if self.pending_app.is_some() && self.last_known_app.is_some() => {
                trace!("bridging launch gap with last known app");
                self.last_known_app.clone()
            }
            None => {
                self.last_known_app = None;
                self.pending_app = None;
                timers.cancel(TimerPurpose::PendingApp);
                None
            }
        };
        self.current_app = resolved.clone();
        resolved
    }

    /// An application began launching; hold the last app until it shows up.
    pub fn on_app_launch_started(
        &mut self,
        app: AppId,
        timers: &mut Timers,
        now: Millis,
        timings: &Timings,
    ) {
        debug!(app = %app, "app launch started");
        self.pending_app = Some(app);
        timers.arm(TimerPurpose::PendingApp, now, timings.pending_app_timeout);
    }

    /// The launch safety net fired.
    pub fn on_pending_expired(&mut self) {
        if let Some(app) = self.pending_app.take() {
            debug!(app = %app, "pending app expired");
        }
    }

    /// App resolved by the most recent [`on_focus_changed`](Self::on_focus_changed)
    pub fn current_app(&self) -> Option<&AppId> {
        self.current_app.as_ref()
    }

    pub fn last_known_app(&self) -> Option<&AppId> {
        self.last_known_app.as_ref()
    }

    pub fn pending_app(&self) -> Option<&AppId> {
        self.pending_app.as_ref()
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.current_app = None;
        self.last_known_app = None;
        self.pending_app = None;
    }
}
