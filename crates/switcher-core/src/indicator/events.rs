//! Host events and timers

use tracing::{debug, trace};

use super::Indicator;
use crate::facade::{AppState, ShellEvent, WindowSystem};
use crate::schedule::TimerPurpose;
use crate::surface::PanelSurface;
use crate::types::Millis;

impl<W: WindowSystem, S: PanelSurface> Indicator<W, S> {
    /// Route one host event.
    pub fn handle_event(&mut self, event: ShellEvent, now: Millis) {
        if self.torn_down {
            trace!(signal = event.signal().name(), "event after teardown");
            return;
        }
        trace!(signal = event.signal().name(), "event");
        match event {
            ShellEvent::FocusWindowChanged => {
                if let Some(window) = self.ws.focus_window() {
                    self.visibility.on_external_focus(&self.ws, window);
                }
                self.schedule_update(now);
            }
            ShellEvent::ActiveWorkspaceChanged | ShellEvent::TrackedWindowsChanged => {
                self.visibility.prune(&self.ws);
                self.schedule_update(now);
            }
            ShellEvent::AppStateChanged {
                app,
                state: AppState::Starting,
            } => {
                self.focus
                    .on_app_launch_started(app, &mut self.timers, now, &self.timings);
                self.schedule_update(now);
            }
            ShellEvent::AppStateChanged { .. } => {}
            ShellEvent::OverviewShowing => self.on_overview_changed(true),
            ShellEvent::OverviewHidden => self.on_overview_changed(false),
            ShellEvent::WindowMinimized { .. } => self.schedule_update(now),
            ShellEvent::WindowUnminimized { window } => {
                self.visibility.on_external_unminimize(window);
                self.schedule_update(now);
            }
        }
    }

    fn on_overview_changed(&mut self, visible: bool) {
        self.idle.reset(visible, &mut self.timers);
        self.recompute(false);
    }

    /// Fire every timer due at `now`, in deadline order.
    ///
    /// Each timer runs at its own deadline, so a late tick behaves like a
    /// punctual one.
    pub fn tick(&mut self, now: Millis) {
        if self.torn_down {
            return;
        }
        while let Some((purpose, at)) = self.timers.pop_due(now) {
            match purpose {
                TimerPurpose::Update => self.recompute(false),
                TimerPurpose::PendingApp => {
                    self.focus.on_pending_expired();
                    self.schedule_update(at);
                }
                TimerPurpose::IdleRevert => {
                    let mode = self.idle.revert(self.ws.is_overview_visible());
                    debug!(?mode, "idle display reverted");
                    self.recompute(true);
                }
            }
        }
    }
}
