//! Window system facade
//!
//! The boundary to the host desktop shell. Everything the core knows about
//! windows, applications and workspaces comes through [`WindowSystem`], and
//! every change it makes goes back through it.
//!
//! Calls on ids that no longer resolve are no-ops on the host side. Events
//! produced by the host are delivered separately through
//! [`Indicator::handle_event`](crate::Indicator::handle_event) and always
//! arrive after the call that caused them has returned.

mod memory;
mod window;

pub use memory::{FacadeCall, MemoryWindowSystem};
pub use window::{AppInfo, WindowInfo, WindowType};

use serde::{Deserialize, Serialize};

use crate::error::SwitcherResult;
use crate::types::{AppId, Timestamp, WindowId, WorkspaceIndex};

/// Host window system interface.
pub trait WindowSystem {
    // ========== Queries ==========

    /// Currently focused window.
    fn focus_window(&self) -> Option<WindowId>;

    /// Index of the active workspace.
    fn active_workspace(&self) -> WorkspaceIndex;

    /// Number of workspaces.
    fn workspace_count(&self) -> usize;

    /// Windows on a workspace, most recently used first.
    fn tab_list(&self, workspace: WorkspaceIndex) -> Vec<WindowId>;

    /// Snapshot of a window, `None` once it is gone.
    fn window(&self, id: WindowId) -> Option<WindowInfo>;

    /// Snapshot of an application, `None` once it is gone.
    fn app(&self, id: &AppId) -> Option<AppInfo>;

    /// Every window owned by an application, across all workspaces.
    fn app_windows(&self, id: &AppId) -> Vec<WindowId>;

    /// Whether the overview (activities) is showing.
    fn is_overview_visible(&self) -> bool;

    /// Monotonic host time token for activation requests.
    fn current_time(&self) -> Timestamp;

    /// Application owning the focused window.
    fn focus_app(&self) -> Option<AppId> {
        let window = self.window(self.focus_window()?)?;
        let app = window.app?;
        self.app(&app).map(|info| info.id)
    }

    // ========== Window Actions ==========

    /// Minimize a window.
    fn minimize(&self, id: WindowId);

    /// Unminimize a window.
    fn unminimize(&self, id: WindowId);

    /// Raise a window to the top of the stack and focus it.
    fn activate(&self, id: WindowId, time: Timestamp);

    /// Move a window to another workspace.
    fn change_workspace(&self, id: WindowId, workspace: WorkspaceIndex);

    /// Ask a window to close.
    fn delete(&self, id: WindowId, time: Timestamp);

    // ========== Application Actions ==========

    /// Ask an application to quit gracefully.
    fn request_quit(&self, id: &AppId);

    /// Open a new window of an application.
    fn open_new_window(&self, id: &AppId);

    // ========== Workspace Actions ==========

    /// Switch the active workspace.
    fn activate_workspace(&self, workspace: WorkspaceIndex, time: Timestamp);

    // ========== Subscriptions ==========

    /// Subscribe to a host signal.
    fn connect(&self, signal: ShellSignal) -> SwitcherResult<SignalHandle>;

    /// Drop a subscription. Unknown handles are ignored.
    fn disconnect(&self, handle: SignalHandle);

    /// Register a global keybinding by settings key.
    fn add_keybinding(&self, name: &str) -> SwitcherResult<()>;

    /// Remove a keybinding registered earlier.
    fn remove_keybinding(&self, name: &str);
}

/// Signals the indicator subscribes to
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShellSignal {
    FocusWindowChanged,
    ActiveWorkspaceChanged,
    TrackedWindowsChanged,
    AppStateChanged,
    OverviewShowing,
    OverviewHidden,
    WindowMinimized,
    WindowUnminimized,
}

impl ShellSignal {
    /// Every signal, in connection order
    pub const ALL: [ShellSignal; 8] = [
        ShellSignal::FocusWindowChanged,
        ShellSignal::ActiveWorkspaceChanged,
        ShellSignal::TrackedWindowsChanged,
        ShellSignal::AppStateChanged,
        ShellSignal::OverviewShowing,
        ShellSignal::OverviewHidden,
        ShellSignal::WindowMinimized,
        ShellSignal::WindowUnminimized,
    ];

    /// Host-side signal name
    pub fn name(self) -> &'static str {
        match self {
            ShellSignal::FocusWindowChanged => "focus-window-changed",
            ShellSignal::ActiveWorkspaceChanged => "active-workspace-changed",
            ShellSignal::TrackedWindowsChanged => "tracked-windows-changed",
            ShellSignal::AppStateChanged => "app-state-changed",
            ShellSignal::OverviewShowing => "overview-showing",
            ShellSignal::OverviewHidden => "overview-hidden",
            ShellSignal::WindowMinimized => "window-minimized",
            ShellSignal::WindowUnminimized => "window-unminimized",
        }
    }
}

/// Disposable subscription handle returned by [`WindowSystem::connect`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalHandle(pub u64);

/// Application run state carried by app-state-changed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppState {
    Stopped,
    Starting,
    Running,
}

/// An event delivered by the host
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ShellEvent {
    FocusWindowChanged,
    ActiveWorkspaceChanged,
    TrackedWindowsChanged,
    AppStateChanged { app: AppId, state: AppState },
    OverviewShowing,
    OverviewHidden,
    WindowMinimized { window: WindowId },
    WindowUnminimized { window: WindowId },
}

impl ShellEvent {
    /// Signal this event is delivered on
    pub fn signal(&self) -> ShellSignal {
        match self {
            ShellEvent::FocusWindowChanged => ShellSignal::FocusWindowChanged,
            ShellEvent::ActiveWorkspaceChanged => ShellSignal::ActiveWorkspaceChanged,
            ShellEvent::TrackedWindowsChanged => ShellSignal::TrackedWindowsChanged,
            ShellEvent::AppStateChanged { .. } => ShellSignal::AppStateChanged,
            ShellEvent::OverviewShowing => ShellSignal::OverviewShowing,
            ShellEvent::OverviewHidden => ShellSignal::OverviewHidden,
            ShellEvent::WindowMinimized { .. } => ShellSignal::WindowMinimized,
            ShellEvent::WindowUnminimized { .. } => ShellSignal::WindowUnminimized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_names_unique() {
        let mut names: Vec<&str> = ShellSignal::ALL.iter().map(|s| s.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ShellSignal::ALL.len());
    }

    #[test]
    fn test_event_signal_mapping() {
        let event = ShellEvent::WindowMinimized {
            window: WindowId(3),
        };
        assert_eq!(event.signal(), ShellSignal::WindowMinimized);
        assert_eq!(
            ShellEvent::OverviewHidden.signal(),
            ShellSignal::OverviewHidden
        );
    }

    #[test]
    fn test_event_json_shape() {
        let event: ShellEvent = serde_json::from_str(
            r#"{"event": "app-state-changed", "app": "org.gnome.Maps.desktop", "state": "starting"}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            ShellEvent::AppStateChanged {
                app: AppId::new("org.gnome.Maps.desktop"),
                state: AppState::Starting,
            }
        );
    }
}
