//! Workspace placement
//!
//! "Move" relocates and follows the window to its new workspace. "Send"
//! relocates without switching and tells the user where it went.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SwitcherError, SwitcherResult};
use crate::facade::WindowSystem;
use crate::types::{AppId, WindowId, WorkspaceIndex};

/// Which workspace-menu gesture was used
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkspaceGesture {
    /// Plain activation: move, then switch
    #[default]
    Move,
    /// Activation with the modifier held: move only, then notify
    Send,
}

impl WorkspaceGesture {
    /// Gesture for a menu activation, given whether the modifier key was held
    pub fn from_modifier(held: bool) -> Self {
        if held {
            WorkspaceGesture::Send
        } else {
            WorkspaceGesture::Move
        }
    }

    /// Whether the active workspace follows the moved windows
    pub fn switches(self) -> bool {
        self == WorkspaceGesture::Move
    }

    /// Submenu heading for this gesture
    pub fn menu_label(self) -> &'static str {
        match self {
            WorkspaceGesture::Move => "Move to Workspace",
            WorkspaceGesture::Send => "Send to Workspace",
        }
    }
}

/// A user-visible notification
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
}

impl Notice {
    /// Notice for a window sent to `target`
    pub fn window_sent(title: &str, target: WorkspaceIndex) -> Self {
        let title = if title.is_empty() { "Window" } else { title };
        Self {
            title: "Window Moved".to_string(),
            body: format!("{} Sent to Workspace {}", title, target + 1),
        }
    }

    /// Notice for an application sent to `target`
    pub fn app_sent(name: &str, target: WorkspaceIndex) -> Self {
        Self {
            title: "Application Moved".to_string(),
            body: format!("{} Sent to Workspace {}", name, target + 1),
        }
    }
}

/// Fail unless `target` names an existing workspace.
pub fn check_target(ws: &dyn WindowSystem, target: WorkspaceIndex) -> SwitcherResult<()> {
    let count = ws.workspace_count();
    if target >= count {
        return Err(SwitcherError::WorkspaceOutOfRange {
            index: target,
            count,
        });
    }
    Ok(())
}

/// Move one window to `target`, optionally switching there afterwards.
pub fn move_window(
    ws: &dyn WindowSystem,
    window: WindowId,
    target: WorkspaceIndex,
    switch_after: bool,
) -> SwitcherResult<()> {
    check_target(ws, target)?;
    if ws.window(window).is_none() {
        return Err(SwitcherError::WindowNotFound(window));
    }
    ws.change_workspace(window, target);
    if switch_after {
        ws.activate_workspace(target, ws.current_time());
    }
    debug!(window = %window, target, switch_after, "window moved");
    Ok(())
}

/// Move every normal window of `app` to `target`. Returns how many moved.
pub fn move_app(
    ws: &dyn WindowSystem,
    app: &AppId,
    target: WorkspaceIndex,
    switch_after: bool,
) -> SwitcherResult<usize> {
    check_target(ws, target)?;
    let mut moved = 0;
    for id in ws.app_windows(app) {
        if ws.window(id).map(|w| w.is_normal()).unwrap_or(false) {
            ws.change_workspace(id, target);
            moved += 1;
        }
    }
    if switch_after {
        ws.activate_workspace(target, ws.current_time());
    }
    debug!(app = %app, target, moved, switch_after, "app moved");
    Ok(moved)
}
