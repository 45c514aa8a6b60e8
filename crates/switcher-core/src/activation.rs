//! Activation ordering
//!
//! The shell's activate call puts exactly one window on top of the stack
//! and focuses it. To restore several windows in their original order the
//! engine activates them oldest first, so the most recent one is activated
//! last and ends up both frontmost and focused.

use tracing::trace;

use crate::facade::WindowSystem;
use crate::types::{AppId, WindowId, WorkspaceIndex};

/// What [`activate_windows`] did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    /// No window resolved
    Nothing,
    /// Minimized windows were restored and raised
    Restored(usize),
    /// Several visible windows were raised
    Raised(usize),
    /// A single visible window was activated directly
    Focused(WindowId),
}

/// Raise windows given newest first so the newest ends on top.
///
/// Every call shares one timestamp. Windows that disappear mid-sequence
/// are skipped.
pub fn raise_to_front(ws: &dyn WindowSystem, newest_first: &[WindowId]) {
    if newest_first.is_empty() {
        return;
    }
    let time = ws.current_time();
    for id in newest_first.iter().rev() {
        if ws.window(*id).is_none() {
            trace!(window = %id, "skipping vanished window");
            continue;
        }
        ws.activate(*id, time);
    }
}

/// Restore or raise a target's windows, given newest first.
pub fn activate_windows(ws: &dyn WindowSystem, newest_first: &[WindowId]) -> Activation {
    let windows: Vec<_> = newest_first
        .iter()
        .filter_map(|id| ws.window(*id))
        .collect();
    if windows.is_empty() {
        return Activation::Nothing;
    }

    let (minimized, visible): (Vec<_>, Vec<_>) = windows.iter().partition(|w| w.minimized);
    let minimized: Vec<WindowId> = minimized.iter().map(|w| w.id).collect();
    let visible: Vec<WindowId> = visible.iter().map(|w| w.id).collect();

    if !minimized.is_empty() {
        for id in &minimized {
            ws.unminimize(*id);
        }
        raise_to_front(ws, &minimized);
        Activation::Restored(minimized.len())
    } else if visible.len() > 1 {
        raise_to_front(ws, &visible);
        Activation::Raised(visible.len())
    } else {
        let id = windows[0].id;
        ws.activate(id, ws.current_time());
        Activation::Focused(id)
    }
}

/// Sort windows by last interaction, most recent first.
///
/// The sort is stable, so ties keep their stacking order.
pub fn sort_by_recency(ws: &dyn WindowSystem, windows: &mut Vec<WindowId>) {
    let mut stamped: Vec<(WindowId, u32)> = windows
        .iter()
        .filter_map(|id| ws.window(*id).map(|w| (*id, w.user_time)))
        .collect();
    stamped.sort_by(|a, b| b.1.cmp(&a.1));
    *windows = stamped.into_iter().map(|(id, _)| id).collect();
}

/// An application's windows on a workspace, most recent first.
pub fn app_windows_by_recency(
    ws: &dyn WindowSystem,
    app: &AppId,
    workspace: WorkspaceIndex,
) -> Vec<WindowId> {
    let mut windows: Vec<WindowId> = ws
        .tab_list(workspace)
        .into_iter()
        .filter(|id| {
            ws.window(*id)
                .map(|w| w.app.as_ref() == Some(app) && w.is_on(workspace))
                .unwrap_or(false)
        })
        .collect();
    sort_by_recency(ws, &mut windows);
    windows
}
