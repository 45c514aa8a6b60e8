//! Hide and minimize bookkeeping
//!
//! Two independent undo records:
//!
//! - the hidden set: windows put away by "Hide" or "Hide Others", restored
//!   together by "Show Recent"
//! - the last minimized window: the single window put away by "Minimize",
//!   restored by "Unminimize Recent"
//!
//! A window that becomes visible by any route must leave the hidden set in
//! the same step, so the set never names a window the user can see.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::activation::{raise_to_front, sort_by_recency};
use crate::facade::WindowSystem;
use crate::types::{AppId, WindowId, WorkspaceIndex};

/// Windows put away by the last hide operations
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HiddenSet {
    /// Insertion-ordered, no duplicates
    windows: Vec<WindowId>,
    /// Owner of a single-app hide. Not meaningful after "Hide Others".
    app: Option<AppId>,
}

impl HiddenSet {
    pub fn windows(&self) -> &[WindowId] {
        &self.windows
    }

    pub fn app(&self) -> Option<&AppId> {
        self.app.as_ref()
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Add a window unless already tracked. Returns whether it was added.
    fn insert(&mut self, id: WindowId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.windows.push(id);
        true
    }

    /// Drop every window matching `pred`, clearing the app once empty.
    fn remove_where(&mut self, mut pred: impl FnMut(WindowId) -> bool) -> usize {
        let before = self.windows.len();
        self.windows.retain(|id| !pred(*id));
        if self.windows.is_empty() {
            self.app = None;
        }
        before - self.windows.len()
    }

    fn clear(&mut self) {
        self.windows.clear();
        self.app = None;
    }
}

/// How a minimized window should be marked in the overview
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowMark {
    /// Put away by a hide operation
    Hidden,
    /// Minimized any other way
    Minimized,
}

/// Hidden set plus the last manually minimized window
#[derive(Clone, Debug, Default)]
pub struct VisibilityTracker {
    hidden: HiddenSet,
    last_minimized: Option<WindowId>,
}

impl VisibilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hidden(&self) -> &HiddenSet {
        &self.hidden
    }

    pub fn last_minimized(&self) -> Option<WindowId> {
        self.last_minimized
    }

    pub fn is_hidden(&self, id: WindowId) -> bool {
        self.hidden.contains(id)
    }

    // ========== Hide ==========

    /// Hide every window of `app` on `workspace`.
    ///
    /// Already minimized windows are tracked too so a later restore brings
    /// them back, but they are not minimized again. Returns how many
    /// windows were newly minimized.
    pub fn hide_app(
        &mut self,
        ws: &dyn WindowSystem,
        app: &AppId,
        workspace: WorkspaceIndex,
    ) -> usize {
        let mut minimized = 0;
        for id in ws.app_windows(app) {
            let Some(window) = ws.window(id) else {
                continue;
            };
            if !window.is_on(workspace) {
                continue;
            }
            self.hidden.insert(id);
            if !window.minimized {
                ws.minimize(id);
                minimized += 1;
            }
        }
        self.hidden.app = Some(app.clone());
        debug!(app = %app, minimized, tracked = self.hidden.windows.len(), "app hidden");
        minimized
    }

    /// Hide every window on `workspace` not owned by `focused`.
    ///
    /// The hidden app is left as it was. Returns how many windows were
    /// newly minimized.
    pub fn hide_others(
        &mut self,
        ws: &dyn WindowSystem,
        focused: &AppId,
        workspace: WorkspaceIndex,
    ) -> usize {
        let mut minimized = 0;
        for id in ws.tab_list(workspace) {
            let Some(window) = ws.window(id) else {
                continue;
            };
            if window.app.as_ref() == Some(focused) || !window.is_on(workspace) {
                continue;
            }
            self.hidden.insert(id);
            if !window.minimized {
                ws.minimize(id);
                minimized += 1;
            }
        }
        debug!(focused = %focused, minimized, tracked = self.hidden.windows.len(), "others hidden");
        minimized
    }

    // ========== Show ==========

    /// Restore the hidden windows still minimized on `workspace`.
    ///
    /// The hidden set is consumed whether or not anything was restored.
    /// Returns how many windows came back.
    pub fn show_most_recently_hidden(
        &mut self,
        ws: &dyn WindowSystem,
        workspace: WorkspaceIndex,
    ) -> usize {
        if self.hidden.is_empty() {
            return 0;
        }
        let restorable: Vec<WindowId> = ws
            .tab_list(workspace)
            .into_iter()
            .filter(|id| self.hidden.contains(*id))
            .filter(|id| {
                ws.window(*id)
                    .map(|w| w.minimized && w.is_on(workspace))
                    .unwrap_or(false)
            })
            .collect();
        self.hidden.clear();

        if restorable.is_empty() {
            debug!("nothing hidden left to show");
            return 0;
        }
        for id in &restorable {
            ws.unminimize(*id);
        }
        let mut ordered = restorable;
        sort_by_recency(ws, &mut ordered);
        raise_to_front(ws, &ordered);
        debug!(restored = ordered.len(), "hidden windows shown");
        ordered.len()
    }

    /// Restore every minimized window on `workspace` and forget all hide tracking.
    pub fn show_all(&mut self, ws: &dyn WindowSystem, workspace: WorkspaceIndex) -> usize {
        let mut minimized: Vec<WindowId> = ws
            .tab_list(workspace)
            .into_iter()
            .filter(|id| {
                ws.window(*id)
                    .map(|w| w.minimized && w.is_on(workspace))
                    .unwrap_or(false)
            })
            .collect();
        sort_by_recency(ws, &mut minimized);
        for id in &minimized {
            ws.unminimize(*id);
        }
        raise_to_front(ws, &minimized);
        self.hidden.clear();
        debug!(restored = minimized.len(), "all windows shown");
        minimized.len()
    }

    // ========== Minimize ==========

    /// Minimize a single window and remember it. Leaves the hidden set alone.
    pub fn minimize_window(&mut self, ws: &dyn WindowSystem, id: WindowId) {
        if let Some(previous) = self.last_minimized.replace(id) {
            trace!(window = %previous, "last minimized window overwritten");
        }
        ws.minimize(id);
        debug!(window = %id, "window minimized");
    }

    /// Bring back the last minimized window if it is still minimized on
    /// `workspace`. The record is consumed either way.
    pub fn unminimize_most_recently_minimized(
        &mut self,
        ws: &dyn WindowSystem,
        workspace: WorkspaceIndex,
    ) -> bool {
        let Some(id) = self.last_minimized.take() else {
            return false;
        };
        let restorable = ws
            .window(id)
            .map(|w| w.minimized && w.is_on(workspace))
            .unwrap_or(false);
        if !restorable {
            debug!(window = %id, "last minimized window no longer restorable");
            return false;
        }
        ws.unminimize(id);
        self.hidden.remove_where(|w| w == id);
        ws.activate(id, ws.current_time());
        debug!(window = %id, "window unminimized");
        true
    }

    // ========== External Changes ==========

    /// A window gained focus through any route.
    ///
    /// If its app has hidden windows on the same workspace, all of them are
    /// restored and forgotten, not just the focused one.
    pub fn on_external_focus(&mut self, ws: &dyn WindowSystem, focused: WindowId) {
        if self.hidden.is_empty() {
            return;
        }
        let Some(window) = ws.window(focused) else {
            return;
        };
        let (Some(app), Some(workspace)) = (window.app, window.workspace) else {
            return;
        };
        let app_windows: Vec<WindowId> = ws
            .app_windows(&app)
            .into_iter()
            .filter(|id| ws.window(*id).map(|w| w.is_on(workspace)).unwrap_or(false))
            .collect();
        if !app_windows.iter().any(|id| self.hidden.contains(*id)) {
            return;
        }
        for id in &app_windows {
            if self.hidden.contains(*id) && ws.window(*id).map(|w| w.minimized).unwrap_or(false) {
                ws.unminimize(*id);
            }
        }
        let removed = self.hidden.remove_where(|id| app_windows.contains(&id));
        debug!(app = %app, removed, "hidden app revealed externally");
    }

    /// A window was unminimized through any route.
    pub fn on_external_unminimize(&mut self, id: WindowId) {
        if self.hidden.remove_where(|w| w == id) > 0 {
            trace!(window = %id, "unminimized window left hidden set");
        }
        if self.last_minimized == Some(id) {
            self.last_minimized = None;
        }
    }

    /// The user activated a window directly.
    pub fn forget_window(&mut self, id: WindowId) {
        self.hidden.remove_where(|w| w == id);
    }

    /// The user activated an application; its windows are about to be visible.
    pub fn forget_app_windows(&mut self, ws: &dyn WindowSystem, app: &AppId) {
        let app_windows = ws.app_windows(app);
        self.hidden.remove_where(|id| app_windows.contains(&id));
    }

    /// Drop entries whose windows vanished or are no longer minimized.
    pub fn prune(&mut self, ws: &dyn WindowSystem) {
        let removed = self.hidden.remove_where(|id| {
            ws.window(id).map(|w| !w.minimized).unwrap_or(true)
        });
        if removed > 0 {
            trace!(removed, "pruned hidden set");
        }
        if let Some(id) = self.last_minimized {
            if ws.window(id).is_none() {
                self.last_minimized = None;
            }
        }
    }

    // ========== Queries ==========

    /// Overview mark for a window, `None` while it is visible.
    pub fn mark(&self, ws: &dyn WindowSystem, id: WindowId) -> Option<WindowMark> {
        let window = ws.window(id)?;
        if !window.minimized {
            return None;
        }
        if self.hidden.contains(id) {
            Some(WindowMark::Hidden)
        } else {
            Some(WindowMark::Minimized)
        }
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.hidden.clear();
        self.last_minimized = None;
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::facade::{MemoryWindowSystem, ShellEvent, WindowInfo};
    use proptest::prelude::*;

    #[derive(Clone, Debug)]
    enum Op {
        HideApp(u8),
        HideOthers(u8),
        ShowRecent,
        ShowAll,
        Minimize(u8),
        UnminimizeRecent,
        ExternalFocus(u8),
        ExternalUnminimize(u8),
        Close(u8),
    }

    const WINDOWS: u8 = 6;

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..3).prop_map(Op::HideApp),
            (0u8..3).prop_map(Op::HideOthers),
            Just(Op::ShowRecent),
            Just(Op::ShowAll),
            (0..WINDOWS).prop_map(Op::Minimize),
            Just(Op::UnminimizeRecent),
            (0..WINDOWS).prop_map(Op::ExternalFocus),
            (0..WINDOWS).prop_map(Op::ExternalUnminimize),
            (0..WINDOWS).prop_map(Op::Close),
        ]
    }

    /// Route queued events the way the indicator does
    fn deliver(tracker: &mut VisibilityTracker, ws: &MemoryWindowSystem) {
        for event in ws.drain_events() {
            match event {
                ShellEvent::WindowUnminimized { window } => tracker.on_external_unminimize(window),
                ShellEvent::TrackedWindowsChanged | ShellEvent::ActiveWorkspaceChanged => {
                    tracker.prune(ws)
                }
                _ => {}
            }
        }
    }

    proptest! {
        /// No visible window is ever left in the hidden set
        #[test]
        fn hidden_windows_stay_minimized(ops in prop::collection::vec(op(), 1..40)) {
            let ws = MemoryWindowSystem::new(2);
            for n in 0..WINDOWS {
                let app = format!("app{}", n % 3);
                ws.add_window(WindowInfo::normal(WindowId(n as u64), app.as_str(), (n % 2) as usize));
            }
            ws.drain_events();
            let mut tracker = VisibilityTracker::new();

            for op in ops {
                let workspace = ws.active_workspace();
                match op {
                    Op::HideApp(n) => {
                        tracker.hide_app(&ws, &AppId::new(format!("app{}", n)), workspace);
                    }
                    Op::HideOthers(n) => {
                        tracker.hide_others(&ws, &AppId::new(format!("app{}", n)), workspace);
                    }
                    Op::ShowRecent => {
                        tracker.show_most_recently_hidden(&ws, workspace);
                    }
                    Op::ShowAll => {
                        tracker.show_all(&ws, workspace);
                    }
                    Op::Minimize(n) => tracker.minimize_window(&ws, WindowId(n as u64)),
                    Op::UnminimizeRecent => {
                        tracker.unminimize_most_recently_minimized(&ws, workspace);
                    }
                    Op::ExternalFocus(n) => {
                        ws.user_focus(WindowId(n as u64));
                        if let Some(focused) = ws.focus_window() {
                            tracker.on_external_focus(&ws, focused);
                        }
                    }
                    Op::ExternalUnminimize(n) => ws.unminimize(WindowId(n as u64)),
                    Op::Close(n) => ws.remove_window(WindowId(n as u64)),
                }
                deliver(&mut tracker, &ws);

                for id in tracker.hidden().windows() {
                    prop_assert!(ws.is_minimized(*id), "{} visible but hidden", id);
                }
            }
        }
    }
}
