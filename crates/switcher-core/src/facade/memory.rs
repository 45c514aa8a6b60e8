//! In-memory window system for testing.
//!
//! Keeps a flat window table plus a stacking order and applies every
//! facade call synchronously. Calls are recorded in order so tests can
//! assert exact sequences, and the events a real shell would emit are
//! queued for the caller to deliver with [`MemoryWindowSystem::drain_events`].

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};

use crate::error::{SwitcherError, SwitcherResult};
use crate::facade::{
    AppInfo, AppState, ShellEvent, ShellSignal, SignalHandle, WindowInfo, WindowSystem,
};
use crate::types::{AppId, Timestamp, WindowId, WorkspaceIndex};

/// A facade call as issued by the core
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FacadeCall {
    Minimize(WindowId),
    Unminimize(WindowId),
    Activate(WindowId, Timestamp),
    ChangeWorkspace(WindowId, WorkspaceIndex),
    Delete(WindowId, Timestamp),
    RequestQuit(AppId),
    OpenNewWindow(AppId),
    ActivateWorkspace(WorkspaceIndex, Timestamp),
    Connect(ShellSignal),
    Disconnect(SignalHandle),
    AddKeybinding(String),
    RemoveKeybinding(String),
}

/// In-memory window system for testing.
pub struct MemoryWindowSystem {
    /// Window table
    windows: RefCell<BTreeMap<WindowId, WindowInfo>>,
    /// Stacking order, topmost first
    stack: RefCell<Vec<WindowId>>,
    /// Application table
    apps: RefCell<BTreeMap<AppId, AppInfo>>,
    focus: Cell<Option<WindowId>>,
    active_workspace: Cell<WorkspaceIndex>,
    workspace_count: Cell<usize>,
    overview: Cell<bool>,
    /// Host time token generator
    clock: Cell<Timestamp>,
    /// Interaction counter stamped into `user_time` on activation
    user_clock: Cell<u32>,
    calls: RefCell<Vec<FacadeCall>>,
    events: RefCell<VecDeque<ShellEvent>>,
    next_handle: Cell<u64>,
    handles: RefCell<BTreeMap<SignalHandle, ShellSignal>>,
    keybindings: RefCell<Vec<String>>,
    refused_signals: RefCell<Vec<ShellSignal>>,
    refused_keybindings: RefCell<Vec<String>>,
}

impl Default for MemoryWindowSystem {
    fn default() -> Self {
        Self::new(1)
    }
}

impl MemoryWindowSystem {
    /// Create an empty window system with `workspace_count` workspaces.
    pub fn new(workspace_count: usize) -> Self {
        Self {
            windows: RefCell::new(BTreeMap::new()),
            stack: RefCell::new(Vec::new()),
            apps: RefCell::new(BTreeMap::new()),
            focus: Cell::new(None),
            active_workspace: Cell::new(0),
            workspace_count: Cell::new(workspace_count.max(1)),
            overview: Cell::new(false),
            clock: Cell::new(1000),
            user_clock: Cell::new(1),
            calls: RefCell::new(Vec::new()),
            events: RefCell::new(VecDeque::new()),
            next_handle: Cell::new(1),
            handles: RefCell::new(BTreeMap::new()),
            keybindings: RefCell::new(Vec::new()),
            refused_signals: RefCell::new(Vec::new()),
            refused_keybindings: RefCell::new(Vec::new()),
        }
    }

    // ========== Scenario Setup ==========

    /// Register an application.
    pub fn add_app(&self, app: AppInfo) {
        self.apps.borrow_mut().insert(app.id.clone(), app);
    }

    /// Add a window on top of the stack.
    ///
    /// A zero `user_time` is replaced with the next interaction stamp so
    /// later windows always count as more recent.
    pub fn add_window(&self, mut window: WindowInfo) {
        if window.user_time == 0 {
            window.user_time = self.next_user_time();
        } else {
            self.user_clock
                .set(self.user_clock.get().max(window.user_time.saturating_add(1)));
        }
        let id = window.id;
        self.windows.borrow_mut().insert(id, window);
        let mut stack = self.stack.borrow_mut();
        stack.retain(|w| *w != id);
        stack.insert(0, id);
        drop(stack);
        self.push_event(ShellEvent::TrackedWindowsChanged);
    }

    /// Remove a window as if it had been destroyed.
    pub fn remove_window(&self, id: WindowId) {
        if self.windows.borrow_mut().remove(&id).is_none() {
            return;
        }
        self.stack.borrow_mut().retain(|w| *w != id);
        self.push_event(ShellEvent::TrackedWindowsChanged);
        if self.focus.get() == Some(id) {
            self.refocus();
        }
    }

    /// Remove an application record without touching its windows.
    pub fn remove_app(&self, id: &AppId) {
        self.apps.borrow_mut().remove(id);
    }

    /// Focus a window the way a user click elsewhere in the shell would.
    pub fn user_focus(&self, id: WindowId) {
        let Some(workspace) = self.windows.borrow().get(&id).map(|w| w.workspace) else {
            return;
        };
        if let Some(ws) = workspace {
            self.switch_workspace(ws);
        }
        self.bring_forward(id);
    }

    /// Drop focus entirely, as when clicking the desktop background.
    pub fn clear_focus(&self) {
        if self.focus.replace(None).is_some() {
            self.push_event(ShellEvent::FocusWindowChanged);
        }
    }

    /// Show or hide the overview.
    pub fn set_overview(&self, visible: bool) {
        if self.overview.replace(visible) != visible {
            self.push_event(if visible {
                ShellEvent::OverviewShowing
            } else {
                ShellEvent::OverviewHidden
            });
        }
    }

    /// Switch workspace as the user would.
    pub fn set_active_workspace(&self, workspace: WorkspaceIndex) {
        self.switch_workspace(workspace);
    }

    /// Change the number of workspaces.
    pub fn set_workspace_count(&self, count: usize) {
        self.workspace_count.set(count.max(1));
        if self.active_workspace.get() >= self.workspace_count.get() {
            self.switch_workspace(self.workspace_count.get() - 1);
        }
    }

    /// Emit an application launch notification.
    pub fn start_app(&self, id: &AppId) {
        self.push_event(ShellEvent::AppStateChanged {
            app: id.clone(),
            state: AppState::Starting,
        });
    }

    /// Make the next [`WindowSystem::connect`] for `signal` fail.
    pub fn refuse_signal(&self, signal: ShellSignal) {
        self.refused_signals.borrow_mut().push(signal);
    }

    /// Make [`WindowSystem::add_keybinding`] fail for `name`.
    pub fn refuse_keybinding(&self, name: &str) {
        self.refused_keybindings.borrow_mut().push(name.to_string());
    }

    // ========== Inspection ==========

    /// Every recorded facade call, oldest first.
    pub fn calls(&self) -> Vec<FacadeCall> {
        self.calls.borrow().clone()
    }

    /// Forget recorded calls.
    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Windows passed to [`WindowSystem::activate`], in call order.
    pub fn activations(&self) -> Vec<WindowId> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                FacadeCall::Activate(id, _) => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&self) -> Vec<ShellEvent> {
        self.events.borrow_mut().drain(..).collect()
    }

    /// Full stacking order, topmost first.
    pub fn stack(&self) -> Vec<WindowId> {
        self.stack.borrow().clone()
    }

    /// Whether a window exists and is minimized.
    pub fn is_minimized(&self, id: WindowId) -> bool {
        self.windows
            .borrow()
            .get(&id)
            .map(|w| w.minimized)
            .unwrap_or(false)
    }

    /// Signals with a live subscription.
    pub fn connected(&self) -> Vec<ShellSignal> {
        self.handles.borrow().values().copied().collect()
    }

    /// Registered keybinding names.
    pub fn keybindings(&self) -> Vec<String> {
        self.keybindings.borrow().clone()
    }

    // ========== Internals ==========

    fn record(&self, call: FacadeCall) {
        self.calls.borrow_mut().push(call);
    }

    fn push_event(&self, event: ShellEvent) {
        self.events.borrow_mut().push_back(event);
    }

    fn next_user_time(&self) -> u32 {
        let now = self.user_clock.get();
        self.user_clock.set(now + 1);
        now
    }

    /// Raise, unminimize and focus a window.
    fn bring_forward(&self, id: WindowId) {
        let user_time = self.next_user_time();
        let was_minimized = {
            let mut windows = self.windows.borrow_mut();
            let Some(window) = windows.get_mut(&id) else {
                return;
            };
            window.user_time = user_time;
            std::mem::replace(&mut window.minimized, false)
        };
        if was_minimized {
            self.push_event(ShellEvent::WindowUnminimized { window: id });
        }
        {
            let mut stack = self.stack.borrow_mut();
            stack.retain(|w| *w != id);
            stack.insert(0, id);
        }
        if self.focus.replace(Some(id)) != Some(id) {
            self.push_event(ShellEvent::FocusWindowChanged);
        }
    }

    fn switch_workspace(&self, workspace: WorkspaceIndex) {
        if workspace >= self.workspace_count.get() || workspace == self.active_workspace.get() {
            return;
        }
        self.active_workspace.set(workspace);
        self.push_event(ShellEvent::ActiveWorkspaceChanged);
        self.refocus();
    }

    /// Hand focus to the topmost visible window on the active workspace.
    fn refocus(&self) {
        let workspace = self.active_workspace.get();
        let next = {
            let windows = self.windows.borrow();
            self.stack.borrow().iter().copied().find(|id| {
                windows
                    .get(id)
                    .map(|w| !w.minimized && w.is_on(workspace))
                    .unwrap_or(false)
            })
        };
        if self.focus.replace(next) != next {
            self.push_event(ShellEvent::FocusWindowChanged);
        }
    }
}

impl WindowSystem for MemoryWindowSystem {
    fn focus_window(&self) -> Option<WindowId> {
        self.focus.get()
    }

    fn active_workspace(&self) -> WorkspaceIndex {
        self.active_workspace.get()
    }

    fn workspace_count(&self) -> usize {
        self.workspace_count.get()
    }

    fn tab_list(&self, workspace: WorkspaceIndex) -> Vec<WindowId> {
        let windows = self.windows.borrow();
        self.stack
            .borrow()
            .iter()
            .copied()
            .filter(|id| windows.get(id).map(|w| w.is_on(workspace)).unwrap_or(false))
            .collect()
    }

    fn window(&self, id: WindowId) -> Option<WindowInfo> {
        self.windows.borrow().get(&id).cloned()
    }

    fn app(&self, id: &AppId) -> Option<AppInfo> {
        self.apps.borrow().get(id).cloned()
    }

    fn app_windows(&self, id: &AppId) -> Vec<WindowId> {
        let windows = self.windows.borrow();
        self.stack
            .borrow()
            .iter()
            .copied()
            .filter(|w| {
                windows
                    .get(w)
                    .map(|info| info.app.as_ref() == Some(id))
                    .unwrap_or(false)
            })
            .collect()
    }

    fn is_overview_visible(&self) -> bool {
        self.overview.get()
    }

    fn current_time(&self) -> Timestamp {
        let now = self.clock.get();
        self.clock.set(now + 1);
        now
    }

    fn minimize(&self, id: WindowId) {
        self.record(FacadeCall::Minimize(id));
        let changed = match self.windows.borrow_mut().get_mut(&id) {
            Some(window) if !window.minimized => {
                window.minimized = true;
                true
            }
            _ => false,
        };
        if changed {
            self.push_event(ShellEvent::WindowMinimized { window: id });
            if self.focus.get() == Some(id) {
                self.refocus();
            }
        }
    }

    fn unminimize(&self, id: WindowId) {
        self.record(FacadeCall::Unminimize(id));
        let changed = match self.windows.borrow_mut().get_mut(&id) {
            Some(window) if window.minimized => {
                window.minimized = false;
                true
            }
            _ => false,
        };
        if changed {
            self.push_event(ShellEvent::WindowUnminimized { window: id });
        }
    }

    fn activate(&self, id: WindowId, time: Timestamp) {
        self.record(FacadeCall::Activate(id, time));
        let workspace = match self.windows.borrow().get(&id) {
            Some(window) => window.workspace,
            None => return,
        };
        if let Some(ws) = workspace {
            self.switch_workspace(ws);
        }
        self.bring_forward(id);
    }

    fn change_workspace(&self, id: WindowId, workspace: WorkspaceIndex) {
        self.record(FacadeCall::ChangeWorkspace(id, workspace));
        if workspace >= self.workspace_count.get() {
            return;
        }
        match self.windows.borrow_mut().get_mut(&id) {
            Some(window) => window.workspace = Some(workspace),
            None => return,
        }
        self.push_event(ShellEvent::TrackedWindowsChanged);
        if self.focus.get() == Some(id) && workspace != self.active_workspace.get() {
            self.refocus();
        }
    }

    fn delete(&self, id: WindowId, time: Timestamp) {
        self.record(FacadeCall::Delete(id, time));
        self.remove_window(id);
    }

    fn request_quit(&self, id: &AppId) {
        self.record(FacadeCall::RequestQuit(id.clone()));
        for window in self.app_windows(id) {
            self.remove_window(window);
        }
    }

    fn open_new_window(&self, id: &AppId) {
        self.record(FacadeCall::OpenNewWindow(id.clone()));
    }

    fn activate_workspace(&self, workspace: WorkspaceIndex, time: Timestamp) {
        self.record(FacadeCall::ActivateWorkspace(workspace, time));
        self.switch_workspace(workspace);
    }

    fn connect(&self, signal: ShellSignal) -> SwitcherResult<SignalHandle> {
        self.record(FacadeCall::Connect(signal));
        if self.refused_signals.borrow().contains(&signal) {
            return Err(SwitcherError::SignalRefused(signal));
        }
        let handle = SignalHandle(self.next_handle.get());
        self.next_handle.set(handle.0 + 1);
        self.handles.borrow_mut().insert(handle, signal);
        Ok(handle)
    }

    fn disconnect(&self, handle: SignalHandle) {
        self.record(FacadeCall::Disconnect(handle));
        self.handles.borrow_mut().remove(&handle);
    }

    fn add_keybinding(&self, name: &str) -> SwitcherResult<()> {
        self.record(FacadeCall::AddKeybinding(name.to_string()));
        if self.refused_keybindings.borrow().iter().any(|n| n == name) {
            return Err(SwitcherError::KeybindingRefused(name.to_string()));
        }
        let mut bindings = self.keybindings.borrow_mut();
        if !bindings.iter().any(|n| n == name) {
            bindings.push(name.to_string());
        }
        Ok(())
    }

    fn remove_keybinding(&self, name: &str) {
        self.record(FacadeCall::RemoveKeybinding(name.to_string()));
        self.keybindings.borrow_mut().retain(|n| n != name);
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod memory_tests;
