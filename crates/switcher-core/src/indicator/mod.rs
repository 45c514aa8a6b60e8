//! The panel indicator
//!
//! [`Indicator`] owns every tracker and timer and is the only entry point
//! for the host: events, timer ticks, pointer input, keybindings and
//! settings changes all come through it. Every entry point takes the loop
//! time from the host and none of them block.

mod commands;
mod events;
mod input;

pub use input::{PointerButton, ScrollDirection};

use tracing::{debug, info, trace, warn};

use crate::commands::SHORTCUTS;
use crate::config::{Settings, Timings};
use crate::facade::{ShellSignal, SignalHandle, WindowSystem};
use crate::focus::FocusTracker;
use crate::hidden::{VisibilityTracker, WindowMark};
use crate::schedule::{schedule_update, IdleDisplay, IdleMode, Timers};
use crate::surface::{MenuKind, PanelSurface};
use crate::types::{AppId, Millis, WindowId, WorkspaceIndex};
use crate::view::{
    build_context_menu, build_switcher_menu, has_any_apps, ContextMenuModel, IndicatorView,
    PanelLabel,
};

/// Focus-tracking app switcher indicator
pub struct Indicator<W: WindowSystem, S: PanelSurface> {
    ws: W,
    surface: S,
    settings: Settings,
    timings: Timings,
    focus: FocusTracker,
    visibility: VisibilityTracker,
    idle: IdleDisplay,
    timers: Timers,
    open_menus: Vec<MenuKind>,
    /// Live signal subscriptions, disposed on teardown
    signals: Vec<SignalHandle>,
    /// Keybindings the host accepted
    keybindings: Vec<&'static str>,
    view: Option<IndicatorView>,
    recomputes: u64,
    torn_down: bool,
}

impl<W: WindowSystem, S: PanelSurface> Indicator<W, S> {
    /// Create an indicator with default timings.
    pub fn new(ws: W, surface: S, settings: Settings) -> Self {
        Self::with_timings(ws, surface, settings, Timings::default())
    }

    /// Create an indicator, subscribe to the host and render once.
    pub fn with_timings(ws: W, surface: S, settings: Settings, timings: Timings) -> Self {
        let mut indicator = Self {
            ws,
            surface,
            settings,
            timings,
            focus: FocusTracker::new(),
            visibility: VisibilityTracker::new(),
            idle: IdleDisplay::new(),
            timers: Timers::new(),
            open_menus: Vec::new(),
            signals: Vec::new(),
            keybindings: Vec::new(),
            view: None,
            recomputes: 0,
            torn_down: false,
        };
        indicator.connect_signals();
        indicator.register_keybindings();
        indicator.recompute(false);
        info!(
            signals = indicator.signals.len(),
            keybindings = indicator.keybindings.len(),
            "indicator started"
        );
        indicator
    }

    // ========== Accessors ==========

    pub fn window_system(&self) -> &W {
        &self.ws
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    pub fn focus(&self) -> &FocusTracker {
        &self.focus
    }

    pub fn visibility(&self) -> &VisibilityTracker {
        &self.visibility
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    /// Idle display mode, `None` while an app or the desktop is shown
    pub fn idle_mode(&self) -> Option<IdleMode> {
        self.idle.is_active().then(|| self.idle.mode())
    }

    /// Most recently rendered view
    pub fn view(&self) -> Option<&IndicatorView> {
        self.view.as_ref()
    }

    /// Number of recomputes since creation
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    /// Earliest pending timer, for the host loop to sleep until
    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // ========== Display ==========

    /// Request a debounced refresh.
    pub fn schedule_update(&mut self, now: Millis) {
        if self.torn_down {
            return;
        }
        schedule_update(&mut self.timers, now, &self.timings);
    }

    /// Rebuild the view from the live window system and render it.
    fn recompute(&mut self, animate: bool) {
        let ws: &dyn WindowSystem = &self.ws;
        let workspace = ws.active_workspace();
        let focused = ws.focus_app();
        let current = self.focus.on_focus_changed(focused.as_ref(), &mut self.timers);
        let current_info = current.as_ref().and_then(|id| ws.app(id));

        let label = match &current_info {
            Some(app) => {
                self.idle.leave(&mut self.timers);
                PanelLabel::App {
                    id: app.id.clone(),
                    name: app.name.clone(),
                    icon: app.icon.clone(),
                }
            }
            None if has_any_apps(ws, workspace) => {
                self.idle.leave(&mut self.timers);
                PanelLabel::Desktop
            }
            None => idle_label(self.idle.enter(ws.is_overview_visible()), workspace),
        };

        let view = IndicatorView {
            label,
            show_label: self.settings.show_label,
            panel_box: self.settings.panel_box,
            position_in_box: self.settings.position(),
            hide_boxpointer: self.settings.hide_boxpointer,
            switcher: build_switcher_menu(ws, &self.settings, current_info.as_ref(), workspace),
        };
        self.recomputes += 1;
        trace!(label = %view.label.text(), animate, "recomputed");
        self.surface.render(&view, animate);
        self.view = Some(view);
    }

    // ========== Menus ==========

    pub fn is_menu_open(&self, menu: MenuKind) -> bool {
        self.open_menus.contains(&menu)
    }

    fn open_menu(&mut self, menu: MenuKind) {
        if !self.is_menu_open(menu) {
            self.open_menus.push(menu);
            self.surface.open_menu(menu);
        }
    }

    fn close_menu(&mut self, menu: MenuKind) {
        if self.is_menu_open(menu) {
            self.open_menus.retain(|m| *m != menu);
            self.surface.close_menu(menu);
        }
    }

    /// Close every open menu of this indicator.
    pub fn close_all_menus(&mut self) {
        self.close_menu(MenuKind::Switcher);
        self.close_menu(MenuKind::Context);
    }

    /// The surface closed a menu on its own (click outside, Escape).
    pub fn menu_closed(&mut self, menu: MenuKind) {
        self.open_menus.retain(|m| *m != menu);
    }

    fn toggle_switcher_menu(&mut self) {
        if self.is_menu_open(MenuKind::Switcher) {
            self.close_menu(MenuKind::Switcher);
        } else {
            self.close_all_menus();
            self.open_menu(MenuKind::Switcher);
        }
    }

    fn toggle_context_menu(&mut self, app: &AppId) {
        if self.is_menu_open(MenuKind::Context) {
            self.close_menu(MenuKind::Context);
            return;
        }
        self.close_all_menus();
        let model = build_context_menu(&self.ws, app, self.ws.active_workspace());
        self.surface.populate_context_menu(&model);
        self.open_menu(MenuKind::Context);
    }

    /// Context menu model for `app` on the active workspace.
    pub fn context_menu(&self, app: &AppId) -> Option<ContextMenuModel> {
        self.ws.app(app)?;
        Some(build_context_menu(&self.ws, app, self.ws.active_workspace()))
    }

    // ========== Overview Integration ==========

    /// Whether the overview should list this window.
    pub fn is_overview_window(&self, id: WindowId) -> bool {
        !(self.settings.hide_windows_from_overview && self.visibility.is_hidden(id))
    }

    /// Visual mark for a window in the overview.
    pub fn window_mark(&self, id: WindowId) -> Option<WindowMark> {
        if !self.settings.enable_overview_effects {
            return None;
        }
        self.visibility.mark(&self.ws, id)
    }

    // ========== Settings ==========

    /// Apply new settings, reacting only to what changed.
    pub fn apply_settings(&mut self, settings: Settings) {
        if self.torn_down {
            return;
        }
        let previous = std::mem::replace(&mut self.settings, settings);
        if previous == self.settings {
            return;
        }
        info!("settings changed");

        let shortcuts_changed =
            previous.enable_keyboard_shortcuts != self.settings.enable_keyboard_shortcuts;
        if shortcuts_changed {
            if self.settings.enable_keyboard_shortcuts {
                self.register_keybindings();
            } else {
                self.unregister_keybindings();
            }
        }
        if shortcuts_changed || previous.display_differs(&self.settings) {
            self.recompute(false);
        }
    }

    // ========== Host Registration ==========

    fn connect_signals(&mut self) {
        for signal in ShellSignal::ALL {
            match self.ws.connect(signal) {
                Ok(handle) => self.signals.push(handle),
                Err(err) => warn!(signal = signal.name(), error = %err, "signal unavailable"),
            }
        }
    }

    fn register_keybindings(&mut self) {
        if !self.settings.enable_keyboard_shortcuts {
            return;
        }
        for shortcut in SHORTCUTS.iter() {
            if self.keybindings.contains(&shortcut.name) {
                continue;
            }
            match self.ws.add_keybinding(shortcut.name) {
                Ok(()) => self.keybindings.push(shortcut.name),
                Err(err) => warn!(keybinding = shortcut.name, error = %err, "keybinding unavailable"),
            }
        }
        debug!(count = self.keybindings.len(), "keybindings registered");
    }

    fn unregister_keybindings(&mut self) {
        for name in self.keybindings.drain(..) {
            self.ws.remove_keybinding(name);
        }
        debug!("keybindings removed");
    }

    /// Dispose of every subscription, timer and keybinding and clear all state.
    ///
    /// Idempotent. Every entry point is a no-op afterwards.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        for handle in self.signals.drain(..) {
            self.ws.disconnect(handle);
        }
        self.timers.clear();
        self.unregister_keybindings();
        self.close_all_menus();
        self.focus.clear();
        self.visibility.clear();
        self.idle.leave(&mut self.timers);
        self.view = None;
        self.torn_down = true;
        info!("indicator torn down");
    }
}

fn idle_label(mode: IdleMode, workspace: WorkspaceIndex) -> PanelLabel {
    match mode {
        IdleMode::Desktop => PanelLabel::Desktop,
        IdleMode::WorkspaceNumber => PanelLabel::Workspace {
            number: workspace + 1,
        },
        IdleMode::NoApplications => PanelLabel::NoApplications,
    }
}
