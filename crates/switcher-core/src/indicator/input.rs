//! Pointer and keyboard input

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Indicator;
use crate::commands::{shortcut_command, Command};
use crate::facade::WindowSystem;
use crate::surface::PanelSurface;
use crate::types::Millis;
use crate::view::{has_any_apps, workspace_apps};

/// Mouse button pressed on the indicator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

/// Scroll direction over the indicator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
    Smooth,
}

impl<W: WindowSystem, S: PanelSurface> Indicator<W, S> {
    /// Route a button press on the indicator.
    pub fn handle_click(&mut self, button: PointerButton, now: Millis) {
        if self.torn_down {
            return;
        }
        let app = match self.ws.focus_window() {
            Some(window) => self.ws.window(window).and_then(|w| w.app),
            None => self.focus.last_known_app().cloned(),
        };
        debug!(?button, app = ?app.as_ref().map(|a| a.as_str()), "click");

        match (button, app) {
            (PointerButton::Middle, Some(app)) => {
                let _ = self.execute(Command::OpenNewWindow { app }, now);
            }
            (PointerButton::Secondary, Some(app)) => self.toggle_context_menu(&app),
            (PointerButton::Primary, Some(_)) => self.toggle_switcher_menu(),
            (_, None) => {
                if has_any_apps(&self.ws, self.ws.active_workspace()) {
                    self.toggle_switcher_menu();
                } else {
                    let _ = self.execute(Command::ToggleIdleDisplay, now);
                }
            }
        }
    }

    /// Cycle through the workspace's visible apps. Returns whether the
    /// scroll was consumed.
    pub fn handle_scroll(&mut self, direction: ScrollDirection, now: Millis) -> bool {
        if self.torn_down {
            return false;
        }
        let apps = workspace_apps(&self.ws, self.ws.active_workspace(), true);
        if apps.len() <= 1 {
            return false;
        }
        let current = self.ws.focus_app();
        let position = current.and_then(|app| apps.iter().position(|a| *a == app));
        let target = match (position, direction) {
            (None, _) => apps[0].clone(),
            (Some(index), ScrollDirection::Up | ScrollDirection::Left) => {
                apps[(index + apps.len() - 1) % apps.len()].clone()
            }
            (Some(index), ScrollDirection::Down | ScrollDirection::Right) => {
                apps[(index + 1) % apps.len()].clone()
            }
            (Some(_), ScrollDirection::Smooth) => return false,
        };
        self.execute(Command::ActivateApplication { app: target }, now)
            .is_ok()
    }

    /// Run the command bound to a registered keybinding. Returns whether
    /// the keybinding belongs to this indicator.
    pub fn handle_keybinding(&mut self, name: &str, now: Millis) -> bool {
        if self.torn_down || !self.keybindings.iter().any(|k| *k == name) {
            debug!(keybinding = name, "keybinding not registered");
            return false;
        }
        match shortcut_command(name) {
            Some(command) => {
                let _ = self.execute(command, now);
                true
            }
            None => false,
        }
    }
}
