//! User settings and timing constants
//!
//! [`Settings`] mirrors the extension's settings schema key for key, so a
//! host can hand over its settings store as JSON. Every key is optional and
//! unknown keys are rejected.

use serde::{Deserialize, Serialize};

use crate::error::{SwitcherError, SwitcherResult};
use crate::types::Millis;

/// Panel box the indicator is placed in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelBox {
    Left,
    Center,
    #[default]
    Right,
}

/// User-facing settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Settings {
    /// Show the application name next to the icon
    pub show_label: bool,
    pub panel_box: PanelBox,
    /// Index inside the panel box; negative values count as 0
    pub position_in_box: i32,
    pub enable_keyboard_shortcuts: bool,
    /// Show shortcut hints next to menu actions
    pub show_menu_hints: bool,
    /// Mark hidden and minimized windows in the overview
    pub enable_overview_effects: bool,
    /// Leave hidden windows out of the overview entirely
    pub hide_windows_from_overview: bool,
    pub hide_boxpointer: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_label: true,
            panel_box: PanelBox::Right,
            position_in_box: 0,
            enable_keyboard_shortcuts: true,
            show_menu_hints: true,
            enable_overview_effects: true,
            hide_windows_from_overview: true,
            hide_boxpointer: false,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON object.
    pub fn from_json(json: &str) -> SwitcherResult<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings)
    }

    /// Serialize settings to a JSON object.
    pub fn to_json(&self) -> SwitcherResult<String> {
        serde_json::to_string(self).map_err(|e| SwitcherError::InvalidSettings(e.to_string()))
    }

    /// Clamped position inside the panel box
    pub fn position(&self) -> usize {
        self.position_in_box.max(0) as usize
    }

    /// Whether menu actions carry shortcut hints
    pub fn shows_hints(&self) -> bool {
        self.enable_keyboard_shortcuts && self.show_menu_hints
    }

    /// Whether a change from `self` to `next` alters what the panel shows
    pub(crate) fn display_differs(&self, next: &Settings) -> bool {
        self.show_label != next.show_label
            || self.panel_box != next.panel_box
            || self.position_in_box != next.position_in_box
            || self.hide_boxpointer != next.hide_boxpointer
            || self.show_menu_hints != next.show_menu_hints
    }
}

/// Timer delays, in milliseconds of loop time
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Trailing-edge debounce for display refresh
    pub update_debounce: Millis,
    /// Safety net for launches that never produce a focused window
    pub pending_app_timeout: Millis,
    /// Idle display auto-revert
    pub idle_revert: Millis,
    /// Duration of each half of the idle fade
    pub idle_fade: Millis,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            update_debounce: 100,
            pending_app_timeout: 2000,
            idle_revert: 3000,
            idle_fade: 150,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.show_label);
        assert_eq!(settings.panel_box, PanelBox::Right);
        assert_eq!(settings.position(), 0);
        assert!(settings.shows_hints());
        assert!(!settings.hide_boxpointer);

        let timings = Timings::default();
        assert_eq!(timings.update_debounce, 100);
        assert_eq!(timings.pending_app_timeout, 2000);
        assert_eq!(timings.idle_revert, 3000);
    }

    #[test]
    fn test_from_json_partial() {
        let settings =
            Settings::from_json(r#"{"panel-box": "left", "show-menu-hints": false}"#).unwrap();
        assert_eq!(settings.panel_box, PanelBox::Left);
        assert!(!settings.show_menu_hints);
        assert!(!settings.shows_hints());
        assert!(settings.enable_keyboard_shortcuts);
    }

    #[test]
    fn test_from_json_rejects_unknown_keys() {
        let err = Settings::from_json(r#"{"show-lable": false}"#).unwrap_err();
        assert!(matches!(err, SwitcherError::InvalidSettings(_)));
    }

    #[test]
    fn test_from_json_rejects_bad_panel_box() {
        assert!(Settings::from_json(r#"{"panel-box": "top"}"#).is_err());
    }

    #[test]
    fn test_negative_position_clamps() {
        let settings = Settings::from_json(r#"{"position-in-box": -4}"#).unwrap();
        assert_eq!(settings.position(), 0);
    }

    #[test]
    fn test_json_keys_are_kebab_case() {
        let json = Settings::default().to_json().unwrap();
        assert!(json.contains("\"enable-keyboard-shortcuts\":true"));
        assert!(json.contains("\"panel-box\":\"right\""));
    }

    #[test]
    fn test_display_differs() {
        let base = Settings::default();
        let mut next = base.clone();
        assert!(!base.display_differs(&next));

        next.enable_overview_effects = false;
        assert!(!base.display_differs(&next));

        next.show_label = false;
        assert!(base.display_differs(&next));
    }
}
