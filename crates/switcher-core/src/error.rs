//! Error types for the switcher core
//!
//! Nothing here is ever surfaced to the user. Stale references and missing
//! preconditions turn the requested operation into a no-op and are logged
//! at debug level; refusals from the host are logged as warnings and the
//! dependent feature is simply left unavailable.

use crate::facade::ShellSignal;
use crate::types::{AppId, WindowId, WorkspaceIndex};

/// Errors that can occur in switcher operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitcherError {
    /// Window with the given ID no longer resolves
    WindowNotFound(WindowId),

    /// Application with the given ID no longer resolves
    AppNotFound(AppId),

    /// A window-scoped command ran while nothing had focus
    NoFocusedWindow,

    /// An app-scoped command ran while no application had focus
    NoFocusedApp,

    /// Workspace at the given index was not found
    WorkspaceOutOfRange {
        /// The requested index
        index: WorkspaceIndex,
        /// The actual number of workspaces
        count: usize,
    },

    /// The host refused a signal subscription
    SignalRefused(ShellSignal),

    /// The host refused a keybinding registration
    KeybindingRefused(String),

    /// Settings could not be parsed or failed validation
    InvalidSettings(String),

    /// The indicator has already been torn down
    TornDown,
}

impl std::fmt::Display for SwitcherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WindowNotFound(id) => write!(f, "window not found: {}", id),
            Self::AppNotFound(id) => write!(f, "application not found: {}", id),
            Self::NoFocusedWindow => write!(f, "no focused window"),
            Self::NoFocusedApp => write!(f, "no focused application"),
            Self::WorkspaceOutOfRange { index, count } => {
                write!(
                    f,
                    "workspace index {} out of bounds (count: {})",
                    index, count
                )
            }
            Self::SignalRefused(signal) => {
                write!(f, "host refused signal subscription: {}", signal.name())
            }
            Self::KeybindingRefused(name) => {
                write!(f, "host refused keybinding: {}", name)
            }
            Self::InvalidSettings(msg) => write!(f, "invalid settings: {}", msg),
            Self::TornDown => write!(f, "indicator already torn down"),
        }
    }
}

impl std::error::Error for SwitcherError {}

impl From<serde_json::Error> for SwitcherError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidSettings(err.to_string())
    }
}

/// Result type alias for switcher operations
pub type SwitcherResult<T> = Result<T, SwitcherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SwitcherError::WindowNotFound(WindowId(42));
        assert_eq!(err.to_string(), "window not found: window#42");

        let err = SwitcherError::AppNotFound(AppId::new("org.gnome.Maps.desktop"));
        assert_eq!(
            err.to_string(),
            "application not found: org.gnome.Maps.desktop"
        );

        let err = SwitcherError::WorkspaceOutOfRange { index: 5, count: 3 };
        assert_eq!(
            err.to_string(),
            "workspace index 5 out of bounds (count: 3)"
        );

        let err = SwitcherError::SignalRefused(ShellSignal::OverviewShowing);
        assert_eq!(
            err.to_string(),
            "host refused signal subscription: overview-showing"
        );

        let err = SwitcherError::KeybindingRefused("hide-others".to_string());
        assert_eq!(err.to_string(), "host refused keybinding: hide-others");
    }

    #[test]
    fn test_error_equality() {
        let err1 = SwitcherError::WindowNotFound(WindowId(7));
        let err2 = SwitcherError::WindowNotFound(WindowId(7));
        let err3 = SwitcherError::WindowNotFound(WindowId(8));

        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }

    #[test]
    fn test_json_error_becomes_invalid_settings() {
        let err: SwitcherError = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert!(matches!(err, SwitcherError::InvalidSettings(_)));
    }
}
