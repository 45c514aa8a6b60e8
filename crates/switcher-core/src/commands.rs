//! Commands and keyboard shortcuts
//!
//! Everything the menus and keybindings can ask the indicator to do.

use serde::{Deserialize, Serialize};

use crate::placement::WorkspaceGesture;
use crate::types::{AppId, WindowId, WorkspaceIndex};

/// A user command
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum Command {
    HideCurrentApp,
    HideOthers,
    ShowRecentApp,
    ShowAll,
    MinimizeCurrentWindow,
    UnminimizeRecentWindow,
    CloseCurrentWindow,
    QuitCurrentApp,
    ActivateApplication {
        app: AppId,
    },
    ActivateWindow {
        window: WindowId,
    },
    OpenNewWindow {
        app: AppId,
    },
    MoveWindowToWorkspace {
        index: WorkspaceIndex,
        #[serde(default)]
        gesture: WorkspaceGesture,
    },
    MoveAppToWorkspace {
        index: WorkspaceIndex,
        #[serde(default)]
        gesture: WorkspaceGesture,
    },
    ToggleIdleDisplay,
}

impl Command {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::HideCurrentApp => "hide-current-app",
            Command::HideOthers => "hide-others",
            Command::ShowRecentApp => "show-recent-app",
            Command::ShowAll => "show-all",
            Command::MinimizeCurrentWindow => "minimize-current-window",
            Command::UnminimizeRecentWindow => "unminimize-recent-window",
            Command::CloseCurrentWindow => "close-current-window",
            Command::QuitCurrentApp => "quit-current-app",
            Command::ActivateApplication { .. } => "activate-application",
            Command::ActivateWindow { .. } => "activate-window",
            Command::OpenNewWindow { .. } => "open-new-window",
            Command::MoveWindowToWorkspace { .. } => "move-window-to-workspace",
            Command::MoveAppToWorkspace { .. } => "move-app-to-workspace",
            Command::ToggleIdleDisplay => "toggle-idle-display",
        }
    }
}

/// Hint shown next to "Hide"
pub const HINT_HIDE_APP: &str = "Super+H";
/// Hint shown next to "Hide Others"
pub const HINT_HIDE_OTHERS: &str = "Alt+Super+H";
/// Hint shown next to "Quit"
pub const HINT_QUIT_APP: &str = "Super+Q";

/// A global keybinding, named by its settings key
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shortcut {
    pub name: &'static str,
    pub command: Command,
}

/// Every keybinding the indicator registers, in registration order
pub const SHORTCUTS: [Shortcut; 8] = [
    Shortcut {
        name: "hide-current-app",
        command: Command::HideCurrentApp,
    },
    Shortcut {
        name: "hide-others",
        command: Command::HideOthers,
    },
    Shortcut {
        name: "show-recent-app",
        command: Command::ShowRecentApp,
    },
    Shortcut {
        name: "show-all-apps",
        command: Command::ShowAll,
    },
    Shortcut {
        name: "minimize-current-window",
        command: Command::MinimizeCurrentWindow,
    },
    Shortcut {
        name: "unminimize-recent-window",
        command: Command::UnminimizeRecentWindow,
    },
    Shortcut {
        name: "close-current-window",
        command: Command::CloseCurrentWindow,
    },
    Shortcut {
        name: "quit-current-app",
        command: Command::QuitCurrentApp,
    },
];

/// Command bound to a keybinding name
pub fn shortcut_command(name: &str) -> Option<Command> {
    SHORTCUTS
        .iter()
        .find(|s| s.name == name)
        .map(|s| s.command.clone())
}
