//! Display and menu models
//!
//! A recompute rebuilds all of this from the live window system. The
//! models are plain data; the surface decides how they look.

use serde::{Deserialize, Serialize};

use crate::commands::{HINT_HIDE_APP, HINT_HIDE_OTHERS, HINT_QUIT_APP};
use crate::config::{PanelBox, Settings};
use crate::facade::{AppInfo, WindowSystem};
use crate::types::{AppId, WindowId, WorkspaceIndex};

/// What the panel button shows
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PanelLabel {
    App {
        id: AppId,
        name: String,
        icon: Option<String>,
    },
    Desktop,
    /// 1-indexed workspace number
    Workspace {
        number: usize,
    },
    NoApplications,
}

impl PanelLabel {
    /// Plain text for the label widget
    pub fn text(&self) -> String {
        match self {
            PanelLabel::App { name, .. } => name.clone(),
            PanelLabel::Desktop => "Desktop".to_string(),
            PanelLabel::Workspace { number } => format!("Workspace {}", number),
            PanelLabel::NoApplications => "No Applications".to_string(),
        }
    }

    /// Whether an application is shown rather than an idle display
    pub fn is_app(&self) -> bool {
        matches!(self, PanelLabel::App { .. })
    }
}

/// A conditional action in the switcher menu
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    pub label: String,
    pub visible: bool,
    /// Keyboard shortcut shown beside the label
    pub hint: Option<String>,
}

impl ActionItem {
    fn new(label: impl Into<String>, visible: bool, hint: Option<String>) -> Self {
        Self {
            label: label.into(),
            visible,
            hint,
        }
    }
}

/// Emphasis of an application list entry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppEntryState {
    Focused,
    AllMinimized,
    Normal,
}

/// One row of the application list
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppEntry {
    pub id: AppId,
    pub name: String,
    pub icon: Option<String>,
    /// Normal top-level windows on the workspace
    pub window_count: usize,
    /// How many of those are not minimized
    pub visible_count: usize,
    pub state: AppEntryState,
}

impl AppEntry {
    /// `visible/total` badge, only shown for several windows
    pub fn count_badge(&self) -> Option<String> {
        (self.window_count > 1).then(|| format!("{}/{}", self.visible_count, self.window_count))
    }
}

/// One row of a workspace submenu
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceEntry {
    pub index: WorkspaceIndex,
    /// 1-indexed number for display
    pub number: usize,
    pub current: bool,
}

/// The "Move to Workspace" submenu
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceMenu {
    pub entries: Vec<WorkspaceEntry>,
    /// False when every window on the workspace is minimized
    pub sensitive: bool,
}

/// Switcher (primary-click) menu
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitcherMenuModel {
    pub hide_app: ActionItem,
    pub hide_others: ActionItem,
    pub show_all: ActionItem,
    pub quit_app: ActionItem,
    pub apps: Vec<AppEntry>,
    /// Absent with a single workspace
    pub workspaces: Option<WorkspaceMenu>,
}

/// One row of the context menu's window list
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowEntry {
    pub id: WindowId,
    pub title: String,
    pub minimized: bool,
    pub focused: bool,
}

/// Context (secondary-click) menu for one application
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextMenuModel {
    pub app: AppId,
    pub windows: Vec<WindowEntry>,
    pub workspaces: Option<WorkspaceMenu>,
}

/// Everything the surface needs to draw the indicator
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorView {
    pub label: PanelLabel,
    pub show_label: bool,
    pub panel_box: PanelBox,
    pub position_in_box: usize,
    pub hide_boxpointer: bool,
    pub switcher: SwitcherMenuModel,
}

// ========== Builders ==========

/// Whether the workspace holds any window worth listing.
pub fn has_any_apps(ws: &dyn WindowSystem, workspace: WorkspaceIndex) -> bool {
    ws.tab_list(workspace)
        .into_iter()
        .filter_map(|id| ws.window(id))
        .any(|w| w.is_listable())
}

/// Unique applications on a workspace in tab-list order.
///
/// With `visible_only` set, apps whose windows are all minimized are left out.
pub fn workspace_apps(
    ws: &dyn WindowSystem,
    workspace: WorkspaceIndex,
    visible_only: bool,
) -> Vec<AppId> {
    let mut apps: Vec<AppId> = Vec::new();
    for window in ws.tab_list(workspace).into_iter().filter_map(|id| ws.window(id)) {
        if !window.is_listable() || (visible_only && window.minimized) {
            continue;
        }
        if !visible_only && window.transient_for.is_some() {
            continue;
        }
        if let Some(app) = window.app {
            if !apps.contains(&app) && ws.app(&app).is_some() {
                apps.push(app);
            }
        }
    }
    apps
}

/// Workspace submenu, or `None` when there is nowhere to move to.
pub fn build_workspace_menu(ws: &dyn WindowSystem, workspace: WorkspaceIndex) -> Option<WorkspaceMenu> {
    let count = ws.workspace_count();
    if count <= 1 {
        return None;
    }
    let sensitive = ws
        .tab_list(workspace)
        .into_iter()
        .filter_map(|id| ws.window(id))
        .any(|w| !w.minimized);
    Some(WorkspaceMenu {
        entries: (0..count)
            .map(|index| WorkspaceEntry {
                index,
                number: index + 1,
                current: index == workspace,
            })
            .collect(),
        sensitive,
    })
}

/// Switcher menu for the given resolved app.
pub fn build_switcher_menu(
    ws: &dyn WindowSystem,
    settings: &Settings,
    current: Option<&AppInfo>,
    workspace: WorkspaceIndex,
) -> SwitcherMenuModel {
    let windows: Vec<_> = ws
        .tab_list(workspace)
        .into_iter()
        .filter_map(|id| ws.window(id))
        .collect();
    let focused_app = ws.focus_app();

    let others_visible = windows.iter().any(|w| {
        !w.minimized && w.app.is_some() && w.app.as_ref() != focused_app.as_ref()
    });
    let any_minimized = windows.iter().any(|w| w.minimized);
    let any_visible = windows.iter().any(|w| !w.minimized);
    let app_actions = current.is_some() && any_visible;

    let hint = |h: &str| settings.shows_hints().then(|| h.to_string());
    let (hide_label, quit_label) = match current {
        Some(app) => (format!("Hide {}", app.name), format!("Quit {}", app.name)),
        None => ("Hide Application".to_string(), "Quit Application".to_string()),
    };

    let apps = workspace_apps(ws, workspace, false)
        .into_iter()
        .filter_map(|id| ws.app(&id))
        .map(|app| {
            let own: Vec<_> = windows
                .iter()
                .filter(|w| w.app.as_ref() == Some(&app.id) && w.is_top_level())
                .collect();
            let window_count = own.len();
            let visible_count = own.iter().filter(|w| !w.minimized).count();
            let state = if focused_app.as_ref() == Some(&app.id) {
                AppEntryState::Focused
            } else if window_count > 0 && visible_count == 0 {
                AppEntryState::AllMinimized
            } else {
                AppEntryState::Normal
            };
            AppEntry {
                id: app.id,
                name: app.name,
                icon: app.icon,
                window_count,
                visible_count,
                state,
            }
        })
        .collect();

    SwitcherMenuModel {
        hide_app: ActionItem::new(hide_label, app_actions, hint(HINT_HIDE_APP)),
        hide_others: ActionItem::new("Hide Others", others_visible, hint(HINT_HIDE_OTHERS)),
        show_all: ActionItem::new("Show All", any_minimized, None),
        quit_app: ActionItem::new(quit_label, app_actions, hint(HINT_QUIT_APP)),
        apps,
        workspaces: build_workspace_menu(ws, workspace),
    }
}

/// Context menu for `app`: its top-level windows on the workspace, most recent first.
pub fn build_context_menu(
    ws: &dyn WindowSystem,
    app: &AppId,
    workspace: WorkspaceIndex,
) -> ContextMenuModel {
    let focus = ws.focus_window();
    let mut windows: Vec<_> = ws
        .app_windows(app)
        .into_iter()
        .filter_map(|id| ws.window(id))
        .filter(|w| w.is_on(workspace) && w.is_top_level())
        .collect();
    windows.sort_by(|a, b| b.user_time.cmp(&a.user_time));

    ContextMenuModel {
        app: app.clone(),
        windows: windows
            .into_iter()
            .map(|w| WindowEntry {
                id: w.id,
                title: if w.title.is_empty() {
                    "Untitled".to_string()
                } else {
                    w.title
                },
                minimized: w.minimized,
                focused: focus == Some(w.id),
            })
            .collect(),
        workspaces: build_workspace_menu(ws, workspace),
    }
}
