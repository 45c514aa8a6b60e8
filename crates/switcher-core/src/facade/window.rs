//! Snapshots of host windows and applications
//!
//! These are plain values copied out of the host on every query. They are
//! never cached across events; anything that needs a window's state asks
//! the facade again.

use serde::{Deserialize, Serialize};

use crate::types::{AppId, WindowId, WorkspaceIndex};

/// Window type as reported by the host window manager
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowType {
    /// Regular top-level application window
    #[default]
    Normal,
    /// Dialog window
    Dialog,
    /// Modal dialog attached to a parent
    ModalDialog,
    /// Utility/toolbox window
    Utility,
    /// Splash screen
    Splashscreen,
}

/// Point-in-time view of a host window
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowInfo {
    pub id: WindowId,
    /// Owning application, if the host could match one
    #[serde(default)]
    pub app: Option<AppId>,
    /// `None` for windows visible on all workspaces
    #[serde(default)]
    pub workspace: Option<WorkspaceIndex>,
    #[serde(default)]
    pub window_type: WindowType,
    #[serde(default)]
    pub minimized: bool,
    #[serde(default)]
    pub skip_taskbar: bool,
    #[serde(default)]
    pub transient_for: Option<WindowId>,
    /// Last user interaction time. Only meaningful for ordering.
    #[serde(default)]
    pub user_time: u32,
    #[serde(default)]
    pub title: String,
}

impl WindowInfo {
    /// Create a normal, visible window owned by `app` on `workspace`
    pub fn normal(id: WindowId, app: impl Into<AppId>, workspace: WorkspaceIndex) -> Self {
        Self {
            id,
            app: Some(app.into()),
            workspace: Some(workspace),
            window_type: WindowType::Normal,
            minimized: false,
            skip_taskbar: false,
            transient_for: None,
            user_time: 0,
            title: String::new(),
        }
    }

    /// Mark the window as minimized
    pub fn minimized(mut self) -> Self {
        self.minimized = true;
        self
    }

    /// Set the last interaction time
    pub fn with_user_time(mut self, user_time: u32) -> Self {
        self.user_time = user_time;
        self
    }

    /// Set the window title
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the window type
    pub fn of_type(mut self, window_type: WindowType) -> Self {
        self.window_type = window_type;
        self
    }

    /// Make the window transient for `parent`
    pub fn transient_for(mut self, parent: WindowId) -> Self {
        self.transient_for = Some(parent);
        self
    }

    /// Hide the window from taskbar-like listings
    pub fn skipping_taskbar(mut self) -> Self {
        self.skip_taskbar = true;
        self
    }

    /// Whether the window is on the given workspace
    #[inline]
    pub fn is_on(&self, workspace: WorkspaceIndex) -> bool {
        self.workspace == Some(workspace)
    }

    /// Whether the window is a normal window
    #[inline]
    pub fn is_normal(&self) -> bool {
        self.window_type == WindowType::Normal
    }

    /// Normal window with no transient parent
    #[inline]
    pub fn is_top_level(&self) -> bool {
        self.is_normal() && self.transient_for.is_none()
    }

    /// Eligible for the application list and idle detection
    #[inline]
    pub fn is_listable(&self) -> bool {
        self.is_normal() && !self.skip_taskbar && self.app.is_some()
    }
}

/// Point-in-time view of a host application
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    pub id: AppId,
    pub name: String,
    /// Icon name or path, passed through to the surface untouched
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default = "default_true")]
    pub can_open_new_window: bool,
}

fn default_true() -> bool {
    true
}

impl AppInfo {
    /// Create an application record
    pub fn new(id: impl Into<AppId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: None,
            can_open_new_window: true,
        }
    }

    /// Set the icon name
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Mark the application as single-window
    pub fn single_window(mut self) -> Self {
        self.can_open_new_window = false;
        self
    }
}
