//! Panel surface seam
//!
//! The widget layer (panel button, popup menus, notifications) is not part
//! of this crate. The indicator drives it through [`PanelSurface`] with
//! fully computed models and never reads anything back.

use serde::{Deserialize, Serialize};

use crate::view::{ContextMenuModel, IndicatorView};

/// The two popup menus owned by the indicator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MenuKind {
    /// Primary-click menu with actions, app list and workspace submenu
    Switcher,
    /// Secondary-click menu for the current application
    Context,
}

/// Host widget layer as seen from the indicator.
pub trait PanelSurface {
    /// Show a freshly computed view. `animate` asks for the idle fade.
    fn render(&mut self, view: &IndicatorView, animate: bool);

    /// Fill the context menu before it is opened.
    fn populate_context_menu(&mut self, _model: &ContextMenuModel) {}

    /// Open a popup menu.
    fn open_menu(&mut self, menu: MenuKind);

    /// Close a popup menu.
    fn close_menu(&mut self, menu: MenuKind);

    /// Show a transient desktop notification.
    fn notify(&mut self, title: &str, body: &str);
}

/// A call made on a [`RecordingSurface`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceCall {
    Render { view: IndicatorView, animate: bool },
    PopulateContextMenu(ContextMenuModel),
    OpenMenu(MenuKind),
    CloseMenu(MenuKind),
    Notify { title: String, body: String },
}

/// Surface that records every call, for tests and the replay tool.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call, oldest first
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Forget recorded calls
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Most recently rendered view
    pub fn last_view(&self) -> Option<&IndicatorView> {
        self.calls.iter().rev().find_map(|call| match call {
            SurfaceCall::Render { view, .. } => Some(view),
            _ => None,
        })
    }

    /// Number of renders so far
    pub fn render_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, SurfaceCall::Render { .. }))
            .count()
    }

    /// `animate` flag of the most recent render
    pub fn last_animate(&self) -> Option<bool> {
        self.calls.iter().rev().find_map(|call| match call {
            SurfaceCall::Render { animate, .. } => Some(*animate),
            _ => None,
        })
    }

    /// Notifications shown so far, as `(title, body)`
    pub fn notifications(&self) -> Vec<(String, String)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Notify { title, body } => Some((title.clone(), body.clone())),
                _ => None,
            })
            .collect()
    }
}

impl PanelSurface for RecordingSurface {
    fn render(&mut self, view: &IndicatorView, animate: bool) {
        self.calls.push(SurfaceCall::Render {
            view: view.clone(),
            animate,
        });
    }

    fn populate_context_menu(&mut self, model: &ContextMenuModel) {
        self.calls
            .push(SurfaceCall::PopulateContextMenu(model.clone()));
    }

    fn open_menu(&mut self, menu: MenuKind) {
        self.calls.push(SurfaceCall::OpenMenu(menu));
    }

    fn close_menu(&mut self, menu: MenuKind) {
        self.calls.push(SurfaceCall::CloseMenu(menu));
    }

    fn notify(&mut self, title: &str, body: &str) {
        self.calls.push(SurfaceCall::Notify {
            title: title.to_string(),
            body: body.to_string(),
        });
    }
}
