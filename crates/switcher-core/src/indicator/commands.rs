//! Command execution

use tracing::debug;

use super::Indicator;
use crate::activation::{activate_windows, app_windows_by_recency};
use crate::commands::Command;
use crate::error::{SwitcherError, SwitcherResult};
use crate::facade::WindowSystem;
use crate::placement::{check_target, move_app, move_window, Notice, WorkspaceGesture};
use crate::surface::PanelSurface;
use crate::types::{AppId, Millis, WindowId, WorkspaceIndex};

impl<W: WindowSystem, S: PanelSurface> Indicator<W, S> {
    /// Run a user command.
    ///
    /// Commands whose target is missing fail without touching any state.
    pub fn execute(&mut self, command: Command, now: Millis) -> SwitcherResult<()> {
        if self.torn_down {
            return Err(SwitcherError::TornDown);
        }
        let name = command.name();
        let result = self.run(command, now);
        match &result {
            Ok(()) => debug!(command = name, "command done"),
            Err(err) => debug!(command = name, error = %err, "command skipped"),
        }
        result
    }

    fn run(&mut self, command: Command, now: Millis) -> SwitcherResult<()> {
        let workspace = self.ws.active_workspace();
        match command {
            Command::HideCurrentApp => {
                let app = self.ws.focus_app().ok_or(SwitcherError::NoFocusedApp)?;
                self.visibility.hide_app(&self.ws, &app, workspace);
                self.schedule_update(now);
            }
            Command::HideOthers => {
                let app = self.ws.focus_app().ok_or(SwitcherError::NoFocusedApp)?;
                self.visibility.hide_others(&self.ws, &app, workspace);
                self.schedule_update(now);
            }
            Command::ShowRecentApp => {
                if self.visibility.show_most_recently_hidden(&self.ws, workspace) > 0 {
                    self.schedule_update(now);
                }
            }
            Command::ShowAll => {
                if self.visibility.show_all(&self.ws, workspace) > 0 {
                    self.schedule_update(now);
                }
            }
            Command::MinimizeCurrentWindow => {
                let window = self.ws.focus_window().ok_or(SwitcherError::NoFocusedWindow)?;
                self.visibility.minimize_window(&self.ws, window);
                self.schedule_update(now);
            }
            Command::UnminimizeRecentWindow => {
                if self
                    .visibility
                    .unminimize_most_recently_minimized(&self.ws, workspace)
                {
                    self.schedule_update(now);
                }
            }
            Command::CloseCurrentWindow => {
                let window = self.ws.focus_window().ok_or(SwitcherError::NoFocusedWindow)?;
                self.ws.delete(window, self.ws.current_time());
            }
            Command::QuitCurrentApp => {
                let app = self.ws.focus_app().ok_or(SwitcherError::NoFocusedApp)?;
                self.ws.request_quit(&app);
            }
            Command::ActivateApplication { app } => self.activate_application(app, workspace, now)?,
            Command::ActivateWindow { window } => self.activate_window(window, now)?,
            Command::OpenNewWindow { app } => {
                let info = self
                    .ws
                    .app(&app)
                    .ok_or_else(|| SwitcherError::AppNotFound(app.clone()))?;
                if !info.can_open_new_window {
                    debug!(app = %app, "app cannot open another window");
                    return Ok(());
                }
                self.ws.open_new_window(&app);
                self.close_all_menus();
            }
            Command::MoveWindowToWorkspace { index, gesture } => {
                self.move_focused_window(index, gesture, now)?
            }
            Command::MoveAppToWorkspace { index, gesture } => {
                self.move_focused_app(index, gesture, now)?
            }
            Command::ToggleIdleDisplay => {
                if !self.idle.is_active() {
                    debug!("idle display not shown");
                    return Ok(());
                }
                let in_overview = self.ws.is_overview_visible();
                self.idle
                    .toggle(in_overview, &mut self.timers, now, &self.timings);
                self.recompute(false);
            }
        }
        Ok(())
    }

    /// Bring every window of `app` on the workspace forward, newest on top.
    fn activate_application(
        &mut self,
        app: AppId,
        workspace: WorkspaceIndex,
        now: Millis,
    ) -> SwitcherResult<()> {
        if self.ws.app(&app).is_none() {
            return Err(SwitcherError::AppNotFound(app));
        }
        self.close_all_menus();
        let windows = app_windows_by_recency(&self.ws, &app, workspace);
        let outcome = activate_windows(&self.ws, &windows);
        self.visibility.forget_app_windows(&self.ws, &app);
        debug!(app = %app, ?outcome, "app activated");
        self.schedule_update(now);
        Ok(())
    }

    fn activate_window(&mut self, window: WindowId, now: Millis) -> SwitcherResult<()> {
        let info = self
            .ws
            .window(window)
            .ok_or(SwitcherError::WindowNotFound(window))?;
        if info.minimized {
            self.ws.unminimize(window);
        }
        self.visibility.forget_window(window);
        self.ws.activate(window, self.ws.current_time());
        self.close_all_menus();
        self.schedule_update(now);
        Ok(())
    }

    fn move_focused_window(
        &mut self,
        target: WorkspaceIndex,
        gesture: WorkspaceGesture,
        now: Millis,
    ) -> SwitcherResult<()> {
        let window = self.ws.focus_window().ok_or(SwitcherError::NoFocusedWindow)?;
        let info = self
            .ws
            .window(window)
            .ok_or(SwitcherError::WindowNotFound(window))?;
        check_target(&self.ws, target)?;

        self.close_all_menus();
        move_window(&self.ws, window, target, gesture.switches())?;
        if gesture == WorkspaceGesture::Send {
            let notice = Notice::window_sent(&info.title, target);
            self.surface.notify(&notice.title, &notice.body);
        }
        self.schedule_update(now);
        Ok(())
    }

    fn move_focused_app(
        &mut self,
        target: WorkspaceIndex,
        gesture: WorkspaceGesture,
        now: Millis,
    ) -> SwitcherResult<()> {
        let app = self.ws.focus_app().ok_or(SwitcherError::NoFocusedApp)?;
        let info = self
            .ws
            .app(&app)
            .ok_or_else(|| SwitcherError::AppNotFound(app.clone()))?;
        check_target(&self.ws, target)?;

        self.close_all_menus();
        move_app(&self.ws, &app, target, gesture.switches())?;
        if gesture == WorkspaceGesture::Send {
            let notice = Notice::app_sent(&info.name, target);
            self.surface.notify(&notice.title, &notice.body);
        }
        self.schedule_update(now);
        Ok(())
    }
}
