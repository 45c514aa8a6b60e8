//! Scenario format and runner

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use switcher_core::{
    AppId, AppInfo, Command, IdleMode, Indicator, IndicatorView, MemoryWindowSystem, Millis,
    PointerButton, RecordingSurface, ScrollDirection, Settings, SwitcherError, SwitcherResult,
    Timings, WindowId, WindowInfo, WindowSystem, WorkspaceIndex,
};

type Replay = Indicator<MemoryWindowSystem, RecordingSurface>;

/// Initial desktop plus a timeline of steps
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Scenario {
    #[serde(default = "default_workspaces")]
    pub workspaces: usize,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub timings: Timings,
    #[serde(default)]
    pub apps: Vec<AppInfo>,
    /// Windows in creation order, oldest first
    #[serde(default)]
    pub windows: Vec<WindowInfo>,
    #[serde(default)]
    pub focus: Option<WindowId>,
    #[serde(default)]
    pub steps: Vec<TimedStep>,
}

fn default_workspaces() -> usize {
    1
}

/// A step and the loop time it happens at
#[derive(Debug, Deserialize)]
pub struct TimedStep {
    #[serde(default)]
    pub at: Millis,
    #[serde(flatten)]
    pub step: Step,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "step", rename_all = "kebab-case")]
pub enum Step {
    /// The user focuses a window somewhere in the shell
    Focus { window: WindowId },
    ClearFocus,
    Overview { visible: bool },
    SwitchWorkspace { index: WorkspaceIndex },
    AddWindow { window: WindowInfo },
    RemoveWindow { window: WindowId },
    LaunchApp { app: AppId },
    /// A menu item or other direct command
    Run { command: Command },
    Click { button: PointerButton },
    Scroll { direction: ScrollDirection },
    Keybinding { name: String },
    Settings { settings: Settings },
}

/// Final state after a replay
#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Report {
    pub view: Option<IndicatorView>,
    pub renders: usize,
    pub recomputes: u64,
    pub idle_mode: Option<IdleMode>,
    pub focus: Option<WindowId>,
    pub active_workspace: WorkspaceIndex,
    pub hidden: Vec<WindowId>,
    pub last_minimized: Option<WindowId>,
    pub notifications: Vec<(String, String)>,
    pub errors: Vec<String>,
}

impl Scenario {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Replay every step, then let pending timers run out.
    pub fn run(self) -> Report {
        let ws = MemoryWindowSystem::new(self.workspaces);
        for app in self.apps {
            ws.add_app(app);
        }
        for window in self.windows {
            ws.add_window(window);
        }
        if let Some(id) = self.focus {
            ws.user_focus(id);
        }
        ws.drain_events();

        let mut indicator =
            Indicator::with_timings(ws, RecordingSurface::new(), self.settings, self.timings);
        let mut errors = Vec::new();
        let mut now = 0;

        for TimedStep { at, step } in self.steps {
            now = now.max(at);
            indicator.tick(now);
            debug!(now, ?step, "step");
            if let Err(err) = apply(&mut indicator, step, now) {
                warn!(now, error = %err, "step failed");
                errors.push(format!("{}: {}", now, err));
            }
            pump(&mut indicator, now);
        }

        while let Some(deadline) = indicator.next_deadline() {
            indicator.tick(deadline);
            pump(&mut indicator, deadline);
        }
        report(&indicator, errors)
    }
}

fn apply(indicator: &mut Replay, step: Step, now: Millis) -> SwitcherResult<()> {
    match step {
        Step::Focus { window } => indicator.window_system().user_focus(window),
        Step::ClearFocus => indicator.window_system().clear_focus(),
        Step::Overview { visible } => indicator.window_system().set_overview(visible),
        Step::SwitchWorkspace { index } => indicator.window_system().set_active_workspace(index),
        Step::AddWindow { window } => indicator.window_system().add_window(window),
        Step::RemoveWindow { window } => indicator.window_system().remove_window(window),
        Step::LaunchApp { app } => indicator.window_system().start_app(&app),
        Step::Run { command } => return indicator.execute(command, now),
        Step::Click { button } => indicator.handle_click(button, now),
        Step::Scroll { direction } => {
            if !indicator.handle_scroll(direction, now) {
                debug!(?direction, "scroll ignored");
            }
        }
        Step::Keybinding { name } => {
            if !indicator.handle_keybinding(&name, now) {
                return Err(SwitcherError::KeybindingRefused(name));
            }
        }
        Step::Settings { settings } => indicator.apply_settings(settings),
    }
    Ok(())
}

/// Deliver queued shell events until the window system goes quiet.
fn pump(indicator: &mut Replay, now: Millis) {
    loop {
        let events = indicator.window_system().drain_events();
        if events.is_empty() {
            break;
        }
        for event in events {
            indicator.handle_event(event, now);
        }
    }
}

fn report(indicator: &Replay, errors: Vec<String>) -> Report {
    let ws = indicator.window_system();
    Report {
        view: indicator.view().cloned(),
        renders: indicator.surface().render_count(),
        recomputes: indicator.recompute_count(),
        idle_mode: indicator.idle_mode(),
        focus: ws.focus_window(),
        active_workspace: ws.active_workspace(),
        hidden: indicator.visibility().hidden().windows().to_vec(),
        last_minimized: indicator.visibility().last_minimized(),
        notifications: indicator.surface().notifications(),
        errors,
    }
}
