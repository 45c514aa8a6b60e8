//! Indicator Flow Integration Tests
//!
//! Drives an indicator against the in-memory window system, delivering the
//! events the shell would emit the way a host main loop does.

use switcher_core::{
    AppId, AppInfo, Command, FacadeCall, IdleMode, Indicator, MemoryWindowSystem, Millis,
    PanelLabel, PointerButton, RecordingSurface, ScrollDirection, Settings, SwitcherError,
    TimerPurpose, WindowId, WindowInfo, WindowSystem, WorkspaceGesture,
};

type TestIndicator = Indicator<MemoryWindowSystem, RecordingSurface>;

fn start(ws: MemoryWindowSystem) -> TestIndicator {
    ws.drain_events();
    Indicator::new(ws, RecordingSurface::new(), Settings::default())
}

/// Deliver queued shell events until the window system goes quiet.
fn pump(ind: &mut TestIndicator, now: Millis) {
    loop {
        let events = ind.window_system().drain_events();
        if events.is_empty() {
            break;
        }
        for event in events {
            ind.handle_event(event, now);
        }
    }
}

fn three_apps() -> MemoryWindowSystem {
    let ws = MemoryWindowSystem::new(1);
    ws.add_app(AppInfo::new("a", "Alpha"));
    ws.add_app(AppInfo::new("b", "Beta"));
    ws.add_app(AppInfo::new("c", "Gamma"));
    ws.add_window(WindowInfo::normal(WindowId(1), "a", 0));
    ws.add_window(WindowInfo::normal(WindowId(2), "b", 0));
    ws.add_window(WindowInfo::normal(WindowId(3), "c", 0));
    ws.user_focus(WindowId(1));
    ws
}

// ========== Activation ==========

/// Activating an app raises its windows oldest first so the newest ends on top.
#[test]
fn test_activate_app_raise_order() {
    let ws = MemoryWindowSystem::new(1);
    ws.add_app(AppInfo::new("ed", "Editor"));
    ws.add_app(AppInfo::new("term", "Terminal"));
    for id in 1..=5 {
        ws.add_window(WindowInfo::normal(WindowId(id), "ed", 0));
    }
    ws.add_window(WindowInfo::normal(WindowId(6), "term", 0));
    ws.user_focus(WindowId(6));
    let mut ind = start(ws);
    ind.window_system().clear_calls();

    ind.execute(
        Command::ActivateApplication {
            app: AppId::new("ed"),
        },
        0,
    )
    .unwrap();

    let ws = ind.window_system();
    assert_eq!(
        ws.activations(),
        vec![WindowId(1), WindowId(2), WindowId(3), WindowId(4), WindowId(5)]
    );
    assert_eq!(ws.focus_window(), Some(WindowId(5)));
    assert_eq!(ws.stack()[0], WindowId(5));

    let times: Vec<_> = ws
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            FacadeCall::Activate(_, t) => Some(t),
            _ => None,
        })
        .collect();
    assert!(times.windows(2).all(|pair| pair[0] == pair[1]));
}

/// Only minimized windows are restored when some exist.
#[test]
fn test_activate_app_restores_minimized_only() {
    let ws = MemoryWindowSystem::new(1);
    ws.add_app(AppInfo::new("ed", "Editor"));
    ws.add_window(WindowInfo::normal(WindowId(1), "ed", 0).minimized());
    ws.add_window(WindowInfo::normal(WindowId(2), "ed", 0));
    ws.add_window(WindowInfo::normal(WindowId(3), "ed", 0).minimized());
    let mut ind = start(ws);
    ind.window_system().clear_calls();

    ind.execute(
        Command::ActivateApplication {
            app: AppId::new("ed"),
        },
        0,
    )
    .unwrap();

    let ws = ind.window_system();
    assert_eq!(ws.activations(), vec![WindowId(1), WindowId(3)]);
    assert!(!ws.is_minimized(WindowId(1)));
    assert!(!ws.is_minimized(WindowId(3)));
    assert_eq!(ws.focus_window(), Some(WindowId(3)));
}

// ========== Hide / Show ==========

#[test]
fn test_hide_others_then_show_recent() {
    let mut ind = start(three_apps());

    ind.execute(Command::HideOthers, 0).unwrap();
    pump(&mut ind, 0);

    assert!(!ind.window_system().is_minimized(WindowId(1)));
    assert!(ind.window_system().is_minimized(WindowId(2)));
    assert!(ind.window_system().is_minimized(WindowId(3)));
    assert_eq!(
        ind.visibility().hidden().windows(),
        &[WindowId(3), WindowId(2)]
    );
    assert_eq!(ind.visibility().hidden().app(), None);

    ind.window_system().clear_calls();
    ind.execute(Command::ShowRecentApp, 10).unwrap();
    pump(&mut ind, 10);

    assert!(!ind.window_system().is_minimized(WindowId(2)));
    assert!(!ind.window_system().is_minimized(WindowId(3)));
    assert!(ind.visibility().hidden().is_empty());
    assert_eq!(
        ind.window_system().activations(),
        vec![WindowId(2), WindowId(3)]
    );
}

#[test]
fn test_hide_app_moves_label_on() {
    let mut ind = start(three_apps());
    assert_eq!(ind.view().unwrap().label.text(), "Alpha");

    ind.execute(Command::HideCurrentApp, 0).unwrap();
    pump(&mut ind, 0);
    ind.tick(100);

    assert_eq!(ind.visibility().hidden().app(), Some(&AppId::new("a")));
    assert_eq!(ind.window_system().focus_window(), Some(WindowId(3)));
    assert_eq!(ind.view().unwrap().label.text(), "Gamma");
}

/// Focusing one hidden window from elsewhere reveals the rest of its app.
#[test]
fn test_external_focus_reveals_hidden_siblings() {
    let ws = MemoryWindowSystem::new(1);
    ws.add_app(AppInfo::new("a", "Alpha"));
    ws.add_app(AppInfo::new("b", "Beta"));
    ws.add_window(WindowInfo::normal(WindowId(1), "a", 0));
    ws.add_window(WindowInfo::normal(WindowId(2), "a", 0));
    ws.add_window(WindowInfo::normal(WindowId(3), "b", 0));
    ws.user_focus(WindowId(1));
    let mut ind = start(ws);

    ind.execute(Command::HideCurrentApp, 0).unwrap();
    pump(&mut ind, 0);
    assert_eq!(ind.visibility().hidden().windows().len(), 2);

    ind.window_system().user_focus(WindowId(2));
    pump(&mut ind, 50);

    assert!(!ind.window_system().is_minimized(WindowId(1)));
    assert!(!ind.window_system().is_minimized(WindowId(2)));
    assert!(ind.visibility().hidden().is_empty());
}

#[test]
fn test_show_all_clears_tracking() {
    let mut ind = start(three_apps());
    ind.execute(Command::HideOthers, 0).unwrap();
    ind.execute(Command::MinimizeCurrentWindow, 0).unwrap();
    pump(&mut ind, 0);

    ind.execute(Command::ShowAll, 10).unwrap();
    pump(&mut ind, 10);

    let ws = ind.window_system();
    assert!((1..=3).all(|id| !ws.is_minimized(WindowId(id))));
    assert!(ind.visibility().hidden().is_empty());
}

// ========== Minimize ==========

#[test]
fn test_minimize_and_unminimize_recent() {
    let mut ind = start(three_apps());
    assert!(ind.handle_keybinding("minimize-current-window", 0));
    pump(&mut ind, 0);
    assert!(ind.window_system().is_minimized(WindowId(1)));
    assert_eq!(ind.visibility().last_minimized(), Some(WindowId(1)));

    assert!(ind.handle_keybinding("unminimize-recent-window", 10));
    pump(&mut ind, 10);
    assert!(!ind.window_system().is_minimized(WindowId(1)));
    assert_eq!(ind.window_system().focus_window(), Some(WindowId(1)));
    assert_eq!(ind.visibility().last_minimized(), None);
}

#[test]
fn test_external_unminimize_forgets_last_minimized() {
    let mut ind = start(three_apps());
    ind.execute(Command::MinimizeCurrentWindow, 0).unwrap();
    pump(&mut ind, 0);

    ind.window_system().user_focus(WindowId(1));
    pump(&mut ind, 10);
    assert_eq!(ind.visibility().last_minimized(), None);

    ind.window_system().clear_calls();
    ind.execute(Command::UnminimizeRecentWindow, 20).unwrap();
    assert!(ind.window_system().activations().is_empty());
}

// ========== Debounce and Timers ==========

#[test]
fn test_hide_burst_renders_once() {
    let mut ind = start(three_apps());
    let before = ind.recompute_count();

    ind.execute(Command::HideOthers, 0).unwrap();
    pump(&mut ind, 0);
    ind.tick(99);
    assert_eq!(ind.recompute_count(), before);

    ind.tick(100);
    assert_eq!(ind.recompute_count(), before + 1);
    assert_eq!(ind.next_deadline(), None);
}

#[test]
fn test_idle_toggle_reverts_in_overview() {
    let ws = MemoryWindowSystem::new(2);
    let mut ind = start(ws);
    assert_eq!(ind.idle_mode(), Some(IdleMode::Desktop));
    assert_eq!(ind.view().unwrap().label, PanelLabel::Desktop);

    ind.window_system().set_overview(true);
    pump(&mut ind, 0);
    assert_eq!(ind.idle_mode(), Some(IdleMode::WorkspaceNumber));
    assert_eq!(
        ind.view().unwrap().label,
        PanelLabel::Workspace { number: 1 }
    );

    ind.handle_click(PointerButton::Primary, 10);
    assert_eq!(ind.view().unwrap().label, PanelLabel::NoApplications);
    assert_eq!(ind.surface().last_animate(), Some(false));
    assert_eq!(ind.timers().deadline(TimerPurpose::IdleRevert), Some(3010));

    ind.tick(3009);
    assert_eq!(ind.view().unwrap().label, PanelLabel::NoApplications);

    ind.tick(3010);
    assert_eq!(
        ind.view().unwrap().label,
        PanelLabel::Workspace { number: 1 }
    );
    assert_eq!(ind.surface().last_animate(), Some(true));
}

#[test]
fn test_idle_toggle_back_cancels_revert() {
    let mut ind = start(MemoryWindowSystem::new(1));

    ind.handle_click(PointerButton::Primary, 0);
    assert_eq!(ind.idle_mode(), Some(IdleMode::WorkspaceNumber));
    assert!(ind.timers().is_armed(TimerPurpose::IdleRevert));

    ind.handle_click(PointerButton::Primary, 5);
    assert_eq!(ind.idle_mode(), Some(IdleMode::Desktop));
    assert_eq!(ind.next_deadline(), None);
}

#[test]
fn test_overview_change_resets_idle() {
    let mut ind = start(MemoryWindowSystem::new(1));
    ind.handle_click(PointerButton::Primary, 0);

    ind.window_system().set_overview(true);
    pump(&mut ind, 100);
    assert_eq!(ind.idle_mode(), Some(IdleMode::WorkspaceNumber));
    assert!(!ind.timers().is_armed(TimerPurpose::IdleRevert));
}

// ========== Launch Gap ==========

#[test]
fn test_launch_gap_keeps_last_app_until_expiry() {
    let mut ind = start(three_apps());

    ind.window_system().start_app(&AppId::new("b"));
    ind.window_system().clear_focus();
    pump(&mut ind, 0);
    ind.tick(100);
    assert_eq!(ind.view().unwrap().label.text(), "Alpha");
    assert_eq!(ind.focus().pending_app(), Some(&AppId::new("b")));

    ind.tick(2000);
    assert_eq!(ind.focus().pending_app(), None);
    ind.tick(2100);
    assert_eq!(ind.view().unwrap().label, PanelLabel::Desktop);
}

#[test]
fn test_launched_app_arrives() {
    let mut ind = start(three_apps());
    ind.window_system().start_app(&AppId::new("b"));
    ind.window_system().clear_focus();
    pump(&mut ind, 0);

    ind.window_system().user_focus(WindowId(2));
    pump(&mut ind, 50);
    ind.tick(150);

    assert_eq!(ind.view().unwrap().label.text(), "Beta");
    assert_eq!(ind.focus().pending_app(), None);
    assert!(!ind.timers().is_armed(TimerPurpose::PendingApp));
}

// ========== Workspaces ==========

fn spread_over_three() -> MemoryWindowSystem {
    let ws = MemoryWindowSystem::new(3);
    ws.add_app(AppInfo::new("a", "Alpha"));
    ws.add_app(AppInfo::new("b", "Beta"));
    ws.add_window(WindowInfo::normal(WindowId(1), "a", 0).titled("Notes"));
    ws.add_window(WindowInfo::normal(WindowId(2), "a", 0));
    ws.add_window(WindowInfo::normal(WindowId(3), "b", 0));
    ws.user_focus(WindowId(1));
    ws
}

#[test]
fn test_send_app_stays_and_notifies() {
    let mut ind = start(spread_over_three());
    ind.handle_click(PointerButton::Primary, 0);

    ind.execute(
        Command::MoveAppToWorkspace {
            index: 2,
            gesture: WorkspaceGesture::Send,
        },
        0,
    )
    .unwrap();

    let ws = ind.window_system();
    assert_eq!(ws.window(WindowId(1)).unwrap().workspace, Some(2));
    assert_eq!(ws.window(WindowId(2)).unwrap().workspace, Some(2));
    assert_eq!(ws.window(WindowId(3)).unwrap().workspace, Some(0));
    assert_eq!(ws.active_workspace(), 0);
    assert!(!ind.is_menu_open(switcher_core::MenuKind::Switcher));
    assert_eq!(
        ind.surface().notifications(),
        vec![(
            "Application Moved".to_string(),
            "Alpha Sent to Workspace 3".to_string()
        )]
    );
}

#[test]
fn test_move_app_follows() {
    let mut ind = start(spread_over_three());
    ind.execute(
        Command::MoveAppToWorkspace {
            index: 1,
            gesture: WorkspaceGesture::Move,
        },
        0,
    )
    .unwrap();

    assert_eq!(ind.window_system().active_workspace(), 1);
    assert!(ind.surface().notifications().is_empty());
}

#[test]
fn test_send_window_notifies_with_title() {
    let mut ind = start(spread_over_three());
    ind.execute(
        Command::MoveWindowToWorkspace {
            index: 1,
            gesture: WorkspaceGesture::Send,
        },
        0,
    )
    .unwrap();

    assert_eq!(
        ind.window_system().window(WindowId(1)).unwrap().workspace,
        Some(1)
    );
    assert_eq!(
        ind.surface().notifications(),
        vec![(
            "Window Moved".to_string(),
            "Notes Sent to Workspace 2".to_string()
        )]
    );
}

#[test]
fn test_move_out_of_range() {
    let mut ind = start(spread_over_three());
    ind.window_system().clear_calls();

    assert_eq!(
        ind.execute(
            Command::MoveAppToWorkspace {
                index: 5,
                gesture: WorkspaceGesture::Move,
            },
            0,
        ),
        Err(SwitcherError::WorkspaceOutOfRange { index: 5, count: 3 })
    );
    assert!(ind.window_system().calls().is_empty());
}

// ========== Scroll ==========

#[test]
fn test_scroll_cycles_visible_apps() {
    let mut ind = start(three_apps());

    assert!(ind.handle_scroll(ScrollDirection::Down, 0));
    pump(&mut ind, 0);
    assert_eq!(ind.window_system().focus_window(), Some(WindowId(3)));

    assert!(ind.handle_scroll(ScrollDirection::Up, 10));
    pump(&mut ind, 10);
    assert_eq!(ind.window_system().focus_window(), Some(WindowId(2)));

    assert!(!ind.handle_scroll(ScrollDirection::Smooth, 20));
}

#[test]
fn test_scroll_needs_two_visible_apps() {
    let mut ind = start(three_apps());
    ind.execute(Command::HideOthers, 0).unwrap();
    pump(&mut ind, 0);

    assert!(!ind.handle_scroll(ScrollDirection::Down, 10));
}

// ========== Close / Quit ==========

#[test]
fn test_close_and_quit() {
    let mut ind = start(spread_over_three());
    ind.execute(Command::CloseCurrentWindow, 0).unwrap();
    pump(&mut ind, 0);
    assert!(ind.window_system().window(WindowId(1)).is_none());

    ind.window_system().user_focus(WindowId(2));
    pump(&mut ind, 10);
    ind.execute(Command::QuitCurrentApp, 10).unwrap();
    pump(&mut ind, 10);
    ind.tick(200);

    assert!(ind
        .window_system()
        .calls()
        .contains(&FacadeCall::RequestQuit(AppId::new("a"))));
    assert_eq!(ind.view().unwrap().label.text(), "Beta");
}

// ========== Settings ==========

#[test]
fn test_settings_reload_from_json() {
    let mut ind = start(three_apps());
    let settings = Settings::from_json(r#"{"show-label": false, "panel-box": "left"}"#).unwrap();
    ind.apply_settings(settings);

    let view = ind.view().unwrap();
    assert!(!view.show_label);
    assert_eq!(view.panel_box, switcher_core::PanelBox::Left);
}
