//! Classic App Switcher core
//!
//! This crate provides the state behind a panel indicator that shows the
//! focused application and hides, shows and activates applications:
//! - Focus tracking with a grace period for launching apps
//! - Hide/show and minimize/unminimize bookkeeping
//! - Multi-window activation with predictable stacking
//! - Debounced refresh and the idle display state machine
//! - Menu models, click/scroll routing and global keybindings
//!
//! ## Architecture
//!
//! - [`facade`]: The [`WindowSystem`] seam to the host shell, plus an in-memory implementation
//! - [`surface`]: The [`PanelSurface`] seam to the widget layer
//! - [`focus`]: Which application the indicator displays
//! - [`hidden`]: Windows hidden or minimized through the indicator
//! - [`activation`]: Raising an application's windows in recency order
//! - [`schedule`]: Deadline timers, update debounce and idle display
//! - [`view`]: Panel label and menu models
//! - [`indicator`]: The [`Indicator`] tying all of the above together
//!
//! ## Example
//!
//! ```rust
//! use switcher_core::{
//!     AppInfo, Indicator, MemoryWindowSystem, RecordingSurface, Settings, WindowId, WindowInfo,
//! };
//!
//! let ws = MemoryWindowSystem::new(2);
//! ws.add_app(AppInfo::new("org.gnome.Nautilus", "Files"));
//! ws.add_window(WindowInfo::normal(WindowId(1), "org.gnome.Nautilus", 0));
//! ws.user_focus(WindowId(1));
//!
//! let indicator = Indicator::new(ws, RecordingSurface::new(), Settings::default());
//! assert_eq!(indicator.view().unwrap().label.text(), "Files");
//! ```
//!
//! ## Design Principles
//!
//! 1. **Single-threaded**: Everything runs on the host's main loop
//! 2. **Time Abstraction**: Timers are deadlines against host-supplied time
//! 3. **Snapshot Queries**: Window and app state is read fresh on every use

pub mod activation;
pub mod commands;
pub mod config;
pub mod error;
pub mod facade;
pub mod focus;
pub mod hidden;
pub mod indicator;
pub mod labels;
pub mod placement;
pub mod schedule;
pub mod surface;
pub mod types;
pub mod view;

// Re-export core types for convenience
pub use commands::{shortcut_command, Command, Shortcut, SHORTCUTS};
pub use config::{PanelBox, Settings, Timings};
pub use error::{SwitcherError, SwitcherResult};
pub use facade::{
    AppInfo, AppState, FacadeCall, MemoryWindowSystem, ShellEvent, ShellSignal, SignalHandle,
    WindowInfo, WindowSystem, WindowType,
};
pub use hidden::WindowMark;
pub use indicator::{Indicator, PointerButton, ScrollDirection};
pub use labels::window_menu_label;
pub use placement::WorkspaceGesture;
pub use schedule::{IdleMode, TimerPurpose};
pub use surface::{MenuKind, PanelSurface, RecordingSurface, SurfaceCall};
pub use types::{AppId, Millis, Timestamp, WindowId, WorkspaceIndex};
pub use view::{ContextMenuModel, IndicatorView, PanelLabel, SwitcherMenuModel};
