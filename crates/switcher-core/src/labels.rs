//! Window menu terminology
//!
//! The shell's own window menu calls minimizing "Hide" and moves windows
//! without switching workspace. The host integration layer runs each of
//! its labels through [`window_menu_label`] so both menus use the same
//! words as the indicator.

/// Replacement for a host window-menu label, if it needs one
pub fn window_menu_label(label: &str) -> Option<&'static str> {
    match label {
        "Hide" => Some("Minimize"),
        "Move to Workspace Left" => Some("Send to Workspace Left"),
        "Move to Workspace Right" => Some("Send to Workspace Right"),
        "Move to Workspace Up" => Some("Send to Workspace Up"),
        "Move to Workspace Down" => Some("Send to Workspace Down"),
        _ => None,
    }
}
