//! Core type definitions for the switcher
//!
//! This module centralizes the identifiers and small value types used
//! throughout the crate for consistency and discoverability.
//!
//! Windows and applications are never owned here. The core only holds
//! these identifiers as back-references and re-resolves them against the
//! [`WindowSystem`](crate::facade::WindowSystem) whenever it acts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque window identifier handed out by the host window system
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// Stable application identifier (a desktop-file id such as `org.gnome.Terminal.desktop`)
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(pub String);

impl AppId {
    /// Create an application id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AppId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Zero-based workspace index
///
/// User-visible text always shows `index + 1`.
pub type WorkspaceIndex = usize;

/// Host event timestamp used to order activations
///
/// This is the window system's own monotonic "current time" token, not
/// wall-clock time and not the loop clock below.
pub type Timestamp = u32;

/// Monotonic event-loop time in milliseconds
///
/// Supplied by the host on every entry point so timers stay deterministic.
pub type Millis = u64;
