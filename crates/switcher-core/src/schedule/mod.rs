//! Update scheduling
//!
//! The host loop supplies time; nothing here reads a clock. Timers are
//! plain deadlines that [`Indicator::tick`](crate::Indicator::tick) pops
//! and dispatches by purpose.

mod idle;
mod timers;

pub use idle::{IdleDisplay, IdleMode};
pub use timers::{TimerPurpose, Timers};

use crate::config::Timings;
use crate::types::Millis;

/// Debounce a display refresh: every call restarts the update timer.
pub fn schedule_update(timers: &mut Timers, now: Millis, timings: &Timings) -> Millis {
    timers.arm(TimerPurpose::Update, now, timings.update_debounce)
}
