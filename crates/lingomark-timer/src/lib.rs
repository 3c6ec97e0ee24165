//! lingomark-timer: Quiz countdown state machine.
//!
//! [`QuizTimer`] is a synchronous state machine that knows nothing about
//! wall-clock time. [`run_timer`] drives it from any [`TickSource`], which
//! keeps tests free of real waits.

pub mod driver;
pub mod error;
pub mod format;
pub mod state;
pub mod ticks;

pub use driver::{run_timer, RunOutcome, TimerCommand};
pub use error::ThresholdError;
pub use format::format_remaining;
pub use state::{
    NoopObserver, QuizTimer, Threshold, Thresholds, TimerObserver, TimerPhase, TimerSnapshot,
};
pub use ticks::{IntervalTicks, ScriptedTicks, TickSource};
