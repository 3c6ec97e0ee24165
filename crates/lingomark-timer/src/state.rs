//! Quiz timer state machine.
//!
//! `Idle → Running ⇄ Paused → Expired`. Every operation is valid in every
//! phase; calls that make no sense in the current phase are no-ops, since
//! hosts call them defensively.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ThresholdError;
use crate::format::format_remaining;

/// Lifecycle phase of a [`QuizTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
    Expired,
}

/// A one-time warning boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Threshold {
    FiveMinute,
    OneMinute,
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::FiveMinute => write!(f, "five-minute"),
            Threshold::OneMinute => write!(f, "one-minute"),
        }
    }
}

/// Remaining-time boundaries, in seconds, at which warnings fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    five_minute: u64,
    one_minute: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            five_minute: 300,
            one_minute: 60,
        }
    }
}

impl Thresholds {
    pub fn new(five_minute: u64, one_minute: u64) -> Result<Self, ThresholdError> {
        if five_minute == 0 || one_minute == 0 {
            return Err(ThresholdError::Zero);
        }
        if one_minute >= five_minute {
            return Err(ThresholdError::Misordered {
                five_minute,
                one_minute,
            });
        }
        Ok(Self {
            five_minute,
            one_minute,
        })
    }

    pub fn seconds(&self, threshold: Threshold) -> u64 {
        match threshold {
            Threshold::FiveMinute => self.five_minute,
            Threshold::OneMinute => self.one_minute,
        }
    }
}

/// Callbacks raised by a [`QuizTimer`].
pub trait TimerObserver {
    /// Called after every effective tick.
    fn on_tick(&mut self, _remaining_seconds: u64) {}

    /// Called at most once per threshold per session.
    fn on_threshold_warning(&mut self, _threshold: Threshold, _remaining_seconds: u64) {}

    /// Called exactly once, on the tick that reaches zero.
    fn on_expire(&mut self);
}

/// Observer that ignores every callback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl TimerObserver for NoopObserver {
    fn on_expire(&mut self) {}
}

/// Point-in-time view of a timer for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: TimerPhase,
    pub remaining_seconds: u64,
    pub total_seconds: u64,
    pub blink: bool,
    pub warnings_fired: Vec<Threshold>,
    /// `remaining_seconds` formatted for display.
    pub display: String,
}

impl TimerSnapshot {
    /// Fraction of the session still remaining, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.total_seconds == 0 {
            return 0.0;
        }
        self.remaining_seconds as f64 / self.total_seconds as f64
    }

    pub fn running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    pub fn paused(&self) -> bool {
        self.phase == TimerPhase::Paused
    }
}

/// A countdown for one timed quiz attempt.
#[derive(Debug)]
pub struct QuizTimer<O: TimerObserver = NoopObserver> {
    phase: TimerPhase,
    remaining_seconds: u64,
    total_seconds: u64,
    thresholds: Thresholds,
    warnings_fired: BTreeSet<Threshold>,
    blink: bool,
    expiry_notified: bool,
    observer: O,
}

impl<O: TimerObserver> QuizTimer<O> {
    pub fn new(observer: O) -> Self {
        Self::with_thresholds(Thresholds::default(), observer)
    }

    pub fn with_thresholds(thresholds: Thresholds, observer: O) -> Self {
        Self {
            phase: TimerPhase::Idle,
            remaining_seconds: 0,
            total_seconds: 0,
            thresholds,
            warnings_fired: BTreeSet::new(),
            blink: false,
            expiry_notified: false,
            observer,
        }
    }

    /// Begin the countdown. Only valid from `Idle`.
    pub fn start(&mut self, total_seconds: u64) -> bool {
        if self.phase != TimerPhase::Idle {
            tracing::debug!("start ignored in phase {:?}", self.phase);
            return false;
        }
        self.total_seconds = total_seconds;
        self.remaining_seconds = total_seconds;
        self.warnings_fired.clear();
        self.blink = false;
        self.expiry_notified = false;
        self.phase = TimerPhase::Running;
        tracing::debug!("timer started with {total_seconds}s");
        true
    }

    /// Advance the countdown by one second. Only valid while `Running`.
    pub fn tick(&mut self) {
        if self.phase != TimerPhase::Running {
            tracing::debug!("tick ignored in phase {:?}", self.phase);
            return;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        self.evaluate_thresholds();

        if self.remaining_seconds > 0
            && self.remaining_seconds <= self.thresholds.seconds(Threshold::OneMinute)
        {
            self.blink = !self.blink;
        }

        self.observer.on_tick(self.remaining_seconds);

        if self.remaining_seconds == 0 {
            self.expire();
        }
    }

    fn evaluate_thresholds(&mut self) {
        for threshold in [Threshold::FiveMinute, Threshold::OneMinute] {
            let boundary = self.thresholds.seconds(threshold);
            // Sessions that begin inside a window never get its warning.
            if self.total_seconds <= boundary || self.remaining_seconds > boundary {
                continue;
            }
            if self.warnings_fired.insert(threshold) {
                tracing::info!(
                    "{threshold} warning at {}",
                    format_remaining(self.remaining_seconds)
                );
                self.observer
                    .on_threshold_warning(threshold, self.remaining_seconds);
            }
        }
    }

    fn expire(&mut self) {
        self.phase = TimerPhase::Expired;
        self.blink = false;
        if !self.expiry_notified {
            self.expiry_notified = true;
            tracing::info!("timer expired after {}s", self.total_seconds);
            self.observer.on_expire();
        }
    }

    /// Suspend ticking. Only valid while `Running`.
    pub fn pause(&mut self) -> bool {
        if self.phase != TimerPhase::Running {
            tracing::debug!("pause ignored in phase {:?}", self.phase);
            return false;
        }
        self.phase = TimerPhase::Paused;
        true
    }

    /// Continue ticking. Only valid while `Paused`.
    pub fn resume(&mut self) -> bool {
        if self.phase != TimerPhase::Paused {
            tracing::debug!("resume ignored in phase {:?}", self.phase);
            return false;
        }
        self.phase = TimerPhase::Running;
        true
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == TimerPhase::Paused
    }

    pub fn blink(&self) -> bool {
        self.blink
    }

    pub fn warning_fired(&self, threshold: Threshold) -> bool {
        self.warnings_fired.contains(&threshold)
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            remaining_seconds: self.remaining_seconds,
            total_seconds: self.total_seconds,
            blink: self.blink,
            warnings_fired: self.warnings_fired.iter().copied().collect(),
            display: format_remaining(self.remaining_seconds),
        }
    }
}
