//! Tick sources that drive a [`QuizTimer`](crate::QuizTimer).

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{interval_at, Instant, Interval};

/// A periodic wake-up.
#[async_trait]
pub trait TickSource: Send {
    /// Wait for the next tick. Returns `false` once the source is exhausted.
    ///
    /// Must be cancel-safe: [`run_timer`](crate::run_timer) drops the
    /// pending future whenever a command arrives first, and a tick that was
    /// not yet returned must still be delivered by the next call.
    async fn next_tick(&mut self) -> bool;
}

/// Wall-clock ticks from a tokio interval.
///
/// The first tick arrives one full period after construction, so a timer
/// started alongside it loses its first second after one second.
pub struct IntervalTicks {
    interval: Interval,
}

impl IntervalTicks {
    pub fn new(period: Duration) -> Self {
        Self {
            interval: interval_at(Instant::now() + period, period),
        }
    }

    /// One tick per second.
    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[async_trait]
impl TickSource for IntervalTicks {
    async fn next_tick(&mut self) -> bool {
        self.interval.tick().await;
        true
    }
}

/// A fixed number of immediate ticks, then exhaustion.
#[derive(Debug, Clone)]
pub struct ScriptedTicks {
    remaining: usize,
}

impl ScriptedTicks {
    pub fn new(count: usize) -> Self {
        Self { remaining: count }
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

#[async_trait]
impl TickSource for ScriptedTicks {
    async fn next_tick(&mut self) -> bool {
        tokio::task::yield_now().await;
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}
