//! Async driver connecting a tick source to a timer.

use tokio::sync::mpsc;

use crate::state::{QuizTimer, TimerObserver, TimerPhase};
use crate::ticks::TickSource;

/// Host requests delivered while a timer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Pause,
    Resume,
    Stop,
}

/// Why [`run_timer`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The countdown reached zero.
    Expired,
    /// The host sent [`TimerCommand::Stop`].
    Stopped,
    /// Every command sender was dropped.
    Cancelled,
    /// The tick source has no more ticks.
    TicksExhausted,
}

/// Drive `timer` until it expires or the host goes away.
///
/// The timer should already be started; ticks delivered while it is idle or
/// paused are ignored by the timer itself. Pending commands are always
/// handled before the next tick.
pub async fn run_timer<O, S>(
    timer: &mut QuizTimer<O>,
    ticks: &mut S,
    commands: &mut mpsc::Receiver<TimerCommand>,
) -> RunOutcome
where
    O: TimerObserver + Send,
    S: TickSource,
{
    loop {
        if timer.phase() == TimerPhase::Expired {
            return RunOutcome::Expired;
        }

        tokio::select! {
            biased;

            command = commands.recv() => match command {
                Some(TimerCommand::Pause) => {
                    timer.pause();
                }
                Some(TimerCommand::Resume) => {
                    timer.resume();
                }
                Some(TimerCommand::Stop) => {
                    tracing::debug!("timer stopped with {}s left", timer.remaining_seconds());
                    return RunOutcome::Stopped;
                }
                None => {
                    tracing::debug!("timer host dropped, cancelling");
                    return RunOutcome::Cancelled;
                }
            },
            more = ticks.next_tick() => {
                if !more {
                    return RunOutcome::TicksExhausted;
                }
                timer.tick();
            }
        }
    }
}
