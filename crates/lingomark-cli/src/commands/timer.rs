//! The `lingomark timer` command.
//!
//! Reads `p`, `r`, and `q` lines from stdin to pause, resume, and quit.

use std::path::PathBuf;

use std::io::BufRead;

use anyhow::Result;
use tokio::sync::mpsc;

use lingomark_timer::{
    format_remaining, run_timer, IntervalTicks, QuizTimer, RunOutcome, Threshold, TimerCommand,
    TimerObserver,
};

use crate::config::load_config_from;

/// Prints countdown progress to stderr.
struct ConsoleObserver;

impl TimerObserver for ConsoleObserver {
    fn on_tick(&mut self, remaining_seconds: u64) {
        eprintln!("  {}", format_remaining(remaining_seconds));
    }

    fn on_threshold_warning(&mut self, threshold: Threshold, remaining_seconds: u64) {
        eprintln!(
            "  WARNING: {threshold} mark, {} left",
            format_remaining(remaining_seconds)
        );
    }

    fn on_expire(&mut self) {
        eprintln!("  Time is up!");
    }
}

fn parse_command(line: &str) -> Option<TimerCommand> {
    match line.trim().to_lowercase().as_str() {
        "p" | "pause" => Some(TimerCommand::Pause),
        "r" | "resume" => Some(TimerCommand::Resume),
        "q" | "quit" | "stop" => Some(TimerCommand::Stop),
        _ => None,
    }
}

pub async fn execute(seconds: u64, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let thresholds = config.timer.thresholds()?;

    let (tx, mut rx) = mpsc::channel(8);

    // Blocking stdin reads stay off the runtime's blocking pool.
    let stdin_tx = tx.clone();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines().map_while(|line| line.ok()) {
            match parse_command(&line) {
                Some(command) => {
                    if stdin_tx.blocking_send(command).is_err() {
                        break;
                    }
                }
                None => eprintln!("  (p = pause, r = resume, q = quit)"),
            }
        }
    });

    let signal_tx = tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = signal_tx.send(TimerCommand::Stop).await;
        }
    });

    let mut timer = QuizTimer::with_thresholds(thresholds, ConsoleObserver);
    timer.start(seconds);
    eprintln!("Timer started: {}", format_remaining(seconds));

    let outcome = run_timer(&mut timer, &mut IntervalTicks::every_second(), &mut rx).await;
    drop(tx);

    match outcome {
        RunOutcome::Expired => println!("Time is up after {}.", format_remaining(seconds)),
        RunOutcome::Stopped | RunOutcome::Cancelled | RunOutcome::TicksExhausted => println!(
            "Timer stopped with {} left.",
            format_remaining(timer.remaining_seconds())
        ),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stdin_commands() {
        assert_eq!(parse_command("p"), Some(TimerCommand::Pause));
        assert_eq!(parse_command(" Resume \n"), Some(TimerCommand::Resume));
        assert_eq!(parse_command("q"), Some(TimerCommand::Stop));
        assert_eq!(parse_command("later"), None);
    }
}
