//! Delayed self-termination (`fail_after`).
//!
//! Not an HTTP fault: the whole program is a blocking countdown that ends in
//! a [`TerminalAction`]. Progress lines go to the given writer (stdout in the
//! binary) so the log filter cannot hide them.

use std::io::Write;
use std::time::Duration;

use crate::faults::crash::{TerminalAction, DEFAULT_EXIT_CODE};

/// Settings for the `fail_after` mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayedExitConfig {
    pub duration_seconds: u32,
    pub exit_code: u8,
}

impl Default for DelayedExitConfig {
    fn default() -> Self {
        Self {
            duration_seconds: 10,
            exit_code: DEFAULT_EXIT_CODE,
        }
    }
}

/// Count down once per second, then hand back the exit action.
///
/// `sleep` is called once per elapsed second; the binary passes
/// `std::thread::sleep` and stdout. Write errors are ignored: the exit
/// happens regardless.
pub fn countdown<W, F>(config: DelayedExitConfig, out: &mut W, mut sleep: F) -> TerminalAction
where
    W: Write,
    F: FnMut(Duration),
{
    let mut remaining = config.duration_seconds;
    let _ = writeln!(out, "Starting application: will fail in {} seconds", remaining);
    tracing::debug!(seconds = remaining, "Countdown started");

    while remaining > 0 {
        sleep(Duration::from_secs(1));
        remaining -= 1;
        let _ = writeln!(out, "Will fail in {} seconds", remaining);
        tracing::debug!(seconds = remaining, "Countdown tick");
    }

    let _ = writeln!(out, "Will fail now!");
    let _ = out.flush();
    tracing::debug!(exit_code = config.exit_code, "Countdown finished");
    TerminalAction::Exit(config.exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sleeps_once_per_second() {
        let mut slept = Vec::new();
        let action = countdown(
            DelayedExitConfig { duration_seconds: 3, exit_code: 7 },
            &mut std::io::sink(),
            |d| slept.push(d),
        );
        assert_eq!(slept, vec![Duration::from_secs(1); 3]);
        assert_eq!(action, TerminalAction::Exit(7));
    }

    #[test]
    fn test_reports_remaining_time_to_writer() {
        let mut out = Vec::new();
        countdown(DelayedExitConfig { duration_seconds: 2, exit_code: 3 }, &mut out, |_| {});
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text.lines().collect::<Vec<_>>(),
            vec![
                "Starting application: will fail in 2 seconds",
                "Will fail in 1 seconds",
                "Will fail in 0 seconds",
                "Will fail now!",
            ]
        );
    }

    #[test]
    fn test_zero_duration_exits_immediately() {
        let mut calls = 0;
        let mut out = Vec::new();
        let action = countdown(
            DelayedExitConfig { duration_seconds: 0, exit_code: 1 },
            &mut out,
            |_| calls += 1,
        );
        assert_eq!(calls, 0);
        assert_eq!(action.exit_code(), 1);
        assert!(String::from_utf8(out).unwrap().ends_with("Will fail now!\n"));
    }

    #[test]
    fn test_defaults() {
        let config = DelayedExitConfig::default();
        assert_eq!(config.duration_seconds, 10);
        assert_eq!(config.exit_code, 255);
    }
}
