//! Abrupt process termination.
//!
//! # Responsibilities
//! - Model "kill the process now" as a value, not an error
//! - Exit immediately when the server runtime turns it into a response
//!
//! # Design Decisions
//! - No response is written: the connection dies with the process
//! - Graceful shutdown and connection draining are skipped

use axum::response::{IntoResponse, Response};

/// Default exit code for `/crash` and `fail_after`.
pub const DEFAULT_EXIT_CODE: u8 = 255;

/// An action that ends the process instead of producing a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalAction {
    Exit(u8),
}

impl TerminalAction {
    pub fn exit_code(&self) -> i32 {
        match self {
            TerminalAction::Exit(code) => i32::from(*code),
        }
    }

    /// Terminate the process. Never returns.
    pub fn execute(self) -> ! {
        let code = self.exit_code();
        tracing::warn!(exit_code = code, "Terminating process now");
        std::process::exit(code)
    }
}

// The runtime converts handler output into a response; for a terminal action
// that conversion is where the process ends.
impl IntoResponse for TerminalAction {
    fn into_response(self) -> Response {
        self.execute()
    }
}

/// Produces the terminal action for `/crash`.
#[derive(Debug, Clone, Copy)]
pub struct CrashTrigger {
    exit_code: u8,
}

impl CrashTrigger {
    pub fn new(exit_code: u8) -> Self {
        Self { exit_code }
    }

    pub fn trigger(&self) -> TerminalAction {
        tracing::error!(exit_code = self.exit_code, "Crash requested");
        TerminalAction::Exit(self.exit_code)
    }
}

impl Default for CrashTrigger {
    fn default() -> Self {
        Self::new(DEFAULT_EXIT_CODE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_yields_exit_action() {
        let action = CrashTrigger::default().trigger();
        assert_eq!(action, TerminalAction::Exit(255));
        assert_eq!(action.exit_code(), 255);
    }

    #[test]
    fn test_custom_exit_code() {
        assert_eq!(CrashTrigger::new(3).trigger().exit_code(), 3);
    }
}
