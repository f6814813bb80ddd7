//! Fault-injection behaviours.
//!
//! # Data Flow
//! ```text
//! /health  → health.rs (flip flag, optionally grow) ──┐
//! /oom     → growth.rs (double + stream forever)    ──┴─ shared GrowthBuffer
//! /code/*  → status.rs (fixed or weighted random)
//! /echo    → echo.rs (format request metadata)
//! /timeout → delay.rs (sleep, then answer)
//! /crash   → crash.rs (TerminalAction → process exit)
//!
//! fail_after (no server) → countdown.rs → TerminalAction
//! ```
//!
//! # Design Decisions
//! - Handlers never fail; faults are the intended output
//! - All mutable state lives in `AppState`, never in globals

pub mod countdown;
pub mod crash;
pub mod delay;
pub mod echo;
pub mod growth;
pub mod health;
pub mod status;

pub use countdown::{countdown, DelayedExitConfig};
pub use crash::{CrashTrigger, TerminalAction};
pub use delay::DelayResponder;
pub use growth::{GrowthBuffer, SharedGrowth};
pub use health::{HealthReport, HealthState, HealthStatus};
pub use status::{CodeReply, StatusCodeSource};
