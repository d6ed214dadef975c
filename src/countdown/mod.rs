//! Countdown core
//!
//! This module contains the countdown state machine, its state structures
//! and the rendering of the remaining time.

pub mod controller;
pub mod error;
pub mod format;
pub mod state;

// Re-export main types
pub use controller::{Countdown, FinishedHook, TickOutcome};
pub use error::CountdownError;
pub use format::{format_eta, STOP_TEXT};
pub use state::{CountdownSnapshot, Phase, Remaining, TimerHandle};
