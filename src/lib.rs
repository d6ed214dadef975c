//! ETA Countdown - A countdown controller served over HTTP
//!
//! This library provides a countdown state machine that renders the
//! remaining time as `eta M:SS` into named displays once per second and
//! notifies its host when the countdown reaches zero.

pub mod config;
pub mod countdown;
pub mod display;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use countdown::{Countdown, CountdownError, CountdownSnapshot, FinishedHook};
pub use display::{DisplayBoard, DisplaySink, DisplayTargets};
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
