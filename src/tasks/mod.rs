//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod finish_action;
pub mod ticker;

// Re-export main types
pub use finish_action::{finish_action_task, FinishAction};
pub use ticker::{Command, CountdownHandle, CountdownTask, TICK_PERIOD};
