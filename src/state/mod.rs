//! State management module
//!
//! This module contains the shared application state and the finished
//! notifications it publishes.

pub mod app_state;
pub mod finished;

// Re-export main types
pub use app_state::AppState;
pub use finished::{FinishedEvent, FinishedNotifier};
