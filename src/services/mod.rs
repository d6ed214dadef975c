//! External operations module
//!
//! This module contains the host-side operations a finished countdown can trigger.

pub mod command;

// Re-export main functions
pub use command::*;
