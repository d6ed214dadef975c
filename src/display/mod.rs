//! Display targets
//!
//! A countdown never owns its displays. On every tick it asks a
//! [`DisplayTargets`] provider for the sinks that currently exist and writes
//! the rendered text into each of them.

pub mod board;

use std::sync::Arc;
use tracing::info;

pub use board::{DisplayBoard, DisplayElement};

/// A surface that shows countdown text
pub trait DisplaySink: Send + Sync {
    fn render(&self, text: &str);
}

/// Source of the sinks to render into, queried again on every tick
pub trait DisplayTargets: Send + Sync {
    fn query(&self) -> Vec<Arc<dyn DisplaySink>>;
}

impl DisplayTargets for Vec<Arc<dyn DisplaySink>> {
    fn query(&self) -> Vec<Arc<dyn DisplaySink>> {
        self.clone()
    }
}

/// Sink that mirrors rendered text into the log
#[derive(Debug, Clone)]
pub struct LogDisplay {
    name: String,
}

impl LogDisplay {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl DisplaySink for LogDisplay {
    fn render(&self, text: &str) {
        info!("[{}] {}", self.name, text);
    }
}
