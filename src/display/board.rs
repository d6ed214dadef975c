//! Named display registry owned by the host

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{DisplaySink, DisplayTargets, LogDisplay};

/// A single named display and the text it currently shows
#[derive(Debug)]
pub struct DisplayElement {
    name: String,
    content: Mutex<String>,
}

impl DisplayElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: Mutex::new(String::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> String {
        self.content
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DisplaySink for DisplayElement {
    fn render(&self, text: &str) {
        let mut content = self.content.lock().unwrap_or_else(PoisonError::into_inner);
        content.clear();
        content.push_str(text);
    }
}

/// Serializable view of one display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayView {
    pub name: String,
    pub content: String,
}

/// Ordered set of displays that can change between ticks
#[derive(Debug, Default)]
pub struct DisplayBoard {
    elements: Mutex<Vec<Arc<DisplayElement>>>,
    mirror_to_log: bool,
}

impl DisplayBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also write every rendered text to the log
    pub fn with_log_mirror(mut self, enabled: bool) -> Self {
        self.mirror_to_log = enabled;
        self
    }

    fn elements(&self) -> MutexGuard<'_, Vec<Arc<DisplayElement>>> {
        self.elements.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a display; returns `false` if the name is already taken
    pub fn add(&self, name: &str) -> bool {
        let mut elements = self.elements();
        if elements.iter().any(|e| e.name() == name) {
            debug!("Display {} already registered", name);
            return false;
        }
        elements.push(Arc::new(DisplayElement::new(name)));
        info!("Registered display: {}", name);
        true
    }

    /// Unregister a display; returns `false` if it did not exist
    pub fn remove(&self, name: &str) -> bool {
        let mut elements = self.elements();
        let initial_count = elements.len();
        elements.retain(|e| e.name() != name);
        let removed = elements.len() != initial_count;
        if removed {
            info!("Removed display: {}", name);
        }
        removed
    }

    pub fn get(&self, name: &str) -> Option<Arc<DisplayElement>> {
        self.elements().iter().find(|e| e.name() == name).cloned()
    }

    pub fn len(&self) -> usize {
        self.elements().len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements().is_empty()
    }

    pub fn views(&self) -> Vec<DisplayView> {
        self.elements()
            .iter()
            .map(|e| DisplayView {
                name: e.name().to_string(),
                content: e.content(),
            })
            .collect()
    }
}

impl DisplayTargets for DisplayBoard {
    fn query(&self) -> Vec<Arc<dyn DisplaySink>> {
        let mut sinks: Vec<Arc<dyn DisplaySink>> = self
            .elements()
            .iter()
            .map(|e| Arc::clone(e) as Arc<dyn DisplaySink>)
            .collect();
        if self.mirror_to_log {
            sinks.push(Arc::new(LogDisplay::new("log")));
        }
        sinks
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn add_rejects_duplicate_names() {
        let board = DisplayBoard::new();
        assert!(board.add("timer"));
        assert!(!board.add("timer"));
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn query_follows_registration_order() {
        let board = DisplayBoard::new();
        board.add("header");
        board.add("footer");
        for sink in board.query() {
            sink.render("eta 0:30");
        }
        let views = board.views();
        assert_eq!(views[0], DisplayView { name: "header".into(), content: "eta 0:30".into() });
        assert_eq!(views[1], DisplayView { name: "footer".into(), content: "eta 0:30".into() });
    }

    #[test]
    fn removed_display_is_not_queried() {
        let board = DisplayBoard::new();
        board.add("a");
        board.add("b");
        assert!(board.remove("a"));
        assert!(!board.remove("a"));
        let sinks = board.query();
        assert_eq!(sinks.len(), 1);
        sinks[0].render("Stop");
        assert_eq!(board.get("b").map(|e| e.content()), Some("Stop".to_string()));
    }

    #[test]
    fn log_mirror_adds_a_sink() {
        let board = DisplayBoard::new().with_log_mirror(true);
        board.add("timer");
        assert_eq!(board.query().len(), 2);
        assert_eq!(board.views().len(), 1);
    }
}
