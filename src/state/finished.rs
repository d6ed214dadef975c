//! Finished notifications published by the host

use std::sync::atomic::{AtomicU64, Ordering};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::countdown::FinishedHook;

/// One completed countdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishedEvent {
    pub sequence: u64,
    pub finished_at: DateTime<Utc>,
}

/// Finished hook that fans completed countdowns out to subscribers
#[derive(Debug)]
pub struct FinishedNotifier {
    tx: broadcast::Sender<FinishedEvent>,
    sequence: AtomicU64,
}

impl FinishedNotifier {
    pub fn new(tx: broadcast::Sender<FinishedEvent>) -> Self {
        Self {
            tx,
            sequence: AtomicU64::new(0),
        }
    }
}

impl FinishedHook for FinishedNotifier {
    fn finished(&self) {
        let event = FinishedEvent {
            sequence: self.sequence.fetch_add(1, Ordering::SeqCst) + 1,
            finished_at: Utc::now(),
        };
        info!("Countdown #{} finished", event.sequence);

        // having nobody listening is fine
        if self.tx.send(event).is_err() {
            debug!("No subscribers for finished notification");
        }
    }
}
