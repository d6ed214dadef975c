//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::info;

use super::{FinishedEvent, FinishedNotifier};
use crate::{
    countdown::{CountdownError, CountdownSnapshot},
    display::DisplayBoard,
    tasks::{CountdownHandle, CountdownTask},
};

/// Application state shared by the HTTP handlers and background tasks
#[derive(Debug)]
pub struct AppState {
    /// Control handle of the countdown ticker task
    pub countdown: CountdownHandle,
    /// Named displays the countdown renders into
    pub displays: Arc<DisplayBoard>,
    /// Duration used when a reset does not name one
    pub max_time_minutes: f64,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for finished notifications
    pub finished_tx: broadcast::Sender<FinishedEvent>,
}

impl AppState {
    /// Create the state together with the ticker task that still has to be spawned
    pub fn new(
        port: u16,
        host: String,
        max_time_minutes: f64,
        displays: Arc<DisplayBoard>,
        tick_period: Duration,
    ) -> (Self, CountdownTask) {
        let (finished_tx, _) = broadcast::channel(16);
        let notifier = FinishedNotifier::new(finished_tx.clone());
        let (task, countdown) = CountdownTask::new(displays.clone(), Arc::new(notifier), tick_period);

        let state = Self {
            countdown,
            displays,
            max_time_minutes,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            finished_tx,
        };
        (state, task)
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Reset the countdown to `minutes`, or to the configured max time
    pub async fn reset_countdown(&self, minutes: Option<f64>) -> Result<CountdownSnapshot, CountdownError> {
        let minutes = minutes.unwrap_or(self.max_time_minutes);
        info!("Resetting countdown to {} minutes", minutes);
        let snapshot = self.countdown.reset(minutes).await?;
        self.record_action("reset");
        Ok(snapshot)
    }

    pub async fn start_countdown(&self) -> Result<CountdownSnapshot, CountdownError> {
        info!("Starting countdown");
        let snapshot = self.countdown.start().await?;
        self.record_action("start");
        Ok(snapshot)
    }

    pub async fn stop_countdown(&self) -> Result<CountdownSnapshot, CountdownError> {
        info!("Stopping countdown");
        self.countdown.stop().await?;
        self.record_action("stop");
        Ok(self.countdown.snapshot())
    }

    /// Get current countdown state
    pub fn countdown_snapshot(&self) -> CountdownSnapshot {
        self.countdown.snapshot()
    }

    /// Subscribe to finished notifications
    pub fn subscribe_finished(&self) -> broadcast::Receiver<FinishedEvent> {
        self.finished_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
