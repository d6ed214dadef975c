//! Finish action background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn};

use crate::{services::run_finish_command, state::AppState};

/// What the host does once a countdown finishes
#[derive(Debug, Clone, Default)]
pub struct FinishAction {
    /// Shell command to run
    pub command: Option<String>,
    /// Reset the countdown to the configured max time afterwards
    pub rearm: bool,
}

/// Background task that reacts to finished notifications
pub async fn finish_action_task(state: Arc<AppState>, action: FinishAction) {
    info!("Starting finish action task");

    let mut finished_rx = state.subscribe_finished();

    loop {
        match finished_rx.recv().await {
            Ok(event) => {
                info!("Handling finished countdown #{}", event.sequence);

                if let Some(command) = &action.command {
                    if let Err(e) = run_finish_command(command).await {
                        error!("Finish command failed: {}", e);
                    }
                }

                if action.rearm {
                    info!("Re-arming countdown with {} minutes", state.max_time_minutes);
                    if let Err(e) = state.reset_countdown(None).await {
                        error!("Failed to re-arm countdown: {}", e);
                    }
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Finish action task skipped {} notifications", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Finished channel closed, stopping finish action task");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use tokio::time::sleep;

    use super::*;
    use crate::{
        countdown::{Phase, Remaining},
        display::DisplayBoard,
        tasks::TICK_PERIOD,
    };

    #[tokio::test(start_paused = true)]
    async fn rearm_resets_to_max_time() {
        let displays = Arc::new(DisplayBoard::new());
        displays.add("timer");
        let (state, task) = AppState::new(0, "127.0.0.1".into(), 1.0, displays.clone(), TICK_PERIOD);
        let state = Arc::new(state);
        tokio::spawn(task.run());
        tokio::spawn(finish_action_task(
            Arc::clone(&state),
            FinishAction { command: None, rearm: true },
        ));
        // let the task subscribe before anything finishes
        tokio::task::yield_now().await;

        state.reset_countdown(Some(0.0)).await.unwrap();
        sleep(Duration::from_millis(1500)).await;

        let snapshot = state.countdown_snapshot();
        assert_eq!(snapshot.finished_count, 1);
        assert_eq!(snapshot.phase, Phase::Running);
        assert_eq!(snapshot.remaining, Remaining::Seconds(60));
        assert_eq!(displays.get("timer").map(|e| e.content()).as_deref(), Some("Stop"));
    }
}
