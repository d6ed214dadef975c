//! Countdown controller
//!
//! The controller is a plain state machine. It never schedules anything by
//! itself: arming hands out a [`TimerHandle`] and whoever drives the timer
//! calls [`Countdown::tick`] with that handle once per period.

use tracing::{debug, info, warn};

use super::{
    error::CountdownError,
    format::{format_eta, STOP_TEXT},
    state::{CountdownSnapshot, Phase, Remaining, TimerHandle},
};
use crate::display::DisplayTargets;

/// Notification fired once per countdown that reaches zero
pub trait FinishedHook: Send + Sync {
    fn finished(&self);
}

impl<F> FinishedHook for F
where
    F: Fn() + Send + Sync,
{
    fn finished(&self) {
        self()
    }
}

/// Result of delivering one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick came from a timer that is no longer armed and was ignored
    Stale,
    /// The eta was rendered and the countdown keeps running
    Rendered(String),
    /// The zero state was rendered, the timer disarmed and the hook fired
    Finished,
}

#[derive(Debug, Default)]
pub struct Countdown {
    remaining: Remaining,
    timer: Option<TimerHandle>,
    generation: u64,
    last_rendered: Option<String>,
    finished_count: u64,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the counter to `minutes` and arm a fresh timer
    pub fn reset(&mut self, minutes: f64) -> Result<TimerHandle, CountdownError> {
        if !minutes.is_finite() || minutes < 0.0 {
            return Err(CountdownError::InvalidMinutes(minutes));
        }
        let seconds = (minutes * 60.0).round() as u64;
        self.remaining = Remaining::Seconds(seconds);
        info!("Countdown reset to {} seconds", seconds);
        Ok(self.arm())
    }

    /// Arm a fresh timer, resuming from the current counter
    pub fn start(&mut self) -> Result<TimerHandle, CountdownError> {
        match self.remaining {
            Remaining::Uninitialized => Err(CountdownError::NotInitialized),
            Remaining::Exhausted => Err(CountdownError::Exhausted),
            Remaining::Seconds(seconds) => {
                info!("Countdown started with {} seconds remaining", seconds);
                Ok(self.arm())
            }
        }
    }

    /// Disarm the timer; returns whether one was armed
    pub fn stop(&mut self) -> bool {
        match self.timer.take() {
            Some(handle) => {
                info!("Countdown stopped (timer {})", handle.generation());
                true
            }
            None => {
                debug!("Stop requested with no armed timer");
                false
            }
        }
    }

    fn arm(&mut self) -> TimerHandle {
        if let Some(previous) = self.timer.take() {
            debug!("Cancelling timer {} before re-arming", previous.generation());
        }
        self.generation += 1;
        let handle = TimerHandle::new(self.generation);
        self.timer = Some(handle);
        handle
    }

    /// Deliver one tick from the timer identified by `handle`
    pub fn tick(
        &mut self,
        handle: TimerHandle,
        targets: &dyn DisplayTargets,
        hook: &dyn FinishedHook,
    ) -> TickOutcome {
        if self.timer != Some(handle) {
            debug!("Ignoring tick from cancelled timer {}", handle.generation());
            return TickOutcome::Stale;
        }

        let Some(seconds) = self.remaining.seconds() else {
            warn!("Timer armed without a renderable counter ({:?}), disarming", self.remaining);
            self.timer = None;
            return TickOutcome::Stale;
        };

        let sinks = targets.query();
        let message = format_eta(seconds);
        for sink in &sinks {
            sink.render(&message);
        }
        self.last_rendered = Some(message.clone());

        let outcome = if seconds == 0 {
            self.timer = None;
            for sink in &sinks {
                sink.render(STOP_TEXT);
            }
            self.last_rendered = Some(STOP_TEXT.to_string());
            self.finished_count += 1;
            info!("Countdown finished");
            hook.finished();
            TickOutcome::Finished
        } else {
            TickOutcome::Rendered(message)
        };

        self.remaining = self.remaining.decremented();
        outcome
    }

    pub fn phase(&self) -> Phase {
        if self.timer.is_some() {
            Phase::Running
        } else {
            Phase::Idle
        }
    }

    pub fn remaining(&self) -> Remaining {
        self.remaining
    }

    /// The currently armed timer, if any
    pub fn armed(&self) -> Option<TimerHandle> {
        self.timer
    }

    pub fn snapshot(&self) -> CountdownSnapshot {
        CountdownSnapshot {
            phase: self.phase(),
            remaining: self.remaining,
            last_rendered: self.last_rendered.clone(),
            finished_count: self.finished_count,
        }
    }
}
