//! Countdown ticker background task
//!
//! The task is the single owner of a [`Countdown`]. Host code talks to it
//! through a cloneable [`CountdownHandle`]; every state change is published
//! as a [`CountdownSnapshot`] on a watch channel.

use std::{future::pending, sync::Arc, time::Duration};
use tokio::{
    sync::{mpsc, oneshot, watch},
    time::{interval_at, Instant, Interval, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::{
    countdown::{Countdown, CountdownError, CountdownSnapshot, FinishedHook, TickOutcome, TimerHandle},
    display::DisplayTargets,
};

/// Period between two ticks of an armed countdown
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Reply channel of a [`Command`]
pub type Reply<T> = oneshot::Sender<Result<T, CountdownError>>;

/// Requests accepted by the ticker task
#[derive(Debug)]
pub enum Command {
    Reset { minutes: f64, reply: Reply<CountdownSnapshot> },
    Start { reply: Reply<CountdownSnapshot> },
    Stop { reply: Reply<bool> },
}

/// Cloneable handle to a running countdown task
#[derive(Debug, Clone)]
pub struct CountdownHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<CountdownSnapshot>,
}

impl CountdownHandle {
    async fn request<T>(
        &self,
        build: impl FnOnce(Reply<T>) -> Command,
    ) -> Result<T, CountdownError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(build(reply))
            .await
            .map_err(|_| CountdownError::TaskGone)?;
        response.await.map_err(|_| CountdownError::TaskGone)?
    }

    /// Set the countdown to `minutes` and arm a fresh timer
    pub async fn reset(&self, minutes: f64) -> Result<CountdownSnapshot, CountdownError> {
        self.request(|reply| Command::Reset { minutes, reply }).await
    }

    /// Re-arm the timer without touching the remaining time
    pub async fn start(&self) -> Result<CountdownSnapshot, CountdownError> {
        self.request(|reply| Command::Start { reply }).await
    }

    /// Disarm the timer; resolves to whether one was armed
    pub async fn stop(&self) -> Result<bool, CountdownError> {
        self.request(|reply| Command::Stop { reply }).await
    }

    /// Latest published state
    pub fn snapshot(&self) -> CountdownSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified on every published state change
    pub fn subscribe(&self) -> watch::Receiver<CountdownSnapshot> {
        self.snapshots.clone()
    }
}

/// The armed timer: its identity and the interval driving it
struct ArmedTimer {
    handle: TimerHandle,
    interval: Interval,
}

impl ArmedTimer {
    fn new(handle: TimerHandle, period: Duration) -> Self {
        // the first tick is due one full period after arming
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { handle, interval }
    }
}

async fn next_tick(timer: &mut Option<ArmedTimer>) -> TimerHandle {
    match timer {
        Some(armed) => {
            armed.interval.tick().await;
            armed.handle
        }
        None => pending().await,
    }
}

pub struct CountdownTask {
    countdown: Countdown,
    targets: Arc<dyn DisplayTargets>,
    hook: Arc<dyn FinishedHook>,
    period: Duration,
    commands: mpsc::Receiver<Command>,
    snapshots: watch::Sender<CountdownSnapshot>,
}

impl CountdownTask {
    /// Create the task and a handle to control it
    pub fn new(
        targets: Arc<dyn DisplayTargets>,
        hook: Arc<dyn FinishedHook>,
        period: Duration,
    ) -> (Self, CountdownHandle) {
        let countdown = Countdown::new();
        let (commands_tx, commands_rx) = mpsc::channel(32);
        let (snapshots_tx, snapshots_rx) = watch::channel(countdown.snapshot());

        let task = Self {
            countdown,
            targets,
            hook,
            period,
            commands: commands_rx,
            snapshots: snapshots_tx,
        };
        let handle = CountdownHandle {
            commands: commands_tx,
            snapshots: snapshots_rx,
        };
        (task, handle)
    }

    /// Run until every handle has been dropped
    pub async fn run(mut self) {
        info!("Starting countdown ticker task");

        let mut timer: Option<ArmedTimer> = None;

        loop {
            tokio::select! {
                command = self.commands.recv() => {
                    let Some(command) = command else {
                        info!("All countdown handles dropped, stopping ticker task");
                        break;
                    };
                    self.apply(command, &mut timer);
                }

                handle = next_tick(&mut timer) => {
                    match self.countdown.tick(handle, self.targets.as_ref(), self.hook.as_ref()) {
                        TickOutcome::Rendered(text) => debug!("Tick rendered {}", text),
                        TickOutcome::Finished => debug!("Tick finished the countdown"),
                        TickOutcome::Stale => warn!("Dropped tick from timer {}", handle.generation()),
                    }
                    if self.countdown.armed() != Some(handle) {
                        timer = None;
                    }
                    self.publish();
                }
            }
        }
    }

    fn apply(&mut self, command: Command, timer: &mut Option<ArmedTimer>) {
        match command {
            Command::Reset { minutes, reply } => {
                let result = self.countdown.reset(minutes).map(|handle| self.arm(handle, timer));
                let _ = reply.send(result);
            }
            Command::Start { reply } => {
                let result = self.countdown.start().map(|handle| self.arm(handle, timer));
                let _ = reply.send(result);
            }
            Command::Stop { reply } => {
                let was_armed = self.countdown.stop();
                *timer = None;
                self.publish();
                let _ = reply.send(Ok(was_armed));
            }
        }
    }

    fn arm(&self, handle: TimerHandle, timer: &mut Option<ArmedTimer>) -> CountdownSnapshot {
        // replacing the interval drops, and so cancels, the previous one
        *timer = Some(ArmedTimer::new(handle, self.period));
        self.publish()
    }

    fn publish(&self) -> CountdownSnapshot {
        let snapshot = self.countdown.snapshot();
        self.snapshots.send_replace(snapshot.clone());
        snapshot
    }
}
