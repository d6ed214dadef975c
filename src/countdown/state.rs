//! Countdown state structures

use serde::{Deserialize, Serialize};

/// Lifecycle of the remaining-seconds counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "seconds", rename_all = "snake_case")]
pub enum Remaining {
    /// No reset has ever set a duration
    Uninitialized,
    /// Seconds left to render, zero included
    Seconds(u64),
    /// The zero state was rendered and the countdown finished
    Exhausted,
}

impl Remaining {
    /// Seconds left, if the counter holds a renderable value
    pub fn seconds(&self) -> Option<u64> {
        match self {
            Remaining::Seconds(s) => Some(*s),
            _ => None,
        }
    }

    /// The counter after one tick has been rendered
    pub fn decremented(self) -> Self {
        match self {
            Remaining::Seconds(0) => Remaining::Exhausted,
            Remaining::Seconds(s) => Remaining::Seconds(s - 1),
            other => other,
        }
    }
}

impl Default for Remaining {
    fn default() -> Self {
        Remaining::Uninitialized
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Running,
}

/// Identifies one armed repeating timer
///
/// Every arm produces a new handle, so a tick scheduled by a cancelled timer
/// never matches the armed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub(crate) fn new(generation: u64) -> Self {
        Self(generation)
    }

    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Point-in-time view of a countdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountdownSnapshot {
    pub phase: Phase,
    pub remaining: Remaining,
    pub last_rendered: Option<String>,
    pub finished_count: u64,
}

impl CountdownSnapshot {
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Remaining seconds, only while the countdown is armed
    pub fn remaining_seconds(&self) -> Option<u64> {
        if self.is_running() {
            self.remaining.seconds()
        } else {
            None
        }
    }
}

impl Default for CountdownSnapshot {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            remaining: Remaining::Uninitialized,
            last_rendered: None,
            finished_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn decrement_past_zero_exhausts_instead_of_underflowing() {
        assert_eq!(Remaining::Seconds(2).decremented(), Remaining::Seconds(1));
        assert_eq!(Remaining::Seconds(0).decremented(), Remaining::Exhausted);
        assert_eq!(Remaining::Exhausted.decremented(), Remaining::Exhausted);
        assert_eq!(Remaining::Uninitialized.decremented(), Remaining::Uninitialized);
    }

    #[test]
    fn idle_snapshot_hides_remaining_seconds() {
        let snapshot = CountdownSnapshot {
            phase: Phase::Idle,
            remaining: Remaining::Seconds(42),
            ..Default::default()
        };
        assert_eq!(snapshot.remaining_seconds(), None);
        assert_eq!(snapshot.remaining.seconds(), Some(42));
    }

    #[test]
    fn remaining_serializes_with_tag() {
        let json = serde_json::to_value(Remaining::Seconds(5)).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "seconds", "seconds": 5 }));
        let json = serde_json::to_value(Remaining::Exhausted).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "exhausted" }));
    }
}
