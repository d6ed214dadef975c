//! Countdown controller errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CountdownError {
    #[error("countdown minutes must be a finite, non-negative number (got {0})")]
    InvalidMinutes(f64),
    #[error("countdown has not been initialized; reset it with a duration first")]
    NotInitialized,
    #[error("countdown already finished; reset it with a duration first")]
    Exhausted,
    #[error("countdown task is no longer running")]
    TaskGone,
}
