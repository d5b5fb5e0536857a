//! Poll attempt budgets.
//!
//! Pure value types: no clock, no sleeping. The loop that spends a budget
//! lives in `application::services::poller`.

use std::time::Duration;

use crate::domain::error::PollerError;

/// `(attempts, interval)` bounding one retry loop.
///
/// `attempts` is always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollBudget {
    attempts: u32,
    interval: Duration,
}

impl PollBudget {
    /// # Errors
    ///
    /// Returns [`PollerError::InvalidBudget`] when `attempts` is zero.
    pub fn new(attempts: u32, interval: Duration) -> Result<Self, PollerError> {
        if attempts == 0 {
            return Err(PollerError::InvalidBudget(
                "attempts must be greater than zero".to_string(),
            ));
        }
        Ok(Self { attempts, interval })
    }

    /// Convenience constructor for millisecond intervals.
    ///
    /// # Errors
    ///
    /// Same as [`PollBudget::new`].
    pub fn from_millis(attempts: u32, interval_ms: u64) -> Result<Self, PollerError> {
        Self::new(attempts, Duration::from_millis(interval_ms))
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Lower bound on the time an exhausted budget spends sleeping.
    #[must_use]
    pub fn min_elapsed_on_exhaustion(&self) -> Duration {
        self.interval * (self.attempts - 1)
    }
}

/// Outcome of one probe inside a polling loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe<T> {
    /// Condition met; stop polling.
    Ready(T),
    /// Not yet; `observed` describes what was seen for the timeout message.
    Pending { observed: String },
}
