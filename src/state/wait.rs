//! Wait state.

use chrono::{DateTime, SecondsFormat, Utc};

use super::{Chain, Chainable, State, StateKind};
use crate::duration::Duration;

/// How long a Wait state pauses.
#[derive(Debug, Clone, PartialEq)]
pub enum WaitTime {
    /// Pause for a fixed duration.
    Duration(Duration),
    /// Pause until an absolute point in time.
    Timestamp(DateTime<Utc>),
    /// Pause for the number of seconds found at a reference path.
    SecondsPath(String),
    /// Pause until the timestamp found at a reference path.
    TimestampPath(String),
}

impl WaitTime {
    /// Waits for a fixed duration.
    pub fn duration(duration: Duration) -> Self {
        Self::Duration(duration)
    }

    /// Waits until the given point in time.
    pub fn timestamp(timestamp: DateTime<Utc>) -> Self {
        Self::Timestamp(timestamp)
    }

    /// Waits for the number of seconds found at `path` in the input.
    pub fn seconds_path(path: impl Into<String>) -> Self {
        Self::SecondsPath(path.into())
    }

    /// Waits until the timestamp found at `path` in the input.
    pub fn timestamp_path(path: impl Into<String>) -> Self {
        Self::TimestampPath(path.into())
    }

    pub(crate) fn rendered_timestamp(timestamp: &DateTime<Utc>) -> String {
        timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// A state that pauses execution.
#[derive(Clone)]
pub struct Wait {
    state: State,
}

impl Wait {
    /// Creates a Wait state pausing for the given time.
    pub fn new(name: impl Into<String>, time: WaitTime) -> Self {
        Self {
            state: State::new(name, StateKind::Wait(time)),
        }
    }

    /// Transitions this state into `next`.
    pub fn next(&self, next: &dyn Chainable) -> Chain {
        Chain::start(self).next(next)
    }
}

impl Chainable for Wait {
    fn start_state(&self) -> State {
        self.state.clone()
    }

    fn end_states(&self) -> Vec<State> {
        vec![self.state.clone()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_rendered_timestamp_is_rfc3339_utc() {
        let timestamp = Utc.with_ymd_and_hms(2021, 7, 4, 12, 30, 0).unwrap();
        assert_eq!(
            WaitTime::rendered_timestamp(&timestamp),
            "2021-07-04T12:30:00Z"
        );
    }
}
