//! Duration type for wait states and retry intervals.
//!
//! Provides a Duration type with convenient constructors for specifying
//! time intervals in seconds, minutes, hours, and days.

use serde::{Deserialize, Serialize};

/// Duration type representing a time interval in whole seconds.
///
/// Used for configuring Wait states and the `IntervalSeconds` field of
/// retry policies.
///
/// # Example
///
/// ```
/// use workflow_gen::Duration;
///
/// let five_seconds = Duration::from_seconds(5);
/// let two_minutes = Duration::from_minutes(2);
/// let one_hour = Duration::from_hours(1);
/// let one_day = Duration::from_days(1);
///
/// assert_eq!(five_seconds.to_seconds(), 5);
/// assert_eq!(two_minutes.to_seconds(), 120);
/// assert_eq!(one_hour.to_seconds(), 3600);
/// assert_eq!(one_day.to_seconds(), 86400);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Duration {
    seconds: u64,
}

impl Duration {
    /// Creates a new Duration from the given number of seconds.
    pub fn from_seconds(seconds: u64) -> Self {
        Self { seconds }
    }

    /// Creates a new Duration from the given number of minutes.
    pub fn from_minutes(minutes: u64) -> Self {
        Self {
            seconds: minutes * 60,
        }
    }

    /// Creates a new Duration from the given number of hours.
    pub fn from_hours(hours: u64) -> Self {
        Self {
            seconds: hours * 3600,
        }
    }

    /// Creates a new Duration from the given number of days.
    pub fn from_days(days: u64) -> Self {
        Self {
            seconds: days * 86400,
        }
    }

    /// Returns the total number of seconds in this duration.
    pub fn to_seconds(&self) -> u64 {
        self.seconds
    }
}

impl From<std::time::Duration> for Duration {
    fn from(duration: std::time::Duration) -> Self {
        Self {
            seconds: duration.as_secs(),
        }
    }
}

impl From<Duration> for std::time::Duration {
    fn from(duration: Duration) -> Self {
        std::time::Duration::from_secs(duration.seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_seconds() {
        let duration = Duration::from_seconds(42);
        assert_eq!(duration.to_seconds(), 42);
    }

    #[test]
    fn test_from_minutes() {
        let duration = Duration::from_minutes(5);
        assert_eq!(duration.to_seconds(), 300);
    }

    #[test]
    fn test_from_hours() {
        let duration = Duration::from_hours(2);
        assert_eq!(duration.to_seconds(), 7200);
    }

    #[test]
    fn test_from_days() {
        let duration = Duration::from_days(1);
        assert_eq!(duration.to_seconds(), 86400);
    }

    #[test]
    fn test_zero_duration() {
        // Retry policies may specify a zero interval.
        let duration = Duration::from_seconds(0);
        assert_eq!(duration.to_seconds(), 0);
    }

    #[test]
    fn test_std_duration_conversion() {
        let std_duration = std::time::Duration::from_secs(60);
        let duration: Duration = std_duration.into();
        assert_eq!(duration.to_seconds(), 60);

        let back: std::time::Duration = duration.into();
        assert_eq!(back.as_secs(), 60);
    }

    proptest! {
        /// Property: constructing from seconds/minutes/hours/days produces
        /// the correct total seconds.
        #[test]
        fn prop_duration_from_seconds_produces_correct_total(seconds in 0u64..=u64::MAX / 86400) {
            let duration = Duration::from_seconds(seconds);
            prop_assert_eq!(duration.to_seconds(), seconds);
        }

        #[test]
        fn prop_duration_from_minutes_produces_correct_total(minutes in 0u64..=u64::MAX / 86400 / 60) {
            let duration = Duration::from_minutes(minutes);
            prop_assert_eq!(duration.to_seconds(), minutes * 60);
        }

        #[test]
        fn prop_duration_from_hours_produces_correct_total(hours in 0u64..=u64::MAX / 86400 / 3600) {
            let duration = Duration::from_hours(hours);
            prop_assert_eq!(duration.to_seconds(), hours * 3600);
        }

        #[test]
        fn prop_duration_from_days_produces_correct_total(days in 0u64..=u64::MAX / 86400 / 86400) {
            let duration = Duration::from_days(days);
            prop_assert_eq!(duration.to_seconds(), days * 86400);
        }

        /// Property: round-trip through std::time::Duration preserves the value.
        #[test]
        fn prop_duration_std_roundtrip(seconds in 0u64..=u64::MAX / 2) {
            let duration = Duration::from_seconds(seconds);
            let std_duration: std::time::Duration = duration.into();
            let back: Duration = std_duration.into();
            prop_assert_eq!(duration, back);
        }
    }
}
