//! Retry and catch policies.
//!
//! Policies are attached to Task and Parallel states and rendered as the
//! `Retry` and `Catch` arrays of the state. They are definition data only:
//! nothing in this crate executes a backoff or matches an error at run time.

use serde_json::{json, Map, Value};

use crate::duration::Duration;
use crate::error::WorkflowError;
use crate::path;

/// Error names matched by retry and catch policies.
pub mod errors {
    /// Matches any error.
    pub const ALL: &str = "States.ALL";
    /// The state ran longer than its `TimeoutSeconds`.
    pub const TIMEOUT: &str = "States.Timeout";
    /// The task itself failed.
    pub const TASK_FAILED: &str = "States.TaskFailed";
    /// Insufficient privileges to execute the task.
    pub const PERMISSIONS: &str = "States.Permissions";
    /// A `ResultPath` could not be applied to the state's input.
    pub const RESULT_PATH_MATCH_FAILURE: &str = "States.ResultPathMatchFailure";
    /// A path in `Parameters` could not be resolved.
    pub const PARAMETER_PATH_FAILURE: &str = "States.ParameterPathFailure";
    /// A branch of a Parallel state failed.
    pub const BRANCH_FAILED: &str = "States.BranchFailed";
}

/// Retry policy for a Task or Parallel state.
///
/// Every field is optional; fields left unset are omitted from the rendered
/// policy and the executing system applies its own defaults. An empty error
/// list renders as `["States.ALL"]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetryProps {
    /// Error names this policy applies to.
    pub errors: Vec<String>,
    /// Delay before the first retry attempt.
    pub interval: Option<Duration>,
    /// Maximum number of attempts, including the first.
    pub max_attempts: Option<u32>,
    /// Multiplier applied to the interval on each subsequent attempt.
    pub backoff_rate: Option<f64>,
}

impl RetryProps {
    /// Creates an empty retry policy (catch-all errors, executor defaults).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the error names this policy applies to.
    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }

    /// Sets the delay before the first retry attempt.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Sets the maximum number of attempts.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Sets the backoff multiplier.
    pub fn with_backoff_rate(mut self, backoff_rate: f64) -> Self {
        self.backoff_rate = Some(backoff_rate);
        self
    }

    pub(crate) fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("ErrorEquals".to_string(), error_equals(&self.errors));
        if let Some(interval) = self.interval {
            map.insert("IntervalSeconds".to_string(), json!(interval.to_seconds()));
        }
        if let Some(max_attempts) = self.max_attempts {
            map.insert("MaxAttempts".to_string(), json!(max_attempts));
        }
        if let Some(backoff_rate) = self.backoff_rate {
            map.insert("BackoffRate".to_string(), json!(backoff_rate));
        }
        Value::Object(map)
    }
}

/// Catch policy for a Task or Parallel state.
///
/// The transition target is supplied separately when the policy is attached
/// to a state, since it points at another state in the graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatchProps {
    /// Error names this handler applies to.
    pub errors: Vec<String>,
    /// Where to inject the error object into the handler's input.
    pub result_path: Option<String>,
}

impl CatchProps {
    /// Creates an empty catch policy (catch-all errors).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the error names this handler applies to.
    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }

    /// Sets the result path for the error object.
    pub fn with_result_path(mut self, result_path: impl Into<String>) -> Self {
        self.result_path = Some(result_path.into());
        self
    }

    pub(crate) fn validate(&self) -> Result<(), WorkflowError> {
        if let Some(result_path) = &self.result_path {
            path::validate(result_path)?;
        }
        Ok(())
    }

    pub(crate) fn to_json(&self, next: &str) -> Value {
        let mut map = Map::new();
        map.insert("ErrorEquals".to_string(), error_equals(&self.errors));
        if let Some(result_path) = &self.result_path {
            map.insert("ResultPath".to_string(), json!(result_path));
        }
        map.insert("Next".to_string(), json!(next));
        Value::Object(map)
    }
}

fn error_equals(errors: &[String]) -> Value {
    if errors.is_empty() {
        json!([errors::ALL])
    } else {
        json!(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_defaults_to_catch_all() {
        assert_eq!(
            RetryProps::new().to_json(),
            json!({ "ErrorEquals": ["States.ALL"] })
        );
    }

    #[test]
    fn test_retry_renders_all_fields() {
        let props = RetryProps::new()
            .with_interval(Duration::from_seconds(0))
            .with_max_attempts(10)
            .with_backoff_rate(0.0);
        assert_eq!(
            props.to_json(),
            json!({
                "ErrorEquals": ["States.ALL"],
                "IntervalSeconds": 0,
                "MaxAttempts": 10,
                "BackoffRate": 0.0,
            })
        );
    }

    #[test]
    fn test_retry_custom_errors() {
        let props = RetryProps::new()
            .with_errors(vec![errors::TIMEOUT.to_string(), errors::TASK_FAILED.to_string()])
            .with_max_attempts(2);
        assert_eq!(
            props.to_json(),
            json!({
                "ErrorEquals": ["States.Timeout", "States.TaskFailed"],
                "MaxAttempts": 2,
            })
        );
    }

    #[test]
    fn test_catch_renders_next() {
        let props = CatchProps::new().with_errors(vec![errors::ALL.to_string()]);
        assert_eq!(
            props.to_json("Pass State1"),
            json!({ "ErrorEquals": ["States.ALL"], "Next": "Pass State1" })
        );
    }

    #[test]
    fn test_catch_result_path() {
        let props = CatchProps::new().with_result_path("$.error");
        assert!(props.validate().is_ok());
        assert_eq!(
            props.to_json("Recover"),
            json!({
                "ErrorEquals": ["States.ALL"],
                "ResultPath": "$.error",
                "Next": "Recover",
            })
        );
    }

    #[test]
    fn test_catch_rejects_bad_result_path() {
        let props = CatchProps::new().with_result_path("error");
        assert!(props.validate().is_err());
    }
}
