//! Error types for workflow definition and rendering.

use thiserror::Error;

/// The main error type for workflow definition and rendering.
///
/// Covers the failure modes of building a state machine definition and
/// serializing its compiled state graph.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Validation error for invalid state properties or paths.
    #[error("Validation error: {message}")]
    Validation {
        /// Error message describing the validation failure
        message: String,
    },

    /// Two states in the same graph share a name.
    #[error("Duplicate state name: {name}")]
    DuplicateState {
        /// The conflicting state name
        name: String,
    },

    /// The requested workflow is not present in the catalog.
    #[error("unknown key: {name}")]
    UnknownWorkflow {
        /// The key that was looked up
        name: String,
    },

    /// No workflow key was supplied on the command line.
    #[error("not enough args")]
    MissingArgument,

    /// Serialization error while emitting the state graph.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message describing the serialization failure
        message: String,
    },

    /// I/O error while writing rendered output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WorkflowError {
    /// Creates a new Validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a new DuplicateState error.
    pub fn duplicate_state(name: impl Into<String>) -> Self {
        Self::DuplicateState { name: name.into() }
    }

    /// Creates a new UnknownWorkflow error.
    pub fn unknown_workflow(name: impl Into<String>) -> Self {
        Self::UnknownWorkflow { name: name.into() }
    }

    /// Returns true if this error is reported as a usage error by the CLI.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::UnknownWorkflow { .. } | Self::MissingArgument)
    }
}

impl From<serde_json::Error> for WorkflowError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = WorkflowError::validation("bad path");
        assert!(matches!(error, WorkflowError::Validation { .. }));
        assert_eq!(error.to_string(), "Validation error: bad path");
        assert!(!error.is_usage());
    }

    #[test]
    fn test_unknown_workflow_message() {
        let error = WorkflowError::unknown_workflow("nope");
        assert_eq!(error.to_string(), "unknown key: nope");
        assert!(error.is_usage());
    }

    #[test]
    fn test_missing_argument_message() {
        assert_eq!(WorkflowError::MissingArgument.to_string(), "not enough args");
        assert!(WorkflowError::MissingArgument.is_usage());
    }

    #[test]
    fn test_duplicate_state_message() {
        let error = WorkflowError::duplicate_state("P1");
        assert_eq!(error.to_string(), "Duplicate state name: P1");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_error = serde_json::from_str::<String>("invalid").unwrap_err();
        let error: WorkflowError = json_error.into();
        assert!(matches!(error, WorkflowError::Serialization { .. }));
    }
}
