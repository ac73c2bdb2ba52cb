//! Fail state.

use super::{Chainable, State, StateKind};

/// Properties for a Fail state.
#[derive(Debug, Clone, Default)]
pub struct FailProps {
    /// Error name reported by the failure.
    pub error: Option<String>,
    /// Human-readable description of the failure.
    pub cause: Option<String>,
}

/// A terminal state that stops the machine as a failure.
#[derive(Clone)]
pub struct Fail {
    state: State,
}

impl Fail {
    /// Creates a Fail state with default properties.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_props(name, FailProps::default())
    }

    /// Creates a Fail state with the given properties.
    pub fn with_props(name: impl Into<String>, props: FailProps) -> Self {
        Self {
            state: State::new(name, StateKind::Fail(props)),
        }
    }
}

impl Chainable for Fail {
    fn start_state(&self) -> State {
        self.state.clone()
    }

    fn end_states(&self) -> Vec<State> {
        Vec::new()
    }
}
