//! Pass state.

use serde_json::Value;

use super::{Chain, Chainable, State, StateKind};

/// Properties for a Pass state.
#[derive(Debug, Clone, Default)]
pub struct PassProps {
    /// Selects the portion of the input the state operates on.
    pub input_path: Option<String>,
    /// Fixed output injected in place of a task result.
    pub result: Option<Value>,
    /// Where in the input the result is placed.
    pub result_path: Option<String>,
    /// Payload template applied to the effective input.
    pub parameters: Option<Value>,
    /// Selects the portion of the effective output passed on.
    pub output_path: Option<String>,
}

/// A state that passes its input through, optionally injecting a fixed
/// result.
#[derive(Clone)]
pub struct Pass {
    state: State,
}

impl Pass {
    /// Creates a Pass state with default properties.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_props(name, PassProps::default())
    }

    /// Creates a Pass state with the given properties.
    pub fn with_props(name: impl Into<String>, props: PassProps) -> Self {
        Self {
            state: State::new(name, StateKind::Pass(props)),
        }
    }

    /// Transitions this state into `next`.
    pub fn next(&self, next: &dyn Chainable) -> Chain {
        Chain::start(self).next(next)
    }
}

impl Chainable for Pass {
    fn start_state(&self) -> State {
        self.state.clone()
    }

    fn end_states(&self) -> Vec<State> {
        vec![self.state.clone()]
    }
}
