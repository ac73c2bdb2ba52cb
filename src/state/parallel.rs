//! Parallel state.

use serde_json::Value;

use super::{Catcher, Chain, Chainable, State, StateKind};
use crate::policy::{CatchProps, RetryProps};

/// Properties for a Parallel state.
#[derive(Debug, Clone, Default)]
pub struct ParallelProps {
    /// Selects the portion of the input the state operates on.
    pub input_path: Option<String>,
    /// Payload template reshaping the combined branch results.
    pub result_selector: Option<Value>,
    /// Where in the input the combined result is placed.
    pub result_path: Option<String>,
    /// Selects the portion of the effective output passed on.
    pub output_path: Option<String>,
}

/// A state that runs several branches, each a state machine of its own.
#[derive(Clone)]
pub struct Parallel {
    state: State,
}

impl Parallel {
    /// Creates a Parallel state with no branches.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_props(name, ParallelProps::default())
    }

    /// Creates a Parallel state with the given properties.
    pub fn with_props(name: impl Into<String>, props: ParallelProps) -> Self {
        Self {
            state: State::new(
                name,
                StateKind::Parallel {
                    branches: Vec::new(),
                    props,
                },
            ),
        }
    }

    /// Adds a branch starting at `branch`'s first state.
    pub fn branch(self, branch: &dyn Chainable) -> Self {
        {
            let mut node = self.state.node_mut();
            if let StateKind::Parallel { branches, .. } = &mut node.kind {
                branches.push(branch.start_state());
            }
        }
        self
    }

    /// Attaches a retry policy to this state.
    pub fn add_retry(&self, props: RetryProps) -> &Self {
        self.state.node_mut().retries.push(props);
        self
    }

    /// Attaches a catch policy routing matched errors into `handler`.
    pub fn add_catch(&self, handler: &dyn Chainable, props: CatchProps) -> &Self {
        self.state.node_mut().catches.push(Catcher {
            props,
            handler: handler.start_state(),
        });
        self
    }

    /// Transitions this state into `next`.
    pub fn next(&self, next: &dyn Chainable) -> Chain {
        Chain::start(self).next(next)
    }
}

impl Chainable for Parallel {
    fn start_state(&self) -> State {
        self.state.clone()
    }

    fn end_states(&self) -> Vec<State> {
        vec![self.state.clone()]
    }
}
