//! Succeed state.

use super::{Chainable, State, StateKind};

/// A terminal state that stops the machine successfully.
#[derive(Clone)]
pub struct Succeed {
    state: State,
}

impl Succeed {
    /// Creates a Succeed state.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            state: State::new(name, StateKind::Succeed),
        }
    }
}

impl Chainable for Succeed {
    fn start_state(&self) -> State {
        self.state.clone()
    }

    fn end_states(&self) -> Vec<State> {
        Vec::new()
    }
}
