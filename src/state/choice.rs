//! Choice state.

use super::{Chainable, ChoiceRule, State, StateKind};
use crate::condition::Condition;

/// A state that routes to the first rule whose condition matches, or to the
/// default transition when none does.
#[derive(Clone)]
pub struct Choice {
    state: State,
}

impl Choice {
    /// Creates a Choice state with no rules.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            state: State::new(
                name,
                StateKind::Choice {
                    rules: Vec::new(),
                    default: None,
                },
            ),
        }
    }

    /// Adds a rule: when `condition` matches, transition into `next`.
    ///
    /// Rules are evaluated in the order they are added.
    pub fn when(self, condition: Condition, next: &dyn Chainable) -> Self {
        {
            let mut node = self.state.node_mut();
            if let StateKind::Choice { rules, .. } = &mut node.kind {
                rules.push(ChoiceRule {
                    condition,
                    next: next.start_state(),
                });
            }
        }
        self
    }

    /// Sets the default transition taken when no rule matches.
    pub fn otherwise(self, default: &dyn Chainable) -> Self {
        {
            let mut node = self.state.node_mut();
            if let StateKind::Choice { default: slot, .. } = &mut node.kind {
                *slot = Some(default.start_state());
            }
        }
        self
    }
}

impl Chainable for Choice {
    fn start_state(&self) -> State {
        self.state.clone()
    }

    fn end_states(&self) -> Vec<State> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Pass;

    #[test]
    fn test_rules_keep_insertion_order() {
        let a = Pass::new("A");
        let b = Pass::new("B");
        let choice = Choice::new("Pick")
            .when(Condition::boolean_equals("$.x", true), &a)
            .when(Condition::boolean_equals("$.y", true), &b);

        let state = choice.start_state();
        let node = state.node();
        if let StateKind::Choice { rules, default } = &node.kind {
            assert_eq!(rules.len(), 2);
            assert_eq!(rules[0].next.name(), "A");
            assert_eq!(rules[1].next.name(), "B");
            assert!(default.is_none());
        } else {
            panic!("not a choice state");
        }
    }

    #[test]
    fn test_otherwise_sets_default() {
        let fallback = Pass::new("Fallback");
        let choice = Choice::new("Pick").otherwise(&fallback);

        let state = choice.start_state();
        let node = state.node();
        if let StateKind::Choice { default, .. } = &node.kind {
            assert_eq!(default.as_ref().unwrap().name(), "Fallback");
        } else {
            panic!("not a choice state");
        }
    }
}
