//! State builders and transition chaining.
//!
//! States are named nodes holding kind-specific properties plus the common
//! transition slot. Nodes are reference-counted and interior-mutable so the
//! same state can sit in several chains at once and transitions may loop
//! back into earlier states; the graph resolver handles cycles.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use crate::condition::Condition;
use crate::policy::{CatchProps, RetryProps};

mod choice;
mod fail;
mod parallel;
mod pass;
mod succeed;
mod task;
mod wait;

pub use choice::Choice;
pub use fail::{Fail, FailProps};
pub use parallel::{Parallel, ParallelProps};
pub use pass::{Pass, PassProps};
pub use succeed::Succeed;
pub use task::{ScriptTask, ScriptTaskProps, Task, TaskProps};
pub use wait::{Wait, WaitTime};

/// Shared handle to a state node.
///
/// Cloning a `State` yields another handle to the same node.
#[derive(Clone)]
pub struct State {
    inner: Rc<RefCell<StateNode>>,
}

pub(crate) struct StateNode {
    pub(crate) name: String,
    pub(crate) kind: StateKind,
    pub(crate) next: Option<State>,
    pub(crate) retries: Vec<RetryProps>,
    pub(crate) catches: Vec<Catcher>,
}

pub(crate) enum StateKind {
    Pass(PassProps),
    Wait(WaitTime),
    Succeed,
    Fail(FailProps),
    Choice {
        rules: Vec<ChoiceRule>,
        default: Option<State>,
    },
    Parallel {
        branches: Vec<State>,
        props: ParallelProps,
    },
    Task(TaskProps),
}

pub(crate) struct ChoiceRule {
    pub(crate) condition: Condition,
    pub(crate) next: State,
}

/// A catch policy bound to its handler state.
pub(crate) struct Catcher {
    pub(crate) props: CatchProps,
    pub(crate) handler: State,
}

impl State {
    pub(crate) fn new(name: impl Into<String>, kind: StateKind) -> Self {
        Self {
            inner: Rc::new(RefCell::new(StateNode {
                name: name.into(),
                kind,
                next: None,
                retries: Vec::new(),
                catches: Vec::new(),
            })),
        }
    }

    /// The state's name, which is its identifier in the rendered graph.
    pub fn name(&self) -> String {
        self.inner.borrow().name.clone()
    }

    pub(crate) fn node(&self) -> Ref<'_, StateNode> {
        self.inner.borrow()
    }

    pub(crate) fn node_mut(&self) -> RefMut<'_, StateNode> {
        self.inner.borrow_mut()
    }

    pub(crate) fn set_next(&self, next: &State) {
        self.inner.borrow_mut().next = Some(next.clone());
    }

    /// Node identity, for cycle detection during traversal.
    pub(crate) fn id(&self) -> usize {
        Rc::as_ptr(&self.inner) as usize
    }
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State").field("name", &self.name()).finish()
    }
}

/// Anything that can start a chain of states.
pub trait Chainable {
    /// The first state of this fragment.
    fn start_state(&self) -> State;

    /// The states new transitions attach to when this fragment is extended.
    /// Terminal states (Succeed, Fail, Choice) expose no ends.
    fn end_states(&self) -> Vec<State>;
}

/// A fragment of chained states: a start plus the open ends that the next
/// fragment attaches to.
#[derive(Clone)]
pub struct Chain {
    start: State,
    ends: Vec<State>,
}

impl Chain {
    /// Wraps a single state or an existing fragment as a chain.
    pub fn start(chainable: &dyn Chainable) -> Self {
        Self {
            start: chainable.start_state(),
            ends: chainable.end_states(),
        }
    }

    /// Transitions every open end of this chain into `next`.
    pub fn next(&self, next: &dyn Chainable) -> Chain {
        let target = next.start_state();
        for end in &self.ends {
            end.set_next(&target);
        }
        Chain {
            start: self.start.clone(),
            ends: next.end_states(),
        }
    }
}

impl Chainable for Chain {
    fn start_state(&self) -> State {
        self.start.clone()
    }

    fn end_states(&self) -> Vec<State> {
        self.ends.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_links_states_in_order() {
        let p1 = Pass::new("P1");
        let p2 = Pass::new("P2");
        let p3 = Pass::new("P3");
        let chain = p1.next(&p2).next(&p3);

        assert_eq!(chain.start_state().name(), "P1");
        assert_eq!(p1.start_state().node().next.as_ref().unwrap().name(), "P2");
        assert_eq!(p2.start_state().node().next.as_ref().unwrap().name(), "P3");
        assert!(p3.start_state().node().next.is_none());
    }

    #[test]
    fn test_chain_ends_move_to_tail() {
        let p1 = Pass::new("P1");
        let p2 = Pass::new("P2");
        let chain = p1.next(&p2);
        let ends = chain.end_states();
        assert_eq!(ends.len(), 1);
        assert_eq!(ends[0].name(), "P2");
    }

    #[test]
    fn test_terminal_states_have_no_ends() {
        assert!(Succeed::new("Done").end_states().is_empty());
        assert!(Fail::new("Bad").end_states().is_empty());
        assert!(Choice::new("Pick").end_states().is_empty());
    }

    #[test]
    fn test_shared_handles_alias_one_node() {
        let p = Pass::new("P");
        let a = p.start_state();
        let b = p.start_state();
        assert_eq!(a.id(), b.id());

        let other = Pass::new("P");
        assert_ne!(a.id(), other.start_state().id());
    }

    #[test]
    fn test_chaining_into_earlier_state_forms_cycle() {
        let s1 = Pass::new("State1");
        let s2 = Pass::new("State2");
        let back = s1.next(&s2);
        back.next(&s1);

        let next_of_s2 = s2.start_state().node().next.as_ref().unwrap().clone();
        assert_eq!(next_of_s2.id(), s1.start_state().id());
    }
}
