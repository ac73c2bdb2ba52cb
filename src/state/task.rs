//! Task state.

use serde_json::Value;

use super::{Catcher, Chain, Chainable, State, StateKind};
use crate::duration::Duration;
use crate::policy::{CatchProps, RetryProps};

/// Properties for a Task state.
#[derive(Debug, Clone, Default)]
pub struct TaskProps {
    /// The resource the task invokes, e.g. `script:tool.sh`.
    pub resource: String,
    /// Selects the portion of the input the state operates on.
    pub input_path: Option<String>,
    /// Payload template applied to the effective input.
    pub parameters: Option<Value>,
    /// Payload template reshaping the task result.
    pub result_selector: Option<Value>,
    /// Where in the input the result is placed.
    pub result_path: Option<String>,
    /// Selects the portion of the effective output passed on.
    pub output_path: Option<String>,
    /// How long the task may run before it is failed with `States.Timeout`.
    pub timeout: Option<Duration>,
    /// Expected heartbeat interval for long-running tasks.
    pub heartbeat: Option<Duration>,
}

/// A state that invokes an external resource.
#[derive(Clone)]
pub struct Task {
    state: State,
}

impl Task {
    /// Creates a Task state with the given properties.
    pub fn new(name: impl Into<String>, props: TaskProps) -> Self {
        Self {
            state: State::new(name, StateKind::Task(props)),
        }
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

impl Chainable for Task {
    fn start_state(&self) -> State {
        self.state.clone()
    }

    fn end_states(&self) -> Vec<State> {
        vec![self.state.clone()]
    }
}

/// Properties for a script task.
#[derive(Debug, Clone, Default)]
pub struct ScriptTaskProps {
    /// Path to the script the worker executes.
    pub script_path: String,
    /// Selects the portion of the input the state operates on.
    pub input_path: Option<String>,
    /// Payload template applied to the effective input.
    pub parameters: Option<Value>,
    /// Payload template reshaping the task result.
    pub result_selector: Option<Value>,
    /// Where in the input the result is placed.
    pub result_path: Option<String>,
    /// Selects the portion of the effective output passed on.
    pub output_path: Option<String>,
}

/// A Task state whose resource is a local script, addressed with the
/// `script:` scheme the workflow worker consumes.
///
/// The script path is embedded verbatim; whether it names a usable resource
/// is the worker's concern at execution time.
#[derive(Clone)]
pub struct ScriptTask {
    task: Task,
}

impl ScriptTask {
    /// Creates a Task state invoking `script:<script_path>`.
    pub fn new(name: impl Into<String>, props: ScriptTaskProps) -> Self {
        let task = Task::new(
            name,
            TaskProps {
                resource: format!("script:{}", props.script_path),
                input_path: props.input_path,
                parameters: props.parameters,
                result_selector: props.result_selector,
                result_path: props.result_path,
                output_path: props.output_path,
                timeout: None,
                heartbeat: None,
            },
        );
        Self { task }
    }

    /// Attaches a retry policy to this state.
    pub fn add_retry(&self, props: RetryProps) -> &Self {
        self.task.add_retry(props);
        self
    }

    /// Attaches a catch policy routing matched errors into `handler`.
    pub fn add_catch(&self, handler: &dyn Chainable, props: CatchProps) -> &Self {
        self.task.add_catch(handler, props);
        self
    }

    /// Transitions this state into `next`.
    pub fn next(&self, next: &dyn Chainable) -> Chain {
        self.task.next(next)
    }
}

impl Chainable for ScriptTask {
    fn start_state(&self) -> State {
        self.task.start_state()
    }

    fn end_states(&self) -> Vec<State> {
        self.task.end_states()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_task_resource_scheme() {
        let task = ScriptTask::new(
            "Task State",
            ScriptTaskProps {
                script_path: "tools/build.sh".to_string(),
                ..Default::default()
            },
        );
        let state = task.start_state();
        let node = state.node();
        if let StateKind::Task(props) = &node.kind {
            assert_eq!(props.resource, "script:tools/build.sh");
        } else {
            panic!("not a task state");
        }
    }

    #[test]
    fn test_script_task_keeps_malformed_path() {
        // The worker rejects this at execution time; the definition renders.
        let task = ScriptTask::new(
            "Task State",
            ScriptTaskProps {
                script_path: "::".to_string(),
                ..Default::default()
            },
        );
        let state = task.start_state();
        let node = state.node();
        if let StateKind::Task(props) = &node.kind {
            assert_eq!(props.resource, "script:::");
        } else {
            panic!("not a task state");
        }
    }

    #[test]
    fn test_add_catch_binds_handler() {
        let recover = crate::state::Pass::new("Recover");
        let task = Task::new(
            "Do",
            TaskProps {
                resource: "script:run.sh".to_string(),
                ..Default::default()
            },
        );
        task.add_catch(&recover, CatchProps::new());

        let state = task.start_state();
        let node = state.node();
        assert_eq!(node.catches.len(), 1);
        assert_eq!(node.catches[0].handler.name(), "Recover");
    }
}
