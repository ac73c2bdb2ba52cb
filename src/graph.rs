//! State graph resolution and serialization.
//!
//! A [`StateGraph`] is the resolved form of a state machine definition: the
//! set of states reachable from the start state, in discovery order. It
//! validates the definition (unique names, well-formed paths, non-empty
//! Parallel and Choice states) and renders the flat
//! `{"StartAt": ..., "States": {...}}` document. Parallel branches resolve
//! to independent sub-documents and do not appear in the outer `States` map.

use std::collections::{HashSet, VecDeque};

use serde_json::{json, Map, Value};

use crate::error::WorkflowError;
use crate::path;
use crate::state::{Chainable, State, StateKind, WaitTime};

/// The resolved, renderable form of a state machine.
#[derive(Debug)]
pub struct StateGraph {
    start: State,
    states: Vec<State>,
}

impl StateGraph {
    /// Resolves the graph reachable from `definition`'s start state.
    pub fn new(definition: &dyn Chainable) -> Result<Self, WorkflowError> {
        Self::from_start(definition.start_state())
    }

    fn from_start(start: State) -> Result<Self, WorkflowError> {
        let mut states = Vec::new();
        let mut seen = HashSet::new();
        let mut names = HashSet::new();
        let mut queue = VecDeque::from([start.clone()]);

        while let Some(state) = queue.pop_front() {
            if !seen.insert(state.id()) {
                continue;
            }
            let name = state.name();
            if !names.insert(name.clone()) {
                return Err(WorkflowError::duplicate_state(name));
            }

            let node = state.node();
            if let StateKind::Choice { rules, default } = &node.kind {
                for rule in rules {
                    queue.push_back(rule.next.clone());
                }
                if let Some(default) = default {
                    queue.push_back(default.clone());
                }
            }
            for catcher in &node.catches {
                queue.push_back(catcher.handler.clone());
            }
            if let Some(next) = &node.next {
                queue.push_back(next.clone());
            }
            drop(node);
            states.push(state);
        }

        tracing::debug!(start = %start.name(), states = states.len(), "resolved state graph");
        Ok(Self { start, states })
    }

    /// The name of the graph's start state.
    pub fn start_state_name(&self) -> String {
        self.start.name()
    }

    /// Renders the graph as its serializable document.
    ///
    /// Rendering is pure: the same definition always yields the same
    /// document, with `States` in discovery order.
    pub fn to_graph_json(&self) -> Result<Value, WorkflowError> {
        let mut states = Map::new();
        for state in &self.states {
            states.insert(state.name(), render_state(state)?);
        }

        let mut doc = Map::new();
        doc.insert("StartAt".to_string(), json!(self.start.name()));
        doc.insert("States".to_string(), Value::Object(states));
        Ok(Value::Object(doc))
    }
}

fn render_state(state: &State) -> Result<Value, WorkflowError> {
    let node = state.node();
    let mut map = Map::new();

    match &node.kind {
        StateKind::Pass(props) => {
            map.insert("Type".to_string(), json!("Pass"));
            insert_path(&mut map, "InputPath", &props.input_path)?;
            insert_template(&mut map, "Parameters", &props.parameters)?;
            if let Some(result) = &props.result {
                map.insert("Result".to_string(), result.clone());
            }
            insert_path(&mut map, "ResultPath", &props.result_path)?;
            insert_path(&mut map, "OutputPath", &props.output_path)?;
        }
        StateKind::Wait(time) => {
            map.insert("Type".to_string(), json!("Wait"));
            match time {
                WaitTime::Duration(duration) => {
                    map.insert("Seconds".to_string(), json!(duration.to_seconds()));
                }
                WaitTime::Timestamp(timestamp) => {
                    map.insert(
                        "Timestamp".to_string(),
                        json!(WaitTime::rendered_timestamp(timestamp)),
                    );
                }
                WaitTime::SecondsPath(seconds_path) => {
                    path::validate(seconds_path)?;
                    map.insert("SecondsPath".to_string(), json!(seconds_path));
                }
                WaitTime::TimestampPath(timestamp_path) => {
                    path::validate(timestamp_path)?;
                    map.insert("TimestampPath".to_string(), json!(timestamp_path));
                }
            }
        }
        StateKind::Succeed => {
            map.insert("Type".to_string(), json!("Succeed"));
        }
        StateKind::Fail(props) => {
            map.insert("Type".to_string(), json!("Fail"));
            if let Some(error) = &props.error {
                map.insert("Error".to_string(), json!(error));
            }
            if let Some(cause) = &props.cause {
                map.insert("Cause".to_string(), json!(cause));
            }
        }
        StateKind::Choice { rules, default } => {
            map.insert("Type".to_string(), json!("Choice"));
            if rules.is_empty() && default.is_none() {
                return Err(WorkflowError::validation(format!(
                    "Choice state {:?} needs at least one rule or a default",
                    node.name
                )));
            }
            let mut choices = Vec::with_capacity(rules.len());
            for rule in rules {
                rule.condition.validate()?;
                let mut rule_json = match rule.condition.to_json() {
                    Value::Object(obj) => obj,
                    // Conditions always render as comparison objects.
                    other => {
                        return Err(WorkflowError::Serialization {
                            message: format!("condition rendered as non-object {other}"),
                        })
                    }
                };
                rule_json.insert("Next".to_string(), json!(rule.next.name()));
                choices.push(Value::Object(rule_json));
            }
            map.insert("Choices".to_string(), Value::Array(choices));
            if let Some(default) = default {
                map.insert("Default".to_string(), json!(default.name()));
            }
        }
        StateKind::Parallel { branches, props } => {
            map.insert("Type".to_string(), json!("Parallel"));
            if branches.is_empty() {
                return Err(WorkflowError::validation(format!(
                    "Parallel state {:?} needs at least one branch",
                    node.name
                )));
            }
            let mut rendered = Vec::with_capacity(branches.len());
            for branch in branches {
                let graph = StateGraph::from_start(branch.clone())?;
                rendered.push(graph.to_graph_json()?);
            }
            map.insert("Branches".to_string(), Value::Array(rendered));
            insert_path(&mut map, "InputPath", &props.input_path)?;
            insert_template(&mut map, "ResultSelector", &props.result_selector)?;
            insert_path(&mut map, "ResultPath", &props.result_path)?;
            insert_path(&mut map, "OutputPath", &props.output_path)?;
        }
        StateKind::Task(props) => {
            map.insert("Type".to_string(), json!("Task"));
            if props.resource.is_empty() {
                return Err(WorkflowError::validation(format!(
                    "Task state {:?} needs a resource",
                    node.name
                )));
            }
            map.insert("Resource".to_string(), json!(props.resource));
            insert_path(&mut map, "InputPath", &props.input_path)?;
            insert_template(&mut map, "Parameters", &props.parameters)?;
            insert_template(&mut map, "ResultSelector", &props.result_selector)?;
            insert_path(&mut map, "ResultPath", &props.result_path)?;
            insert_path(&mut map, "OutputPath", &props.output_path)?;
            if let Some(timeout) = props.timeout {
                map.insert("TimeoutSeconds".to_string(), json!(timeout.to_seconds()));
            }
            if let Some(heartbeat) = props.heartbeat {
                map.insert("HeartbeatSeconds".to_string(), json!(heartbeat.to_seconds()));
            }
        }
    }

    if !node.retries.is_empty() {
        let retries: Vec<Value> = node.retries.iter().map(|props| props.to_json()).collect();
        map.insert("Retry".to_string(), Value::Array(retries));
    }
    if !node.catches.is_empty() {
        let mut catches = Vec::with_capacity(node.catches.len());
        for catcher in &node.catches {
            catcher.props.validate()?;
            catches.push(catcher.props.to_json(&catcher.handler.name()));
        }
        map.insert("Catch".to_string(), Value::Array(catches));
    }

    // Succeed, Fail and Choice carry no transition of their own.
    if allows_transition(&node.kind) {
        match &node.next {
            Some(next) => {
                map.insert("Next".to_string(), json!(next.name()));
            }
            None => {
                map.insert("End".to_string(), json!(true));
            }
        }
    }

    Ok(Value::Object(map))
}

fn allows_transition(kind: &StateKind) -> bool {
    matches!(
        kind,
        StateKind::Pass(_) | StateKind::Wait(_) | StateKind::Parallel { .. } | StateKind::Task(_)
    )
}

fn insert_path(
    map: &mut Map<String, Value>,
    key: &str,
    value: &Option<String>,
) -> Result<(), WorkflowError> {
    if let Some(value) = value {
        path::validate(value)?;
        map.insert(key.to_string(), json!(value));
    }
    Ok(())
}

fn insert_template(
    map: &mut Map<String, Value>,
    key: &str,
    value: &Option<Value>,
) -> Result<(), WorkflowError> {
    if let Some(value) = value {
        path::validate_payload_template(value)?;
        map.insert(key.to_string(), value.clone());
    }
    Ok(())
}
