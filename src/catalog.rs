//! The workflow catalog.
//!
//! A flat table of named example state machines. Each entry is a builder
//! returning the example's chain of states; [`render`] resolves the chain
//! into its state graph document.

use serde_json::{json, Value};

use crate::condition::Condition;
use crate::duration::Duration;
use crate::error::WorkflowError;
use crate::graph::StateGraph;
use crate::policy::{errors, CatchProps, RetryProps};
use crate::state::{
    Chain, Choice, Fail, Parallel, Pass, PassProps, ScriptTask, ScriptTaskProps, Succeed, Wait,
    WaitTime,
};

/// A catalog entry's builder function.
pub type WorkflowFn = fn() -> Chain;

/// Registered example workflows, in catalog order.
pub const WORKFLOWS: &[(&str, WorkflowFn)] = &[
    ("pass", pass),
    ("pass_chain", pass_chain),
    ("pass_result", pass_result),
    ("wait", wait),
    ("succeed", succeed),
    ("fail", fail),
    ("choice", choice),
    ("choice_fallback", choice_fallback),
    ("task", task),
    ("task_filter", task_filter),
    ("task_retry", task_retry),
    ("task_catch", task_catch),
    ("task_ctx", task_ctx),
    ("parallel", parallel),
];

/// The registered workflow names, in catalog order.
pub fn names() -> Vec<&'static str> {
    WORKFLOWS.iter().map(|(name, _)| *name).collect()
}

/// Looks up a workflow builder by name.
pub fn lookup(name: &str) -> Option<WorkflowFn> {
    WORKFLOWS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, workflow)| *workflow)
}

/// Builds the named workflow and renders its state graph document.
pub fn render(name: &str) -> Result<Value, WorkflowError> {
    let workflow = lookup(name).ok_or_else(|| WorkflowError::unknown_workflow(name))?;
    StateGraph::new(&workflow())?.to_graph_json()
}

fn pass() -> Chain {
    Chain::start(&Pass::new("Pass State"))
}

fn pass_chain() -> Chain {
    let p1 = Pass::new("P1");
    let p2 = Pass::new("P2");
    let p3 = Pass::new("P3");
    let p4 = Pass::new("P4");
    let p5 = Pass::new("P5");
    p1.next(&p2).next(&p3).next(&p4).next(&p5)
}

fn pass_result() -> Chain {
    Chain::start(&Pass::with_props(
        "Pass State(result)",
        PassProps {
            result: Some(json!({
                "result": {
                    "aaa": 111,
                    "bbb": 222,
                },
            })),
            result_path: Some("$.resultpath".to_string()),
            ..Default::default()
        },
    ))
}

fn wait() -> Chain {
    Chain::start(&Wait::new(
        "Wait State",
        WaitTime::duration(Duration::from_seconds(1)),
    ))
}

fn succeed() -> Chain {
    Chain::start(&Succeed::new("Succeed State"))
}

fn fail() -> Chain {
    Chain::start(&Fail::new("Fail State"))
}

fn choice() -> Chain {
    let choice = Choice::new("Choice State")
        .when(Condition::boolean_equals("$.bool", true), &succeed())
        .otherwise(&fail());
    Chain::start(&choice)
}

fn choice_fallback() -> Chain {
    let s1 = Pass::with_props(
        "State1",
        PassProps {
            result: Some(json!({ "bool": false })),
            ..Default::default()
        },
    );
    let s2 = Pass::new("State2");
    let s3 = Pass::new("State3");
    let pass = s1.next(&s2);
    let choice = Choice::new("Choice State")
        .when(Condition::boolean_equals("$.bool", false), &s3)
        .otherwise(&pass);
    s2.next(&choice)
}

fn task() -> Chain {
    Chain::start(&ScriptTask::new(
        "Task State",
        ScriptTaskProps {
            script_path: "_workflow/script/script1.sh".to_string(),
            ..Default::default()
        },
    ))
}

fn task_filter() -> Chain {
    Chain::start(&ScriptTask::new(
        "Task State",
        ScriptTaskProps {
            script_path: "_workflow/script/script1.sh".to_string(),
            input_path: Some("$.inputpath".to_string()),
            parameters: Some(json!({
                "aaa": 111,
                "old.$": "$.args",
                "args": ["param0", "param1", "param2"],
            })),
            result_selector: Some(json!({
                "bbb": 222,
                "resultselector.$": "$",
            })),
            result_path: Some("$.resultpath.outputpath".to_string()),
            output_path: Some("$.resultpath".to_string()),
        },
    ))
}

fn task_retry() -> Chain {
    let task = ScriptTask::new(
        "Task State",
        ScriptTaskProps {
            script_path: "_workflow/script/script2.sh".to_string(),
            result_path: Some("$.args".to_string()),
            ..Default::default()
        },
    );
    let chain = Parallel::new("Chain").branch(&task);
    chain.add_retry(RetryProps {
        interval: Some(Duration::from_seconds(0)),
        max_attempts: Some(10),
        backoff_rate: Some(0.0),
        ..Default::default()
    });
    Chain::start(&chain)
}

fn task_catch() -> Chain {
    let p1 = Pass::new("Pass State1");
    let task = ScriptTask::new(
        "Task State",
        ScriptTaskProps {
            // invalid resource path
            script_path: "::".to_string(),
            ..Default::default()
        },
    );
    task.add_catch(
        &p1,
        CatchProps {
            errors: vec![errors::ALL.to_string()],
            ..Default::default()
        },
    );
    Chain::start(&task)
}

fn task_ctx() -> Chain {
    Chain::start(&ScriptTask::new(
        "Task State",
        ScriptTaskProps {
            script_path: "_workflow/script/script1.sh".to_string(),
            result_selector: Some(json!({
                "ctx": {
                    "ctx_aaa.$": "$$.aaa",
                },
            })),
            ..Default::default()
        },
    ))
}

fn parallel() -> Chain {
    Chain::start(
        &Parallel::new("Parallel State")
            .branch(&pass())
            .branch(&succeed()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_in_catalog_order() {
        assert_eq!(
            names(),
            vec![
                "pass",
                "pass_chain",
                "pass_result",
                "wait",
                "succeed",
                "fail",
                "choice",
                "choice_fallback",
                "task",
                "task_filter",
                "task_retry",
                "task_catch",
                "task_ctx",
                "parallel",
            ]
        );
    }

    #[test]
    fn test_lookup_known_and_unknown() {
        assert!(lookup("pass").is_some());
        assert!(lookup("nope").is_none());
    }

    #[test]
    fn test_render_unknown_key() {
        let err = render("nope").unwrap_err();
        assert!(matches!(err, WorkflowError::UnknownWorkflow { name } if name == "nope"));
    }

    #[test]
    fn test_every_entry_renders() {
        for (name, _) in WORKFLOWS {
            let doc = render(name).unwrap_or_else(|err| panic!("{name} failed: {err}"));
            assert!(doc["StartAt"].is_string(), "{name} lacks StartAt");
            assert!(doc["States"].is_object(), "{name} lacks States");
        }
    }
}
