//! # workflow-gen
//!
//! Example state machine definitions, and the pieces they are built from:
//! typed state builders (Pass, Wait, Choice, Parallel, Task, Succeed, Fail),
//! transition chaining, retry/catch policies, and a graph resolver that
//! serializes a definition to its state-language JSON document.
//!
//! Definitions are data. Nothing here executes a workflow; rendering a
//! definition is a pure, deterministic transformation from builders to JSON.
//!
//! ## Defining and rendering a machine
//!
//! ```
//! use workflow_gen::{Pass, StateGraph};
//!
//! let hello = Pass::new("Hello");
//! let chain = hello.next(&Pass::new("World"));
//!
//! let graph = StateGraph::new(&chain)?;
//! let doc = graph.to_graph_json()?;
//! assert_eq!(doc["StartAt"], "Hello");
//! assert_eq!(doc["States"]["Hello"]["Next"], "World");
//! # Ok::<(), workflow_gen::WorkflowError>(())
//! ```
//!
//! ## The catalog
//!
//! [`catalog`] holds the named example workflows the `workflow-gen` binary
//! serves:
//!
//! ```
//! let doc = workflow_gen::catalog::render("pass")?;
//! assert_eq!(doc["StartAt"], "Pass State");
//! # Ok::<(), workflow_gen::WorkflowError>(())
//! ```

pub mod catalog;
pub mod cli;
pub mod condition;
pub mod duration;
pub mod error;
pub mod graph;
pub mod path;
pub mod policy;
pub mod state;

pub use condition::Condition;
pub use duration::Duration;
pub use error::WorkflowError;
pub use graph::StateGraph;
pub use policy::{errors, CatchProps, RetryProps};
pub use state::{
    Chain, Chainable, Choice, Fail, FailProps, Parallel, ParallelProps, Pass, PassProps,
    ScriptTask, ScriptTaskProps, State, Succeed, Task, TaskProps, Wait, WaitTime,
};
