//! Command dispatch for the `workflow-gen` binary.
//!
//! Kept separate from `main` so the dispatch contract is testable
//! in-process against any writer.

use std::io::Write;

use crate::catalog;
use crate::error::WorkflowError;

/// Runs one invocation.
///
/// `list` prints the catalog names, one per line; any other argument renders
/// that workflow's state graph as pretty-printed JSON. A missing argument or
/// an unknown name is an error for the caller to report.
pub fn run(arg: Option<&str>, out: &mut dyn Write) -> Result<(), WorkflowError> {
    let arg = arg.ok_or(WorkflowError::MissingArgument)?;

    if arg == "list" {
        for name in catalog::names() {
            writeln!(out, "{name}")?;
        }
        return Ok(());
    }

    let doc = catalog::render(arg)?;
    let rendered = serde_json::to_string_pretty(&doc)?;
    writeln!(out, "{rendered}")?;
    Ok(())
}
