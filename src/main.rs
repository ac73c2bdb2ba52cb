//! Renders an example workflow's compiled state graph as JSON.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use workflow_gen::cli;

#[derive(Parser)]
#[command(
    name = "workflow-gen",
    about = "Render an example workflow's compiled state graph as JSON",
    version
)]
struct Cli {
    /// Workflow name to render, or `list` to print the catalog
    workflow: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Cli::parse();
    let mut stdout = io::stdout().lock();
    match cli::run(args.workflow.as_deref(), &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
