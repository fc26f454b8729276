//! Command-line entry point: argument definitions and workflow dispatch.

pub mod args;
pub mod orchestration;

pub use args::Args;
pub use orchestration::{Orchestrator, PublishStep, WorkflowResult, WorkflowState};

use anyhow::{Context, Result};

use crate::git::Git2Repository;
use crate::process::SystemRunner;

/// Run the workflow selected by `args` against the real tools
pub fn run(args: &Args) -> Result<WorkflowResult> {
    let current_dir = std::env::current_dir().context("Failed to read the current directory")?;
    let config = args.config(current_dir);
    log::debug!("configuration: {:?}", config);

    if !config.project_dir.is_dir() {
        anyhow::bail!(
            "Project directory {} does not exist",
            config.project_dir.display()
        );
    }

    let runner = SystemRunner;
    let repo = Git2Repository::new(&config.project_dir);
    let mut orchestrator = Orchestrator::new(&runner, &repo, &config);

    let result = orchestrator.dispatch(args.workflow_options())?;
    Ok(result)
}
