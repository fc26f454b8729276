//! Main workflow orchestration logic
//!
//! Maps parsed options onto one of three linear sequences (init, publish,
//! delete-tag) and runs them step by step. The first failing step aborts the
//! sequence; nothing is retried and nothing already done is rolled back.

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{Version, Workflow, WorkflowKind, WorkflowOptions};
use crate::error::Result;
use crate::git::{RepoInitializer, RepoState, TagManager};
use crate::package::PackageRunner;
use crate::process::CommandRunner;
use crate::ui;

/// One step of the publish sequence, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStep {
    CreateTag,
    PushTag,
    CleanArtifacts,
    Build,
    Upload,
}

impl PublishStep {
    pub fn name(&self) -> &'static str {
        match self {
            PublishStep::CreateTag => "create-tag",
            PublishStep::PushTag => "push-tag",
            PublishStep::CleanArtifacts => "clean",
            PublishStep::Build => "build",
            PublishStep::Upload => "upload",
        }
    }
}

/// Steps a publish will run for the given flags.
///
/// `--tag-only` stops after the tag push. `--no-build` drops clean and build
/// but keeps upload. `--build-only` and `--no-upload` stop before upload.
pub fn plan_publish(options: &WorkflowOptions) -> Vec<PublishStep> {
    let mut steps = vec![PublishStep::CreateTag, PublishStep::PushTag];
    if options.tag_only {
        return steps;
    }

    if !options.no_build {
        steps.push(PublishStep::CleanArtifacts);
        steps.push(PublishStep::Build);
    }
    if options.build_only || options.no_upload {
        return steps;
    }

    steps.push(PublishStep::Upload);
    steps
}

/// Lifecycle of a single invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    ParsingArgs,
    Executing(WorkflowKind),
    Done,
    Failed,
}

/// Result of a successful workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub kind: WorkflowKind,

    /// Steps that ran, in order
    pub completed: Vec<&'static str>,

    /// Steps that found nothing to do (repository already initialized, clean tree)
    pub skipped: Vec<&'static str>,
}

impl WorkflowResult {
    fn new(kind: WorkflowKind) -> Self {
        WorkflowResult {
            kind,
            completed: Vec::new(),
            skipped: Vec::new(),
        }
    }

    fn record(&mut self, step: &'static str, ran: bool) {
        if ran {
            self.completed.push(step);
        } else {
            self.skipped.push(step);
        }
    }
}

/// Run `action` as `step`, reporting a failure with the step named
fn attempt<T>(step: &str, action: impl FnOnce() -> Result<T>) -> Result<T> {
    log::info!("step '{}' started", step);
    action().map_err(|e| {
        ui::display_error(&format!("Step '{}' failed: {}", step, e));
        e
    })
}

/// Drives the selected workflow against a command runner and repository view
pub struct Orchestrator<'a, R: CommandRunner, S: RepoState> {
    runner: &'a R,
    repo: &'a S,
    config: &'a Config,
    state: WorkflowState,
}

impl<'a, R: CommandRunner, S: RepoState> Orchestrator<'a, R, S> {
    pub fn new(runner: &'a R, repo: &'a S, config: &'a Config) -> Self {
        Orchestrator {
            runner,
            repo,
            config,
            state: WorkflowState::Idle,
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    /// Select the workflow from `options` and run it.
    ///
    /// Usage errors are returned before any command runs.
    pub fn dispatch(&mut self, options: WorkflowOptions) -> Result<WorkflowResult> {
        self.state = WorkflowState::ParsingArgs;

        let workflow = match Workflow::from_options(options) {
            Ok(workflow) => workflow,
            Err(e) => {
                self.state = WorkflowState::Failed;
                return Err(e);
            }
        };

        self.execute(&workflow)
    }

    /// Run an already selected workflow to completion or first failure
    pub fn execute(&mut self, workflow: &Workflow) -> Result<WorkflowResult> {
        let kind = workflow.kind();
        self.state = WorkflowState::Executing(kind);
        log::info!("running {} workflow", kind.name());

        let mut result = WorkflowResult::new(kind);
        let outcome = match workflow {
            Workflow::InitRepo {
                repo_name,
                private,
                commit_message,
            } => self.run_init(repo_name.as_deref(), *private, commit_message, &mut result),
            Workflow::Publish { version, options } => {
                self.run_publish(version, options, &mut result)
            }
            Workflow::DeleteTag { version } => self.run_delete_tag(version, &mut result),
        };

        match outcome {
            Ok(()) => {
                self.state = WorkflowState::Done;
                Ok(result)
            }
            Err(e) => {
                self.state = WorkflowState::Failed;
                log::debug!(
                    "{} workflow failed after {:?}",
                    kind.name(),
                    result.completed
                );
                Err(e)
            }
        }
    }

    fn run_init(
        &self,
        repo_name: Option<&str>,
        private: bool,
        commit_message: &str,
        result: &mut WorkflowResult,
    ) -> Result<()> {
        let init = RepoInitializer::new(self.runner, self.repo, self.config);
        let name = match repo_name {
            Some(name) => name.to_string(),
            None => attempt("create-remote", || init.default_repo_name())?,
        };

        let visibility = if private { "private" } else { "public" };
        ui::display_plan(
            &format!("Creating {} repository {}", visibility, name),
            &["init", "commit", "create-remote", "push"],
        );

        let created = attempt("init", || init.ensure_repo())?;
        if !created {
            ui::display_boundary_warning(&BoundaryWarning::RepositoryExists);
        }
        result.record("init", created);

        let committed = attempt("commit", || init.commit_all(commit_message))?;
        if !committed {
            ui::display_boundary_warning(&BoundaryWarning::NothingToCommit);
        }
        result.record("commit", committed);

        attempt("create-remote", || init.create_remote(&name, private))?;
        result.record("create-remote", true);

        attempt("push", || init.push_all())?;
        result.record("push", true);

        ui::display_success(&format!("Successfully created repository: {}", name));
        Ok(())
    }

    fn run_publish(
        &self,
        version: &Version,
        options: &WorkflowOptions,
        result: &mut WorkflowResult,
    ) -> Result<()> {
        let plan = plan_publish(options);
        let names: Vec<&str> = plan.iter().map(PublishStep::name).collect();
        ui::display_plan(&format!("Publishing {}", version), &names);

        if !version.is_semver() {
            ui::display_boundary_warning(&BoundaryWarning::NonSemverVersion {
                version: version.number().to_string(),
            });
        }

        let tags = TagManager::new(self.runner, self.repo, self.config);
        let package = PackageRunner::new(self.runner, self.config);

        for step in &plan {
            let name = step.name();
            match step {
                PublishStep::CreateTag => {
                    attempt(name, || tags.create_tag(version, options.annotate))?;
                    ui::display_success(&format!("Created tag {}", version));
                }
                PublishStep::PushTag => {
                    attempt(name, || tags.push_tag(version))?;
                    ui::display_success(&format!(
                        "Pushed tag {} to {}",
                        version, self.config.remote
                    ));
                }
                PublishStep::CleanArtifacts => {
                    let removed = attempt(name, || package.clean_artifacts())?;
                    log::debug!("cleaned {} path(s)", removed.len());
                }
                PublishStep::Build => {
                    attempt(name, || package.build())?;
                    ui::display_success("Successfully built package");
                }
                PublishStep::Upload => {
                    if !plan.contains(&PublishStep::Build) {
                        let existing = attempt(name, || package.find_artifacts())?;
                        if !existing.is_empty() {
                            ui::display_boundary_warning(&BoundaryWarning::ReusingArtifacts {
                                count: existing.len(),
                                dir: self.config.dist_path().display().to_string(),
                            });
                        }
                    }
                    let count = attempt(name, || package.upload())?;
                    ui::display_success(&format!("Uploaded {} artifact(s)", count));
                }
            }
            result.completed.push(name);
        }

        if plan.contains(&PublishStep::Upload) {
            ui::display_success(&format!("Successfully published version {}", version));
        } else {
            ui::display_status(&format!(
                "Stopped after {} for {}, nothing uploaded",
                names.last().copied().unwrap_or("push-tag"),
                version
            ));
        }
        Ok(())
    }

    fn run_delete_tag(&self, version: &Version, result: &mut WorkflowResult) -> Result<()> {
        ui::display_plan(
            &format!("Deleting tag {}", version),
            &["delete-tag", "delete-remote-tag"],
        );

        let tags = TagManager::new(self.runner, self.repo, self.config);
        let outcome = tags.delete_everywhere(version);

        match &outcome.local {
            Ok(()) => {
                ui::display_success(&format!("Deleted local tag {}", outcome.tag));
                result.completed.push("delete-tag");
            }
            Err(e) => ui::display_error(&format!("Step 'delete-tag' failed: {}", e)),
        }
        match &outcome.remote {
            Ok(()) => {
                ui::display_success(&format!(
                    "Deleted tag {} from {}",
                    outcome.tag, self.config.remote
                ));
                result.completed.push("delete-remote-tag");
            }
            Err(e) => ui::display_error(&format!("Step 'delete-remote-tag' failed: {}", e)),
        }

        if outcome.is_success() {
            ui::display_success(&format!(
                "Successfully deleted tag {} locally and from {}",
                outcome.tag, self.config.remote
            ));
        }
        outcome.into_result()
    }
}
