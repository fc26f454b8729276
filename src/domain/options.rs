use crate::domain::Version;
use crate::error::{PypublishError, Result};

/// Default commit message used when initializing a repository
pub const DEFAULT_COMMIT_MESSAGE: &str = "Initial commit";

/// Flags selected on the command line.
///
/// Flags are not validated against each other; [`Workflow::from_options`]
/// applies precedence instead of rejecting odd combinations.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowOptions {
    pub init_repo: bool,
    pub private: bool,
    pub repo_name: Option<String>,
    pub version: Option<String>,
    pub tag_only: bool,
    pub build_only: bool,
    pub no_build: bool,
    pub no_upload: bool,
    pub delete_tag: bool,
    pub annotate: bool,
    pub commit_message: String,
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        WorkflowOptions {
            init_repo: false,
            private: false,
            repo_name: None,
            version: None,
            tag_only: false,
            build_only: false,
            no_build: false,
            no_upload: false,
            delete_tag: false,
            annotate: false,
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
        }
    }
}

impl WorkflowOptions {
    /// Options for a publish of `version` with every step enabled
    pub fn publish(version: impl Into<String>) -> Self {
        WorkflowOptions {
            version: Some(version.into()),
            ..Default::default()
        }
    }
}

/// The sequence selected for this invocation
#[derive(Debug, Clone, PartialEq)]
pub enum Workflow {
    InitRepo {
        repo_name: Option<String>,
        private: bool,
        commit_message: String,
    },
    Publish {
        version: Version,
        options: WorkflowOptions,
    },
    DeleteTag {
        version: Version,
    },
}

impl Workflow {
    /// Selects the workflow: `--init-repo` first, then `--delete-tag`, then publish.
    pub fn from_options(options: WorkflowOptions) -> Result<Self> {
        if options.init_repo {
            return Ok(Workflow::InitRepo {
                repo_name: options.repo_name,
                private: options.private,
                commit_message: options.commit_message,
            });
        }

        if options.delete_tag {
            let raw = options
                .version
                .as_deref()
                .ok_or_else(|| PypublishError::usage("version is required for --delete-tag"))?;
            return Ok(Workflow::DeleteTag {
                version: Version::parse(raw)?,
            });
        }

        let raw = options
            .version
            .as_deref()
            .ok_or_else(|| PypublishError::usage("version is required"))?;
        let version = Version::parse(raw)?;

        Ok(Workflow::Publish { version, options })
    }

    pub fn kind(&self) -> WorkflowKind {
        match self {
            Workflow::InitRepo { .. } => WorkflowKind::Init,
            Workflow::Publish { .. } => WorkflowKind::Publish,
            Workflow::DeleteTag { .. } => WorkflowKind::DeleteTag,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowKind {
    Init,
    Publish,
    DeleteTag,
}

impl WorkflowKind {
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowKind::Init => "init-repo",
            WorkflowKind::Publish => "publish",
            WorkflowKind::DeleteTag => "delete-tag",
        }
    }
}
