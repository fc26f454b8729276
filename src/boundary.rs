use std::fmt;

/// Non-fatal conditions met while running a workflow.
/// These are reported to the user but never stop the sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// `--init-repo` found existing repository metadata and skipped `git init`
    RepositoryExists,
    /// The working tree was clean, so no commit was created
    NothingToCommit,
    /// The version is usable as a tag but is not a semantic version
    NonSemverVersion { version: String },
    /// Upload runs without a build and picks up earlier artifacts
    ReusingArtifacts { count: usize, dir: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::RepositoryExists => {
                write!(f, "Git repository already exists, skipping init")
            }
            BoundaryWarning::NothingToCommit => {
                write!(f, "Working tree is clean, nothing to commit")
            }
            BoundaryWarning::NonSemverVersion { version } => {
                write!(f, "Version '{}' is not a semantic version", version)
            }
            BoundaryWarning::ReusingArtifacts { count, dir } => {
                let noun = if *count == 1 { "artifact" } else { "artifacts" };
                write!(
                    f,
                    "Build skipped, uploading {} existing {} from {}",
                    count, noun, dir
                )
            }
        }
    }
}
