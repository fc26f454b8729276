use std::path::PathBuf;

use clap::ArgAction;

use crate::config::{Config, ToolsConfig, DEFAULT_DIST_DIR, DEFAULT_REMOTE};
use crate::domain::options::DEFAULT_COMMIT_MESSAGE;
use crate::domain::WorkflowOptions;

const EXAMPLES: &str = "\
Examples:
  pypublish --init-repo              # Initialize git and create GitHub repo
  pypublish --init-repo myproject    # Initialize with custom repo name
  pypublish --init-repo --private    # Create private GitHub repo
  pypublish 0.2.0                    # Full publish: tag, build, upload
  pypublish v0.2.0                   # Full publish: tag, build, upload
  pypublish 0.2.0 --tag-only         # Only create and push tag
  pypublish 0.2.0 --build-only       # Tag and build, don't upload
  pypublish 0.2.0 --no-build         # Tag and upload existing dist
  pypublish 0.2.0 --no-upload        # Tag and build, don't upload
  pypublish --delete-tag 0.2.0       # Delete tag locally and from origin";

#[derive(clap::Parser, Debug)]
#[command(
    name = "pypublish",
    version,
    about = "Publish or delete package versions",
    after_help = EXAMPLES
)]
pub struct Args {
    #[arg(
        value_name = "VERSION",
        help = "Version number (e.g., 0.2.0 or v0.2.0) or repo name for --init-repo"
    )]
    pub target: Option<String>,

    #[arg(long, help = "Initialize git repo and create GitHub repository")]
    pub init_repo: bool,

    #[arg(long, help = "Create private GitHub repository (use with --init-repo)")]
    pub private: bool,

    #[arg(long, help = "Delete the tag locally and from the remote instead of publishing")]
    pub delete_tag: bool,

    #[arg(long, help = "Only create and push the git tag")]
    pub tag_only: bool,

    #[arg(long, help = "Create tag and build package, but do not upload")]
    pub build_only: bool,

    #[arg(long, help = "Skip build step (use existing dist/)")]
    pub no_build: bool,

    #[arg(long, help = "Skip upload step (same as --build-only)")]
    pub no_upload: bool,

    #[arg(long, help = "Create an annotated tag instead of a lightweight one")]
    pub annotate: bool,

    #[arg(
        short,
        long,
        default_value = DEFAULT_COMMIT_MESSAGE,
        help = "Commit message used by --init-repo"
    )]
    pub message: String,

    #[arg(
        long,
        env = "PYPUBLISH_REMOTE",
        default_value = DEFAULT_REMOTE,
        help = "Git remote to push tags and branches to"
    )]
    pub remote: String,

    #[arg(
        long,
        env = "PYPUBLISH_PYTHON",
        default_value = "python",
        help = "Python interpreter used to run the build frontend"
    )]
    pub python: String,

    #[arg(
        long,
        env = "PYPUBLISH_TWINE",
        default_value = "twine",
        help = "Upload tool"
    )]
    pub twine: String,

    #[arg(
        long,
        env = "PYPUBLISH_DIST_DIR",
        default_value = DEFAULT_DIST_DIR,
        help = "Build output directory, relative to the project directory"
    )]
    pub dist_dir: PathBuf,

    #[arg(
        long,
        env = "PYPUBLISH_REPOSITORY",
        help = "Repository section passed to twine (e.g. testpypi)"
    )]
    pub repository: Option<String>,

    #[arg(
        short = 'C',
        long,
        help = "Run as if started in this directory (default: current directory)"
    )]
    pub project_dir: Option<PathBuf>,

    #[arg(short, long, action = ArgAction::Count, help = "Increase log verbosity (-v, -vv)")]
    pub verbose: u8,
}

impl Args {
    /// Workflow flags; the positional argument is the repo name under `--init-repo`
    pub fn workflow_options(&self) -> WorkflowOptions {
        let (repo_name, version) = if self.init_repo {
            (self.target.clone(), None)
        } else {
            (None, self.target.clone())
        };

        WorkflowOptions {
            init_repo: self.init_repo,
            private: self.private,
            repo_name,
            version,
            tag_only: self.tag_only,
            build_only: self.build_only,
            no_build: self.no_build,
            no_upload: self.no_upload,
            delete_tag: self.delete_tag,
            annotate: self.annotate,
            commit_message: self.message.clone(),
        }
    }

    /// Runtime configuration rooted at `project_dir`, or at `current_dir` when not given
    pub fn config(&self, current_dir: PathBuf) -> Config {
        let project_dir = match &self.project_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => current_dir.join(dir),
            None => current_dir,
        };

        Config {
            project_dir,
            remote: self.remote.clone(),
            dist_dir: self.dist_dir.clone(),
            repository: self.repository.clone(),
            tools: ToolsConfig {
                python: self.python.clone(),
                twine: self.twine.clone(),
                ..ToolsConfig::default()
            },
        }
    }
}
