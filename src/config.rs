use std::path::{Path, PathBuf};

/// Default git remote used for tags and the initial push
pub const DEFAULT_REMOTE: &str = "origin";

/// Default output directory of the build frontend, relative to the project root
pub const DEFAULT_DIST_DIR: &str = "dist";

/// Runtime settings for a pypublish invocation.
///
/// There is no configuration file: every field comes from a command-line
/// option, its environment-variable fallback, or the default below.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Project root; every command runs here
    pub project_dir: PathBuf,

    /// Remote that tags and branches are pushed to
    pub remote: String,

    /// Build output directory, relative to `project_dir` unless absolute
    pub dist_dir: PathBuf,

    /// Twine repository section (e.g. "testpypi"), twine's default when unset
    pub repository: Option<String>,

    pub tools: ToolsConfig,
}

/// Programs invoked for each external collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolsConfig {
    pub git: String,
    pub gh: String,
    pub python: String,
    pub twine: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        ToolsConfig {
            git: "git".to_string(),
            gh: "gh".to_string(),
            python: "python".to_string(),
            twine: "twine".to_string(),
        }
    }
}

impl Config {
    /// Defaults for a project rooted at `project_dir`
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Config {
            project_dir: project_dir.as_ref().to_path_buf(),
            remote: DEFAULT_REMOTE.to_string(),
            dist_dir: PathBuf::from(DEFAULT_DIST_DIR),
            repository: None,
            tools: ToolsConfig::default(),
        }
    }

    /// Absolute (or project-relative) location of the build output
    pub fn dist_path(&self) -> PathBuf {
        self.project_dir.join(&self.dist_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new(".")
    }
}
