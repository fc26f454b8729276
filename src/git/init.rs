use crate::config::Config;
use crate::error::{PypublishError, Result};
use crate::git::RepoState;
use crate::process::{run_step, CommandRunner, CommandSpec};

/// Sets up a local repository and its hosted remote
pub struct RepoInitializer<'a, R: CommandRunner, S: RepoState> {
    runner: &'a R,
    repo: &'a S,
    config: &'a Config,
}

impl<'a, R: CommandRunner, S: RepoState> RepoInitializer<'a, R, S> {
    pub fn new(runner: &'a R, repo: &'a S, config: &'a Config) -> Self {
        RepoInitializer {
            runner,
            repo,
            config,
        }
    }

    fn git(&self) -> CommandSpec {
        CommandSpec::new(&self.config.tools.git, &self.config.project_dir)
    }

    /// Run `git init` unless a repository already exists.
    ///
    /// # Returns
    /// * `Ok(true)` - A new repository was created
    /// * `Ok(false)` - A repository was already present, nothing was run
    pub fn ensure_repo(&self) -> Result<bool> {
        if self.repo.is_initialized()? {
            return Ok(false);
        }

        run_step(self.runner, "init", &self.git().arg("init"))?;
        Ok(true)
    }

    /// Stage everything and commit, unless the working tree is clean.
    ///
    /// # Returns
    /// * `Ok(true)` - A commit was created
    /// * `Ok(false)` - Nothing to commit
    pub fn commit_all(&self, message: &str) -> Result<bool> {
        if !self.repo.has_uncommitted_changes()? {
            return Ok(false);
        }

        run_step(self.runner, "commit", &self.git().args(["add", "."]))?;
        run_step(
            self.runner,
            "commit",
            &self.git().args(["commit", "-m", message]),
        )?;
        Ok(true)
    }

    /// Create the hosted repository and register it as the configured remote.
    ///
    /// An existing repository with the same name makes `gh` fail, and that
    /// failure is returned unchanged.
    pub fn create_remote(&self, name: &str, private: bool) -> Result<()> {
        let visibility = if private { "--private" } else { "--public" };
        let spec = CommandSpec::new(&self.config.tools.gh, &self.config.project_dir)
            .args(["repo", "create", name, visibility, "--source=."])
            .arg(format!("--remote={}", self.config.remote));

        run_step(self.runner, "create-remote", &spec)?;
        Ok(())
    }

    /// Push the current branch and set its upstream
    pub fn push_all(&self) -> Result<()> {
        let spec = self
            .git()
            .args(["push", "-u", self.config.remote.as_str(), "HEAD"]);
        run_step(self.runner, "push", &spec)?;
        Ok(())
    }

    /// Repository name derived from the project directory's name
    pub fn default_repo_name(&self) -> Result<String> {
        let dir = self.config.project_dir.canonicalize()?;
        dir.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                PypublishError::precondition(format!(
                    "cannot derive a repository name from {}",
                    dir.display()
                ))
            })
    }
}
