use crate::config::Config;
use crate::domain::Version;
use crate::error::{PypublishError, Result};
use crate::git::RepoState;
use crate::process::{run_step, CommandRunner, CommandSpec};

/// Creates, pushes and deletes `v<version>` release tags
pub struct TagManager<'a, R: CommandRunner, S: RepoState> {
    runner: &'a R,
    repo: &'a S,
    config: &'a Config,
}

/// Outcome of deleting a tag both locally and on the remote.
///
/// Both deletions are always attempted, so both results are kept.
#[derive(Debug)]
pub struct DeleteOutcome {
    pub tag: String,
    pub local: Result<()>,
    pub remote: Result<()>,
}

impl DeleteOutcome {
    pub fn is_success(&self) -> bool {
        self.local.is_ok() && self.remote.is_ok()
    }

    /// Collapse into the first failure, local before remote
    pub fn into_result(self) -> Result<()> {
        self.local.and(self.remote)
    }
}

impl<'a, R: CommandRunner, S: RepoState> TagManager<'a, R, S> {
    pub fn new(runner: &'a R, repo: &'a S, config: &'a Config) -> Self {
        TagManager {
            runner,
            repo,
            config,
        }
    }

    fn git(&self) -> CommandSpec {
        CommandSpec::new(&self.config.tools.git, &self.config.project_dir)
    }

    /// Create the release tag on HEAD.
    ///
    /// # Returns
    /// * `Ok(())` - The tag was created
    /// * `Err(Precondition)` - A tag with that name already exists locally
    /// * `Err(Subprocess)` - git refused to create the tag
    pub fn create_tag(&self, version: &Version, annotate: bool) -> Result<()> {
        let tag = version.tag_name();

        if self.repo.tag_exists(&tag)? {
            return Err(PypublishError::precondition(format!(
                "tag '{}' already exists",
                tag
            )));
        }

        let mut spec = self.git().arg("tag");
        if annotate {
            spec = spec.args(["-a", tag.as_str(), "-m"]).arg(format!("Release {}", tag));
        } else {
            spec = spec.arg(tag.as_str());
        }

        run_step(self.runner, "create-tag", &spec)?;
        Ok(())
    }

    pub fn push_tag(&self, version: &Version) -> Result<()> {
        let spec = self
            .git()
            .args(["push", self.config.remote.as_str()])
            .arg(format!("refs/tags/{}", version.tag_name()));
        run_step(self.runner, "push-tag", &spec)?;
        Ok(())
    }

    pub fn delete_tag(&self, version: &Version) -> Result<()> {
        let spec = self.git().args(["tag", "-d"]).arg(version.tag_name());
        run_step(self.runner, "delete-tag", &spec)?;
        Ok(())
    }

    pub fn delete_remote_tag(&self, version: &Version) -> Result<()> {
        let spec = self
            .git()
            .args(["push", self.config.remote.as_str(), "--delete"])
            .arg(format!("refs/tags/{}", version.tag_name()));
        run_step(self.runner, "delete-remote-tag", &spec)?;
        Ok(())
    }

    /// Delete the tag locally and on the remote, attempting both regardless of failures
    pub fn delete_everywhere(&self, version: &Version) -> DeleteOutcome {
        let local = self.delete_tag(version);
        let remote = self.delete_remote_tag(version);

        DeleteOutcome {
            tag: version.tag_name(),
            local,
            remote,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;
    use crate::process::RecordingRunner;

    fn version(raw: &str) -> Version {
        Version::parse(raw).unwrap()
    }

    #[test]
    fn test_create_lightweight_tag() {
        let runner = RecordingRunner::new();
        let repo = MockRepository::new();
        let config = Config::new("/work");
        let tags = TagManager::new(&runner, &repo, &config);

        tags.create_tag(&version("1.0.0"), false).unwrap();
        assert_eq!(runner.command_lines(), vec!["git tag v1.0.0"]);
        assert_eq!(runner.calls()[0].cwd, std::path::PathBuf::from("/work"));
    }

    #[test]
    fn test_create_annotated_tag() {
        let runner = RecordingRunner::new();
        let repo = MockRepository::new();
        let config = Config::default();
        let tags = TagManager::new(&runner, &repo, &config);

        tags.create_tag(&version("v1.0.0"), true).unwrap();
        assert_eq!(
            runner.command_lines(),
            vec!["git tag -a v1.0.0 -m \"Release v1.0.0\""]
        );
    }

    #[test]
    fn test_existing_tag_is_precondition_error() {
        let runner = RecordingRunner::new();
        let repo = MockRepository::new().with_tag("v1.0.0");
        let config = Config::default();
        let tags = TagManager::new(&runner, &repo, &config);

        let err = tags.create_tag(&version("1.0.0"), false).unwrap_err();
        assert!(matches!(err, PypublishError::Precondition(_)));
        assert!(err.to_string().contains("already exists"));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_push_tag_uses_configured_remote() {
        let runner = RecordingRunner::new();
        let repo = MockRepository::new();
        let config = Config {
            remote: "upstream".to_string(),
            ..Config::default()
        };
        let tags = TagManager::new(&runner, &repo, &config);

        tags.push_tag(&version("2.1.0")).unwrap();
        assert_eq!(
            runner.command_lines(),
            vec!["git push upstream refs/tags/v2.1.0"]
        );
    }

    #[test]
    fn test_delete_everywhere_attempts_remote_after_local_failure() {
        let runner =
            RecordingRunner::new().fail_on("git tag -d", 1, "error: tag 'v0.2.0' not found.");
        let repo = MockRepository::new();
        let config = Config::default();
        let tags = TagManager::new(&runner, &repo, &config);

        let outcome = tags.delete_everywhere(&version("0.2.0"));
        assert_eq!(outcome.tag, "v0.2.0");
        assert!(outcome.local.is_err());
        assert!(outcome.remote.is_ok());
        assert!(!outcome.is_success());
        assert_eq!(
            runner.command_lines(),
            vec![
                "git tag -d v0.2.0",
                "git push origin --delete refs/tags/v0.2.0"
            ]
        );
    }

    #[test]
    fn test_delete_outcome_reports_remote_failure() {
        let runner = RecordingRunner::new().fail_on("git push", 1, "remote ref does not exist");
        let repo = MockRepository::new();
        let config = Config::default();
        let tags = TagManager::new(&runner, &repo, &config);

        let outcome = tags.delete_everywhere(&version("0.2.0"));
        assert!(outcome.local.is_ok());
        let err = outcome.into_result().unwrap_err();
        assert!(err.to_string().contains("delete-remote-tag"));
    }
}
