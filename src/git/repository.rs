use std::path::{Path, PathBuf};

use git2::{ErrorCode, Repository as Git2Repo, StatusOptions};

use crate::error::{PypublishError, Result};
use crate::git::RepoState;

/// Repository inspection backed by `git2`.
///
/// The repository is rediscovered on every call because the init workflow
/// creates it part way through.
pub struct Git2Repository {
    root: PathBuf,
}

impl Git2Repository {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Git2Repository {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn discover(&self) -> Result<Option<Git2Repo>> {
        match Git2Repo::discover(&self.root) {
            Ok(repo) => Ok(Some(repo)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn open(&self) -> Result<Git2Repo> {
        self.discover()?.ok_or_else(|| {
            PypublishError::precondition(format!(
                "no git repository found at {}",
                self.root.display()
            ))
        })
    }
}

impl RepoState for Git2Repository {
    fn is_initialized(&self) -> Result<bool> {
        Ok(self.discover()?.is_some())
    }

    fn has_uncommitted_changes(&self) -> Result<bool> {
        let repo = self.open()?;

        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = repo.statuses(Some(&mut options))?;
        Ok(!statuses.is_empty())
    }

    fn tag_exists(&self, tag_name: &str) -> Result<bool> {
        let repo = self.open()?;
        let reference_name = format!("refs/tags/{}", tag_name);

        let found = match repo.find_reference(&reference_name) {
            Ok(_) => true,
            Err(e) if e.code() == ErrorCode::NotFound => false,
            Err(e) => return Err(e.into()),
        };
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn init_with_commit(dir: &Path) -> Git2Repo {
        let repo = Git2Repo::init(dir).unwrap();
        fs::write(dir.join("README.md"), "hello\n").unwrap();

        {
            let mut index = repo.index().unwrap();
            index.add_path(Path::new("README.md")).unwrap();
            index.write().unwrap();
            let tree_id = index.write_tree().unwrap();
            let tree = repo.find_tree(tree_id).unwrap();
            let signature = git2::Signature::now("Test", "test@example.com").unwrap();
            repo.commit(Some("HEAD"), &signature, &signature, "initial", &tree, &[])
                .unwrap();
        }

        repo
    }

    #[test]
    fn test_uninitialized_directory() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Git2Repository::new(dir.path());
        assert!(!repo.is_initialized().unwrap());
        let err = repo.has_uncommitted_changes().unwrap_err();
        assert!(matches!(err, PypublishError::Precondition(_)));
    }

    #[test]
    fn test_discovers_from_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        Git2Repo::init(dir.path()).unwrap();
        let nested = dir.path().join("pkg");
        fs::create_dir(&nested).unwrap();

        assert!(Git2Repository::new(&nested).is_initialized().unwrap());
    }

    #[test]
    fn test_untracked_file_is_a_change() {
        let dir = tempfile::tempdir().unwrap();
        Git2Repo::init(dir.path()).unwrap();
        let repo = Git2Repository::new(dir.path());
        assert!(!repo.has_uncommitted_changes().unwrap());

        fs::write(dir.path().join("setup.py"), "").unwrap();
        assert!(repo.has_uncommitted_changes().unwrap());
    }

    #[test]
    fn test_clean_after_commit_and_dirty_after_edit() {
        let dir = tempfile::tempdir().unwrap();
        init_with_commit(dir.path());
        let repo = Git2Repository::new(dir.path());
        assert!(!repo.has_uncommitted_changes().unwrap());

        fs::write(dir.path().join("README.md"), "changed\n").unwrap();
        assert!(repo.has_uncommitted_changes().unwrap());
    }

    #[test]
    fn test_tag_exists() {
        let dir = tempfile::tempdir().unwrap();
        let git = init_with_commit(dir.path());
        let head = git.head().unwrap().peel_to_commit().unwrap();
        git.tag_lightweight("v1.0.0", head.as_object(), false).unwrap();

        let repo = Git2Repository::new(dir.path());
        assert!(repo.tag_exists("v1.0.0").unwrap());
        assert!(!repo.tag_exists("v2.0.0").unwrap());
    }
}
