//! Git layer
//!
//! Read-only inspection of the working repository goes through the
//! [RepoState] trait, backed by `git2`. Anything that changes the repository
//! or talks to a remote is run through the `git` and `gh` command-line tools,
//! so the user's own credential helpers and SSH setup apply.
//!
//! - [repository::Git2Repository]: inspection of a real repository
//! - [mock::MockRepository]: scripted state for tests
//! - [tags::TagManager]: create, push and delete release tags
//! - [init::RepoInitializer]: initialize, commit, create the remote and push

pub mod init;
pub mod mock;
pub mod repository;
pub mod tags;

pub use init::RepoInitializer;
pub use mock::MockRepository;
pub use repository::Git2Repository;
pub use tags::{DeleteOutcome, TagManager};

use crate::error::Result;

/// Read-only view of the local repository
pub trait RepoState {
    /// Whether repository metadata exists at or above the project directory
    ///
    /// Discovery walks up parent directories the way `git status` does.
    fn is_initialized(&self) -> Result<bool>;

    /// Whether the working tree has staged, unstaged or untracked changes
    ///
    /// Ignored files do not count.
    ///
    /// # Returns
    /// * `Ok(bool)` - Whether anything would be committed by `git add .`
    /// * `Err` - If there is no repository or the index cannot be read
    fn has_uncommitted_changes(&self) -> Result<bool>;

    /// Whether a local tag with this exact name exists
    fn tag_exists(&self, tag_name: &str) -> Result<bool>;
}
