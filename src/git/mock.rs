use std::collections::HashSet;

use crate::error::{PypublishError, Result};
use crate::git::RepoState;

/// Mock repository state for testing without a real repository
pub struct MockRepository {
    initialized: bool,
    dirty: bool,
    tags: HashSet<String>,
}

impl MockRepository {
    /// An initialized repository with a clean working tree and no tags
    pub fn new() -> Self {
        MockRepository {
            initialized: true,
            dirty: false,
            tags: HashSet::new(),
        }
    }

    /// A directory with no repository metadata and files waiting to be committed
    pub fn uninitialized() -> Self {
        MockRepository {
            initialized: false,
            dirty: true,
            tags: HashSet::new(),
        }
    }

    /// Mark the working tree as having uncommitted changes
    pub fn with_changes(mut self) -> Self {
        self.dirty = true;
        self
    }

    /// Add an existing local tag
    pub fn with_tag(mut self, name: impl Into<String>) -> Self {
        self.tags.insert(name.into());
        self
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl RepoState for MockRepository {
    fn is_initialized(&self) -> Result<bool> {
        Ok(self.initialized)
    }

    // Reports the state as it will be after the initializer has run `git init`.
    fn has_uncommitted_changes(&self) -> Result<bool> {
        Ok(self.dirty)
    }

    fn tag_exists(&self, tag_name: &str) -> Result<bool> {
        if !self.initialized {
            return Err(PypublishError::precondition("no git repository found"));
        }
        Ok(self.tags.contains(tag_name))
    }
}
