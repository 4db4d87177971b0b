use crate::error::Result;
use crate::git::Repository;
use std::collections::BTreeMap;

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    tags: Vec<String>,
    remote_branches: BTreeMap<String, Vec<String>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            tags: Vec::new(),
            remote_branches: BTreeMap::new(),
        }
    }

    /// Add a tag
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.push(name.into());
    }

    /// Add a branch under a remote (short name, e.g. "release/1.0.0")
    pub fn add_remote_branch(&mut self, remote: impl Into<String>, branch: impl Into<String>) {
        self.remote_branches
            .entry(remote.into())
            .or_default()
            .push(branch.into());
    }

    /// Builder-style helper for tests
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Builder-style helper for tests
    pub fn with_remote_branches<I, S>(mut self, remote: &str, branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for branch in branches {
            self.add_remote_branch(remote, branch);
        }
        self
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.clone())
    }

    fn list_remote_branches(&self, remote: &str) -> Result<Vec<String>> {
        Ok(self.remote_branches.get(remote).cloned().unwrap_or_default())
    }
}
