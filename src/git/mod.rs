//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the repository facts
//! the resolver needs: tag names and remote branch names.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory implementation for testing
//!
//! # Usage
//!
//! ```rust
//! # use git_build_version::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let tags = repo.list_tags()?;
//! let branches = repo.list_remote_branches("origin")?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Read-only view of the facts a version is resolved from
///
/// Implementations only enumerate; they apply no filtering or ordering that
/// the resolver relies on.
///
/// ## Error Handling
///
/// Implementations should map underlying errors (like `git2::Error`) to
/// [crate::error::BuildVersionError] variants.
pub trait Repository {
    /// Get all tags in the repository
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Every tag name, unfiltered
    /// * `Err` - If there's a Git error
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Get the short names of a remote's branches
    ///
    /// Names are returned without the `<remote>/` prefix, so `origin/main`
    /// becomes `main`. The symbolic `HEAD` pointer may be included.
    ///
    /// # Arguments
    /// * `remote` - Name of the remote (e.g., "origin")
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Branch short names
    /// * `Err` - If there's a Git error
    fn list_remote_branches(&self, remote: &str) -> Result<Vec<String>>;
}
