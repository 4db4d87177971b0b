pub mod analyzer;
pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod ui;

pub use analyzer::{Resolution, ResolvePolicy, VersionResolver};
pub use error::{BuildVersionError, Result};
