//! Resolution engine for determining the next build version from tags and branches

pub mod version_resolver;

pub use version_resolver::{Resolution, ResolutionRule, ResolvePolicy, VersionResolver};
