//! Main workflow orchestration logic
//!
//! Glues the repository facts provider, configuration and resolver together.
//! Kept apart from `main.rs` so the workflow can run against any
//! [Repository] without going through clap.

use tracing::{debug, warn};

use crate::analyzer::{Resolution, ResolvePolicy, VersionResolver};
use crate::config::Config;
use crate::error::{BuildVersionError, Result};
use crate::git::Repository;

/// Environment variable that overrides the build number
pub const BUILD_NUMBER_ENV: &str = "BUILD_NUMBER";

/// Arguments for the resolve workflow
///
/// Mirrors the CLI Args. `None` falls back to the configuration file, then to
/// built-in defaults.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolveArgs {
    /// Branch being built
    pub branch: String,

    /// Lowest `major.minor.patch` for mainline builds; empty disables it
    pub major_minor_patch: Option<String>,

    /// Digit to bump when mainline collides with a release branch
    pub increment_position: Option<usize>,

    /// Explicit build number; `BUILD_NUMBER` wins when set
    pub build_number: Option<u64>,

    /// Digits of the number derived from branch names
    pub branch_number_length: Option<u32>,

    /// Remote whose branches are considered
    pub remote: Option<String>,
}

/// Build number to use: `BUILD_NUMBER` when set, else the explicit value,
/// else 0.
pub fn effective_build_number(explicit: Option<u64>) -> Result<u64> {
    match std::env::var(BUILD_NUMBER_ENV) {
        Ok(value) if !value.trim().is_empty() => {
            let parsed = value.trim().parse::<u64>().map_err(|_| {
                BuildVersionError::build_number(format!("{}='{}'", BUILD_NUMBER_ENV, value))
            })?;
            if explicit.is_some_and(|n| n != parsed) {
                debug!(
                    env = parsed,
                    "{} overrides the build number argument", BUILD_NUMBER_ENV
                );
            }
            Ok(parsed)
        }
        Ok(_) | Err(std::env::VarError::NotPresent) => Ok(explicit.unwrap_or(0)),
        Err(std::env::VarError::NotUnicode(_)) => Err(BuildVersionError::build_number(format!(
            "{} is not valid unicode",
            BUILD_NUMBER_ENV
        ))),
    }
}

/// Resolution policy from arguments layered over configuration
pub fn build_policy(args: &ResolveArgs, config: &Config) -> Result<ResolvePolicy> {
    let floor = args
        .major_minor_patch
        .as_deref()
        .unwrap_or(&config.policy.major_minor_patch);
    let increment_position = args
        .increment_position
        .unwrap_or(config.policy.increment_position);
    let branch_number_length = args
        .branch_number_length
        .unwrap_or(config.policy.branch_number_length);
    let build_number = effective_build_number(args.build_number)?;

    ResolvePolicy::new(
        floor,
        increment_position,
        build_number,
        branch_number_length,
    )
}

/// Main resolve workflow
///
/// 1. Build the policy from arguments and configuration
/// 2. Read tags and remote branches from the repository
/// 3. Resolve the next version for the branch
/// 4. Log any non-fatal warnings
pub fn run_resolve<R: Repository>(
    repo: &R,
    args: &ResolveArgs,
    config: &Config,
) -> Result<Resolution> {
    let policy = build_policy(args, config)?;
    let remote = args.remote.as_deref().unwrap_or(&config.remote);

    let tags = repo.list_tags()?;
    let branches = repo.list_remote_branches(remote)?;
    debug!(
        tags = tags.len(),
        branches = branches.len(),
        remote,
        "Read repository facts"
    );

    let resolver = VersionResolver::with_rules(policy, config.branches.clone());
    let resolution = resolver.resolve(&tags, &branches, &args.branch)?;

    for warning in &resolution.warnings {
        warn!("{}", warning);
    }

    Ok(resolution)
}
