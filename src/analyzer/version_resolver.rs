use crate::boundary::BoundaryWarning;
use crate::domain::branch::version_matches_release;
use crate::domain::hash::MAX_BRANCH_NUMBER_LENGTH;
use crate::domain::tag::{filter_invalid, filter_valid, tags_starting_with};
use crate::domain::version::{highest_version, MAX_COMPONENTS};
use crate::domain::{branch_number, BranchKind, BranchRules, DottedVersion};
use crate::error::{BuildVersionError, Result};
use std::fmt;
use tracing::debug;

/// Floor used when none is configured (`major.minor.patch`)
pub const DEFAULT_MAJOR_MINOR_PATCH: &str = "0.1.0";

/// Digit bumped when mainline collides with a reserved release line
pub const DEFAULT_INCREMENT_POSITION: usize = 2;

/// Decimal digits of the number derived from a branch name
pub const DEFAULT_BRANCH_NUMBER_LENGTH: u32 = 8;

/// Feature branch versions live under `0.0.<branch number>`
const FEATURE_MAJOR_MINOR: &str = "0.0";

/// Developer branch versions live under `99.<branch number>.0`
const DEVELOPER_MAJOR: u64 = 99;

/// Immutable parameters for one resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvePolicy {
    /// Lowest `major.minor.patch` mainline may produce. `None` means no floor.
    pub floor: Option<DottedVersion>,
    /// 1-indexed digit to bump when mainline collides with a release line
    pub increment_position: usize,
    /// Build counter used for developer branches
    pub build_number: u64,
    /// Digits of the number derived from feature and developer branch names
    pub branch_number_length: u32,
}

impl ResolvePolicy {
    /// Build a policy, validating the floor and branch number length up front.
    ///
    /// An empty `floor` disables the floor check.
    pub fn new(
        floor: &str,
        increment_position: usize,
        build_number: u64,
        branch_number_length: u32,
    ) -> Result<Self> {
        let floor = if floor.trim().is_empty() {
            None
        } else {
            Some(DottedVersion::parse(floor.trim())?)
        };

        if branch_number_length == 0 || branch_number_length > MAX_BRANCH_NUMBER_LENGTH {
            return Err(BuildVersionError::InvalidHashLength(branch_number_length));
        }

        Ok(ResolvePolicy {
            floor,
            increment_position,
            build_number,
            branch_number_length,
        })
    }
}

impl Default for ResolvePolicy {
    fn default() -> Self {
        ResolvePolicy {
            floor: DottedVersion::new(vec![0, 1, 0]).ok(),
            increment_position: DEFAULT_INCREMENT_POSITION,
            build_number: 0,
            branch_number_length: DEFAULT_BRANCH_NUMBER_LENGTH,
        }
    }
}

/// Which rule produced a resolved version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionRule {
    /// Mainline build in a repository without build tags
    FirstMainlineBuild,
    /// Mainline build where the floor is above every tag
    FloorOverride,
    /// Mainline build whose highest version is reserved by a release branch
    ReleaseConflictBump,
    /// Mainline build continuing its own build counter
    MainlineBuildBump,
    /// Release branch with existing tags on its line
    ReleaseContinuation,
    /// Release branch without tags on its line
    FirstReleaseBuild,
    /// Feature branch with existing tags
    FeatureContinuation,
    /// Feature branch without tags
    FirstFeatureBuild,
    /// Any other branch
    DeveloperBuild,
}

impl fmt::Display for ResolutionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ResolutionRule::FirstMainlineBuild => "first mainline build",
            ResolutionRule::FloorOverride => "minimum version overrides tag history",
            ResolutionRule::ReleaseConflictBump => "mainline collides with a release branch",
            ResolutionRule::MainlineBuildBump => "mainline build number bumped",
            ResolutionRule::ReleaseContinuation => "release build number bumped",
            ResolutionRule::FirstReleaseBuild => "first release build",
            ResolutionRule::FeatureContinuation => "feature build number bumped",
            ResolutionRule::FirstFeatureBuild => "first feature build",
            ResolutionRule::DeveloperBuild => "developer build",
        };
        f.write_str(text)
    }
}

/// Outcome of a resolution
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub version: String,
    pub branch_kind: BranchKind,
    pub rule: ResolutionRule,
    pub warnings: Vec<BoundaryWarning>,
}

/// Computes the next build version for a branch from existing tags and branches
pub struct VersionResolver {
    policy: ResolvePolicy,
    rules: BranchRules,
}

impl VersionResolver {
    /// Create a resolver with the default branch naming rules
    pub fn new(policy: ResolvePolicy) -> Self {
        VersionResolver {
            policy,
            rules: BranchRules::default(),
        }
    }

    /// Create a resolver with custom branch naming rules
    pub fn with_rules(policy: ResolvePolicy, rules: BranchRules) -> Self {
        VersionResolver { policy, rules }
    }

    pub fn policy(&self) -> &ResolvePolicy {
        &self.policy
    }

    /// Next version for `current_branch`, as a string
    pub fn next_version<T: AsRef<str>, B: AsRef<str>>(
        &self,
        tags: &[T],
        branches: &[B],
        current_branch: &str,
    ) -> Result<String> {
        self.resolve(tags, branches, current_branch)
            .map(|resolution| resolution.version)
    }

    /// Resolve the next version for `current_branch` with the rule that
    /// produced it and any non-fatal warnings.
    pub fn resolve<T: AsRef<str>, B: AsRef<str>>(
        &self,
        tags: &[T],
        branches: &[B],
        current_branch: &str,
    ) -> Result<Resolution> {
        let mut warnings = Vec::new();

        let valid = filter_valid(tags);
        let ignored = filter_invalid(tags);
        if !ignored.is_empty() {
            warnings.push(BoundaryWarning::IgnoredTags { tags: ignored });
        }

        let branch_kind = self.rules.classify(current_branch);
        debug!(
            branch = current_branch,
            kind = branch_kind.label(),
            tags = valid.len(),
            "Classified branch"
        );

        let (version, rule) = match &branch_kind {
            BranchKind::Mainline => self.resolve_mainline(&valid, branches, &mut warnings)?,
            BranchKind::Release { prefix } => resolve_release(&valid, prefix)?,
            BranchKind::Feature => self.resolve_feature(&valid, current_branch)?,
            BranchKind::Developer => self.resolve_developer(current_branch)?,
        };

        debug!(version = %version, rule = %rule, "Resolved version");

        Ok(Resolution {
            version,
            branch_kind,
            rule,
            warnings,
        })
    }

    /// Version prefixes of release branches that name a dotted version.
    ///
    /// Branches like `release/next` cannot reserve a version line and are
    /// reported instead.
    fn release_lines<'a, B: AsRef<str>>(
        &self,
        branches: &'a [B],
        warnings: &mut Vec<BoundaryWarning>,
    ) -> Vec<&'a str> {
        let mut lines = Vec::new();
        for branch in self.rules.release_branches(branches) {
            let Some(prefix) = self.rules.release_prefix_of(branch) else {
                continue;
            };
            match DottedVersion::parse(prefix) {
                Ok(line) if line.len() < MAX_COMPONENTS => lines.push(prefix),
                _ => warnings.push(BoundaryWarning::UnversionedReleaseBranch {
                    branch: branch.to_string(),
                }),
            }
        }
        lines
    }

    /// Tags reserved by release branches.
    ///
    /// A release line with tags reserves all of them; a line without tags
    /// reserves its first build `<prefix>.1` so mainline sees it before any
    /// release build has been tagged.
    pub fn reserved_release_tags<B: AsRef<str>>(
        &self,
        valid_tags: &[String],
        branches: &[B],
    ) -> Vec<String> {
        let mut ignored = Vec::new();
        let lines = self.release_lines(branches, &mut ignored);
        reserved_for_lines(valid_tags, &lines)
    }

    fn resolve_mainline<B: AsRef<str>>(
        &self,
        valid: &[String],
        branches: &[B],
        warnings: &mut Vec<BoundaryWarning>,
    ) -> Result<(String, ResolutionRule)> {
        if valid.is_empty() {
            let version = match &self.policy.floor {
                Some(floor) => format!("{}.1", floor),
                None => format!("{}.1", DEFAULT_MAJOR_MINOR_PATCH),
            };
            return Ok((version, ResolutionRule::FirstMainlineBuild));
        }

        let lines = self.release_lines(branches, warnings);
        let mut candidates = reserved_for_lines(valid, &lines);
        candidates.extend(valid.iter().cloned());

        let highest = highest_version(&candidates)?;
        let highest_short = highest.truncate(3);
        debug!(highest = %highest, releases = lines.len(), "Highest mainline candidate");

        if let Some(floor) = &self.policy.floor {
            if highest_short < *floor {
                warnings.push(BoundaryWarning::FloorOverridesHistory {
                    highest: highest_short.to_string(),
                    floor: floor.to_string(),
                });
                return Ok((format!("{}.1", floor), ResolutionRule::FloorOverride));
            }
        }

        let short_text = highest_short.to_string();
        if lines
            .iter()
            .any(|prefix| version_matches_release(&short_text, prefix))
        {
            let bumped = highest.increment_at(1, self.policy.increment_position)?;
            Ok((bumped.to_string(), ResolutionRule::ReleaseConflictBump))
        } else {
            let bumped = highest.increment_last(1)?;
            Ok((bumped.to_string(), ResolutionRule::MainlineBuildBump))
        }
    }

    fn resolve_feature(&self, valid: &[String], branch: &str) -> Result<(String, ResolutionRule)> {
        let number = branch_number(branch, self.policy.branch_number_length)?;
        let prefix = format!("{}.{}", FEATURE_MAJOR_MINOR, number);

        let matching = tags_starting_with(valid, &prefix);
        if matching.is_empty() {
            Ok((format!("{}.1", prefix), ResolutionRule::FirstFeatureBuild))
        } else {
            let bumped = highest_version(&matching)?.increment_last(1)?;
            Ok((bumped.to_string(), ResolutionRule::FeatureContinuation))
        }
    }

    fn resolve_developer(&self, branch: &str) -> Result<(String, ResolutionRule)> {
        let number = branch_number(branch, self.policy.branch_number_length)?;
        Ok((
            format!(
                "{}.{}.0.{}",
                DEVELOPER_MAJOR, number, self.policy.build_number
            ),
            ResolutionRule::DeveloperBuild,
        ))
    }
}

fn resolve_release(valid: &[String], prefix: &str) -> Result<(String, ResolutionRule)> {
    let matching = tags_starting_with(valid, prefix);
    if matching.is_empty() {
        Ok((format!("{}.1", prefix), ResolutionRule::FirstReleaseBuild))
    } else {
        let bumped = highest_version(&matching)?.increment_last(1)?;
        Ok((bumped.to_string(), ResolutionRule::ReleaseContinuation))
    }
}

fn reserved_for_lines(valid: &[String], lines: &[&str]) -> Vec<String> {
    let mut reserved = Vec::new();
    for prefix in lines {
        let matching = tags_starting_with(valid, prefix);
        if matching.is_empty() {
            reserved.push(format!("{}.1", prefix));
        } else {
            reserved.extend(matching);
        }
    }
    reserved
}
