use serde::{Deserialize, Serialize};

/// Category a branch name falls into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchKind {
    /// Trunk branch (`main`, `master`, `develop`)
    Mainline,
    /// `release/<major.minor.patch>`, carrying the version prefix
    Release { prefix: String },
    /// `feature/<name>`
    Feature,
    /// Anything else, usually a short-lived working branch
    Developer,
}

impl BranchKind {
    pub fn label(&self) -> &'static str {
        match self {
            BranchKind::Mainline => "mainline",
            BranchKind::Release { .. } => "release",
            BranchKind::Feature => "feature",
            BranchKind::Developer => "developer",
        }
    }
}

fn default_mainline() -> Vec<String> {
    vec![
        "main".to_string(),
        "master".to_string(),
        "develop".to_string(),
    ]
}

fn default_release_prefix() -> String {
    "release/".to_string()
}

fn default_feature_prefix() -> String {
    "feature/".to_string()
}

/// Naming rules used to classify branches.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BranchRules {
    #[serde(default = "default_mainline")]
    pub mainline: Vec<String>,

    #[serde(default = "default_release_prefix")]
    pub release_prefix: String,

    #[serde(default = "default_feature_prefix")]
    pub feature_prefix: String,
}

impl Default for BranchRules {
    fn default() -> Self {
        BranchRules {
            mainline: default_mainline(),
            release_prefix: default_release_prefix(),
            feature_prefix: default_feature_prefix(),
        }
    }
}

impl BranchRules {
    /// Classify a branch name. Mainline names are checked first, then the
    /// release and feature prefixes; everything else is a developer branch.
    pub fn classify(&self, branch: &str) -> BranchKind {
        if self.is_mainline(branch) {
            BranchKind::Mainline
        } else if let Some(prefix) = self.release_prefix_of(branch) {
            BranchKind::Release {
                prefix: prefix.to_string(),
            }
        } else if self.is_feature(branch) {
            BranchKind::Feature
        } else {
            BranchKind::Developer
        }
    }

    pub fn is_mainline(&self, branch: &str) -> bool {
        self.mainline.iter().any(|name| name == branch)
    }

    pub fn is_feature(&self, branch: &str) -> bool {
        branch.starts_with(&self.feature_prefix)
    }

    /// Version prefix of a release branch (`release/4.7.0` -> `4.7.0`)
    pub fn release_prefix_of<'a>(&self, branch: &'a str) -> Option<&'a str> {
        branch.strip_prefix(self.release_prefix.as_str())
    }

    /// Release branches out of an arbitrary branch list
    pub fn release_branches<'a, S: AsRef<str>>(&self, branches: &'a [S]) -> Vec<&'a str> {
        branches
            .iter()
            .map(AsRef::as_ref)
            .filter(|branch| self.release_prefix_of(branch).is_some())
            .collect()
    }

    /// True if `version` starts with the version prefix of any release branch.
    pub fn matches_release_branch<S: AsRef<str>>(&self, version: &str, branches: &[S]) -> bool {
        self.release_branches(branches)
            .into_iter()
            .filter_map(|branch| self.release_prefix_of(branch))
            .any(|prefix| version_matches_release(version, prefix))
    }
}

/// A version belongs to a release line when it starts with the line's prefix
/// (`1.0.2.7` belongs to `1.0.2`).
pub fn version_matches_release(version: &str, prefix: &str) -> bool {
    version.starts_with(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mainline_branches() {
        let rules = BranchRules::default();
        for name in ["main", "master", "develop"] {
            assert_eq!(rules.classify(name), BranchKind::Mainline);
        }
    }

    #[test]
    fn test_mainline_is_exact_match() {
        let rules = BranchRules::default();
        assert_eq!(rules.classify("main2"), BranchKind::Developer);
        assert_eq!(rules.classify("origin/main"), BranchKind::Developer);
    }

    #[test]
    fn test_release_branch() {
        let rules = BranchRules::default();
        assert_eq!(
            rules.classify("release/4.7.0"),
            BranchKind::Release {
                prefix: "4.7.0".to_string()
            }
        );
    }

    #[test]
    fn test_feature_branch() {
        let rules = BranchRules::default();
        assert_eq!(rules.classify("feature/fishtank"), BranchKind::Feature);
    }

    #[test]
    fn test_developer_branch() {
        let rules = BranchRules::default();
        assert_eq!(rules.classify("TOOLS-1234"), BranchKind::Developer);
        assert_eq!(rules.classify("HEAD"), BranchKind::Developer);
        assert_eq!(rules.classify("bugfix/release/1.0.0"), BranchKind::Developer);
    }

    #[test]
    fn test_release_branches_from_list() {
        let rules = BranchRules::default();
        let branches = ["release/4.5.0", "release/4.6.0", "main", "master"];
        assert_eq!(
            rules.release_branches(&branches),
            vec!["release/4.5.0", "release/4.6.0"]
        );
    }

    #[test]
    fn test_matches_release_branch_true() {
        let rules = BranchRules::default();
        let branches = ["release/4.5.0", "release/4.6.0", "release/4.7.0"];
        assert!(rules.matches_release_branch("4.7.0", &branches));
        assert!(rules.matches_release_branch("4.7.0.12", &branches));
    }

    #[test]
    fn test_matches_release_branch_false() {
        let rules = BranchRules::default();
        let branches = ["release/4.5.0", "release/4.6.0", "release/4.7.0"];
        assert!(!rules.matches_release_branch("4.8.0", &branches));
        assert!(!rules.matches_release_branch("4.8.0", &["main", "HEAD"]));
    }

    #[test]
    fn test_custom_rules() {
        let rules = BranchRules {
            mainline: vec!["trunk".to_string()],
            release_prefix: "rel-".to_string(),
            feature_prefix: "feat-".to_string(),
        };
        assert_eq!(rules.classify("trunk"), BranchKind::Mainline);
        assert_eq!(rules.classify("main"), BranchKind::Developer);
        assert_eq!(
            rules.classify("rel-2.0.0"),
            BranchKind::Release {
                prefix: "2.0.0".to_string()
            }
        );
        assert_eq!(rules.classify("feat-x"), BranchKind::Feature);
    }
}
