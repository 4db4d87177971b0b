use std::fmt;

/// Warnings raised while resolving a version from repository facts.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Tags that are not `major.minor.patch.build` and were left out
    IgnoredTags { tags: Vec<String> },
    /// Release branch whose suffix is not a dotted version, so it cannot
    /// reserve a version line
    UnversionedReleaseBranch { branch: String },
    /// The configured floor is above every existing tag
    FloorOverridesHistory { highest: String, floor: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::IgnoredTags { tags } => {
                let shown: Vec<&str> = tags.iter().take(5).map(String::as_str).collect();
                write!(
                    f,
                    "Ignored {} tag(s) not in major.minor.patch.build form: {}",
                    tags.len(),
                    shown.join(", ")
                )?;
                if tags.len() > shown.len() {
                    write!(f, ", ...")?;
                }
                Ok(())
            }
            BoundaryWarning::UnversionedReleaseBranch { branch } => {
                write!(
                    f,
                    "Release branch '{}' does not name a version and was skipped",
                    branch
                )
            }
            BoundaryWarning::FloorOverridesHistory { highest, floor } => {
                write!(
                    f,
                    "Minimum version {} is above the highest tag {}",
                    floor, highest
                )
            }
        }
    }
}
