//! Domain logic - pure version and branch rules independent of git operations

pub mod branch;
pub mod hash;
pub mod tag;
pub mod version;

pub use branch::{BranchKind, BranchRules};
pub use hash::branch_number;
pub use version::DottedVersion;
