use crate::error::{BuildVersionError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Fewest components a dotted version may carry (e.g. "4.7").
pub const MIN_COMPONENTS: usize = 2;

/// Most components a dotted version may carry (`major.minor.patch.build`).
pub const MAX_COMPONENTS: usize = 4;

/// Dotted version number such as `4.7.0.21`.
///
/// Ordering is numeric and component-wise from the left. Missing trailing
/// components compare as zero, so `4.7.0` and `4.7.0.0` are equal.
#[derive(Debug, Clone)]
pub struct DottedVersion {
    components: Vec<u64>,
}

impl DottedVersion {
    /// Create a version from already-parsed components
    pub fn new(components: Vec<u64>) -> Result<Self> {
        if !(MIN_COMPONENTS..=MAX_COMPONENTS).contains(&components.len()) {
            return Err(BuildVersionError::version(format!(
                "expected {}-{} components, got {}",
                MIN_COMPONENTS,
                MAX_COMPONENTS,
                components.len()
            )));
        }
        Ok(DottedVersion { components })
    }

    /// Parse a version string (e.g. "4.7.0.21" -> [4, 7, 0, 21])
    pub fn parse(version: &str) -> Result<Self> {
        let parts = components(version);
        if !(MIN_COMPONENTS..=MAX_COMPONENTS).contains(&parts.len()) {
            return Err(BuildVersionError::version(format!(
                "'{}' - expected {} to {} dot-separated numbers",
                version, MIN_COMPONENTS, MAX_COMPONENTS
            )));
        }

        let mut numbers = Vec::with_capacity(parts.len());
        for part in parts {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(BuildVersionError::version(format!(
                    "'{}' - component '{}' is not a non-negative integer",
                    version, part
                )));
            }
            let number = part.parse::<u64>().map_err(|_| {
                BuildVersionError::version(format!(
                    "'{}' - component '{}' is out of range",
                    version, part
                ))
            })?;
            numbers.push(number);
        }

        Ok(DottedVersion {
            components: numbers,
        })
    }

    pub fn components(&self) -> &[u64] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Keep only the first `count` components (`4.7.0.21` -> `4.7.0`).
    pub fn truncate(&self, count: usize) -> Self {
        let count = count.clamp(1, self.components.len());
        DottedVersion {
            components: self.components[..count].to_vec(),
        }
    }

    /// Add `delta` to the last component, leaving the others untouched.
    pub fn increment_last(&self, delta: u64) -> Result<Self> {
        let mut components = self.components.clone();
        let last = components.len() - 1;
        components[last] = checked_add(components[last], delta, self)?;
        Ok(DottedVersion { components })
    }

    /// Add `delta` to the 1-indexed `position` component.
    ///
    /// Components between `position` and the last one are reset to 0 and the
    /// last component restarts at 1, so a digit bump always begins a new build
    /// counter.
    pub fn increment_at(&self, delta: u64, position: usize) -> Result<Self> {
        let count = self.components.len();
        if position == 0 || position > count {
            return Err(BuildVersionError::InvalidIncrementPosition {
                version: self.to_string(),
                position,
                max: count,
            });
        }

        let mut components = self.components.clone();
        let index = position - 1;
        components[index] = checked_add(components[index], delta, self)?;
        for component in components.iter_mut().take(count - 1).skip(position) {
            *component = 0;
        }
        components[count - 1] = 1;

        Ok(DottedVersion { components })
    }
}

fn checked_add(value: u64, delta: u64, version: &DottedVersion) -> Result<u64> {
    value
        .checked_add(delta)
        .ok_or_else(|| BuildVersionError::version(format!("'{}' overflows when incremented", version)))
}

impl FromStr for DottedVersion {
    type Err = BuildVersionError;

    fn from_str(s: &str) -> Result<Self> {
        DottedVersion::parse(s)
    }
}

impl Ord for DottedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let width = self.components.len().max(other.components.len());
        (0..width)
            .map(|i| {
                let left = self.components.get(i).copied().unwrap_or(0);
                let right = other.components.get(i).copied().unwrap_or(0);
                left.cmp(&right)
            })
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for DottedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for DottedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DottedVersion {}

impl fmt::Display for DottedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for component in &self.components {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{}", component)?;
            first = false;
        }
        Ok(())
    }
}

/// Splits a version string into its dot-separated parts.
///
/// `"4.7.0.200"` yields `["4", "7", "0", "200"]`; joining the parts with `.`
/// gives back the original string.
pub fn components(version: &str) -> Vec<&str> {
    version.split('.').collect()
}

/// Returns the highest version from a list under dotted-version ordering.
///
/// # Errors
/// * `InvalidVersion` - if the list is empty or any entry does not parse
pub fn highest_version<S: AsRef<str>>(versions: &[S]) -> Result<DottedVersion> {
    let mut highest: Option<DottedVersion> = None;
    for version in versions {
        let parsed = DottedVersion::parse(version.as_ref())?;
        highest = match highest {
            Some(current) if current >= parsed => Some(current),
            _ => Some(parsed),
        };
    }
    highest.ok_or_else(|| BuildVersionError::version("no versions to compare"))
}

/// String form of [`highest_version`].
pub fn highest<S: AsRef<str>>(versions: &[S]) -> Result<String> {
    highest_version(versions).map(|v| v.to_string())
}

/// Adds `increment` to the last component of a version string.
///
/// # Example
/// ```ignore
/// assert_eq!(increment_last("4.7.0.200", 1).unwrap(), "4.7.0.201");
/// ```
pub fn increment_last(version: &str, increment: u64) -> Result<String> {
    Ok(DottedVersion::parse(version)?
        .increment_last(increment)?
        .to_string())
}

/// Bumps the component at `position` (1-indexed) and restarts the build counter.
///
/// # Example
/// ```ignore
/// assert_eq!(increment_at("4.9.0.21", 1, 1).unwrap(), "5.0.0.1");
/// assert_eq!(increment_at("4.9.0.21", 1, 2).unwrap(), "4.10.0.1");
/// assert_eq!(increment_at("4.9.0.21", 1, 3).unwrap(), "4.9.1.1");
/// ```
pub fn increment_at(version: &str, increment: u64, position: usize) -> Result<String> {
    Ok(DottedVersion::parse(version)?
        .increment_at(increment, position)?
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_four_components() {
        let v = DottedVersion::parse("4.7.0.200").unwrap();
        assert_eq!(v.components(), &[4, 7, 0, 200]);
        assert_eq!(v.to_string(), "4.7.0.200");
    }

    #[test]
    fn test_parse_normalizes_leading_zeros() {
        let v: DottedVersion = "04.7.00.1".parse().unwrap();
        assert_eq!(v.to_string(), "4.7.0.1");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(DottedVersion::parse("").is_err());
        assert!(DottedVersion::parse("4").is_err());
        assert!(DottedVersion::parse("1.2.3.4.5").is_err());
        assert!(DottedVersion::parse("v1.2.3").is_err());
        assert!(DottedVersion::parse("1..3").is_err());
        assert!(DottedVersion::parse("1.-2.3").is_err());
        assert!(DottedVersion::parse("1.2.99999999999999999999999").is_err());
    }

    #[test]
    fn test_new_rejects_wrong_width() {
        assert!(DottedVersion::new(vec![1]).is_err());
        assert!(DottedVersion::new(vec![1, 2, 3, 4, 5]).is_err());
        assert_eq!(DottedVersion::new(vec![1, 2]).unwrap().to_string(), "1.2");
    }

    #[test]
    fn test_ordering_is_numeric() {
        let low = DottedVersion::parse("4.9.0.1").unwrap();
        let high = DottedVersion::parse("4.10.0.1").unwrap();
        assert!(low < high);
    }

    #[test]
    fn test_ordering_pads_missing_components() {
        let short = DottedVersion::parse("4.7.0").unwrap();
        let long = DottedVersion::parse("4.7.0.0").unwrap();
        let longer = DottedVersion::parse("4.7.0.200").unwrap();
        assert_eq!(short, long);
        assert!(short < longer);
    }

    #[test]
    fn test_truncate() {
        let v = DottedVersion::parse("4.7.0.200").unwrap();
        assert_eq!(v.truncate(3).to_string(), "4.7.0");
        assert_eq!(v.truncate(10).to_string(), "4.7.0.200");
    }

    #[test]
    fn test_components_round_trip() {
        for version in ["4.7.0.200", "4.7.0", "4.7"] {
            assert_eq!(components(version).join("."), version);
        }
        assert_eq!(components("4.7.0.200"), vec!["4", "7", "0", "200"]);
        assert_eq!(components("4.7"), vec!["4", "7"]);
    }

    #[test]
    fn test_highest_four_components() {
        let versions = ["4.7.0.197", "4.7.0.198", "4.7.0.199", "4.7.0.200"];
        assert_eq!(highest(&versions).unwrap(), "4.7.0.200");
    }

    #[test]
    fn test_highest_three_components() {
        let versions = ["4.7.197", "4.7.198", "4.7.199", "4.7.200"];
        assert_eq!(highest(&versions).unwrap(), "4.7.200");
    }

    #[test]
    fn test_highest_double_digit_minor() {
        let versions = ["4.98.0.197", "4.7.0.198", "4.111.0.199", "4.7.0.200"];
        assert_eq!(highest(&versions).unwrap(), "4.111.0.199");
    }

    #[test]
    fn test_highest_is_order_independent() {
        let forward = ["1.0.0.3", "2.0.0.1", "1.10.0.7", "1.9.9.9"];
        let mut reversed = forward;
        reversed.reverse();
        let mut rotated = forward;
        rotated.rotate_left(2);

        let expected = highest(&forward).unwrap();
        assert_eq!(expected, "2.0.0.1");
        assert_eq!(highest(&reversed).unwrap(), expected);
        assert_eq!(highest(&rotated).unwrap(), expected);
    }

    #[test]
    fn test_highest_fails_on_malformed_entry() {
        let err = highest(&["4.7.0.1", "TEST-1234"]).unwrap_err();
        assert!(matches!(err, BuildVersionError::InvalidVersion(_)));
    }

    #[test]
    fn test_highest_fails_on_empty_list() {
        let empty: [&str; 0] = [];
        assert!(highest(&empty).is_err());
    }

    #[test]
    fn test_increment_last() {
        assert_eq!(increment_last("4.7.0.200", 1).unwrap(), "4.7.0.201");
        assert_eq!(increment_last("4.7.0.200", 5).unwrap(), "4.7.0.205");
        assert_eq!(increment_last("1.0.2", 1).unwrap(), "1.0.3");
    }

    #[test]
    fn test_increment_last_preserves_other_components() {
        let before = DottedVersion::parse("9.8.7.6").unwrap();
        let after = before.increment_last(3).unwrap();
        assert_eq!(&after.components()[..3], &before.components()[..3]);
        assert_eq!(after.components()[3], 9);
    }

    #[test]
    fn test_increment_at_first() {
        assert_eq!(increment_at("4.9.0.21", 1, 1).unwrap(), "5.0.0.1");
        assert_eq!(increment_at("4.9.3.21", 1, 1).unwrap(), "5.0.0.1");
    }

    #[test]
    fn test_increment_at_second() {
        assert_eq!(increment_at("4.9.0.21", 1, 2).unwrap(), "4.10.0.1");
        assert_eq!(increment_at("4.9.3.21", 1, 2).unwrap(), "4.10.0.1");
    }

    #[test]
    fn test_increment_at_third() {
        assert_eq!(increment_at("4.9.0.21", 1, 3).unwrap(), "4.9.1.1");
    }

    #[test]
    fn test_increment_at_last_restarts_counter() {
        assert_eq!(increment_at("4.9.0.21", 1, 4).unwrap(), "4.9.0.1");
    }

    #[test]
    fn test_increment_at_three_components() {
        assert_eq!(increment_at("4.9.7", 1, 1).unwrap(), "5.0.1");
    }

    #[test]
    fn test_increment_at_out_of_range() {
        let err = increment_at("4.9.0.21", 1, 5).unwrap_err();
        assert!(matches!(
            err,
            BuildVersionError::InvalidIncrementPosition {
                position: 5,
                max: 4,
                ..
            }
        ));
        assert!(increment_at("4.9.0.21", 1, 0).is_err());
        assert!(increment_at("4.9", 1, 3).is_err());
    }

    #[test]
    fn test_increment_overflow_is_an_error() {
        let max = format!("1.0.0.{}", u64::MAX);
        assert!(increment_last(&max, 1).is_err());
    }
}
