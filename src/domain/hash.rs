use crate::error::{BuildVersionError, Result};
use sha1::{Digest, Sha1};

/// Longest branch number that still fits in a `u64`.
pub const MAX_BRANCH_NUMBER_LENGTH: u32 = 19;

/// Deterministic number of at most `length` decimal digits derived from a
/// branch name.
///
/// The SHA-1 digest of the name is read as a big-endian integer and reduced
/// modulo `10^length`. The result is not zero padded. This is a stable
/// fingerprint, not a security primitive.
pub fn branch_number(branch_name: &str, length: u32) -> Result<u64> {
    if length == 0 || length > MAX_BRANCH_NUMBER_LENGTH {
        return Err(BuildVersionError::InvalidHashLength(length));
    }

    let modulus = 10u128.pow(length);
    let digest = Sha1::digest(branch_name.as_bytes());

    // Horner reduction over the digest bytes keeps the remainder below 10^19,
    // so `remainder * 256 + 255` never leaves u128.
    let remainder = digest
        .iter()
        .fold(0u128, |acc, byte| (acc * 256 + u128::from(*byte)) % modulus);

    Ok(remainder as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_branch_numbers() {
        assert_eq!(branch_number("TOOLS-12345", 8).unwrap(), 90920209);
        assert_eq!(branch_number("TOOLS-54321", 8).unwrap(), 3016135);
        assert_eq!(branch_number("TOOLS-1234", 8).unwrap(), 76319135);
        assert_eq!(branch_number("CWB-1234", 8).unwrap(), 53736618);
        assert_eq!(branch_number("feature/fishtank", 8).unwrap(), 70988576);
    }

    #[test]
    fn test_shorter_length_keeps_low_digits() {
        assert_eq!(branch_number("feature/fishtank", 4).unwrap(), 8576);
        assert_eq!(branch_number("TOOLS-1234", 4).unwrap(), 9135);
        assert_eq!(branch_number("CWB-1234", 4).unwrap(), 6618);
    }

    #[test]
    fn test_result_is_not_padded() {
        // sha1("main") ends in ...0673 in decimal
        assert_eq!(branch_number("main", 4).unwrap(), 673);
    }

    #[test]
    fn test_deterministic() {
        let first = branch_number("feature/login", 8).unwrap();
        let second = branch_number("feature/login", 8).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, 52166591);
    }

    #[test]
    fn test_similar_names_do_not_collide() {
        let first = branch_number("HERMESSW-1234", 8).unwrap();
        let second = branch_number("HERMESSW-4321", 8).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_length_bounds() {
        assert!(matches!(
            branch_number("main", 0),
            Err(BuildVersionError::InvalidHashLength(0))
        ));
        assert!(branch_number("main", 20).is_err());
        assert!(branch_number("main", MAX_BRANCH_NUMBER_LENGTH).unwrap() < 10u64.pow(19));
    }
}
