use crate::error::AppError;
use bcrypt::{hash, verify};

/// Hashes `password` with bcrypt at the given cost. The salt and cost are
/// embedded in the returned string.
pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost).map_err(AppError::from)
}

/// Checks `password` against a stored bcrypt hash.
///
/// A malformed stored hash counts as a mismatch rather than an error.
pub fn verify_password(password: &str, hashed_password: &str) -> bool {
    match verify(password, hashed_password) {
        Ok(matches) => matches,
        Err(e) => {
            log::warn!("stored password hash could not be parsed: {}", e);
            false
        }
    }
}

/// Does the same bcrypt work as a [`verify_password`] call against a hash of
/// `cost`, for callers that have no stored hash to check against.
pub fn spend_verification_time(password: &str, cost: u32) {
    if let Err(e) = hash(password, cost) {
        log::warn!("decoy password hash failed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    #[test]
    fn test_password_hashing_and_verification() {
        let password = "test_password123";
        let hashed = hash_password(password, TEST_COST).unwrap();

        assert_ne!(hashed, password);
        assert!(verify_password(password, &hashed));
        assert!(!verify_password("wrong_password", &hashed));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same", TEST_COST).unwrap();
        let b = hash_password("same", TEST_COST).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_spend_verification_time_costs_as_much_as_verify() {
        use std::time::Instant;

        let cost = 8;
        let hashed = hash_password("pw123", cost).unwrap();

        let start = Instant::now();
        assert!(!verify_password("wrong", &hashed));
        let verify_time = start.elapsed();

        let start = Instant::now();
        spend_verification_time("wrong", cost);
        let decoy_time = start.elapsed();

        assert!(
            decoy_time * 3 >= verify_time,
            "decoy took {:?}, verify took {:?}",
            decoy_time,
            verify_time
        );
    }

    #[test]
    fn test_verify_with_invalid_hash() {
        assert!(!verify_password("test_password123", "invalidhashformat"));
        assert!(!verify_password("test_password123", ""));
    }
}
