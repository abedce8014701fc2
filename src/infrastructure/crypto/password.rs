//! Password hashing utilities

use bcrypt::{hash, verify};

/// Lowest and highest work factors bcrypt accepts.
pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

/// bcrypt only reads this many bytes of input; anything past it is ignored.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hash a password using bcrypt. The cost is clamped to the range bcrypt
/// supports.
pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(password, cost.clamp(MIN_COST, MAX_COST))
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "secure_password_123";
        let hashed = hash_password(password, MIN_COST).unwrap();

        assert_ne!(hashed, password);
        assert!(verify_password(password, &hashed).unwrap());
        assert!(!verify_password("wrong_password", &hashed).unwrap());
    }

    #[test]
    fn bytes_past_the_limit_are_ignored_by_bcrypt() {
        let prefix = "a".repeat(MAX_PASSWORD_BYTES);
        let hashed = hash_password(&format!("{prefix}SECRET"), MIN_COST).unwrap();
        assert!(verify_password(&format!("{prefix}OTHER"), &hashed).unwrap());
    }

    #[test]
    fn out_of_range_cost_is_clamped() {
        let hashed = hash_password("pw1", 0).unwrap();
        assert!(hashed.starts_with("$2b$04$"));
    }
}
