//! Random salt generation

use thiserror::Error;

/// Salt size used when none is requested (128 bits)
pub const DEFAULT_SALT_BYTES: usize = 16;

/// Largest salt the generator will produce
pub const MAX_SALT_BYTES: usize = 64;

#[derive(Error, Debug)]
pub enum SaltError {
    #[error("Failed to gather entropy: {0}")]
    Entropy(String),

    #[error("Salt size {0} is outside 1..=64 bytes")]
    Size(usize),
}

/// Generate `bytes` random bytes from the OS and return them as lowercase hex
pub fn random_salt(bytes: usize) -> Result<String, SaltError> {
    if !(1..=MAX_SALT_BYTES).contains(&bytes) {
        return Err(SaltError::Size(bytes));
    }
    let mut salt = vec![0u8; bytes];
    getrandom::getrandom(&mut salt).map_err(|e| SaltError::Entropy(e.to_string()))?;
    Ok(hex::encode(salt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_salt_length() {
        let salt = random_salt(DEFAULT_SALT_BYTES).unwrap();
        assert_eq!(salt.len(), DEFAULT_SALT_BYTES * 2);
        assert!(salt.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_random_salts_differ() {
        assert_ne!(random_salt(32).unwrap(), random_salt(32).unwrap());
    }

    #[test]
    fn test_size_bounds() {
        assert!(matches!(random_salt(0), Err(SaltError::Size(0))));
        assert!(matches!(random_salt(65), Err(SaltError::Size(65))));
        assert!(random_salt(MAX_SALT_BYTES).is_ok());
    }
}
