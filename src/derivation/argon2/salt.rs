//! Random salt generation.

use rand_core::{OsRng, RngCore};

use super::params::MIN_ENCODED_SALT_LEN;

/// Salt length used when the caller has no preference.
pub const DEFAULT_SALT_LEN: usize = 16;

/// Returns `len` bytes from the operating system's CSPRNG.
///
/// Lengths below 8 bytes are raised to 8 so the salt is always usable for
/// encoded output.
pub fn generate_salt(len: usize) -> Vec<u8> {
    let mut salt = vec![0u8; len.max(MIN_ENCODED_SALT_LEN)];
    OsRng.fill_bytes(&mut salt);
    salt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salts_have_requested_length() {
        assert_eq!(generate_salt(DEFAULT_SALT_LEN).len(), 16);
        assert_eq!(generate_salt(32).len(), 32);
        assert_eq!(generate_salt(0).len(), 8);
    }

    #[test]
    fn salts_differ() {
        assert_ne!(generate_salt(16), generate_salt(16));
    }
}
