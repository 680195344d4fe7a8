//! Hashing entry points.
//!
//! [`hash`] takes caller options and returns raw or encoded output;
//! [`hash_raw`] and [`hash_encoded`] take already validated parameters.

use tracing::debug;
use zeroize::Zeroize;

use super::boundary::{finalize, initial_hash, seed_lanes};
use super::encoding::EncodedHash;
use super::error::{Argon2Error, Argon2Result};
use super::memory::{Filler, Memory, MemoryLayout};
use super::params::{Argon2Options, Argon2Params, MIN_ENCODED_SALT_LEN, OutputEncoding};

/// Result of [`hash`]: raw digest bytes or the encoded hash string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HashOutput {
    Raw(Vec<u8>),
    Encoded(String),
}

impl HashOutput {
    /// Raw digest, or the UTF-8 bytes of the encoded string.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Raw(digest) => digest,
            Self::Encoded(encoded) => encoded.as_bytes(),
        }
    }

    /// Lower-case hex of [`as_bytes`](Self::as_bytes).
    pub fn to_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }

    /// The encoded string, if this is encoded output.
    pub fn as_encoded(&self) -> Option<&str> {
        match self {
            Self::Raw(_) => None,
            Self::Encoded(encoded) => Some(encoded),
        }
    }
}

/// Hashes a password with caller-supplied options.
///
/// The options are normalized first (see
/// [`Argon2Params::from_options`]); the output shape follows
/// `options.encoding`.
///
/// # Errors
///
/// - [`Argon2Error::InvalidSalt`] for an empty salt, or a salt shorter
///   than 8 bytes with encoded output.
/// - [`Argon2Error::ParameterOutOfRange`] for inputs longer than
///   `u32::MAX` bytes.
/// - [`Argon2Error::MemoryAllocation`] if the working memory cannot be
///   reserved.
///
/// # Example
///
/// ```rust
/// use argon2_engine::derivation::{Argon2Options, hash};
///
/// let digest = hash(b"Hi CatCrypto!", &Argon2Options::default()).unwrap();
/// assert_eq!(
///     digest.to_hex(),
///     "7c10d417627fbfaf5728e77dc320d0a7597955bf7b71a22b188bc9ec74762a4f"
/// );
/// ```
pub fn hash(password: &[u8], options: &Argon2Options) -> Argon2Result<HashOutput> {
    let params = Argon2Params::from_options(options)?;

    match options.encoding {
        OutputEncoding::Raw => hash_raw(password, &params).map(HashOutput::Raw),
        OutputEncoding::Encoded => hash_encoded(password, &params).map(HashOutput::Encoded),
    }
}

/// Computes the raw Argon2 digest of `password`.
///
/// Allocates the working memory, seeds each lane from H0, runs every pass
/// and returns `params.output_len()` bytes. The working memory is zeroized
/// before this function returns, on success and on error.
///
/// # Errors
///
/// - [`Argon2Error::InvalidSalt`] if the salt is empty.
/// - [`Argon2Error::ParameterOutOfRange`] if the password is longer than
///   `u32::MAX` bytes.
/// - [`Argon2Error::MemoryAllocation`] if the working memory cannot be
///   reserved.
pub fn hash_raw(password: &[u8], params: &Argon2Params) -> Argon2Result<Vec<u8>> {
    if params.salt().is_empty() {
        return Err(Argon2Error::InvalidSalt);
    }

    if u32::try_from(password.len()).is_err() {
        return Err(Argon2Error::ParameterOutOfRange("password"));
    }

    debug!(
        mode = %params.mode(),
        memory_cost = params.memory_cost(),
        time_cost = params.time_cost(),
        parallelism = params.parallelism(),
        output_len = params.output_len(),
        "computing Argon2 digest"
    );

    let layout = MemoryLayout::new(params);
    let mut memory = Memory::allocate(&layout)?;

    let mut h0 = initial_hash(password, params);
    seed_lanes(&mut memory, &layout, &h0);
    h0.zeroize();

    Filler::new(&layout, params).fill(&mut memory);

    Ok(finalize(&memory, &layout, params.output_len()))
}

/// Computes the digest and renders it as an encoded hash string.
///
/// # Errors
///
/// Same as [`hash_raw`], plus [`Argon2Error::InvalidSalt`] if the salt is
/// shorter than 8 bytes.
pub fn hash_encoded(password: &[u8], params: &Argon2Params) -> Argon2Result<String> {
    if params.salt().len() < MIN_ENCODED_SALT_LEN {
        return Err(Argon2Error::InvalidSalt);
    }

    let digest = hash_raw(password, params)?;

    Ok(EncodedHash::new(params, digest).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_output_views() {
        let raw = HashOutput::Raw(vec![0xde, 0xad]);
        assert_eq!(raw.to_hex(), "dead");
        assert_eq!(raw.as_encoded(), None);

        let encoded = HashOutput::Encoded("$argon2i$".to_string());
        assert_eq!(encoded.as_encoded(), Some("$argon2i$"));
        assert_eq!(encoded.as_bytes(), b"$argon2i$");
    }

    #[test]
    fn short_salt_is_raw_only() {
        let options = Argon2Options::default()
            .with_salt("salt")
            .with_memory(8)
            .with_iterations(1);
        let params = Argon2Params::from_options(&options).unwrap();

        assert_eq!(hash_raw(b"password", &params).unwrap().len(), 32);
        assert_eq!(hash_encoded(b"password", &params), Err(Argon2Error::InvalidSalt));
    }
}
