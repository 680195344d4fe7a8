//! Password verification against encoded hash strings.
//!
//! A parse failure is reported as an error, a wrong password as
//! `Ok(false)`, so callers can tell a corrupt or foreign hash from a
//! failed login. Digests are compared in constant time.

use subtle::ConstantTimeEq;
use tracing::debug;
use zeroize::Zeroizing;

use super::core::hash_raw;
use super::encoding::{EncodedHash, decode};
use super::error::Argon2Result;
use super::params::{Argon2Options, Argon2Params, OutputEncoding};

/// Verifies `password` against an encoded hash.
///
/// # Errors
///
/// - [`Argon2Error::Decode`](super::error::Argon2Error::Decode) if the
///   string cannot be parsed.
/// - [`Argon2Error::InvalidSalt`](super::error::Argon2Error::InvalidSalt)
///   if the encoded salt is empty.
/// - Any error [`hash_raw`] returns while recomputing the digest.
///
/// # Example
///
/// ```rust
/// use argon2_engine::derivation::verify;
///
/// let hash = "$argon2i$v=19$m=4096,t=3,p=1$c29tZXNhbHQ$fBDUF2J/v69XKOd9wyDQp1l5Vb97caIrGIvJ7HR2Kk8";
/// assert!(verify(hash, b"Hi CatCrypto!").unwrap());
/// assert!(!verify(hash, b"CatCrypto").unwrap());
/// ```
pub fn verify(encoded: &str, password: &[u8]) -> Argon2Result<bool> {
    verify_keyed(encoded, password, None, None)
}

/// Verifies a hash that was computed with a secret key and/or associated
/// data. Neither is stored in the encoded string, so both must be
/// supplied again.
///
/// # Errors
///
/// Same as [`verify`].
pub fn verify_keyed(
    encoded: &str,
    password: &[u8],
    secret: Option<&[u8]>,
    associated_data: Option<&[u8]>,
) -> Argon2Result<bool> {
    let expected = decode(encoded).inspect_err(|err| {
        debug!(%err, "rejecting malformed Argon2 hash");
    })?;

    let params = Argon2Params::from_options(&options_for(&expected, secret, associated_data))?;
    let computed = hash_raw(password, &params)?;

    Ok(computed.ct_eq(&expected.digest).into())
}

/// Options reproducing the computation that produced `hash`.
fn options_for(
    hash: &EncodedHash,
    secret: Option<&[u8]>,
    associated_data: Option<&[u8]>,
) -> Argon2Options {
    Argon2Options {
        mode: hash.mode,
        iterations: i64::from(hash.time_cost),
        memory: i64::from(hash.memory_cost),
        parallelism: i64::from(hash.parallelism),
        salt: hash.salt.clone(),
        secret: secret.map(|secret| Zeroizing::new(secret.to_vec())),
        associated_data: associated_data.map(<[u8]>::to_vec),
        output_len: hash.digest.len() as i64,
        encoding: OutputEncoding::Raw,
    }
}
