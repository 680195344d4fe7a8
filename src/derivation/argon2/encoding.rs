//! Encoded hash strings.
//!
//! Format, identical to the one produced by libargon2:
//!
//! ```text
//! $argon2{d|i|id}$v=19$m=<u32>,t=<u32>,p=<u32>$<base64 salt>$<base64 digest>
//! ```
//!
//! Salt and digest use the standard base64 alphabet without padding.
//! Parsing is strict: every malformed segment yields a [`DecodeError`],
//! nothing falls back to a default.

use core::fmt;
use core::str::FromStr;

use base64::prelude::*;

use super::error::DecodeError;
use super::mode::{ARGON2_VERSION, Argon2Mode};
use super::params::{
    Argon2Params, MAX_MEMORY_COST, MAX_OUTPUT_LEN, MAX_PARALLELISM, MAX_TIME_COST,
    MIN_MEMORY_PER_LANE, MIN_OUTPUT_LEN, MIN_PARALLELISM, MIN_TIME_COST,
};

/// Parsed or to-be-rendered encoded hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedHash {
    pub mode: Argon2Mode,
    pub version: u32,
    /// Memory cost in KiB.
    pub memory_cost: u32,
    /// Number of passes.
    pub time_cost: u32,
    /// Number of lanes.
    pub parallelism: u32,
    pub salt: Vec<u8>,
    pub digest: Vec<u8>,
}

impl EncodedHash {
    /// Pairs validated parameters with the digest they produced.
    pub fn new(params: &Argon2Params, digest: Vec<u8>) -> Self {
        Self {
            mode: params.mode(),
            version: ARGON2_VERSION,
            memory_cost: params.memory_cost(),
            time_cost: params.time_cost(),
            parallelism: params.parallelism(),
            salt: params.salt().to_vec(),
            digest,
        }
    }
}

impl fmt::Display for EncodedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${}$v={}$m={},t={},p={}${}${}",
            self.mode,
            self.version,
            self.memory_cost,
            self.time_cost,
            self.parallelism,
            BASE64_STANDARD_NO_PAD.encode(&self.salt),
            BASE64_STANDARD_NO_PAD.encode(&self.digest),
        )
    }
}

impl FromStr for EncodedHash {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

/// Renders an encoded hash string.
pub fn encode(hash: &EncodedHash) -> String {
    hash.to_string()
}

/// Parses an encoded hash string.
///
/// # Errors
///
/// - [`DecodeError::BadPrefix`]: no leading `$` or unknown variant
/// - [`DecodeError::WrongFieldCount`]: not exactly five segments
/// - [`DecodeError::BadVersion`]: version segment other than `v=19`
/// - [`DecodeError::BadParameterField`]: malformed `m=..,t=..,p=..`, or
///   values outside the bounds hashing clamps to
/// - [`DecodeError::BadBase64`]: salt or digest is not canonical base64
/// - [`DecodeError::BadDigestLength`]: digest outside 4..=1024 bytes
pub fn decode(encoded: &str) -> Result<EncodedHash, DecodeError> {
    let rest = encoded.strip_prefix('$').ok_or(DecodeError::BadPrefix)?;

    let fields: Vec<&str> = rest.split('$').collect();
    let &[mode, version, parameters, salt, digest] = fields.as_slice() else {
        return Err(DecodeError::WrongFieldCount);
    };

    let mode = mode.parse::<Argon2Mode>()?;
    let version = parse_version(version)?;
    let (memory_cost, time_cost, parallelism) = parse_parameters(parameters)?;

    let salt = BASE64_STANDARD_NO_PAD.decode(salt)?;
    let digest = BASE64_STANDARD_NO_PAD.decode(digest)?;

    if !(MIN_OUTPUT_LEN..=MAX_OUTPUT_LEN).contains(&digest.len()) {
        return Err(DecodeError::BadDigestLength(digest.len()));
    }

    Ok(EncodedHash {
        mode,
        version,
        memory_cost,
        time_cost,
        parallelism,
        salt,
        digest,
    })
}

fn parse_version(field: &str) -> Result<u32, DecodeError> {
    let value = field.strip_prefix("v=").ok_or(DecodeError::BadVersion)?;
    match parse_decimal(value) {
        Some(ARGON2_VERSION) => Ok(ARGON2_VERSION),
        _ => Err(DecodeError::BadVersion),
    }
}

/// Parses `m=<u32>,t=<u32>,p=<u32>`, in that order, and checks the values
/// against the same bounds hashing clamps to. A string asking for more work
/// than a hash call would ever do is rejected before anything is computed.
fn parse_parameters(field: &str) -> Result<(u32, u32, u32), DecodeError> {
    let mut values = [0u32; 3];
    let mut pairs = field.split(',');

    for (slot, key) in values.iter_mut().zip(["m", "t", "p"]) {
        let (name, value) = pairs
            .next()
            .and_then(|pair| pair.split_once('='))
            .ok_or(DecodeError::BadParameterField)?;
        if name != key {
            return Err(DecodeError::BadParameterField);
        }
        *slot = parse_decimal(value).ok_or(DecodeError::BadParameterField)?;
    }

    if pairs.next().is_some() {
        return Err(DecodeError::BadParameterField);
    }

    let [memory_cost, time_cost, parallelism] = values;

    if !(MIN_TIME_COST..=MAX_TIME_COST).contains(&time_cost)
        || !(MIN_PARALLELISM..=MAX_PARALLELISM).contains(&parallelism)
        || !(MIN_MEMORY_PER_LANE * parallelism..=MAX_MEMORY_COST).contains(&memory_cost)
    {
        return Err(DecodeError::BadParameterField);
    }

    Ok((memory_cost, time_cost, parallelism))
}

/// Unsigned decimal without sign or leading zeros.
fn parse_decimal(value: &str) -> Option<u32> {
    let canonical = !value.is_empty()
        && value.bytes().all(|b| b.is_ascii_digit())
        && (value == "0" || !value.starts_with('0'));

    if canonical { value.parse().ok() } else { None }
}
