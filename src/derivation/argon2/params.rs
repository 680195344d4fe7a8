//! Parameter definitions and normalization for Argon2.
//!
//! [`Argon2Options`] is the caller-facing configuration: every numeric
//! field is a signed 64-bit integer so that zero, negative and
//! beyond-32-bit requests can be expressed. [`Argon2Params::from_options`]
//! normalizes those requests into the ranges RFC 9106 allows, clamping
//! instead of failing. The only hard failure is a missing salt.
//!
//! # Normalization
//!
//! | Field         | Floor          | Ceiling                |
//! |---------------|----------------|------------------------|
//! | `iterations`  | 1              | 64                     |
//! | `parallelism` | 1              | 256                    |
//! | `memory`      | 8 × lanes KiB  | 262144 KiB (256 MiB)   |
//! | `output_len`  | 4 bytes        | 1024 bytes             |
//!
//! The floors are the RFC 9106 minimums. The ceilings bound the work of a
//! single call, so any request, however large, still produces a digest.
//! Encoded hashes above the ceilings are refused by
//! [`decode`](super::encoding::decode).
//!
//! The memory actually filled is the (clamped) memory cost rounded down to
//! a multiple of `4 × lanes`; see [`Argon2Params::memory_blocks`].

use core::fmt;

use tracing::warn;
use zeroize::Zeroizing;

use super::error::{Argon2Error, Argon2Result};
use super::mode::Argon2Mode;

/// Minimum number of passes.
pub const MIN_TIME_COST: u32 = 1;
/// Maximum number of passes.
pub const MAX_TIME_COST: u32 = 64;
/// Minimum number of lanes.
pub const MIN_PARALLELISM: u32 = 1;
/// Maximum number of lanes.
pub const MAX_PARALLELISM: u32 = 256;
/// Minimum memory per lane, in KiB.
pub const MIN_MEMORY_PER_LANE: u32 = 8;
/// Maximum memory cost, in KiB (256 MiB).
pub const MAX_MEMORY_COST: u32 = 256 * 1024;
/// Minimum digest length in bytes.
pub const MIN_OUTPUT_LEN: usize = 4;
/// Maximum digest length in bytes.
pub const MAX_OUTPUT_LEN: usize = 1024;
/// Minimum salt length accepted for encoded output.
pub const MIN_ENCODED_SALT_LEN: usize = 8;

/// Shape of the value returned by [`hash`](super::core::hash).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OutputEncoding {
    /// Raw digest bytes.
    #[default]
    Raw,
    /// `$argon2..$v=19$m=..,t=..,p=..$salt$digest` string.
    Encoded,
}

/// Caller-supplied Argon2 configuration.
///
/// Defaults: argon2i, 3 iterations, 4096 KiB, 1 lane, salt `"somesalt"`,
/// 32-byte raw output.
///
/// # Example
///
/// ```rust
/// use argon2_engine::derivation::{Argon2Mode, Argon2Options, OutputEncoding};
///
/// let options = Argon2Options::default()
///     .with_mode(Argon2Mode::Argon2id)
///     .with_memory(19 * 1024)
///     .with_iterations(2)
///     .with_salt("random_salt_16_b")
///     .with_encoding(OutputEncoding::Encoded);
/// assert_eq!(options.parallelism, 1);
/// ```
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Argon2Options {
    /// Variant to compute.
    pub mode: Argon2Mode,
    /// Number of passes over memory.
    pub iterations: i64,
    /// Memory cost in KiB.
    pub memory: i64,
    /// Number of lanes.
    pub parallelism: i64,
    /// Salt bytes. Must not be empty.
    pub salt: Vec<u8>,
    /// Optional secret key (keyed hashing). Wiped when dropped.
    pub secret: Option<Zeroizing<Vec<u8>>>,
    /// Optional associated data.
    pub associated_data: Option<Vec<u8>>,
    /// Digest length in bytes.
    pub output_len: i64,
    /// Raw bytes or encoded string.
    pub encoding: OutputEncoding,
}

impl Default for Argon2Options {
    fn default() -> Self {
        Self {
            mode: Argon2Mode::Argon2i,
            iterations: 3,
            memory: 4096,
            parallelism: 1,
            salt: b"somesalt".to_vec(),
            secret: None,
            associated_data: None,
            output_len: 32,
            encoding: OutputEncoding::Raw,
        }
    }
}

impl Argon2Options {
    /// Sets the variant.
    #[must_use]
    pub fn with_mode(mut self, mode: Argon2Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the number of passes.
    #[must_use]
    pub fn with_iterations(mut self, iterations: i64) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the memory cost in KiB.
    #[must_use]
    pub fn with_memory(mut self, memory: i64) -> Self {
        self.memory = memory;
        self
    }

    /// Sets the number of lanes.
    #[must_use]
    pub fn with_parallelism(mut self, parallelism: i64) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Sets the salt from raw bytes or a UTF-8 string.
    #[must_use]
    pub fn with_salt(mut self, salt: impl AsRef<[u8]>) -> Self {
        self.salt = salt.as_ref().to_vec();
        self
    }

    /// Sets the secret key.
    #[must_use]
    pub fn with_secret(mut self, secret: impl AsRef<[u8]>) -> Self {
        self.secret = Some(Zeroizing::new(secret.as_ref().to_vec()));
        self
    }

    /// Sets the associated data.
    #[must_use]
    pub fn with_associated_data(mut self, associated_data: impl AsRef<[u8]>) -> Self {
        self.associated_data = Some(associated_data.as_ref().to_vec());
        self
    }

    /// Sets the digest length in bytes.
    #[must_use]
    pub fn with_output_len(mut self, output_len: i64) -> Self {
        self.output_len = output_len;
        self
    }

    /// Sets the output encoding.
    #[must_use]
    pub fn with_encoding(mut self, encoding: OutputEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}

impl fmt::Debug for Argon2Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argon2Options")
            .field("mode", &self.mode)
            .field("iterations", &self.iterations)
            .field("memory", &self.memory)
            .field("parallelism", &self.parallelism)
            .field("salt", &hex::encode(&self.salt))
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .field("associated_data", &self.associated_data.as_ref().map(hex::encode))
            .field("output_len", &self.output_len)
            .field("encoding", &self.encoding)
            .finish()
    }
}

/// Validated Argon2 parameters.
///
/// Only obtainable through [`Argon2Params::from_options`], so every value
/// is inside the ranges the engine supports. The secret is zeroized on
/// drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Argon2Params {
    mode: Argon2Mode,
    memory_cost: u32,
    time_cost: u32,
    parallelism: u32,
    output_len: usize,
    salt: Vec<u8>,
    secret: Option<Zeroizing<Vec<u8>>>,
    associated_data: Option<Vec<u8>>,
}

impl Argon2Params {
    /// Normalizes caller options into engine parameters.
    ///
    /// Numeric fields are clamped into range (each adjustment is logged at
    /// `warn` level). Parallelism is resolved first because it sets the
    /// memory floor.
    ///
    /// # Errors
    ///
    /// - [`Argon2Error::InvalidSalt`] if the salt is empty.
    /// - [`Argon2Error::ParameterOutOfRange`] if the salt, secret or
    ///   associated data is longer than `u32::MAX` bytes.
    pub fn from_options(options: &Argon2Options) -> Argon2Result<Self> {
        if options.salt.is_empty() {
            return Err(Argon2Error::InvalidSalt);
        }

        check_length("salt", &options.salt)?;
        if let Some(secret) = &options.secret {
            check_length("secret", secret)?;
        }
        if let Some(ad) = &options.associated_data {
            check_length("associated data", ad)?;
        }

        let time_cost = clamp_field("iterations", options.iterations, MIN_TIME_COST, MAX_TIME_COST);
        let parallelism = clamp_field(
            "parallelism",
            options.parallelism,
            MIN_PARALLELISM,
            MAX_PARALLELISM,
        );
        let memory_cost = clamp_field(
            "memory",
            options.memory,
            MIN_MEMORY_PER_LANE * parallelism,
            MAX_MEMORY_COST,
        );
        let output_len = clamp_field(
            "output length",
            options.output_len,
            MIN_OUTPUT_LEN as u32,
            MAX_OUTPUT_LEN as u32,
        ) as usize;

        Ok(Self {
            mode: options.mode,
            memory_cost,
            time_cost,
            parallelism,
            output_len,
            salt: options.salt.clone(),
            secret: options.secret.clone(),
            associated_data: options.associated_data.clone(),
        })
    }

    /// Variant to compute.
    pub fn mode(&self) -> Argon2Mode {
        self.mode
    }

    /// Memory cost in KiB, as hashed into H0 and written to encoded strings.
    pub fn memory_cost(&self) -> u32 {
        self.memory_cost
    }

    /// Number of passes.
    pub fn time_cost(&self) -> u32 {
        self.time_cost
    }

    /// Number of lanes.
    pub fn parallelism(&self) -> u32 {
        self.parallelism
    }

    /// Digest length in bytes.
    pub fn output_len(&self) -> usize {
        self.output_len
    }

    /// Salt bytes, never empty.
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// Secret key, if the hash is keyed.
    pub fn secret(&self) -> Option<&[u8]> {
        self.secret.as_deref().map(Vec::as_slice)
    }

    /// Associated data, if any.
    pub fn associated_data(&self) -> Option<&[u8]> {
        self.associated_data.as_deref()
    }

    /// Number of 1 KiB blocks in the working memory: the memory cost
    /// rounded down to a multiple of `4 × lanes`.
    pub fn memory_blocks(&self) -> u32 {
        let quantum = 4 * self.parallelism;
        (self.memory_cost / quantum) * quantum
    }
}

impl TryFrom<&Argon2Options> for Argon2Params {
    type Error = Argon2Error;

    fn try_from(options: &Argon2Options) -> Argon2Result<Self> {
        Self::from_options(options)
    }
}

impl fmt::Debug for Argon2Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argon2Params")
            .field("mode", &self.mode)
            .field("memory_cost", &self.memory_cost)
            .field("time_cost", &self.time_cost)
            .field("parallelism", &self.parallelism)
            .field("output_len", &self.output_len)
            .field("salt", &hex::encode(&self.salt))
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

/// Clamps `requested` into `min..=max`, logging when the value changes.
fn clamp_field(field: &'static str, requested: i64, min: u32, max: u32) -> u32 {
    let clamped = requested.clamp(i64::from(min), i64::from(max));
    let applied = u32::try_from(clamped).unwrap_or(max);

    if i64::from(applied) != requested {
        warn!(field, requested, applied, "Argon2 parameter out of range, clamping");
    }

    applied
}

fn check_length(field: &'static str, bytes: &[u8]) -> Argon2Result<()> {
    if u32::try_from(bytes.len()).is_err() {
        return Err(Argon2Error::ParameterOutOfRange(field));
    }
    Ok(())
}
