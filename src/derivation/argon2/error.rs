//! Error types for the Argon2 engine.
//!
//! Numeric parameters are normalized rather than rejected, so the only
//! hard failures are a missing salt, inputs too long for the 32-bit length
//! fields of H0, an allocation failure for the working memory, and
//! malformed encoded hash strings.
//!
//! A password that does not match an encoded hash is not an error:
//! verification returns `Ok(false)` in that case.

use thiserror::Error;

/// Errors returned by hashing and verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Argon2Error {
    /// The salt is empty, or shorter than 8 bytes for encoded output.
    #[error("Invalid salt")]
    InvalidSalt,

    /// An input cannot be represented in the algorithm's 32-bit fields.
    #[error("Parameter out of range: {0}")]
    ParameterOutOfRange(&'static str),

    /// The working memory could not be reserved.
    #[error("Unable to allocate {blocks} memory blocks")]
    MemoryAllocation {
        /// Number of 1 KiB blocks that were requested.
        blocks: u32,
    },

    /// The encoded hash string could not be parsed.
    #[error("Invalid encoded hash: {0}")]
    Decode(#[from] DecodeError),
}

/// Reasons an encoded hash string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Missing leading `$` or unknown `argon2` variant.
    #[error("bad prefix")]
    BadPrefix,

    /// Version segment other than `v=19`.
    #[error("bad version")]
    BadVersion,

    /// Malformed or out-of-range `m=..,t=..,p=..` segment.
    #[error("bad parameter field")]
    BadParameterField,

    /// Salt or digest is not canonical unpadded base64.
    #[error("bad base64: {0}")]
    BadBase64(#[from] base64::DecodeError),

    /// The string does not have exactly five `$`-separated segments.
    #[error("wrong field count")]
    WrongFieldCount,

    /// Digest shorter than 4 or longer than 1024 bytes.
    #[error("bad digest length: {0}")]
    BadDigestLength(usize),
}

/// Result type alias for Argon2 operations.
pub type Argon2Result<T> = Result<T, Argon2Error>;
