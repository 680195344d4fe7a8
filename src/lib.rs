//! Argon2 password hashing engine.
//!
//! This crate computes Argon2 digests (argon2d, argon2i and argon2id,
//! version 0x13) in pure Rust, renders and parses the standard encoded
//! hash string, and verifies passwords against it.
//!
//! The focus is on **clarity, predictability, and auditability**. The
//! engine takes its parameters explicitly on every call, keeps no global
//! state, and owns its working memory for exactly one computation.
//!
//! # Module overview
//!
//! - `hash`
//!   BLAKE2b and the variable-length hash H' that Argon2 builds on.
//!
//! - `derivation`
//!   The Argon2 engine itself:
//!   - parameter normalization (clamping of out-of-range values)
//!   - the compression function G and the memory-filling passes, with
//!     lanes filled in parallel between slice boundaries
//!   - raw and encoded output
//!   - parsing of encoded hashes and constant-time verification
//!
//! # Example
//!
//! ```rust
//! use argon2_engine::{Argon2Mode, Argon2Options, OutputEncoding, hash, verify};
//!
//! let options = Argon2Options::default()
//!     .with_mode(Argon2Mode::Argon2id)
//!     .with_memory(64)
//!     .with_iterations(2)
//!     .with_salt("a-16-byte-salt!!")
//!     .with_encoding(OutputEncoding::Encoded);
//!
//! let encoded = hash(b"correct horse", &options).unwrap();
//! let encoded = encoded.as_encoded().unwrap();
//!
//! assert!(encoded.starts_with("$argon2id$v=19$m=64,t=2,p=1$"));
//! assert!(verify(encoded, b"correct horse").unwrap());
//! assert!(!verify(encoded, b"battery staple").unwrap());
//! ```
//!
//! # Design goals
//!
//! - Clamp numeric parameters to safe bounds rather than fail
//! - Typed errors that separate malformed input from a wrong password
//! - Working memory zeroized on release
//! - No shared mutable state between calls
//!
//! Logging goes through `tracing`; the crate never installs a subscriber.

pub mod derivation;
pub mod hash;

pub use derivation::{
    Argon2Error, Argon2Mode, Argon2Options, Argon2Params, Argon2Result, DecodeError, EncodedHash,
    HashOutput, OutputEncoding, decode, encode, generate_salt, hash, hash_encoded, hash_raw,
    verify, verify_keyed,
};
