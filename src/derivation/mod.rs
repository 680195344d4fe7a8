//! Key derivation and password hashing.
//!
//! Currently includes Argon2 (argon2d, argon2i, argon2id) with a pure-Rust
//! memory-filling engine.

pub mod argon2;

pub use argon2::core::{HashOutput, hash, hash_encoded, hash_raw};
pub use argon2::encoding::{EncodedHash, decode, encode};
pub use argon2::error::{Argon2Error, Argon2Result, DecodeError};
pub use argon2::mode::{ARGON2_VERSION, Argon2Mode};
pub use argon2::params::{Argon2Options, Argon2Params, OutputEncoding};
pub use argon2::salt::{DEFAULT_SALT_LEN, generate_salt};
pub use argon2::verify::{verify, verify_keyed};
