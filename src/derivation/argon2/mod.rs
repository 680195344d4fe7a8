//! Argon2 password hashing function (RFC 9106).
//!
//! Argon2 is a memory-hard password hashing function designed to resist
//! GPU-based brute-force attacks and time-memory trade-offs. Three
//! variants are provided:
//!
//! - **Argon2d**: data-dependent addressing. Fastest, but the memory access
//!   pattern depends on the password.
//! - **Argon2i**: data-independent addressing on every pass, resisting
//!   side-channel attacks.
//! - **Argon2id**: data-independent for the first half of the first pass,
//!   data-dependent afterwards.
//!
//! # Algorithm Overview
//!
//! 1. **Initialization**: Compute H0 = BLAKE2b(params || password || salt || ...)
//! 2. **Lane initialization**: Generate the first two blocks of each lane
//!    using H' (variable-length BLAKE2b).
//! 3. **Memory filling**: Fill the remaining blocks using the compression
//!    function G, which is based on the BLAKE2b round function with
//!    additional multiplication for diffusion.
//! 4. **Finalization**: XOR the last block of each lane together and apply
//!    H' to produce the final tag.
//!
//! # Memory Organization
//!
//! Memory is organized as a matrix of 1024-byte blocks:
//! - **Lanes**: independent rows, filled by parallel workers.
//! - **Slices**: each lane is divided into 4 slices (sync points).
//! - **Segments**: blocks of one lane within a slice.
//!
//! # Parameters
//!
//! Numeric parameters are clamped into range instead of rejected; see
//! [`params`] for the exact floors and ceilings. An empty salt is the only
//! parameter that fails the call.

pub(crate) mod block;
pub(crate) mod boundary;
pub mod core;
pub mod encoding;
pub mod error;
pub(crate) mod memory;
pub mod mode;
pub mod params;
pub(crate) mod reference;
pub mod salt;
pub mod verify;
