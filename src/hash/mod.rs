//! Hash functions used by the Argon2 engine.
//!
//! Argon2 relies on BLAKE2b in two shapes: the plain hash `H^T` with a
//! digest length between 1 and 64 bytes, and the variable-length hash `H'`
//! that chains BLAKE2b to produce outputs of any size.

pub mod blake2b;

/// Re-export of the BLAKE2b convenience functions.
pub use blake2b::{blake2b, blake2b_long};
