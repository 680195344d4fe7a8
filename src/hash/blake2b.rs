//! BLAKE2b and the variable-length hash H' (RFC 9106 §3.3).
//!
//! The compression rounds come from the `blake2` crate; this module only
//! arranges the inputs the way Argon2 expects them. Every function writes
//! into a caller-provided buffer, whose length is the requested digest
//! length.

use blake2::Blake2bVar;
use blake2::digest::{Update, VariableOutput};
use zeroize::Zeroize;

/// Largest digest BLAKE2b can produce in a single invocation.
pub const BLAKE2B_MAX_OUT: usize = 64;

/// Computes `H^T(parts[0] || parts[1] || ...)` where `T = out.len()`.
///
/// The digest length is part of the BLAKE2b parameter block, so a 32-byte
/// digest is not a prefix of a 64-byte digest of the same input.
///
/// # Panics
///
/// Panics if `out` is empty or longer than [`BLAKE2B_MAX_OUT`]. Callers
/// inside the crate always pass a length in `1..=64`.
pub fn blake2b(out: &mut [u8], parts: &[&[u8]]) {
    let mut hasher =
        Blake2bVar::new(out.len()).expect("BLAKE2b digest length is within 1..=64");

    for part in parts {
        hasher.update(part);
    }

    hasher
        .finalize_variable(out)
        .expect("output buffer has the length the hasher was created with");
}

/// Variable-length hash function H'.
///
/// For `T <= 64` this is `H^T(LE32(T) || X)`. Longer outputs chain 64-byte
/// digests `V1 .. Vr`, keep the first 32 bytes of each, and end with a
/// final digest `V(r+1)` covering the remaining `T - 32r` bytes:
///
/// ```text
/// V1     = H^64(LE32(T) || X)
/// Vi     = H^64(V(i-1))          2 <= i <= r
/// V(r+1) = H^(T - 32r)(Vr)
/// ```
///
/// # Panics
///
/// Panics if `out` is empty or longer than `u32::MAX` bytes.
pub fn blake2b_long(out: &mut [u8], parts: &[&[u8]]) {
    let len = u32::try_from(out.len()).expect("H' output length fits in 32 bits");
    let prefix = len.to_le_bytes();

    let mut input: Vec<&[u8]> = Vec::with_capacity(parts.len() + 1);
    input.push(&prefix);
    input.extend_from_slice(parts);

    if out.len() <= BLAKE2B_MAX_OUT {
        blake2b(out, &input);
        return;
    }

    let half = BLAKE2B_MAX_OUT / 2;
    let mut v = [0u8; BLAKE2B_MAX_OUT];
    blake2b(&mut v, &input);
    out[..half].copy_from_slice(&v[..half]);

    let mut prev = [0u8; BLAKE2B_MAX_OUT];
    let mut written = half;
    while out.len() - written > BLAKE2B_MAX_OUT {
        prev.copy_from_slice(&v);
        blake2b(&mut v, &[&prev]);
        out[written..written + half].copy_from_slice(&v[..half]);
        written += half;
    }

    blake2b(&mut out[written..], &[&v]);

    v.zeroize();
    prev.zeroize();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blake2b_512_empty_input() {
        let mut out = [0u8; 64];
        blake2b(&mut out, &[]);
        assert_eq!(
            hex::encode(out),
            "786a02f742015903c6c6fd852552d272912f4740e15847618a86e217f71f5419\
             d25e1031afee585313896444934eb04b903a685b1448b755d56f701afe9be2ce"
        );
    }

    #[test]
    fn blake2b_parts_are_concatenated() {
        let mut split = [0u8; 32];
        let mut joined = [0u8; 32];
        blake2b(&mut split, &[b"hello ", b"argon"]);
        blake2b(&mut joined, &[b"hello argon"]);
        assert_eq!(split, joined);
    }

    #[test]
    fn blake2b_length_is_part_of_the_digest() {
        let mut short = [0u8; 32];
        let mut long = [0u8; 64];
        blake2b(&mut short, &[b"abc"]);
        blake2b(&mut long, &[b"abc"]);
        assert_ne!(short[..], long[..32]);
    }

    #[test]
    fn short_h_prime_prefixes_length() {
        let mut expected = [0u8; 32];
        blake2b(&mut expected, &[&32u32.to_le_bytes(), b"input"]);

        let mut out = [0u8; 32];
        blake2b_long(&mut out, &[b"input"]);
        assert_eq!(out, expected);
    }

    #[test]
    fn long_h_prime_chains_digests() {
        let mut out = vec![0u8; 100];
        blake2b_long(&mut out, &[b"input"]);

        let mut v1 = [0u8; 64];
        blake2b(&mut v1, &[&100u32.to_le_bytes(), b"input"]);
        let mut v2 = [0u8; 64];
        blake2b(&mut v2, &[&v1]);
        let mut last = [0u8; 36];
        blake2b(&mut last, &[&v2]);

        assert_eq!(out[..32], v1[..32]);
        assert_eq!(out[32..64], v2[..32]);
        assert_eq!(out[64..], last[..]);
    }
}
