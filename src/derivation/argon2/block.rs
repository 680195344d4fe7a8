//! Block operations for Argon2.
//!
//! This module defines the 1024-byte block and the compression function G
//! that every memory block is produced with. G is built from the BLAKE2b
//! round function, with the additions replaced by the BlaMka multiply-add
//! for extra diffusion.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::mode::Argon2Mode;

/// Number of 64-bit words per block.
pub(crate) const BLOCK_WORDS: usize = 128;
/// Size of a block in bytes.
pub(crate) const BLOCK_BYTES: usize = BLOCK_WORDS * 8;

/// A 1024-byte memory block (128 × 64-bit words).
///
/// Blocks may hold password-derived material, so every block is zeroized
/// when dropped.
#[derive(Debug, Clone, Zeroize, ZeroizeOnDrop)]
pub struct Block(pub [u64; BLOCK_WORDS]);

impl Block {
    pub(crate) const ZERO: Self = Self([0u64; BLOCK_WORDS]);

    pub(crate) fn in_place_xor(&mut self, other: &Block) {
        self.0
            .iter_mut()
            .zip(other.0.iter())
            .for_each(|(a, b)| *a ^= b);
    }

    pub(crate) fn from_bytes(bytes: &[u8; BLOCK_BYTES]) -> Self {
        let mut block = Block::ZERO;
        for (word, chunk) in block.0.iter_mut().zip(bytes.chunks_exact(8)) {
            let mut le = [0u8; 8];
            le.copy_from_slice(chunk);
            *word = u64::from_le_bytes(le);
        }
        block
    }

    pub(crate) fn to_bytes(&self) -> [u8; BLOCK_BYTES] {
        let mut out = [0u8; BLOCK_BYTES];
        for (chunk, word) in out.chunks_exact_mut(8).zip(self.0.iter()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        out
    }

    /// Compression function G (RFC 9106 §3.5).
    ///
    /// Computes `G(X, Y) = P(P(X ⊕ Y)) ⊕ X ⊕ Y`. The 128 words are viewed
    /// as an 8×8 matrix of 16-byte registers; P is applied to each row,
    /// then to each column.
    pub(crate) fn compress(x: &Self, y: &Self) -> Self {
        let mut r = x.clone();
        r.in_place_xor(y);

        let mut z = r.clone();

        // Rows: 8 groups of 16 consecutive words
        for row in z.0.chunks_exact_mut(16) {
            let mut v = [0u64; 16];
            v.copy_from_slice(row);
            permute_p(&mut v);
            row.copy_from_slice(&v);
        }

        // Columns: 8 groups of 8 word pairs, 16 words apart
        for column in 0..8 {
            let indices: [usize; 16] = std::array::from_fn(|k| 2 * column + 16 * (k / 2) + k % 2);

            let mut v = [0u64; 16];
            for (slot, &index) in v.iter_mut().zip(indices.iter()) {
                *slot = z.0[index];
            }

            permute_p(&mut v);

            for (&word, &index) in v.iter().zip(indices.iter()) {
                z.0[index] = word;
            }
        }

        z.in_place_xor(&r);
        z
    }
}

/// Input block Z for data-independent addressing.
///
/// Holds `(pass, lane, slice, memory blocks, passes, type, counter)`; the
/// address block is `G(0, G(0, Z))` and is regenerated, with the counter
/// bumped, every 128 reference indices.
pub(crate) struct AddressGenerator {
    input: Block,
    addresses: Block,
}

impl AddressGenerator {
    pub(crate) fn new(
        pass: u32,
        lane: u32,
        slice: u32,
        memory_blocks: u32,
        passes: u32,
        mode: Argon2Mode,
    ) -> Self {
        let mut input = Block::ZERO;
        input.0[0] = u64::from(pass);
        input.0[1] = u64::from(lane);
        input.0[2] = u64::from(slice);
        input.0[3] = u64::from(memory_blocks);
        input.0[4] = u64::from(passes);
        input.0[5] = u64::from(mode.type_id());

        Self {
            input,
            addresses: Block::ZERO,
        }
    }

    /// Bumps the counter and recomputes the address block.
    pub(crate) fn advance(&mut self) {
        self.input.0[6] += 1;
        let tmp = Block::compress(&Block::ZERO, &self.input);
        self.addresses = Block::compress(&Block::ZERO, &tmp);
    }

    /// Pseudo-random word for the block at `index_in_segment`.
    pub(crate) fn word(&self, index_in_segment: u32) -> u64 {
        self.addresses.0[index_in_segment as usize % BLOCK_WORDS]
    }
}

/// GB mixing function (Argon2 variant of BLAKE2b's G).
///
/// ```text
/// a = a + b + 2 × lo32(a) × lo32(b)
/// d = (d ⊕ a) >>> 32
/// c = c + d + 2 × lo32(c) × lo32(d)
/// b = (b ⊕ c) >>> 24
/// ```
///
/// repeated with rotations 16 and 63.
#[inline(always)]
fn gb(a: u64, b: u64, c: u64, d: u64) -> (u64, u64, u64, u64) {
    let a = blamka(a, b);
    let d = (d ^ a).rotate_right(32);
    let c = blamka(c, d);
    let b = (b ^ c).rotate_right(24);

    let a = blamka(a, b);
    let d = (d ^ a).rotate_right(16);
    let c = blamka(c, d);
    let b = (b ^ c).rotate_right(63);

    (a, b, c, d)
}

#[inline(always)]
fn blamka(x: u64, y: u64) -> u64 {
    let lo = u64::from(x as u32).wrapping_mul(u64::from(y as u32));
    x.wrapping_add(y).wrapping_add(lo.wrapping_mul(2))
}

/// P permutation: one round of the BLAKE2-like mixing.
///
/// Applies GB to a 4×4 matrix of 64-bit words, first along columns,
/// then along diagonals.
#[inline(always)]
fn permute_p(v: &mut [u64; 16]) {
    (v[0], v[4], v[8], v[12]) = gb(v[0], v[4], v[8], v[12]);
    (v[1], v[5], v[9], v[13]) = gb(v[1], v[5], v[9], v[13]);
    (v[2], v[6], v[10], v[14]) = gb(v[2], v[6], v[10], v[14]);
    (v[3], v[7], v[11], v[15]) = gb(v[3], v[7], v[11], v[15]);

    (v[0], v[5], v[10], v[15]) = gb(v[0], v[5], v[10], v[15]);
    (v[1], v[6], v[11], v[12]) = gb(v[1], v[6], v[11], v[12]);
    (v[2], v[7], v[8], v[13]) = gb(v[2], v[7], v[8], v[13]);
    (v[3], v[4], v[9], v[14]) = gb(v[3], v[4], v[9], v[14]);
}
