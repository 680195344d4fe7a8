//! Initialization and finalization for Argon2.
//!
//! This module handles the boundary operations of the Argon2 algorithm:
//! computing the initial hash H0 from all inputs, seeding the first two
//! blocks of each lane, and deriving the final tag from the filled memory.

use zeroize::Zeroize;

use super::block::{BLOCK_BYTES, Block};
use super::memory::{Memory, MemoryLayout};
use super::mode::ARGON2_VERSION;
use super::params::Argon2Params;
use crate::hash::{blake2b, blake2b_long};

/// Length of H0 in bytes.
pub(crate) const H0_LEN: usize = 64;

/// Computes the initial hash H0 from all Argon2 inputs.
///
/// H0 is a 64-byte BLAKE2b hash of every parameter and input, each
/// variable-length input prefixed with its length (RFC 9106 §3.2):
///
/// ```text
/// H0 = H^64(LE32(p) || LE32(T) || LE32(m) || LE32(t) || LE32(v) || LE32(y)
///           || LE32(|P|) || P || LE32(|S|) || S || LE32(|K|) || K
///           || LE32(|X|) || X)
/// ```
///
/// `m` is the memory cost as requested, not the rounded block count.
/// All lengths were checked to fit in 32 bits before this is called.
pub(crate) fn initial_hash(password: &[u8], params: &Argon2Params) -> [u8; H0_LEN] {
    let secret = params.secret().unwrap_or_default();
    let associated_data = params.associated_data().unwrap_or_default();

    let lanes = params.parallelism().to_le_bytes();
    let tag_len = (params.output_len() as u32).to_le_bytes();
    let memory = params.memory_cost().to_le_bytes();
    let time = params.time_cost().to_le_bytes();
    let version = ARGON2_VERSION.to_le_bytes();
    let mode = params.mode().type_id().to_le_bytes();
    let password_len = (password.len() as u32).to_le_bytes();
    let salt_len = (params.salt().len() as u32).to_le_bytes();
    let secret_len = (secret.len() as u32).to_le_bytes();
    let associated_data_len = (associated_data.len() as u32).to_le_bytes();

    let mut h0 = [0u8; H0_LEN];
    blake2b(
        &mut h0,
        &[
            &lanes,
            &tag_len,
            &memory,
            &time,
            &version,
            &mode,
            &password_len,
            password,
            &salt_len,
            params.salt(),
            &secret_len,
            secret,
            &associated_data_len,
            associated_data,
        ],
    );

    h0
}

/// Seeds the first two blocks of each lane:
/// `B[i][j] = H'^1024(H0 || LE32(j) || LE32(i))` for `j` in {0, 1}.
pub(crate) fn seed_lanes(memory: &mut Memory, layout: &MemoryLayout, h0: &[u8; H0_LEN]) {
    let mut bytes = [0u8; BLOCK_BYTES];

    for lane in 0..layout.lanes {
        for column in 0..2u32 {
            blake2b_long(
                &mut bytes,
                &[h0, &column.to_le_bytes(), &lane.to_le_bytes()],
            );
            memory.blocks_mut()[layout.index(lane, column)] = Block::from_bytes(&bytes);
        }
    }

    bytes.zeroize();
}

/// Finalizes the Argon2 computation to produce the output tag.
///
/// XORs together the last block of each lane and applies H' to the result
/// to produce `tag_len` bytes. Every lane contributes to the output.
pub(crate) fn finalize(memory: &Memory, layout: &MemoryLayout, tag_len: usize) -> Vec<u8> {
    let mut final_block = Block::ZERO;

    for lane in 0..layout.lanes {
        final_block.in_place_xor(&memory.blocks()[layout.index(lane, layout.lane_len - 1)]);
    }

    let mut bytes = final_block.to_bytes();
    let mut tag = vec![0u8; tag_len];
    blake2b_long(&mut tag, &[&bytes]);
    bytes.zeroize();

    tag
}
