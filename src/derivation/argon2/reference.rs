//! Reference block position computation for Argon2.
//!
//! When filling a block at position (lane, index), Argon2 mixes the
//! previous block with a reference block chosen from the pseudo-random
//! values J1 and J2. The choice is restricted to blocks that are already
//! final for the current slice, which is what lets lanes run in parallel.

use super::memory::{MemoryLayout, SYNC_POINTS};

/// Computes the reference block position (RFC 9106 §3.4.1.3).
///
/// - Pass 0, slice 0: only earlier blocks of the current lane.
/// - Otherwise: lane `J2 mod lanes`; in another lane only blocks from
///   completed slices, in the current lane also the blocks already filled
///   in this segment, excluding the previous one.
///
/// The index inside the permitted area is mapped with φ so that recent
/// blocks are referenced more often.
///
/// # Returns
///
/// A tuple `(reference_lane, reference_index)`.
pub(crate) fn compute_reference_position(
    layout: &MemoryLayout,
    pass: u32,
    slice: u32,
    lane: u32,
    index_in_segment: u32,
    j1: u32,
    j2: u32,
) -> (u32, u32) {
    let segment_len = layout.segment_len;
    let lane_len = layout.lane_len;

    let ref_lane = if pass == 0 && slice == 0 {
        lane
    } else {
        j2 % layout.lanes
    };

    // Blocks of the reference lane that belong to finished slices
    let finished = if pass == 0 {
        slice * segment_len
    } else {
        lane_len - segment_len
    };

    let reference_area_size = if ref_lane == lane {
        finished + index_in_segment - 1
    } else if index_in_segment == 0 {
        finished - 1
    } else {
        finished
    };

    // φ: x = J1² / 2³², relative = W - 1 - (W × x / 2³²)
    let area = u64::from(reference_area_size);
    let x = (u64::from(j1) * u64::from(j1)) >> 32;
    let relative_position = area - 1 - ((area * x) >> 32);

    let start_position = if pass == 0 || slice == SYNC_POINTS - 1 {
        0
    } else {
        (slice + 1) * segment_len
    };

    let ref_index = (u64::from(start_position) + relative_position) % u64::from(lane_len);

    (ref_lane, ref_index as u32)
}
