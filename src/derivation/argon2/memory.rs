//! Memory organization and filling algorithm for Argon2.
//!
//! Memory is a flat arena of 1024-byte blocks viewed as a matrix of lanes
//! (rows) and columns. Each lane is cut into 4 slices; the part of a lane
//! inside one slice is a segment. Within a slice, segments of different
//! lanes only read blocks from finished slices, so they can be filled
//! concurrently. The end of each slice is the synchronization point.

use std::num::NonZeroUsize;
use std::thread;

use tracing::debug;

use super::block::{AddressGenerator, Block};
use super::error::{Argon2Error, Argon2Result};
use super::mode::Argon2Mode;
use super::params::Argon2Params;
use super::reference::compute_reference_position;

/// Number of slices per pass.
pub(crate) const SYNC_POINTS: u32 = 4;

/// Memory layout parameters for Argon2.
///
/// - Total memory is divided into `lanes` independent rows.
/// - Each lane contains `lane_len` blocks.
/// - Each lane is divided into 4 slices (sync points).
/// - Each slice contains `segment_len` blocks.
#[derive(Debug, Clone)]
pub(crate) struct MemoryLayout {
    pub lanes: u32,
    pub lane_len: u32,
    pub segment_len: u32,
    pub total_blocks: u32,
}

impl MemoryLayout {
    pub(crate) fn new(params: &Argon2Params) -> Self {
        let lanes = params.parallelism();
        let total_blocks = params.memory_blocks();
        let lane_len = total_blocks / lanes;
        let segment_len = lane_len / SYNC_POINTS;

        Self {
            lanes,
            lane_len,
            segment_len,
            total_blocks,
        }
    }

    #[inline]
    pub(crate) fn index(&self, lane: u32, index_in_lane: u32) -> usize {
        lane as usize * self.lane_len as usize + index_in_lane as usize
    }

    /// Number of threads used to fill a slice: one per lane, bounded by
    /// the CPUs available to the process.
    pub(crate) fn workers(&self) -> usize {
        let cpus = thread::available_parallelism().map_or(1, NonZeroUsize::get);
        cpus.min(self.lanes as usize)
    }
}

/// Working memory of one hash computation.
///
/// Allocated per call and never shared between calls. Each block is
/// zeroized when the arena is dropped.
pub(crate) struct Memory {
    blocks: Vec<Block>,
}

impl Memory {
    /// Reserves and zero-fills `layout.total_blocks` blocks.
    ///
    /// # Errors
    ///
    /// [`Argon2Error::MemoryAllocation`] if the reservation fails.
    pub(crate) fn allocate(layout: &MemoryLayout) -> Argon2Result<Self> {
        let count = layout.total_blocks as usize;

        let mut blocks = Vec::new();
        blocks
            .try_reserve_exact(count)
            .map_err(|_| Argon2Error::MemoryAllocation {
                blocks: layout.total_blocks,
            })?;
        blocks.resize(count, Block::ZERO);

        Ok(Self { blocks })
    }

    pub(crate) fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub(crate) fn blocks_mut(&mut self) -> &mut [Block] {
        &mut self.blocks
    }
}

/// Read-only view of one lane during a slice: everything before and after
/// the segment being filled.
struct LaneView<'a> {
    head: &'a [Block],
    tail: &'a [Block],
}

/// The segment of one lane being filled in the current slice.
struct Segment<'a> {
    lane: u32,
    blocks: &'a mut [Block],
}

/// Per-pass, per-slice position shared by all segments of a slice.
#[derive(Clone, Copy)]
struct Position {
    pass: u32,
    slice: u32,
}

/// Memory-fill scheduler.
pub(crate) struct Filler<'l> {
    layout: &'l MemoryLayout,
    mode: Argon2Mode,
    passes: u32,
}

impl<'l> Filler<'l> {
    pub(crate) fn new(layout: &'l MemoryLayout, params: &Argon2Params) -> Self {
        Self {
            layout,
            mode: params.mode(),
            passes: params.time_cost(),
        }
    }

    /// Fills all memory blocks over the configured number of passes.
    ///
    /// Each pass iterates through the 4 slices in order. All lanes finish
    /// slice S before any lane starts slice S + 1.
    pub(crate) fn fill(&self, memory: &mut Memory) {
        let workers = self.layout.workers();
        debug!(
            lanes = self.layout.lanes,
            blocks = self.layout.total_blocks,
            passes = self.passes,
            workers,
            "filling Argon2 memory"
        );

        for pass in 0..self.passes {
            for slice in 0..SYNC_POINTS {
                self.fill_slice(memory.blocks_mut(), Position { pass, slice }, workers);
            }
        }
    }

    /// Fills the segments of every lane for one slice.
    ///
    /// The arena is split into disjoint borrows: each lane's current
    /// segment is handed out mutably, everything else is shared. With more
    /// than one worker the segments are spread over scoped threads, and
    /// leaving the scope is the slice barrier.
    fn fill_slice(&self, blocks: &mut [Block], position: Position, workers: usize) {
        let segment_len = self.layout.segment_len as usize;
        let segment_start = position.slice as usize * segment_len;

        let mut views = Vec::with_capacity(self.layout.lanes as usize);
        let mut segments = Vec::with_capacity(self.layout.lanes as usize);

        for (lane, lane_blocks) in blocks
            .chunks_exact_mut(self.layout.lane_len as usize)
            .enumerate()
        {
            let (head, rest) = lane_blocks.split_at_mut(segment_start);
            let (segment, tail) = rest.split_at_mut(segment_len);
            views.push(LaneView { head, tail });
            segments.push(Segment {
                lane: lane as u32,
                blocks: segment,
            });
        }

        if workers <= 1 {
            for segment in &mut segments {
                self.fill_segment(&views, segment, position);
            }
            return;
        }

        let per_worker = segments.len().div_ceil(workers);
        let views = &views;

        thread::scope(|scope| {
            for chunk in segments.chunks_mut(per_worker) {
                scope.spawn(move || {
                    for segment in chunk {
                        self.fill_segment(views, segment, position);
                    }
                });
            }
        });
    }

    /// Fills one segment.
    ///
    /// For each block position, this function:
    /// 1. Determines J1, J2 (from the address block or the previous block)
    /// 2. Computes the reference block position using J1, J2
    /// 3. Computes the new block as G(previous, reference), XORed into the
    ///    existing block after the first pass
    fn fill_segment(&self, views: &[LaneView<'_>], segment: &mut Segment<'_>, position: Position) {
        let Position { pass, slice } = position;
        let lane = segment.lane;
        let layout = self.layout;
        let segment_start = slice * layout.segment_len;

        let mut addresses = self
            .mode
            .is_data_independent(pass, slice)
            .then(|| {
                AddressGenerator::new(
                    pass,
                    lane,
                    slice,
                    layout.total_blocks,
                    self.passes,
                    self.mode,
                )
            });

        if let Some(addresses) = addresses.as_mut() {
            addresses.advance();
        }

        // The first two blocks of each lane are seeded from H0
        let start = if pass == 0 && slice == 0 { 2 } else { 0 };

        for i in start..layout.segment_len {
            let index_in_lane = segment_start + i;
            let prev_index = if index_in_lane == 0 {
                layout.lane_len - 1
            } else {
                index_in_lane - 1
            };

            let pseudo_random = match addresses.as_mut() {
                Some(addresses) => {
                    if i != 0 && i % 128 == 0 {
                        addresses.advance();
                    }
                    addresses.word(i)
                }
                None => block_at(views, segment, segment_start, lane, prev_index).0[0],
            };

            let j1 = pseudo_random as u32;
            let j2 = (pseudo_random >> 32) as u32;

            let (ref_lane, ref_index) =
                compute_reference_position(layout, pass, slice, lane, i, j1, j2);

            let next = Block::compress(
                block_at(views, segment, segment_start, lane, prev_index),
                block_at(views, segment, segment_start, ref_lane, ref_index),
            );

            let current = &mut segment.blocks[i as usize];
            if pass == 0 {
                *current = next;
            } else {
                current.in_place_xor(&next);
            }
        }
    }
}

/// Resolves (lane, index) while a slice is being filled.
///
/// Blocks inside the current segment are only reachable for the lane that
/// owns it; other lanes never reference another lane's current segment.
fn block_at<'b>(
    views: &'b [LaneView<'_>],
    segment: &'b Segment<'_>,
    segment_start: u32,
    lane: u32,
    index: u32,
) -> &'b Block {
    let view = &views[lane as usize];
    let index = index as usize;
    let start = segment_start as usize;
    let end = start + segment.blocks.len();

    if index < start {
        &view.head[index]
    } else if index < end {
        debug_assert_eq!(lane, segment.lane, "cross-lane reference into the current slice");
        &segment.blocks[index - start]
    } else {
        &view.tail[index - end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derivation::argon2::params::Argon2Options;

    fn params(memory: i64, parallelism: i64) -> Argon2Params {
        Argon2Params::from_options(
            &Argon2Options::default()
                .with_memory(memory)
                .with_parallelism(parallelism),
        )
        .unwrap()
    }

    #[test]
    fn layout_splits_lanes_and_slices() {
        let layout = MemoryLayout::new(&params(100, 3));
        assert_eq!(layout.total_blocks, 96);
        assert_eq!(layout.lane_len, 32);
        assert_eq!(layout.segment_len, 8);
        assert_eq!(layout.index(2, 5), 69);
    }

    #[test]
    fn workers_never_exceed_lanes() {
        assert_eq!(MemoryLayout::new(&params(8, 1)).workers(), 1);
        assert!(MemoryLayout::new(&params(64, 4)).workers() <= 4);
    }

    #[test]
    fn allocation_is_zeroed() {
        let layout = MemoryLayout::new(&params(16, 2));
        let memory = Memory::allocate(&layout).unwrap();
        assert_eq!(memory.blocks().len(), 16);
        assert!(memory.blocks().iter().all(|b| b.0.iter().all(|&w| w == 0)));
    }
}
