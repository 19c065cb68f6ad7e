//! ## parsemark-core::alloc::arena
//! **The bulk-reset arena measured by the arena runner**
//!
//! Blocks are bump-carved from chunks owned by a [`bumpalo::Bump`]; the
//! arena layers the benchmark contract on top: a live-block count,
//! zero-size coercion, non-aborting out-of-memory propagation, a no-op
//! `deallocate`, and a `reset` that rewinds the bump offset while
//! retaining chunk storage for the next iteration. Issued blocks never
//! move: growth appends a new chunk and leaves existing chunks in place.

use std::alloc::Layout;
use std::ptr::NonNull;

use bumpalo::Bump;

use super::stats::ArenaStats;
use super::{AllocError, Allocator, BLOCK_ALIGN};

/// Arena allocator with bulk reclamation.
///
/// Created once per benchmark run and reset after every measured
/// iteration. Consumers never free individual blocks; `deallocate` is
/// accepted and ignored so that a parser's internal free patterns
/// cannot disturb the arena's bookkeeping. Dropping the arena releases
/// the retained chunks.
pub struct ResetArena {
    bump: Bump,
    live_blocks: usize,
    stats: ArenaStats,
}

impl ResetArena {
    /// Creates an empty arena. The first allocation maps the first chunk.
    pub fn new() -> Self {
        ResetArena {
            bump: Bump::new(),
            live_blocks: 0,
            stats: ArenaStats::new(),
        }
    }

    /// Creates an arena with `bytes` of chunk storage pre-mapped, for
    /// runs where the per-iteration footprint is known up front.
    pub fn with_capacity(bytes: usize) -> Self {
        ResetArena {
            bump: Bump::with_capacity(bytes),
            live_blocks: 0,
            stats: ArenaStats::new(),
        }
    }

    /// Number of blocks handed out since the last reset.
    pub fn live_blocks(&self) -> usize {
        self.live_blocks
    }

    /// Counters accumulated over the lifetime of the arena.
    pub fn stats(&self) -> &ArenaStats {
        &self.stats
    }
}

impl Default for ResetArena {
    fn default() -> Self {
        Self::new()
    }
}

impl Allocator for ResetArena {
    fn allocate(&mut self, size: usize) -> Result<NonNull<u8>, AllocError> {
        // The underlying allocator's behavior for zero-size requests is
        // implementation-defined; serve a one-byte block instead.
        let size = size.max(1);
        let layout =
            Layout::from_size_align(size, BLOCK_ALIGN).map_err(|_| AllocError::OutOfMemory)?;
        let block = self
            .bump
            .try_alloc_layout(layout)
            .map_err(|_| AllocError::OutOfMemory)?;
        self.live_blocks += 1;
        self.stats.record_block(size);
        Ok(block)
    }

    fn deallocate(&mut self, _block: NonNull<u8>) {
        // No-op by contract: reclamation is always bulk.
    }

    fn reset(&mut self) {
        self.bump.reset();
        self.live_blocks = 0;
        self.stats.record_reset();
    }
}
