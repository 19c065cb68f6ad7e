//! ## parsemark-core::alloc
//! **Bulk-reset arena allocation for hook-driven parsers**
//!
//! ### Expectations:
//! - Reclaiming a full parse costs an offset rewind, not per-block frees
//! - Out-of-memory surfaces as an error to the consumer, never an abort
//! - Backing storage is retained across resets so warm iterations do not
//!   touch the system allocator at all
//!
//! ### Key Submodules:
//! - `arena`: the `ResetArena` allocator
//! - `stats`: allocation counters reported after a run

use std::ptr::NonNull;

use thiserror::Error;

pub mod arena;
pub mod stats;

pub use arena::ResetArena;
pub use stats::ArenaStats;

/// Minimum alignment of every block handed out by an [`Allocator`].
/// Malloc parity: consumers may store any ordinary node type in a block
/// without negotiating a layout per call.
pub const BLOCK_ALIGN: usize = 16;

/// Error type for allocation failures at the allocator boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AllocError {
    #[error("Arena allocation failed: out of memory")]
    OutOfMemory,
}

/// Allocation capability injected into a parse call.
///
/// This is the seam a hook-driven parser allocates through. The
/// contract, for every implementation:
///
/// - `allocate` returns a block of at least `size` bytes, aligned to at
///   least [`BLOCK_ALIGN`]. A zero-byte request is served as a one-byte
///   block. The block stays valid until the next `reset` or until the
///   allocator is dropped, whichever comes first.
/// - `deallocate` accepts any block previously returned by `allocate`
///   and is free to do nothing with it; reclamation is always bulk.
/// - `reset` reclaims every outstanding block in one call. It may be
///   invoked any number of times, including with nothing allocated.
///
/// The trait is object-safe so a parser can take `&mut dyn Allocator`
/// without being generic over the concrete allocator.
pub trait Allocator {
    fn allocate(&mut self, size: usize) -> Result<NonNull<u8>, AllocError>;

    fn deallocate(&mut self, block: NonNull<u8>);

    fn reset(&mut self);
}
