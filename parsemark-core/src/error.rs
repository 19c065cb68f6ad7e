use thiserror::Error;

use crate::alloc::AllocError;

/// Fatal conditions for a benchmark run. Any of these discards partial
/// timing results; a run either completes all repetitions or reports
/// nothing.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Allocation failed: {0}")]
    Alloc(#[from] AllocError),

    #[error("Parse failed: {0}")]
    Parse(String),
}
