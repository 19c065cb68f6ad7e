use thiserror::Error;

use parsemark_core::alloc::AllocError;
use parsemark_core::error::BenchError;

/// Errors that can occur while building a parse tree.
///
/// HTML tokenization itself never fails (malformed markup degrades to
/// text); a parse fails only when the tree cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Allocation failed while building the parse tree: {0}")]
    Alloc(#[from] AllocError),

    #[error("Element nesting exceeds the supported depth of {limit}")]
    TooDeep { limit: usize },
}

impl From<ParseError> for BenchError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Alloc(inner) => BenchError::Alloc(inner),
            other => BenchError::Parse(other.to_string()),
        }
    }
}
