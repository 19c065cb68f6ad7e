//! ## parsemark-core::input
//! **The benchmark fixture: one file, loaded once, immutable**
//!
//! Every repetition of the timed loop parses byte-identical input, so
//! the fixture is read fully at startup and never touched again.

use std::path::Path;

use bytes::Bytes;

use crate::error::BenchError;

/// Immutable input buffer for a benchmark run.
#[derive(Debug, Clone)]
pub struct Fixture {
    data: Bytes,
}

impl Fixture {
    /// Reads the file at `path` in full. A missing or unreadable file is
    /// fatal to the run.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, BenchError> {
        let path = path.as_ref();
        let raw = std::fs::read(path)?;
        tracing::debug!(path = %path.display(), bytes = raw.len(), "fixture loaded");
        Ok(Fixture {
            data: Bytes::from(raw),
        })
    }

    /// Wraps a static buffer, for tests and benches.
    pub fn from_static(data: &'static [u8]) -> Self {
        Fixture {
            data: Bytes::from_static(data),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
