//! ## parsemark-harness
//! **The benchmark driver: one loop, two timestamps, one number**
//!
//! The measurement protocol shared by every runner kind:
//!
//! - the fixture is loaded once and every repetition sees the same bytes;
//! - timestamps are taken only immediately before the first repetition
//!   and immediately after the last, never per iteration;
//! - the repetition count is fixed by the caller, so the result is
//!   directly proportional to per-operation cost;
//! - per-iteration housekeeping (arena reset, document clear) happens
//!   inside the timed region, because a real consumer of that strategy
//!   pays it on every parse;
//! - any repetition failure discards the partial timing and aborts the
//!   run. A benchmark number over a partially failed loop is not
//!   reported.

use std::hint::black_box;

use parsemark_core::alloc::{Allocator, ResetArena};
use parsemark_core::error::BenchError;
use parsemark_core::input::Fixture;
use parsemark_core::time::{MonotonicClock, TimingSample};
use parsemark_parsers::{ByteScanner, Document, HookedParser};

/// Driver for one benchmark run over one fixture.
pub struct Harness {
    fixture: Fixture,
}

impl Harness {
    pub fn new(fixture: Fixture) -> Self {
        Harness { fixture }
    }

    pub fn fixture(&self) -> &Fixture {
        &self.fixture
    }

    /// Runs `op` exactly `iterations` times against the fixture bytes
    /// and returns the elapsed nanoseconds for the whole loop.
    ///
    /// With `iterations == 0` the operation is never invoked and the
    /// elapsed time is (approximately) zero.
    pub fn measure<F>(&self, iterations: u64, mut op: F) -> Result<u64, BenchError>
    where
        F: FnMut(&[u8]) -> Result<(), BenchError>,
    {
        let input = self.fixture.bytes();
        let clock = MonotonicClock::new();

        let start = clock.now_ns();
        for _ in 0..iterations {
            op(input)?;
        }
        let end = clock.now_ns();

        let sample = TimingSample::new(start, end);
        tracing::debug!(
            iterations,
            fixture_bytes = input.len(),
            elapsed_ns = sample.elapsed_ns(),
            "measurement complete"
        );
        Ok(sample.elapsed_ns())
    }
}

/// Arena kind: parse through an injected [`ResetArena`], bulk-resetting
/// it after every parse inside the timed region.
pub fn measure_hooked_parse(harness: &Harness, iterations: u64) -> Result<u64, BenchError> {
    let parser = HookedParser::new();
    let mut arena = ResetArena::new();

    let elapsed = harness.measure(iterations, |input| {
        let tree = parser.parse(input, &mut arena)?;
        black_box(tree.node_count());
        arena.reset();
        Ok(())
    })?;

    let stats = arena.stats();
    tracing::debug!(
        blocks = stats.blocks_allocated(),
        bytes = stats.bytes_requested(),
        resets = stats.resets(),
        "arena statistics"
    );
    Ok(elapsed)
}

/// Reuse kind: clear the document's prior parse state before every
/// parse, inside the timed region, and reparse into retained storage.
pub fn measure_reuse_parse(harness: &Harness, iterations: u64) -> Result<u64, BenchError> {
    let mut doc = Document::new();

    harness.measure(iterations, |input| {
        doc.clear();
        doc.parse(input)?;
        black_box(doc.node_count());
        Ok(())
    })
}

/// Scan kind: the allocation-free primitive, no per-iteration
/// housekeeping at all.
pub fn measure_scan(harness: &Harness, iterations: u64) -> Result<u64, BenchError> {
    let scanner = ByteScanner::new();

    harness.measure(iterations, |input| {
        black_box(scanner.scan(input));
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[u8] =
        b"<html><body><ul><li class=\"x\">one</li><li>two</li></ul></body></html>";

    fn harness() -> Harness {
        Harness::new(Fixture::from_static(SAMPLE))
    }

    #[test]
    fn test_loop_runs_exactly_n_times() {
        let harness = harness();
        let mut count = 0u64;
        harness
            .measure(7, |input| {
                assert_eq!(input, SAMPLE);
                count += 1;
                Ok(())
            })
            .unwrap();
        assert_eq!(count, 7);
    }

    #[test]
    fn test_zero_iterations_runs_nothing() {
        let harness = harness();
        let mut count = 0u64;
        let elapsed = harness
            .measure(0, |_| {
                count += 1;
                Ok(())
            })
            .unwrap();
        assert_eq!(count, 0);
        // Two adjacent clock reads; anything near a second would mean
        // the loop ran.
        assert!(elapsed < 1_000_000_000);
    }

    #[test]
    fn test_failure_short_circuits_the_loop() {
        let harness = harness();
        let mut count = 0u64;
        let result = harness.measure(100, |_| {
            count += 1;
            if count == 3 {
                Err(BenchError::Parse("synthetic failure".into()))
            } else {
                Ok(())
            }
        });
        assert!(result.is_err());
        assert_eq!(count, 3);
    }

    #[test]
    fn test_hooked_parse_kind_completes() {
        let elapsed = measure_hooked_parse(&harness(), 10).unwrap();
        assert!(elapsed > 0);
    }

    #[test]
    fn test_reuse_parse_kind_completes() {
        let elapsed = measure_reuse_parse(&harness(), 10).unwrap();
        assert!(elapsed > 0);
    }

    #[test]
    fn test_scan_kind_completes() {
        measure_scan(&harness(), 10).unwrap();
    }
}
