//! Runner for the scan kind: the allocation-free byte-scan baseline.

use clap::Parser;

use parsemark_cli::{finish, init_logging, run, RunnerArgs};
use parsemark_harness::measure_scan;

fn main() {
    init_logging();
    let args = RunnerArgs::parse();
    finish(run(&args, measure_scan));
}
