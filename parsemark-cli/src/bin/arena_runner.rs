//! Runner for the arena kind: parse with an injected bulk-reset arena,
//! resetting it after every repetition inside the timed region.

use clap::Parser;

use parsemark_cli::{finish, init_logging, run, RunnerArgs};
use parsemark_harness::measure_hooked_parse;

fn main() {
    init_logging();
    let args = RunnerArgs::parse();
    finish(run(&args, measure_hooked_parse));
}
