//! Runner for the reuse kind: clear the document's prior parse state
//! before every repetition's parse, inside the timed region.

use clap::Parser;

use parsemark_cli::{finish, init_logging, run, RunnerArgs};
use parsemark_harness::measure_reuse_parse;

fn main() {
    init_logging();
    let args = RunnerArgs::parse();
    finish(run(&args, measure_reuse_parse));
}
