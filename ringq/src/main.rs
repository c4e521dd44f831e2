use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use log::info;

use crate::{runner::Runner, scenario::Scenario};

mod occupancy;
mod runner;
mod scenario;

/// Replays queue operations from a YAML scenario.
#[derive(Debug, Parser)]
struct Opt {
    /// Scenario file to replay.
    scenario: PathBuf,
    /// Abort on the first failed step.
    #[clap(short, long)]
    strict: bool,
    /// Log every step and occupancy transition (when RUST_LOG is unset).
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> Result<(), anyhow::Error> {
    let opt = Opt::parse();

    let default_filter = if opt.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let scenario = Scenario::load(&opt.scenario)?;
    info!(
        "loaded {}: {} queue(s), {} step(s)",
        opt.scenario.display(),
        scenario.queues.len(),
        scenario.steps.len()
    );

    let mut runner = Runner::new(&scenario, opt.strict)?;
    let report = runner.run(&scenario.steps)?;
    print!("{}", report);

    if report.failures > 0 {
        bail!("{} of {} step(s) failed", report.failures, report.steps);
    }

    Ok(())
}
