//! Weighted statistics driver: mean, variance and covariance of two weighted samples,
//! plus the least-squares line of y on x.
//!
//! Run with: `cargo run --bin regression` (defaults to the built-in six-sample data set)

use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use gridconv::cli::{setup_logging, RegressionArgs};
use gridconv::stats::{summarize, StatsResult};
use gridconv::ComputeContext;

fn print_values(label: &str, values: &[f64]) {
    println!("{} value is:", label);
    let line: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    println!("{}", line.join("  "));
}

fn run(args: &RegressionArgs) -> StatsResult<()> {
    let ctx = ComputeContext::new(args.backend, args.threads)?;
    println!("Device: {}", ctx.info().name);
    info!(samples = args.x.len(), backend = %ctx.backend(), "computing weighted statistics");

    let summary = summarize(&ctx, &args.x, &args.y, &args.x_prob, &args.y_prob)?;

    print_values("x", &args.x);
    print_values("y", &args.y);
    print_values("x probability", &args.x_prob);
    print_values("y probability", &args.y_prob);
    println!("{}", summary);
    Ok(())
}

fn main() -> ExitCode {
    let args = RegressionArgs::parse();
    setup_logging(args.verbose, args.quiet);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
