//! Convolution driver: seeds a grid and window, runs the parallel and scalar paths,
//! prints both results with their timings, and checks that they agree.
//!
//! Run with: `cargo run --release --bin gridconv -- 16 16 3 3`

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use gridconv::cli::{setup_logging, ConvArgs};
use gridconv::conv::{conv2d_parallel_into, conv2d_scalar_into};
use gridconv::metrics::{compare_grids, context_header, print_report, timed, RunReport};
use gridconv::{initialize, Result};

/// Returns whether the parallel and scalar grids are bit-identical.
fn run(args: &ConvArgs) -> Result<bool> {
    let config = args.to_config()?;
    let mut ws = initialize(config.grid, config.window, config.seed)?;
    println!("Grid Sizes: {} {}", config.grid.rows, config.grid.cols);
    println!("Slider Sizes: {} {}", config.window.rows, config.window.cols);

    let ctx = config.context()?;
    let context = ctx.info();
    info!(backend = %ctx.backend(), "computing convolution on compute context");
    println!("{}", context_header(&context));

    let (outcome, parallel_time) =
        timed(|| conv2d_parallel_into(&ctx, &ws.grid, &ws.kernel, &mut ws.parallel_result));
    outcome?;
    println!("offload time: {:.6}s", parallel_time.as_secs_f64());
    if !args.no_print {
        println!("offload result:");
        print!("{}", ws.parallel_result);
    }

    let (outcome, scalar_time) =
        timed(|| conv2d_scalar_into(&ws.grid, &ws.kernel, &mut ws.scalar_result));
    outcome?;
    println!("CPU time: {:.6}s", scalar_time.as_secs_f64());
    if !args.no_print {
        println!("CPU result:");
        print!("{}", ws.scalar_result);
    }

    let comparison = compare_grids(&ws.parallel_result, &ws.scalar_result)?;
    print_report(&RunReport {
        context,
        grid: config.grid,
        window: config.window,
        parallel_time,
        scalar_time,
        comparison,
    });
    Ok(comparison.is_identical())
}

fn main() -> ExitCode {
    let args = ConvArgs::parse();
    setup_logging(args.verbose, args.quiet);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            error!("parallel and scalar results differ");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
