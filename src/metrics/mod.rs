mod benchmark;

pub use benchmark::{compare_grids, context_header, print_report, timed, Comparison, RunReport, Stopwatch};
