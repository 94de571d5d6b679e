use clap::Parser;

use gridconv::cli::{ConvArgs, RegressionArgs};
use gridconv::{Backend, ConvError, Shape, DEFAULT_SEED};

#[test]
fn parses_positional_sizes() {
    let args = ConvArgs::try_parse_from(["gridconv", "16", "8", "3", "2"]).unwrap();
    let config = args.to_config().unwrap();
    assert_eq!(config.grid, Shape::new(16, 8));
    assert_eq!(config.window, Shape::new(3, 2));
    assert_eq!(config.seed, DEFAULT_SEED);
    assert_eq!(config.backend, Backend::Rayon);
    assert_eq!(config.threads, None);
}

#[test]
fn parses_options() {
    let args = ConvArgs::try_parse_from([
        "gridconv", "4", "4", "2", "2", "--seed", "7", "--backend", "sequential", "--threads", "3",
        "--no-print",
    ])
    .unwrap();
    assert!(args.no_print);
    let config = args.to_config().unwrap();
    assert_eq!(config.seed, 7);
    assert_eq!(config.backend, Backend::Sequential);
    assert_eq!(config.threads, Some(3));
    assert_eq!(config.context().unwrap().backend(), Backend::Sequential);
}

#[test]
fn rejects_missing_or_bad_arguments() {
    assert!(ConvArgs::try_parse_from(["gridconv", "4", "4", "2"]).is_err());
    assert!(ConvArgs::try_parse_from(["gridconv", "4", "x", "2", "2"]).is_err());
    assert!(ConvArgs::try_parse_from(["gridconv", "4", "4", "-2", "2"]).is_err());
    assert!(ConvArgs::try_parse_from(["gridconv", "4", "4", "2", "2", "--backend", "gpu"]).is_err());
}

#[test]
fn zero_window_fails_validation() {
    let args = ConvArgs::try_parse_from(["gridconv", "4", "4", "0", "2"]).unwrap();
    assert!(matches!(
        args.to_config(),
        Err(ConvError::InvalidShape { what: "window", rows: 0, cols: 2 })
    ));
}

#[test]
fn regression_defaults_and_lists() {
    let args = RegressionArgs::try_parse_from(["regression"]).unwrap();
    assert_eq!(args.x.len(), 6);
    assert_eq!(args.x_prob[5], 0.5);
    assert_eq!(args.x_prob, args.y_prob);

    let args = RegressionArgs::try_parse_from([
        "regression", "--x", "1,-2,3", "--y", "4,5,6", "--x-prob", "0.2,0.3,0.5", "--y-prob", "1,0,0",
    ])
    .unwrap();
    assert_eq!(args.x, vec![1.0, -2.0, 3.0]);
    assert_eq!(args.y, vec![4.0, 5.0, 6.0]);
    assert_eq!(args.x_prob, vec![0.2, 0.3, 0.5]);
    assert_eq!(args.y_prob, vec![1.0, 0.0, 0.0]);
}
