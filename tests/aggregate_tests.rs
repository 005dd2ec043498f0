//! End-to-end checks of discovery, loading and summarizing against a
//! fixture output directory.

use std::path::Path;

use strat_outputs::{
    format_quartiles_line, load_value_series, summarize, AggregatorConfig, OutputError,
    StrategyReport,
};
use tempfile::tempdir;

fn write_run(dir: &Path, name: &str, values: &[f64]) {
    let mut body = String::from("Date;Value;P&L\n");
    for (i, v) in values.iter().enumerate() {
        body.push_str(&format!("2030-03-{:02};{};0\n", i + 1, v));
    }
    std::fs::write(dir.join(name), body).unwrap();
}

#[test]
fn no_matching_runs_reports_empty_result() {
    let dir = tempdir().unwrap();
    write_run(dir.path(), "MonteCarloSimu_OtherStrat_001.csv", &[1.0, 2.0]);
    write_run(dir.path(), "DCA_SPGold_acc_2015_2024.csv", &[1.0, 2.0]);

    let err = summarize(&AggregatorConfig::with_output_dir(dir.path()), "DCA").unwrap_err();
    assert!(matches!(err, OutputError::EmptyResult { .. }));
    assert!(err.to_string().starts_with("No data"));
}

#[test]
fn missing_output_directory_is_fatal() {
    let dir = tempdir().unwrap();
    let config = AggregatorConfig::with_output_dir(dir.path().join("strat_outputs"));
    assert!(matches!(
        summarize(&config, "DCA").unwrap_err(),
        OutputError::DirectoryNotFound { .. }
    ));
}

#[test]
fn substring_filter_selects_strategy_runs() {
    let dir = tempdir().unwrap();
    write_run(dir.path(), "MonteCarloSimu_DCA_SPGold_001.csv", &[100.0, 110.0]);
    write_run(dir.path(), "MonteCarloSimu_OtherStrat_001.csv", &[100.0, 999.0]);

    let config = AggregatorConfig::with_output_dir(dir.path());

    let long = summarize(&config, "DCA_SPGold").unwrap();
    let short = summarize(&config, "DCA").unwrap();
    assert_eq!(long.terminal_values, vec![110.0]);
    assert_eq!(short.terminal_values, vec![110.0]);
    assert_eq!(short.quartiles.q25, 110.0);
    assert_eq!(short.quartiles.q75, 110.0);
}

#[test]
fn quartiles_interpolate_between_ranks() {
    let dir = tempdir().unwrap();
    for (i, end) in [30.0, 10.0, 40.0, 20.0].iter().enumerate() {
        write_run(
            dir.path(),
            &format!("MonteCarloSimu_DCA_SPGold_{:03}.csv", i + 1),
            &[1.0, 2.0, *end],
        );
    }

    let summary = summarize(&AggregatorConfig::with_output_dir(dir.path()), "DCA_SPGold").unwrap();
    assert_eq!(summary.run_count(), 4);
    assert_eq!(summary.series().count(), 4);
    assert!((summary.quartiles.q25 - 17.5).abs() < 1e-9);
    assert!((summary.quartiles.q50 - 25.0).abs() < 1e-9);
    assert!((summary.quartiles.q75 - 32.5).abs() < 1e-9);
    assert_eq!(
        format_quartiles_line(&summary.quartiles),
        "Modes on end values: 25% : 17.5 - 50% : 25 - 75% : 32.5"
    );

    let report = StrategyReport::from_summary(&summary);
    assert_eq!(report.histogram.iter().map(|b| b.count).sum::<usize>(), 4);
}

#[test]
fn single_file_loader_keeps_row_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("DCA_SPGold_acc_2015_2024.csv");
    std::fs::write(&path, "Value\n100\n105\n98\n110\n").unwrap();

    let series = load_value_series(&path).unwrap();
    assert_eq!(series.values(), &[100.0, 105.0, 98.0, 110.0]);
}

#[test]
fn malformed_run_does_not_block_the_others() {
    let dir = tempdir().unwrap();
    write_run(dir.path(), "MonteCarloSimu_DCA_001.csv", &[1.0, 10.0]);
    write_run(dir.path(), "MonteCarloSimu_DCA_003.csv", &[1.0, 30.0]);
    std::fs::write(
        dir.path().join("MonteCarloSimu_DCA_002.csv"),
        "Date;Balance\n2030-03-01;5\n",
    )
    .unwrap();

    let summary = summarize(&AggregatorConfig::with_output_dir(dir.path()), "DCA").unwrap();
    assert_eq!(summary.terminal_values, vec![10.0, 30.0]);
    assert_eq!(summary.skipped.len(), 1);
    assert!(summary.skipped[0].reason.contains("Value"));
    assert!((summary.quartiles.q50 - 20.0).abs() < 1e-9);
}
