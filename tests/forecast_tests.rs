use assert_fs::prelude::*;
use predicates::prelude::*;

fn no_delay_config(temp: &assert_fs::TempDir) -> assert_fs::fixture::ChildPath {
    let config = temp.child("config.yaml");
    config
        .write_str("forecasting:\n  simulated_delay_ms: 0\n  horizon_days: 30\n")
        .unwrap();
    config
}

#[test]
fn forecast_writes_report_csv_and_chart() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config = no_delay_config(&temp);
    let csv = temp.child("forecast.csv");
    let png = temp.child("forecast.png");

    let mut cmd = assert_cmd::cargo_bin_cmd!("supplyflow");
    cmd.args(["forecast", "-m", "ensemble", "--seed", "7", "-o"])
        .arg(csv.path())
        .arg("--plot")
        .arg(png.path())
        .arg("--config")
        .arg(config.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Forecast Report"))
        .stdout(predicate::str::contains("Model: ensemble"))
        .stdout(predicate::str::contains("Historical points: 365"))
        .stdout(predicate::str::contains("Forecast points: 30"))
        .stdout(predicate::str::contains("Accuracy (back-test):"));

    csv.assert(predicate::str::starts_with(
        "date,actual,predicted,upperBound,lowerBound,confidence\n",
    ));
    let contents = std::fs::read_to_string(csv.path()).unwrap();
    assert_eq!(contents.lines().count(), 1 + 365 + 30);
    png.assert(predicate::path::exists());
}

#[test]
fn forecast_rejects_invalid_horizon() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config = no_delay_config(&temp);

    let mut cmd = assert_cmd::cargo_bin_cmd!("supplyflow");
    cmd.args(["forecast", "--horizon", "0", "--config"])
        .arg(config.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("horizon must be at least one day"));
}

#[test]
fn forecast_rejects_oversized_horizon_and_history() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config = no_delay_config(&temp);

    let mut cmd = assert_cmd::cargo_bin_cmd!("supplyflow");
    cmd.args(["forecast", "--horizon", "100000", "--config"])
        .arg(config.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("horizon must be at most 1825 days"));

    let oversized = temp.child("oversized.yaml");
    oversized
        .write_str("forecasting:\n  simulated_delay_ms: 0\n  history_days: 200000000\n")
        .unwrap();
    let mut cmd = assert_cmd::cargo_bin_cmd!("supplyflow");
    cmd.args(["forecast", "--config"]).arg(oversized.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("forecasting.history_days"));
}

#[test]
fn scenarios_include_presets_and_custom_entries() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config = no_delay_config(&temp);

    let mut cmd = assert_cmd::cargo_bin_cmd!("supplyflow");
    cmd.args(["scenarios", "--seed", "3", "--custom", "1.5,1.0,1.1", "--config"])
        .arg(config.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Optimistic Growth | +20.0%"))
        .stdout(predicate::str::contains("Economic Downturn | -20.0%"))
        .stdout(predicate::str::contains("Supply Disruption | +10.0%"))
        .stdout(predicate::str::contains("Custom Scenario | +50.0%"));
}
