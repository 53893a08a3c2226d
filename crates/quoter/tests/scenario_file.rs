//! Scenario files on disk

use std::path::PathBuf;

use tickguard_core::oracle::QuoteSource;
use tickguard_quoter::{example_config, QueryOutcome, QuoterConfig, QuoterError, Scenario};

fn hub_scenario() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../scenarios/hub.toml")
}

#[test]
fn test_hub_scenario_runs() {
    let config = QuoterConfig::load(hub_scenario()).unwrap();
    let scenario = Scenario::build(&config).unwrap();
    let reports = scenario.run_queries(&config.queries).unwrap();
    assert_eq!(reports.len(), 6);

    let amount = |label: &str| {
        reports
            .iter()
            .find(|report| report.label == label)
            .and_then(|report| report.outcome.amount_out())
    };
    assert_eq!(amount("sell TKA"), Some(1_001_000_450_120_021_002));
    assert_eq!(amount("buy TKA"), Some(995_012_727_929_250_903));
    assert!(amount("TKA to TKB").is_some());

    let outcome = |label: &str| {
        &reports
            .iter()
            .find(|report| report.label == label)
            .unwrap()
            .outcome
    };
    match outcome("TKC to TKA, 5 minute twap") {
        QueryOutcome::Quoted { route, breakdown, .. } => {
            assert_eq!(route, &vec!["TKC/WETH".to_string(), "TKA/WETH".to_string()]);
            assert_eq!(breakdown.unwrap().hops, 2);
        }
        other => panic!("unexpected outcome {:?}", other),
    }

    // TKA/WETH sat at tick 58 from 600 until the move to 10 at 990:
    // (290 * 58 + 10 * 10) / 300 floors to 56
    match outcome("buy TKA, 5 minute twap") {
        QueryOutcome::Quoted { breakdown, .. } => {
            let breakdown = breakdown.unwrap();
            assert_eq!(breakdown.spot_tick, 10);
            assert_eq!(breakdown.twap_tick, 56);
            assert_eq!(breakdown.selected, QuoteSource::Twap);
        }
        other => panic!("unexpected outcome {:?}", other),
    }

    assert!(matches!(
        outcome("too long a window"),
        QueryOutcome::Failed { .. }
    ));
}

#[test]
fn test_reports_serialize_to_json() {
    let config = QuoterConfig::load(hub_scenario()).unwrap();
    let scenario = Scenario::build(&config).unwrap();
    let reports = scenario.run_queries(&config.queries).unwrap();

    let json = serde_json::to_value(&reports).unwrap();
    assert_eq!(json[0]["outcome"]["status"], "quoted");
    assert_eq!(json[0]["outcome"]["breakdown"]["selected"], "Spot");
    assert_eq!(json[4]["outcome"]["status"], "failed");
}

#[test]
fn test_save_and_reload() {
    let path = std::env::temp_dir().join(format!("tickguard-quoter-{}.toml", std::process::id()));
    let config = example_config();
    config.save(&path).unwrap();

    let loaded = QuoterConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded.pools.len(), config.pools.len());
    assert_eq!(loaded.numeraire, config.numeraire);
}

#[test]
fn test_missing_file() {
    let result = QuoterConfig::load("/nonexistent/scenario.toml");
    assert!(matches!(result, Err(QuoterError::Io(_))));
}
