//! Integration tests for the scoring config
//!
//! Tests the config submodules working together with the scoring pipeline:
//! - loader: `.toml` / `.json` file I/O
//! - validator: rejection of unusable tables
//! - ScoringConfig: defaults, partial overrides and their effect on scores

use hwbench::config::loader::{load_config_from_file, save_config_to_file};
use hwbench::config::{validator, Baseline, MetricSource, ScoringConfig};
use hwbench::error::ConfigError;
use hwbench::performance::aggregate_domain;
use hwbench::{Domain, Normalizer, Outcome, RawResults, Recommender, RunMetrics, SystemRecord};
use std::fs;
use tempfile::TempDir;

fn cpu_only(events_per_second: f64) -> RawResults {
    RawResults {
        cpu: Some(aggregate_domain(
            Domain::Cpu,
            &[Outcome::Success(
                RunMetrics::new().with("events_per_second", events_per_second),
            )],
        )),
        ..Default::default()
    }
}

// ============================================================================
// Configuration Loading
// ============================================================================

#[test]
fn test_custom_baseline_changes_scores() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("scoring.toml");
    fs::write(
        &path,
        r#"
        [baselines]
        version = "2024-lab"

        [baselines.cpu.events_per_second]
        min = 0
        max = 20000
        "#,
    )
    .unwrap();

    let config = ScoringConfig::load(&path).expect("valid config");
    assert_eq!(config.baselines.version, "2024-lab");
    // Tables not mentioned in the file fall back to the built-ins.
    assert!(config.baselines.primary(MetricSource::Memory).is_some());

    let normalized = Normalizer::from_config(&config).normalize(&cpu_only(5000.0));
    assert_eq!(normalized.domain_score(Domain::Cpu), Some(25.0));
}

#[test]
fn test_lower_is_better_baseline_from_json() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("scoring.json");

    let mut config = ScoringConfig::default();
    config.baselines.set(
        MetricSource::Cpu,
        "events_per_second",
        Baseline::lower_is_better(100.0, 10_000.0),
    );
    save_config_to_file(&config, &path).unwrap();

    let loaded = ScoringConfig::load(&path).unwrap();
    let normalized = Normalizer::from_config(&loaded).normalize(&cpu_only(100.0));
    assert_eq!(normalized.domain_score(Domain::Cpu), Some(100.0));
}

#[test]
fn test_legacy_baseline_keys_accepted() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("legacy.json");
    fs::write(
        &path,
        r#"{"baselines": {"network": {"bandwidth_mbps": {"min_value": 100, "max_value": 1000, "higher_better": true}}}}"#,
    )
    .unwrap();

    let config = load_config_from_file(&path).unwrap();
    let baseline = config.baselines.primary(MetricSource::Network).unwrap();
    assert_eq!(baseline.min_value, 100.0);
    assert_eq!(baseline.max_value, 1000.0);
    assert!(baseline.higher_is_better);
}

#[test]
fn test_load_or_default_without_path() {
    let config = ScoringConfig::load_or_default(None);
    assert!(config.is_ok());
}

// ============================================================================
// Configuration Validation
// ============================================================================

#[test]
fn test_invalid_baseline_rejected_on_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("scoring.toml");
    fs::write(
        &path,
        r#"
        [baselines.memory.transfer_rate_mib_sec]
        min = 5000
        max = 1000
        "#,
    )
    .unwrap();

    match ScoringConfig::load(&path) {
        Err(ConfigError::ValidationFailed(msg)) => {
            assert!(msg.contains("memory.transfer_rate_mib_sec"), "{}", msg)
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
}

#[test]
fn test_unsupported_extension_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("scoring.yaml");
    fs::write(&path, "baselines: {}").unwrap();
    assert!(matches!(
        ScoringConfig::load(&path),
        Err(ConfigError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_default_config_passes_validation() {
    assert!(validator::validate_scoring_config(&ScoringConfig::default()).is_ok());
}

// ============================================================================
// Custom Profiles
// ============================================================================

#[test]
fn test_custom_profile_drives_recommender() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("scoring.toml");
    fs::write(
        &path,
        r#"
        [[profiles]]
        name = "cpu_farm"
        weights = { cpu = 1.0, memory = 0.0, disk = 0.0, network = 0.0 }
        min_scores = { cpu = 50, memory = 0, disk = 0, network = 0 }
        "#,
    )
    .unwrap();

    let config = ScoringConfig::load(&path).unwrap();
    assert_eq!(config.profile_names(), vec!["cpu_farm"]);

    let normalizer = Normalizer::from_config(&config);
    let mut recommender = Recommender::with_profiles(config.profiles.clone());
    recommender.add_system(SystemRecord::new("fast", normalizer.normalize(&cpu_only(10_000.0)), None));
    recommender.add_system(SystemRecord::new("slow", normalizer.normalize(&cpu_only(1_090.0)), None));

    let recs = recommender.recommend_for_workload("cpu_farm");
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].system_name, "fast");
    assert_eq!(recs[0].workload_score, 100.0);
    assert!(recs[0].meets_requirements);
    assert_eq!(recs[1].workload_score, 10.0);
    assert!(!recs[1].meets_requirements);

    // Built-in profiles are replaced, not merged.
    assert!(recommender.recommend_for_workload("database").is_empty());
}

#[test]
fn test_duplicate_profile_names_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("scoring.toml");
    fs::write(
        &path,
        r#"
        [[profiles]]
        name = "batch"
        weights = { cpu = 0.5, memory = 0.5, disk = 0.0, network = 0.0 }
        min_scores = { cpu = 0, memory = 0, disk = 0, network = 0 }

        [[profiles]]
        name = "Batch"
        weights = { cpu = 0.5, memory = 0.5, disk = 0.0, network = 0.0 }
        min_scores = { cpu = 0, memory = 0, disk = 0, network = 0 }
        "#,
    )
    .unwrap();
    assert!(matches!(
        ScoringConfig::load(&path),
        Err(ConfigError::ValidationFailed(_))
    ));
}
