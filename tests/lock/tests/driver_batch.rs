//! End-to-end verification batches on disk.

use std::fs;

use lock_tests::batch_fixture::{
    reference_batch, write_batch, HH, IRREDUCIBLE, T_CX_CX_TDG, T_CX_TDG,
};
use xferdepth_harness::artifacts::step_artifact_path;
use xferdepth_harness::config::DriverConfig;
use xferdepth_harness::error::DriverError;
use xferdepth_harness::runner::run_verification;
use xferdepth_harness::shards::shard_path;

#[test]
fn reference_batch_verifies_and_writes_artifacts() {
    let fixture = reference_batch(12345);
    let report = run_verification(&fixture.config).unwrap();

    let labels: Vec<_> = report.verified.iter().map(|v| v.label).collect();
    assert_eq!(labels, vec![-1, 1, 2, 3]);

    let out = fixture.output_dir();
    for (label, qasm) in [(-1, IRREDUCIBLE), (1, HH), (2, T_CX_TDG), (3, T_CX_CX_TDG)] {
        let written = fs::read_to_string(step_artifact_path(&out, label)).unwrap();
        assert_eq!(written, qasm, "step{label}.qasm");
    }
}

#[test]
fn any_seed_reproduces_its_own_sample() {
    for seed in [0, 7, 12345, u64::MAX] {
        let fixture = reference_batch(seed);
        let first = run_verification(&fixture.config).unwrap();
        let second = run_verification(&fixture.config).unwrap();
        assert_eq!(first, second, "seed {seed}");
    }
}

#[test]
fn parallel_jobs_produce_same_report() {
    let fixture = reference_batch(99);
    let sequential = run_verification(&fixture.config).unwrap();
    let parallel = run_verification(&DriverConfig {
        jobs: 4,
        ..fixture.config.clone()
    })
    .unwrap();
    assert_eq!(sequential.verified, parallel.verified);
}

#[test]
fn wrong_labels_fail_batch_with_every_mismatch() {
    let fixture = write_batch(&[vec![2, 1]], 2, 10, &[(0, HH), (1, IRREDUCIBLE)], 3);
    let err = run_verification(&fixture.config).unwrap_err();

    let DriverError::VerificationFailed { mismatches } = err else {
        panic!("expected VerificationFailed, got {err:?}");
    };
    let summary: Vec<_> = mismatches.iter().map(|m| (m.label, m.computed)).collect();
    assert_eq!(summary, vec![(1, -1), (2, 1)]);
}

#[test]
fn verified_artifacts_survive_a_failed_batch() {
    let fixture = write_batch(&[vec![1, 2]], 2, 10, &[(0, HH), (1, IRREDUCIBLE)], 3);
    let err = run_verification(&fixture.config).unwrap_err();
    assert!(matches!(err, DriverError::VerificationFailed { ref mismatches } if mismatches.len() == 1));

    let out = fixture.output_dir();
    assert!(step_artifact_path(&out, 1).exists());
    assert!(!step_artifact_path(&out, 2).exists());
}

#[test]
fn fail_fast_reports_only_first_mismatch() {
    let fixture = write_batch(&[vec![2, 1]], 2, 10, &[(0, HH), (1, IRREDUCIBLE)], 3);
    let err = run_verification(&DriverConfig {
        fail_fast: true,
        ..fixture.config.clone()
    })
    .unwrap_err();
    assert!(
        matches!(err, DriverError::VerificationFailed { ref mismatches } if mismatches.len() == 1),
        "{err:?}"
    );
}

#[test]
fn missing_shard_is_input_error() {
    let fixture = reference_batch(1);
    let config = DriverConfig {
        shard_count: 3,
        ..fixture.config.clone()
    };
    match run_verification(&config).unwrap_err() {
        DriverError::InputData { source_path, .. } => {
            assert_eq!(source_path, shard_path(&config.shard_dir, 2));
        }
        other => panic!("expected InputData, got {other:?}"),
    }
    assert!(!fixture.output_dir().exists(), "no artifacts before inputs load");
}

#[test]
fn undersized_corpus_is_input_error() {
    let fixture = write_batch(&[vec![1, 2, 3]], 3, 3, &[(0, HH)], 5);
    let config = DriverConfig {
        sample_size: 4,
        ..fixture.config.clone()
    };
    assert!(matches!(
        run_verification(&config),
        Err(DriverError::InputData { .. })
    ));
}

#[test]
fn label_on_unparsable_entry_is_input_error() {
    let fixture = write_batch(&[vec![1]], 1, 5, &[], 0);
    let err = run_verification(&fixture.config).unwrap_err();
    match err {
        DriverError::InputData { source_path, .. } => {
            assert_eq!(source_path, fixture.config.corpus_path);
        }
        other => panic!("expected InputData, got {other:?}"),
    }
}

#[test]
fn config_file_drives_batch() {
    let fixture = reference_batch(42);
    let config_path = fixture.dir.path().join("config.json");
    fs::write(
        &config_path,
        serde_json::to_string(&fixture.config).unwrap(),
    )
    .unwrap();

    let loaded = DriverConfig::load(&config_path).unwrap();
    assert_eq!(loaded, fixture.config);
    assert_eq!(run_verification(&loaded).unwrap().verified.len(), 4);
}
