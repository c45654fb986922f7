mod common;

use std::path::Path;

use common::{fixture_path, temp_config};
use schedcfg::config::{
    ConfigLoader, ConfigurationSet, CrossFieldMode, FieldKey, LoadPhase, LoaderOptions,
    SchedulerKind, load_file,
};
use schedcfg::error::{ConfigError, ConfigErrorKind};

fn sequential() -> ConfigLoader {
    ConfigLoader::new(LoaderOptions {
        cross_field: CrossFieldMode::Sequential,
        ..LoaderOptions::default()
    })
}

// ============================================================================
// Successful loads
// ============================================================================

/// Every key present: each accessor returns exactly the parsed value.
#[test]
fn full_file_sets_every_field() {
    let result = load_file(fixture_path("full.txt")).expect("full.txt should load");
    let config = result.config;

    assert_eq!(config.cpu_count(), 16);
    assert_eq!(config.scheduler(), SchedulerKind::RoundRobin);
    assert_eq!(config.quantum_cycles(), 4);
    assert_eq!(config.batch_process_freq(), 2);
    assert_eq!(config.min_instructions(), 100);
    assert_eq!(config.max_instructions(), 400);
    assert_eq!(config.delay_per_exec(), 3);
    assert_eq!(config.max_overall_mem(), 16384);
    assert_eq!(config.mem_per_frame(), 16);
    assert_eq!(config.min_mem_per_proc(), 64);
    assert_eq!(config.max_mem_per_proc(), 4096);
    assert_eq!(config.frame_count(), 1024);
    assert!(result.warnings.is_empty());
}

/// Only scheduler and num-cpu given: everything else keeps its default.
#[test]
fn fcfs_scenario_keeps_other_defaults() {
    let config = load_file(fixture_path("fcfs_only.txt")).unwrap().config;

    assert_eq!(config.scheduler().as_str(), "first-come-first-served");
    assert_eq!(config.cpu_count(), 8);

    let defaults = ConfigurationSet::default();
    assert_eq!(config.quantum_cycles(), defaults.quantum_cycles());
    assert_eq!(config.batch_process_freq(), 1);
    assert_eq!(config.min_instructions(), 1000);
    assert_eq!(config.max_instructions(), 2000);
    assert_eq!(config.delay_per_exec(), 0);
    assert_eq!(config.max_overall_mem(), 512);
    assert_eq!(config.mem_per_frame(), 256);
    assert_eq!(config.min_mem_per_proc(), 512);
    assert_eq!(config.max_mem_per_proc(), 512);
}

/// Two independent loads of the same file produce identical sets.
#[test]
fn loading_twice_is_idempotent() {
    let path = fixture_path("full.txt");
    let first = ConfigLoader::with_defaults().load(&path).unwrap();
    let second = ConfigLoader::with_defaults().load(&path).unwrap();
    assert_eq!(first.config, second.config);
    assert!(!std::sync::Arc::ptr_eq(&first.config, &second.config));
}

/// Comments, blank lines, tabs, and single-quoted scheduler names.
#[test]
fn tolerant_formatting() {
    let file = temp_config("\n  # leading comment\n\t\nscheduler\t'fcfs'\r\n   num-cpu   128\n");
    let config = load_file(file.path()).unwrap().config;
    assert_eq!(config.scheduler(), SchedulerKind::FirstComeFirstServed);
    assert_eq!(config.cpu_count(), 128);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn num_cpu_zero_names_the_key() {
    let err = load_file(fixture_path("zero_cpu.txt")).unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::RangeViolation);
    assert_eq!(err.key(), Some("num-cpu"));
    let msg = err.to_string();
    assert!(msg.contains("zero_cpu.txt"), "message should name the file: {msg}");
    assert!(msg.contains("line 2"), "message should name the line: {msg}");
}

#[test]
fn unknown_key_reports_name_and_suggestion() {
    let err = load_file(fixture_path("unknown_key.txt")).unwrap_err();
    match &err {
        ConfigError::UnknownKey {
            key,
            line,
            suggestion,
            path,
        } => {
            assert_eq!(key, "num-cpus");
            assert_eq!(*line, 2);
            assert_eq!(suggestion.as_deref(), Some("num-cpu"));
            assert!(path.ends_with("unknown_key.txt"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn missing_file_is_source_unavailable() {
    let mut loader = ConfigLoader::with_defaults();
    let err = loader
        .load(Path::new("/definitely/not/here/config.txt"))
        .unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::SourceUnavailable);
    assert!(err.to_string().contains("failed to open"));
    assert_eq!(loader.phase(), LoadPhase::Failed);
}

#[test]
fn directory_is_source_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_file(dir.path()).unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::SourceUnavailable);
}

#[test]
fn invalid_utf8_is_reported_as_encoding_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("binary.txt");
    std::fs::write(&path, b"num-cpu \xff\xfe\n").unwrap();
    let err = load_file(&path).unwrap_err();
    assert!(
        matches!(err, ConfigError::InvalidEncoding { offset: 8, .. }),
        "{err:?}"
    );
    assert_eq!(err.kind(), ConfigErrorKind::SourceUnavailable);
    let msg = err.to_string();
    assert!(!msg.contains("failed to open"), "{msg}");
    assert!(msg.contains("not valid UTF-8"), "{msg}");
}

#[test]
fn memory_boundaries() {
    let cases = [
        ("max-overall-mem 1\n", Some(ConfigErrorKind::RangeViolation)),
        ("max-overall-mem 2\nmem-per-frame 2\n", None),
        ("max-overall-mem 3\n", Some(ConfigErrorKind::FormatViolation)),
        ("max-overall-mem 4294967296\n", None),
        ("max-overall-mem 8589934592\n", Some(ConfigErrorKind::RangeViolation)),
        ("min-mem-per-proc 100\n", Some(ConfigErrorKind::FormatViolation)),
    ];
    for (text, expected) in cases {
        let file = temp_config(text);
        let outcome = load_file(file.path()).err().map(|e| e.kind());
        assert_eq!(outcome, expected, "unexpected outcome for {text:?}");
    }
}

/// `max-overall-mem 2` alone is valid for its own line, but the default
/// frame size of 256 no longer fits once the whole file is considered.
#[test]
fn max_overall_mem_two_without_frame_size() {
    let file = temp_config("max-overall-mem 2\n");

    let result = sequential().load(file.path()).expect("sequential mode accepts");
    assert_eq!(result.config.max_overall_mem(), 2);

    let err = load_file(file.path()).unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::CrossFieldViolation);
    assert!(
        err.to_string().contains("mem-per-frame not set, using the default"),
        "{err}"
    );
}

#[test]
fn overflowing_integer_is_range_violation() {
    for text in ["num-cpu 99999999999999999999\n", "max-overall-mem 99999999999999999999\n"] {
        let file = temp_config(text);
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(err.kind(), ConfigErrorKind::RangeViolation, "{text:?}");
    }
}

#[test]
fn scheduler_rejects_unknown_policy() {
    let file = temp_config("scheduler \"priority\"\n");
    let err = load_file(file.path()).unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::FormatViolation);
    assert!(err.to_string().contains("'fcfs'"));
}

// ============================================================================
// Cross-field ordering
// ============================================================================

/// `mem-per-frame 1024` after `max-overall-mem 512` fails in both modes.
#[test]
fn frame_larger_than_memory_fails() {
    let file = temp_config("max-overall-mem 512\nmem-per-frame 1024\n");
    let deferred = load_file(file.path()).unwrap_err();
    let inline = sequential().load(file.path()).unwrap_err();
    assert_eq!(deferred.kind(), ConfigErrorKind::CrossFieldViolation);
    assert_eq!(inline.kind(), ConfigErrorKind::CrossFieldViolation);
    assert!(deferred.to_string().contains("max-overall-mem"));
}

/// The frame size is declared before the memory size it must fit in.
/// Deferred checking sees the final memory size and accepts; sequential
/// checking compares against the default (512) at the frame line and
/// rejects.
#[test]
fn key_order_only_matters_in_sequential_mode() {
    let path = fixture_path("frame_before_overall.txt");

    let deferred = load_file(&path).expect("deferred mode ignores key order");
    assert_eq!(deferred.config.mem_per_frame(), 1024);
    assert_eq!(deferred.config.max_overall_mem(), 2048);

    let err = sequential().load(&path).unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::CrossFieldViolation);
    assert_eq!(err.key(), Some(FieldKey::MemPerFrame.as_str()));

    // Declaring the bound first makes both modes agree.
    let reordered = temp_config("max-overall-mem 2048\nmem-per-frame 1024\n");
    assert!(load_file(reordered.path()).is_ok());
    assert!(sequential().load(reordered.path()).is_ok());
}

#[test]
fn per_process_memory_ordering() {
    let file = temp_config("max-mem-per-proc 256\nmin-mem-per-proc 128\n");
    assert!(load_file(file.path()).is_ok());
    // Sequential: 256 is compared with the default minimum of 512.
    assert_eq!(
        sequential().load(file.path()).unwrap_err().kind(),
        ConfigErrorKind::CrossFieldViolation
    );
}

#[test]
fn instruction_bounds_ordering() {
    let file = temp_config("min-ins 3000\nmax-ins 2500\n");
    let err = load_file(file.path()).unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::CrossFieldViolation);

    let lenient = sequential().load(file.path()).unwrap();
    assert_eq!(lenient.config.min_instructions(), 3000);
    assert_eq!(lenient.warnings.len(), 1);
}

#[test]
fn duplicate_key_last_value_wins() {
    let result = load_file(fixture_path("duplicate_key.txt")).unwrap();
    assert_eq!(result.config.cpu_count(), 4);
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].line, Some(2));
}
