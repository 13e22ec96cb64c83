//! Installs the global tracing subscriber, so it runs in its own test binary.

use class_resampler::logging::setup_logging;

#[test]
fn test_setup_logging_creates_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let log_dir = dir.path().join("logs");

    let log_path = setup_logging(&log_dir).unwrap();
    assert!(log_path.exists());
    assert!(log_path.starts_with(&log_dir));

    assert!(setup_logging(&log_dir).is_err());
}
