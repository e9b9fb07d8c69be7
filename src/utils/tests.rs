use super::logging;
use super::AnalyzeError;
use std::path::PathBuf;

#[test]
fn logging_init_accepts_levels() {
    // Should not panic
    logging::init("info");
    logging::init("debug");
    logging::init("warn");
}

#[test]
fn unknown_level_falls_back_to_info() {
    assert_eq!(logging::parse_level("verbose"), tracing::Level::INFO);
    assert_eq!(logging::parse_level("WARNING"), tracing::Level::WARN);
    assert_eq!(logging::parse_level("trace"), tracing::Level::TRACE);
}

#[test]
fn invalid_config_lists_every_violation() {
    let err = AnalyzeError::InvalidConfig {
        path: PathBuf::from("exp.json"),
        violations: vec!["address is empty".into(), "query_every_ms must be > 0".into()],
    };
    let text = err.to_string();
    assert!(text.contains("exp.json"));
    assert!(text.contains("address is empty; query_every_ms must be > 0"));
}
