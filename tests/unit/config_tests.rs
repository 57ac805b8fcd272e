//! Unit tests for TOML configuration parsing and validation.

use std::io::Write;

use deskdriver::{AutomationConfig, ServiceError};

#[test]
fn defaults_are_headless_with_alerts_suppressed() {
    let config = AutomationConfig::default();
    assert!(!config.visible);
    assert!(config.suppress_alerts);
    assert!(config.prog_ids.is_empty());
}

#[test]
fn empty_toml_is_a_valid_config() {
    let config = AutomationConfig::from_toml_str("").expect("empty config parses");
    assert_eq!(config, AutomationConfig::default());
}

#[test]
fn parses_full_config() {
    let config = AutomationConfig::from_toml_str(
        r#"
visible = true
suppress_alerts = false

[prog_ids]
word = "Word.Application.16"
"#,
    )
    .expect("config parses");

    assert!(config.visible);
    assert!(!config.suppress_alerts);
    assert_eq!(
        config.prog_id_for("word", "Word.Application"),
        "Word.Application.16"
    );
}

#[test]
fn prog_id_falls_back_to_default() {
    let config = AutomationConfig::default();
    assert_eq!(
        config.prog_id_for("excel", "Excel.Application"),
        "Excel.Application"
    );
}

#[test]
fn empty_prog_id_override_is_rejected() {
    let err = AutomationConfig::from_toml_str(
        r#"
[prog_ids]
mail = "  "
"#,
    )
    .expect_err("blank prog id rejected");
    assert!(matches!(err, ServiceError::InvalidInput(_)));
    assert!(err.to_string().contains("prog_ids.mail"));
}

#[test]
fn invalid_toml_is_invalid_input() {
    let err = AutomationConfig::from_toml_str("visible = ").expect_err("parse fails");
    assert!(matches!(err, ServiceError::InvalidInput(_)));
}

#[test]
fn loads_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "visible = true").expect("write config");

    let config = AutomationConfig::load_from_path(file.path()).expect("config loads");
    assert!(config.visible);
}

#[test]
fn missing_config_file_is_invalid_input() {
    let err = AutomationConfig::load_from_path("/nonexistent/deskdriver.toml")
        .expect_err("missing file fails");
    assert!(matches!(err, ServiceError::InvalidInput(_)));
}
