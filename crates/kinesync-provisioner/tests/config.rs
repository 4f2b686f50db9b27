use std::time::Duration;

use kinesync_provisioner::{ProvisionerError, SyncConfig};

#[test]
fn defaults_when_fields_missing() {
    let config = SyncConfig::from_json_str(r#"{"config_version": 1}"#).unwrap();

    assert_eq!(config, SyncConfig::default());
    assert_eq!(config.transition_backoff(), Duration::from_secs(5));
    assert_eq!(config.update_backoff(), Duration::from_secs(5));
}

#[test]
fn unversioned_config_reads_as_current() {
    let config =
        SyncConfig::from_json_str(r#"{"region": "eu-west-1", "update_backoff_secs": 30}"#).unwrap();

    assert_eq!(config.config_version, 1);
    assert_eq!(config.region.as_deref(), Some("eu-west-1"));
    assert_eq!(config.transition_backoff_secs, 5);
    assert_eq!(config.update_backoff_secs, 30);
}

#[test]
fn unknown_fields_are_ignored() {
    let config = SyncConfig::from_json_str(r#"{"config_version": 1, "backoff_secs": 30}"#).unwrap();
    assert_eq!(config, SyncConfig::default());
}

#[test]
fn rejects_newer_version() {
    let err = SyncConfig::from_json_str(r#"{"config_version": 99}"#).unwrap_err();
    assert!(matches!(err, ProvisionerError::Config(_)));
}

#[test]
fn rejects_non_object() {
    let err = SyncConfig::from_json_str("[]").unwrap_err();
    assert!(matches!(err, ProvisionerError::Config(_)));
}

#[test]
fn overrides_ignore_empty_values() {
    let config = SyncConfig {
        region: Some("us-east-1".into()),
        ..Default::default()
    }
    .apply_overrides(Some(String::new()), Some("staging".into()));

    assert_eq!(config.region.as_deref(), Some("us-east-1"));
    assert_eq!(config.profile.as_deref(), Some("staging"));
}

#[test]
fn load_reads_file() {
    let path = std::env::temp_dir().join(format!("kinesync-config-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"config_version": 1, "profile": "prod"}"#).unwrap();

    let config = SyncConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.profile.as_deref(), Some("prod"));
}

#[test]
fn load_reports_missing_file() {
    let err = SyncConfig::load(std::path::Path::new("/nonexistent/kinesync.json")).unwrap_err();
    assert!(err.to_string().contains("failed to read config"));
}
