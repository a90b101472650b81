use std::io::Write;
use strata_model::{ModelConfig, ModelError};
use strata_types::UuidFormat;

#[test]
fn defaults() {
    let config = ModelConfig::default();
    assert_eq!(config.key_format, UuidFormat::V4);
    assert_eq!(config.version_format, UuidFormat::V7);
}

#[test]
fn parse_full_document() {
    let config = ModelConfig::parse("key_format = \"v7\"\nversion_format = \"v4\"\n").unwrap();
    assert_eq!(config.key_format, UuidFormat::V7);
    assert_eq!(config.version_format, UuidFormat::V4);
}

#[test]
fn parse_fills_missing_keys_with_defaults() {
    let config = ModelConfig::parse("key_format = \"v7\"").unwrap();
    assert_eq!(config.key_format, UuidFormat::V7);
    assert_eq!(config.version_format, UuidFormat::V7);
    assert_eq!(ModelConfig::parse("").unwrap(), ModelConfig::default());
}

#[test]
fn parse_rejects_unknown_format() {
    let err = ModelConfig::parse("key_format = \"v1\"").unwrap_err();
    assert!(matches!(err, ModelError::Config(_)));
    assert!(err.to_string().contains("invalid configuration"));
}

#[test]
fn load_from_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "key_format = \"v7\"").unwrap();
    let config = ModelConfig::load_from(file.path());
    assert_eq!(config.key_format, UuidFormat::V7);
}

#[test]
fn load_from_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = ModelConfig::load_from(&dir.path().join("strata.toml"));
    assert_eq!(config, ModelConfig::default());
}

#[test]
fn load_from_malformed_file_uses_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "key_format = [").unwrap();
    assert_eq!(ModelConfig::load_from(file.path()), ModelConfig::default());
}

#[test]
fn read_surfaces_io_errors() {
    let dir = tempfile::tempdir().unwrap();
    let err = ModelConfig::read(&dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, ModelError::Io(_)));
}
