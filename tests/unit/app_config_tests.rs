/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;
use tavernkit::app_config::{Config, LogLevel, TranslationProvider};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.launcher.server_command, "python server.py");
    assert_eq!(config.launcher.server_log, PathBuf::from("./extras-server.log"));
    assert_eq!(config.launcher.poll_interval_ms, 100);
    assert_eq!(config.launcher.ready_marker, "Running on ");
    assert_eq!(config.launcher.tunnel.command, "lt");
    assert_eq!(config.launcher.tunnel.port, 5100);
    assert_eq!(config.launcher.tunnel.url_marker, "your url is: ");
    assert_eq!(config.launcher.tunnel.startup_delay(), Duration::from_secs(5));

    assert_eq!(config.i18n.root_dir, PathBuf::from("public"));
    assert_eq!(config.i18n.marker_attribute, "data-i18n");
    assert!(config.i18n.split_markers);
    assert_eq!(config.i18n.sync_dictionaries, vec![PathBuf::from("public/locales/zh-cn.json")]);
    assert_eq!(config.i18n.reset_dictionaries, vec![PathBuf::from("public/locales/en.json")]);

    assert_eq!(config.translation.provider, TranslationProvider::Google);
    assert_eq!(config.translation.available_providers.len(), 3);
    assert_eq!(config.translation.get_timeout(), Duration::from_secs(30));
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    // Invalid source language
    config.i18n.source_language = "xyz".to_string();
    assert!(config.validate().is_err());
    config.i18n.source_language = "en".to_string();

    // Invalid target language
    config.translation.target_language = Some("zz".to_string());
    assert!(config.validate().is_err());
    config.translation.target_language = Some("zh-CN".to_string());
    assert!(config.validate().is_ok());

    // Port zero
    config.launcher.tunnel.port = 0;
    assert!(config.validate().is_err());
    config.launcher.tunnel.port = 5100;

    // Empty marker attribute
    config.i18n.marker_attribute = "  ".to_string();
    assert!(config.validate().is_err());
    config.i18n.marker_attribute = "data-i18n".to_string();

    // Server log polling must not spin
    config.launcher.poll_interval_ms = 0;
    assert!(config.validate().is_err());
}

/// Test that LibreTranslate requires an endpoint
#[test]
fn test_config_validation_withLibreProvider_shouldRequireEndpoint() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Libre;
    assert!(config.validate().is_err());

    config.translation.set_endpoint("http://localhost:5000");
    assert!(config.validate().is_ok());
    assert_eq!(config.translation.get_endpoint(), "http://localhost:5000");
}

/// Test that set_endpoint adds a provider entry when none exists
#[test]
fn test_set_endpoint_withoutProviderEntry_shouldAddOne() {
    let mut config = Config::default();
    config.translation.available_providers.clear();
    config.translation.provider = TranslationProvider::DeepLx;

    assert_eq!(config.translation.get_endpoint(), "http://127.0.0.1:1188/translate");

    config.translation.set_endpoint("http://deeplx:1188/translate");
    assert_eq!(config.translation.available_providers.len(), 1);
    assert_eq!(config.translation.get_endpoint(), "http://deeplx:1188/translate");
}

/// Test provider parsing
#[test]
fn test_translation_provider_fromStr_shouldAcceptKnownNames() {
    assert_eq!("google".parse::<TranslationProvider>().ok(), Some(TranslationProvider::Google));
    assert_eq!("LibreTranslate".parse::<TranslationProvider>().ok(), Some(TranslationProvider::Libre));
    assert_eq!("DEEPLX".parse::<TranslationProvider>().ok(), Some(TranslationProvider::DeepLx));
    assert!("bing".parse::<TranslationProvider>().is_err());
    assert_eq!(TranslationProvider::DeepLx.to_string(), "deeplx");
}

/// Test that a missing config file is created with defaults
#[test]
fn test_load_or_create_withMissingFile_shouldCreateDefault() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;

    assert!(path.exists());
    assert_eq!(config.launcher.tunnel.port, 5100);

    let reloaded = Config::load_or_create(&path)?;
    assert_eq!(reloaded.i18n.marker_attribute, config.i18n.marker_attribute);
    Ok(())
}

/// Test that the default config is written even when its directory is missing
#[test]
fn test_load_or_create_withMissingParentDir_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("settings/tavernkit/conf.json");

    Config::load_or_create(&path)?;

    assert!(path.is_file());
    Ok(())
}

/// Test that a partial config file is completed with defaults
#[test]
fn test_load_or_create_withPartialFile_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{"launcher": {"tunnel": {"port": 8080}}, "translation": {"provider": "deeplx"}, "log_level": "debug"}"#,
    )?;

    let config = Config::load_or_create(&path)?;

    assert_eq!(config.launcher.tunnel.port, 8080);
    assert_eq!(config.launcher.tunnel.command, "lt");
    assert_eq!(config.launcher.server_command, "python server.py");
    assert_eq!(config.i18n.extension, "html");
    assert_eq!(config.translation.provider, TranslationProvider::DeepLx);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert!(config.validate().is_ok());
    Ok(())
}

/// Test that malformed JSON is reported
#[test]
fn test_load_or_create_withMalformedFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    assert!(Config::load_or_create(&path).is_err());
    Ok(())
}
