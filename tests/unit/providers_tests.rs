/*!
 * Tests for translator construction and request shaping
 */

use std::time::Duration;
use tavernkit::app_config::{TranslationConfig, TranslationProvider};
use tavernkit::errors::ProviderError;
use tavernkit::providers::build_translator;
use tavernkit::providers::deeplx::deepl_target_code;
use tavernkit::providers::google::GoogleTranslator;
use tavernkit::providers::libre::libre_language_code;

/// Test that each configured provider builds the matching backend
#[test]
fn test_build_translator_withEachProvider_shouldSelectBackend() {
    let mut config = TranslationConfig::default();
    assert_eq!(build_translator(&config).map(|t| t.name().to_string()).ok().as_deref(), Some("Google"));

    config.provider = TranslationProvider::DeepLx;
    assert_eq!(build_translator(&config).map(|t| t.name().to_string()).ok().as_deref(), Some("DeepLX"));

    config.provider = TranslationProvider::Libre;
    config.set_endpoint("http://localhost:5000/translate");
    assert_eq!(build_translator(&config).map(|t| t.name().to_string()).ok().as_deref(), Some("LibreTranslate"));
}

/// Test that LibreTranslate without an endpoint is rejected
#[test]
fn test_build_translator_withLibreWithoutEndpoint_shouldFail() {
    let config = TranslationConfig {
        provider: TranslationProvider::Libre,
        ..TranslationConfig::default()
    };

    assert!(matches!(build_translator(&config), Err(ProviderError::NotConfigured(_))));
}

/// Test the Google request URL
#[test]
fn test_google_request_url_shouldCarryLanguagesAndText() {
    let translator = GoogleTranslator::new("https://translate.googleapis.com/", Duration::from_secs(5));
    let url = translator.request_url("Hi there", "en", "zh-CN").map(|u| u.to_string());

    assert_eq!(
        url.ok().as_deref(),
        Some("https://translate.googleapis.com/translate_a/single?client=gtx&sl=en&tl=zh-CN&dt=t&q=Hi+there")
    );
}

/// Test language code mapping for LibreTranslate and DeepLX
#[test]
fn test_language_code_mapping() {
    assert_eq!(libre_language_code("zh-CN"), "zh");
    assert_eq!(libre_language_code("zh-TW"), "zt");
    assert_eq!(libre_language_code("ja-JP"), "ja");

    assert_eq!(deepl_target_code("zh-CN"), "ZH");
    assert_eq!(deepl_target_code("de"), "DE");
}
