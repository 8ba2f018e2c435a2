/*!
 * Translation backends used to fill in missing dictionary entries.
 *
 * This module contains client implementations for:
 * - Google: public `translate_a/single` endpoint
 * - LibreTranslate: self-hosted or public LibreTranslate server
 * - DeepLX: local DeepL proxy
 * - Mock: deterministic in-process backend for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::app_config::{TranslationConfig, TranslationProvider};
use crate::errors::ProviderError;

/// Common trait for all translation backends
///
/// Implementations translate a single piece of text and report failures as
/// `ProviderError`. Callers decide whether a failure is fatal.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Translate `text` from `source_language` to `target_language`
    ///
    /// # Arguments
    /// * `text` - The text to translate
    /// * `source_language` - Locale tag of the input text (e.g. `en`)
    /// * `target_language` - Locale tag to translate into (e.g. `zh-CN`)
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError>;

    /// Human-readable backend name for log messages
    fn name(&self) -> &str;
}

/// Build the translator selected in the configuration
pub fn build_translator(config: &TranslationConfig) -> Result<Box<dyn Translator>, ProviderError> {
    let endpoint = config.get_endpoint();
    let timeout = config.get_timeout();

    let translator: Box<dyn Translator> = match config.provider {
        TranslationProvider::Google => Box::new(google::GoogleTranslator::new(endpoint, timeout)),
        TranslationProvider::Libre => {
            if endpoint.is_empty() {
                return Err(ProviderError::NotConfigured(
                    "LibreTranslate URL is not configured".to_string(),
                ));
            }
            Box::new(libre::LibreTranslator::new(endpoint, config.get_api_key(), timeout))
        }
        TranslationProvider::DeepLx => Box::new(deeplx::DeepLxTranslator::new(endpoint, timeout)),
    };

    Ok(translator)
}

pub mod google;
pub mod libre;
pub mod deeplx;
pub mod mock;
