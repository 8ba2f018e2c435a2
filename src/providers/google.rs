use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::providers::Translator;

/// Client for the public Google Translate endpoint
#[derive(Debug)]
pub struct GoogleTranslator {
    /// HTTP client for API requests
    client: Client,
    /// Base URL, e.g. `https://translate.googleapis.com`
    endpoint: String,
}

impl GoogleTranslator {
    /// Create a new Google client
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
        }
    }

    /// Build the request URL for one piece of text
    pub fn request_url(&self, text: &str, source_language: &str, target_language: &str) -> Result<Url, ProviderError> {
        let base = format!("{}/translate_a/single", self.endpoint.trim_end_matches('/'));
        Url::parse_with_params(&base, &[
            ("client", "gtx"),
            ("sl", source_language),
            ("tl", target_language),
            ("dt", "t"),
            ("q", text),
        ])
        .map_err(|e| ProviderError::NotConfigured(format!("Invalid Google endpoint '{}': {}", base, e)))
    }

    /// Join the translated segments of a `translate_a/single` response
    ///
    /// The response is a nested array whose first element lists
    /// `[translated, original, ...]` segments.
    pub fn parse_response(body: &Value) -> Result<String, ProviderError> {
        let segments = body.get(0)
            .and_then(|s| s.as_array())
            .ok_or_else(|| ProviderError::ParseError("Missing translation segments".to_string()))?;

        let translated: String = segments.iter()
            .filter_map(|segment| segment.get(0).and_then(|t| t.as_str()))
            .collect();

        if translated.is_empty() {
            return Err(ProviderError::ParseError("Empty translation".to_string()));
        }

        Ok(translated)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let url = self.request_url(text, source_language, target_language)?;
        debug!("Google request: {} -> {} ({} chars)", source_language, target_language, text.len());

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Google Translate error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let body = response.json::<Value>().await?;
        Self::parse_response(&body)
    }

    fn name(&self) -> &str {
        "Google"
    }
}
