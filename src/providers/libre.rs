use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::Translator;

/// LibreTranslate client
#[derive(Debug)]
pub struct LibreTranslator {
    /// HTTP client for API requests
    client: Client,
    /// Full `/translate` URL of the server
    endpoint: String,
    /// Optional API key
    api_key: String,
}

/// LibreTranslate request body
#[derive(Debug, Serialize)]
pub struct LibreRequest<'a> {
    pub q: &'a str,
    pub source: &'a str,
    pub target: &'a str,
    pub format: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub api_key: &'a str,
}

/// LibreTranslate response body
#[derive(Debug, Deserialize)]
pub struct LibreResponse {
    #[serde(rename = "translatedText")]
    pub translated_text: String,
}

impl LibreTranslator {
    /// Create a new LibreTranslate client
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

/// LibreTranslate only knows bare language codes, except for Chinese variants
pub fn libre_language_code(tag: &str) -> String {
    match tag.to_lowercase().replace('_', "-").as_str() {
        "zh-cn" => "zh".to_string(),
        "zh-tw" => "zt".to_string(),
        other => other.split('-').next().unwrap_or(other).to_string(),
    }
}

#[async_trait]
impl Translator for LibreTranslator {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let source = libre_language_code(source_language);
        let target = libre_language_code(target_language);
        let request = LibreRequest {
            q: text,
            source: &source,
            target: &target,
            format: "text",
            api_key: &self.api_key,
        };

        let response = self.client.post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("LibreTranslate error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let body = response.json::<LibreResponse>().await?;
        Ok(body.translated_text)
    }

    fn name(&self) -> &str {
        "LibreTranslate"
    }
}
