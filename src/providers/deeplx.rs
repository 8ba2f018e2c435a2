use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::Translator;

/// Client for a DeepLX proxy server
#[derive(Debug)]
pub struct DeepLxTranslator {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct DeepLxRequest<'a> {
    text: &'a str,
    source_lang: &'a str,
    target_lang: String,
}

#[derive(Debug, Deserialize)]
struct DeepLxResponse {
    data: String,
}

impl DeepLxTranslator {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
        }
    }
}

/// DeepL target code for a locale tag; both Chinese variants map to `ZH`
pub fn deepl_target_code(tag: &str) -> String {
    let upper = tag.to_uppercase().replace('_', "-");
    match upper.as_str() {
        "ZH-CN" | "ZH-TW" => "ZH".to_string(),
        _ => upper,
    }
}

#[async_trait]
impl Translator for DeepLxTranslator {
    async fn translate(
        &self,
        text: &str,
        _source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let request = DeepLxRequest {
            text,
            source_lang: "auto",
            target_lang: deepl_target_code(target_language),
        };

        let response = self.client.post(&self.endpoint)
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("DeepLX error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let body = response.json::<DeepLxResponse>().await?;
        Ok(body.data)
    }

    fn name(&self) -> &str {
        "DeepLX"
    }
}
