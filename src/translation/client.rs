use crate::utils::{Result, TranslationConfig, XlsxTranslatorError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// Translation provider. The source language is always detected by the provider.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target: &str) -> Result<String>;

    fn name(&self) -> &str;
}

/// Google Translate web endpoint, the same backend the upload form used.
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
    max_chars: usize,
}

impl GoogleTranslator {
    pub fn new(config: &TranslationConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            max_chars: config.max_chars,
        })
    }

    async fn call_api(&self, text: &str, target: &str) -> Result<String> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(XlsxTranslatorError::TooManyRequests);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(XlsxTranslatorError::ApiError(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let body: Value = response.json().await?;
        parse_translation_response(&body)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target: &str) -> Result<String> {
        // The length limit applies to the raw cell text, before trimming.
        let len = text.chars().count();
        if len >= self.max_chars {
            return Err(XlsxTranslatorError::TextTooLong {
                len,
                max: self.max_chars,
            });
        }

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        self.call_api(trimmed, target).await
    }

    fn name(&self) -> &str {
        "google"
    }
}

/// Joins the translated segments of a `[[["<translated>", "<source>", ...], ...], ...]` reply.
pub fn parse_translation_response(body: &Value) -> Result<String> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| XlsxTranslatorError::ApiError("No translation in response".to_string()))?;

    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if text.is_empty() {
        return Err(XlsxTranslatorError::ApiError(
            "No translation in response".to_string(),
        ));
    }

    Ok(text)
}
