use serde::{Deserialize, Serialize};
use tracing::debug;

use async_trait::async_trait;

use crate::error::{Result, VaaniError};

use super::{TextLanguage, TranslationBackend};

/// Network-backed translation client speaking the LibreTranslate JSON
/// shape: `{q, source, target}` in, `{translatedText}` out.
pub struct RestTranslateClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl RestTranslateClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

#[derive(Deserialize)]
struct TranslateErrorResponse {
    error: String,
}

#[async_trait]
impl TranslationBackend for RestTranslateClient {
    async fn translate_span(
        &self,
        text: &str,
        src: TextLanguage,
        dst: TextLanguage,
    ) -> Result<String> {
        debug!(
            "Translate span {} -> {}, {} chars",
            src,
            dst,
            text.chars().count()
        );

        let request = TranslateRequest {
            q: text,
            source: src.code(),
            target: dst.code(),
            api_key: self.api_key.as_deref(),
        };

        let response = self
            .client
            .post(&self.base_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| VaaniError::Api(format!("Translation request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| VaaniError::Api(format!("Failed to read translation response: {e}")))?;

        if !status.is_success() {
            if let Ok(api_error) = serde_json::from_str::<TranslateErrorResponse>(&body) {
                return Err(VaaniError::Api(format!(
                    "Translation API error ({status}): {}",
                    api_error.error
                )));
            }
            return Err(VaaniError::Api(format!(
                "Translation API error ({status}): {}",
                body.trim()
            )));
        }

        let parsed: TranslateResponse = serde_json::from_str(&body)
            .map_err(|e| VaaniError::Api(format!("Failed to parse translation response: {e}")))?;

        Ok(parsed.translated_text.trim().to_string())
    }

    fn name(&self) -> &'static str {
        "REST translate"
    }
}
