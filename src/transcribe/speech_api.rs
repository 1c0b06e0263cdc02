use serde::Deserialize;
use tracing::debug;

use async_trait::async_trait;

use super::{Recognizer, SpeechLanguage, WindowClip, WindowOutcome};

/// Network-backed recognizer speaking the Google web speech API shape:
/// WAV body in, JSON lines with transcript alternatives out.
pub struct SpeechApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl SpeechApiClient {
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

    /// Pull the first non-empty transcript out of the response body.
    ///
    /// The API answers one JSON object per line; empty result arrays mean
    /// the backend heard no intelligible speech.
    fn classify_body(body: &str) -> WindowOutcome {
        let mut parsed_any = false;

        for line in body.lines().filter(|l| !l.trim().is_empty()) {
            let response: RecognizeResponse = match serde_json::from_str(line) {
                Ok(r) => r,
                Err(_) => continue,
            };
            parsed_any = true;

            for result in response.result {
                for alternative in result.alternative {
                    let transcript = alternative.transcript.trim();
                    if !transcript.is_empty() {
                        return WindowOutcome::Recognized(transcript.to_string());
                    }
                }
            }
        }

        if parsed_any || body.trim().is_empty() {
            WindowOutcome::NoSpeech
        } else {
            let preview: String = body.chars().take(200).collect();
            WindowOutcome::BackendError(format!("Unparseable recognize response: {preview}"))
        }
    }
}

#[async_trait]
impl Recognizer for SpeechApiClient {
    async fn recognize(&self, clip: &WindowClip, language: SpeechLanguage) -> WindowOutcome {
        debug!(
            "Recognizing window [{}ms..{}ms], noise floor {:.1}, lang {}",
            clip.window.start_ms, clip.window.end_ms, clip.noise_rms, language
        );

        let mut request = self
            .client
            .post(&self.base_url)
            .query(&[("lang", language.tag()), ("output", "json")])
            .header("Content-Type", "audio/l16; rate=16000")
            .body(clip.wav.clone());

        if let Some(ref key) = self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return WindowOutcome::BackendError(format!("Transport error: {e}")),
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return WindowOutcome::BackendError(format!("Failed to read response: {e}")),
        };

        if !status.is_success() {
            return WindowOutcome::BackendError(format!(
                "Recognize API error ({status}): {}",
                body.trim()
            ));
        }

        Self::classify_body(&body)
    }

    fn name(&self) -> &'static str {
        "Speech API"
    }
}

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    result: Vec<RecognizeResult>,
}

#[derive(Debug, Deserialize)]
struct RecognizeResult {
    #[serde(default)]
    alternative: Vec<RecognizeAlternative>,
}

#[derive(Debug, Deserialize)]
struct RecognizeAlternative {
    #[serde(default)]
    transcript: String,
}
