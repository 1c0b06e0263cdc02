use serde::Serialize;
use tracing::{info, warn};

use crate::audio;
use crate::config::Config;
use crate::error::{Result, VaaniError};
use crate::summarize::{summarize, DEFAULT_MAX_SENTENCES};
use crate::transcribe::{ChunkedTranscriber, Recognizer, SpeechApiClient, SpeechLanguage};
use crate::translate::{RestTranslateClient, TextLanguage, TranslationBackend, Translator};

/// Transcripts at or below this many characters skip summarization.
const SUMMARY_GATE_CHARS: usize = 200;

/// One uploaded media file, scoped to a single request.
#[derive(Debug, Clone)]
pub struct MediaInput {
    pub data: Vec<u8>,
    pub mime_type: String,
    pub file_name: Option<String>,
    pub language: SpeechLanguage,
}

impl MediaInput {
    /// Lowercase extension from the file name; audio uploads without one
    /// are assumed to be WAV.
    fn audio_extension(&self) -> String {
        self.file_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_else(|| "wav".to_string())
    }
}

/// The externally visible result of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct ResultRecord {
    pub success: bool,
    pub original_text: String,
    pub original_language: String,
    pub english_full_text: String,
    pub bengali_full_text: String,
    pub english_summary: String,
    pub bengali_summary: String,
    pub text_length: usize,
    pub was_summarized: bool,
}

/// Sequences extraction/normalization, chunked transcription, translation
/// and summarization for one uploaded file. Holds only immutable client
/// handles; nothing spans two requests.
pub struct MediaPipeline {
    transcriber: ChunkedTranscriber,
    translator: Translator,
}

impl MediaPipeline {
    pub fn new(
        recognizer: Box<dyn Recognizer>,
        translation_backend: Box<dyn TranslationBackend>,
    ) -> Self {
        Self {
            transcriber: ChunkedTranscriber::new(recognizer),
            translator: Translator::new(translation_backend),
        }
    }

    /// Build the network-backed pipeline from configuration.
    pub fn from_config(config: &Config) -> Self {
        let recognizer = SpeechApiClient::new(config.speech_api_url.clone())
            .with_api_key(config.speech_api_key.clone());
        let translation = RestTranslateClient::new(config.translate_api_url.clone())
            .with_api_key(config.translate_api_key.clone());
        Self::new(Box::new(recognizer), Box::new(translation))
    }

    /// Run the full pipeline on one uploaded file.
    pub async fn process(&self, input: MediaInput) -> Result<ResultRecord> {
        let wav = if input.mime_type.starts_with("video/") {
            info!("Stage 1/4: extracting audio from video upload");
            audio::extract_audio(&input.data).await?
        } else if input.mime_type.starts_with("audio/") {
            let extension = input.audio_extension();
            info!("Stage 1/4: normalizing audio upload (.{extension})");
            audio::normalize(&input.data, &extension).await?
        } else {
            return Err(VaaniError::UnsupportedMedia);
        };

        info!("Stage 2/4: transcribing ({})", input.language);
        let transcript = self.transcriber.transcribe(&wav, input.language).await?;
        let transcript_chars = transcript.chars().count();

        let source = if input.language.is_hindi() || contains_devanagari(&transcript) {
            TextLanguage::Hindi
        } else {
            TextLanguage::English
        };
        info!("Detected source language: {source}");

        info!("Stage 3/4: translating");
        let (english_full_text, bengali_full_text) = match source {
            TextLanguage::Hindi => {
                futures::future::join(
                    self.translate_or_placeholder(
                        &transcript,
                        TextLanguage::Hindi,
                        TextLanguage::English,
                    ),
                    self.translate_or_placeholder(
                        &transcript,
                        TextLanguage::Hindi,
                        TextLanguage::Bengali,
                    ),
                )
                .await
            }
            _ => {
                let bengali = self
                    .translate_or_placeholder(
                        &transcript,
                        TextLanguage::English,
                        TextLanguage::Bengali,
                    )
                    .await;
                (transcript.clone(), bengali)
            }
        };

        info!("Stage 4/4: summarizing");
        let was_summarized = transcript_chars > SUMMARY_GATE_CHARS;
        let english_summary = summary_for(&english_full_text, was_summarized);
        let bengali_summary = summary_for(&bengali_full_text, was_summarized);

        Ok(ResultRecord {
            success: true,
            original_text: transcript,
            original_language: match source {
                TextLanguage::Hindi => "Hindi".to_string(),
                _ => "English".to_string(),
            },
            english_full_text,
            bengali_full_text,
            english_summary,
            bengali_summary,
            text_length: transcript_chars,
            was_summarized,
        })
    }

    /// A translation failure degrades its own field; the sibling language
    /// is unaffected.
    async fn translate_or_placeholder(
        &self,
        text: &str,
        src: TextLanguage,
        dst: TextLanguage,
    ) -> String {
        match self.translator.translate(text, src, dst).await {
            Ok(translated) => translated,
            Err(e) => {
                warn!("Translation {src} -> {dst} degraded: {e}");
                format!("Translation error: {e}")
            }
        }
    }
}

fn summary_for(full_text: &str, gate_open: bool) -> String {
    if gate_open && full_text.chars().count() > SUMMARY_GATE_CHARS {
        summarize(full_text, DEFAULT_MAX_SENTENCES)
    } else {
        full_text.to_string()
    }
}

/// Any character in the Devanagari block marks the text as Hindi.
fn contains_devanagari(text: &str) -> bool {
    text.chars().any(|c| ('\u{0900}'..='\u{097F}').contains(&c))
}
