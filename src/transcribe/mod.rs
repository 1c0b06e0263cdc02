pub mod chunked;
pub mod speech_api;

pub use chunked::ChunkedTranscriber;
pub use speech_api::SpeechApiClient;

use crate::audio::AudioWindow;
use async_trait::async_trait;

/// Spoken-language tag passed to the recognition backend.
///
/// Exactly two tags are supported; anything else maps to the English
/// variant at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeechLanguage {
    #[default]
    EnglishIndia,
    HindiIndia,
}

impl SpeechLanguage {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "hi-IN" => SpeechLanguage::HindiIndia,
            _ => SpeechLanguage::EnglishIndia,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            SpeechLanguage::EnglishIndia => "en-IN",
            SpeechLanguage::HindiIndia => "hi-IN",
        }
    }

    pub fn is_hindi(&self) -> bool {
        matches!(self, SpeechLanguage::HindiIndia)
    }
}

impl std::fmt::Display for SpeechLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Outcome of recognizing a single window. Failures are data, not errors:
/// the chunked transcriber skips failed windows and continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowOutcome {
    Recognized(String),
    NoSpeech,
    BackendError(String),
}

/// One window's audio, ready for the recognition backend.
#[derive(Debug, Clone)]
pub struct WindowClip {
    /// WAV bytes of the clip (the window minus the calibration pass).
    pub wav: Vec<u8>,
    pub window: AudioWindow,
    /// RMS noise floor measured over the calibration pass.
    pub noise_rms: f32,
}

#[async_trait]
pub trait Recognizer: Send + Sync {
    async fn recognize(&self, clip: &WindowClip, language: SpeechLanguage) -> WindowOutcome;
    fn name(&self) -> &'static str;
}
